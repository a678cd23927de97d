//! CLI channel — stdin/stdout REPL for walking through the chat flow locally.

use chrono::Utc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use crate::dialogue::{
    ConversationMessage, ConversationState, DialogueEngine, EngineAction, Turn, UserAction,
};
use crate::error::ChannelError;

/// A single local conversation driven from the terminal.
pub struct CliChannel {
    engine: DialogueEngine,
}

/// Whether the REPL should keep reading after a turn.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

impl CliChannel {
    pub fn new(engine: DialogueEngine) -> Self {
        Self { engine }
    }

    pub fn name(&self) -> &str {
        "cli"
    }

    /// Run against the process's stdin and stdout until EOF or the chat closes.
    pub async fn run(&self) -> Result<(), ChannelError> {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        self.run_with(stdin, &mut stdout).await
    }

    /// Run the REPL over any line source and sink.
    pub async fn run_with<R, W>(&self, reader: R, writer: &mut W) -> Result<(), ChannelError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut state = ConversationState::new();
        let greeting = self.engine.open(&mut state, None, Utc::now());
        self.emit(writer, greeting).await?;

        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if line == "/reset" {
                info!("CLI conversation reset");
                state.reset();
                let greeting = self.engine.open(&mut state, None, Utc::now());
                self.emit(writer, greeting).await?;
                continue;
            }

            let input = pick_option(line, state.offered_options());
            let action = UserAction::classify_for(&input, &state);
            debug!(action = ?action, "CLI input classified");
            let turn = self.engine.apply(&mut state, action);

            if self.emit(writer, turn).await? == Flow::Exit {
                break;
            }
        }

        info!(step = state.step, "CLI conversation ended");
        Ok(())
    }

    async fn emit<W>(&self, writer: &mut W, turn: Turn) -> Result<Flow, ChannelError>
    where
        W: AsyncWrite + Unpin,
    {
        for reply in &turn.replies {
            if !reply.delay.is_zero() {
                tokio::time::sleep(reply.delay).await;
            }
            writer.write_all(render(&reply.message).as_bytes()).await?;
            writer.flush().await?;
        }

        for action in &turn.actions {
            match action {
                EngineAction::OpenUrl { url, after } => {
                    if !after.is_zero() {
                        tokio::time::sleep(*after).await;
                    }
                    writer
                        .write_all(format!("🔗 Open: {url}\n\n").as_bytes())
                        .await?;
                }
                EngineAction::CloseWidget { after } => {
                    if !after.is_zero() {
                        tokio::time::sleep(*after).await;
                    }
                    writer.write_all("👋 Chat closed.\n".as_bytes()).await?;
                    writer.flush().await?;
                    return Ok(Flow::Exit);
                }
            }
        }

        writer.flush().await?;
        Ok(Flow::Continue)
    }
}

/// Format a bot message with its numbered quick replies.
fn render(message: &ConversationMessage) -> String {
    let mut out = format!("🤖 {}\n", message.text);
    for (i, option) in message.quick_replies.iter().enumerate() {
        out.push_str(&format!("   [{}] {}\n", i + 1, option));
    }
    out.push('\n');
    out
}

/// A bare number picks the matching quick reply; anything else passes through.
fn pick_option(line: &str, offered: &[String]) -> String {
    line.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| offered.get(i))
        .cloned()
        .unwrap_or_else(|| line.to_string())
}
