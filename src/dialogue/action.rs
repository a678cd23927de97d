//! Inputs to and outputs from a single engine turn.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::menu::MenuCommand;
use super::model::ConversationMessage;
use super::prompts;
use super::state::{ConversationState, DialoguePhase};

/// What the user did, decided once at the UI boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// A quick-reply option that answers the pending question.
    ProfileAnswer(String),
    /// A navigational quick reply.
    MenuCommand(MenuCommand),
    /// Anything typed.
    FreeText(String),
}

impl UserAction {
    /// Classify raw widget input.
    ///
    /// Exact menu labels become commands. Otherwise a label among the options
    /// offered by the latest bot message is a profile answer, and everything
    /// else is free text.
    pub fn classify(raw: &str, offered: &[String]) -> Self {
        if let Some(cmd) = MenuCommand::from_label(raw) {
            return Self::MenuCommand(cmd);
        }
        if offered.iter().any(|o| o == raw) {
            return Self::ProfileAnswer(raw.to_string());
        }
        Self::FreeText(raw.to_string())
    }

    /// Classify against the options the conversation currently offers.
    ///
    /// The pending questionnaire step's options also count, so a detour
    /// through a topic answer does not stop the user from picking one.
    pub fn classify_for(raw: &str, state: &ConversationState) -> Self {
        match Self::classify(raw, state.offered_options()) {
            Self::FreeText(text) if answers_pending_step(&text, state) => {
                Self::ProfileAnswer(text)
            }
            action => action,
        }
    }

    /// The text the user sees echoed in the transcript.
    pub fn text(&self) -> &str {
        match self {
            Self::ProfileAnswer(text) | Self::FreeText(text) => text,
            Self::MenuCommand(cmd) => cmd.label(),
        }
    }
}

fn answers_pending_step(text: &str, state: &ConversationState) -> bool {
    state
        .pending_field()
        .is_some_and(|field| prompts::step_options(field).iter().any(|o| *o == text))
}

/// A side effect the host must carry out. The engine never performs I/O.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineAction {
    /// Open an external link (messaging deep link or `tel:` dialer).
    OpenUrl {
        url: String,
        #[serde(with = "duration_ms")]
        after: Duration,
    },
    /// Close the widget, discarding any reply still waiting to be shown.
    CloseWidget {
        #[serde(with = "duration_ms")]
        after: Duration,
    },
}

/// A bot message plus how long the host should wait before showing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub message: ConversationMessage,
    #[serde(rename = "delay_ms", with = "duration_ms")]
    pub delay: Duration,
}

/// Outcome of one call to the engine.
#[derive(Debug, Clone, Default)]
pub struct Turn {
    pub replies: Vec<Reply>,
    pub actions: Vec<EngineAction>,
}

impl Turn {
    pub fn texts(&self) -> Vec<&str> {
        self.replies.iter().map(|r| r.message.text.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.replies.is_empty() && self.actions.is_empty()
    }
}

/// Snapshot returned to hosts alongside a turn.
#[derive(Debug, Clone, Serialize)]
pub struct TurnReport {
    pub replies: Vec<Reply>,
    pub actions: Vec<EngineAction>,
    pub phase: DialoguePhase,
    pub step: usize,
}

impl TurnReport {
    pub fn new(turn: Turn, state: &ConversationState) -> Self {
        Self {
            replies: turn.replies,
            actions: turn.actions,
            phase: state.phase(),
            step: state.step,
        }
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::menu::FaqCategory;

    fn options(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn menu_labels_win_over_offered_options() {
        let offered = options(&["Browse FAQs", "Canada"]);
        assert_eq!(
            UserAction::classify("Browse FAQs", &offered),
            UserAction::MenuCommand(MenuCommand::BrowseFaqs)
        );
        assert_eq!(
            UserAction::classify("Tests & Exams", &[]),
            UserAction::MenuCommand(MenuCommand::Category(FaqCategory::TestsAndExams))
        );
    }

    #[test]
    fn offered_option_is_profile_answer() {
        let offered = options(&["USA", "Canada"]);
        assert_eq!(
            UserAction::classify("Canada", &offered),
            UserAction::ProfileAnswer("Canada".into())
        );
    }

    #[test]
    fn anything_else_is_free_text() {
        let offered = options(&["USA", "Canada"]);
        assert_eq!(
            UserAction::classify("canada", &offered),
            UserAction::FreeText("canada".into())
        );
        assert_eq!(
            UserAction::classify("Asha", &[]),
            UserAction::FreeText("Asha".into())
        );
    }

    #[test]
    fn pending_step_options_count_after_a_detour() {
        let mut state = ConversationState::new();
        state.step = 3;
        state.push(ConversationMessage::bot("Visa info").with_quick_replies(["Browse FAQs"]));
        assert_eq!(
            UserAction::classify_for("Canada", &state),
            UserAction::ProfileAnswer("Canada".into())
        );
        assert_eq!(
            UserAction::classify_for("Browse FAQs", &state),
            UserAction::MenuCommand(MenuCommand::BrowseFaqs)
        );
        assert_eq!(
            UserAction::classify_for("Engineering & Technology", &state),
            UserAction::FreeText("Engineering & Technology".into())
        );
    }

    #[test]
    fn command_text_is_its_label() {
        let action = UserAction::MenuCommand(MenuCommand::Topic("ielts"));
        assert_eq!(action.text(), "IELTS");
    }

    #[test]
    fn actions_serialize_with_millisecond_delays() {
        let action = EngineAction::OpenUrl {
            url: "tel:+911234".into(),
            after: Duration::from_millis(1500),
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "open_url", "url": "tel:+911234", "after": 1500 })
        );

        let parsed: EngineAction = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, action);
    }
}
