use abroad_assist::channels::CliChannel;
use abroad_assist::config::ChatConfig;
use abroad_assist::dialogue::DialogueEngine;
use abroad_assist::error::{ChannelError, Result};
use abroad_assist::routes::chat_app;
use abroad_assist::session::SessionStore;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    run(ChatConfig::from_env()).await?;
    Ok(())
}

async fn run(config: ChatConfig) -> Result<()> {
    config.validate()?;

    eprintln!("🎓 Abroad Assist v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Brand: {}", config.brand_name);
    eprintln!("   WhatsApp: {}", config.whatsapp_number);
    eprintln!(
        "   Chat API: http://0.0.0.0:{}/api/chat/sessions",
        config.http_port
    );

    // ── HTTP widget API ─────────────────────────────────────────────────
    let store = SessionStore::new(DialogueEngine::new(config.clone()));
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| ChannelError::StartupFailed {
            name: "http".to_string(),
            reason: e.to_string(),
        })?;
    tracing::info!(port = config.http_port, "Chat HTTP server started");
    let server = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, chat_app(store)).await {
            tracing::error!(error = %e, "Chat HTTP server stopped");
        }
    });

    // ── Terminal ────────────────────────────────────────────────────────
    if config.cli_enabled {
        eprintln!("   Type a message and press Enter. /reset starts over, Ctrl-D exits.\n");
        let cli = CliChannel::new(DialogueEngine::new(config));
        tracing::info!(channel = cli.name(), "Starting channel");
        cli.run().await?;
    } else {
        eprintln!("   CLI: disabled\n");
        server.await.map_err(|e| ChannelError::Stopped {
            name: "http".to_string(),
            reason: e.to_string(),
        })?;
    }

    Ok(())
}
