use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use client_core::{
    load_client_settings, ChatWidget, ClientSettings, HttpChatTransport, WidgetEvent,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod terminal;

use terminal::TerminalSurface;

#[derive(Parser, Debug)]
#[command(about = "Chat with the portfolio bot from a terminal")]
struct Args {
    /// Chat endpoint; overrides chat.toml and CHAT_ENDPOINT.
    #[arg(long)]
    endpoint: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = match args.endpoint.as_deref() {
        Some(raw) => ClientSettings::with_endpoint(raw)?,
        None => load_client_settings()?,
    };

    let surface = Arc::new(TerminalSurface::default());
    let transport = Arc::new(HttpChatTransport::new(settings.endpoint));
    info!(endpoint = %transport.endpoint(), "starting chat client");
    let widget = ChatWidget::attach(surface, transport)?;
    widget.handle_event(WidgetEvent::IconClicked).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "/quit" => break,
            "/toggle" => {
                widget.handle_event(WidgetEvent::IconClicked).await;
            }
            _ => {
                widget.handle_event(WidgetEvent::InputChanged(line)).await;
                widget
                    .handle_event(WidgetEvent::KeyPressed("Enter".into()))
                    .await;
            }
        }
    }

    Ok(())
}
