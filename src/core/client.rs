//! Terminal visualization client
//!
//! Connects to a running soul server, sends each stdin line as a `chat`
//! envelope and renders incoming envelopes color-coded: thoughts dimmed,
//! responses green, errors red. The graphical client renders the same
//! envelopes as floating 3D labels; this one is its terminal counterpart
//! and covers the same wire contract.

use colored::Colorize;
use futures_util::{SinkExt, StreamExt};
use tokio::io::AsyncBufReadExt;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::debug;

use crate::types::{ClientEnvelope, ServerEnvelope};

/// Connect to `url` and relay stdin lines until the user quits or the
/// server goes away.
pub async fn run_client(url: &str) -> Result<(), crate::core::EngineError> {
    let (stream, _) = connect_async(url).await?;
    let (mut write, mut read) = stream.split();

    println!("{}", "Connected. Type a message and press Enter.".bold());
    println!("Commands: 'state' shows the soul state, 'quit' exits.");
    println!();

    let input_task = tokio::spawn(async move {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();

        while let Ok(Some(line)) = lines.next_line().await {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
                let _ = write.send(Message::Close(None)).await;
                break;
            }

            let envelope = if line.eq_ignore_ascii_case("state") {
                ClientEnvelope::GetState
            } else {
                ClientEnvelope::chat(line)
            };

            let json = match serde_json::to_string(&envelope) {
                Ok(json) => json,
                Err(err) => {
                    debug!("failed to encode envelope: {}", err);
                    continue;
                }
            };
            if write.send(Message::Text(json)).await.is_err() {
                break;
            }
        }
    });

    while let Some(message) = read.next().await {
        match message? {
            Message::Text(text) => render(&text),
            Message::Close(_) => break,
            _ => {}
        }
    }

    input_task.abort();
    println!("\n{}", "Disconnected.".dimmed());
    Ok(())
}

/// Render one server envelope as a terminal line.
fn render(text: &str) {
    let envelope: ServerEnvelope = match serde_json::from_str(text) {
        Ok(envelope) => envelope,
        Err(_) => {
            // Unknown message shape; show it raw rather than dropping it.
            println!("{}", text.dimmed());
            return;
        }
    };

    match envelope {
        ServerEnvelope::Connection { message, .. } => {
            println!("{}", format!("🔗 {}", message).cyan());
        }
        ServerEnvelope::InternalMonologue { thought, .. } => {
            println!("{}", format!("💭 {}", thought).dimmed());
        }
        ServerEnvelope::Response { message, .. } => {
            println!("{}", format!("🎓 Professor Code: {}", message).green());
        }
        ServerEnvelope::State {
            current_thought,
            conversation_history,
            ..
        } => {
            println!("{}", "── Soul state ──".bold());
            println!("  current thought: {}", current_thought);
            println!("  recent exchanges: {}", conversation_history.len());
            for exchange in &conversation_history {
                println!(
                    "    {} {} → {}",
                    exchange.timestamp.format("%H:%M:%S"),
                    exchange.user,
                    exchange.response
                );
            }
        }
        ServerEnvelope::Error { message } => {
            println!("{}", format!("❌ {}", message).red());
        }
    }
}
