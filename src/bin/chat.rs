use std::io::Write;

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gemini_relay::client::relay::DEFAULT_RELAY_URL;
use gemini_relay::client::render::render_transcript;
use gemini_relay::client::{ChatView, RelayClient, SubmitOutcome};

/// Terminal chat client for the relay.
#[derive(Debug, Parser)]
#[command(name = "chat", version)]
struct Args {
    /// Base URL of the relay service
    #[arg(long, env = "RELAY_URL", default_value = DEFAULT_RELAY_URL)]
    url: String,

    /// Column width used to right-align your own messages
    #[arg(long, default_value_t = 80)]
    width: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gemini_relay=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let relay = RelayClient::new(args.url);
    let mut view = ChatView::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    prompt()?;
    while let Some(line) = lines.next_line().await? {
        if line.trim() == "/quit" {
            break;
        }
        view.set_input(line);

        let shown = view.turns().len();
        let width = args.width;
        let outcome = view
            .submit_with(&relay, |v| {
                print!("{}", render_transcript(&v.turns()[shown..], v.is_busy(), width));
            })
            .await;

        match outcome {
            SubmitOutcome::Replied => {
                // The user turn was already printed while pending.
                let last = view.turns().len() - 1;
                print!("{}", render_transcript(&view.turns()[last..], false, width));
            }
            SubmitOutcome::Failed => {
                println!("[no reply: {}]", view.last_error().unwrap_or("unknown error"));
            }
            SubmitOutcome::Skipped => {}
        }
        prompt()?;
    }

    Ok(())
}

fn prompt() -> std::io::Result<()> {
    let mut out = std::io::stdout();
    write!(out, "> ")?;
    out.flush()
}
