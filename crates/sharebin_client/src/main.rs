//! Command-line client driving the paste view-model controller.

use clap::{Parser, Subcommand};
use sharebin_client::{
    spawn_store_worker, ApiClient, Location, PasteController, StoreEvent,
};
use sharebin_core::{highlight::Highlighter, DEFAULT_SERVER_URL};
use std::io::{self, Read};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "spaste", about = "Sharebin CLI", version)]
struct Cli {
    /// Server URL (can also be set via SHAREBIN_SERVER env var)
    #[arg(short, long, env = "SHAREBIN_SERVER")]
    server: Option<String>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    json: bool,

    /// Request timeout in seconds
    #[arg(short = 't', long, default_value = "30")]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a paste from a file or stdin
    New {
        #[arg(short, long)]
        file: Option<String>,
        #[arg(long)]
        title: Option<String>,
    },
    /// Fetch a paste by id
    Get { id: String },
    /// Delete a paste by id
    Delete { id: String },
}

/// Pump worker completions into the controller until it settles.
async fn settle(controller: &mut PasteController, events: &mut UnboundedReceiver<StoreEvent>) {
    while !controller.is_idle() {
        match events.recv().await {
            Some(event) => controller.apply(event),
            None => break,
        }
    }
}

fn bail_on_error(controller: &PasteController, action: &str) -> anyhow::Result<()> {
    if let Some(err) = controller.last_error() {
        anyhow::bail!("{} failed: {}", action, err.message);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sharebin=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let server = cli
        .server
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
    let api = ApiClient::new(&server, Duration::from_secs(cli.timeout))?;
    let location = Location::parse(api.server())?;

    let handle = spawn_store_worker(api);
    let mut events = handle.evt_rx;
    let mut controller = PasteController::new(
        handle.cmd_tx.clone(),
        Arc::new(Highlighter::new()),
        location,
    );

    match cli.command {
        Commands::New { file, title } => {
            let content = match file {
                Some(path) => std::fs::read_to_string(path)?,
                None => {
                    let mut buffer = String::new();
                    io::stdin().read_to_string(&mut buffer)?;
                    buffer
                }
            };
            controller.set_draft_title(title.as_deref().unwrap_or(""));
            controller.set_draft_content(&content);
            controller.submit();
            settle(&mut controller, &mut events).await;
            bail_on_error(&controller, "New")?;

            match controller.current() {
                Some(view) => {
                    if cli.json {
                        println!("{}", serde_json::to_string_pretty(&view.paste)?);
                    } else {
                        let url = controller.share_url().unwrap_or_default();
                        println!("Created: {}", url);
                    }
                }
                None => anyhow::bail!("New failed: no paste returned"),
            }
        }
        Commands::Get { id } => {
            controller.load(id);
            settle(&mut controller, &mut events).await;
            bail_on_error(&controller, "Get")?;

            match controller.current() {
                Some(view) => {
                    if cli.json {
                        println!("{}", serde_json::to_string_pretty(&view.paste)?);
                    } else {
                        print!("{}", view.paste.content);
                        if !view.paste.content.ends_with('\n') {
                            println!();
                        }
                    }
                }
                None => anyhow::bail!("Get failed: no paste returned"),
            }
        }
        Commands::Delete { id } => {
            controller.load(id.clone());
            settle(&mut controller, &mut events).await;
            bail_on_error(&controller, "Delete")?;

            controller.delete();
            settle(&mut controller, &mut events).await;
            bail_on_error(&controller, "Delete")?;

            println!("Deleted paste: {}", id);
        }
    }

    Ok(())
}
