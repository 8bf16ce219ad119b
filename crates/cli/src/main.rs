//! `artisan-hooks` -- fire marketplace events at their webhook endpoints.
//!
//! # Environment variables
//!
//! | Variable               | Required | Default | Description                                   |
//! |------------------------|----------|---------|-----------------------------------------------|
//! | `WEBHOOK_BASE_URL`     | yes      | --      | Base URL; each event posts to `{base}/{slug}` |
//! | `WEBHOOK_URL_<EVENT>`  | no       | --      | Per-event override, e.g. `WEBHOOK_URL_ORDER_PLACED` |
//! | `SITE_ORIGIN`          | no       | --      | Storefront origin for cart/product links      |
//! | `WEBHOOK_TIMEOUT_SECS` | no       | --      | Request timeout; unset keeps client default   |

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use artisan_core::{DispatcherConfig, EventName};
use artisan_events::WebhookDispatcher;

#[derive(Parser)]
#[command(name = "artisan-hooks")]
#[command(about = "Dispatch marketplace events to webhook endpoints")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send one event and print the dispatch result as JSON
    Send {
        /// Event name, e.g. `order_placed` or `order-placed`
        event: EventName,

        /// JSON file with the event data (`-` reads stdin; omitted sends `{}`)
        #[arg(short, long)]
        data: Option<PathBuf>,
    },

    /// List every event with its resolved endpoint
    Events,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "artisan_events=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = DispatcherConfig::from_env().context("Invalid webhook configuration")?;

    match cli.command {
        Commands::Send { event, data } => {
            let data = read_data(data.as_ref())?;
            let dispatcher = WebhookDispatcher::new(config).context("Failed to build HTTP client")?;

            tracing::info!(trigger = %event, "Dispatching event");
            let result = dispatcher.send(event, &data).await;

            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(if result.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            })
        }
        Commands::Events => {
            for (event, url) in config.endpoints.iter() {
                println!("{:<24} {url}", event.as_str());
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn read_data(path: Option<&PathBuf>) -> Result<serde_json::Value> {
    let raw = match path {
        None => return Ok(serde_json::json!({})),
        Some(p) if p.as_os_str() == "-" => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read event data from stdin")?;
            buf
        }
        Some(p) => std::fs::read_to_string(p)
            .with_context(|| format!("Failed to read {}", p.display()))?,
    };
    serde_json::from_str(&raw).context("Event data is not valid JSON")
}
