mod catalog;
mod chat;
mod config;
mod links;
mod models;
mod pipeline;
mod pulse;
mod render;
mod source;
mod utils;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use std::time::Duration;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::chat::AlliyaEngine;
use crate::config::AppConfig;
use crate::models::{FilterSpec, SortKey, SortSpec};
use crate::pipeline::Pipeline;

#[derive(Parser)]
#[command(name = "grains-hub", about = "Grains Hub market engine", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Render the product catalog, optionally filtered
    Shop {
        /// Exact origin match (case-insensitive)
        #[arg(long)]
        origin: Option<String>,

        /// Badge substring, e.g. "premium"
        #[arg(long)]
        grade: Option<String>,

        /// Product name substring
        #[arg(long)]
        search: Option<String>,

        /// Emit the view as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Market pulse table with synthetic trends and mood
    Pulse {
        /// Show a single origin instead of all
        #[arg(long)]
        origin: Option<String>,

        /// Sort key: product, origin, price or change.
        /// Repeating the same key flips the direction.
        #[arg(long)]
        sort: Vec<String>,

        /// Keep refreshing on the configured interval
        #[arg(long)]
        watch: bool,

        /// Emit the view as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Homepage stock preview (first few listings)
    Preview {
        /// Emit the view as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Ask Alliya about price and availability
    Ask {
        #[arg(required = true)]
        query: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "grains_hub=info,warn",
        1 => "grains_hub=debug,info",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::new(filter))
        .init();

    let config = AppConfig::load()?;

    match cli.command {
        Command::Shop {
            origin,
            grade,
            search,
            json,
        } => {
            let _t = utils::Timer::start("Shop view");
            let pipeline = Pipeline::new(config.clone())?;
            let spec = FilterSpec {
                origin,
                grade,
                free_text: search,
            };

            let view = pipeline.shop_view(&spec).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                render::shop(&view, &config.chat.shop_whatsapp);
            }
        }

        Command::Pulse {
            origin,
            sort,
            watch,
            json,
        } => {
            let pipeline = Pipeline::new(config.clone())?;
            let spec = FilterSpec {
                origin,
                ..Default::default()
            };
            let sort_spec = build_sort(&sort)?;

            if watch {
                let interval = Duration::from_secs(config.pulse.refresh_secs);
                let mut ticker_index = 0usize;

                loop {
                    match pipeline.pulse_view(&spec, sort_spec, ticker_index).await {
                        Ok(view) => {
                            if json {
                                println!("{}", serde_json::to_string_pretty(&view)?);
                            } else {
                                render::pulse(&view);
                            }
                        }
                        Err(e) => {
                            warn!("Pulse load failed: {:#}", e);
                            println!("Failed to load prices. Retrying…");
                        }
                    }

                    ticker_index =
                        pulse::advance_ticker(config.pulse.news_feed.len(), ticker_index);
                    tokio::time::sleep(interval).await;
                }
            }

            let _t = utils::Timer::start("Pulse view");
            let view = pipeline.pulse_view(&spec, sort_spec, 0).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                render::pulse(&view);
            }
        }

        Command::Preview { json } => {
            let _t = utils::Timer::start("Stock preview");
            let pipeline = Pipeline::new(config.clone())?;
            let view = pipeline.preview_view().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                render::preview(&view);
            }
        }

        Command::Ask { query } => {
            let query = query.join(" ");
            let pipeline = Pipeline::new(config.clone())?;
            let engine = AlliyaEngine::new(pipeline.source(), &config.chat)?;

            let hints = chat::suggestions(&config.chat.suggestions, &query);
            let reply = engine.ask(&query).await;
            render::chat(&reply, &hints);
        }
    }

    Ok(())
}

/// Fold repeated `--sort` flags through the toggle: the first occurrence of
/// a key sorts ascending, repeating it flips to descending.
fn build_sort(keys: &[String]) -> Result<Option<SortSpec>> {
    let mut spec: Option<SortSpec> = None;
    for raw in keys {
        let key: SortKey = raw.parse().map_err(|e: String| anyhow!(e))?;
        spec = Some(SortSpec::toggle(spec, key));
    }
    Ok(spec)
}
