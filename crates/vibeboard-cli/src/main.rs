mod pipeline;
mod render;

use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vibeboard_core::AppConfig;
use vibeboard_summary::SummarySession;

use crate::render::{render_dashboard, SummaryCard};

#[derive(Debug, Parser)]
#[command(name = "vibeboard")]
#[command(about = "Personal activity dashboard built from social posts")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render the dashboard from a CSV export of posts
    Report {
        /// Path to the CSV file (header row, then content and timestamp)
        #[arg(long)]
        csv: PathBuf,

        /// Skip the generated summary
        #[arg(long)]
        no_summary: bool,
    },
    /// Fetch recent posts from event sources and render the dashboard.
    ///
    /// Sources are HTTP(S) URLs or local files holding newline-delimited
    /// events. Live relay endpoints (ws://, wss://) are skipped, so the
    /// default VIBEBOARD_SOURCES relays yield an empty dashboard unless
    /// --source is given.
    Fetch {
        /// npub or hex public key; overrides VIBEBOARD_IDENTITY
        #[arg(long)]
        identity: Option<String>,

        /// Event dump URL or file, repeatable; overrides VIBEBOARD_SOURCES.
        /// ws:// and wss:// relays are skipped
        #[arg(long = "source")]
        sources: Vec<String>,

        /// Recency window in days; overrides VIBEBOARD_RECENCY_DAYS
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        days: Option<u32>,

        /// Skip the generated summary
        #[arg(long)]
        no_summary: bool,

        /// Republish the summary as the VRChat profile bio
        #[arg(long)]
        publish: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = vibeboard_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match command {
        Commands::Report { csv, no_summary } => run_report(&config, &csv, no_summary).await,
        Commands::Fetch {
            identity,
            sources,
            days,
            no_summary,
            publish,
        } => {
            let identity = identity
                .or_else(|| config.identity.clone())
                .ok_or_else(|| {
                    anyhow::anyhow!("no identity: pass --identity or set VIBEBOARD_IDENTITY")
                })?;
            let sources = if sources.is_empty() {
                config.sources.clone()
            } else {
                sources
            };
            let days = days.unwrap_or(config.recency_days);
            run_fetch(&config, &identity, &sources, days, no_summary, publish).await
        }
    }
}

async fn run_report(config: &AppConfig, csv: &Path, no_summary: bool) -> anyhow::Result<()> {
    let posts = vibeboard_feed::read_posts_csv(csv).await?;
    tracing::info!(path = %csv.display(), count = posts.len(), "parsed CSV export");

    let session = SummarySession::new(
        pipeline::build_summarizer(config, no_summary)?,
        config.author_name.clone(),
    );
    let dashboard =
        pipeline::assemble(posts, &config.author_name, config.display_offset, &session).await;
    println!("{}", render_dashboard(&dashboard));
    Ok(())
}

async fn run_fetch(
    config: &AppConfig,
    identity: &str,
    sources: &[String],
    days: u32,
    no_summary: bool,
    publish: bool,
) -> anyhow::Result<()> {
    if !pipeline::has_readable_source(sources) {
        tracing::warn!(
            ?sources,
            "no readable event source: live relays are skipped; pass --source <url|file>"
        );
    }
    let source = pipeline::feed_source(config)?;
    let posts = pipeline::ingest_feed(&source, identity, sources, days).await?;
    let avatar_url = pipeline::avatar_url(&source, identity, sources).await;

    let session = SummarySession::new(
        pipeline::build_summarizer(config, no_summary)?,
        config.author_name.clone(),
    );
    let mut dashboard =
        pipeline::assemble(posts, &config.author_name, config.display_offset, &session).await;
    dashboard.avatar_url = avatar_url;
    println!("{}", render_dashboard(&dashboard));

    if publish {
        match &dashboard.card {
            SummaryCard::Ready(summary) => pipeline::publish_summary(config, summary).await,
            _ => tracing::warn!("--publish given but no summary is available"),
        }
    }
    Ok(())
}
