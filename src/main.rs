use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use newsfeed::config::Config;
use newsfeed::news::{FeedOutcome, NewsClient};

/// Get the default config file path (~/.config/newsfeed/config.toml)
fn get_config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("newsfeed")
        .join("config.toml"))
}

#[derive(Parser, Debug)]
#[command(
    name = "newsfeed",
    about = "Fetch a Guardian-style news search and print its articles"
)]
struct Args {
    /// Search URL (falls back to `endpoint` in the config file)
    url: Option<String>,

    /// Config file (default: ~/.config/newsfeed/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print articles as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config_path = match args.config {
        Some(path) => path,
        None => get_config_path()?,
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let url = args
        .url
        .or_else(|| config.endpoint.clone())
        .context("No URL given and no `endpoint` set in the config file")?;

    let client = NewsClient::new(&config.http_settings())
        .context("Failed to build HTTP client")?
        .with_span(tracing::info_span!("newsfeed"));

    let items = match client.fetch_news(&url).await {
        FeedOutcome::Complete(items) => items,
        FeedOutcome::Partial { items, error } => {
            eprintln!(
                "Warning: response truncated after {} articles ({})",
                items.len(),
                error
            );
            items
        }
        FeedOutcome::Unavailable(e) => anyhow::bail!("No news available: {}", e),
    };

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&items).context("Failed to serialize articles")?
        );
    } else if items.is_empty() {
        println!("No articles found.");
    } else {
        for item in &items {
            println!("{item}");
        }
    }

    Ok(())
}
