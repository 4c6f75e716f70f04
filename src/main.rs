use anyhow::{Context, Result};
use clap::Parser;
use secrecy::SecretString;
use std::path::PathBuf;

use marquee::catalog::CatalogClient;
use marquee::config::Config;
use marquee::home::{FeedCache, FeedSnapshot, HomeFeedLoader, LoadGeneration};
use marquee::progress;
use marquee::storage::Database;

/// Get the config directory path (~/.config/marquee/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("marquee"))
}

#[derive(Parser, Debug)]
#[command(name = "marquee", about = "Home-feed browser for TMDB-shaped media catalogs")]
struct Args {
    /// Path to the config file (default: ~/.config/marquee/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Path to the local database (default: ~/.config/marquee/marquee.db)
    #[arg(long, value_name = "FILE")]
    db: Option<PathBuf>,

    /// Bypass the staleness check and refetch everything
    #[arg(long)]
    refresh: bool,

    /// Titles to print per category row
    #[arg(long, default_value_t = 5)]
    limit: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config_dir = get_config_dir()?;
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
    }

    // User-only access: the config file may carry an API key
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(metadata) = std::fs::metadata(&config_dir) {
            let mut perms = metadata.permissions();
            perms.set_mode(0o700);
            if let Err(e) = std::fs::set_permissions(&config_dir, perms) {
                tracing::warn!(
                    path = %config_dir.display(),
                    error = %e,
                    "Failed to set config directory permissions to 0700"
                );
            }
        }
    }

    let config_path = args
        .config
        .unwrap_or_else(|| config_dir.join("config.toml"));
    let config = Config::load(&config_path).context("Failed to load configuration")?;

    let db_path = args.db.unwrap_or_else(|| config_dir.join("marquee.db"));
    let db_path_str = db_path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid UTF-8 in database path"))?;
    let db = Database::open(db_path_str)
        .await
        .context("Failed to open local database")?;

    // Env var takes precedence over the config file
    let api_key = std::env::var("MARQUEE_API_KEY")
        .ok()
        .or_else(|| config.api_key.clone())
        .map(SecretString::from);
    if api_key.is_none() {
        tracing::warn!("No API key configured; the catalog API may reject requests");
    }

    let client = CatalogClient::new(reqwest::Client::new(), config.base_url.clone(), api_key);
    let loader = HomeFeedLoader::new(
        client,
        FeedCache::new(),
        config.categories.clone(),
        config.staleness_window(),
    );

    // The continue-watching path is independent of the category/spotlight
    // path; its failures degrade to an empty row.
    let generation = LoadGeneration::new();
    let ticket = generation.begin();
    let (snapshot, continue_watching) = tokio::join!(
        async {
            if args.refresh {
                loader.reload(&ticket).await
            } else {
                loader.load(&ticket).await
            }
        },
        progress::continue_watching_row(&db, config.continue_watching_visible),
    );

    // Only a category-load failure is user-visible
    let snapshot = snapshot.context("Failed to load home feed")?;

    print_feed(&config, &db, &snapshot, &continue_watching, args.limit).await;

    Ok(())
}

async fn print_feed(
    config: &Config,
    db: &Database,
    snapshot: &FeedSnapshot,
    continue_watching: &[progress::ContinueWatchingCard],
    limit: usize,
) {
    match &snapshot.spotlight {
        Some(item) => {
            let watchlisted = progress::is_watchlisted(db, item.id).await;
            println!("== Spotlight ==");
            print!("{}", item.display_title());
            if let Some(rating) = item.vote_average {
                print!("  ({rating:.1})");
            }
            if let Some(certification) = item.content_rating("US") {
                print!("  [{certification}]");
            }
            if watchlisted {
                print!("  +watchlist");
            }
            println!();
            if let Some(date) = item.release() {
                println!("  {date}");
            }
            if let Some(overview) = &item.overview {
                println!("  {}", overview.chars().take(200).collect::<String>());
            }
            if let Some(image) = item.backdrop_or_poster() {
                tracing::debug!(url = %config.image_url(image), "Spotlight backdrop");
            }
        }
        None => println!("== Spotlight unavailable =="),
    }

    if !continue_watching.is_empty() {
        println!("\n== Continue Watching ==");
        for card in continue_watching {
            println!("  {:>3}%  {}  — {}", card.percent, card.label, card.title);
        }
    }

    for row in &snapshot.categories {
        println!("\n== {} ==", row.title);
        for item in row.items.iter().take(limit) {
            println!("  {}", item.display_title());
        }
    }
}
