use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};

use magstand::config::Config;
use magstand::page::{self, PageError};

/// Default config path (~/.config/magstand/magstand.toml)
fn default_config_path() -> Option<PathBuf> {
    let home = std::env::var("HOME").ok()?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("magstand")
            .join("magstand.toml"),
    )
}

/// Write the page via a temp file and rename so readers never see a partial page.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let temp_path = path.with_extension(format!("tmp.{}", std::process::id()));

    std::fs::write(&temp_path, content).with_context(|| {
        format!(
            "Failed to write temporary file '{}': check directory permissions or disk space",
            temp_path.display()
        )
    })?;

    std::fs::rename(&temp_path, path).with_context(|| {
        let _ = std::fs::remove_file(&temp_path);
        format!(
            "Failed to rename '{}' to '{}': check permissions",
            temp_path.display(),
            path.display()
        )
    })?;

    Ok(())
}

#[derive(Parser, Debug)]
#[command(
    name = "magstand",
    about = "Render magazine feeds as an accordion of article carousels"
)]
struct Args {
    /// Config file (defaults to ~/.config/magstand/magstand.toml)
    #[arg(long, short, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Feed URL to include; repeat for several. Replaces `magazines` from the config.
    #[arg(long = "feed", short = 'f', value_name = "URL")]
    feeds: Vec<String>,

    /// Write the page here instead of stdout
    #[arg(long, short, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Open the written page in the default browser (requires --output)
    #[arg(long, requires = "output")]
    open: bool,

    /// Locale for dates, e.g. en-US (overrides config and environment)
    #[arg(long, value_name = "TAG")]
    locale: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout can carry the page
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match args.config.clone().or_else(default_config_path) {
        Some(path) => Config::load(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };
    if !args.feeds.is_empty() {
        config.magazines = args.feeds.clone();
    }
    if let Some(locale) = &args.locale {
        config.locale = Some(locale.clone());
    }

    let client = reqwest::Client::builder()
        .user_agent(concat!("magstand/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;

    let page = match page::init(&client, &config).await {
        Ok(page) => page,
        Err(PageError::NoFeedsConfigured) => {
            eprintln!("Error: No feeds configured.");
            eprintln!();
            eprintln!("Add feed URLs to your config file:");
            eprintln!("  magazines = [\"https://example.com/feed.xml\"]");
            eprintln!();
            eprintln!("Or pass them directly:");
            eprintln!("  magstand --feed https://example.com/feed.xml");
            std::process::exit(1);
        }
        Err(e) => return Err(e).context("Failed to build page"),
    };

    let sections = page.state().sections().len();
    let failed = page.state().failed().len();
    if failed > 0 {
        eprintln!("Warning: {} of {} feeds could not be loaded", failed, sections + failed);
    }

    let document = page.to_document(&config.page_title, &config.assets());

    match &args.output {
        Some(path) => {
            write_atomic(path, &document)?;
            tracing::info!(path = %path.display(), sections = sections, "Page written");
            if args.open {
                open::that(path)
                    .with_context(|| format!("Failed to open {}", path.display()))?;
            }
        }
        None => {
            std::io::stdout()
                .lock()
                .write_all(document.as_bytes())
                .context("Failed to write page to stdout")?;
        }
    }

    Ok(())
}
