//! AEM Prep Launcher - GUI Application
//!
//! Run with: cargo run --bin aem-prep-launcher [-- --url "app://aem-prep/intro?slide=4"]

use aem_prep::content::Deck;
use aem_prep::gui::PrepApp;
use aem_prep::presentation::QueryLocation;
use anyhow::{Context, Result};
use clap::Parser;
use iced::application;
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Start location; its `slide` parameter picks the first slide
    #[arg(long)]
    url: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging
    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let location = match args.url.as_deref().map(QueryLocation::parse) {
        Some(Ok(location)) => location,
        Some(Err(e)) => {
            warn!("⚠️ Ignoring start URL: {}", e);
            QueryLocation::default()
        }
        None => QueryLocation::default(),
    };

    let deck = Arc::new(Deck::builtin().context("Failed to load the slide deck")?);

    application(PrepApp::title, PrepApp::update, PrepApp::view)
        .theme(PrepApp::theme)
        .subscription(PrepApp::subscription)
        .run_with(move || PrepApp::new(deck, location))
        .map_err(|e| anyhow::anyhow!("GUI error: {}", e))
}
