//! Command-line front end for the Hotel Explorer.
//!
//! Drives the explore page against a running experiences API and keeps
//! favorites, the rating filter, and the theme in a storage directory so
//! they survive between invocations.
//!
//! # Usage
//!
//! ```bash
//! # List everything, then narrow it down
//! explorer list
//! explorer list --search spa --rating 4.5
//!
//! # Manage favorites
//! explorer favorite 101
//! explorer unfavorite 101
//!
//! # Show or change the theme
//! explorer theme
//! explorer theme purple
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use explorer_client::{CardSections, CatalogClient, ExplorePage};
use explorer_store::{AppContext, FileStorage};
use explorer_types::{ExperienceId, Theme};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "explorer")]
#[command(version)]
#[command(about = "Browse hotel amenities and nearby venues")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Base URL of the experiences API
    #[arg(long, global = true, env = "EXPLORER_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    /// Directory holding persisted preferences
    #[arg(long, global = true, env = "EXPLORER_STORAGE_DIR", default_value = ".explorer")]
    storage_dir: PathBuf,

    /// Route the page is rendered at; picks the default theme
    #[arg(long, global = true, default_value = "/explore")]
    route: String,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch the catalog and print both sections
    List {
        /// Case-insensitive text filter on name and description
        #[arg(short, long, default_value = "")]
        search: String,

        /// Minimum rating for nearby venues: 4, 4.5 or 5 (empty clears it)
        #[arg(short, long)]
        rating: Option<String>,
    },

    /// Mark an experience as a favorite
    Favorite {
        /// Experience id
        id: i64,
    },

    /// Remove an experience from favorites
    Unfavorite {
        /// Experience id
        id: i64,
    },

    /// Show the current theme, or switch to another one
    Theme {
        /// light, dark, blue, green or purple
        name: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let storage = FileStorage::open(&cli.storage_dir)
        .with_context(|| format!("opening storage at {}", cli.storage_dir.display()))?;
    let mut page = ExplorePage::new(AppContext::provision(&storage, &cli.route));

    match cli.command {
        Command::List { search, rating } => {
            if let Some(rating) = rating {
                page.set_rating_option(&rating)?;
            }
            page.set_search(search);
            page.load(&CatalogClient::new(cli.api_url)).await;
            if let Some(notice) = page.notice() {
                eprintln!("{notice}");
            }
            print_sections(&page.cards()?);
        }
        Command::Favorite { id } => {
            let id = ExperienceId(id);
            page.context_mut().experiences_mut()?.add_favorite(id);
            info!(%id, "Favorite added");
            println!("Added {id} to favorites");
        }
        Command::Unfavorite { id } => {
            let id = ExperienceId(id);
            page.context_mut().experiences_mut()?.remove_favorite(id);
            info!(%id, "Favorite removed");
            println!("Removed {id} from favorites");
        }
        Command::Theme { name } => {
            let theme_ctx = page.context_mut().theme_mut()?;
            if let Some(name) = name {
                let theme: Theme = name.parse()?;
                theme_ctx.set_theme(theme);
            }
            let palette = theme_ctx.palette();
            println!("{} ({})", theme_ctx.theme().label(), theme_ctx.theme());
            println!("  background: {}", palette.background);
            println!("  text:       {}", palette.text);
            println!("  primary:    {}", palette.primary);
            println!("  secondary:  {}", palette.secondary);
        }
    }

    Ok(())
}

fn print_sections(sections: &CardSections) {
    println!("Hotel Amenities");
    if sections.internal.is_empty() {
        println!("  (none)");
    }
    for card in &sections.internal {
        let heart = if card.favorite { '♥' } else { '♡' };
        println!("  {heart} [{}] {}  {}", card.id, card.name, card.description);
    }

    println!();
    println!("Nearby Experiences");
    if sections.external.is_empty() {
        println!("  (none)");
    }
    for card in &sections.external {
        let heart = if card.favorite { '♥' } else { '♡' };
        let stars = card.stars.map(|s| s.render()).unwrap_or_default();
        let distance = card.distance.as_deref().unwrap_or("");
        println!("  {heart} [{}] {}  {stars}  {distance}", card.id, card.name);
    }
}
