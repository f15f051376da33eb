#[allow(unused_imports)]
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "patternbook")]
#[command(about = "Browse a catalog of distilled system design decisions", long_about = None)]
#[command(version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Serve the catalog as a local web app.
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
        /// Port to listen on
        #[arg(short, long, default_value_t = 7340)]
        port: u16,
        /// Assets directory (stylesheet, fundamentals sheet, documents)
        #[arg(long)]
        assets: Option<PathBuf>,
        /// Preference state directory
        #[arg(long)]
        state_dir: Option<PathBuf>,
        /// Fetch the catalog from this URL instead of the embedded copy
        #[arg(long)]
        catalog_url: Option<String>,
    },

    /// List catalog patterns, optionally filtered.
    List {
        /// Restrict to a category
        #[arg(short, long)]
        category: Option<String>,
        /// Favorites only
        #[arg(long)]
        favorites: bool,
        /// Production-documented patterns only
        #[arg(long)]
        production: bool,
        /// Substring search over title, description, tags, and category
        #[arg(short, long)]
        search: Option<String>,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one pattern in full.
    Show {
        id: String,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Search the catalog and print matches with highlighted spans.
    Search { query: String },

    /// Print the learning roadmap with completion state.
    Roadmap {
        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Toggle a pattern in the favorites set.
    Favorite { id: String },

    /// Toggle a roadmap module's completed state.
    Complete { id: String },

    /// Get or set the personal note on a pattern.
    Note {
        id: String,
        /// New note text; an empty string clears the note
        #[arg(long)]
        set: Option<String>,
    },

    /// Print recently viewed patterns, most recent first.
    Recent,

    /// Print catalog summary statistics.
    Stats {
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
}
