//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - list/show/tags: browse the deck
//! - due/study/rate: review cards
//! - stats/reset: learning progress
//! - add/export: manage the deck

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Mindcards - mental model flashcards with spaced repetition
#[derive(Parser, Debug)]
#[command(name = "mindcards")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List cards with their knowledge level
    List {
        /// Only cards with this tag ("all" for every card)
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// Show a card's explanation
    Show {
        /// Card name
        name: String,
    },

    /// List cards due for review
    Due {
        /// Only cards with this tag
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// Step through due cards and rate them
    Study {
        /// Only cards with this tag
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// Rate how well you know a card (0-5)
    Rate {
        /// Card name
        name: String,

        /// Knowledge level: 0 Not at all, 1 Barely, 2 Somewhat, 3 Well, 4 Very well, 5 Mastered
        #[arg(allow_hyphen_values = true)]
        level: String,
    },

    /// Show learning progress statistics
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Reset all learning progress
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Add a new card
    Add {
        /// Card name
        name: String,

        /// Explanation (supports **bold**, _em_ and `code`)
        explanation: String,

        /// Comma-separated tags
        #[arg(short, long)]
        tags: String,
    },

    /// List all tags
    Tags,

    /// Export the deck
    Export {
        /// Output format (json, markdown)
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Output file (defaults to mental-models.json / mental-models.md)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
