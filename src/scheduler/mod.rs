//! Spaced-repetition review scheduler.
//!
//! This module provides:
//! - **Review state**: per-card knowledge level and next review date, kept in a
//!   `ProgressStore` keyed by card name.
//! - **Rating**: a rating of 0-5 schedules the next review 2^level days out.
//! - **Selection**: which cards are due, in catalog order.
//! - **Statistics**: reviewed counts, level histogram and average level.
//!
//! Every operation is a plain function over a `ProgressStore` and the card list;
//! loading and saving the store is left to the caller.
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use mindcards::catalog::Catalog;
//! use mindcards::scheduler::{ProgressStore, due_cards, rate, reconcile};
//!
//! let catalog = Catalog::seed_only();
//! let now = Utc::now();
//! let mut store = reconcile(catalog.cards(), ProgressStore::new(), now);
//! assert_eq!(due_cards(&store, catalog.cards(), now).len(), catalog.len());
//!
//! let summary = rate(&mut store, "YAGNI", 3, now).unwrap();
//! assert_eq!(summary.next_review_description, "in 8 days");
//! ```

mod review;
mod select;
mod state;
mod stats;

pub use review::{CardIndicator, RatingSummary, indicator, rate, rate_level, reconcile, reset};
pub use select::due_cards;
pub use state::{KnowledgeLevel, LEVEL_NAMES, ProgressStore, ReviewState};
pub use stats::{Stats, stats};
