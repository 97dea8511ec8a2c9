//! Aggregate learning statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::select::due_cards;
use super::state::{KnowledgeLevel, ProgressStore};
use crate::catalog::Card;

/// Progress summary over the current catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_cards: usize,
    /// Catalog cards rated at least once
    pub reviewed_count: usize,
    /// Reviewed cards per knowledge level
    pub level_histogram: [usize; KnowledgeLevel::COUNT],
    pub due_count: usize,
    /// Mean level of reviewed cards, rounded to one decimal
    pub average_level: f64,
}

impl Stats {
    /// Share of the whole catalog sitting at `level`, as a percentage.
    pub fn level_percentage(&self, level: KnowledgeLevel) -> f64 {
        if self.total_cards == 0 {
            return 0.0;
        }
        self.level_histogram[level.index()] as f64 / self.total_cards as f64 * 100.0
    }

    /// Average level formatted the way it is displayed ("2.7").
    pub fn average_display(&self) -> String {
        format!("{:.1}", self.average_level)
    }
}

/// Compute statistics for `cards` at time `now`.
pub fn stats(store: &ProgressStore, cards: &[Card], now: DateTime<Utc>) -> Stats {
    let mut level_histogram = [0usize; KnowledgeLevel::COUNT];
    let mut reviewed_count = 0usize;

    for card in cards {
        if let Some(state) = store.get(&card.name).filter(|s| s.is_reviewed()) {
            level_histogram[state.knowledge_level.index()] += 1;
            reviewed_count += 1;
        }
    }

    let average_level = if reviewed_count == 0 {
        0.0
    } else {
        let total: usize = level_histogram
            .iter()
            .enumerate()
            .map(|(level, count)| level * count)
            .sum();
        round_one_decimal(total as f64 / reviewed_count as f64)
    };

    Stats {
        total_cards: cards.len(),
        reviewed_count,
        level_histogram,
        due_count: due_cards(store, cards, now).len(),
        average_level,
    }
}

/// Round to one decimal from the exact binary value, exact ties going up.
///
/// 41 / 20 is stored just below 2.05, so it rounds to 2.0.
fn round_one_decimal(value: f64) -> f64 {
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 == 1.0 {
        return (value * 10.0).round() / 10.0;
    }
    format!("{value:.1}").parse().unwrap_or(value)
}
