//! State transitions: reconciling with the catalog, rating, and reset.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::state::{KnowledgeLevel, ProgressStore, ReviewState};
use crate::catalog::Card;
use crate::error::Result;

/// Human-readable outcome of a rating, for transient notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    pub level_name: &'static str,
    pub days_until_next_review: i64,
    /// "tomorrow" for a one-day delay, otherwise "in N days"
    pub next_review_description: String,
}

impl RatingSummary {
    fn for_level(level: KnowledgeLevel) -> Self {
        let days = level.review_interval_days();
        let next_review_description = if days == 1 {
            "tomorrow".to_string()
        } else {
            format!("in {} days", days)
        };
        Self {
            level_name: level.name(),
            days_until_next_review: days,
            next_review_description,
        }
    }
}

/// Badge shown on a card: its level and whether it is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardIndicator {
    pub level: KnowledgeLevel,
    pub due: bool,
}

impl fmt::Display for CardIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.level, KnowledgeLevel::MAX)?;
        if self.due {
            write!(f, " REVIEW")?;
        }
        Ok(())
    }
}

/// Merge persisted progress with the current catalog.
///
/// Cards missing from `persisted` get a fresh state due at `now`. Entries for
/// cards no longer in the catalog are kept.
pub fn reconcile(cards: &[Card], persisted: ProgressStore, now: DateTime<Utc>) -> ProgressStore {
    let mut store = persisted;
    let mut created = 0usize;
    for card in cards {
        if !store.contains(&card.name) {
            store.insert(card.name.clone(), ReviewState::new(now));
            created += 1;
        }
    }
    if created > 0 {
        tracing::debug!(created, total = store.len(), "Created review state for new cards");
    }
    store
}

/// Record a rating for `card_name`, creating its state if absent.
///
/// Fails with `InvalidRating` unless `level` is within 0..=5.
pub fn rate(store: &mut ProgressStore, card_name: &str, level: i64, now: DateTime<Utc>) -> Result<RatingSummary> {
    let level = KnowledgeLevel::new(level)?;
    Ok(rate_level(store, card_name, level, now))
}

/// Record an already-validated rating.
pub fn rate_level(
    store: &mut ProgressStore,
    card_name: &str,
    level: KnowledgeLevel,
    now: DateTime<Utc>,
) -> RatingSummary {
    let state = ReviewState::reviewed(level, now);
    tracing::info!(
        card = card_name,
        level = level.value(),
        next_review = %state.next_review_date,
        "Recorded rating"
    );
    store.insert(card_name, state);
    RatingSummary::for_level(level)
}

/// An empty progress store.
pub fn reset() -> ProgressStore {
    ProgressStore::new()
}

/// Level badge for a card, or None when the card has no state.
pub fn indicator(store: &ProgressStore, card_name: &str, now: DateTime<Utc>) -> Option<CardIndicator> {
    store.get(card_name).map(|state| CardIndicator {
        level: state.knowledge_level,
        due: state.is_due(now),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed_cards;
    use crate::error::MindcardsError;
    use chrono::{TimeDelta, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn three_cards() -> Vec<Card> {
        seed_cards().into_iter().take(3).collect()
    }

    #[test]
    fn test_reconcile_fresh_catalog() {
        let cards = three_cards();
        let store = reconcile(&cards, ProgressStore::new(), t0());

        assert_eq!(store.len(), 3);
        for card in &cards {
            let state = store.get(&card.name).unwrap();
            assert_eq!(state.knowledge_level.value(), 0);
            assert_eq!(state.last_reviewed, None);
            assert_eq!(state.next_review_date, t0());
        }
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let cards = three_cards();
        let once = reconcile(&cards, ProgressStore::new(), t0());
        let twice = reconcile(&cards, once.clone(), t0() + TimeDelta::hours(5));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_reconcile_keeps_existing_and_stale_entries() {
        let cards = three_cards();
        let mut persisted = ProgressStore::new();
        rate(&mut persisted, "YAGNI", 4, t0()).unwrap();
        rate(&mut persisted, "Removed Card", 2, t0()).unwrap();

        let store = reconcile(&cards, persisted, t0() + TimeDelta::days(1));

        assert_eq!(store.len(), 4);
        assert_eq!(store.get("YAGNI").unwrap().knowledge_level.value(), 4);
        assert!(store.contains("Removed Card"));
        assert_eq!(
            store.get("Separation of Concerns").unwrap().next_review_date,
            t0() + TimeDelta::days(1)
        );
    }

    #[test]
    fn test_rate_interval_for_every_level() {
        for level in 0..=5i64 {
            let mut store = ProgressStore::new();
            rate(&mut store, "YAGNI", level, t0()).unwrap();
            let state = store.get("YAGNI").unwrap();
            assert_eq!(state.next_review_date, t0() + TimeDelta::days(1 << level));
            assert_eq!(state.last_reviewed, Some(t0()));
            assert_eq!(state.knowledge_level.value() as i64, level);
        }
    }

    #[test]
    fn test_rate_yagni_scenarios() {
        let mut store = reconcile(&three_cards(), ProgressStore::new(), t0());

        rate(&mut store, "YAGNI", 0, t0()).unwrap();
        assert_eq!(store.get("YAGNI").unwrap().next_review_date, t0() + TimeDelta::days(1));

        rate(&mut store, "YAGNI", 3, t0()).unwrap();
        assert_eq!(store.get("YAGNI").unwrap().next_review_date, t0() + TimeDelta::days(8));
    }

    #[test]
    fn test_rate_rejects_invalid_level() {
        let mut store = ProgressStore::new();
        assert!(matches!(rate(&mut store, "YAGNI", 6, t0()), Err(MindcardsError::InvalidRating(_))));
        assert!(matches!(rate(&mut store, "YAGNI", -1, t0()), Err(MindcardsError::InvalidRating(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_rate_creates_missing_entry() {
        let mut store = ProgressStore::new();
        rate(&mut store, "Unknown", 2, t0()).unwrap();
        assert!(store.contains("Unknown"));
    }

    #[test]
    fn test_rating_summary() {
        let mut store = ProgressStore::new();
        let summary = rate(&mut store, "YAGNI", 0, t0()).unwrap();
        assert_eq!(summary.level_name, "Not at all");
        assert_eq!(summary.next_review_description, "tomorrow");

        let summary = rate(&mut store, "YAGNI", 5, t0()).unwrap();
        assert_eq!(summary.level_name, "Mastered");
        assert_eq!(summary.days_until_next_review, 32);
        assert_eq!(summary.next_review_description, "in 32 days");
    }

    #[test]
    fn test_reset_then_reconcile_matches_fresh() {
        let cards = three_cards();
        let mut store = reconcile(&cards, ProgressStore::new(), t0());
        rate(&mut store, "YAGNI", 5, t0()).unwrap();

        let cleared = reset();
        assert!(cleared.is_empty());
        assert_eq!(
            reconcile(&cards, cleared, t0()),
            reconcile(&cards, ProgressStore::new(), t0())
        );
    }

    #[test]
    fn test_indicator() {
        let mut store = reconcile(&three_cards(), ProgressStore::new(), t0());
        let fresh = indicator(&store, "YAGNI", t0()).unwrap();
        assert_eq!(fresh.to_string(), "0/5 REVIEW");

        rate(&mut store, "YAGNI", 2, t0()).unwrap();
        let rated = indicator(&store, "YAGNI", t0()).unwrap();
        assert!(!rated.due);
        assert_eq!(rated.to_string(), "2/5");

        assert!(indicator(&store, "Nope", t0()).is_none());
    }
}
