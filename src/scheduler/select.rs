//! Due-card selection.

use chrono::{DateTime, Utc};

use super::state::ProgressStore;
use crate::catalog::Card;

/// Cards whose review is due at `now`, in catalog order.
///
/// A card with no state in `store` is never due.
pub fn due_cards<'a, I>(store: &ProgressStore, cards: I, now: DateTime<Utc>) -> Vec<&'a Card>
where
    I: IntoIterator<Item = &'a Card>,
{
    cards
        .into_iter()
        .filter(|card| store.get(&card.name).is_some_and(|state| state.is_due(now)))
        .collect()
}
