//! Loading and saving progress and user cards.
//!
//! Loading is tolerant: a document that fails to parse is treated as empty,
//! and individual malformed progress entries are dropped so the scheduler
//! recreates them on reconcile.

use serde_json::Value;

use super::traits::{PROGRESS_KEY, Storage, USER_CARDS_KEY};
use crate::catalog::Card;
use crate::error::Result;
use crate::scheduler::{ProgressStore, ReviewState};

/// Load the persisted progress store. Missing or unreadable documents yield an empty store.
pub fn load_progress(storage: &dyn Storage) -> Result<ProgressStore> {
    let mut store = ProgressStore::new();
    let Some(raw) = storage.read(PROGRESS_KEY)? else {
        return Ok(store);
    };

    let entries = match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Object(entries)) => entries,
        Ok(other) => {
            tracing::warn!(found = json_kind(&other), "Progress document is not an object, starting fresh");
            return Ok(store);
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to parse progress document, starting fresh");
            return Ok(store);
        }
    };

    for (name, value) in entries {
        match serde_json::from_value::<ReviewState>(value) {
            Ok(state) => store.insert(name, state),
            Err(e) => tracing::warn!(card = %name, error = %e, "Dropping malformed review state"),
        }
    }

    tracing::debug!(entries = store.len(), "Loaded progress");
    Ok(store)
}

pub fn save_progress(storage: &dyn Storage, store: &ProgressStore) -> Result<()> {
    storage.write(PROGRESS_KEY, &serde_json::to_string(store)?)
}

/// Remove persisted progress entirely.
pub fn clear_progress(storage: &dyn Storage) -> Result<()> {
    storage.remove(PROGRESS_KEY)
}

/// Load user-added cards. Malformed cards are skipped.
pub fn load_user_cards(storage: &dyn Storage) -> Result<Vec<Card>> {
    let Some(raw) = storage.read(USER_CARDS_KEY)? else {
        return Ok(Vec::new());
    };

    let items = match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Array(items)) => items,
        Ok(other) => {
            tracing::warn!(found = json_kind(&other), "User card document is not an array, ignoring");
            return Ok(Vec::new());
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to parse user card document, ignoring");
            return Ok(Vec::new());
        }
    };

    let cards = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<Card>(item) {
            Ok(card) => Some(card),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed user card");
                None
            }
        })
        .collect();
    Ok(cards)
}

/// Append one card to the stored user card array.
///
/// Existing entries are kept as stored, including ones `load_user_cards`
/// skips, so adding a card never loses earlier data.
pub fn append_user_card(storage: &dyn Storage, card: &Card) -> Result<()> {
    let mut items = match storage.read(USER_CARDS_KEY)? {
        None => Vec::new(),
        Some(raw) => match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(items)) => items,
            Ok(other) => {
                tracing::warn!(found = json_kind(&other), "User card document is not an array, replacing it");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to parse user card document, replacing it");
                Vec::new()
            }
        },
    };
    items.push(serde_json::to_value(card)?);
    storage.write(USER_CARDS_KEY, &serde_json::to_string(&items)?)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
