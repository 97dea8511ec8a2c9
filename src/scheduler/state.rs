//! Review state types: knowledge levels, per-card state, and the progress store.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{MindcardsError, Result};

/// Display labels indexed by knowledge level.
pub const LEVEL_NAMES: [&str; 6] = ["Not at all", "Barely", "Somewhat", "Well", "Very well", "Mastered"];

/// Self-rated mastery of a card, always within 0..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct KnowledgeLevel(u8);

impl KnowledgeLevel {
    pub const MIN: KnowledgeLevel = KnowledgeLevel(0);
    pub const MAX: KnowledgeLevel = KnowledgeLevel(5);
    /// Number of distinct levels.
    pub const COUNT: usize = 6;

    /// Validate a raw rating. Out-of-range values are rejected, never clamped.
    pub fn new(level: i64) -> Result<Self> {
        match u8::try_from(level) {
            Ok(v) if v <= Self::MAX.0 => Ok(Self(v)),
            _ => Err(MindcardsError::InvalidRating(level.to_string())),
        }
    }

    /// Every level from 0 to 5.
    pub fn all() -> impl Iterator<Item = KnowledgeLevel> {
        (Self::MIN.0..=Self::MAX.0).map(KnowledgeLevel)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn name(self) -> &'static str {
        LEVEL_NAMES[self.index()]
    }

    /// Days until the next review: 2^level (level 0 is still one day).
    pub fn review_interval_days(self) -> i64 {
        1i64 << self.0
    }

    pub fn review_interval(self) -> TimeDelta {
        TimeDelta::days(self.review_interval_days())
    }
}

impl TryFrom<i64> for KnowledgeLevel {
    type Error = MindcardsError;

    fn try_from(level: i64) -> Result<Self> {
        Self::new(level)
    }
}

impl From<KnowledgeLevel> for u8 {
    fn from(level: KnowledgeLevel) -> u8 {
        level.0
    }
}

impl FromStr for KnowledgeLevel {
    type Err = MindcardsError;

    fn from_str(s: &str) -> Result<Self> {
        let level: i64 = s
            .trim()
            .parse()
            .map_err(|_| MindcardsError::InvalidRating(s.to_string()))?;
        Self::new(level)
    }
}

impl fmt::Display for KnowledgeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Scheduling state for a single card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewState {
    /// None until the card is first rated
    #[serde(default)]
    pub last_reviewed: Option<DateTime<Utc>>,
    pub knowledge_level: KnowledgeLevel,
    pub next_review_date: DateTime<Utc>,
}

impl ReviewState {
    /// Fresh state for a card never rated: level 0, due at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            last_reviewed: None,
            knowledge_level: KnowledgeLevel::MIN,
            next_review_date: now,
        }
    }

    /// State after rating a card at `level` at time `now`.
    pub fn reviewed(level: KnowledgeLevel, now: DateTime<Utc>) -> Self {
        Self {
            last_reviewed: Some(now),
            knowledge_level: level,
            next_review_date: now
                .checked_add_signed(level.review_interval())
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    pub fn is_reviewed(&self) -> bool {
        self.last_reviewed.is_some()
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review_date <= now
    }
}

/// Per-card review state keyed by card name.
///
/// Serializes as a plain JSON object `name -> ReviewState`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressStore {
    entries: BTreeMap<String, ReviewState>,
}

impl ProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&ReviewState> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Insert or replace the state for `name`.
    pub fn insert(&mut self, name: impl Into<String>, state: ReviewState) {
        self.entries.insert(name.into(), state);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
