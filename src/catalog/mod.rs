//! Card catalog - the seed deck plus user-added cards.
//!
//! The catalog owns card identity. Card names are the join key used by the
//! review scheduler, so the catalog refuses to hold two cards with the same name.

mod export;
mod markup;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{MindcardsError, Result};

pub use export::ExportFormat;
pub use markup::{Span, SpanStyle, render_explanation};

/// Tag filter value that matches every card.
pub const ALL_TAGS: &str = "all";

/// A named concept with an explanation and tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Unique identifier
    pub name: String,
    /// Explanation text, may contain `**bold**`, `_em_` and `` `code` `` markup
    pub explanation: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Card {
    pub fn new(name: impl Into<String>, explanation: impl Into<String>, tags: &[&str]) -> Self {
        Self {
            name: name.into(),
            explanation: explanation.into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Build a card from form-style input where tags are a comma-separated list.
    ///
    /// All three fields are required. Tags are trimmed and empty pieces dropped.
    pub fn from_input(name: &str, explanation: &str, tags_csv: &str) -> Result<Self> {
        let name = name.trim();
        let explanation = explanation.trim();
        if name.is_empty() {
            return Err(MindcardsError::InvalidCard("name is required".to_string()));
        }
        if explanation.is_empty() {
            return Err(MindcardsError::InvalidCard("explanation is required".to_string()));
        }

        let tags: Vec<String> = tags_csv
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect();
        if tags.is_empty() {
            return Err(MindcardsError::InvalidCard("at least one tag is required".to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            explanation: explanation.to_string(),
            tags,
        })
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// The built-in deck every catalog starts with.
pub fn seed_cards() -> Vec<Card> {
    vec![
        Card::new(
            "YAGNI",
            "You Aren't Gonna Need It – don't implement something unless it's necessary.",
            &["architecture", "planning"],
        ),
        Card::new(
            "Separation of Concerns",
            "Divide software into distinct sections, each addressing a _separate concern_.",
            &["architecture"],
        ),
        Card::new(
            "Single Responsibility Principle",
            "A module or class should have one, and only one, `reason to change`.",
            &["backend", "architecture"],
        ),
        Card::new(
            "Cognitive Load",
            "Minimize the **mental effort** required to understand code or UI.",
            &["frontend", "ux"],
        ),
    ]
}

/// Ordered card collection: seed deck first, then user cards in insertion order.
#[derive(Debug, Clone)]
pub struct Catalog {
    cards: Vec<Card>,
}

impl Catalog {
    /// Build a catalog from the seed deck and previously saved user cards.
    ///
    /// User cards whose name collides with an earlier card are skipped.
    pub fn new(user_cards: Vec<Card>) -> Self {
        let mut catalog = Self::seed_only();
        for card in user_cards {
            if catalog.get(&card.name).is_some() {
                tracing::warn!(card = %card.name, "Skipping saved card with duplicate name");
                continue;
            }
            catalog.cards.push(card);
        }
        catalog
    }

    /// Catalog holding only the built-in deck.
    pub fn seed_only() -> Self {
        Self { cards: seed_cards() }
    }

    /// Append a user card. Fails if the name is already taken.
    pub fn add_card(&mut self, card: Card) -> Result<()> {
        if self.get(&card.name).is_some() {
            return Err(MindcardsError::DuplicateCard(card.name));
        }
        tracing::debug!(card = %card.name, tags = ?card.tags, "Adding card to catalog");
        self.cards.push(card);
        Ok(())
    }

    /// All cards in catalog order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, name: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Sorted, de-duplicated union of every card's tags.
    pub fn tags(&self) -> Vec<String> {
        let tags: BTreeSet<&str> = self
            .cards
            .iter()
            .flat_map(|c| c.tags.iter().map(String::as_str))
            .collect();
        tags.into_iter().map(String::from).collect()
    }

    /// Cards carrying `tag`, in catalog order. `None` or `"all"` selects everything.
    pub fn filtered(&self, tag: Option<&str>) -> Vec<&Card> {
        match tag {
            None | Some(ALL_TAGS) => self.cards.iter().collect(),
            Some(tag) => self.cards.iter().filter(|c| c.has_tag(tag)).collect(),
        }
    }

    /// Render the whole catalog in the given export format.
    pub fn export(&self, format: ExportFormat) -> Result<String> {
        format.render(&self.cards)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seed_only()
    }
}
