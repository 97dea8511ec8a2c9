//! Study mode: stepping through the cards that are due for review.

use chrono::{DateTime, Utc};
use rand::seq::IndexedRandom;

use crate::catalog::Card;
use crate::scheduler::{ProgressStore, due_cards};

/// A pass over the due set, starting at the first due card in catalog order.
#[derive(Debug, Clone)]
pub struct StudySession {
    queue: Vec<Card>,
    index: usize,
}

impl StudySession {
    /// Start a session over `cards` (typically the tag-filtered catalog).
    pub fn start<'a, I>(store: &ProgressStore, cards: I, now: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = &'a Card>,
    {
        let queue: Vec<Card> = due_cards(store, cards, now).into_iter().cloned().collect();
        tracing::debug!(due = queue.len(), "Starting study session");
        Self { queue, index: 0 }
    }

    /// Message announcing the session, or that there is nothing to study.
    pub fn activation_message(&self) -> String {
        if self.queue.is_empty() {
            "No cards due for review!".to_string()
        } else {
            format!("Study mode activated: {} cards due for review", self.queue.len())
        }
    }

    pub fn is_finished(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn current(&self) -> Option<&Card> {
        self.queue.get(self.index)
    }

    /// Advance to the next card, wrapping to the first.
    pub fn next(&mut self) -> Option<&Card> {
        if self.queue.is_empty() {
            return None;
        }
        self.index = if self.index + 1 >= self.queue.len() { 0 } else { self.index + 1 };
        self.current()
    }

    /// Step back to the previous card, wrapping to the last.
    pub fn prev(&mut self) -> Option<&Card> {
        if self.queue.is_empty() {
            return None;
        }
        self.index = match self.index {
            0 => self.queue.len() - 1,
            i => i - 1,
        };
        self.current()
    }

    /// Jump to a random card other than the current one.
    ///
    /// With fewer than two cards in the queue the current card stays.
    pub fn shuffle(&mut self) -> Option<&Card> {
        let others: Vec<usize> = (0..self.queue.len()).filter(|&i| i != self.index).collect();
        if let Some(&index) = others.choose(&mut rand::rng()) {
            self.index = index;
        }
        self.current()
    }

    /// Drop the current card from the queue once it has been rated.
    ///
    /// The following card becomes current, wrapping to the first.
    pub fn mark_reviewed(&mut self) -> Option<&Card> {
        if self.queue.is_empty() {
            return None;
        }
        self.queue.remove(self.index);
        if self.index >= self.queue.len() {
            self.index = 0;
        }
        self.current()
    }

    /// One-based position and queue length for a "Card i of n" counter.
    pub fn position(&self) -> Option<(usize, usize)> {
        self.current().map(|_| (self.index + 1, self.queue.len()))
    }
}
