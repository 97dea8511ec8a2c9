//! Mindcards - mental model flashcards with spaced-repetition review
//!
//! A seed deck of concept cards plus user-added cards, with a review scheduler
//! that spaces each card 2^level days out from its latest 0-5 rating.

pub mod app;
pub mod catalog;
pub mod error;
pub mod scheduler;
pub mod storage;
pub mod study;

pub use app::App;
pub use error::{MindcardsError, Result};
