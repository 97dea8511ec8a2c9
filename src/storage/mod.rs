//! Storage layer for Mindcards - key/value document persistence.
//!
//! Progress and user cards are each stored as one JSON document under a fixed
//! key. `JsonFileStorage` keeps them as files in a data directory;
//! `MemoryStorage` keeps them in process.

mod file;
mod memory;
mod progress;
mod traits;

pub use file::JsonFileStorage;
pub use memory::MemoryStorage;
pub use progress::{append_user_card, clear_progress, load_progress, load_user_cards, save_progress};
pub use traits::{PROGRESS_KEY, Storage, USER_CARDS_KEY};
