//! Application shell tying the catalog, scheduler and storage together.
//!
//! The scheduler and catalog are pure; `App` is the only place that loads and
//! saves, so every mutation here is followed by a write to storage.

use chrono::{DateTime, Utc};

use crate::catalog::{Card, Catalog, ExportFormat};
use crate::error::{MindcardsError, Result};
use crate::scheduler::{
    self, CardIndicator, KnowledgeLevel, ProgressStore, RatingSummary, Stats, due_cards, rate_level, reconcile,
};
use crate::storage::{self, Storage};
use crate::study::StudySession;

pub struct App<S: Storage> {
    storage: S,
    catalog: Catalog,
    progress: ProgressStore,
}

impl<S: Storage> App<S> {
    /// Load cards and progress, create state for new cards, and save the result.
    pub fn open(storage: S, now: DateTime<Utc>) -> Result<Self> {
        let catalog = Catalog::new(storage::load_user_cards(&storage)?);
        let persisted = storage::load_progress(&storage)?;
        let progress = reconcile(catalog.cards(), persisted, now);
        storage::save_progress(&storage, &progress)?;

        tracing::info!(cards = catalog.len(), tracked = progress.len(), "Opened card deck");
        Ok(Self {
            storage,
            catalog,
            progress,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Rate a catalog card and persist the new schedule.
    pub fn rate(&mut self, card_name: &str, level: KnowledgeLevel, now: DateTime<Utc>) -> Result<RatingSummary> {
        if self.catalog.get(card_name).is_none() {
            return Err(MindcardsError::CardNotFound(card_name.to_string()));
        }
        let summary = rate_level(&mut self.progress, card_name, level, now);
        storage::save_progress(&self.storage, &self.progress)?;
        Ok(summary)
    }

    /// Due cards among those carrying `tag` (all cards when `None`).
    pub fn due(&self, tag: Option<&str>, now: DateTime<Utc>) -> Vec<&Card> {
        due_cards(&self.progress, self.catalog.filtered(tag), now)
    }

    pub fn stats(&self, now: DateTime<Utc>) -> Stats {
        scheduler::stats(&self.progress, self.catalog.cards(), now)
    }

    pub fn study(&self, tag: Option<&str>, now: DateTime<Utc>) -> StudySession {
        StudySession::start(&self.progress, self.catalog.filtered(tag), now)
    }

    pub fn indicator(&self, card_name: &str, now: DateTime<Utc>) -> Option<CardIndicator> {
        scheduler::indicator(&self.progress, card_name, now)
    }

    /// Add a user card from form-style input and persist cards and progress.
    pub fn add_card(&mut self, name: &str, explanation: &str, tags_csv: &str, now: DateTime<Utc>) -> Result<&Card> {
        let card = Card::from_input(name, explanation, tags_csv)?;
        let name = card.name.clone();
        self.catalog.add_card(card.clone())?;
        storage::append_user_card(&self.storage, &card)?;

        let progress = std::mem::take(&mut self.progress);
        self.progress = reconcile(self.catalog.cards(), progress, now);
        storage::save_progress(&self.storage, &self.progress)?;

        self.catalog
            .get(&name)
            .ok_or(MindcardsError::CardNotFound(name))
    }

    /// Clear all progress, then recreate fresh state for every card.
    pub fn reset(&mut self, now: DateTime<Utc>) -> Result<()> {
        storage::clear_progress(&self.storage)?;
        self.progress = reconcile(self.catalog.cards(), scheduler::reset(), now);
        storage::save_progress(&self.storage, &self.progress)?;
        tracing::info!(cards = self.catalog.len(), "Reset learning progress");
        Ok(())
    }

    pub fn export(&self, format: ExportFormat) -> Result<String> {
        self.catalog.export(format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, load_progress, load_user_cards};
    use chrono::{TimeDelta, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 5, 5, 5, 5).unwrap()
    }

    fn level(v: i64) -> KnowledgeLevel {
        KnowledgeLevel::new(v).unwrap()
    }

    #[test]
    fn test_open_reconciles_and_saves() {
        let app = App::open(MemoryStorage::new(), t0()).unwrap();
        assert_eq!(app.progress().len(), 4);
        assert_eq!(load_progress(app.storage()).unwrap(), *app.progress());
        assert_eq!(app.due(None, t0()).len(), 4);
    }

    #[test]
    fn test_rate_persists() {
        let mut app = App::open(MemoryStorage::new(), t0()).unwrap();
        let summary = app.rate("YAGNI", level(2), t0()).unwrap();
        assert_eq!(summary.next_review_description, "in 4 days");

        let saved = load_progress(app.storage()).unwrap();
        assert_eq!(saved.get("YAGNI").unwrap().next_review_date, t0() + TimeDelta::days(4));
    }

    #[test]
    fn test_rate_unknown_card() {
        let mut app = App::open(MemoryStorage::new(), t0()).unwrap();
        let err = app.rate("Nope", level(1), t0()).unwrap_err();
        assert!(matches!(err, MindcardsError::CardNotFound(_)));
    }

    #[test]
    fn test_add_card_persists_and_is_due() {
        let mut app = App::open(MemoryStorage::new(), t0()).unwrap();
        let later = t0() + TimeDelta::hours(1);
        let card = app.add_card("DRY", "Don't repeat yourself.", "backend, design", later).unwrap();
        assert_eq!(card.tags, vec!["backend", "design"]);

        assert_eq!(load_user_cards(app.storage()).unwrap().len(), 1);
        assert_eq!(app.progress().get("DRY").unwrap().next_review_date, later);
        assert_eq!(app.due(Some("design"), later).len(), 1);
    }

    #[test]
    fn test_add_card_keeps_skipped_user_cards() {
        let storage = MemoryStorage::new();
        storage
            .write(
                crate::storage::USER_CARDS_KEY,
                r#"[{"name":"YAGNI","explanation":"my own notes","tags":["x"]}]"#,
            )
            .unwrap();

        let mut app = App::open(storage, t0()).unwrap();
        assert_eq!(app.catalog().len(), 4);
        app.add_card("DRY", "Don't repeat yourself.", "backend", t0()).unwrap();

        let raw = app.storage().read(crate::storage::USER_CARDS_KEY).unwrap().unwrap();
        assert!(raw.contains("my own notes"));
        assert_eq!(app.catalog().len(), 5);
    }

    #[test]
    fn test_add_duplicate_card_fails() {
        let mut app = App::open(MemoryStorage::new(), t0()).unwrap();
        assert!(matches!(
            app.add_card("YAGNI", "x", "y", t0()),
            Err(MindcardsError::DuplicateCard(_))
        ));
    }

    #[test]
    fn test_reset_reproduces_fresh_state() {
        let mut app = App::open(MemoryStorage::new(), t0()).unwrap();
        let fresh = app.progress().clone();
        app.rate("YAGNI", level(5), t0()).unwrap();

        app.reset(t0()).unwrap();
        assert_eq!(*app.progress(), fresh);
        app.reset(t0()).unwrap();
        assert_eq!(*app.progress(), fresh);
    }

    #[test]
    fn test_reopen_keeps_progress() {
        let storage = MemoryStorage::new();
        storage::save_progress(&storage, &{
            let mut p = ProgressStore::new();
            scheduler::rate(&mut p, "Cognitive Load", 4, t0()).unwrap();
            p
        })
        .unwrap();

        let app = App::open(storage, t0()).unwrap();
        assert_eq!(app.progress().get("Cognitive Load").unwrap().knowledge_level, level(4));
        assert_eq!(app.indicator("Cognitive Load", t0()).unwrap().to_string(), "4/5");
        assert_eq!(app.stats(t0()).reviewed_count, 1);
    }
}
