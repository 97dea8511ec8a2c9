//! Catalog export to JSON and Markdown.

use std::fmt;
use std::str::FromStr;

use super::Card;
use crate::error::{MindcardsError, Result};

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl ExportFormat {
    /// Default file name for a download in this format.
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Json => "mental-models.json",
            ExportFormat::Markdown => "mental-models.md",
        }
    }

    pub(super) fn render(&self, cards: &[Card]) -> Result<String> {
        match self {
            ExportFormat::Json => Ok(serde_json::to_string_pretty(cards)?),
            ExportFormat::Markdown => Ok(cards
                .iter()
                .map(|c| format!("## {}\n\n{}\n\nTags: {}", c.name, c.explanation, c.tags.join(", ")))
                .collect::<Vec<_>>()
                .join("\n\n---\n\n")),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = MindcardsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            other => Err(MindcardsError::UnknownFormat(other.to_string())),
        }
    }
}
