use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use validator::Validate;

use crate::models::{Candidate, CandidateId, Deck};

/// Errors that can occur while loading a candidate deck
#[derive(Debug, Error)]
pub enum DeckError {
    #[error("Failed to read deck file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON deck: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid TOML deck: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Candidate {id} failed validation: {errors}")]
    Validation {
        id: CandidateId,
        errors: validator::ValidationErrors,
    },

    #[error("Duplicate candidate id: {0}")]
    DuplicateId(CandidateId),

    #[error("Unsupported deck format: {0}")]
    UnsupportedFormat(String),
}

/// JSON decks may be a bare array or wrapped in `{ "candidates": [...] }`
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonDeck {
    List(Vec<Candidate>),
    Wrapped(Deck),
}

/// Load and validate a deck, picking the format from the file extension
pub fn load_deck<P: AsRef<Path>>(path: P) -> Result<Deck, DeckError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| DeckError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let deck = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => parse_json_deck(&text)?,
        Some("toml") => parse_toml_deck(&text)?,
        other => {
            return Err(DeckError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            ))
        }
    };

    tracing::debug!("Loaded {} candidates from {}", deck.len(), path.display());
    Ok(deck)
}

pub fn parse_json_deck(text: &str) -> Result<Deck, DeckError> {
    let deck = match serde_json::from_str::<JsonDeck>(text)? {
        JsonDeck::List(candidates) => Deck::new(candidates),
        JsonDeck::Wrapped(deck) => deck,
    };
    validate_deck(&deck)?;
    Ok(deck)
}

/// Parse a TOML deck made of `[[candidates]]` tables
pub fn parse_toml_deck(text: &str) -> Result<Deck, DeckError> {
    let deck: Deck = toml::from_str(text)?;
    validate_deck(&deck)?;
    Ok(deck)
}

/// Check every candidate's fields and that ids are unique
///
/// An empty deck is valid; the session renders a neutral empty state for it.
pub fn validate_deck(deck: &Deck) -> Result<(), DeckError> {
    let mut seen = HashSet::with_capacity(deck.len());

    for candidate in deck.iter() {
        candidate.validate().map_err(|errors| DeckError::Validation {
            id: candidate.id,
            errors,
        })?;

        if !seen.insert(candidate.id) {
            return Err(DeckError::DuplicateId(candidate.id));
        }
    }

    Ok(())
}
