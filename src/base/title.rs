//! Validated, immutable page titles.

use smol_str::SmolStr;
use thiserror::Error;

use super::namespace::Namespace;
use super::text::{to_db_key, to_display_text};

/// Characters the host never allows in a title.
const FORBIDDEN: &[char] = &['[', ']', '{', '}', '|', '#', '<', '>'];

/// Errors raised while constructing a [`Title`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TitleError {
    /// The text was empty after trimming.
    #[error("title text is empty")]
    Empty,

    /// The text contained a character the host forbids.
    #[error("title contains forbidden character `{0}`")]
    ForbiddenChar(char),
}

/// A wiki page identity: namespace plus normalized db key.
///
/// Immutable once constructed; the db key stores underscores, the display
/// text swaps them back for spaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Title {
    namespace: Namespace,
    key: SmolStr,
}

impl Title {
    /// Construct a title from display text, validating it.
    pub fn new(namespace: Namespace, text: &str) -> Result<Title, TitleError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(TitleError::Empty);
        }
        if let Some(bad) = trimmed.chars().find(|c| FORBIDDEN.contains(c) || c.is_control()) {
            return Err(TitleError::ForbiddenChar(bad));
        }
        Ok(Title {
            namespace,
            key: SmolStr::from(to_db_key(trimmed)),
        })
    }

    /// Construct directly from an already-normalized db key.
    ///
    /// Used when reading keys back out of the store; skips re-validation.
    pub fn from_db_key(namespace: Namespace, key: &str) -> Title {
        Title {
            namespace,
            key: SmolStr::from(key),
        }
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    /// The underscored storage key.
    pub fn db_key(&self) -> &str {
        &self.key
    }

    /// Display text with spaces.
    pub fn text(&self) -> String {
        to_display_text(&self.key)
    }

    /// `Namespace:Name` form, or just the name in the main namespace.
    pub fn prefixed_text(&self) -> String {
        match self.namespace.canonical_name() {
            Some("") | None if self.namespace == Namespace::MAIN => self.text(),
            Some(name) if !name.is_empty() => format!("{}:{}", name, self.text()),
            _ => format!("{}:{}", self.namespace, self.text()),
        }
    }

    /// Parse `Namespace:Name` display text, falling back to the main
    /// namespace when the prefix is not a known namespace.
    pub fn from_prefixed_text(text: &str) -> Result<Title, TitleError> {
        if let Some((prefix, rest)) = text.split_once(':') {
            if let Some(ns) = Namespace::from_name(prefix) {
                return Title::new(ns, rest);
            }
        }
        Title::new(Namespace::MAIN, text)
    }
}

impl std::fmt::Display for Title {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.prefixed_text())
    }
}
