//! Filter predicates evaluated by catalog storage.

use super::entry::{CatalogEntry, TextField};

/// A filter condition selecting catalog entries.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Every entry matches.
    MatchAll,

    /// Case-insensitive substring match of `term` against one field.
    /// Entries with no value in that field never match.
    Contains { field: TextField, term: String },

    /// At least one of the inner predicates matches.
    Or(Vec<Predicate>),
}

impl Predicate {
    pub fn contains(field: TextField, term: impl Into<String>) -> Self {
        Self::Contains {
            field,
            term: term.into(),
        }
    }

    /// Substring match of `term` against every searchable text field.
    pub fn contains_any(term: &str) -> Self {
        Self::Or(
            TextField::ALL
                .iter()
                .map(|field| Self::contains(*field, term))
                .collect(),
        )
    }

    /// Evaluate the predicate against an entry in memory.
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        match self {
            Self::MatchAll => true,
            Self::Contains { field, term } => entry
                .text(*field)
                .is_some_and(|value| value.to_lowercase().contains(&term.to_lowercase())),
            Self::Or(predicates) => predicates.iter().any(|p| p.matches(entry)),
        }
    }
}
