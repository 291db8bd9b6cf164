use thiserror::Error;

use crate::model::Id;

/// Errors raised by the tag repository and domain registry.
///
/// Every failing mutation leaves the taxonomy exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaxonomyError {
    #[error("Tag '{id}' not found")]
    NotFound { id: Id },

    #[error("Domain '{label}' already exists")]
    DuplicateName { label: String },

    #[error("Invalid color '{value}': expected 6 hex digits")]
    InvalidColor { value: String },

    #[error("Tag '{id}' is not a root tag; its color is derived from its root")]
    DerivedColor { id: Id },

    #[error("Invalid snapshot: {reason}")]
    InvalidSnapshot { reason: String },

    #[error("Tree below '{id}' is {depth} levels deep; nested views stop at {limit}")]
    TooDeep { id: Id, depth: usize, limit: usize },
}

impl TaxonomyError {
    pub fn not_found(id: &str) -> Self {
        TaxonomyError::NotFound { id: id.to_string() }
    }

    pub fn invalid_snapshot(reason: impl Into<String>) -> Self {
        TaxonomyError::InvalidSnapshot {
            reason: reason.into(),
        }
    }
}

pub type TaxonomyResult<T> = Result<T, TaxonomyError>;
