//! Error taxonomy for the catalog engine.
//!
//! Field-level validation problems are not errors in this taxonomy: they are
//! returned as data (`Vec<FieldError>`) so an admin form can show every
//! problem at once. The variants here are the typed failures that propagate
//! to the caller. The engine never retries; retry policy, if any, belongs to
//! the storage boundary.

use rust_decimal::Decimal;
use thiserror::Error;

use carsi_core::TemplateId;

use crate::template::FieldError;

/// Engine-level error type for the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// An id did not resolve to a known entity.
    #[error("not found: {0}")]
    NotFound(String),

    /// A uniqueness invariant would be violated and the storage boundary
    /// refused the upsert. Surfaced as-is, never silently merged.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A price amount was negative.
    #[error("invalid amount: {0} (must be non-negative)")]
    InvalidAmount(Decimal),

    /// A template cannot be deleted while products still reference it.
    #[error("template {template_id} is still used by {product_count} product(s)")]
    TemplateInUse {
        /// The template the caller tried to delete.
        template_id: TemplateId,
        /// How many products block the deletion.
        product_count: usize,
    },

    /// Attribute validation failed before a store write. Only produced when
    /// the caller opts in to validating against a template before an upsert.
    #[error("attribute validation failed with {} field error(s)", .0.len())]
    Validation(Vec<FieldError>),
}

/// Result type alias for [`CatalogError`].
pub type Result<T> = std::result::Result<T, CatalogError>;
