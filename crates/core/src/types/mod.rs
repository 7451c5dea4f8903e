//! Core types for Çarşı.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod lang;
pub mod price;
pub mod slug;

pub use id::*;
pub use lang::{LangCode, LangCodeError};
pub use price::{CurrencyCode, Price};
pub use slug::{Slug, SlugError, slugify};
