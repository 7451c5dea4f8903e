//! Çarşı Catalog - catalog configuration and resolution engine.
//!
//! This crate holds the one subsystem of the storefront with real design
//! content: dynamic product schemas, variant pricing, category assembly,
//! and localized-content resolution. It is a pure library; callers (page
//! renderers, admin actions) fetch rows from storage, hand them to the
//! engine, and get plain data structures back. No component here performs
//! I/O.
//!
//! # Modules
//!
//! - [`attributes`] - Dynamically typed attribute values and dictionaries
//! - [`template`] - Product templates and attribute validation
//! - [`variant`] - Variants and per-currency pricing
//! - [`locale`] - Localized content with configurable fallback chains
//! - [`category`] - Category tree assembly and parent validation
//! - [`listing`] - Category product listings (two-path membership union)
//! - [`product`] - Product entity and admin-side guards
//! - [`storage`] - Write-boundary traits and the in-memory reference store
//! - [`error`] - The engine's error taxonomy

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod attributes;
pub mod category;
pub mod error;
pub mod listing;
pub mod locale;
pub mod product;
pub mod storage;
pub mod template;
pub mod variant;

pub use attributes::{AttributeValue, Attributes};
pub use category::{Category, CategoryNode, build_tree, validate_parent};
pub use error::{CatalogError, Result};
pub use listing::resolve_active_products;
pub use locale::{FallbackChain, Localization, Localized, resolve, upsert_localization};
pub use product::{Product, ensure_template_deletable};
pub use storage::{LocalizationWriter, MemoryCatalog, VariantWriter, WriteCapability};
pub use template::{
    FieldError, FieldErrorReason, FieldType, ProductTemplate, TemplateField, validate,
};
pub use variant::{Variant, VariantPrice, VariantPricingStore};
