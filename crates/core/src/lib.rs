//! Çarşı Core - Shared types library.
//!
//! This crate provides common types used across all Çarşı components:
//! - `catalog` - The catalog configuration and resolution engine
//! - the host application's page-rendering and admin-action layers
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, language codes,
//!   and URL slugs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
