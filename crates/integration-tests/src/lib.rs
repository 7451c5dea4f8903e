//! Integration tests for the Çarşı catalog engine.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p carsi-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `admin_catalog_flow` - Template, variant, and pricing admin workflows
//! - `storefront_resolution` - Category listing and locale resolution as a
//!   storefront page would run them
//!
//! The tests drive the engine against the in-memory reference store; no
//! database or server is required.

#![cfg_attr(not(test), forbid(unsafe_code))]
