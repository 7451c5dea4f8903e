//! Localized content resolution with configurable fallback chains.
//!
//! Storefront pages render products, categories, services, and generic pages
//! in the visitor's language when a translation exists, and otherwise walk a
//! per-content-type fallback chain. The chains used to live inline at each
//! call site (`requested → en → tr → first` here, `requested → en → first`
//! there); this module is the single primitive they all go through now.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use carsi_core::LangCode;

/// Anything that carries a language code and can participate in fallback
/// resolution.
pub trait Localized {
    /// The language this record is written in.
    fn lang(&self) -> &LangCode;
}

/// An ordered, deduplicated list of languages to try when the requested one
/// is missing.
///
/// Each content type declares its own chain; the resolver never hardcodes
/// one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackChain(Vec<LangCode>);

impl FallbackChain {
    /// Build a chain from an ordered list of codes, dropping duplicates
    /// while preserving first-occurrence order.
    #[must_use]
    pub fn new(codes: impl IntoIterator<Item = LangCode>) -> Self {
        let mut seen = Vec::new();
        for code in codes {
            if !seen.contains(&code) {
                seen.push(code);
            }
        }
        Self(seen)
    }

    /// The chain used for products and categories: `en → tr`.
    #[must_use]
    pub fn products_default() -> Self {
        Self(vec![lang("en"), lang("tr")])
    }

    /// The chain used for services and generic pages: `en`.
    #[must_use]
    pub fn pages_default() -> Self {
        Self(vec![lang("en")])
    }

    /// The codes in try-order.
    pub fn iter(&self) -> impl Iterator<Item = &LangCode> {
        self.0.iter()
    }
}

/// A static, known-valid language code.
fn lang(code: &str) -> LangCode {
    LangCode::parse(code).expect("static language code is valid")
}

/// Select the best-matching localized record.
///
/// Scans `records` for the requested language; failing that, tries each
/// chain entry in order (skipping the requested code if it reappears there);
/// failing that, falls back to the first record in its original order.
/// Returns `None` only when `records` is empty.
///
/// Deterministic: the same `(records, requested, chain)` triple always
/// selects the same record. No ordering beyond the documented first-element
/// tie-break is assumed of the input.
pub fn resolve<'a, T: Localized>(
    records: &'a [T],
    requested: &LangCode,
    chain: &FallbackChain,
) -> Option<&'a T> {
    if let Some(found) = records.iter().find(|r| r.lang() == requested) {
        return Some(found);
    }

    for code in chain.iter().filter(|c| *c != requested) {
        if let Some(found) = records.iter().find(|r| r.lang() == code) {
            return Some(found);
        }
    }

    records.first()
}

/// A language-specific set of display text for one owning entity.
///
/// At most one `Localization` exists per `(owner_id, lang)`; the storage
/// boundary enforces that with an upsert keyed on the pair (see
/// [`crate::storage::LocalizationWriter`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localization<Id> {
    /// The entity this text belongs to.
    pub owner_id: Id,
    /// The language of [`Self::fields`].
    pub lang: LangCode,
    /// Translated text fields, keyed by field name (`"name"`,
    /// `"description"`, ...).
    pub fields: HashMap<String, String>,
}

impl<Id> Localized for Localization<Id> {
    fn lang(&self) -> &LangCode {
        &self.lang
    }
}

impl<Id> Localization<Id> {
    /// A translated field by name, if present.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Replace-or-append a localization into an owner's row set, keyed on
/// `(owner_id, lang)`.
///
/// This is the in-memory shape of the storage boundary's conflict-keyed
/// upsert: setting text for a language that already has a row replaces that
/// row; it never creates a second one.
pub fn upsert_localization<Id: PartialEq>(rows: &mut Vec<Localization<Id>>, row: Localization<Id>) {
    if let Some(existing) = rows
        .iter_mut()
        .find(|r| r.owner_id == row.owner_id && r.lang == row.lang)
    {
        *existing = row;
    } else {
        rows.push(row);
    }
}
