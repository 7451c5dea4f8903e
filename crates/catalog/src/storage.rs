//! Write-boundary traits and the in-memory reference store.
//!
//! The engine performs no I/O. Mutations flow through the narrow traits in
//! this module, which the host backs with its database; [`MemoryCatalog`]
//! is the in-memory reference implementation used by the test-suite and by
//! hosts that keep the catalog resident.
//!
//! # Atomicity
//!
//! Both traits carry an upsert whose uniqueness invariant must be enforced
//! *at the storage boundary* (SQL: `INSERT ... ON CONFLICT ... DO UPDATE`
//! with the documented conflict target). A read-then-write check in
//! application logic loses updates under concurrent writers; the engine
//! never does that, and neither may an implementation.

use std::collections::HashMap;

use rust_decimal::Decimal;

use carsi_core::{CurrencyCode, ProductId, VariantId};

use crate::attributes::Attributes;
use crate::error::Result;
use crate::locale::{Localization, upsert_localization};
use crate::variant::{Variant, VariantPrice};

/// Capability token required to construct the engine's mutation facades.
///
/// The host's composition root mints one per writer it wires up, scoped to
/// that writer. This replaces the old pattern of a process-global elevated
/// storage client that every call site could reach: code without a token
/// cannot write, and the type is deliberately not `Clone`.
#[derive(Debug)]
pub struct WriteCapability {
    _priv: (),
}

impl WriteCapability {
    /// Mint a write capability.
    ///
    /// Call this once where the application is composed, not in library
    /// code paths.
    #[must_use]
    pub const fn grant() -> Self {
        Self { _priv: () }
    }
}

/// Storage boundary for variant and price writes.
///
/// `upsert_price` must be an atomic insert-or-replace with conflict target
/// `(variant_id, currency)`. `delete_variant` must cascade to the variant's
/// price entries and must not touch the owning product.
pub trait VariantWriter {
    /// Whether a product row exists.
    ///
    /// # Errors
    ///
    /// Storage-level failures only.
    fn product_exists(&self, product_id: ProductId) -> Result<bool>;

    /// Load a variant with its prices, or `None` when the id is unknown.
    ///
    /// # Errors
    ///
    /// Storage-level failures only.
    fn load_variant(&self, variant_id: VariantId) -> Result<Option<Variant>>;

    /// Insert a new variant under a product and return its id.
    ///
    /// # Errors
    ///
    /// Storage-level failures only; the caller has already checked the
    /// product exists.
    fn insert_variant(&mut self, product_id: ProductId, attributes: Attributes)
    -> Result<VariantId>;

    /// Replace a variant's attribute dictionary in full.
    ///
    /// # Errors
    ///
    /// Storage-level failures only; the caller has already checked the
    /// variant exists.
    fn replace_attributes(&mut self, variant_id: VariantId, attributes: Attributes) -> Result<()>;

    /// Atomically insert-or-replace a price keyed on `(variant_id, currency)`.
    ///
    /// # Errors
    ///
    /// Storage-level failures, including a refused conflict
    /// ([`crate::CatalogError::Conflict`]).
    fn upsert_price(
        &mut self,
        variant_id: VariantId,
        currency: CurrencyCode,
        amount: Decimal,
    ) -> Result<()>;

    /// Delete a variant and cascade to its price entries.
    ///
    /// # Errors
    ///
    /// Storage-level failures only; the caller has already checked the
    /// variant exists.
    fn delete_variant(&mut self, variant_id: VariantId) -> Result<()>;
}

/// Storage boundary for localization writes.
///
/// The upsert's conflict target is `(owner_id, lang)`: at most one
/// localization row exists per owner and language.
pub trait LocalizationWriter<Id> {
    /// Atomically insert-or-replace a localization row.
    ///
    /// # Errors
    ///
    /// Storage-level failures, including a refused conflict.
    fn upsert_localization(&mut self, row: Localization<Id>) -> Result<()>;
}

/// In-memory reference implementation of the write boundaries.
///
/// Map-keyed state makes every upsert naturally conflict-keyed: a
/// `HashMap` insert on the invariant's key *is* the atomic upsert. Used by
/// the engine's own tests and usable by hosts that hold the catalog in
/// memory.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    products: Vec<ProductId>,
    variants: HashMap<VariantId, Variant>,
    product_localizations: Vec<Localization<ProductId>>,
    next_variant_id: i32,
}

impl MemoryCatalog {
    /// An empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a product id known to the catalog so variants can be attached
    /// to it.
    pub fn register_product(&mut self, product_id: ProductId) {
        if !self.products.contains(&product_id) {
            self.products.push(product_id);
        }
    }

    /// The registered product ids, in registration order.
    pub fn product_ids(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.products.iter().copied()
    }

    /// All variants of one product, in id order.
    #[must_use]
    pub fn variants_of(&self, product_id: ProductId) -> Vec<&Variant> {
        let mut variants: Vec<&Variant> = self
            .variants
            .values()
            .filter(|v| v.product_id == product_id)
            .collect();
        variants.sort_by_key(|v| v.id.as_i32());
        variants
    }

    /// Every price entry as a flat row view.
    pub fn price_rows(&self) -> impl Iterator<Item = VariantPrice> + '_ {
        self.variants.values().flat_map(|v| {
            v.prices.iter().map(|(currency, amount)| VariantPrice {
                variant_id: v.id,
                currency: *currency,
                amount: *amount,
            })
        })
    }

    /// The stored product localizations.
    #[must_use]
    pub fn product_localizations(&self) -> &[Localization<ProductId>] {
        &self.product_localizations
    }
}

impl VariantWriter for MemoryCatalog {
    fn product_exists(&self, product_id: ProductId) -> Result<bool> {
        Ok(self.products.contains(&product_id))
    }

    fn load_variant(&self, variant_id: VariantId) -> Result<Option<Variant>> {
        Ok(self.variants.get(&variant_id).cloned())
    }

    fn insert_variant(
        &mut self,
        product_id: ProductId,
        attributes: Attributes,
    ) -> Result<VariantId> {
        self.next_variant_id += 1;
        let id = VariantId::new(self.next_variant_id);
        self.variants.insert(
            id,
            Variant {
                id,
                product_id,
                attributes,
                prices: HashMap::new(),
            },
        );
        Ok(id)
    }

    fn replace_attributes(&mut self, variant_id: VariantId, attributes: Attributes) -> Result<()> {
        if let Some(variant) = self.variants.get_mut(&variant_id) {
            variant.attributes = attributes;
        }
        Ok(())
    }

    fn upsert_price(
        &mut self,
        variant_id: VariantId,
        currency: CurrencyCode,
        amount: Decimal,
    ) -> Result<()> {
        if let Some(variant) = self.variants.get_mut(&variant_id) {
            // Keyed insert is the conflict-target upsert.
            variant.prices.insert(currency, amount);
        }
        Ok(())
    }

    fn delete_variant(&mut self, variant_id: VariantId) -> Result<()> {
        // Prices live inside the variant, so removal cascades by itself.
        self.variants.remove(&variant_id);
        Ok(())
    }
}

impl LocalizationWriter<ProductId> for MemoryCatalog {
    fn upsert_localization(&mut self, row: Localization<ProductId>) -> Result<()> {
        upsert_localization(&mut self.product_localizations, row);
        Ok(())
    }
}
