//! Product variants and per-currency pricing.
//!
//! A variant is one sellable configuration of a product: its own attribute
//! dictionary plus zero or more per-currency prices. The pricing invariant
//! is strict: at most one price per `(variant, currency)`, enforced by an
//! upsert keyed on that pair at the storage boundary (see
//! [`crate::storage::VariantWriter`]).

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use carsi_core::{CurrencyCode, ProductId, VariantId};

use crate::attributes::Attributes;
use crate::error::{CatalogError, Result};
use crate::storage::{VariantWriter, WriteCapability};
use crate::template::{self, ProductTemplate};

/// A sellable configuration of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub id: VariantId,
    pub product_id: ProductId,
    /// Attribute dictionary. Replaced wholesale on update, never merged.
    pub attributes: Attributes,
    /// At most one amount per currency, by construction of the map and of
    /// the storage boundary's conflict-keyed upsert.
    pub prices: HashMap<CurrencyCode, Decimal>,
}

impl Variant {
    /// The price for a currency, if one is set.
    #[must_use]
    pub fn price(&self, currency: CurrencyCode) -> Option<Decimal> {
        self.prices.get(&currency).copied()
    }
}

/// One price row, as the storage layer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantPrice {
    pub variant_id: VariantId,
    pub currency: CurrencyCode,
    pub amount: Decimal,
}

/// The engine's only mutation entry point: variant and price writes.
///
/// The store validates ids and amounts and delegates the actual writes to a
/// [`VariantWriter`], whose implementations must upsert prices atomically on
/// the `(variant, currency)` conflict target - a read-then-write check here
/// would lose updates under concurrent calls. Construction requires a
/// [`WriteCapability`], so a read-only code path can never reach these
/// methods by accident.
///
/// The store does not re-validate attributes against a template; callers
/// that want that run [`template::validate`] first or use
/// [`Self::upsert_variant_validated`].
#[derive(Debug)]
pub struct VariantPricingStore<S> {
    store: S,
    _capability: WriteCapability,
}

impl<S: VariantWriter> VariantPricingStore<S> {
    /// Wrap a storage boundary with the engine's write rules.
    pub const fn new(store: S, capability: WriteCapability) -> Self {
        Self {
            store,
            _capability: capability,
        }
    }

    /// Create a variant, or wholesale-replace an existing variant's
    /// attribute dictionary.
    ///
    /// With `variant_id` absent a new variant is created under
    /// `product_id`. With it present, the existing variant's attributes are
    /// replaced in full - callers must resend the complete dictionary.
    ///
    /// # Errors
    ///
    /// [`CatalogError::NotFound`] when `product_id` (on create) or
    /// `variant_id` (on replace) does not resolve.
    pub fn upsert_variant(
        &mut self,
        product_id: ProductId,
        variant_id: Option<VariantId>,
        attributes: Attributes,
    ) -> Result<VariantId> {
        match variant_id {
            Some(id) => {
                if self.store.load_variant(id)?.is_none() {
                    return Err(CatalogError::NotFound(format!("variant {id}")));
                }
                self.store.replace_attributes(id, attributes)?;
                tracing::debug!(variant_id = %id, "replaced variant attributes");
                Ok(id)
            }
            None => {
                if !self.store.product_exists(product_id)? {
                    return Err(CatalogError::NotFound(format!("product {product_id}")));
                }
                let id = self.store.insert_variant(product_id, attributes)?;
                tracing::debug!(product_id = %product_id, variant_id = %id, "created variant");
                Ok(id)
            }
        }
    }

    /// Like [`Self::upsert_variant`], but validates the attributes against
    /// the product's template first.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Validation`] with every field problem when the
    /// dictionary fails the template, plus the errors of
    /// [`Self::upsert_variant`].
    pub fn upsert_variant_validated(
        &mut self,
        product_id: ProductId,
        variant_id: Option<VariantId>,
        attributes: Attributes,
        template: Option<&ProductTemplate>,
    ) -> Result<VariantId> {
        template::validate(template, &attributes).map_err(CatalogError::Validation)?;
        self.upsert_variant(product_id, variant_id, attributes)
    }

    /// Set the price of a variant in one currency.
    ///
    /// Insert-or-replace keyed on `(variant, currency)`: a currency that
    /// already has an amount gets the new amount, never a second row.
    ///
    /// # Errors
    ///
    /// [`CatalogError::InvalidAmount`] for negative amounts,
    /// [`CatalogError::NotFound`] for an unknown variant.
    pub fn set_price(
        &mut self,
        variant_id: VariantId,
        currency: CurrencyCode,
        amount: Decimal,
    ) -> Result<()> {
        if amount < Decimal::ZERO {
            return Err(CatalogError::InvalidAmount(amount));
        }
        if self.store.load_variant(variant_id)?.is_none() {
            return Err(CatalogError::NotFound(format!("variant {variant_id}")));
        }
        self.store.upsert_price(variant_id, currency, amount)?;
        tracing::debug!(variant_id = %variant_id, currency = %currency, %amount, "price set");
        Ok(())
    }

    /// Delete a variant and, with it, all of its price entries.
    ///
    /// The owning product is never touched.
    ///
    /// # Errors
    ///
    /// [`CatalogError::NotFound`] for an unknown variant.
    pub fn delete_variant(&mut self, variant_id: VariantId) -> Result<()> {
        if self.store.load_variant(variant_id)?.is_none() {
            return Err(CatalogError::NotFound(format!("variant {variant_id}")));
        }
        self.store.delete_variant(variant_id)?;
        tracing::debug!(variant_id = %variant_id, "deleted variant");
        Ok(())
    }

    /// Read a variant back through the same boundary.
    ///
    /// # Errors
    ///
    /// [`CatalogError::NotFound`] for an unknown variant.
    pub fn variant(&self, variant_id: VariantId) -> Result<Variant> {
        self.store
            .load_variant(variant_id)?
            .ok_or_else(|| CatalogError::NotFound(format!("variant {variant_id}")))
    }

    /// Consume the store and hand the boundary back to the host.
    pub fn into_inner(self) -> S {
        self.store
    }
}
