//! Category product listings.
//!
//! A product belongs to a category through either of two independent paths:
//! its own `category_slug` column (the "primary" assignment) or an explicit
//! category/product mapping row (many-to-many). A correct listing honors
//! both without double-counting, which used to be an accident of two
//! queries merged ad hoc at each call site. Here the union is explicit and
//! total.

use std::collections::{HashMap, HashSet};

use carsi_core::{ProductId, Slug};

use crate::product::Product;

/// Resolve the deduplicated, active-only product list for a category.
///
/// Membership is the union of:
///
/// 1. the explicit mapping table's product ids for the category, and
/// 2. every product whose own `category_slug` equals `category_slug`.
///
/// Full rows for the union come from `all_products_by_id`; rows that are
/// not `active` are dropped. Ordering: mapping ids first in their fetch
/// order, then primary matches appended in theirs, duplicates removed at
/// first occurrence. Re-running with the same inputs yields the same list.
///
/// A mapping id with no row in `all_products_by_id` is a dangling
/// reference; it is skipped with a warning rather than failing the whole
/// listing.
#[must_use]
pub fn resolve_active_products(
    category_slug: &Slug,
    primary_products: &[Product],
    mapping_product_ids: &[ProductId],
    all_products_by_id: &HashMap<ProductId, Product>,
) -> Vec<Product> {
    let mut seen: HashSet<ProductId> = HashSet::new();
    let mut member_ids: Vec<ProductId> = Vec::new();

    for &id in mapping_product_ids {
        if seen.insert(id) {
            member_ids.push(id);
        }
    }

    for product in primary_products {
        if product.category_slug.as_ref() == Some(category_slug) && seen.insert(product.id) {
            member_ids.push(product.id);
        }
    }

    member_ids
        .into_iter()
        .filter_map(|id| {
            let row = all_products_by_id.get(&id);
            if row.is_none() {
                tracing::warn!(
                    product_id = %id,
                    category = %category_slug,
                    "category mapping references a missing product; skipping"
                );
            }
            row
        })
        .filter(|product| product.active)
        .cloned()
        .collect()
}
