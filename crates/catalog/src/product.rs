//! The product entity and admin-side guards.

use serde::{Deserialize, Serialize};

use carsi_core::{ProductId, Slug, SlugError, TemplateId};

use crate::attributes::Attributes;
use crate::error::{CatalogError, Result};
use crate::locale::Localization;

/// A catalog product.
///
/// Slug uniqueness across products is enforced by the storage layer, not by
/// the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    /// The governing template, if the product is strictly typed. Freeform
    /// products carry `None` and skip attribute validation entirely.
    pub template_id: Option<TemplateId>,
    /// The product's primary category. This is one of the two category
    /// membership paths; see [`crate::listing`].
    pub category_slug: Option<Slug>,
    pub slug: Slug,
    pub sku: String,
    pub name: String,
    pub attributes: Attributes,
    pub active: bool,
    pub localizations: Vec<Localization<ProductId>>,
}

impl Product {
    /// The slug a product should carry: the explicit one when supplied,
    /// otherwise derived from the display name.
    ///
    /// # Errors
    ///
    /// [`SlugError::Empty`] when no explicit slug is given and the name
    /// slugifies to nothing.
    pub fn slug_for(name: &str, explicit: Option<Slug>) -> std::result::Result<Slug, SlugError> {
        match explicit {
            Some(slug) => Ok(slug),
            None => Slug::from_display_name(name),
        }
    }
}

/// Guard an admin template deletion: a template still referenced by any
/// product cannot be deleted, and the refusal names the blocking count so
/// the admin knows what to detach first. Deletion is rejected, never
/// cascaded.
///
/// # Errors
///
/// [`CatalogError::TemplateInUse`] with the number of referencing products.
pub fn ensure_template_deletable(template_id: TemplateId, products: &[Product]) -> Result<()> {
    let product_count = products
        .iter()
        .filter(|p| p.template_id == Some(template_id))
        .count();

    if product_count > 0 {
        return Err(CatalogError::TemplateInUse {
            template_id,
            product_count,
        });
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: i32, template_id: Option<TemplateId>) -> Product {
        Product {
            id: ProductId::new(id),
            template_id,
            category_slug: None,
            slug: Slug::parse("urun").unwrap(),
            sku: format!("SKU-{id}"),
            name: format!("Ürün {id}"),
            attributes: Attributes::new(),
            active: true,
            localizations: Vec::new(),
        }
    }

    #[test]
    fn test_slug_for_prefers_explicit() {
        let explicit = Slug::parse("ozel-slug").unwrap();
        let slug = Product::slug_for("Başka Bir İsim", Some(explicit.clone())).unwrap();
        assert_eq!(slug, explicit);
    }

    #[test]
    fn test_slug_for_derives_from_name() {
        let slug = Product::slug_for("Düğün Davetiyesi", None).unwrap();
        assert_eq!(slug.as_str(), "dugun-davetiyesi");
    }

    #[test]
    fn test_slug_for_rejects_empty_derivation() {
        assert!(matches!(
            Product::slug_for("!!!", None),
            Err(SlugError::Empty)
        ));
    }

    #[test]
    fn test_template_deletion_blocked_with_count() {
        let template = TemplateId::new(7);
        let products = vec![
            product(1, Some(template)),
            product(2, None),
            product(3, Some(template)),
            product(4, Some(TemplateId::new(8))),
        ];

        let err = ensure_template_deletable(template, &products).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::TemplateInUse {
                product_count: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_template_deletion_allowed_when_unreferenced() {
        let products = vec![product(1, None), product(2, Some(TemplateId::new(8)))];
        assert!(ensure_template_deletable(TemplateId::new(7), &products).is_ok());
    }
}
