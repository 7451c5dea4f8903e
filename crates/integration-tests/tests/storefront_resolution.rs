//! Integration tests for storefront-side resolution.
//!
//! Exercises what a category page render does: assemble the category tree,
//! resolve the deduplicated active product list from both membership paths,
//! and pick localized display text through a fallback chain.

use std::collections::HashMap;

use carsi_catalog::{
    Attributes, Category, CategoryNode, FallbackChain, Localization, Product, build_tree, resolve,
    resolve_active_products, validate_parent,
};
use carsi_core::{CategoryId, LangCode, ProductId, Slug, slugify};

// =============================================================================
// Fixtures
// =============================================================================

fn category(id: i32, parent: Option<i32>, name: &str) -> Category {
    Category {
        id: CategoryId::new(id),
        parent_id: parent.map(CategoryId::new),
        slug: Slug::from_display_name(name).expect("fixture names slugify"),
        sort: id,
        active: true,
        translations: vec![
            translation(id, "tr", name),
            translation(id, "en", &format!("{name} (en)")),
        ],
    }
}

fn translation(owner: i32, lang: &str, name: &str) -> Localization<CategoryId> {
    Localization {
        owner_id: CategoryId::new(owner),
        lang: LangCode::parse(lang).expect("fixture lang"),
        fields: HashMap::from([("name".to_owned(), name.to_owned())]),
    }
}

fn product(id: i32, category: Option<&str>, active: bool) -> Product {
    Product {
        id: ProductId::new(id),
        template_id: None,
        category_slug: category.map(|s| Slug::parse(s).expect("fixture slug")),
        slug: Slug::from_display_name(&format!("Ürün {id}")).expect("fixture slug"),
        sku: format!("SKU-{id}"),
        name: format!("Ürün {id}"),
        attributes: Attributes::new(),
        active,
        localizations: Vec::new(),
    }
}

// =============================================================================
// Category page: tree + listing
// =============================================================================

#[test]
fn test_navigation_tree_from_flat_rows() {
    let forest = build_tree(vec![
        category(1, None, "Davetiyeler"),
        category(2, Some(1), "Düğün"),
        category(3, Some(1), "Nişan"),
        category(4, None, "Etiketler"),
        category(5, Some(99), "Kayıp Ebeveyn"),
    ]);

    // Two declared roots plus the orphan.
    assert_eq!(forest.len(), 3);
    let total: usize = forest.iter().map(CategoryNode::count).sum();
    assert_eq!(total, 5);

    let davetiyeler = forest
        .iter()
        .find(|n| n.category.slug.as_str() == "davetiyeler")
        .expect("root present");
    assert_eq!(davetiyeler.children.len(), 2);
}

#[test]
fn test_category_listing_spec_scenario() {
    // Category "etiketler" has mapping ids {5, 7}; product 7 also carries
    // the slug directly. The listing holds 5 and 7, with 7 appearing once.
    let slug = Slug::parse("etiketler").expect("slug");
    let rows = vec![
        product(5, None, true),
        product(7, Some("etiketler"), true),
    ];
    let all: HashMap<ProductId, Product> = rows.iter().map(|p| (p.id, p.clone())).collect();
    let primary: Vec<Product> = rows
        .iter()
        .filter(|p| p.category_slug.is_some())
        .cloned()
        .collect();

    let resolved =
        resolve_active_products(&slug, &primary, &[ProductId::new(5), ProductId::new(7)], &all);

    let ids: Vec<i32> = resolved.iter().map(|p| p.id.as_i32()).collect();
    assert_eq!(ids, vec![5, 7]);
}

#[test]
fn test_admin_move_then_rebuild_round_trip() {
    let flat = vec![
        category(1, None, "Davetiyeler"),
        category(2, Some(1), "Düğün"),
        category(3, None, "Etiketler"),
    ];

    // Moving "Etiketler" under "Düğün" is fine; moving "Davetiyeler" under
    // its own grandchild is not.
    validate_parent(&flat, CategoryId::new(3), Some(CategoryId::new(2))).expect("legal move");
    validate_parent(&flat, CategoryId::new(1), Some(CategoryId::new(2)))
        .expect_err("cycle refused");
}

// =============================================================================
// Localized rendering
// =============================================================================

#[test]
fn test_category_name_resolution_per_visitor_language() {
    let cat = category(1, None, "Davetiyeler");
    let chain = FallbackChain::products_default();

    let tr = LangCode::parse("tr").expect("lang");
    let de = LangCode::parse("de").expect("lang");

    let turkish = resolve(&cat.translations, &tr, &chain).expect("resolves");
    assert_eq!(turkish.field("name"), Some("Davetiyeler"));

    // German is missing; the chain lands on English.
    let fallback = resolve(&cat.translations, &de, &chain).expect("resolves");
    assert_eq!(fallback.field("name"), Some("Davetiyeler (en)"));
}

#[test]
fn test_slug_and_name_agree_for_turkish_input() {
    assert_eq!(slugify("İstanbul Çağrı"), "istanbul-cagri");
    let slug = Slug::from_display_name("İstanbul Çağrı").expect("slug");
    assert_eq!(slug.as_str(), "istanbul-cagri");
}
