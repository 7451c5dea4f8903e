//! Category tree assembly and parent validation.
//!
//! Storefront navigation renders the category forest; admin actions edit
//! the flat rows. Assembly is read-time and lenient: a dangling parent
//! reference must never hide a whole subtree, so unresolved parents become
//! roots. Structural mistakes (self-parenting, ancestor cycles) are
//! rejected at write time by [`validate_parent`], not silently fixed during
//! assembly - but assembly still refuses to drop the affected rows.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use carsi_core::{CategoryId, Slug};

use crate::error::{CatalogError, Result};
use crate::locale::Localization;

/// A flat category row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    /// The parent category, or `None` for a root.
    pub parent_id: Option<CategoryId>,
    pub slug: Slug,
    /// Display position among siblings; the storage read is expected to
    /// order by it.
    pub sort: i32,
    pub active: bool,
    pub translations: Vec<Localization<CategoryId>>,
}

/// A category with its children attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryNode {
    pub category: Category,
    /// Children in the input order of the flat list.
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    /// Number of categories in this subtree, including this one.
    #[must_use]
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Self::count).sum::<usize>()
    }
}

/// Assemble a flat category list into a forest.
///
/// Categories whose `parent_id` resolves to a known id attach as children
/// of that parent, preserving input order among siblings. Everything else
/// becomes a root: explicit roots (`parent_id` = `None`), orphans (parent
/// id unknown), and members of parent cycles that write-time validation
/// should have prevented. No input row is ever dropped; the flattened
/// output always has the input's length.
#[must_use]
pub fn build_tree(flat: Vec<Category>) -> Vec<CategoryNode> {
    let known: HashSet<CategoryId> = flat.iter().map(|c| c.id).collect();
    let input_order: Vec<CategoryId> = flat.iter().map(|c| c.id).collect();

    let mut roots: Vec<Category> = Vec::new();
    let mut by_parent: HashMap<CategoryId, Vec<Category>> = HashMap::new();

    for category in flat {
        match category.parent_id {
            Some(parent) if parent == category.id => {
                tracing::warn!(
                    category_id = %category.id,
                    "category is its own parent; treating as root"
                );
                roots.push(category);
            }
            Some(parent) if known.contains(&parent) => {
                by_parent.entry(parent).or_default().push(category);
            }
            Some(parent) => {
                tracing::warn!(
                    category_id = %category.id,
                    parent_id = %parent,
                    "category parent does not resolve; treating as root"
                );
                roots.push(category);
            }
            None => roots.push(category),
        }
    }

    let mut forest: Vec<CategoryNode> = roots
        .into_iter()
        .map(|root| attach_children(root, &mut by_parent))
        .collect();

    // Rows still grouped under a parent at this point are unreachable from
    // any root: they sit on a parent cycle. Promote them to roots in input
    // order so the forest stays total.
    while by_parent.values().any(|bucket| !bucket.is_empty()) {
        let Some(next) = input_order.iter().find_map(|id| {
            by_parent
                .values_mut()
                .find_map(|bucket| {
                    bucket
                        .iter()
                        .position(|c| c.id == *id)
                        .map(|pos| bucket.remove(pos))
                })
        }) else {
            break;
        };

        tracing::warn!(
            category_id = %next.id,
            "category is part of a parent cycle; treating as root"
        );
        forest.push(attach_children(next, &mut by_parent));
    }

    forest
}

fn attach_children(
    category: Category,
    by_parent: &mut HashMap<CategoryId, Vec<Category>>,
) -> CategoryNode {
    let children = by_parent
        .remove(&category.id)
        .unwrap_or_default()
        .into_iter()
        .map(|child| attach_children(child, by_parent))
        .collect();

    CategoryNode { category, children }
}

/// Validate a proposed parent change before it is written.
///
/// Rejects self-parenting and any assignment that would close a cycle
/// through the ancestor chain (A → B → A and longer). An unknown parent id
/// is allowed: assembly treats it as a root, so the write cannot hide
/// anything.
///
/// # Errors
///
/// [`CatalogError::Conflict`] naming the violation.
pub fn validate_parent(
    categories: &[Category],
    id: CategoryId,
    new_parent: Option<CategoryId>,
) -> Result<()> {
    let Some(parent) = new_parent else {
        return Ok(());
    };

    if parent == id {
        return Err(CatalogError::Conflict(format!(
            "category {id} cannot be its own parent"
        )));
    }

    let parent_of: HashMap<CategoryId, Option<CategoryId>> =
        categories.iter().map(|c| (c.id, c.parent_id)).collect();

    // Walk up from the proposed parent. Reaching the category being updated
    // means the assignment closes a cycle. The visited set terminates the
    // walk even if the stored chain already contains one.
    let mut visited = HashSet::new();
    let mut current = Some(parent);
    while let Some(ancestor) = current {
        if ancestor == id {
            return Err(CatalogError::Conflict(format!(
                "setting parent {parent} on category {id} would create a cycle"
            )));
        }
        if !visited.insert(ancestor) {
            break;
        }
        current = parent_of.get(&ancestor).copied().flatten();
    }

    Ok(())
}
