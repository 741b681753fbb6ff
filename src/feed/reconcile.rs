//! Feed reconciliation
//!
//! A single annotation can be both a bare feed entry and a member of one or
//! more collections. Within one page, the collection wrapper wins and the
//! bare entry is hidden so the same content never renders twice.

use std::collections::HashSet;

use super::types::{FeedItem, FeedPage};

/// Outcome counts of one reconciliation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub kept: usize,
    pub hidden: usize,
}

/// Drop standalone items already visible inside a collection wrapper
pub fn reconcile(items: Vec<FeedItem>) -> Vec<FeedItem> {
    reconcile_with_report(items).0
}

/// [`reconcile`], also reporting how many entries were hidden
pub fn reconcile_with_report(items: Vec<FeedItem>) -> (Vec<FeedItem>, ReconcileReport) {
    // A wrapper may come after the item it duplicates, so collect first
    let keep: Vec<bool> = {
        let embedded = embedded_identities(&items);
        items.iter().map(|item| is_visible(item, &embedded)).collect()
    };

    let hidden = keep.iter().filter(|visible| !**visible).count();
    if hidden > 0 {
        tracing::debug!(hidden, "Hiding feed items already shown inside a collection");
    }

    let kept: Vec<FeedItem> = items
        .into_iter()
        .zip(keep)
        .filter_map(|(item, visible)| visible.then_some(item))
        .collect();

    let report = ReconcileReport {
        kept: kept.len(),
        hidden,
    };
    (kept, report)
}

/// Reconcile one fetched page; the cursor passes through untouched
pub fn reconcile_page(page: FeedPage) -> (FeedPage, ReconcileReport) {
    let (items, report) = reconcile_with_report(page.items);
    (
        FeedPage {
            items,
            cursor: page.cursor,
        },
        report,
    )
}

/// Remove an item from an in-memory page after it was deleted
///
/// Removes standalone entries named by `identity` and collection wrappers
/// whose own identity or embedded item matches. Returns how many entries
/// were removed.
pub fn remove_item(items: &mut Vec<FeedItem>, identity: &str) -> usize {
    let before = items.len();
    items.retain(|item| !item.references(identity));
    before - items.len()
}

fn embedded_identities(items: &[FeedItem]) -> HashSet<&str> {
    items
        .iter()
        .filter_map(FeedItem::embedded)
        .flat_map(|inner| inner.identity().keys())
        .collect()
}

fn is_visible(item: &FeedItem, embedded: &HashSet<&str>) -> bool {
    if item.is_collection_item() {
        return true;
    }
    !item.identity().keys().any(|key| embedded.contains(key))
}
