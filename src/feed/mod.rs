//! Feed module
//!
//! A feed page mixes standalone annotations, highlights and bookmarks with
//! collection wrappers that embed those same item kinds. This module
//! normalizes raw pages and reconciles them so embedded content is shown
//! only once per page.

mod reconcile;
mod types;
mod wire;

pub use reconcile::{reconcile, reconcile_page, reconcile_with_report, remove_item, ReconcileReport};
pub use types::{CollectionEntry, EmbeddedItem, FeedItem, FeedPage};
pub use wire::{normalize_items, RawCollectionItem, RawEmbeddedItem, RawFeedItem};
