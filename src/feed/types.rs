//! Feed entry types

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::annotations::{AuthorRef, Identity, ItemContent};

/// One entry of a feed page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum FeedItem {
    Annotation(ItemContent),
    Highlight(ItemContent),
    Bookmark(ItemContent),
    /// Wrapper recording that an item was added to a collection
    CollectionItem(CollectionEntry),
}

/// Item kinds that may appear inside a collection wrapper
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum EmbeddedItem {
    Annotation(ItemContent),
    Highlight(ItemContent),
    Bookmark(ItemContent),
}

/// A collection wrapper and the item it embeds
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionEntry {
    #[serde(flatten)]
    pub identity: Identity,
    pub author: AuthorRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub collection_ref: String,
    pub added_by_ref: AuthorRef,
    pub inner_item: EmbeddedItem,
}

impl CollectionEntry {
    pub fn new(identity: Identity, collection_ref: &str, inner_item: EmbeddedItem) -> Self {
        Self {
            identity,
            author: AuthorRef::default(),
            created_at: None,
            collection_ref: collection_ref.trim().to_string(),
            added_by_ref: AuthorRef::default(),
            inner_item,
        }
    }

    pub fn added_by(mut self, author: AuthorRef) -> Self {
        self.author = author.clone();
        self.added_by_ref = author;
        self
    }
}

impl EmbeddedItem {
    pub fn content(&self) -> &ItemContent {
        match self {
            EmbeddedItem::Annotation(c) | EmbeddedItem::Highlight(c) | EmbeddedItem::Bookmark(c) => c,
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.content().identity
    }
}

impl From<EmbeddedItem> for FeedItem {
    fn from(item: EmbeddedItem) -> Self {
        match item {
            EmbeddedItem::Annotation(c) => FeedItem::Annotation(c),
            EmbeddedItem::Highlight(c) => FeedItem::Highlight(c),
            EmbeddedItem::Bookmark(c) => FeedItem::Bookmark(c),
        }
    }
}

impl FeedItem {
    /// The entry's own identity (the wrapper's, for collection items)
    pub fn identity(&self) -> &Identity {
        match self {
            FeedItem::Annotation(c) | FeedItem::Highlight(c) | FeedItem::Bookmark(c) => &c.identity,
            FeedItem::CollectionItem(entry) => &entry.identity,
        }
    }

    /// The embedded item, for collection wrappers
    pub fn embedded(&self) -> Option<&EmbeddedItem> {
        match self {
            FeedItem::CollectionItem(entry) => Some(&entry.inner_item),
            _ => None,
        }
    }

    pub fn is_collection_item(&self) -> bool {
        matches!(self, FeedItem::CollectionItem(_))
    }

    /// Whether `probe` names this entry or, for wrappers, the item inside it
    pub fn references(&self, probe: &str) -> bool {
        self.identity().matches(probe)
            || self
                .embedded()
                .is_some_and(|inner| inner.identity().matches(probe))
    }
}

/// One fetched page of the feed
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeedPage {
    pub items: Vec<FeedItem>,
    /// Opaque pagination cursor for the next page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotation(uri: &str) -> ItemContent {
        ItemContent::new(Identity::from_uri(uri), AuthorRef::new("did:plc:a"))
    }

    #[test]
    fn test_references_inner_item() {
        let wrapper = FeedItem::CollectionItem(CollectionEntry::new(
            Identity::from_uri("at://coll-item/1"),
            "at://collection/reading",
            EmbeddedItem::Highlight(annotation("at://hl/1")),
        ));

        assert!(wrapper.references("at://coll-item/1"));
        assert!(wrapper.references("at://hl/1"));
        assert!(!wrapper.references("at://hl/2"));
        assert!(wrapper.is_collection_item());
    }

    #[test]
    fn test_collection_item_serialization() {
        let wrapper = FeedItem::CollectionItem(
            CollectionEntry::new(
                Identity::from_uri("at://coll-item/1"),
                "at://collection/reading",
                EmbeddedItem::Bookmark(annotation("at://bm/1")),
            )
            .added_by(AuthorRef::new("did:plc:curator")),
        );

        let json = serde_json::to_value(&wrapper).unwrap();
        assert_eq!(json["type"], "CollectionItem");
        assert_eq!(json["uri"], "at://coll-item/1");
        assert_eq!(json["collectionRef"], "at://collection/reading");
        assert_eq!(json["addedByRef"], "did:plc:curator");
        assert_eq!(json["innerItem"]["type"], "Bookmark");
        assert_eq!(json["innerItem"]["uri"], "at://bm/1");
    }

    #[test]
    fn test_embedded_into_feed_item() {
        let item: FeedItem = EmbeddedItem::Annotation(annotation("at://a")).into();
        assert_eq!(item, FeedItem::Annotation(annotation("at://a")));
        assert!(item.embedded().is_none());
    }
}
