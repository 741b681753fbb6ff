//! Raw feed entries as returned by the annotation API

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::types::{CollectionEntry, EmbeddedItem, FeedItem};
use crate::annotations::{author_or_default, Identity, RawAuthor, RawItem};

/// Feed entry discriminated by its `type` field
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum RawFeedItem {
    Annotation(RawItem),
    Highlight(RawItem),
    Bookmark(RawItem),
    CollectionItem(RawCollectionItem),
}

/// Item kinds accepted inside a collection wrapper
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum RawEmbeddedItem {
    Annotation(RawItem),
    Highlight(RawItem),
    Bookmark(RawItem),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCollectionItem {
    pub uri: Option<String>,
    pub id: Option<String>,
    #[serde(alias = "author", alias = "creator")]
    pub author_ref: Option<RawAuthor>,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub collection_ref: String,
    #[serde(alias = "addedBy")]
    pub added_by_ref: Option<RawAuthor>,
    #[serde(alias = "item")]
    pub inner_item: RawEmbeddedItem,
}

impl From<RawEmbeddedItem> for EmbeddedItem {
    fn from(raw: RawEmbeddedItem) -> Self {
        match raw {
            RawEmbeddedItem::Annotation(item) => EmbeddedItem::Annotation(item.into()),
            RawEmbeddedItem::Highlight(item) => EmbeddedItem::Highlight(item.into()),
            RawEmbeddedItem::Bookmark(item) => EmbeddedItem::Bookmark(item.into()),
        }
    }
}

impl From<RawCollectionItem> for CollectionEntry {
    fn from(raw: RawCollectionItem) -> Self {
        let author = author_or_default(raw.author_ref);
        // The wrapper's creator is the one who added the item unless stated otherwise
        let added_by_ref = raw
            .added_by_ref
            .map(RawAuthor::into_author)
            .unwrap_or_else(|| author.clone());

        CollectionEntry {
            identity: Identity::new(raw.uri.as_deref(), raw.id.as_deref()),
            author,
            created_at: raw.created_at,
            collection_ref: raw.collection_ref.trim().to_string(),
            added_by_ref,
            inner_item: raw.inner_item.into(),
        }
    }
}

impl From<RawFeedItem> for FeedItem {
    fn from(raw: RawFeedItem) -> Self {
        match raw {
            RawFeedItem::Annotation(item) => FeedItem::Annotation(item.into()),
            RawFeedItem::Highlight(item) => FeedItem::Highlight(item.into()),
            RawFeedItem::Bookmark(item) => FeedItem::Bookmark(item.into()),
            RawFeedItem::CollectionItem(entry) => FeedItem::CollectionItem(entry.into()),
        }
    }
}

/// Normalize a raw page into canonical feed items, keeping order
pub fn normalize_items(raw: Vec<RawFeedItem>) -> Vec<FeedItem> {
    raw.into_iter().map(FeedItem::from).collect()
}
