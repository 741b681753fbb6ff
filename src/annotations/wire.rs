//! Wire shapes returned by the annotation API
//!
//! Records in the wild are loosely shaped: identities arrive as `uri` or a
//! legacy `id`, note text as `text` or `body.value`, authors as a bare DID or
//! a profile object. These structs accept all of that and convert into the
//! canonical types in [`super::types`].

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::types::{AuthorRef, Identity, ItemContent, Selector, Target};

/// Author as either a bare DID/handle or a profile object
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawAuthor {
    Ref(String),
    Profile {
        did: Option<String>,
        handle: Option<String>,
    },
}

impl RawAuthor {
    pub fn into_author(self) -> AuthorRef {
        match self {
            RawAuthor::Ref(value) => AuthorRef::new(&value),
            RawAuthor::Profile { did, handle } => {
                AuthorRef::new(did.or(handle).as_deref().unwrap_or_default())
            }
        }
    }
}

/// Convert an optional wire author, defaulting to an empty reference
pub fn author_or_default(author: Option<RawAuthor>) -> AuthorRef {
    author.map(RawAuthor::into_author).unwrap_or_default()
}

/// Reference to another record: a bare URI or a `{uri, id}` strong ref
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawRef {
    Plain(String),
    Strong {
        uri: Option<String>,
        id: Option<String>,
    },
}

impl RawRef {
    pub fn into_identity(self) -> Identity {
        match self {
            RawRef::Plain(value) => Identity::from_uri(&value),
            RawRef::Strong { uri, id } => Identity::new(uri.as_deref(), id.as_deref()),
        }
    }
}

/// W3C-style body carrying the note text
#[derive(Debug, Clone, Deserialize)]
pub struct RawBody {
    pub value: Option<String>,
}

/// Target as sent by the API; `selector` may be a single object or a list
#[derive(Debug, Clone, Deserialize)]
pub struct RawTarget {
    pub source: Option<String>,
    pub selector: Option<Value>,
}

impl RawTarget {
    pub fn into_target(self) -> Option<Target> {
        let source = self.source?.trim().to_string();
        Some(Target {
            source,
            selector: self.selector.and_then(pick_selector),
        })
    }
}

/// Pick the most useful selector out of a raw selector value
///
/// A quote selector wins when a list offers several; anything that fails to
/// parse is ignored rather than rejecting the whole record.
pub fn pick_selector(value: Value) -> Option<Selector> {
    match value {
        Value::Array(values) => {
            let selectors: Vec<Selector> = values.into_iter().filter_map(parse_selector).collect();
            let best = selectors
                .iter()
                .position(|s| s.as_text_quote().is_some())
                .unwrap_or(0);
            selectors.into_iter().nth(best)
        }
        other => parse_selector(other),
    }
}

fn parse_selector(value: Value) -> Option<Selector> {
    match serde_json::from_value(value) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::debug!("Ignoring malformed selector: {}", e);
            None
        }
    }
}

/// Annotation, highlight or bookmark as sent by the API
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawItem {
    pub uri: Option<String>,
    pub id: Option<String>,
    #[serde(alias = "author", alias = "creator")]
    pub author_ref: Option<RawAuthor>,
    pub created_at: Option<DateTime<Utc>>,
    pub target: Option<RawTarget>,
    /// Bookmarks may carry the page URL directly
    pub source: Option<String>,
    pub text: Option<String>,
    pub body: Option<RawBody>,
    pub title: Option<String>,
    pub color: Option<String>,
}

impl From<RawItem> for ItemContent {
    fn from(raw: RawItem) -> Self {
        let target = raw
            .target
            .and_then(RawTarget::into_target)
            .or_else(|| raw.source.as_deref().map(|s| Target::page(s.trim())));

        ItemContent {
            identity: Identity::new(raw.uri.as_deref(), raw.id.as_deref()),
            author: author_or_default(raw.author_ref),
            created_at: raw.created_at,
            target,
            text: raw.text.or_else(|| raw.body.and_then(|b| b.value)),
            title: raw.title,
            color: raw.color,
        }
    }
}
