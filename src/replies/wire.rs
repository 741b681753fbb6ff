//! Raw reply records as returned by the annotation API

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::types::ReplyRecord;
use crate::annotations::{author_or_default, Identity, RawAuthor, RawBody, RawRef};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReply {
    pub uri: Option<String>,
    pub id: Option<String>,
    pub parent_uri: Option<String>,
    pub parent_id: Option<String>,
    /// Strong ref or bare URI of the parent
    pub parent: Option<RawRef>,
    pub root_uri: Option<String>,
    pub root_id: Option<String>,
    pub root: Option<RawRef>,
    #[serde(alias = "author", alias = "creator")]
    pub author_ref: Option<RawAuthor>,
    pub text: Option<String>,
    pub body: Option<RawBody>,
    pub created_at: Option<DateTime<Utc>>,
}

impl RawReply {
    /// Normalize into a [`ReplyRecord`]
    ///
    /// `thread_root` fills in the root when the record does not name one,
    /// which also makes a reply without any parent reference a direct reply
    /// to the root.
    pub fn into_record(self, thread_root: &str) -> ReplyRecord {
        let identity = Identity::new(self.uri.as_deref(), self.id.as_deref());
        let parent = first_key(self.parent_uri, self.parent, self.parent_id);
        let root = first_key(self.root_uri, self.root, self.root_id);
        let thread_root = thread_root.trim();

        let root = root.unwrap_or_else(|| thread_root.to_string());
        let parent = parent.unwrap_or_else(|| root.clone());

        // With both keys present the uri is the identity and the id is kept
        // so that children naming the legacy id still resolve
        let legacy_id = identity.uri().and(identity.id()).map(str::to_string);

        ReplyRecord {
            identity: identity.primary().unwrap_or_default().to_string(),
            legacy_id,
            parent_identity: parent,
            root_identity: root,
            author: author_or_default(self.author_ref),
            text: self
                .text
                .or_else(|| self.body.and_then(|b| b.value))
                .unwrap_or_default(),
            created_at: self.created_at,
        }
    }
}

fn first_key(uri: Option<String>, reference: Option<RawRef>, id: Option<String>) -> Option<String> {
    let from_uri = Identity::new(uri.as_deref(), None);
    let from_ref = reference.map(RawRef::into_identity).unwrap_or_default();
    let from_id = Identity::new(None, id.as_deref());

    [from_uri, from_ref, from_id]
        .iter()
        .find_map(|identity| identity.primary().map(str::to_string))
}

/// Normalize a raw batch, keeping order
pub fn normalize_replies(raw: Vec<RawReply>, thread_root: &str) -> Vec<ReplyRecord> {
    raw.into_iter().map(|r| r.into_record(thread_root)).collect()
}
