//! Reply record and tree node types

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::annotations::AuthorRef;

/// One reply as fetched in a flat batch for a thread root
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRecord {
    /// The reply's own URI, or its legacy id when it has no URI
    pub identity: String,
    /// Legacy id of a reply that also has a URI; children may name either
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legacy_id: Option<String>,
    /// The thread root or another reply
    pub parent_identity: String,
    pub root_identity: String,
    pub author: AuthorRef,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ReplyRecord {
    pub fn new(identity: &str, parent_identity: &str, root_identity: &str) -> Self {
        Self {
            identity: identity.trim().to_string(),
            legacy_id: None,
            parent_identity: parent_identity.trim().to_string(),
            root_identity: root_identity.trim().to_string(),
            author: AuthorRef::default(),
            text: String::new(),
            created_at: None,
        }
    }

    pub fn with_legacy_id(mut self, id: &str) -> Self {
        let id = id.trim();
        self.legacy_id = (!id.is_empty() && id != self.identity).then(|| id.to_string());
        self
    }

    /// Keys a child may use to name this reply as its parent, identity first
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.identity.as_str())
            .chain(self.legacy_id.as_deref())
            .filter(|key| !key.is_empty())
    }

    pub fn with_author(mut self, author: AuthorRef) -> Self {
        self.author = author;
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }
}

/// A reply plus its direct replies
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplyNode {
    #[serde(flatten)]
    pub record: ReplyRecord,
    pub children: Vec<ReplyNode>,
}

impl ReplyNode {
    pub fn identity(&self) -> &str {
        &self.record.identity
    }

    /// Number of replies below this node, at any depth
    pub fn reply_count(&self) -> usize {
        count_nodes(&self.children)
    }
}

impl Drop for ReplyNode {
    // Long reply chains would otherwise recurse once per level while dropping
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Total number of nodes in a forest
pub fn count_nodes(forest: &[ReplyNode]) -> usize {
    let mut stack: Vec<&ReplyNode> = forest.iter().collect();
    let mut count = 0;
    while let Some(node) = stack.pop() {
        count += 1;
        stack.extend(node.children.iter());
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, children: Vec<ReplyNode>) -> ReplyNode {
        ReplyNode {
            record: ReplyRecord::new(id, "root", "root"),
            children,
        }
    }

    #[test]
    fn test_counts() {
        let forest = vec![
            node("r1", vec![node("r2", vec![node("r3", vec![])]), node("r4", vec![])]),
            node("r5", vec![]),
        ];
        assert_eq!(count_nodes(&forest), 5);
        assert_eq!(forest[0].reply_count(), 3);
        assert_eq!(forest[1].reply_count(), 0);
    }

    #[test]
    fn test_record_trims_identities() {
        let record = ReplyRecord::new(" at://r/1 ", "at://root ", "at://root");
        assert_eq!(record.identity, "at://r/1");
        assert_eq!(record.parent_identity, "at://root");
    }

    #[test]
    fn test_keys() {
        let record = ReplyRecord::new("at://r/1", "root", "root").with_legacy_id(" legacy-1 ");
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["at://r/1", "legacy-1"]);

        // A legacy id equal to the identity adds nothing
        let same = ReplyRecord::new("r1", "root", "root").with_legacy_id("r1");
        assert_eq!(same.legacy_id, None);

        let anonymous = ReplyRecord::new("", "root", "root");
        assert_eq!(anonymous.keys().count(), 0);
    }

    #[test]
    fn test_node_serialization() {
        let tree = node(
            "r1",
            vec![ReplyNode {
                record: ReplyRecord::new("r2", "r1", "root").with_text("hi"),
                children: Vec::new(),
            }],
        );
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["identity"], "r1");
        assert_eq!(json["parentIdentity"], "root");
        assert_eq!(json["children"][0]["text"], "hi");
        assert_eq!(json["children"][0]["children"], serde_json::json!([]));
        assert!(json.get("legacyId").is_none());
    }

    #[test]
    fn test_deep_chain_drops_without_overflow() {
        let mut tree = node("r0", vec![]);
        for i in 1..200_000 {
            tree = node(&format!("r{i}"), vec![tree]);
        }
        assert_eq!(tree.reply_count(), 199_999);
        drop(tree);
    }
}
