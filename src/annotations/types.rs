//! Canonical annotation shapes
//!
//! Every record coming from the annotation API is mapped into these types
//! before the feed, reply and anchor logic sees it. Selectors follow the
//! W3C Web Annotation Data Model.
//!
//! Reference: <https://www.w3.org/TR/annotation-model/#selectors>

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity of a record: its stable URI and/or a legacy id
///
/// Values are trimmed and empty strings are treated as absent, so callers
/// never have to care which of the two fields a record happened to carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Identity {
    #[serde(skip_serializing_if = "Option::is_none")]
    uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
}

impl Identity {
    /// Build an identity from optional uri/id values
    pub fn new(uri: Option<&str>, id: Option<&str>) -> Self {
        Self {
            uri: clean(uri),
            id: clean(id),
        }
    }

    /// Identity carrying only a URI
    pub fn from_uri(uri: &str) -> Self {
        Self::new(Some(uri), None)
    }

    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Preferred key: the URI, falling back to the legacy id
    pub fn primary(&self) -> Option<&str> {
        self.uri().or_else(|| self.id())
    }

    /// All present keys, URI first
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.uri().into_iter().chain(self.id())
    }

    /// Whether this identity has at least one key
    pub fn is_resolvable(&self) -> bool {
        self.uri.is_some() || self.id.is_some()
    }

    /// Whether `probe` names this record by either key
    pub fn matches(&self, probe: &str) -> bool {
        let probe = probe.trim();
        !probe.is_empty() && self.keys().any(|key| key == probe)
    }
}

fn clean(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Reference to an actor (DID or handle)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AuthorRef(String);

impl AuthorRef {
    pub fn new(value: &str) -> Self {
        Self(value.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Text quote with optional disambiguation context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextQuoteSelector {
    /// The exact text that was highlighted
    #[serde(default)]
    pub exact: String,
    /// Text before the selection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Text after the selection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

impl TextQuoteSelector {
    pub fn new(exact: &str, prefix: Option<&str>, suffix: Option<&str>) -> Self {
        Self {
            exact: exact.to_string(),
            prefix: prefix.map(|s| s.to_string()),
            suffix: suffix.map(|s| s.to_string()),
        }
    }

    /// A quote can only anchor anything when `exact` is non-empty
    pub fn is_usable(&self) -> bool {
        !self.exact.is_empty()
    }
}

/// Selector types for locating a passage on the target page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Selector {
    /// Text quote with context
    #[serde(rename = "TextQuoteSelector")]
    TextQuote(TextQuoteSelector),
    /// Character offsets within the page text
    #[serde(rename = "TextPositionSelector")]
    TextPosition {
        start: usize,
        end: usize,
    },
    /// Media fragment / element id
    #[serde(rename = "FragmentSelector")]
    Fragment {
        value: String,
    },
    /// Any selector type this service does not interpret
    #[serde(other)]
    Unsupported,
}

impl Selector {
    /// Shorthand for a quote selector
    pub fn text_quote(exact: &str, prefix: Option<&str>, suffix: Option<&str>) -> Self {
        Selector::TextQuote(TextQuoteSelector::new(exact, prefix, suffix))
    }

    pub fn as_text_quote(&self) -> Option<&TextQuoteSelector> {
        match self {
            Selector::TextQuote(quote) => Some(quote),
            _ => None,
        }
    }
}

/// The page an item points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
    /// Page URL
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<Selector>,
}

impl Target {
    pub fn page(source: &str) -> Self {
        Self {
            source: source.to_string(),
            selector: None,
        }
    }

    pub fn with_selector(source: &str, selector: Selector) -> Self {
        Self {
            source: source.to_string(),
            selector: Some(selector),
        }
    }
}

/// Content shared by annotations, highlights and bookmarks
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemContent {
    #[serde(flatten)]
    pub identity: Identity,
    pub author: AuthorRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,
    /// Note body (annotations)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Page title (bookmarks)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Highlight color (CSS color value)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl ItemContent {
    pub fn new(identity: Identity, author: AuthorRef) -> Self {
        Self {
            identity,
            author,
            created_at: None,
            target: None,
            text: None,
            title: None,
            color: None,
        }
    }

    pub fn with_target(mut self, target: Target) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// The quote selector of the target, if any
    pub fn text_quote(&self) -> Option<&TextQuoteSelector> {
        self.target
            .as_ref()
            .and_then(|t| t.selector.as_ref())
            .and_then(Selector::as_text_quote)
    }
}
