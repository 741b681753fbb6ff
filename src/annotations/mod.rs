//! Annotation module
//!
//! Canonical record shapes shared by the feed, reply and anchor logic,
//! plus the wire structs that normalize raw API records into them.
//!
//! # Features
//!
//! - Identities that accept either a stable URI or a legacy id
//! - W3C selectors (TextQuote, TextPosition, Fragment)
//! - Lenient parsing of author, body and selector variants

mod types;
mod wire;

pub use types::{AuthorRef, Identity, ItemContent, Selector, Target, TextQuoteSelector};
pub use wire::{author_or_default, pick_selector, RawAuthor, RawBody, RawItem, RawRef, RawTarget};
