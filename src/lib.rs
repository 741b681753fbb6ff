//! Margin Server Library
//!
//! View-model logic for a social web-annotation client. The server binary
//! in main.rs exposes it over HTTP.
//!
//! # Modules
//!
//! - `anchor`: quote selectors to text-fragment deep links
//! - `feed`: feed page normalization and collection de-duplication
//! - `replies`: flat reply batches to nested reply trees
//! - `annotations`: canonical record shapes shared by the above

pub mod anchor;
pub mod annotations;
pub mod config;
pub mod error;
pub mod feed;
pub mod replies;
pub mod routes;
pub mod state;
