//! # Quarry - substring occurrence queries over a suffix array
//!
//! Quarry answers "how many times does X occur, where, and in which
//! documents" over a large immutable corpus. It uses a suffix array built
//! ahead of time and memory-maps every file instead of loading it.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`index`] - The corpus, packed suffix array and size index on disk
//! - [`search`] - Range search, document resolution, context and retrieval
//! - [`api`] - Path-based entry points for serving layers
//! - [`batch`] - Query files run through the entry points
//! - [`config`] - Query tuning loaded from the app data directory
//! - [`output`] - JSON, CSV and terminal formatting for the CLI
//!
//! ## Quick Start
//!
//! ```no_run
//! use quarry::api;
//!
//! let outcome = api::query("data/wiki40b.test", b"suffix array").unwrap();
//! if outcome.count > 0 {
//!     let snippets = api::context("data/wiki40b.test", outcome.first_index(), outcome.last_index(), 12).unwrap();
//!     let doc_ids = api::documents("data/wiki40b.test", outcome.first_index(), outcome.last_index()).unwrap();
//!     println!("{} hits in {} documents, {} snippets", outcome.count, doc_ids.len(), snippets.len());
//! }
//! ```

pub mod api;
pub mod batch;
pub mod config;
pub mod error;
pub mod index;
pub mod output;
pub mod search;
pub mod utils;

#[cfg(test)]
mod testkit;

pub use api::{Quarry, QueryOutcome};
pub use config::QueryConfig;
pub use error::{Error, ErrorKind, Result};
