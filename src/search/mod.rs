//! Query algorithms over an opened corpus
//!
//! - [`range`]: binary search for the occurrence range of a query
//! - [`boundary`]: document IDs for matched offsets
//! - [`context`]: byte windows around matches
//! - [`retrieve`]: document bodies by ID
//! - [`scan`]: the tag scanning primitive shared by the above

pub mod boundary;
pub mod context;
pub mod range;
pub mod retrieve;
pub mod scan;

pub use boundary::{document_set, find_document_id, find_documents};
pub use context::{ContextLimits, Snippet, Snippets, nearby_words};
pub use range::{TruncationPolicy, count_occurrences};
pub use retrieve::{DocumentSink, document_text, retrieve_documents};
pub use scan::TagScanner;
