//! learnview - browser for repository learnings documents.
//!
//! Learnings files are JSON arrays of `{type, summary, data}` records. The
//! viewer discovers which files are available, offers the ones mentioning
//! a configured search term in a configured category, and renders the
//! chosen category as HTML with the search term highlighted.

pub mod config;
pub mod discovery;
pub mod error;
pub mod model;
pub mod render;
pub mod server;
pub mod sources;
pub mod ui;
pub mod viewer;

pub use discovery::{DiscoveryOrigin, DiscoveryReport};
pub use error::{ConfigError, DiscoveryError, SourceError, ViewerError};
pub use model::{Document, Entry, FilterConfig};
pub use sources::{DocumentLoader, DocumentSource};
pub use viewer::{ContentViewer, Selection, ViewerState};
