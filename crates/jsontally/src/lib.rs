//! # jsontally
//!
//! Typed, read-tracked access to JSON documents, plus deep overwrite of one
//! document by another.
//!
//! Configuration files tend to collect attributes nobody reads any more, or
//! attributes with a typo in their name. jsontally wraps a parsed document so
//! that every successful typed read is counted; after loading, the
//! application asks which declared paths were never read and reports them.
//!
//! ## Architecture
//!
//! - **Value model**: `Value` tags each node with its JSON kind and keeps the
//!   numeric width it was parsed with
//! - **Coercion**: widening numeric rules plus "anything to string"
//! - **Tracked containers**: `TrackedObject` / `TrackedArray` count reads per entry
//! - **Visit tracking**: the `Visited` trait reports never-read paths
//! - **Merge**: `overwrite` builds a new tree from a base and its overwrites
//! - **Boundary**: parsing, rendering and file I/O through `serde_json`
//!
//! ## Example
//!
//! ```
//! use jsontally::{MergeOptions, TrackedObject, Visited};
//!
//! let defaults = TrackedObject::parse(r#"{"port": 8080, "hosts": [{"id": "a", "w": 1}]}"#)?;
//! let local = TrackedObject::parse(r#"{"hosts": [{"id": "a", "w": 5}]}"#)?;
//!
//! let config = defaults.overwrite_with(&local, &MergeOptions::with_identity_key("id"));
//! assert_eq!(config.get::<i32>("port")?, Some(8080));
//!
//! if let Some(hosts) = config.get_array("hosts")? {
//!     let first = hosts.get_object(0)?.expect("one host");
//!     assert_eq!(first.get::<String>("id")?.as_deref(), Some("a"));
//!     assert_eq!(first.get::<i32>("w")?, Some(5));
//! }
//!
//! assert!(config.never_visited().is_empty());
//! # Ok::<(), jsontally::JsonTallyError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod coerce;
pub mod equality;
pub mod error;
pub mod io;
pub mod merge;
pub mod options;
pub mod report;
pub mod tracked;
pub mod value;
pub mod visit;

// Re-export main types
pub use coerce::{coerce, FromValue};
pub use equality::structurally_equal;
pub use error::{kind_name, JsonTallyError, Result};
pub use io::{
    parse_array, parse_object, read_array_file, read_object_file, strip_comments, write_file,
};
pub use merge::overwrite;
pub use options::{MergeOptions, ReadOptions};
pub use report::{DocumentReport, ValidationReport};
pub use tracked::{TrackedArray, TrackedObject};
pub use value::{Value, ValueKind};
pub use visit::Visited;

/// jsontally version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
