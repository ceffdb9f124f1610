//! # apisplit core
//!
//! Split a large OpenAPI specification into smaller, self-contained
//! documents, grouped either by operation tag or by path prefix.
//!
//! Every output document remains independently usable: it keeps the
//! shared metadata (version marker, info, servers, security, tag
//! metadata), the paths of its group, and the minimal subset of
//! `components` definitions transitively reachable from that content.
//! Unused definitions are dropped; referenced ones are kept, including
//! indirect, chained references.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::num::NonZeroUsize;
//! use apisplit_core::{OutputFormat, SpecSplitter, SplitMethod};
//!
//! # fn main() -> Result<(), apisplit_core::SplitError> {
//! let mut splitter = SpecSplitter::new("openapi.yaml", "split_specs", OutputFormat::Yaml)?;
//!
//! // One file per tag, plus `untagged` for paths without any tag.
//! let created = splitter.split(SplitMethod::Tags)?;
//! assert!(!created.is_empty());
//!
//! // Or: one file per 2-level path prefix.
//! let levels = NonZeroUsize::new(2).expect("non-zero");
//! let mut splitter = SpecSplitter::new("openapi.yaml", "split_specs", OutputFormat::Yaml)?;
//! let created = splitter.split(SplitMethod::PathPrefix(levels))?;
//! assert!(!created.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! ## Pieces
//!
//! The engine lives in [`split`]: the reference scanner
//! ([`split::scan_refs`]), the transitive [`split::ComponentResolver`],
//! the two [`split::GroupingStrategy`] implementations and the
//! [`SpecSplitter`] orchestrator. Document loading and writing (YAML or
//! JSON, order-preserving) live in the crate root next to
//! [`OutputFormat`].
//!
//! Documents are plain [`serde_json::Value`] trees; mapping order is
//! preserved end to end so repeated runs over the same input produce
//! identical files.
//!
//! ## Tolerated inputs
//!
//! Splitting never validates: absent top-level sections become empty
//! defaults, and `$ref` pointers naming a component that does not exist
//! are skipped silently rather than failing the run.

mod document;
mod error;

pub mod split;

pub use document::{OutputFormat, load_document, write_document};
pub use error::SplitError;
pub use split::{SpecSplitter, SplitMethod};
