//! Reference-graph resolution and grouping engine.
//!
//! This module turns one OpenAPI document into several self-contained
//! ones. Each output document carries the shared top-level sections,
//! the paths of one group, and exactly the component definitions that
//! group can reach: no unused entries, no missing ones.
//!
//! # Overview
//!
//! Splitting runs through a fixed pipeline:
//!
//! 1. a [`GroupingStrategy`] assigns every path to one or more named
//!    groups, by operation tag ([`TagGrouping`]) or by path prefix
//!    ([`PathPrefixGrouping`]);
//! 2. for each group, [`BaseSpec::assemble`] copies the shared
//!    sections, narrows the paths and tag metadata, and collects the
//!    `$ref` pointers the new document contains ([`scan_refs`]);
//! 3. the [`ComponentResolver`] closes that reference set transitively
//!    over the full component table and projects the table down to
//!    exactly the reachable definitions.
//!
//! The [`SpecSplitter`] sequences the whole run and hands every
//! finished document to the writer.
//!
//! # Example
//!
//! ```rust,no_run
//! use apisplit_core::{OutputFormat, SpecSplitter, SplitMethod};
//! use std::num::NonZeroUsize;
//!
//! # fn main() -> Result<(), apisplit_core::SplitError> {
//! let mut splitter = SpecSplitter::new("openapi.yaml", "split_specs", OutputFormat::Yaml)?;
//! let levels = NonZeroUsize::new(2).expect("non-zero");
//! let created = splitter.split(SplitMethod::PathPrefix(levels))?;
//! # Ok(())
//! # }
//! ```

mod assembler;
mod reference;
mod resolver;
mod splitter;
mod strategies;

pub use assembler::BaseSpec;
pub use reference::{ComponentRef, scan_refs};
pub use resolver::ComponentResolver;
pub use splitter::{SpecSplitter, SplitMethod, sanitize_group_name};
pub use strategies::{
    GroupingStrategy, PathPrefixGrouping, ROOT_GROUP, TagGrouping, UNTAGGED_GROUP,
};
