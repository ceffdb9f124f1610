//! Grouping strategies assigning paths to output documents.

use std::num::NonZeroUsize;

use indexmap::{IndexMap, IndexSet};
use serde_json::{Map, Value};

/// Reserved group collecting paths without any operation tag.
pub const UNTAGGED_GROUP: &str = "untagged";

/// Reserved group for the bare root path.
pub const ROOT_GROUP: &str = "root";

/// Path-entry keys that describe the path itself rather than an operation.
const NON_OPERATION_KEYS: [&str; 3] = ["summary", "description", "parameters"];

/// Partitions or covers a set of paths into named groups.
///
/// Implementations must be deterministic: identical input yields the
/// same groups, in the same order, on every run.
pub trait GroupingStrategy {
    /// Assigns every path key of `paths` to one or more named groups.
    ///
    /// Group order and per-group path order follow first encounter.
    fn groups(&self, paths: &Map<String, Value>) -> IndexMap<String, Vec<String>>;

    /// Name of the fallback group reserved by this strategy.
    fn reserved_group(&self) -> &'static str;
}

/// Groups paths by the tags declared on their operations.
///
/// A path carrying several distinct tags is appended to the group of
/// *each* tag, so tag groups form a cover of the path set rather than a
/// partition. Paths whose operations declare no tag at all fall into
/// the reserved [`UNTAGGED_GROUP`], emitted last when non-empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagGrouping;

impl TagGrouping {
    /// Union of the tags declared on every operation of a path entry.
    ///
    /// Vendor-extension keys (`x-…`) and descriptive keys are not
    /// operations; non-mapping values are skipped. The set keeps
    /// first-encountered order.
    fn path_tags(operations: &Map<String, Value>) -> IndexSet<String> {
        let mut tags = IndexSet::new();
        for (method, operation) in operations {
            if method.starts_with("x-") || NON_OPERATION_KEYS.contains(&method.as_str()) {
                continue;
            }
            let Value::Object(operation) = operation else {
                continue;
            };
            let Some(Value::Array(declared)) = operation.get("tags") else {
                continue;
            };
            for tag in declared {
                if let Value::String(tag) = tag {
                    tags.insert(tag.clone());
                }
            }
        }
        tags
    }
}

impl GroupingStrategy for TagGrouping {
    fn groups(&self, paths: &Map<String, Value>) -> IndexMap<String, Vec<String>> {
        let mut groups: IndexMap<String, Vec<String>> = IndexMap::new();
        let mut untagged = Vec::new();

        for (path, entry) in paths {
            let tags = match entry {
                Value::Object(operations) => Self::path_tags(operations),
                _ => IndexSet::new(),
            };

            if tags.is_empty() {
                untagged.push(path.clone());
            } else {
                for tag in tags {
                    groups.entry(tag).or_default().push(path.clone());
                }
            }
        }

        if !untagged.is_empty() {
            groups.insert(UNTAGGED_GROUP.to_string(), untagged);
        }
        groups
    }

    fn reserved_group(&self) -> &'static str {
        UNTAGGED_GROUP
    }
}

/// Partitions paths by their first segments.
///
/// A path with at least `levels` non-empty segments groups under the
/// first `levels` segments rejoined with `/`; a shorter path groups
/// under its first segment alone; the bare root path groups under the
/// reserved [`ROOT_GROUP`]. Every path lands in exactly one group.
#[derive(Debug, Clone, Copy)]
pub struct PathPrefixGrouping {
    levels: NonZeroUsize,
}

impl PathPrefixGrouping {
    /// Creates a strategy grouping on the first `levels` path segments.
    #[must_use]
    pub fn new(levels: NonZeroUsize) -> Self {
        Self { levels }
    }

    fn group_name(&self, path: &str) -> String {
        let segments: Vec<&str> = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        if segments.len() >= self.levels.get() {
            segments
                .iter()
                .take(self.levels.get())
                .copied()
                .collect::<Vec<_>>()
                .join("/")
        } else if let Some(first) = segments.first() {
            (*first).to_string()
        } else {
            ROOT_GROUP.to_string()
        }
    }
}

impl GroupingStrategy for PathPrefixGrouping {
    fn groups(&self, paths: &Map<String, Value>) -> IndexMap<String, Vec<String>> {
        let mut groups: IndexMap<String, Vec<String>> = IndexMap::new();
        for path in paths.keys() {
            groups
                .entry(self.group_name(path))
                .or_default()
                .push(path.clone());
        }
        groups
    }

    fn reserved_group(&self) -> &'static str {
        ROOT_GROUP
    }
}
