//! Local component references and the reference scanner.

use indexmap::IndexSet;
use serde_json::Value;

/// Mapping key marking a JSON Reference inside a document node.
pub(crate) const REF_KEY: &str = "$ref";

/// Prefix of pointers that resolve inside the local components section.
pub(crate) const LOCAL_COMPONENTS_PREFIX: &str = "#/components/";

/// Address of a reusable definition in the components section.
///
/// A reference is derived from a local pointer such as
/// `#/components/schemas/User`: the first segment after the prefix is
/// the component type, the remaining segments (rejoined with `/`) are
/// the component name. Pointers rooted elsewhere are external and out
/// of scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
#[display("{component_type}/{name}")]
pub struct ComponentRef {
    /// Component kind, e.g. `schemas` or `responses`.
    pub component_type: String,
    /// Component name; nested pointer segments stay joined with `/`.
    pub name: String,
}

impl ComponentRef {
    /// Creates a reference from its two parts.
    pub fn new(component_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            component_type: component_type.into(),
            name: name.into(),
        }
    }

    /// Parses a local pointer string.
    ///
    /// Returns `None` for pointers not rooted at the local components
    /// section, or with fewer than two segments after it.
    #[must_use]
    pub fn parse(pointer: &str) -> Option<Self> {
        let rest = pointer.strip_prefix(LOCAL_COMPONENTS_PREFIX)?;
        let (component_type, name) = rest.split_once('/')?;
        Some(Self::new(component_type, name))
    }
}

/// Collects every local component reference contained in `node`.
///
/// Structural recursion over the document tree: mappings and sequences
/// are descended (including the value under a `$ref` key, when that
/// value is itself a container), scalars contribute nothing. Pure
/// function; the returned set keeps discovery order.
#[must_use]
pub fn scan_refs(node: &Value) -> IndexSet<ComponentRef> {
    let mut refs = IndexSet::new();
    collect_refs(node, &mut refs);
    refs
}

fn collect_refs(node: &Value, refs: &mut IndexSet<ComponentRef>) {
    match node {
        Value::Object(mapping) => {
            for (key, value) in mapping {
                if key == REF_KEY
                    && let Value::String(pointer) = value
                    && let Some(reference) = ComponentRef::parse(pointer)
                {
                    refs.insert(reference);
                }
                collect_refs(value, refs);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_refs(item, refs);
            }
        }
        _ => {}
    }
}
