//! Transitive resolution and filtering of component definitions.

use std::collections::VecDeque;

use indexmap::IndexSet;
use serde_json::{Map, Value};
use tracing::debug;

use super::reference::{ComponentRef, scan_refs};

/// Resolves references against a document's full component table.
///
/// The resolver only ever reads the table. References naming a missing
/// component type or name are tolerated and skipped silently: a
/// document may legitimately point at a definition that was pruned or
/// never present, and a dangling pointer must not abort a split.
#[derive(Debug, Clone, Copy)]
pub struct ComponentResolver<'a> {
    components: &'a Map<String, Value>,
}

impl<'a> ComponentResolver<'a> {
    /// Creates a resolver over the full, unfiltered component table.
    #[must_use]
    pub fn new(components: &'a Map<String, Value>) -> Self {
        Self { components }
    }

    fn definition(&self, reference: &ComponentRef) -> Option<&'a Value> {
        self.components
            .get(&reference.component_type)?
            .get(&reference.name)
    }

    /// Computes the least fixpoint set of references reachable from
    /// `initial`.
    ///
    /// Breadth-first worklist: each popped reference is looked up, its
    /// definition scanned, and newly discovered references enqueued.
    /// Every reference is enqueued at most once, so the traversal
    /// terminates on any finite table (cyclic reference chains
    /// included) and the result is independent of visitation order.
    #[must_use]
    pub fn resolve_transitive(&self, initial: &IndexSet<ComponentRef>) -> IndexSet<ComponentRef> {
        let mut resolved = initial.clone();
        let mut worklist: VecDeque<ComponentRef> = initial.iter().cloned().collect();

        while let Some(reference) = worklist.pop_front() {
            let Some(definition) = self.definition(&reference) else {
                debug!(%reference, "skipping dangling component reference");
                continue;
            };
            for discovered in scan_refs(definition) {
                if resolved.insert(discovered.clone()) {
                    worklist.push_back(discovered);
                }
            }
        }

        resolved
    }

    /// Projects the component table down to exactly the given
    /// references.
    ///
    /// References naming a nonexistent type or name are dropped without
    /// error, and a component type with no surviving entry is omitted
    /// entirely. The projection follows the original table order, so
    /// the output is reproducible and diff-stable against the input.
    #[must_use]
    pub fn filter(&self, refs: &IndexSet<ComponentRef>) -> Map<String, Value> {
        let mut filtered = Map::new();

        for (component_type, definitions) in self.components {
            let Value::Object(definitions) = definitions else {
                continue;
            };

            let mut kept = Map::new();
            for (name, definition) in definitions {
                let reference = ComponentRef::new(component_type.clone(), name.clone());
                if refs.contains(&reference) {
                    kept.insert(name.clone(), definition.clone());
                }
            }

            if !kept.is_empty() {
                filtered.insert(component_type.clone(), Value::Object(kept));
            }
        }

        filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table(value: Value) -> Map<String, Value> {
        let Value::Object(map) = value else {
            panic!("component table fixture must be an object");
        };
        map
    }

    fn refs(pairs: &[(&str, &str)]) -> IndexSet<ComponentRef> {
        pairs
            .iter()
            .map(|(component_type, name)| ComponentRef::new(*component_type, *name))
            .collect()
    }

    fn chained_table() -> Map<String, Value> {
        table(json!({
            "schemas": {
                "A": {"properties": {"b": {"$ref": "#/components/schemas/B"}}},
                "B": {"properties": {"c": {"$ref": "#/components/schemas/C"}}},
                "C": {"type": "object"},
                "Unused": {"type": "string"},
            }
        }))
    }

    #[test]
    fn should_resolve_transitive_chain() {
        let components = chained_table();
        let resolver = ComponentResolver::new(&components);

        let resolved = resolver.resolve_transitive(&refs(&[("schemas", "A")]));

        assert_eq!(
            resolved,
            refs(&[("schemas", "A"), ("schemas", "B"), ("schemas", "C")])
        );
    }

    #[test]
    fn should_be_idempotent() {
        let components = chained_table();
        let resolver = ComponentResolver::new(&components);

        let once = resolver.resolve_transitive(&refs(&[("schemas", "A")]));
        let twice = resolver.resolve_transitive(&once);

        assert_eq!(once, twice);
    }

    #[test]
    fn should_terminate_on_cyclic_references() {
        let components = table(json!({
            "schemas": {
                "Node": {"properties": {"next": {"$ref": "#/components/schemas/Node"}}},
                "Tree": {"properties": {"left": {"$ref": "#/components/schemas/Leaf"}}},
                "Leaf": {"properties": {"parent": {"$ref": "#/components/schemas/Tree"}}},
            }
        }));
        let resolver = ComponentResolver::new(&components);

        let resolved = resolver.resolve_transitive(&refs(&[("schemas", "Node"), ("schemas", "Tree")]));

        assert_eq!(
            resolved,
            refs(&[("schemas", "Node"), ("schemas", "Tree"), ("schemas", "Leaf")])
        );
    }

    #[test]
    fn should_skip_dangling_references() {
        let components = chained_table();
        let resolver = ComponentResolver::new(&components);

        let resolved =
            resolver.resolve_transitive(&refs(&[("schemas", "Missing"), ("parameters", "Nope")]));

        // Dangling references stay in the set; they simply resolve to nothing.
        assert_eq!(
            resolved,
            refs(&[("schemas", "Missing"), ("parameters", "Nope")])
        );
    }

    #[test]
    fn should_filter_to_exactly_the_requested_entries() {
        let components = chained_table();
        let resolver = ComponentResolver::new(&components);

        let filtered = resolver.filter(&refs(&[("schemas", "A"), ("schemas", "C")]));

        let Some(Value::Object(schemas)) = filtered.get("schemas") else {
            panic!("expected a schemas table");
        };
        assert_eq!(
            schemas.keys().collect::<Vec<_>>(),
            vec!["A", "C"],
            "projection should follow table order"
        );
    }

    #[test]
    fn should_drop_dangling_references_from_filter() {
        let components = chained_table();
        let resolver = ComponentResolver::new(&components);

        let filtered = resolver.filter(&refs(&[("schemas", "A"), ("schemas", "Missing")]));

        let Some(Value::Object(schemas)) = filtered.get("schemas") else {
            panic!("expected a schemas table");
        };
        assert!(schemas.contains_key("A"));
        assert!(!schemas.contains_key("Missing"));
    }

    #[test]
    fn should_omit_component_types_without_entries() {
        let components = table(json!({
            "schemas": {"User": {"type": "object"}},
            "responses": {"Error": {"description": "boom"}},
        }));
        let resolver = ComponentResolver::new(&components);

        let filtered = resolver.filter(&refs(&[("schemas", "User")]));

        assert!(filtered.contains_key("schemas"));
        assert!(!filtered.contains_key("responses"));
    }

    #[test]
    fn should_tolerate_malformed_component_type_entries() {
        let components = table(json!({
            "schemas": "not a mapping",
        }));
        let resolver = ComponentResolver::new(&components);

        let resolved = resolver.resolve_transitive(&refs(&[("schemas", "User")]));
        assert_eq!(resolved, refs(&[("schemas", "User")]));
        assert!(resolver.filter(&resolved).is_empty());
    }
}
