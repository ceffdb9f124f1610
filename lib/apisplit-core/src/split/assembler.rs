//! Per-group document assembly.

use indexmap::IndexSet;
use serde_json::{Map, Value};
use tracing::debug;

use super::reference::{ComponentRef, scan_refs};
use super::resolver::ComponentResolver;

/// Top-level sections shared by every split document.
///
/// Extracted once per run from the loaded document. Holds the original,
/// unfiltered component table purely as the resolution source; the
/// table is never emitted unfiltered.
#[derive(Debug, Clone)]
pub struct BaseSpec {
    openapi: Value,
    info: Value,
    servers: Value,
    components: Map<String, Value>,
    security: Value,
    tags: Vec<Value>,
    external_docs: Option<Value>,
}

impl BaseSpec {
    /// Extracts the shared sections from a loaded document.
    ///
    /// Any absent section becomes an empty default; the version marker
    /// defaults to `3.0.0`. Absence is never an error.
    #[must_use]
    pub fn from_document(document: &Value) -> Self {
        let components = match document.get("components") {
            Some(Value::Object(components)) => components.clone(),
            _ => Map::new(),
        };
        let tags = match document.get("tags") {
            Some(Value::Array(tags)) => tags.clone(),
            _ => Vec::new(),
        };

        Self {
            openapi: document
                .get("openapi")
                .cloned()
                .unwrap_or_else(|| Value::String("3.0.0".to_string())),
            info: document
                .get("info")
                .cloned()
                .unwrap_or_else(|| Value::Object(Map::new())),
            servers: document
                .get("servers")
                .cloned()
                .unwrap_or_else(|| Value::Array(Vec::new())),
            components,
            security: document
                .get("security")
                .cloned()
                .unwrap_or_else(|| Value::Array(Vec::new())),
            tags,
            external_docs: document.get("externalDocs").cloned(),
        }
    }

    /// The original, unfiltered component table.
    #[must_use]
    pub fn components(&self) -> &Map<String, Value> {
        &self.components
    }

    /// Tag-metadata entries whose declared name equals `group_name`.
    fn narrowed_tags(&self, group_name: &str) -> Vec<Value> {
        self.tags
            .iter()
            .filter(|tag| tag.get("name").and_then(Value::as_str) == Some(group_name))
            .cloned()
            .collect()
    }

    /// Builds the self-contained document for one group.
    ///
    /// The group's path entries are carried over unchanged, the
    /// tag-metadata list is narrowed to the group's own entry (unless
    /// the group is the strategy's reserved fallback), and the emitted
    /// component table is exactly the transitive closure of the
    /// references reachable from the new document's paths and its
    /// security, tag, server and info sections. Only new containers are
    /// constructed; no source subtree is mutated.
    #[must_use]
    pub fn assemble(
        &self,
        group_name: &str,
        group_paths: &[String],
        original_paths: &Map<String, Value>,
        reserved: bool,
    ) -> Value {
        let mut paths = Map::new();
        for path in group_paths {
            if let Some(entry) = original_paths.get(path) {
                paths.insert(path.clone(), entry.clone());
            }
        }
        let paths = Value::Object(paths);

        let tags = if reserved {
            self.tags.clone()
        } else {
            self.narrowed_tags(group_name)
        };
        let tags = Value::Array(tags);

        let mut used: IndexSet<ComponentRef> = scan_refs(&paths);
        for section in [&self.security, &tags, &self.servers, &self.info] {
            used.extend(scan_refs(section));
        }

        let resolver = ComponentResolver::new(&self.components);
        let resolved = resolver.resolve_transitive(&used);
        let components = resolver.filter(&resolved);
        debug!(
            group = group_name,
            direct = used.len(),
            resolved = resolved.len(),
            "assembled component table"
        );

        let mut document = Map::new();
        document.insert("openapi".to_string(), self.openapi.clone());
        document.insert("info".to_string(), self.info.clone());
        document.insert("servers".to_string(), self.servers.clone());
        document.insert("components".to_string(), Value::Object(components));
        document.insert("security".to_string(), self.security.clone());
        document.insert("tags".to_string(), tags);
        if let Some(external_docs) = &self.external_docs {
            document.insert("externalDocs".to_string(), external_docs.clone());
        }
        document.insert("paths".to_string(), paths);
        Value::Object(document)
    }
}
