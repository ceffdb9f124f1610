//! The split orchestrator.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::info;

use crate::document::{OutputFormat, load_document, write_document};
use crate::error::SplitError;

use super::assembler::BaseSpec;
use super::strategies::{GroupingStrategy, PathPrefixGrouping, TagGrouping};

/// Grouping method selector for a split run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitMethod {
    /// One document per operation tag, plus `untagged`.
    Tags,
    /// One document per path prefix of the given depth.
    PathPrefix(NonZeroUsize),
}

impl SplitMethod {
    /// Resolves a method selector (`tags` or `paths`).
    ///
    /// `levels` configures the prefix depth and only applies to the
    /// `paths` method. Anything else is a
    /// [`SplitError::UnknownStrategy`].
    pub fn parse(selector: &str, levels: NonZeroUsize) -> Result<Self, SplitError> {
        match selector {
            "tags" => Ok(Self::Tags),
            "paths" => Ok(Self::PathPrefix(levels)),
            _ => Err(SplitError::UnknownStrategy {
                selector: selector.to_string(),
            }),
        }
    }

    fn strategy(self) -> Box<dyn GroupingStrategy> {
        match self {
            Self::Tags => Box::new(TagGrouping),
            Self::PathPrefix(levels) => Box::new(PathPrefixGrouping::new(levels)),
        }
    }
}

/// Derives a filesystem-safe file stem from a group name.
///
/// Lower-cases the name and replaces spaces and `/` with `_`.
#[must_use]
pub fn sanitize_group_name(name: &str) -> String {
    name.to_lowercase().replace([' ', '/'], "_")
}

/// Splits one specification into per-group documents on disk.
///
/// The orchestrator owns the loaded document for the lifetime of a run
/// and drives the full sequence: load, extract the shared sections,
/// group the paths, assemble every group and hand each result to the
/// writer. Any failure aborts the run; there is no partial retry.
///
/// # Example
///
/// ```rust,no_run
/// use std::num::NonZeroUsize;
/// use apisplit_core::{OutputFormat, SpecSplitter, SplitMethod};
///
/// # fn main() -> Result<(), apisplit_core::SplitError> {
/// let mut splitter = SpecSplitter::new("openapi.yaml", "split_specs", OutputFormat::Yaml)?;
/// let levels = NonZeroUsize::new(2).expect("non-zero");
/// let created = splitter.split(SplitMethod::parse("tags", levels)?)?;
/// for path in created {
///     println!("created {}", path.display());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SpecSplitter {
    input: PathBuf,
    output_dir: PathBuf,
    format: OutputFormat,
    spec: Option<Value>,
    base: Option<BaseSpec>,
}

impl SpecSplitter {
    /// Creates a splitter for `input`, writing below `output_dir`.
    ///
    /// Fails with [`SplitError::SourceNotFound`] when the input path
    /// does not exist. Nothing is read yet.
    pub fn new(
        input: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        format: OutputFormat,
    ) -> Result<Self, SplitError> {
        let input = input.into();
        if !input.exists() {
            return Err(SplitError::SourceNotFound { path: input });
        }
        Ok(Self {
            input,
            output_dir: output_dir.into(),
            format,
            spec: None,
            base: None,
        })
    }

    /// Loads and parses the input document and extracts its shared
    /// sections.
    pub fn load(&mut self) -> Result<(), SplitError> {
        let spec = load_document(&self.input)?;
        self.base = Some(BaseSpec::from_document(&spec));
        self.spec = Some(spec);
        Ok(())
    }

    fn loaded(&self) -> Result<(&Value, &BaseSpec), SplitError> {
        match (&self.spec, &self.base) {
            (Some(spec), Some(base)) => Ok((spec, base)),
            _ => Err(SplitError::NotLoaded),
        }
    }

    fn paths_of(spec: &Value) -> Option<&Map<String, Value>> {
        match spec.get("paths") {
            Some(Value::Object(paths)) => Some(paths),
            _ => None,
        }
    }

    /// Computes the groups the selected method produces, without
    /// assembling or writing anything.
    ///
    /// Fails with [`SplitError::NotLoaded`] before
    /// [`load`](Self::load).
    pub fn groups(&self, method: SplitMethod) -> Result<IndexMap<String, Vec<String>>, SplitError> {
        let (spec, _) = self.loaded()?;
        let empty = Map::new();
        let paths = Self::paths_of(spec).unwrap_or(&empty);
        Ok(method.strategy().groups(paths))
    }

    /// Runs a complete split: load, group, assemble and write.
    ///
    /// Returns the created files in group order. The first failure
    /// aborts the run; files already written stay in place.
    pub fn split(&mut self, method: SplitMethod) -> Result<Vec<PathBuf>, SplitError> {
        self.load()?;
        let (spec, base) = self.loaded()?;
        let empty = Map::new();
        let original_paths = Self::paths_of(spec).unwrap_or(&empty);

        let strategy = method.strategy();
        let groups = strategy.groups(original_paths);
        info!(
            input = %self.input.display(),
            groups = groups.len(),
            "splitting specification"
        );

        let mut created = Vec::with_capacity(groups.len());
        for (group_name, group_paths) in &groups {
            let reserved = group_name == strategy.reserved_group();
            let document = base.assemble(group_name, group_paths, original_paths, reserved);
            let stem = sanitize_group_name(group_name);
            let path = write_document(&document, &self.output_dir, &stem, self.format)?;
            created.push(path);
        }

        info!(
            files = created.len(),
            output = %self.output_dir.display(),
            "split complete"
        );
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two() -> NonZeroUsize {
        NonZeroUsize::new(2).expect("non-zero")
    }

    #[test]
    fn should_parse_method_selectors() {
        assert_eq!(SplitMethod::parse("tags", two()).unwrap(), SplitMethod::Tags);
        assert_eq!(
            SplitMethod::parse("paths", two()).unwrap(),
            SplitMethod::PathPrefix(two())
        );

        let error = SplitMethod::parse("operations", two()).unwrap_err();
        assert!(matches!(error, SplitError::UnknownStrategy { .. }));
    }

    #[test]
    fn should_sanitize_group_names() {
        insta::assert_snapshot!(sanitize_group_name("Pet Store"), @"pet_store");
        insta::assert_snapshot!(sanitize_group_name("admin/settings"), @"admin_settings");
        insta::assert_snapshot!(sanitize_group_name("users"), @"users");
    }

    #[test]
    fn should_fail_on_missing_input() {
        let error = SpecSplitter::new(
            "definitely/not/here.yaml",
            "out",
            OutputFormat::Yaml,
        )
        .unwrap_err();
        assert!(matches!(error, SplitError::SourceNotFound { .. }));
    }

    #[test]
    fn should_require_a_loaded_document_for_grouping() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("spec.yaml");
        std::fs::write(&input, "openapi: 3.0.0\n").unwrap();

        let splitter = SpecSplitter::new(&input, dir.path().join("out"), OutputFormat::Yaml)
            .expect("input exists");
        let error = splitter.groups(SplitMethod::Tags).unwrap_err();
        assert!(matches!(error, SplitError::NotLoaded));
    }
}
