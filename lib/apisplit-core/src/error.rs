//! Error types for splitting operations.

use std::path::PathBuf;

/// Errors that can occur while splitting a specification.
///
/// Every variant is fatal to the current split run: the orchestrator
/// does not retry and does not emit further groups after a failure.
/// Dangling or unresolvable internal `$ref` pointers are deliberately
/// *not* errors; see [`ComponentResolver`](crate::split::ComponentResolver).
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum SplitError {
    /// The input file cannot be located.
    ///
    /// Surfaced by [`SpecSplitter::new`](crate::SpecSplitter::new),
    /// before any processing begins.
    #[display("input file not found: {}", path.display())]
    #[from(skip)]
    SourceNotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// The requested output format is not one of the supported kinds.
    #[display("unsupported output format: {format}")]
    #[from(skip)]
    UnsupportedFormat {
        /// The rejected format selector.
        format: String,
    },

    /// The input bytes cannot be interpreted as a document in either
    /// supported encoding.
    #[display("unable to parse {} as YAML or JSON: {detail}", path.display())]
    #[from(skip)]
    ParseFailure {
        /// The file that failed to parse.
        path: PathBuf,
        /// Parser diagnostic for the last attempted encoding.
        detail: String,
    },

    /// Grouping or assembly was requested before a document was loaded.
    #[display("no specification loaded")]
    NotLoaded,

    /// The grouping-method selector is neither `tags` nor `paths`.
    #[display("unknown split method: {selector}")]
    #[from(skip)]
    UnknownStrategy {
        /// The rejected selector.
        selector: String,
    },

    /// An assembled document could not be persisted.
    #[display("cannot write {}: {source}", path.display())]
    #[from(skip)]
    WriteFailure {
        /// The destination that could not be written.
        path: PathBuf,
        /// The underlying I/O failure.
        source: std::io::Error,
    },

    /// I/O failure while reading the input or preparing the output
    /// directory.
    Io(std::io::Error),

    /// JSON serialization failure while encoding an output document.
    Json(serde_json::Error),

    /// YAML serialization failure while encoding an output document.
    Yaml(serde_yaml_ng::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_source_not_found() {
        let error = SplitError::SourceNotFound {
            path: PathBuf::from("missing.yaml"),
        };
        insta::assert_snapshot!(error, @"input file not found: missing.yaml");
    }

    #[test]
    fn should_display_unknown_strategy() {
        let error = SplitError::UnknownStrategy {
            selector: "methods".to_string(),
        };
        insta::assert_snapshot!(error, @"unknown split method: methods");
    }

    #[test]
    fn should_expose_write_failure_source() {
        let error = SplitError::WriteFailure {
            path: PathBuf::from("out/users.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let source = std::error::Error::source(&error);
        assert!(source.is_some());
    }

    #[test]
    fn should_convert_io_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error = SplitError::from(io);
        assert!(matches!(error, SplitError::Io(_)));
    }
}
