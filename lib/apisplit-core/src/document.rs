//! Loading and writing of specification documents.
//!
//! A specification is held in memory as a [`serde_json::Value`] tree
//! (objects keep insertion order through the `preserve_order` feature).
//! YAML input is bridged into that tree, coercing scalar mapping keys to
//! strings so that unquoted status codes like `200:` survive the trip.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde_json::Value;
use tracing::info;

use crate::error::SplitError;

/// Supported encodings for split output files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Block-style, order-preserving, unicode-safe YAML.
    #[default]
    Yaml,
    /// Two-space-indented JSON.
    Json,
}

impl OutputFormat {
    /// File extension used for this format, without the leading dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = SplitError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            _ => Err(SplitError::UnsupportedFormat {
                format: value.to_string(),
            }),
        }
    }
}

/// Loads a specification document from `path`.
///
/// The `.yaml`/`.yml` and `.json` extensions select the parser
/// directly; any other extension tries YAML first, then JSON. A file
/// that parses under neither encoding is a
/// [`SplitError::ParseFailure`].
pub fn load_document(path: &Path) -> Result<Value, SplitError> {
    let contents = fs::read_to_string(path)?;
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .unwrap_or_default();

    let document = match extension {
        "yaml" | "yml" => parse_yaml(path, &contents)?,
        "json" => parse_json(path, &contents)?,
        _ => parse_yaml(path, &contents).or_else(|_| parse_json(path, &contents))?,
    };

    info!(path = %path.display(), "loaded specification");
    Ok(document)
}

/// Serializes `document` as `stem.<extension>` under `dir`.
///
/// The output directory is created if needed. Returns the path of the
/// written file.
pub fn write_document(
    document: &Value,
    dir: &Path,
    stem: &str,
    format: OutputFormat,
) -> Result<PathBuf, SplitError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{stem}.{}", format.extension()));

    let contents = match format {
        OutputFormat::Yaml => serde_yaml_ng::to_string(document)?,
        OutputFormat::Json => serde_json::to_string_pretty(document)?,
    };

    fs::write(&path, contents).map_err(|source| SplitError::WriteFailure {
        path: path.clone(),
        source,
    })?;

    info!(path = %path.display(), "created split file");
    Ok(path)
}

fn parse_json(path: &Path, contents: &str) -> Result<Value, SplitError> {
    serde_json::from_str(contents).map_err(|error| SplitError::ParseFailure {
        path: path.to_path_buf(),
        detail: error.to_string(),
    })
}

fn parse_yaml(path: &Path, contents: &str) -> Result<Value, SplitError> {
    let yaml: serde_yaml_ng::Value =
        serde_yaml_ng::from_str(contents).map_err(|error| SplitError::ParseFailure {
            path: path.to_path_buf(),
            detail: error.to_string(),
        })?;
    yaml_to_document(path, yaml)
}

/// Converts a YAML value into the document tree.
///
/// Scalar mapping keys (numbers, booleans) are coerced to strings;
/// null or container keys cannot be represented and fail the parse.
fn yaml_to_document(path: &Path, yaml: serde_yaml_ng::Value) -> Result<Value, SplitError> {
    use serde_yaml_ng::Value as Yaml;

    let value = match yaml {
        Yaml::Null => Value::Null,
        Yaml::Bool(boolean) => Value::Bool(boolean),
        Yaml::Number(number) => yaml_number(path, &number)?,
        Yaml::String(string) => Value::String(string),
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(|item| yaml_to_document(path, item))
                .collect::<Result<_, _>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut object = serde_json::Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                object.insert(scalar_key(path, key)?, yaml_to_document(path, value)?);
            }
            Value::Object(object)
        }
        Yaml::Tagged(tagged) => yaml_to_document(path, tagged.value)?,
    };
    Ok(value)
}

fn yaml_number(path: &Path, number: &serde_yaml_ng::Number) -> Result<Value, SplitError> {
    if let Some(integer) = number.as_i64() {
        Ok(Value::from(integer))
    } else if let Some(integer) = number.as_u64() {
        Ok(Value::from(integer))
    } else if let Some(float) = number.as_f64()
        && let Some(float) = serde_json::Number::from_f64(float)
    {
        Ok(Value::Number(float))
    } else {
        Err(SplitError::ParseFailure {
            path: path.to_path_buf(),
            detail: format!("unrepresentable number: {number}"),
        })
    }
}

fn scalar_key(path: &Path, key: serde_yaml_ng::Value) -> Result<String, SplitError> {
    use serde_yaml_ng::Value as Yaml;

    match key {
        Yaml::String(string) => Ok(string),
        Yaml::Number(number) => Ok(number.to_string()),
        Yaml::Bool(boolean) => Ok(boolean.to_string()),
        _ => Err(SplitError::ParseFailure {
            path: path.to_path_buf(),
            detail: "mapping key must be a scalar".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_parse_format_selectors() {
        assert_eq!("yaml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert_eq!("YML".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);

        let error = "xml".parse::<OutputFormat>().unwrap_err();
        insta::assert_snapshot!(error, @"unsupported output format: xml");
    }

    #[test]
    fn should_coerce_scalar_yaml_keys() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("responses.yaml");
        fs::write(&input, "responses:\n  200:\n    description: ok\n").unwrap();

        let document = load_document(&input).unwrap();
        let description = &document["responses"]["200"]["description"];
        assert_eq!(description, &json!("ok"));
    }

    #[test]
    fn should_fall_back_from_yaml_to_json() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("spec.txt");
        fs::write(&input, r#"{"openapi": "3.0.0", "paths": {}}"#).unwrap();

        let document = load_document(&input).unwrap();
        assert_eq!(document["openapi"], json!("3.0.0"));
    }

    #[test]
    fn should_fail_on_unparseable_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.txt");
        fs::write(&input, "{ not: [valid").unwrap();

        let error = load_document(&input).unwrap_err();
        assert!(matches!(error, SplitError::ParseFailure { .. }));
    }

    #[test]
    fn should_round_trip_yaml_output() {
        let dir = tempfile::tempdir().unwrap();
        let document = json!({
            "openapi": "3.0.0",
            "info": {"title": "Café API", "version": "1.0"},
            "paths": {"/users": {"get": {"responses": {"200": {"description": "ok"}}}}},
        });

        let written = write_document(&document, dir.path(), "users", OutputFormat::Yaml).unwrap();
        assert_eq!(written, dir.path().join("users.yaml"));

        let reloaded = load_document(&written).unwrap();
        assert_eq!(reloaded, document);
    }

    #[test]
    fn should_write_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let document = json!({"openapi": "3.0.0", "paths": {}});

        let written = write_document(&document, dir.path(), "all", OutputFormat::Json).unwrap();
        assert_eq!(written, dir.path().join("all.json"));

        let contents = fs::read_to_string(&written).unwrap();
        insta::assert_snapshot!(contents, @r#"
        {
          "openapi": "3.0.0",
          "paths": {}
        }
        "#);
    }

    #[test]
    fn should_create_output_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("out").join("split");

        let written =
            write_document(&json!({}), &nested, "empty", OutputFormat::Json).unwrap();
        assert!(written.exists());
    }
}
