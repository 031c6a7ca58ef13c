//! JSON fixtures: a root of calls plus the data the in-memory host serves.

use animagus::{ExecutionOptions, MemoryEnvironment, Root, Value};
use miette::Diagnostic;
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Everything needed to evaluate a root without a live chain.
///
/// `params` entries that are `null` declare a parameter without a value, to
/// be solved by `EQUAL`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Fixture {
    #[serde(default)]
    pub args: Vec<Value>,
    #[serde(default)]
    pub params: Vec<Option<Value>>,
    #[serde(default)]
    pub cells: Vec<Value>,
    pub root: Root,
}

#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum FixtureError {
    #[error("cannot read fixture {}", .path.display())]
    #[diagnostic(code(animagus::fixture::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid fixture")]
    #[diagnostic(
        code(animagus::fixture::json),
        help("expected {{\"args\": [...], \"params\": [...], \"cells\": [...], \"root\": {{\"calls\": [...]}}}}")
    )]
    Json(#[from] serde_json::Error),
}

impl Fixture {
    pub fn from_json(json: &str) -> Result<Fixture, FixtureError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from `path`, or from stdin when `path` is `-`.
    pub fn load(path: &Path) -> Result<Fixture, FixtureError> {
        let io = |source| FixtureError::Io {
            path: path.to_path_buf(),
            source,
        };
        let mut json = String::new();
        if path == Path::new("-") {
            std::io::stdin().read_to_string(&mut json).map_err(io)?;
        } else {
            json = std::fs::read_to_string(path).map_err(io)?;
        }
        Fixture::from_json(&json)
    }

    pub fn environment(&self, options: &ExecutionOptions) -> MemoryEnvironment {
        self.params
            .iter()
            .cloned()
            .fold(MemoryEnvironment::builder(), |builder, slot| builder.param_slot(slot))
            .args(self.args.iter().cloned())
            .cells(self.cells.iter().cloned())
            .options(options.clone())
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use animagus::Environment;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fixture_environment() {
        let fixture = Fixture::from_json(indoc! {r#"
            {
              "args": [{"t": "UINT64", "primitive": {"u": 7}}],
              "params": [null, {"t": "BOOL", "primitive": {"b": true}}],
              "cells": [],
              "root": {"calls": []}
            }
        "#})
        .unwrap();

        let env = fixture.environment(&ExecutionOptions::default());
        assert_eq!(env.arg(0), Some(Value::Uint64(7)));
        assert_eq!(env.param(0), Some(Value::Param(0)));
        assert_eq!(env.param(1), Some(Value::Bool(true)));
        assert_eq!(env.param(2), None);
    }

    #[test]
    fn test_fixture_defaults() {
        let fixture = Fixture::from_json(r#"{"root": {"calls": []}}"#).unwrap();
        assert!(fixture.args.is_empty());
        assert!(fixture.params.is_empty());
        assert!(fixture.cells.is_empty());
    }

    #[test]
    fn test_fixture_rejects_unknown_fields() {
        let err = Fixture::from_json(r#"{"root": {"calls": []}, "cell": []}"#).unwrap_err();
        assert!(matches!(err, FixtureError::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Fixture::load(Path::new("/nonexistent/fixture.json")).unwrap_err();
        assert!(matches!(err, FixtureError::Io { .. }));
    }
}
