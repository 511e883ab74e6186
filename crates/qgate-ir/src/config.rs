//! Context configuration.
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables (`QGATE_` prefix)
//! 2. Configuration file (YAML)
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{IrError, IrResult};

/// Environment variable overriding [`ContextConfig::prefer_specialized`].
pub const ENV_PREFER_SPECIALIZED: &str = "QGATE_PREFER_SPECIALIZED";
/// Environment variable overriding [`ContextConfig::singular_tolerance`].
pub const ENV_SINGULAR_TOLERANCE: &str = "QGATE_SINGULAR_TOLERANCE";
/// Environment variable overriding [`ContextConfig::max_qubits`].
pub const ENV_MAX_QUBITS: &str = "QGATE_MAX_QUBITS";

/// Settings for a [`Context`](crate::Context).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Send H, X and U4 gates through their dedicated backend entry points.
    /// When false every gate is resolved to a matrix.
    pub prefer_specialized: bool,

    /// Smallest determinant magnitude accepted when inverting. Must be
    /// positive.
    pub singular_tolerance: f64,

    /// Upper bound on qubits allocated through `qalloc`.
    pub max_qubits: Option<u32>,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            prefer_specialized: true,
            singular_tolerance: default_singular_tolerance(),
            max_qubits: None,
        }
    }
}

fn default_singular_tolerance() -> f64 {
    qgate_math::DIAGONAL_TOLERANCE
}

impl ContextConfig {
    /// Parse configuration from a YAML document.
    pub fn from_yaml_str(contents: &str) -> IrResult<Self> {
        let config: Self =
            serde_yaml_ng::from_str(contents).map_err(|e| IrError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> IrResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            IrError::Config(format!("{}: {e}", path.as_ref().display()))
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> IrResult<Self> {
        Self::default().merge_env()
    }

    /// Load with full precedence: optional file, then environment.
    pub fn load(config_file: Option<&Path>) -> IrResult<Self> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.merge_env()
    }

    /// Apply `QGATE_*` variables present in the process environment.
    pub fn merge_env(self) -> IrResult<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides looked up through `lookup`.
    ///
    /// Only keys for which `lookup` returns a value change the corresponding
    /// field; the result is validated.
    pub fn apply_overrides<F>(mut self, lookup: F) -> IrResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_PREFER_SPECIALIZED) {
            self.prefer_specialized = parse_bool(ENV_PREFER_SPECIALIZED, &v)?;
        }
        if let Some(v) = lookup(ENV_SINGULAR_TOLERANCE) {
            self.singular_tolerance = v
                .trim()
                .parse()
                .map_err(|_| invalid(ENV_SINGULAR_TOLERANCE, &v))?;
        }
        if let Some(v) = lookup(ENV_MAX_QUBITS) {
            let v = v.trim();
            self.max_qubits = if v.is_empty() || v.eq_ignore_ascii_case("none") {
                None
            } else {
                Some(v.parse().map_err(|_| invalid(ENV_MAX_QUBITS, v))?)
            };
        }
        self.validate()?;
        Ok(self)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> IrResult<()> {
        if !self.singular_tolerance.is_finite() || self.singular_tolerance <= 0.0 {
            return Err(IrError::Config(format!(
                "singular_tolerance must be a positive finite number, got {}",
                self.singular_tolerance
            )));
        }
        if self.max_qubits == Some(0) {
            return Err(IrError::Config("max_qubits must be at least 1".into()));
        }
        Ok(())
    }
}

fn invalid(key: &str, value: &str) -> IrError {
    IrError::Config(format!("Invalid value for {key}: '{value}'"))
}

fn parse_bool(key: &str, value: &str) -> IrResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}
