// File: src/options.rs
// Purpose: Per-call validation options, loadable from TOML

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Metadata key that carries a field's directive
pub const DEFAULT_DIRECTIVE_KEY: &str = "validate";

/// Options for one validation pass
///
/// ```toml
/// name_key = "json"
/// directive_key = "validate"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateOptions {
    /// Report paths using this metadata key instead of declared field names.
    ///
    /// A field missing the key is reported under an empty name. `None` and
    /// `Some("")` both mean declared names are used.
    #[serde(default)]
    pub name_key: Option<String>,

    /// Metadata key holding the validator directive (default: "validate")
    #[serde(default = "default_directive_key")]
    pub directive_key: String,
}

fn default_directive_key() -> String {
    DEFAULT_DIRECTIVE_KEY.to_string()
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            name_key: None,
            directive_key: default_directive_key(),
        }
    }
}

impl ValidateOptions {
    pub fn with_name_key(name_key: impl Into<String>) -> Self {
        Self {
            name_key: Some(name_key.into()),
            ..Self::default()
        }
    }

    /// The naming key, if one is active
    pub fn naming_key(&self) -> Option<&str> {
        self.name_key.as_deref().filter(|key| !key.is_empty())
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse validation options")
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read options file: {}", path.display()))?;
        Self::from_toml_str(&content)
    }
}
