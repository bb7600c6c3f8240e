//! Component file loading

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use fsbind_binding::Metadata;

/// A component file: which binding to build and its metadata.
///
/// ```toml
/// name = "local-files"
/// type = "bindings.filesystem"
///
/// [metadata]
/// folderName = "/var/lib/fsbind/out"
/// strict = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentFile {
    /// Display name of the component
    pub name: String,

    /// Registered component type, e.g. "bindings.filesystem"
    #[serde(rename = "type")]
    pub component_type: String,

    /// Binding properties. Non-string scalars are accepted and passed on
    /// in their TOML spelling (`strict = true` becomes `"true"`).
    #[serde(default)]
    pub metadata: BTreeMap<String, toml::Value>,
}

impl ComponentFile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read component file {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("invalid component file {}", path.display()))
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Metadata in the string form bindings consume.
    pub fn binding_metadata(&self) -> Metadata {
        let properties = self
            .metadata
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    toml::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (key.clone(), value)
            })
            .collect();
        Metadata::new(properties)
    }
}
