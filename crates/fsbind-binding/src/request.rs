//! Request, response, and component metadata types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::binding::OperationKind;

/// Component-level configuration, as handed over by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

impl Metadata {
    pub fn new(properties: HashMap<String, String>) -> Self {
        Self { properties }
    }

    /// Add a property (builder style).
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Property value, or `""` when absent.
    pub fn property(&self, key: &str) -> &str {
        self.properties.get(key).map(String::as_str).unwrap_or("")
    }
}

/// One invocation of a binding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvokeRequest {
    #[serde(default)]
    pub operation: OperationKind,

    /// Per-request overrides and options
    #[serde(default)]
    pub metadata: HashMap<String, String>,

    /// Raw payload
    #[serde(default)]
    pub data: Vec<u8>,
}

impl InvokeRequest {
    pub fn new(operation: OperationKind, data: impl Into<Vec<u8>>) -> Self {
        Self {
            operation,
            metadata: HashMap::new(),
            data: data.into(),
        }
    }

    /// Add a request metadata entry (builder style).
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Payload returned by bindings that produce output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokeResponse {
    #[serde(default)]
    pub data: Vec<u8>,

    #[serde(default)]
    pub metadata: HashMap<String, String>,
}
