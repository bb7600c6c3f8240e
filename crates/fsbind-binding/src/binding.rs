//! Core OutputBinding trait and operation kinds

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::request::{InvokeRequest, InvokeResponse};

/// An action a binding can advertise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    #[default]
    Create,
    Get,
    Delete,
    List,
}

impl std::str::FromStr for OperationKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "create" => Ok(OperationKind::Create),
            "get" => Ok(OperationKind::Get),
            "delete" => Ok(OperationKind::Delete),
            "list" => Ok(OperationKind::List),
            _ => Err(format!(
                "Invalid operation: '{}'. Valid operations: create, get, delete, list",
                s
            )),
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationKind::Create => write!(f, "create"),
            OperationKind::Get => write!(f, "get"),
            OperationKind::Delete => write!(f, "delete"),
            OperationKind::List => write!(f, "list"),
        }
    }
}

/// Pluggable adapter that performs one side-effecting operation against an
/// external system on behalf of the host.
///
/// Configuration is fixed when the binding is constructed; `invoke` only
/// borrows `self`, so a single instance can serve concurrent requests.
pub trait OutputBinding: Send + Sync {
    /// Binding display name (used in errors and logs)
    fn name(&self) -> &str;

    /// Operation kinds this binding accepts
    fn operations(&self) -> Vec<OperationKind>;

    /// Whether `operation` is among the advertised operations
    fn supports(&self, operation: OperationKind) -> bool {
        self.operations().contains(&operation)
    }

    /// Perform the operation described by `request`.
    ///
    /// Returns `Ok(None)` when the binding has no response payload.
    fn invoke(&self, request: &InvokeRequest) -> Result<Option<InvokeResponse>>;
}
