// registry.rs — Maps component type strings to binding factories.
//
// Connector crates expose a `register(&mut BindingRegistry)` function; the
// host collects them once at startup and then constructs bindings by the
// `type` field of each component file.

use std::collections::BTreeMap;

use crate::binding::OutputBinding;
use crate::error::{BindingError, Result};
use crate::request::Metadata;

/// Constructs a binding from component metadata.
pub type BindingFactory = fn(&Metadata) -> Result<Box<dyn OutputBinding>>;

/// Component type → factory lookup table.
#[derive(Default)]
pub struct BindingRegistry {
    factories: BTreeMap<String, BindingFactory>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory for `component_type`, replacing any previous one.
    pub fn register(&mut self, component_type: impl Into<String>, factory: BindingFactory) {
        let component_type = component_type.into();
        if self
            .factories
            .insert(component_type.clone(), factory)
            .is_some()
        {
            tracing::debug!("replaced binding factory for '{}'", component_type);
        }
    }

    /// Construct the binding registered for `component_type`.
    pub fn create(
        &self,
        component_type: &str,
        metadata: &Metadata,
    ) -> Result<Box<dyn OutputBinding>> {
        let factory =
            self.factories
                .get(component_type)
                .ok_or_else(|| BindingError::UnknownComponent {
                    component_type: component_type.to_string(),
                })?;
        factory(metadata)
    }

    /// Registered component types, sorted.
    pub fn component_types(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }
}
