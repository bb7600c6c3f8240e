pub mod components;
pub mod invoke;
pub mod operations;

use std::path::Path;

use fsbind_binding::{BindingRegistry, OutputBinding};

use crate::config::ComponentFile;

/// Registry with every binding this host ships.
pub fn registry() -> BindingRegistry {
    let mut registry = BindingRegistry::new();
    fsbind_connector_fs::register(&mut registry);
    registry
}

/// Load the component file and construct its binding.
pub fn load_binding(
    registry: &BindingRegistry,
    component_path: &Path,
) -> anyhow::Result<(ComponentFile, Box<dyn OutputBinding>)> {
    let component = ComponentFile::load(component_path)?;
    let binding = registry.create(&component.component_type, &component.binding_metadata())?;
    tracing::debug!(
        "loaded component '{}' ({})",
        component.name,
        component.component_type
    );
    Ok((component, binding))
}
