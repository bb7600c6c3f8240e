// operations.rs — Show the operations a component advertises.

use std::path::Path;

use fsbind_binding::BindingRegistry;

pub fn execute(
    registry: &BindingRegistry,
    component_path: &Path,
    json: bool,
) -> anyhow::Result<()> {
    let (component, binding) = super::load_binding(registry, component_path)?;
    let operations = binding.operations();

    if json {
        println!("{}", serde_json::to_string(&operations)?);
        return Ok(());
    }

    println!("{} ({}):", component.name, binding.name());
    for operation in operations {
        println!("  {}", operation);
    }
    Ok(())
}
