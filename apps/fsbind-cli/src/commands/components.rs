// components.rs — List the component types this host can construct.

use fsbind_binding::BindingRegistry;

pub fn execute(registry: &BindingRegistry) -> anyhow::Result<()> {
    for component_type in registry.component_types() {
        println!("{}", component_type);
    }
    Ok(())
}
