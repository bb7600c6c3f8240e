// invoke.rs — Send a single request to a component.
//
// The payload is passed through untouched; for the filesystem binding it
// must be a quoted literal, e.g. `--data '"hello world"'`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;

use fsbind_binding::{BindingError, BindingRegistry, InvokeRequest, OperationKind};

#[derive(Args)]
pub struct InvokeArgs {
    /// Operation to request.
    #[arg(long, default_value = "create")]
    pub operation: OperationKind,

    /// Request metadata entry (repeatable), e.g. `--metadata fileName=out.txt`.
    #[arg(long = "metadata", value_name = "KEY=VALUE")]
    pub metadata: Vec<String>,

    /// Request payload.
    #[arg(long, conflicts_with = "data_file", required_unless_present = "data_file")]
    pub data: Option<String>,

    /// Read the request payload from a file.
    #[arg(long)]
    pub data_file: Option<PathBuf>,
}

pub fn execute(
    registry: &BindingRegistry,
    component_path: &Path,
    args: &InvokeArgs,
) -> anyhow::Result<()> {
    let (component, binding) = super::load_binding(registry, component_path)?;

    if !binding.supports(args.operation) {
        return Err(BindingError::UnsupportedOperation {
            binding: binding.name().to_string(),
            operation: args.operation.to_string(),
        }
        .into());
    }

    let request = InvokeRequest {
        operation: args.operation,
        metadata: parse_metadata(&args.metadata)?,
        data: read_data(args)?,
    };

    match binding.invoke(&request)? {
        Some(response) => println!("{}", String::from_utf8_lossy(&response.data)),
        None => println!("{}: {} ok", component.name, args.operation),
    }
    Ok(())
}

fn parse_metadata(entries: &[String]) -> anyhow::Result<HashMap<String, String>> {
    entries
        .iter()
        .map(|entry| {
            entry
                .split_once('=')
                .map(|(key, value)| (key.trim().to_string(), value.to_string()))
                .with_context(|| format!("metadata entry '{}' is not KEY=VALUE", entry))
        })
        .collect()
}

fn read_data(args: &InvokeArgs) -> anyhow::Result<Vec<u8>> {
    match (&args.data, &args.data_file) {
        (Some(data), _) => Ok(data.as_bytes().to_vec()),
        (None, Some(path)) => std::fs::read(path)
            .with_context(|| format!("failed to read data file {}", path.display())),
        (None, None) => anyhow::bail!("either --data or --data-file is required"),
    }
}
