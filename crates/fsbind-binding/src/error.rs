// error.rs — Error types shared by every output binding.

use std::path::PathBuf;
use thiserror::Error;

/// Errors a binding can report back to its host.
#[derive(Debug, Error)]
pub enum BindingError {
    /// A required field was found neither in the component metadata
    /// nor in the request metadata.
    #[error("{binding} missing \"{field}\" field")]
    MissingField {
        binding: &'static str,
        field: &'static str,
    },

    /// The host asked for an operation the binding does not advertise.
    #[error("{binding} does not support operation '{operation}'")]
    UnsupportedOperation { binding: String, operation: String },

    /// No factory is registered for the component type.
    #[error("unknown component type '{component_type}'")]
    UnknownComponent { component_type: String },

    /// A file system operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The request payload could not be decoded.
    #[error("failed to decode request data: {0}")]
    Decode(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, BindingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_message_names_binding_and_field() {
        let err = BindingError::MissingField {
            binding: "filesystem",
            field: "folderName",
        };
        assert_eq!(err.to_string(), "filesystem missing \"folderName\" field");
    }

    #[test]
    fn io_error_exposes_source() {
        use std::error::Error as _;

        let err = BindingError::Io {
            path: PathBuf::from("/nope/out.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("/nope/out.txt"));
        assert!(err.source().is_some());
    }
}
