//! # fsbind-connector-fs
//!
//! Local filesystem output binding for fsbind.
//!
//! [`FileSystem`] supports a single operation, `create`: it writes the
//! request payload (a quoted string literal) to `<folderName>/<fileName>`.
//! Both names come from the component metadata or, when the component
//! leaves them empty, from the request metadata.
//!
//! ```rust,no_run
//! use fsbind_binding::{InvokeRequest, Metadata, OperationKind, OutputBinding};
//! use fsbind_connector_fs::FileSystem;
//!
//! let binding = FileSystem::from_metadata(
//!     &Metadata::default().with_property("folderName", "/tmp/out"),
//! );
//! let request = InvokeRequest::new(OperationKind::Create, "\"hello world\"")
//!     .with_metadata("fileName", "hello.txt");
//! binding.invoke(&request).unwrap();
//! ```

pub mod filesystem;
pub mod metadata;
pub mod path;
pub mod unquote;

pub use filesystem::{register, FileSystem, COMPONENT_TYPE};
pub use metadata::FileSystemMetadata;
pub use unquote::{unquote, UnquoteError};
