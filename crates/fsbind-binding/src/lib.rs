//! # fsbind-binding
//!
//! The narrow call contract between a host and its output bindings.
//!
//! A host loads a component (a type string plus [`Metadata`]), asks the
//! [`BindingRegistry`] to construct the matching [`OutputBinding`], queries
//! which [`OperationKind`]s it supports, and then calls
//! [`OutputBinding::invoke`] with one [`InvokeRequest`] per event.
//!
//! ## Quick Example
//!
//! ```rust
//! use fsbind_binding::{
//!     BindingRegistry, InvokeRequest, InvokeResponse, Metadata, OperationKind, OutputBinding,
//!     Result,
//! };
//!
//! struct Discard;
//!
//! impl OutputBinding for Discard {
//!     fn name(&self) -> &str {
//!         "discard"
//!     }
//!
//!     fn operations(&self) -> Vec<OperationKind> {
//!         vec![OperationKind::Create]
//!     }
//!
//!     fn invoke(&self, _request: &InvokeRequest) -> Result<Option<InvokeResponse>> {
//!         Ok(None)
//!     }
//! }
//!
//! fn discard(_meta: &Metadata) -> Result<Box<dyn OutputBinding>> {
//!     Ok(Box::new(Discard))
//! }
//!
//! // Connector crates ship a `register` function that does this for their bindings.
//! let mut registry = BindingRegistry::new();
//! registry.register("bindings.discard", discard);
//!
//! let binding = registry
//!     .create("bindings.discard", &Metadata::default())
//!     .unwrap();
//! let request = InvokeRequest::new(OperationKind::Create, b"\"hi\"".to_vec());
//! assert!(binding.supports(request.operation));
//! assert!(binding.invoke(&request).unwrap().is_none());
//! ```

pub mod binding;
pub mod error;
pub mod registry;
pub mod request;

pub use binding::{OperationKind, OutputBinding};
pub use error::{BindingError, Result};
pub use registry::{BindingFactory, BindingRegistry};
pub use request::{InvokeRequest, InvokeResponse, Metadata};
