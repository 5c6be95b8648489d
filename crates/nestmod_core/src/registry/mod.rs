//! Component registry contract and in-process host registry.
//!
//! # Responsibility
//! - Define the `register_model` contract extension modules call.
//! - Provide the host-side name→factory map that honors that contract.
//!
//! # Invariants
//! - A model name is registered at most once per registry lifetime.
//! - Once the registry is marked ready, no further registration is accepted.

use crate::model::kind::ModelKind;
use thiserror::Error;

pub mod component_registry;
pub mod factory;

pub use component_registry::{ModelEntry, ModelRegistry, ModelSummary};
pub use factory::{FactoryBinding, ModelFactory};

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Registration handle a module's `init` routine receives from the host.
pub trait RegistryHandle {
    /// Adds one named factory to the registry.
    ///
    /// # Errors
    /// - `DuplicateName` when `name` is already present; the existing entry is kept.
    /// - `PostStartupRegistration` once the host has signaled ready.
    /// - `InvalidModelName` when `name` is empty.
    fn register_model(
        &mut self,
        name: &str,
        factory: ModelFactory,
        kind: ModelKind,
    ) -> RegistryResult<()>;

    /// Whether the host has closed the registry for startup registration.
    fn is_ready(&self) -> bool;
}

/// Component registry errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("model name must not be empty")]
    InvalidModelName,
    #[error("model name already registered: {name} ({kind})")]
    DuplicateName { name: String, kind: ModelKind },
    /// `name` is the model, or the module when the loader refuses it before `init`.
    #[error("registry is ready; refusing post-startup registration of {name}")]
    PostStartupRegistration { name: String },
    #[error("model not found: {0}")]
    ModelNotFound(String),
    #[error("model {name} is registered as {registered} but its factory produced {produced}")]
    KindMismatch {
        name: String,
        registered: ModelKind,
        produced: ModelKind,
    },
}
