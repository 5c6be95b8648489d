//! Type-erased model constructors and name bindings.
//!
//! # Responsibility
//! - Turn a concrete `Model + Default` type into an opaque constructor.
//! - Pair that constructor with the name and kind it is registered under.
//!
//! # Invariants
//! - Binding names are stored verbatim: no trimming, renaming or case folding.
//! - A binding never fails on its own; name validation happens at registration.

use crate::model::kind::{Model, ModelKind};
use crate::registry::{RegistryHandle, RegistryResult};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

type Constructor = dyn Fn() -> Box<dyn Model> + Send + Sync;

/// Opaque constructor stored by the component registry.
#[derive(Clone)]
pub struct ModelFactory {
    construct: Arc<Constructor>,
    type_name: &'static str,
}

impl ModelFactory {
    /// Builds a factory producing default instances of `T`.
    pub fn of<T>() -> Self
    where
        T: Model + Default + 'static,
    {
        Self {
            construct: Arc::new(|| Box::new(T::default()) as Box<dyn Model>),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Constructs one new model instance.
    pub fn create(&self) -> Box<dyn Model> {
        (self.construct)()
    }

    /// Concrete type the factory was bound to.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl Debug for ModelFactory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelFactory")
            .field("type_name", &self.type_name)
            .finish()
    }
}

/// A model type bound to the name the interpreter layer uses for it.
#[derive(Debug, Clone)]
pub struct FactoryBinding {
    name: String,
    kind: ModelKind,
    factory: ModelFactory,
}

impl FactoryBinding {
    /// Binds a node (neuron/device) model type to `name`.
    pub fn node<T>(name: impl Into<String>) -> Self
    where
        T: Model + Default + 'static,
    {
        Self::with_kind::<T>(name, ModelKind::Node)
    }

    /// Binds a synapse model type to `name`.
    pub fn synapse<T>(name: impl Into<String>) -> Self
    where
        T: Model + Default + 'static,
    {
        Self::with_kind::<T>(name, ModelKind::Synapse)
    }

    fn with_kind<T>(name: impl Into<String>, kind: ModelKind) -> Self
    where
        T: Model + Default + 'static,
    {
        Self {
            name: name.into(),
            kind,
            factory: ModelFactory::of::<T>(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    pub fn factory(&self) -> &ModelFactory {
        &self.factory
    }

    /// Hands this binding to the registry through `register_model`.
    ///
    /// # Errors
    /// - Returns whatever the registry reports; the binding adds no errors.
    pub fn register_into(self, registry: &mut dyn RegistryHandle) -> RegistryResult<()> {
        registry.register_model(&self.name, self.factory, self.kind)
    }
}
