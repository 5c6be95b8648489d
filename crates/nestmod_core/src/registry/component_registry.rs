//! In-process component registry used by the host.
//!
//! # Responsibility
//! - Store named model factories for the lifetime of the host process.
//! - Serve lookups and instantiation requests after startup.
//!
//! # Invariants
//! - Entries are never overwritten or removed.
//! - Failed registrations leave the registry unchanged.
//! - Lookups are exact-match on the registered name.

use crate::model::kind::{Model, ModelKind};
use crate::registry::factory::ModelFactory;
use crate::registry::{RegistryError, RegistryHandle, RegistryResult};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One registered model type.
#[derive(Debug, Clone)]
pub struct ModelEntry {
    pub name: String,
    pub kind: ModelKind,
    pub factory: ModelFactory,
}

/// Serializable registry listing row.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModelSummary {
    pub name: String,
    pub kind: ModelKind,
}

/// Host-owned name→factory map.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    entries: BTreeMap<String, ModelEntry>,
    ready: bool,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Closes the registry for startup registration.
    ///
    /// Calling this more than once is a no-op.
    pub fn mark_ready(&mut self) {
        if !self.ready {
            info!(
                "event=registry_ready module=registry status=ok models={}",
                self.entries.len()
            );
        }
        self.ready = true;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns the entry registered under exactly `name`.
    pub fn lookup(&self, name: &str) -> RegistryResult<&ModelEntry> {
        self.entries
            .get(name)
            .ok_or_else(|| RegistryError::ModelNotFound(name.to_string()))
    }

    /// Instantiates one model by name.
    ///
    /// # Errors
    /// - `ModelNotFound` when nothing is registered under `name`.
    /// - `KindMismatch` when the factory produces a different kind than registered.
    pub fn create(&self, name: &str) -> RegistryResult<Box<dyn Model>> {
        let entry = self.lookup(name)?;
        let instance = entry.factory.create();
        if instance.kind() != entry.kind {
            return Err(RegistryError::KindMismatch {
                name: entry.name.clone(),
                registered: entry.kind,
                produced: instance.kind(),
            });
        }
        Ok(instance)
    }

    /// Returns registered names in sorted order.
    pub fn model_names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn models_of_kind(&self, kind: ModelKind) -> Vec<&ModelEntry> {
        self.entries
            .values()
            .filter(|entry| entry.kind == kind)
            .collect()
    }

    /// Returns a sorted, comparable listing of all entries.
    pub fn summaries(&self) -> Vec<ModelSummary> {
        self.entries
            .values()
            .map(|entry| ModelSummary {
                name: entry.name.clone(),
                kind: entry.kind,
            })
            .collect()
    }
}

impl RegistryHandle for ModelRegistry {
    fn register_model(
        &mut self,
        name: &str,
        factory: ModelFactory,
        kind: ModelKind,
    ) -> RegistryResult<()> {
        if self.ready {
            error!(
                "event=model_register module=registry status=error error_code=post_startup name={name} kind={kind}"
            );
            return Err(RegistryError::PostStartupRegistration {
                name: name.to_string(),
            });
        }
        if name.is_empty() {
            return Err(RegistryError::InvalidModelName);
        }
        if let Some(existing) = self.entries.get(name) {
            error!(
                "event=model_register module=registry status=error error_code=duplicate_name name={name} kind={kind} existing_kind={}",
                existing.kind
            );
            return Err(RegistryError::DuplicateName {
                name: name.to_string(),
                kind: existing.kind,
            });
        }

        info!(
            "event=model_register module=registry status=ok name={name} kind={kind} type={}",
            factory.type_name()
        );
        self.entries.insert(
            name.to_string(),
            ModelEntry {
                name: name.to_string(),
                kind,
                factory,
            },
        );
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}

#[cfg(test)]
mod tests {
    use super::ModelRegistry;
    use crate::model::kind::{Model, ModelKind};
    use crate::registry::factory::ModelFactory;
    use crate::registry::{RegistryError, RegistryHandle};

    #[derive(Debug, Default)]
    struct Neuron;

    impl Model for Neuron {
        fn kind(&self) -> ModelKind {
            ModelKind::Node
        }
    }

    #[derive(Debug, Default)]
    struct OtherNeuron;

    impl Model for OtherNeuron {
        fn kind(&self) -> ModelKind {
            ModelKind::Node
        }
    }

    #[test]
    fn registers_and_creates_model() {
        let mut registry = ModelRegistry::new();
        registry
            .register_model("iaf_test", ModelFactory::of::<Neuron>(), ModelKind::Node)
            .expect("registration should succeed");

        let instance = registry.create("iaf_test").expect("model should instantiate");
        assert_eq!(instance.kind(), ModelKind::Node);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn duplicate_registration_keeps_first_entry() {
        let mut registry = ModelRegistry::new();
        registry
            .register_model("iaf_test", ModelFactory::of::<Neuron>(), ModelKind::Node)
            .expect("first registration should succeed");

        for _ in 0..3 {
            let err = registry
                .register_model(
                    "iaf_test",
                    ModelFactory::of::<OtherNeuron>(),
                    ModelKind::Node,
                )
                .expect_err("duplicate must fail");
            assert!(matches!(err, RegistryError::DuplicateName { .. }));
        }

        let entry = registry.lookup("iaf_test").expect("entry should remain");
        assert!(entry.factory.type_name().ends_with("::Neuron"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn rejects_empty_name() {
        let mut registry = ModelRegistry::new();
        let err = registry
            .register_model("", ModelFactory::of::<Neuron>(), ModelKind::Node)
            .expect_err("empty name must fail");
        assert_eq!(err, RegistryError::InvalidModelName);
        assert!(registry.is_empty());
    }

    #[test]
    fn rejects_registration_after_ready() {
        let mut registry = ModelRegistry::new();
        registry.mark_ready();
        let err = registry
            .register_model("late", ModelFactory::of::<Neuron>(), ModelKind::Node)
            .expect_err("post-startup registration must fail");
        assert_eq!(
            err,
            RegistryError::PostStartupRegistration {
                name: "late".to_string()
            }
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn lookup_is_exact_match() {
        let mut registry = ModelRegistry::new();
        registry
            .register_model("iaf_test", ModelFactory::of::<Neuron>(), ModelKind::Node)
            .expect("registration should succeed");

        assert!(registry.lookup("IAF_TEST").is_err());
        assert!(registry.lookup(" iaf_test").is_err());
    }

    #[test]
    fn create_reports_kind_mismatch() {
        let mut registry = ModelRegistry::new();
        registry
            .register_model("mislabeled", ModelFactory::of::<Neuron>(), ModelKind::Synapse)
            .expect("registration should succeed");

        let err = registry
            .create("mislabeled")
            .expect_err("kind mismatch must be reported");
        assert!(matches!(
            err,
            RegistryError::KindMismatch {
                registered: ModelKind::Synapse,
                produced: ModelKind::Node,
                ..
            }
        ));
    }

    #[test]
    fn filters_by_kind() {
        let mut registry = ModelRegistry::new();
        registry
            .register_model("a_node", ModelFactory::of::<Neuron>(), ModelKind::Node)
            .expect("node registration");
        registry
            .register_model("b_syn", ModelFactory::of::<Neuron>(), ModelKind::Synapse)
            .expect("synapse registration");

        assert_eq!(registry.models_of_kind(ModelKind::Node).len(), 1);
        assert_eq!(registry.model_names(), vec!["a_node", "b_syn"]);
    }
}
