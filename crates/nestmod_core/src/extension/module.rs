//! Module descriptor contract.

use crate::registry::{RegistryHandle, RegistryResult};
use std::any::TypeId;

/// Descriptor every extension module exposes to the host.
///
/// The host calls `init` at most once per module instance; implementations
/// must not keep their own re-entry state.
///
/// An instance is identified by its address together with its concrete type.
/// Zero-sized descriptors of one type are indistinguishable and count as a
/// single instance.
pub trait ExtensionModule: Sync + 'static {
    /// Fixed, non-empty display name for diagnostics and module listing.
    fn name(&self) -> &str;

    /// Companion interpreter command run after native registration.
    ///
    /// Empty when the module needs no companion step.
    fn command_string(&self) -> &str;

    /// Registers every model the module offers.
    ///
    /// # Errors
    /// - Propagates the first registry error unchanged; later models are not attempted.
    fn init(&self, registry: &mut dyn RegistryHandle) -> RegistryResult<()>;

    /// Concrete descriptor type. Implementations keep the provided body.
    fn descriptor_type(&self) -> TypeId {
        TypeId::of::<Self>()
    }
}

/// Identity of one module instance, independent of its display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ModuleIdentity {
    addr: usize,
    descriptor: TypeId,
}

impl ModuleIdentity {
    pub(crate) fn of(module: &dyn ExtensionModule) -> Self {
        Self {
            addr: module as *const _ as *const () as usize,
            descriptor: module.descriptor_type(),
        }
    }
}
