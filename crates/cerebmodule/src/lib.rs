//! Cereb extension module.
//!
//! # Responsibility
//! - Describe the module to the host (display name, companion command).
//! - Register the `eglif_cond_alpha_multisyn` node model exactly once.
//! - Wire that registration into host startup through the build's load scenario.
//!
//! # Invariants
//! - `CEREB_MODULE` is the only descriptor instance every activation path uses.
//! - `init` keeps no state; the loader guarantees it runs at most once.

mod activation;
pub mod eglif;

use eglif::{EglifCondAlphaMultisyn, EGLIF_COND_ALPHA_MULTISYN};
use log::debug;
use nestmod_core::{ExtensionModule, FactoryBinding, RegistryHandle, RegistryResult};

pub use activation::{activate, ACTIVE_SCENARIO};
#[cfg(not(any(feature = "linked-module", feature = "static-manifest")))]
pub use activation::{cerebmodule_mod, export_table};
#[cfg(feature = "linked-module")]
pub use activation::link;
#[cfg(feature = "static-manifest")]
pub use activation::STATIC_MODULES;

/// Display name reported to the host's module listing.
pub const MODULE_NAME: &str = "Cereb Module";
/// Library name the host uses to locate the activation symbol.
pub const LIBRARY_NAME: &str = "cerebmodule";
/// Interpreter command that loads the module's companion script.
pub const COMMAND_STRING: &str = "(cerebmodule-init) run";

/// Module descriptor.
#[derive(Debug)]
pub struct CerebModule {
    library: &'static str,
}

impl CerebModule {
    pub const fn new() -> Self {
        Self {
            library: LIBRARY_NAME,
        }
    }

    /// Library name this descriptor is exported under.
    pub fn library(&self) -> &str {
        self.library
    }

    /// Bindings for every model this module offers, in registration order.
    pub fn bindings(&self) -> Vec<FactoryBinding> {
        // Synapse types would be added here with `FactoryBinding::synapse`.
        vec![FactoryBinding::node::<EglifCondAlphaMultisyn>(
            EGLIF_COND_ALPHA_MULTISYN,
        )]
    }
}

impl ExtensionModule for CerebModule {
    fn name(&self) -> &str {
        MODULE_NAME
    }

    fn command_string(&self) -> &str {
        COMMAND_STRING
    }

    fn init(&self, registry: &mut dyn RegistryHandle) -> RegistryResult<()> {
        for binding in self.bindings() {
            debug!(
                "event=module_init module=cerebmodule status=register name={} kind={}",
                binding.name(),
                binding.kind()
            );
            binding.register_into(registry)?;
        }
        Ok(())
    }
}

impl Default for CerebModule {
    fn default() -> Self {
        Self::new()
    }
}

/// The module's singleton descriptor.
pub static CEREB_MODULE: CerebModule = CerebModule::new();
