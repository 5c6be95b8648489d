//! Build-time selection of how `CEREB_MODULE` reaches host startup.
//!
//! - no feature: standalone loadable unit, found through `cerebmodule_mod`;
//! - `linked-module`: linked into the host, self-registers with the loader;
//! - `static-manifest`: listed in a build-time manifest.
//!
//! Each variant compiles its own `activate`; nothing branches at runtime.

#[cfg(all(feature = "linked-module", feature = "static-manifest"))]
compile_error!("features `linked-module` and `static-manifest` are mutually exclusive");

use nestmod_core::{
    CommandInterpreter, LoadResult, LoadScenario, ModuleLoader, RegistryHandle,
};

/// Scenario compiled into this build.
pub const ACTIVE_SCENARIO: LoadScenario = if cfg!(feature = "linked-module") {
    LoadScenario::LinkTimeStatic
} else if cfg!(feature = "static-manifest") {
    LoadScenario::CompileTimeStatic
} else {
    LoadScenario::DynamicLoad
};

#[cfg(not(any(feature = "linked-module", feature = "static-manifest")))]
mod dynamic_load {
    use crate::{CEREB_MODULE, LIBRARY_NAME};
    use nestmod_core::{module_symbol, ExtensionModule, SymbolTable};

    /// Activation symbol `DylibResolver` reads from the built `cdylib`.
    ///
    /// A Rust trait-object pointer: the host must be built by the same `rustc`
    /// against the same `nestmod_core`.
    #[allow(non_upper_case_globals)]
    #[no_mangle]
    pub static cerebmodule_mod: &'static dyn ExtensionModule = &CEREB_MODULE;

    /// Export table for hosts that already have this unit in their address space.
    pub fn export_table() -> SymbolTable {
        let mut table = SymbolTable::new();
        table.export(module_symbol(LIBRARY_NAME), cerebmodule_mod);
        table
    }
}

#[cfg(not(any(feature = "linked-module", feature = "static-manifest")))]
pub use dynamic_load::{cerebmodule_mod, export_table};

/// Loads the module the way an explicit install command would, resolving the
/// export from this unit's own address space.
#[cfg(not(any(feature = "linked-module", feature = "static-manifest")))]
pub fn activate(
    loader: &mut ModuleLoader,
    registry: &mut dyn RegistryHandle,
    interpreter: &mut dyn CommandInterpreter,
) -> LoadResult<()> {
    loader
        .install(crate::LIBRARY_NAME, &export_table(), registry, interpreter)
        .map(|_| ())
}

#[cfg(feature = "linked-module")]
mod linked_module {
    use crate::CEREB_MODULE;
    use nestmod_core::register_linked_module;
    use std::sync::Once;

    static LINKED: Once = Once::new();

    /// Self-registers the descriptor with the host's linked-module list.
    ///
    /// Safe to call from every place that references the module.
    pub fn link() {
        LINKED.call_once(|| {
            register_linked_module(&CEREB_MODULE);
        });
    }
}

#[cfg(feature = "linked-module")]
pub use linked_module::link;

/// Self-registers, then lets the loader initialize all linked modules.
#[cfg(feature = "linked-module")]
pub fn activate(
    loader: &mut ModuleLoader,
    registry: &mut dyn RegistryHandle,
    interpreter: &mut dyn CommandInterpreter,
) -> LoadResult<()> {
    link();
    loader
        .initialize_linked_modules(registry, interpreter)
        .map(|_| ())
}

#[cfg(feature = "static-manifest")]
nestmod_core::static_manifest!(pub STATIC_MODULES = [crate::CEREB_MODULE]);

/// Bootstraps the build-time manifest in declaration order.
#[cfg(feature = "static-manifest")]
pub fn activate(
    loader: &mut ModuleLoader,
    registry: &mut dyn RegistryHandle,
    interpreter: &mut dyn CommandInterpreter,
) -> LoadResult<()> {
    loader
        .bootstrap_static(&STATIC_MODULES, registry, interpreter)
        .map(|_| ())
}
