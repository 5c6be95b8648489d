//! Model-module registration core for the simulation host.
//! Extension modules depend on this crate to announce their model types.

pub mod config;
pub mod extension;
pub mod logging;
pub mod model;
pub mod registry;

pub use config::{ConfigError, HostConfig};
pub use extension::dylib::{DylibError, DylibResolver};
pub use extension::interpreter::{CommandInterpreter, CommandLog, InterpreterError};
pub use extension::linked::{linked_modules, register_linked_module};
pub use extension::loader::{LoadError, LoadResult, LoadedModule, ModuleLoader};
pub use extension::manifest::StaticManifest;
pub use extension::module::ExtensionModule;
pub use extension::scenario::LoadScenario;
pub use extension::symbol::{module_symbol, SymbolResolver, SymbolTable};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::kind::{Model, ModelKind};
pub use registry::{
    FactoryBinding, ModelEntry, ModelFactory, ModelRegistry, ModelSummary, RegistryError,
    RegistryHandle, RegistryResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
