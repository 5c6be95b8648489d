//! Host-side module loader.
//!
//! # Responsibility
//! - Run each module's `init` exactly once, through one of three activation paths.
//! - Run the companion command after native registration succeeds.
//! - Keep the host's listing of loaded modules.
//!
//! # Invariants
//! - `init` never runs for a module instance that is already loaded.
//! - `init` never runs against a registry that is already marked ready.
//! - A failed load is terminal; nothing is retried.

use crate::extension::interpreter::{CommandInterpreter, InterpreterError};
use crate::extension::linked::linked_modules;
use crate::extension::manifest::StaticManifest;
use crate::extension::module::{ExtensionModule, ModuleIdentity};
use crate::extension::scenario::LoadScenario;
use crate::extension::symbol::{is_valid_library_name, module_symbol, SymbolResolver};
use crate::model::kind::ModelKind;
use crate::registry::{ModelFactory, RegistryError, RegistryHandle, RegistryResult};
use log::{error, info, warn};
use serde::Serialize;
use std::time::Instant;
use thiserror::Error;
use uuid::Uuid;

pub type LoadResult<T> = Result<T, LoadError>;

/// Terminal failures of one module load attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("module `{module}` failed to register its models: {source}")]
    Registration {
        module: String,
        #[source]
        source: RegistryError,
    },
    #[error("library `{library}` does not export activation symbol `{symbol}`")]
    MissingActivationPoint { library: String, symbol: String },
    #[error("library name is not a valid identifier: `{0}`")]
    InvalidLibraryName(String),
    #[error("module `{module}` is already loaded")]
    AlreadyLoaded { module: String },
    #[error("companion command `{command}` of module `{module}` failed: {source}")]
    CompanionCommand {
        module: String,
        command: String,
        #[source]
        source: InterpreterError,
    },
}

/// Host record of one successful module load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadedModule {
    pub load_id: Uuid,
    pub name: String,
    pub command: String,
    pub scenario: LoadScenario,
    /// Models this module registered, in registration order.
    pub models: Vec<String>,
    #[serde(skip)]
    instance: ModuleIdentity,
}

/// Drives module activation for all three load scenarios.
#[derive(Debug)]
pub struct ModuleLoader {
    loaded: Vec<LoadedModule>,
    run_companion_commands: bool,
}

impl Default for ModuleLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleLoader {
    pub fn new() -> Self {
        Self {
            loaded: Vec::new(),
            run_companion_commands: true,
        }
    }

    /// Enables or disables companion command execution after registration.
    pub fn with_companion_commands(mut self, enabled: bool) -> Self {
        self.run_companion_commands = enabled;
        self
    }

    /// Modules loaded so far, in load order.
    pub fn loaded(&self) -> &[LoadedModule] {
        &self.loaded
    }

    pub fn is_loaded(&self, module: &dyn ExtensionModule) -> bool {
        let identity = ModuleIdentity::of(module);
        self.loaded.iter().any(|entry| entry.instance == identity)
    }

    /// Dynamic load path: resolves `<library>_mod` and initializes that module.
    ///
    /// # Errors
    /// - `InvalidLibraryName` when `library` is not a plain identifier.
    /// - `MissingActivationPoint` when the resolver has no such symbol.
    /// - Any error of the shared load step.
    pub fn install(
        &mut self,
        library: &str,
        symbols: &dyn SymbolResolver,
        registry: &mut dyn RegistryHandle,
        interpreter: &mut dyn CommandInterpreter,
    ) -> LoadResult<&LoadedModule> {
        if !is_valid_library_name(library) {
            error!(
                "event=module_install module=loader status=error error_code=invalid_library library={library}"
            );
            return Err(LoadError::InvalidLibraryName(library.to_string()));
        }
        let symbol = module_symbol(library);
        let Some(module) = symbols.resolve(&symbol) else {
            error!(
                "event=module_install module=loader status=error error_code=missing_symbol library={library} symbol={symbol}"
            );
            return Err(LoadError::MissingActivationPoint {
                library: library.to_string(),
                symbol,
            });
        };

        let index = self.load_module(module, LoadScenario::DynamicLoad, registry, interpreter)?;
        Ok(&self.loaded[index])
    }

    /// Link-time path: initializes every self-registered module not yet loaded.
    ///
    /// Returns the number of modules initialized by this call.
    pub fn initialize_linked_modules(
        &mut self,
        registry: &mut dyn RegistryHandle,
        interpreter: &mut dyn CommandInterpreter,
    ) -> LoadResult<usize> {
        self.initialize_linked(&linked_modules(), registry, interpreter)
    }

    /// Link-time path over an explicit module list.
    ///
    /// Already loaded instances are skipped, so the same list can be passed
    /// more than once.
    pub fn initialize_linked(
        &mut self,
        modules: &[&'static dyn ExtensionModule],
        registry: &mut dyn RegistryHandle,
        interpreter: &mut dyn CommandInterpreter,
    ) -> LoadResult<usize> {
        let mut initialized = 0;
        for module in modules {
            if self.is_loaded(*module) {
                continue;
            }
            self.load_module(*module, LoadScenario::LinkTimeStatic, registry, interpreter)?;
            initialized += 1;
        }
        Ok(initialized)
    }

    /// Compile-time path: initializes manifest modules in manifest order.
    ///
    /// Unlike the link-time path, a module listed twice is an error.
    pub fn bootstrap_static(
        &mut self,
        manifest: &StaticManifest,
        registry: &mut dyn RegistryHandle,
        interpreter: &mut dyn CommandInterpreter,
    ) -> LoadResult<usize> {
        for module in manifest.modules() {
            self.load_module(*module, LoadScenario::CompileTimeStatic, registry, interpreter)?;
        }
        Ok(manifest.len())
    }

    fn load_module(
        &mut self,
        module: &'static dyn ExtensionModule,
        scenario: LoadScenario,
        registry: &mut dyn RegistryHandle,
        interpreter: &mut dyn CommandInterpreter,
    ) -> LoadResult<usize> {
        let started_at = Instant::now();
        let name = module.name().to_string();
        info!("event=module_load module=loader status=start name={name} scenario={scenario}");

        if self.is_loaded(module) {
            error!(
                "event=module_load module=loader status=error error_code=already_loaded name={name} scenario={scenario}"
            );
            return Err(LoadError::AlreadyLoaded { module: name });
        }
        if registry.is_ready() {
            error!(
                "event=module_load module=loader status=error error_code=registry_ready name={name} scenario={scenario}"
            );
            return Err(LoadError::Registration {
                module: name.clone(),
                source: RegistryError::PostStartupRegistration { name },
            });
        }
        if self.loaded.iter().any(|entry| entry.name == name) {
            warn!("event=module_load module=loader status=warn reason=duplicate_module_name name={name}");
        }

        let mut recorder = RecordingHandle {
            inner: registry,
            registered: Vec::new(),
        };
        if let Err(err) = module.init(&mut recorder) {
            error!(
                "event=module_load module=loader status=error error_code=registration_failed name={name} scenario={scenario} duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            );
            return Err(LoadError::Registration {
                module: name,
                source: err,
            });
        }

        let command = module.command_string().to_string();
        self.loaded.push(LoadedModule {
            load_id: Uuid::new_v4(),
            name: name.clone(),
            command: command.clone(),
            scenario,
            models: recorder.registered,
            instance: ModuleIdentity::of(module),
        });
        let index = self.loaded.len() - 1;

        if self.run_companion_commands && !command.is_empty() {
            if let Err(err) = interpreter.run(&command) {
                error!(
                    "event=module_load module=loader status=error error_code=companion_failed name={name} command={command} error={err}"
                );
                return Err(LoadError::CompanionCommand {
                    module: name,
                    command,
                    source: err,
                });
            }
        }

        info!(
            "event=module_load module=loader status=ok name={name} scenario={scenario} models={} duration_ms={}",
            self.loaded[index].models.len(),
            started_at.elapsed().as_millis()
        );
        Ok(index)
    }
}

/// Forwards registrations and remembers which names succeeded.
struct RecordingHandle<'a> {
    inner: &'a mut dyn RegistryHandle,
    registered: Vec<String>,
}

impl RegistryHandle for RecordingHandle<'_> {
    fn register_model(
        &mut self,
        name: &str,
        factory: ModelFactory,
        kind: ModelKind,
    ) -> RegistryResult<()> {
        self.inner.register_model(name, factory, kind)?;
        self.registered.push(name.to_string());
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.inner.is_ready()
    }
}

#[cfg(test)]
mod tests {
    use super::{LoadError, ModuleLoader};
    use crate::extension::interpreter::{CommandInterpreter, CommandLog, InterpreterError};
    use crate::extension::module::ExtensionModule;
    use crate::extension::scenario::LoadScenario;
    use crate::extension::symbol::SymbolTable;
    use crate::model::kind::{Model, ModelKind};
    use crate::registry::{
        FactoryBinding, ModelRegistry, RegistryError, RegistryHandle, RegistryResult,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct Cell;

    impl Model for Cell {
        fn kind(&self) -> ModelKind {
            ModelKind::Node
        }
    }

    struct CountingModule {
        name: &'static str,
        model: &'static str,
        command: &'static str,
        inits: AtomicUsize,
    }

    impl CountingModule {
        const fn new(name: &'static str, model: &'static str, command: &'static str) -> Self {
            Self {
                name,
                model,
                command,
                inits: AtomicUsize::new(0),
            }
        }
    }

    impl ExtensionModule for CountingModule {
        fn name(&self) -> &str {
            self.name
        }

        fn command_string(&self) -> &str {
            self.command
        }

        fn init(&self, registry: &mut dyn RegistryHandle) -> RegistryResult<()> {
            self.inits.fetch_add(1, Ordering::SeqCst);
            FactoryBinding::node::<Cell>(self.model).register_into(registry)
        }
    }

    struct SomaModule;
    struct DendriteModule;

    impl ExtensionModule for SomaModule {
        fn name(&self) -> &str {
            "Soma"
        }

        fn command_string(&self) -> &str {
            ""
        }

        fn init(&self, registry: &mut dyn RegistryHandle) -> RegistryResult<()> {
            FactoryBinding::node::<Cell>("soma_cell").register_into(registry)
        }
    }

    impl ExtensionModule for DendriteModule {
        fn name(&self) -> &str {
            "Dendrite"
        }

        fn command_string(&self) -> &str {
            ""
        }

        fn init(&self, registry: &mut dyn RegistryHandle) -> RegistryResult<()> {
            FactoryBinding::node::<Cell>("dendrite_cell").register_into(registry)
        }
    }

    struct FailingInterpreter;

    impl CommandInterpreter for FailingInterpreter {
        fn run(&mut self, command: &str) -> Result<(), InterpreterError> {
            Err(InterpreterError(format!("unknown file: {command}")))
        }
    }

    #[test]
    fn install_resolves_module_symbol() {
        static MODULE: CountingModule = CountingModule::new("Alpha", "alpha_cell", "(alpha-init) run");
        let mut symbols = SymbolTable::new();
        symbols.export("alphamodule_mod", &MODULE);
        let mut registry = ModelRegistry::new();
        let mut interpreter = CommandLog::new();
        let mut loader = ModuleLoader::new();

        let loaded = loader
            .install("alphamodule", &symbols, &mut registry, &mut interpreter)
            .expect("install should succeed");
        assert_eq!(loaded.scenario, LoadScenario::DynamicLoad);
        assert_eq!(loaded.models, vec!["alpha_cell"]);
        assert_eq!(interpreter.commands(), ["(alpha-init) run"]);
        assert!(registry.contains("alpha_cell"));
    }

    #[test]
    fn install_reports_missing_activation_point() {
        let symbols = SymbolTable::new();
        let mut registry = ModelRegistry::new();
        let mut loader = ModuleLoader::new();

        let err = loader
            .install("ghostmodule", &symbols, &mut registry, &mut CommandLog::new())
            .expect_err("missing symbol must fail");
        assert_eq!(
            err,
            LoadError::MissingActivationPoint {
                library: "ghostmodule".to_string(),
                symbol: "ghostmodule_mod".to_string(),
            }
        );
        assert!(loader.loaded().is_empty());
    }

    #[test]
    fn install_rejects_invalid_library_name() {
        let err = ModuleLoader::new()
            .install(
                "../evil",
                &SymbolTable::new(),
                &mut ModelRegistry::new(),
                &mut CommandLog::new(),
            )
            .expect_err("path-like library names must fail");
        assert!(matches!(err, LoadError::InvalidLibraryName(_)));
    }

    #[test]
    fn same_instance_is_initialized_once_across_paths() {
        static MODULE: CountingModule = CountingModule::new("Beta", "beta_cell", "");
        let mut symbols = SymbolTable::new();
        symbols.export("betamodule_mod", &MODULE);
        let mut registry = ModelRegistry::new();
        let mut interpreter = CommandLog::new();
        let mut loader = ModuleLoader::new();

        loader
            .install("betamodule", &symbols, &mut registry, &mut interpreter)
            .expect("first install should succeed");
        let err = loader
            .install("betamodule", &symbols, &mut registry, &mut interpreter)
            .expect_err("second install must fail");
        assert!(matches!(err, LoadError::AlreadyLoaded { .. }));

        let initialized = loader
            .initialize_linked(&[&MODULE], &mut registry, &mut interpreter)
            .expect("linked pass should skip loaded module");
        assert_eq!(initialized, 0);
        assert_eq!(MODULE.inits.load(Ordering::SeqCst), 1);
        assert!(interpreter.commands().is_empty());
    }

    #[test]
    fn refuses_to_load_into_ready_registry() {
        static MODULE: CountingModule = CountingModule::new("Gamma", "gamma_cell", "");
        let mut registry = ModelRegistry::new();
        registry.mark_ready();

        let err = ModuleLoader::new()
            .initialize_linked(&[&MODULE], &mut registry, &mut CommandLog::new())
            .expect_err("ready registry must reject loads");
        assert_eq!(
            err,
            LoadError::Registration {
                module: "Gamma".to_string(),
                source: RegistryError::PostStartupRegistration {
                    name: "Gamma".to_string(),
                },
            }
        );
        assert_eq!(MODULE.inits.load(Ordering::SeqCst), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn duplicate_display_names_are_allowed() {
        static FIRST: CountingModule = CountingModule::new("Shared", "first_cell", "");
        static SECOND: CountingModule = CountingModule::new("Shared", "second_cell", "");
        let mut registry = ModelRegistry::new();
        let mut loader = ModuleLoader::new();

        let initialized = loader
            .initialize_linked(&[&FIRST, &SECOND], &mut registry, &mut CommandLog::new())
            .expect("distinct instances should load");
        assert_eq!(initialized, 2);
        assert_eq!(loader.loaded().len(), 2);
    }

    #[test]
    fn zero_sized_modules_of_different_types_both_load() {
        static SOMA: SomaModule = SomaModule;
        static DENDRITE: DendriteModule = DendriteModule;
        let mut registry = ModelRegistry::new();
        let mut loader = ModuleLoader::new();

        let initialized = loader
            .initialize_linked(&[&SOMA, &DENDRITE], &mut registry, &mut CommandLog::new())
            .expect("distinct modules should load");
        assert_eq!(initialized, 2);
        assert_eq!(registry.model_names(), vec!["dendrite_cell", "soma_cell"]);
        assert!(loader.is_loaded(&SOMA));
        assert!(loader.is_loaded(&DENDRITE));

        let mut symbols = SymbolTable::new();
        symbols.export("somamodule_mod", &SOMA);
        let err = loader
            .install("somamodule", &symbols, &mut registry, &mut CommandLog::new())
            .expect_err("loaded module must not load again");
        assert_eq!(
            err,
            LoadError::AlreadyLoaded {
                module: "Soma".to_string()
            }
        );
    }

    #[test]
    fn companion_failure_keeps_native_registrations() {
        static MODULE: CountingModule = CountingModule::new("Delta", "delta_cell", "(delta-init) run");
        let mut symbols = SymbolTable::new();
        symbols.export("deltamodule_mod", &MODULE);
        let mut registry = ModelRegistry::new();
        let mut loader = ModuleLoader::new();

        let err = loader
            .install("deltamodule", &symbols, &mut registry, &mut FailingInterpreter)
            .expect_err("companion failure must surface");
        assert!(matches!(err, LoadError::CompanionCommand { .. }));
        assert!(registry.contains("delta_cell"));
        assert!(loader.is_loaded(&MODULE));
    }

    #[test]
    fn companion_commands_can_be_disabled() {
        static MODULE: CountingModule = CountingModule::new("Epsilon", "epsilon_cell", "(eps) run");
        let mut registry = ModelRegistry::new();
        let mut interpreter = CommandLog::new();
        let mut loader = ModuleLoader::new().with_companion_commands(false);

        loader
            .initialize_linked(&[&MODULE], &mut registry, &mut interpreter)
            .expect("load should succeed");
        assert!(interpreter.commands().is_empty());
        assert_eq!(loader.loaded()[0].command, "(eps) run");
    }
}
