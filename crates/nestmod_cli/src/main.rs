//! Smoke host for the registration protocol.
//!
//! # Responsibility
//! - Activate `cerebmodule` through its compiled load scenario, or from its
//!   built library when `NESTMOD_MODULE_DIR` is set.
//! - Print the resulting module and model listing for quick sanity checks.

use log::error;
use nestmod_core::{
    init_logging, CommandLog, DylibResolver, HostConfig, ModelRegistry, ModuleLoader,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("nestmod: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let config = HostConfig::from_env().map_err(|err| err.to_string())?;
    if let Some(log_dir) = &config.log_dir {
        init_logging(config.log_level, log_dir)?;
    }

    let mut registry = ModelRegistry::new();
    let mut loader = ModuleLoader::new().with_companion_commands(config.companion_commands);
    let mut interpreter = CommandLog::new();

    let activated = match &config.module_dir {
        Some(dir) => {
            let mut resolver = DylibResolver::new();
            // SAFETY: the directory is operator-configured to hold module
            // libraries built alongside this host.
            unsafe { resolver.open_in(dir, cerebmodule::LIBRARY_NAME) }
                .map_err(|err| err.to_string())?;
            loader
                .install(
                    cerebmodule::LIBRARY_NAME,
                    &resolver,
                    &mut registry,
                    &mut interpreter,
                )
                .map(|_| ())
        }
        None => cerebmodule::activate(&mut loader, &mut registry, &mut interpreter),
    };
    if let Err(err) = activated {
        error!("event=host_activate module=cli status=error error={err}");
        return Err(err.to_string());
    }
    registry.mark_ready();

    println!("nestmod_core version={}", nestmod_core::core_version());
    for module in loader.loaded() {
        println!(
            "module name=\"{}\" scenario={} load_id={} models={}",
            module.name,
            module.scenario,
            module.load_id,
            module.models.len()
        );
    }
    for summary in registry.summaries() {
        println!("model name={} kind={}", summary.name, summary.kind);
    }
    for command in interpreter.commands() {
        println!("companion command={command}");
    }
    Ok(())
}
