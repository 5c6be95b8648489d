//! Process-wide list of modules linked into the host binary.
//!
//! # Responsibility
//! - Accept self-registration from modules linked at build time.
//! - Hand the host a snapshot to initialize through the generic loader path.
//!
//! # Invariants
//! - The same module instance appears at most once.
//! - Registration order is kept but carries no meaning; the loader tolerates any order.

use crate::extension::module::{ExtensionModule, ModuleIdentity};
use log::{debug, info};
use once_cell::sync::Lazy;
use std::sync::{Mutex, MutexGuard};

static LINKED_MODULES: Lazy<Mutex<Vec<&'static dyn ExtensionModule>>> =
    Lazy::new(|| Mutex::new(Vec::new()));

fn linked_modules_guard() -> MutexGuard<'static, Vec<&'static dyn ExtensionModule>> {
    // Entries are plain references; a poisoned list is still consistent.
    LINKED_MODULES
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Adds `module` to the linked-module list.
///
/// Returns `false` when this exact instance was already registered.
pub fn register_linked_module(module: &'static dyn ExtensionModule) -> bool {
    let mut linked = linked_modules_guard();
    let identity = ModuleIdentity::of(module);
    if linked
        .iter()
        .any(|known| ModuleIdentity::of(*known) == identity)
    {
        debug!(
            "event=linked_register module=loader status=skipped reason=already_linked name={}",
            module.name()
        );
        return false;
    }
    linked.push(module);
    info!(
        "event=linked_register module=loader status=ok name={} linked={}",
        module.name(),
        linked.len()
    );
    true
}

/// Returns the currently linked modules.
pub fn linked_modules() -> Vec<&'static dyn ExtensionModule> {
    linked_modules_guard().clone()
}
