//! Platform loader for standalone module libraries.
//!
//! # Responsibility
//! - Open module libraries from disk.
//! - Resolve their `<library>_mod` export for the dynamic load path.
//!
//! # Invariants
//! - Opened libraries stay mapped until process exit. Registered factories
//!   point into module code, so nothing is ever unloaded.
//!
//! # ABI
//! The `<library>_mod` export is a `&'static dyn ExtensionModule`, a Rust
//! trait-object pointer without a stable layout. Host and module must be built
//! by the same `rustc` against the same `nestmod_core` version.

use crate::extension::module::ExtensionModule;
use crate::extension::symbol::{is_valid_library_name, SymbolResolver};
use libloading::Library;
use log::{error, info};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures while opening a module library.
#[derive(Debug, Error)]
pub enum DylibError {
    #[error("failed to open module library {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },
    #[error("library name is not a valid identifier: `{0}`")]
    InvalidLibraryName(String),
}

/// Resolves activation symbols from libraries opened at runtime.
///
/// Libraries are searched in open order; the first export wins.
#[derive(Debug, Default)]
pub struct DylibResolver {
    libraries: Vec<(PathBuf, &'static Library)>,
}

impl DylibResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the library at `path` and keeps it mapped for the process lifetime.
    ///
    /// # Safety
    /// Opening runs the library's initialization routines, and `resolve` reads
    /// its exports as `&'static dyn ExtensionModule`. `path` must name a module
    /// library built under the ABI rules in the module docs.
    pub unsafe fn open(&mut self, path: &Path) -> Result<(), DylibError> {
        let library = Library::new(path).map_err(|source| {
            error!(
                "event=dylib_open module=loader status=error path={} error={source}",
                path.display()
            );
            DylibError::Open {
                path: path.to_path_buf(),
                source,
            }
        })?;
        self.libraries
            .push((path.to_path_buf(), Box::leak(Box::new(library))));
        info!(
            "event=dylib_open module=loader status=ok path={} libraries={}",
            path.display(),
            self.libraries.len()
        );
        Ok(())
    }

    /// Opens `library` from `dir` under the platform file name
    /// (`libcerebmodule.so`, `cerebmodule.dll`, ...). Returns the opened path.
    ///
    /// # Safety
    /// Same contract as [`DylibResolver::open`].
    pub unsafe fn open_in(&mut self, dir: &Path, library: &str) -> Result<PathBuf, DylibError> {
        if !is_valid_library_name(library) {
            return Err(DylibError::InvalidLibraryName(library.to_string()));
        }
        let path = dir.join(libloading::library_filename(library));
        self.open(&path)?;
        Ok(path)
    }

    /// Paths of the opened libraries, in open order.
    pub fn paths(&self) -> Vec<&Path> {
        self.libraries
            .iter()
            .map(|(path, _)| path.as_path())
            .collect()
    }
}

impl SymbolResolver for DylibResolver {
    fn resolve(&self, symbol: &str) -> Option<&'static dyn ExtensionModule> {
        self.libraries.iter().find_map(|(_, library)| {
            // SAFETY: `open` only admits module libraries, where `symbol` names a
            // `&'static dyn ExtensionModule` static. The library is never unloaded.
            unsafe {
                let export = library
                    .get::<*const &'static dyn ExtensionModule>(symbol.as_bytes())
                    .ok()?;
                let slot: *const &'static dyn ExtensionModule = *export;
                slot.as_ref().copied()
            }
        })
    }
}
