//! Build-time module manifest for the compile-time static path.
//!
//! # Responsibility
//! - Hold a fixed, ordered table of modules the host build enumerated.
//!
//! # Invariants
//! - Order is exactly the declaration order; the loader never reorders it.
//! - The table is immutable once built.

use crate::extension::module::ExtensionModule;

/// Ordered table of statically linked modules.
#[derive(Clone, Copy)]
pub struct StaticManifest {
    modules: &'static [&'static dyn ExtensionModule],
}

impl StaticManifest {
    /// Wraps a build-time module table.
    pub const fn new(modules: &'static [&'static dyn ExtensionModule]) -> Self {
        Self { modules }
    }

    pub fn modules(&self) -> &'static [&'static dyn ExtensionModule] {
        self.modules
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Display names in manifest order.
    pub fn names(&self) -> Vec<&'static str> {
        self.modules.iter().map(|module| module.name()).collect()
    }
}

/// Declares a `StaticManifest` static from module statics.
///
/// ```ignore
/// static_manifest!(pub HOST_MODULES = [cerebmodule::CEREB_MODULE]);
/// ```
#[macro_export]
macro_rules! static_manifest {
    ($vis:vis $name:ident = [$($module:path),* $(,)?]) => {
        $vis static $name: $crate::extension::manifest::StaticManifest =
            $crate::extension::manifest::StaticManifest::new(&[
                $(&$module as &'static dyn $crate::extension::module::ExtensionModule),*
            ]);
    };
}
