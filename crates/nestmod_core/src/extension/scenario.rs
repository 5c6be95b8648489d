//! Load scenario selector.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Mechanism that wired a module's `init` into host startup.
///
/// A module build compiles in exactly one scenario; the host only records
/// which one was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadScenario {
    /// Loaded on demand by an explicit host command through an exported symbol.
    DynamicLoad,
    /// Linked into the host and self-registered with the loader.
    LinkTimeStatic,
    /// Listed in a build-time manifest.
    CompileTimeStatic,
}

impl LoadScenario {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DynamicLoad => "dynamic_load",
            Self::LinkTimeStatic => "link_time_static",
            Self::CompileTimeStatic => "compile_time_static",
        }
    }
}

impl Display for LoadScenario {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
