//! Model kind tags and the capability trait.

use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};

/// Category a model type is registered under.
///
/// Serialized in snake_case to match host listing output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Neuron or device model instantiated as a network node.
    Node,
    /// Connection model instantiated between nodes.
    Synapse,
}

impl ModelKind {
    /// Stable string id used in listings and log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Synapse => "synapse",
        }
    }
}

impl Display for ModelKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability contract for anything the component registry can construct.
///
/// Implementors are expected to be cheap to default-construct; the registry
/// never inspects their internal state.
pub trait Model: Debug + Send + Sync {
    /// Kind this instance belongs to.
    fn kind(&self) -> ModelKind;

    /// Concrete Rust type name, used for diagnostics only.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
