//! `eglif_cond_alpha_multisyn` node model handle.
//!
//! The model's dynamics live in the simulation kernel; this type only carries
//! the identity the registry constructs and hands back to the host.

use nestmod_core::{Model, ModelKind};

/// Registry name of the extended generalized LIF neuron with alpha-shaped,
/// conductance-based multi-receptor synapses.
pub const EGLIF_COND_ALPHA_MULTISYN: &str = "eglif_cond_alpha_multisyn";

/// Opaque node model instance.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EglifCondAlphaMultisyn {
    _private: (),
}

impl Model for EglifCondAlphaMultisyn {
    fn kind(&self) -> ModelKind {
        ModelKind::Node
    }
}
