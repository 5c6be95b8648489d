//! Extension module registration protocol.
//!
//! This module defines the descriptor contract extension modules implement and
//! the host-side loader that activates them. Three activation paths exist
//! (exported symbol, linked self-registration, build-time manifest); a module
//! build wires in exactly one of them.

pub mod dylib;
pub mod interpreter;
pub mod linked;
pub mod loader;
pub mod manifest;
pub mod module;
pub mod scenario;
pub mod symbol;
