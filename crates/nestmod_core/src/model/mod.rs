//! Model capability contract shared by host and extension modules.
//!
//! # Responsibility
//! - Define the minimal interface every registrable model type satisfies.
//! - Keep model numerics opaque: the host only constructs and tags instances.
//!
//! # Invariants
//! - Every model instance reports exactly one `ModelKind`.
//! - A model type registered as `Node` must produce `Node` instances.

pub mod kind;
