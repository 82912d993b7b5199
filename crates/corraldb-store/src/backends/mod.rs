//! Concrete store backend implementations.
//!
//! The store itself is an external dependency reached through the
//! command surface in [`crate::conn`]. This module holds the backends
//! that implement it; the in-memory reference backend ships with the
//! crate so the layer is fully testable without a server.

pub mod memory;

pub use memory::{MemoryConn, MemoryStore};
