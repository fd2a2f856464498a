//! HTTP surface for the weather lookup service.
//!
//! The binary in `main.rs` wires configuration, logging, and the router
//! together; everything else lives here so integration tests can drive the
//! same router.

pub mod error;
pub mod logging;
pub mod routes;
pub mod state;
