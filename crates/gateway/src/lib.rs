//! HTTP boundary: the report endpoint, liveness probes, and fault-to-status
//! mapping. All decision logic lives in `pharos-audit`; this crate is
//! routing.

pub mod server;
pub mod state;

pub use {
    server::{build_app, start_gateway},
    state::AppState,
};
