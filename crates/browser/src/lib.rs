//! Chromiumoxide-backed implementations of the audit collaborators: Chrome
//! detection, the per-attempt launcher, CDP cookie injection, and the default
//! audit engine.
//!
//! Every attempt gets its own headless Chrome process with a throwaway
//! profile; nothing survives between attempts.

pub mod cdp;
pub mod detect;
pub mod engine;
pub mod error;
pub mod launcher;

pub use {
    engine::CdpAuditEngine,
    error::BrowserError,
    launcher::{ChromeLauncher, ChromeSession, LauncherConfig},
};
