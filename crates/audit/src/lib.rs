//! Audit orchestration core: per-request config resolution, sequential
//! isolated audit attempts against fresh browser instances, best-score
//! selection, and client/server fault classification.
//!
//! The browser launcher, remote-debugging cookie client, and audit engine are
//! collaborators behind the traits in [`engine`]; `pharos-browser` provides
//! the chromiumoxide-backed implementations.

pub mod attempt;
pub mod config;
pub mod engine;
pub mod error;
pub mod orchestrator;
pub mod outcome;
pub mod profiles;
pub mod request;

pub use {
    config::{RunConfig, RunDefaults, SessionCookie},
    engine::{AuditRunner, Engine, EngineOptions, Launcher, Runner, Session},
    error::{AuditError, Fault, Result},
    orchestrator::orchestrate,
    outcome::{AttemptResult, RunOutcome},
    profiles::{Device, ThrottlingProfile},
    request::ReportRequest,
};
