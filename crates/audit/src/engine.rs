//! Collaborator seams: browser launcher, browser session, and audit engine.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    config::{RunConfig, SessionCookie},
    error::Result,
    orchestrator::orchestrate,
    outcome::RunOutcome,
    profiles::{DeviceProfile, NetworkConditions},
};

/// Engine-side settings for one run, derived from the resolved config.
///
/// Extends the engine's defaults rather than replacing them: only the fields
/// listed here are overridden for the run.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub device: DeviceProfile,
    pub network: NetworkConditions,
    pub blocked_url_patterns: Vec<String>,
    /// Category filter. Always restricted to "performance" for audit runs.
    pub only_categories: Vec<&'static str>,
}

impl EngineOptions {
    pub fn from_config(config: &RunConfig) -> Self {
        Self {
            device: config.device.profile(),
            network: config.throttling.conditions(),
            blocked_url_patterns: config.blocked_url_patterns.clone(),
            only_categories: vec!["performance"],
        }
    }
}

/// Starts isolated headless browser instances, one per attempt.
#[async_trait]
pub trait Launcher: Send + Sync {
    type Session: Session;

    /// Launch a fresh instance and hand back its live session.
    async fn launch(&self) -> Result<Self::Session>;
}

/// Live connection to one launched browser instance.
///
/// The session doubles as the remote-debugging client: cookie injection goes
/// through the same CDP connection the launcher opened.
#[async_trait]
pub trait Session: Send {
    /// Set a cookie scoped to `url` on this session, before any navigation.
    async fn set_cookie(&mut self, cookie: &SessionCookie, url: &str) -> Result<()>;

    /// Tear the instance down. Called exactly once per attempt, on success
    /// and failure alike.
    async fn close(&mut self) -> Result<()>;
}

/// Runs one audit against a live session and produces the structured report.
#[async_trait]
pub trait Engine<S: Session>: Send + Sync {
    /// Audit `url` through `session`, returning the full report document.
    /// The performance score is read out of the report by the caller.
    async fn audit(
        &self,
        url: &str,
        session: &mut S,
        options: &EngineOptions,
    ) -> Result<serde_json::Value>;
}

/// Object-safe entry point the HTTP boundary holds.
#[async_trait]
pub trait AuditRunner: Send + Sync {
    async fn run(&self, config: RunConfig) -> Result<RunOutcome>;
}

/// Binds a concrete launcher and engine into an [`AuditRunner`].
pub struct Runner<L, E> {
    launcher: L,
    engine: E,
}

impl<L, E> Runner<L, E> {
    pub fn new(launcher: L, engine: E) -> Self {
        Self { launcher, engine }
    }

    pub fn shared(launcher: L, engine: E) -> Arc<Self> {
        Arc::new(Self::new(launcher, engine))
    }
}

#[async_trait]
impl<L, E> AuditRunner for Runner<L, E>
where
    L: Launcher,
    E: Engine<L::Session>,
{
    async fn run(&self, config: RunConfig) -> Result<RunOutcome> {
        orchestrate(&self.launcher, &self.engine, &config).await
    }
}
