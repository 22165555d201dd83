//! Per-attempt Chrome launcher and session handle.

use std::time::Duration;

use {
    async_trait::async_trait,
    chromiumoxide::{Browser, BrowserConfig, Page},
    futures::StreamExt,
    serde::Deserialize,
    tokio::task::JoinHandle,
    tracing::{debug, warn},
};

use pharos_audit::{
    AuditError,
    config::SessionCookie,
    engine::{Launcher, Session},
};

use crate::{cdp, detect, error::BrowserError};

/// Launcher settings. Deserializable so deployments can override them.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    /// Path to a Chrome/Chromium binary (auto-detected if unset).
    pub chrome_path: Option<String>,
    /// CDP request timeout, which also bounds navigation waits.
    pub request_timeout_ms: u64,
    /// Additional Chrome arguments appended to the defaults.
    pub chrome_args: Vec<String>,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            chrome_path: None,
            request_timeout_ms: 60_000,
            chrome_args: Vec::new(),
        }
    }
}

/// Launches one isolated headless Chrome process per attempt.
pub struct ChromeLauncher {
    config: LauncherConfig,
}

impl ChromeLauncher {
    pub fn new(config: LauncherConfig) -> Self {
        Self { config }
    }

    async fn launch_instance(&self) -> Result<ChromeSession, BrowserError> {
        let Some(executable) = detect::find_chrome(self.config.chrome_path.as_deref()) else {
            return Err(BrowserError::LaunchFailed(format!(
                "Chrome/Chromium not found. {}",
                detect::install_hint()
            )));
        };

        let mut builder = BrowserConfig::builder()
            .chrome_executable(executable)
            .request_timeout(Duration::from_millis(self.config.request_timeout_ms))
            // Sandboxless, GPU-less headless operation. chromiumoxide runs
            // headless unless told otherwise.
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-setuid-sandbox")
            .arg("--disable-dev-shm-usage");

        for arg in &self.config.chrome_args {
            builder = builder.arg(arg);
        }

        let browser_config = builder
            .build()
            .map_err(|e| BrowserError::LaunchFailed(format!("invalid browser config: {e}")))?;

        let (browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
            BrowserError::LaunchFailed(format!("{e}\n\n{}", detect::install_hint()))
        })?;

        // Drive CDP events for the lifetime of the instance.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                debug!(?event, "browser event");
            }
        });

        debug!("headless browser instance launched");
        Ok(ChromeSession {
            browser,
            handler_task,
        })
    }
}

#[async_trait]
impl Launcher for ChromeLauncher {
    type Session = ChromeSession;

    async fn launch(&self) -> Result<ChromeSession, AuditError> {
        self.launch_instance()
            .await
            .map_err(|e| AuditError::Launch(e.to_string()))
    }
}

/// One live headless Chrome instance with its CDP connection.
///
/// The process and the connection share a lifetime; closing the session tears
/// both down.
pub struct ChromeSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

impl ChromeSession {
    /// Open a fresh page in this instance.
    pub async fn new_page(&self, url: &str) -> Result<Page, BrowserError> {
        self.browser
            .new_page(url)
            .await
            .map_err(|e| BrowserError::Cdp(e.to_string()))
    }
}

#[async_trait]
impl Session for ChromeSession {
    async fn set_cookie(&mut self, cookie: &SessionCookie, url: &str) -> Result<(), AuditError> {
        cdp::inject_cookie(self, cookie, url)
            .await
            .map_err(|e| AuditError::Cookie(e.to_string()))
    }

    async fn close(&mut self) -> Result<(), AuditError> {
        if let Err(e) = self.browser.close().await {
            warn!(error = %e, "browser close failed, process may already be gone");
        }
        if let Err(e) = self.browser.wait().await {
            warn!(error = %e, "waiting for browser exit failed");
        }
        self.handler_task.abort();
        Ok(())
    }
}
