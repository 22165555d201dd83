//! Single-attempt execution: launch, optional cookie injection, audit,
//! unconditional teardown.

use tracing::{debug, warn};

use crate::{
    config::RunConfig,
    engine::{Engine, EngineOptions, Launcher, Session},
    error::{AuditError, Result},
    outcome::AttemptResult,
};

/// Run attempt `index` against a freshly launched browser instance.
///
/// The instance is released before any error propagates: once the launch
/// succeeds, cookie and engine failures still go through teardown first.
pub async fn run_attempt<L, E>(
    launcher: &L,
    engine: &E,
    config: &RunConfig,
    options: &EngineOptions,
    index: u32,
) -> Result<AttemptResult>
where
    L: Launcher,
    E: Engine<L::Session>,
{
    debug!(attempt = index, url = %config.url, "launching browser instance");
    let mut session = launcher.launch().await?;

    let audited = audit_with_session(engine, config, options, &mut session).await;

    // Release unconditionally. A teardown failure after a successful audit is
    // logged only; the attempt already has its result.
    if let Err(e) = session.close().await {
        warn!(attempt = index, error = %e, "browser teardown failed");
    }

    let report = audited?;
    let score = performance_score(&report)?;
    debug!(attempt = index, score, "attempt complete");

    Ok(AttemptResult {
        index,
        score,
        report,
    })
}

/// The fallible middle of an attempt, separated so the caller can tear the
/// session down regardless of where this fails.
async fn audit_with_session<S, E>(
    engine: &E,
    config: &RunConfig,
    options: &EngineOptions,
    session: &mut S,
) -> Result<serde_json::Value>
where
    S: Session,
    E: Engine<S>,
{
    if let Some(cookie) = config.cookie.as_ref() {
        debug!(cookie = %cookie.name, "injecting session cookie before navigation");
        session.set_cookie(cookie, &config.url).await?;
    }

    engine.audit(&config.url, session, options).await
}

/// Extract the performance category score from a report document.
fn performance_score(report: &serde_json::Value) -> Result<f64> {
    let score = report
        .pointer("/categories/performance/score")
        .and_then(serde_json::Value::as_f64)
        .ok_or_else(|| {
            AuditError::MalformedReport("missing categories.performance.score".to_string())
        })?;

    if !(0.0..=1.0).contains(&score) {
        return Err(AuditError::MalformedReport(format!(
            "performance score {score} outside [0, 1]"
        )));
    }

    Ok(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn score_extraction_reads_performance_category() {
        let report = json!({"categories": {"performance": {"score": 0.42}}});
        assert_eq!(performance_score(&report).unwrap(), 0.42);
    }

    #[test]
    fn score_extraction_rejects_missing_category() {
        let report = json!({"categories": {"seo": {"score": 1.0}}});
        assert!(matches!(
            performance_score(&report),
            Err(AuditError::MalformedReport(_))
        ));
    }

    #[test]
    fn score_extraction_rejects_out_of_range() {
        let report = json!({"categories": {"performance": {"score": 1.5}}});
        assert!(matches!(
            performance_score(&report),
            Err(AuditError::MalformedReport(_))
        ));
    }

    #[test]
    fn score_extraction_rejects_null_score() {
        let report = json!({"categories": {"performance": {"score": null}}});
        assert!(performance_score(&report).is_err());
    }
}
