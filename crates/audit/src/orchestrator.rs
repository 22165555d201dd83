//! Sequential attempt loop and best-score selection.

use tracing::info;

use crate::{
    attempt::run_attempt,
    config::RunConfig,
    engine::{Engine, EngineOptions, Launcher},
    error::Result,
    outcome::RunOutcome,
};

/// Execute `config.attempts` attempts strictly one after another and select
/// the best result.
///
/// The running best starts at score 0, index 0, and is only replaced on a
/// strictly higher score, so ties keep the earliest attempt. Any attempt
/// failure aborts the whole run; no partial results are returned.
pub async fn orchestrate<L, E>(launcher: &L, engine: &E, config: &RunConfig) -> Result<RunOutcome>
where
    L: Launcher,
    E: Engine<L::Session>,
{
    let options = EngineOptions::from_config(config);

    let mut results = Vec::with_capacity(config.attempts as usize);
    let mut best_score = 0.0_f64;
    let mut best_score_index = 0_usize;

    for index in 0..config.attempts {
        let result = run_attempt(launcher, engine, config, &options, index).await?;
        info!(
            attempt = index,
            score = result.score,
            url = %config.url,
            "audit attempt finished"
        );

        if result.score > best_score {
            best_score = result.score;
            best_score_index = index as usize;
        }
        results.push(result.report);
    }

    // Single-attempt runs return the bare report, not the aggregate wrapper.
    if config.attempts == 1 {
        if let Some(report) = results.pop() {
            return Ok(RunOutcome::Single(report));
        }
    }

    Ok(RunOutcome::Aggregate {
        best_score,
        best_score_index,
        results,
    })
}
