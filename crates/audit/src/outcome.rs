//! Attempt results and the terminal run outcome.

use serde::Serialize;

/// Result of one completed attempt. Never mutated after creation.
#[derive(Debug, Clone)]
pub struct AttemptResult {
    pub index: u32,
    /// Performance category score in `[0, 1]`.
    pub score: f64,
    /// Full structured report from the audit engine.
    pub report: serde_json::Value,
}

/// Terminal response shape for a run.
///
/// A single-attempt run returns the bare report; multi-attempt runs return
/// the aggregate wrapper. Callers must handle both shapes.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RunOutcome {
    Single(serde_json::Value),
    #[serde(rename_all = "camelCase")]
    Aggregate {
        best_score: f64,
        best_score_index: usize,
        results: Vec<serde_json::Value>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_serializes_as_bare_report() {
        let outcome = RunOutcome::Single(json!({"finalUrl": "https://example.com"}));
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value, json!({"finalUrl": "https://example.com"}));
    }

    #[test]
    fn aggregate_serializes_with_camel_case_fields() {
        let outcome = RunOutcome::Aggregate {
            best_score: 0.85,
            best_score_index: 1,
            results: vec![json!({"a": 0}), json!({"a": 1})],
        };
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            value,
            json!({
                "bestScore": 0.85,
                "bestScoreIndex": 1,
                "results": [{"a": 0}, {"a": 1}],
            })
        );
    }
}
