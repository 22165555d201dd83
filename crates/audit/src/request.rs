//! Wire type for `POST /report` bodies.

use serde::{Deserialize, Deserializer};

/// Raw, unvalidated request parameters as they arrive over HTTP.
///
/// `device` and `throttling` stay strings here so unrecognized values reach
/// the resolver and come back as proper validation errors instead of serde
/// rejections.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub device: Option<String>,

    #[serde(default)]
    pub throttling: Option<String>,

    /// Lenient: any non-numeric JSON value is treated as absent, matching the
    /// historical `parseInt(attempts) || default` behavior of the service.
    #[serde(default, deserialize_with = "lenient_int")]
    pub attempts: Option<i64>,

    #[serde(default)]
    pub blocked_url_patterns: Option<Vec<String>>,

    #[serde(default)]
    pub cookie: Option<CookieParam>,
}

/// Cookie as supplied by the caller. Only injected when both fields are
/// non-empty.
#[derive(Debug, Clone, Deserialize)]
pub struct CookieParam {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
}

fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        serde_json::Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> ReportRequest {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn minimal_body() {
        let req = parse(r#"{"url": "https://example.com"}"#);
        assert_eq!(req.url, "https://example.com");
        assert!(req.device.is_none());
        assert!(req.throttling.is_none());
        assert!(req.attempts.is_none());
        assert!(req.blocked_url_patterns.is_none());
        assert!(req.cookie.is_none());
    }

    #[test]
    fn full_body() {
        let req = parse(
            r#"{
                "url": "https://example.com",
                "device": "desktop",
                "throttling": "mobileRegular3G",
                "attempts": 5,
                "blockedUrlPatterns": ["*analytics*", "*.woff2"],
                "cookie": {"name": "session", "value": "abc123"}
            }"#,
        );
        assert_eq!(req.device.as_deref(), Some("desktop"));
        assert_eq!(req.throttling.as_deref(), Some("mobileRegular3G"));
        assert_eq!(req.attempts, Some(5));
        assert_eq!(
            req.blocked_url_patterns.as_deref(),
            Some(&["*analytics*".to_string(), "*.woff2".to_string()][..])
        );
        let cookie = req.cookie.unwrap();
        assert_eq!(cookie.name, "session");
        assert_eq!(cookie.value, "abc123");
    }

    #[test]
    fn attempts_accepts_numeric_strings() {
        let req = parse(r#"{"url": "https://example.com", "attempts": "4"}"#);
        assert_eq!(req.attempts, Some(4));
    }

    #[test]
    fn attempts_non_numeric_collapses_to_absent() {
        for junk in [r#""many""#, "true", "null", "[3]", "{}"] {
            let body = format!(r#"{{"url": "https://example.com", "attempts": {junk}}}"#);
            let req = parse(&body);
            assert_eq!(req.attempts, None, "attempts: {junk}");
        }
    }

    #[test]
    fn attempts_float_truncates() {
        let req = parse(r#"{"url": "https://example.com", "attempts": 2.9}"#);
        assert_eq!(req.attempts, Some(2));
    }
}
