//! Default audit engine: drives one page load over CDP with device and
//! network emulation applied, and scores the observed load timing.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use {
    async_trait::async_trait,
    chromiumoxide::{
        Page,
        cdp::browser_protocol::{
            emulation::{
                SetCpuThrottlingRateParams, SetDeviceMetricsOverrideParams,
                SetUserAgentOverrideParams,
            },
            network::{
                EmulateNetworkConditionsParams, EnableParams as NetworkEnableParams,
                SetBlockedUrLsParams,
            },
            performance::{EnableParams as PerformanceEnableParams, GetMetricsParams},
        },
    },
    serde::Deserialize,
    serde_json::{Value, json},
    tracing::{debug, warn},
};

use pharos_audit::{
    AuditError,
    engine::{Engine, EngineOptions},
};

use crate::{error::BrowserError, launcher::ChromeSession};

/// CDP-based audit engine. Stateless; safe to share across requests.
#[derive(Debug, Default, Clone, Copy)]
pub struct CdpAuditEngine;

#[async_trait]
impl Engine<ChromeSession> for CdpAuditEngine {
    async fn audit(
        &self,
        url: &str,
        session: &mut ChromeSession,
        options: &EngineOptions,
    ) -> Result<Value, AuditError> {
        run_audit(url, session, options)
            .await
            .map_err(|e| AuditError::Engine(e.to_string()))
    }
}

async fn run_audit(
    url: &str,
    session: &ChromeSession,
    options: &EngineOptions,
) -> Result<Value, BrowserError> {
    let page = session.new_page("about:blank").await?;
    apply_emulation(&page, options).await?;

    let fetch_time_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();

    let started = Instant::now();
    page.goto(url)
        .await
        .map_err(|e| BrowserError::NavigationFailed(e.to_string()))?;
    page.wait_for_navigation()
        .await
        .map_err(|e| BrowserError::NavigationFailed(e.to_string()))?;
    let wall_ms = started.elapsed().as_millis() as f64;

    let timing = match navigation_timing(&page).await {
        Ok(t) => t,
        Err(e) => {
            warn!(error = %e, "navigation timing unavailable, using wall clock");
            NavigationTiming::default()
        },
    };
    let metrics = collect_metrics(&page).await.unwrap_or_default();

    let final_url = page
        .url()
        .await?
        .unwrap_or_else(|| url.to_string());

    let load_ms = if timing.load > 0.0 { timing.load } else { wall_ms };
    let score = score_load_time(load_ms, options.device.mobile);
    debug!(load_ms, score, final_url = %final_url, "page load measured");

    Ok(json!({
        "requestedUrl": url,
        "finalUrl": final_url,
        "fetchTime": fetch_time_ms,
        "categories": {
            "performance": { "id": "performance", "score": score },
        },
        "audits": {
            "time-to-first-byte": {
                "numericValue": timing.ttfb,
                "numericUnit": "millisecond",
            },
            "dom-content-loaded": {
                "numericValue": timing.dom_content_loaded,
                "numericUnit": "millisecond",
            },
            "load-time": {
                "numericValue": load_ms,
                "numericUnit": "millisecond",
            },
        },
        "metrics": metrics,
        "configSettings": {
            "formFactor": if options.device.mobile { "mobile" } else { "desktop" },
            "screenEmulation": options.device,
            "throttling": options.network,
            "onlyCategories": options.only_categories,
            "blockedUrlPatterns": options.blocked_url_patterns,
        },
    }))
}

/// Fold the run's device and network settings into the page, on top of the
/// browser defaults, before navigation.
async fn apply_emulation(page: &Page, options: &EngineOptions) -> Result<(), BrowserError> {
    page.execute(NetworkEnableParams::default()).await?;

    let device = SetDeviceMetricsOverrideParams::builder()
        .width(options.device.width)
        .height(options.device.height)
        .device_scale_factor(options.device.device_scale_factor)
        .mobile(options.device.mobile)
        .build()
        .map_err(BrowserError::Cdp)?;
    page.execute(device).await?;

    let user_agent = SetUserAgentOverrideParams::builder()
        .user_agent(options.device.user_agent)
        .build()
        .map_err(BrowserError::Cdp)?;
    page.execute(user_agent).await?;

    // kbps to bytes per second for the wire protocol.
    let network = EmulateNetworkConditionsParams::builder()
        .offline(false)
        .latency(options.network.latency_ms)
        .download_throughput(options.network.download_kbps * 1024.0 / 8.0)
        .upload_throughput(options.network.upload_kbps * 1024.0 / 8.0)
        .build()
        .map_err(BrowserError::Cdp)?;
    page.execute(network).await?;

    let cpu = SetCpuThrottlingRateParams::builder()
        .rate(options.network.cpu_slowdown)
        .build()
        .map_err(BrowserError::Cdp)?;
    page.execute(cpu).await?;

    if !options.blocked_url_patterns.is_empty() {
        let blocked = SetBlockedUrLsParams::builder()
            .urls(options.blocked_url_patterns.clone())
            .build()
            .map_err(BrowserError::Cdp)?;
        page.execute(blocked).await?;
    }

    page.execute(PerformanceEnableParams::default()).await?;
    Ok(())
}

#[derive(Debug, Default, Deserialize)]
struct NavigationTiming {
    #[serde(default)]
    ttfb: f64,
    #[serde(default)]
    dom_content_loaded: f64,
    #[serde(default)]
    load: f64,
}

/// Read the navigation timing entry out of the page.
///
/// Returned as a JSON string so the value crosses the protocol by value
/// regardless of object serialization settings.
async fn navigation_timing(page: &Page) -> Result<NavigationTiming, BrowserError> {
    const SCRIPT: &str = r#"
        (() => {
            const entry = performance.getEntriesByType('navigation')[0];
            if (!entry) return "{}";
            return JSON.stringify({
                ttfb: entry.responseStart,
                dom_content_loaded: entry.domContentLoadedEventEnd,
                load: entry.loadEventEnd,
            });
        })()
    "#;

    let raw: String = page
        .evaluate(SCRIPT)
        .await?
        .into_value()
        .map_err(|e| BrowserError::Cdp(e.to_string()))?;
    serde_json::from_str(&raw).map_err(|e| BrowserError::Cdp(e.to_string()))
}

/// Collect the Performance domain counters as a name/value map.
async fn collect_metrics(page: &Page) -> Result<Value, BrowserError> {
    let response = page.execute(GetMetricsParams::default()).await?;
    let map: serde_json::Map<String, Value> = response
        .result
        .metrics
        .iter()
        .map(|m| (m.name.clone(), json!(m.value)))
        .collect();
    Ok(Value::Object(map))
}

/// Score a load time on a log-normal curve, 1.0 for instant loads falling
/// toward 0.0 as the load time grows. Mobile and desktop use different
/// reference curves, mirroring the audit engine's scoring constants.
fn score_load_time(load_ms: f64, mobile: bool) -> f64 {
    let (p10, median) = if mobile {
        (2500.0, 6000.0)
    } else {
        (1200.0, 3000.0)
    };
    log_normal_score(load_ms, p10, median)
}

fn log_normal_score(value: f64, p10: f64, median: f64) -> f64 {
    if value <= 0.0 {
        return 1.0;
    }
    // Standard normal quantile at 0.9; fixes sigma from the p10/median pair.
    const INV_PHI_0_9: f64 = 1.281_551_565_544_9;
    let sigma = (median.ln() - p10.ln()).abs() / INV_PHI_0_9;
    let z = (value.ln() - median.ln()) / sigma;
    let score = 0.5 * erfc(z / std::f64::consts::SQRT_2);
    score.clamp(0.0, 1.0)
}

/// Complementary error function, Abramowitz & Stegun 7.1.26.
fn erfc(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x_abs = x.abs();
    let t = 1.0 / (1.0 + 0.327_591_1 * x_abs);
    let poly = t
        * (0.254_829_592
            + t * (-0.284_496_736 + t * (1.421_413_741 + t * (-1.453_152_027 + t * 1.061_405_429))));
    let erf = 1.0 - poly * (-x_abs * x_abs).exp();
    1.0 - sign * erf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instant_load_scores_one() {
        assert_eq!(score_load_time(0.0, true), 1.0);
    }

    #[test]
    fn median_load_scores_half() {
        let score = score_load_time(6000.0, true);
        assert!((score - 0.5).abs() < 0.01, "score was {score}");
    }

    #[test]
    fn p10_load_scores_about_ninety_percent() {
        let score = score_load_time(2500.0, true);
        assert!((score - 0.9).abs() < 0.02, "score was {score}");
    }

    #[test]
    fn scores_decrease_monotonically() {
        let mut previous = 1.0;
        for load in [500.0, 1500.0, 3000.0, 6000.0, 12000.0, 30000.0] {
            let score = score_load_time(load, true);
            assert!(score < previous, "score {score} not below {previous} at {load}ms");
            previous = score;
        }
    }

    #[test]
    fn scores_stay_in_unit_range() {
        for load in [1.0, 100.0, 10_000.0, 1_000_000.0] {
            let score = score_load_time(load, false);
            assert!((0.0..=1.0).contains(&score));
        }
    }

    #[test]
    fn desktop_curve_is_stricter_than_mobile() {
        // The same load time should score lower against the desktop curve.
        assert!(score_load_time(4000.0, false) < score_load_time(4000.0, true));
    }

    #[test]
    fn erfc_reference_points() {
        assert!((erfc(0.0) - 1.0).abs() < 1e-6);
        assert!(erfc(3.0) < 0.001);
        assert!((erfc(-3.0) - 2.0).abs() < 0.001);
    }
}
