//! Post-analysis processing.
//!
//! Builds the exported report and writes it to disk.

use crate::gate;
use crate::model::{AnalysisReport, AnalysisResult, ClientConfig};
use anyhow::{Context, Result};
use std::path::Path;

/// Snapshot a Ready result together with its freshly derived verdict.
pub(crate) fn build_report(
    cfg: &ClientConfig,
    file_name: &str,
    result: &AnalysisResult,
) -> AnalysisReport {
    AnalysisReport {
        analyzed_at: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| "now".into()),
        file_name: file_name.to_string(),
        service_url: cfg.analyze_url(),
        request_timeout: cfg.request_timeout,
        result: result.clone(),
        verdict: gate::evaluate(result),
    }
}

pub(crate) fn export_json(path: &Path, report: &AnalysisReport) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create export directory {}", parent.display()))?;
    }
    let out = serde_json::to_string_pretty(report).context("serialize report")?;
    std::fs::write(path, out).with_context(|| format!("write {}", path.display()))?;
    tracing::info!(path = %path.display(), "report exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Details, MarketState};
    use std::time::Duration;

    #[test]
    fn exported_report_carries_verdict() {
        let cfg = ClientConfig {
            base_url: "http://localhost:8000".into(),
            analyze_path: "/api/analyze".into(),
            request_timeout: Some(Duration::from_secs(45)),
            user_agent: "test".into(),
        };
        let result = AnalysisResult {
            market_state: MarketState::Dangerous,
            confidence: 40,
            risk: None,
            bias: None,
            guidance: None,
            details: Details::default(),
        };
        let report = build_report(&cfg, "XAUUSD.csv", &result);
        assert!(report.verdict.no_trade);
        assert_eq!(report.service_url, "http://localhost:8000/api/analyze");

        let path = std::env::temp_dir()
            .join(format!("gold-safety-export-{}", std::process::id()))
            .join("report.json");
        export_json(&path, &report).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains(r#""request_timeout": "45s""#));
        let back: AnalysisReport = serde_json::from_str(&written).unwrap();
        assert_eq!(back.request_timeout, Some(Duration::from_secs(45)));
        assert_eq!(back.verdict, report.verdict);
        assert_eq!(back.result, result);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
