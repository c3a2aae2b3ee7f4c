//! Text summary builder for CLI output.
//!
//! This module formats a Ready analysis and its safety verdict as
//! human-readable lines for text mode.

use crate::gate::{self, LOW_CONFIDENCE_THRESHOLD};
use crate::model::{AnalysisResult, ServiceStatus, PLACEHOLDER};

/// Pre-formatted lines for text output.
pub(crate) struct TextSummary {
    pub lines: Vec<String>,
}

fn or_placeholder(v: Option<&str>) -> &str {
    v.unwrap_or(PLACEHOLDER)
}

/// Build a text summary from a Ready result; the verdict is derived here, not passed in.
pub(crate) fn build_text_summary(
    file_name: &str,
    status: Option<&ServiceStatus>,
    result: &AnalysisResult,
) -> TextSummary {
    let verdict = gate::evaluate(result);
    let mut lines = Vec::new();

    if let Some(system) = status.and_then(|s| s.system.as_deref()) {
        lines.push(format!("Service: {system}"));
    }
    lines.push(format!("File: {file_name}"));

    let risk = match result.risk {
        Some(crate::model::Risk::High) => "  (HIGH RISK / VOLATILITY)",
        _ => "",
    };
    lines.push(format!("Market state: {}{}", result.market_state.label(), risk));

    let bias = result.bias.map(|b| b.label());
    let weak = if result.confidence < LOW_CONFIDENCE_THRESHOLD {
        " (low)"
    } else {
        ""
    };
    lines.push(format!(
        "Bias: {}  confidence {}%{}",
        or_placeholder(bias),
        result.confidence,
        weak
    ));
    // Setup phase is meaningless without a direction.
    if !matches!(result.bias, Some(crate::model::Bias::Wait)) {
        lines.push(format!(
            "Setup: {}",
            or_placeholder(result.details.setup_1h.map(|s| s.label()))
        ));
    }
    lines.push(format!("Guidance: {}", or_placeholder(result.guidance())));

    let d = &result.details;
    lines.push(format!(
        "Weekly: {}  Daily: {}  1H: {}  15M: {}",
        or_placeholder(d.weekly.map(|w| w.label())),
        or_placeholder(d.daily.map(|b| b.label())),
        or_placeholder(d.setup_1h.map(|s| s.label())),
        or_placeholder(d.entry_15m.as_deref().filter(|e| !e.is_empty())),
    ));

    if verdict.no_trade {
        lines.push(String::new());
        lines.push("!!! NO TRADE !!!".to_string());
        if let Some(headline) = verdict.headline() {
            lines.push(headline.to_string());
        }
        for reason in &verdict.reasons {
            lines.push(format!("  x {reason}"));
        }
        lines.push("Protect your capital. Close the chart.".to_string());
    }

    TextSummary { lines }
}
