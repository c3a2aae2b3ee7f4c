use anyhow::{Context, Result};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::gate::SafetyVerdict;
use crate::orchestrator::{LifecycleState, TransitionError};

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub analyze_path: String,
    /// `None` leaves requests unbounded; the service is expected to answer.
    pub request_timeout: Option<Duration>,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn analyze_url(&self) -> String {
        join_url(&self.base_url, &self.analyze_path)
    }

    pub fn status_url(&self) -> String {
        join_url(&self.base_url, "/")
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketState {
    Trending,
    Ranging,
    Dangerous,
    #[serde(other)]
    Unknown,
}

impl MarketState {
    pub fn label(self) -> &'static str {
        match self {
            MarketState::Trending => "TRENDING",
            MarketState::Ranging => "RANGING",
            MarketState::Dangerous => "DANGEROUS",
            MarketState::Unknown => "UNKNOWN",
        }
    }
}

/// Decode a display-only field, turning `null`, unknown values and wrong
/// shapes into `None` instead of failing the whole payload.
fn lenient<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<serde_json::Value>::deserialize(de)?;
    Ok(raw.and_then(|v| serde_json::from_value(v).ok()))
}

fn lenient_or_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient(de)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Risk {
    Safe,
    High,
}

/// Directional bias; also used for the daily timeframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Bias {
    Buy,
    Sell,
    Wait,
}

impl Bias {
    pub fn label(self) -> &'static str {
        match self {
            Bias::Buy => "BUY",
            Bias::Sell => "SELL",
            Bias::Wait => "WAIT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeeklyBias {
    Bullish,
    Bearish,
    Neutral,
}

impl WeeklyBias {
    pub fn label(self) -> &'static str {
        match self {
            WeeklyBias::Bullish => "BULLISH",
            WeeklyBias::Bearish => "BEARISH",
            WeeklyBias::Neutral => "NEUTRAL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SetupPhase {
    Continuation,
    Pullback,
    NoSetup,
}

impl SetupPhase {
    pub fn label(self) -> &'static str {
        match self {
            SetupPhase::Continuation => "CONTINUATION",
            SetupPhase::Pullback => "PULLBACK",
            SetupPhase::NoSetup => "NO_SETUP",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Details {
    #[serde(default, deserialize_with = "lenient")]
    pub weekly: Option<WeeklyBias>,
    #[serde(default, deserialize_with = "lenient")]
    pub daily: Option<Bias>,
    #[serde(default, deserialize_with = "lenient")]
    pub setup_1h: Option<SetupPhase>,
    #[serde(default, deserialize_with = "lenient")]
    pub entry_15m: Option<String>,
}

/// Verdict returned by the analysis service.
///
/// Only `market_state` and `confidence` are guaranteed; everything else
/// renders as a placeholder when missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub market_state: MarketState,
    pub confidence: u8,
    #[serde(default, deserialize_with = "lenient")]
    pub risk: Option<Risk>,
    #[serde(default, deserialize_with = "lenient")]
    pub bias: Option<Bias>,
    #[serde(default, deserialize_with = "lenient")]
    pub guidance: Option<String>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub details: Details,
}

impl AnalysisResult {
    pub const MAX_CONFIDENCE: u8 = 100;

    /// Guidance text, treating an empty string as absent.
    pub fn guidance(&self) -> Option<&str> {
        self.guidance
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty())
    }
}

/// Placeholder shown for any field the service left out.
pub const PLACEHOLDER: &str = "-";

/// A user-selected market-data file, ready to be sent as the `file` part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Bytes,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    pub async fn from_path(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("read {}", path.display()))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload.csv")
            .to_string();
        Ok(Self::new(file_name, bytes))
    }
}

/// Response of the service root endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub system: Option<String>,
}

/// Exported snapshot of a finished analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub analyzed_at: String,
    pub file_name: String,
    pub service_url: String,
    /// Request timeout in effect for the analysis; absent when unbounded.
    #[serde(default, with = "humantime_serde")]
    pub request_timeout: Option<Duration>,
    pub result: AnalysisResult,
    pub verdict: SafetyVerdict,
}

/// Events emitted by the lifecycle driver and consumed by presentation layers.
#[derive(Debug, Clone)]
pub enum LifecycleEvent {
    StateChanged(LifecycleState),
    Info(InfoEvent),
    ServiceStatus(Option<ServiceStatus>),
}

/// Structured info events; rendered to a status line by UI/CLI layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoEvent {
    Rejected(TransitionError),
    Unreadable { path: String, error: String },
}

impl InfoEvent {
    /// Render a human-readable message for UI/CLI layers.
    pub fn to_message(&self) -> String {
        match self {
            InfoEvent::Rejected(e) => format!("Ignored: {e}"),
            InfoEvent::Unreadable { path, error } => {
                format!("Cannot read {}: {}", path, error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_payload() {
        let body = r#"{
            "market_state": "TRENDING",
            "bias": "BUY",
            "confidence": 80,
            "risk": "SAFE",
            "details": {
                "weekly": "BULLISH",
                "daily": "BUY",
                "setup_1h": "NO_SETUP",
                "entry_15m": "READY"
            },
            "guidance": "Bias is BUY. Confidence 80%."
        }"#;
        let r: AnalysisResult = serde_json::from_str(body).unwrap();
        assert_eq!(r.market_state, MarketState::Trending);
        assert_eq!(r.bias, Some(Bias::Buy));
        assert_eq!(r.risk, Some(Risk::Safe));
        assert_eq!(r.details.weekly, Some(WeeklyBias::Bullish));
        assert_eq!(r.details.setup_1h, Some(SetupPhase::NoSetup));
        assert_eq!(r.details.entry_15m.as_deref(), Some("READY"));
    }

    #[test]
    fn optional_fields_default_to_absent() {
        let r: AnalysisResult =
            serde_json::from_str(r#"{"market_state":"RANGING","confidence":45}"#).unwrap();
        assert_eq!(r.bias, None);
        assert_eq!(r.risk, None);
        assert_eq!(r.guidance(), None);
        assert_eq!(r.details, Details::default());
    }

    #[test]
    fn unrecognised_market_state_is_unknown() {
        let r: AnalysisResult =
            serde_json::from_str(r#"{"market_state":"CHOPPY","confidence":10}"#).unwrap();
        assert_eq!(r.market_state, MarketState::Unknown);
    }

    #[test]
    fn null_details_decode_as_absent() {
        let r: AnalysisResult = serde_json::from_str(
            r#"{"market_state":"DANGEROUS","confidence":90,"details":null,"bias":null}"#,
        )
        .unwrap();
        assert_eq!(r.market_state, MarketState::Dangerous);
        assert_eq!(r.details, Details::default());
        assert_eq!(r.bias, None);
    }

    #[test]
    fn unrecognised_display_values_become_placeholders() {
        let body = r#"{
            "market_state": "DANGEROUS",
            "confidence": 90,
            "risk": "EXTREME",
            "bias": "HOLD",
            "guidance": 42,
            "details": {
                "weekly": "SIDEWAYS",
                "daily": "BUY",
                "setup_1h": "BREAKOUT",
                "entry_15m": ["READY"]
            }
        }"#;
        let r: AnalysisResult = serde_json::from_str(body).unwrap();
        assert_eq!(r.risk, None);
        assert_eq!(r.bias, None);
        assert_eq!(r.guidance(), None);
        assert_eq!(r.details.weekly, None);
        assert_eq!(r.details.daily, Some(Bias::Buy));
        assert_eq!(r.details.setup_1h, None);
        assert_eq!(r.details.entry_15m, None);
    }

    #[test]
    fn malformed_details_shape_falls_back_to_default() {
        let r: AnalysisResult = serde_json::from_str(
            r#"{"market_state":"TRENDING","confidence":75,"details":"n/a"}"#,
        )
        .unwrap();
        assert_eq!(r.details, Details::default());
    }

    #[test]
    fn blank_guidance_counts_as_absent() {
        let r: AnalysisResult =
            serde_json::from_str(r#"{"market_state":"RANGING","confidence":70,"guidance":"  "}"#)
                .unwrap();
        assert_eq!(r.guidance(), None);
    }

    #[test]
    fn urls_join_without_double_slashes() {
        let cfg = ClientConfig {
            base_url: "http://localhost:8000/".into(),
            analyze_path: "/api/analyze".into(),
            request_timeout: None,
            user_agent: "test".into(),
        };
        assert_eq!(cfg.analyze_url(), "http://localhost:8000/api/analyze");
        assert_eq!(cfg.status_url(), "http://localhost:8000/");
    }
}
