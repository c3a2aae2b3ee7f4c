//! No-trade safety gate.
//!
//! Derives the veto from an analysis result. The verdict is recomputed on
//! every read and never stored alongside the result.

use crate::model::{AnalysisResult, MarketState};
use serde::{Deserialize, Serialize};

/// Scores strictly below this are too weak to act on.
pub const LOW_CONFIDENCE_THRESHOLD: u8 = 60;

pub const DANGEROUS_REASON: &str = "Volatility exceeds safety limits";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyVerdict {
    pub dangerous: bool,
    pub low_confidence: bool,
    pub no_trade: bool,
    /// Volatility reason first, confidence reason second.
    pub reasons: Vec<String>,
}

impl SafetyVerdict {
    /// Overlay headline; the dangerous regime outranks a weak score.
    pub fn headline(&self) -> Option<&'static str> {
        if self.dangerous {
            Some("MARKET IS DANGEROUS")
        } else if self.low_confidence {
            Some("CONFIDENCE TOO LOW")
        } else {
            None
        }
    }
}

pub fn evaluate(result: &AnalysisResult) -> SafetyVerdict {
    let dangerous = result.market_state == MarketState::Dangerous;
    let low_confidence = result.confidence < LOW_CONFIDENCE_THRESHOLD;

    let mut reasons = Vec::new();
    if dangerous {
        reasons.push(DANGEROUS_REASON.to_string());
    }
    if low_confidence {
        reasons.push(format!(
            "Score {}% is below {}% threshold",
            result.confidence, LOW_CONFIDENCE_THRESHOLD
        ));
    }

    SafetyVerdict {
        dangerous,
        low_confidence,
        no_trade: dangerous || low_confidence,
        reasons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Bias, Details};

    fn result(market_state: MarketState, confidence: u8) -> AnalysisResult {
        AnalysisResult {
            market_state,
            confidence,
            risk: None,
            bias: None,
            guidance: None,
            details: Details::default(),
        }
    }

    #[test]
    fn low_confidence_below_threshold_only() {
        for c in 0..LOW_CONFIDENCE_THRESHOLD {
            assert!(evaluate(&result(MarketState::Trending, c)).low_confidence, "{c}");
        }
        for c in LOW_CONFIDENCE_THRESHOLD..=100 {
            assert!(!evaluate(&result(MarketState::Trending, c)).low_confidence, "{c}");
        }
    }

    #[test]
    fn threshold_boundary() {
        assert!(!evaluate(&result(MarketState::Ranging, 60)).low_confidence);
        assert!(evaluate(&result(MarketState::Ranging, 59)).low_confidence);
    }

    #[test]
    fn dangerous_ignores_confidence() {
        for state in [
            MarketState::Trending,
            MarketState::Ranging,
            MarketState::Unknown,
        ] {
            assert!(!evaluate(&result(state, 100)).dangerous);
            assert!(!evaluate(&result(state, 0)).dangerous);
        }
        assert!(evaluate(&result(MarketState::Dangerous, 100)).dangerous);
        assert!(evaluate(&result(MarketState::Dangerous, 0)).dangerous);
    }

    #[test]
    fn no_trade_is_or_of_both_rules() {
        let cases = [
            (MarketState::Trending, 82, false, false),
            (MarketState::Dangerous, 82, true, false),
            (MarketState::Trending, 20, false, true),
            (MarketState::Dangerous, 20, true, true),
        ];
        for (state, confidence, dangerous, low) in cases {
            let v = evaluate(&result(state, confidence));
            assert_eq!(v.dangerous, dangerous);
            assert_eq!(v.low_confidence, low);
            assert_eq!(v.no_trade, dangerous || low);
        }
    }

    #[test]
    fn reasons_keep_volatility_first() {
        let v = evaluate(&result(MarketState::Dangerous, 30));
        assert_eq!(
            v.reasons,
            vec![
                "Volatility exceeds safety limits".to_string(),
                "Score 30% is below 60% threshold".to_string(),
            ]
        );
        assert_eq!(v.headline(), Some("MARKET IS DANGEROUS"));
    }

    #[test]
    fn clear_verdict_has_no_reasons() {
        let mut r = result(MarketState::Trending, 82);
        r.bias = Some(Bias::Buy);
        let v = evaluate(&r);
        assert!(!v.no_trade);
        assert!(v.reasons.is_empty());
        assert_eq!(v.headline(), None);
    }

    #[test]
    fn dangerous_market_alone() {
        let v = evaluate(&result(MarketState::Dangerous, 90));
        assert!(v.dangerous && v.no_trade && !v.low_confidence);
        assert_eq!(v.reasons, vec!["Volatility exceeds safety limits".to_string()]);
    }

    #[test]
    fn weak_score_alone() {
        let v = evaluate(&result(MarketState::Ranging, 45));
        assert!(v.low_confidence && v.no_trade && !v.dangerous);
        assert_eq!(v.reasons, vec!["Score 45% is below 60% threshold".to_string()]);
        assert_eq!(v.headline(), Some("CONFIDENCE TOO LOW"));
    }
}
