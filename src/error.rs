use thiserror::Error;

/// Generic message used when the service rejects an upload without a `detail`.
pub const GENERIC_FAILURE: &str = "Analysis failed";

/// Ways an analysis cycle can end without a usable verdict.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// No file was chosen; never surfaced to the user.
    #[error("no file selected")]
    EmptySelection,

    /// Network unreachable, timed out, or the request could not be completed.
    #[error("transport failure: {0}")]
    TransportFailure(String),

    /// Non-2xx status from the service.
    #[error("service rejected analysis with status {status}")]
    ServerRejection { status: u16, detail: Option<String> },

    /// 2xx status but the body is not a valid analysis payload.
    #[error("malformed analysis response: {0}")]
    MalformedResponse(String),
}

impl AnalysisError {
    /// Message shown in the Failed state.
    ///
    /// A server supplied `detail` wins, then the generic failure text, then the
    /// underlying transport error.
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::ServerRejection {
                detail: Some(detail),
                ..
            } if !detail.trim().is_empty() => detail.clone(),
            AnalysisError::ServerRejection { .. } => GENERIC_FAILURE.to_string(),
            AnalysisError::MalformedResponse(e) => format!("{GENERIC_FAILURE}: {e}"),
            AnalysisError::TransportFailure(e) => e.clone(),
            AnalysisError::EmptySelection => "No file selected".to_string(),
        }
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AnalysisError::TransportFailure(format!("request timed out: {e}"))
        } else {
            AnalysisError::TransportFailure(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_detail_takes_precedence() {
        let e = AnalysisError::ServerRejection {
            status: 500,
            detail: Some("bad csv".into()),
        };
        assert_eq!(e.user_message(), "bad csv");
    }

    #[test]
    fn rejection_without_detail_is_generic() {
        let e = AnalysisError::ServerRejection {
            status: 502,
            detail: None,
        };
        assert_eq!(e.user_message(), GENERIC_FAILURE);

        let blank = AnalysisError::ServerRejection {
            status: 400,
            detail: Some("   ".into()),
        };
        assert_eq!(blank.user_message(), GENERIC_FAILURE);
    }

    #[test]
    fn transport_failure_surfaces_its_text() {
        let e = AnalysisError::TransportFailure("connection refused".into());
        assert_eq!(e.user_message(), "connection refused");
    }

    #[test]
    fn malformed_response_is_prefixed() {
        let e = AnalysisError::MalformedResponse("missing field `confidence`".into());
        assert_eq!(
            e.user_message(),
            "Analysis failed: missing field `confidence`"
        );
    }
}
