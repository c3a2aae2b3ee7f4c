use super::AnalysisService;
use crate::error::AnalysisError;
use crate::model::{AnalysisResult, ClientConfig, ServiceStatus, Upload};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

/// Multipart field the service reads the export from.
pub const FILE_FIELD: &str = "file";

pub struct HttpAnalysisService {
    http: reqwest::Client,
    analyze_url: String,
    status_url: String,
}

impl HttpAnalysisService {
    pub fn new(cfg: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(cfg.user_agent.clone());
        if let Some(timeout) = cfg.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("build HTTP client")?;
        Ok(Self {
            http,
            analyze_url: cfg.analyze_url(),
            status_url: cfg.status_url(),
        })
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisService {
    async fn analyze(&self, upload: Upload) -> Result<AnalysisResult, AnalysisError> {
        tracing::info!(
            file = %upload.file_name,
            bytes = upload.bytes.len(),
            url = %self.analyze_url,
            "submitting analysis"
        );
        let part = Part::bytes(upload.bytes.to_vec())
            .file_name(upload.file_name)
            .mime_str("text/csv")?;
        let form = Form::new().part(FILE_FIELD, part);

        let resp = self
            .http
            .post(&self.analyze_url)
            .multipart(form)
            .send()
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "analysis request failed"))?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await?;
        tracing::debug!(status, len = body.len(), "analysis response received");
        decode_response(status, &body)
    }

    async fn status(&self) -> Result<ServiceStatus, AnalysisError> {
        let resp = self.http.get(&self.status_url).send().await?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await?;
        if !(200..300).contains(&status) {
            return Err(AnalysisError::ServerRejection {
                status,
                detail: rejection_detail(&body),
            });
        }
        serde_json::from_slice(&body).map_err(|e| AnalysisError::MalformedResponse(e.to_string()))
    }
}

/// Map a raw HTTP response onto an analysis result or a classified failure.
pub fn decode_response(status: u16, body: &[u8]) -> Result<AnalysisResult, AnalysisError> {
    if !(200..300).contains(&status) {
        return Err(AnalysisError::ServerRejection {
            status,
            detail: rejection_detail(body),
        });
    }

    let result: AnalysisResult = serde_json::from_slice(body)
        .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))?;
    if result.confidence > AnalysisResult::MAX_CONFIDENCE {
        return Err(AnalysisError::MalformedResponse(format!(
            "confidence {} outside 0-{}",
            result.confidence,
            AnalysisResult::MAX_CONFIDENCE
        )));
    }
    Ok(result)
}

/// `detail` string from an error body; validation errors carry a list instead and are ignored.
fn rejection_detail(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value
        .get("detail")
        .and_then(|d| d.as_str())
        .map(|s| s.to_string())
}
