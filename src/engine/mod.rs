mod client;

pub use client::{decode_response, HttpAnalysisService};

use crate::error::AnalysisError;
use crate::model::{AnalysisResult, ServiceStatus, Upload};
use async_trait::async_trait;

/// The remote analysis service, seen as an opaque request/response contract.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Send one market-data file for analysis. Never retried.
    async fn analyze(&self, upload: Upload) -> Result<AnalysisResult, AnalysisError>;

    /// Probe the service root for its banner.
    async fn status(&self) -> Result<ServiceStatus, AnalysisError>;
}
