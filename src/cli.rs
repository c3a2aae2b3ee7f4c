use crate::engine::{AnalysisService, HttpAnalysisService};
use crate::model::{AnalysisResult, ClientConfig, ServiceStatus, Upload};
use crate::orchestrator::{self, AnalysisController, LifecycleState};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "gold-safety",
    version,
    about = "XAU/USD safety engine client with a hard no-trade gate"
)]
pub struct Cli {
    /// Base URL of the analysis service
    #[arg(long, default_value = "http://localhost:8000")]
    pub base_url: String,

    /// Path of the analysis endpoint under the base URL
    #[arg(long, default_value = "/api/analyze")]
    pub analyze_path: String,

    /// MT5 export (.csv) to analyze
    #[arg(long, short = 'f')]
    pub file: Option<std::path::PathBuf>,

    /// Print JSON report and exit (no TUI)
    #[arg(long)]
    pub json: bool,

    /// Print text summary and exit (no TUI)
    #[arg(long)]
    pub text: bool,

    /// Export the finished analysis as a JSON report
    #[arg(long)]
    pub export_json: Option<std::path::PathBuf>,

    /// Request timeout for the analysis call (e.g. 30s); unset means wait indefinitely
    #[arg(long)]
    pub timeout: Option<humantime::Duration>,

    /// Submit --file as soon as the TUI starts
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub submit_on_launch: bool,
}

impl Cli {
    pub fn is_headless(&self) -> bool {
        self.json || self.text
    }
}

pub async fn run(args: Cli) -> Result<()> {
    if args.json && args.text {
        return Err(anyhow::anyhow!("--json and --text are mutually exclusive"));
    }
    if args.is_headless() && args.file.is_none() {
        return Err(anyhow::anyhow!(
            "--file is required with --json or --text"
        ));
    }

    if !args.is_headless() {
        #[cfg(feature = "tui")]
        {
            return crate::tui::run(args).await;
        }
        #[cfg(not(feature = "tui"))]
        {
            // Fallback when built without TUI support.
            if args.file.is_none() {
                return Err(anyhow::anyhow!("--file is required without TUI support"));
            }
            return run_text(args).await;
        }
    }

    if args.json {
        return run_json(args).await;
    }
    run_text(args).await
}

/// Build a `ClientConfig` from CLI arguments.
pub fn build_config(args: &Cli) -> ClientConfig {
    ClientConfig {
        base_url: args.base_url.clone(),
        analyze_path: args.analyze_path.clone(),
        request_timeout: args.timeout.map(Duration::from),
        user_agent: format!("gold-safety-cli/{}", env!("CARGO_PKG_VERSION")),
    }
}

struct Finished {
    file_name: String,
    result: AnalysisResult,
    status: Option<ServiceStatus>,
}

/// Run one full lifecycle for `--file` and return the Ready result.
/// A Failed analysis becomes an error carrying the user-facing message.
async fn analyze_once(args: &Cli, cfg: &ClientConfig) -> Result<Finished> {
    let service = HttpAnalysisService::new(cfg)?;
    analyze_with(&service, args.file.as_deref()).await
}

async fn analyze_with(service: &dyn AnalysisService, file: Option<&Path>) -> Result<Finished> {
    let selection = match file {
        Some(p) => Some(Upload::from_path(p).await?),
        None => None,
    };
    let file_name = selection
        .as_ref()
        .map(|u| u.file_name.clone())
        .unwrap_or_default();

    // The banner is optional; an unanswered request is dropped once the analysis settles.
    let mut ctrl = AnalysisController::new();
    let banner = service.status();
    let submit = ctrl.submit(service, selection);
    tokio::pin!(banner, submit);
    let mut status = None;
    let mut answered = false;
    let settled = loop {
        tokio::select! {
            s = &mut banner, if !answered => {
                answered = true;
                status = s.ok();
            }
            state = &mut submit => break state.cloned()?,
        }
    };

    let result = match settled {
        LifecycleState::Ready(r) => *r,
        LifecycleState::Failed(msg) => return Err(anyhow::anyhow!("{msg}")),
        LifecycleState::Idle => return Err(anyhow::anyhow!("no file selected")),
        other => {
            return Err(anyhow::anyhow!(
                "analysis stopped in unexpected state {}",
                other.name()
            ))
        }
    };

    Ok(Finished {
        file_name,
        result,
        status,
    })
}

async fn run_json(args: Cli) -> Result<()> {
    let cfg = build_config(&args);
    let done = analyze_once(&args, &cfg).await?;
    let report = orchestrator::build_report(&cfg, &done.file_name, &done.result);

    handle_exports(&args, &report)?;
    let out = serde_json::to_string_pretty(&report).context("serialize report")?;
    println!("{out}");
    Ok(())
}

async fn run_text(args: Cli) -> Result<()> {
    let cfg = build_config(&args);
    eprintln!("Analyzing {} via {}", display_file(&args), cfg.analyze_url());
    let done = analyze_once(&args, &cfg).await?;

    let report = orchestrator::build_report(&cfg, &done.file_name, &done.result);
    handle_exports(&args, &report)?;

    let summary =
        crate::text_summary::build_text_summary(&done.file_name, done.status.as_ref(), &done.result);
    for line in summary.lines {
        println!("{line}");
    }
    Ok(())
}

fn display_file(args: &Cli) -> String {
    args.file
        .as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".into())
}

/// Handle export operations for both text and JSON modes.
fn handle_exports(args: &Cli, report: &crate::model::AnalysisReport) -> Result<()> {
    if let Some(p) = args.export_json.as_deref() {
        orchestrator::export_json(p, report)?;
        eprintln!("Exported JSON: {}", p.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;
    use crate::model::MarketState;

    /// Answers the analysis at once but never answers the banner request.
    struct SilentBanner;

    #[async_trait::async_trait]
    impl AnalysisService for SilentBanner {
        async fn analyze(&self, _upload: Upload) -> Result<AnalysisResult, AnalysisError> {
            Ok(serde_json::from_str(r#"{"market_state":"DANGEROUS","confidence":90}"#)
                .expect("payload"))
        }

        async fn status(&self) -> Result<ServiceStatus, AnalysisError> {
            futures::future::pending().await
        }
    }

    #[test]
    fn timeout_is_unset_by_default() {
        let args = Cli::parse_from(["gold-safety"]);
        let cfg = build_config(&args);
        assert_eq!(cfg.request_timeout, None);
        assert_eq!(cfg.analyze_url(), "http://localhost:8000/api/analyze");
        assert!(args.submit_on_launch);
    }

    #[test]
    fn timeout_flag_sets_request_timeout() {
        let args = Cli::parse_from([
            "gold-safety",
            "--timeout",
            "30s",
            "--base-url",
            "http://analysis.internal:9000",
        ]);
        let cfg = build_config(&args);
        assert_eq!(cfg.request_timeout, Some(Duration::from_secs(30)));
        assert_eq!(cfg.analyze_url(), "http://analysis.internal:9000/api/analyze");
    }

    #[tokio::test]
    async fn headless_modes_need_a_file() {
        let args = Cli::parse_from(["gold-safety", "--text"]);
        let err = run(args).await.unwrap_err();
        assert!(err.to_string().contains("--file"));

        let both = Cli::parse_from(["gold-safety", "--text", "--json", "-f", "a.csv"]);
        assert!(run(both).await.is_err());
    }

    #[tokio::test]
    async fn hung_banner_does_not_block_headless_analysis() {
        let dir = std::env::temp_dir().join(format!("gold-safety-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("XAUUSD_H1.csv");
        std::fs::write(&path, "time,open,high,low,close\n").unwrap();

        let done = tokio::time::timeout(
            Duration::from_secs(5),
            analyze_with(&SilentBanner, Some(path.as_path())),
        )
        .await
        .expect("analysis finished without waiting on the banner")
        .unwrap();
        assert_eq!(done.file_name, "XAUUSD_H1.csv");
        assert_eq!(done.result.market_state, MarketState::Dangerous);
        assert!(done.status.is_none());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
