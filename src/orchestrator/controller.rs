//! Analysis lifecycle controller.
//!
//! Owns the Idle → Submitting → Awaiting → Ready/Failed state machine and the
//! async driver that serialises UI commands against it.

use crate::engine::AnalysisService;
use crate::error::AnalysisError;
use crate::gate::{self, SafetyVerdict};
use crate::model::{AnalysisResult, InfoEvent, LifecycleEvent, Upload};
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// The single authoritative phase of the upload-analyze-render workflow.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    Idle,
    Submitting(Upload),
    Awaiting,
    // Boxed to keep the enum small next to the unit variants.
    Ready(Box<AnalysisResult>),
    Failed(String),
}

impl LifecycleState {
    pub fn name(&self) -> &'static str {
        match self {
            LifecycleState::Idle => "Idle",
            LifecycleState::Submitting(_) => "Submitting",
            LifecycleState::Awaiting => "Awaiting",
            LifecycleState::Ready(_) => "Ready",
            LifecycleState::Failed(_) => "Failed",
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, LifecycleState::Submitting(_) | LifecycleState::Awaiting)
    }
}

/// Transitions the controller refuses; the state is left untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    #[error("an analysis is already in flight")]
    Busy,
    #[error("start a new analysis before selecting another file")]
    ResetRequired,
    #[error("reset is only available once an analysis is ready or failed")]
    ResetUnavailable,
    #[error("no upload is waiting to be sent")]
    NotSubmitting,
    #[error("no analysis is awaiting a response")]
    NotAwaiting,
}

#[derive(Debug, Default)]
pub struct AnalysisController {
    state: LifecycleState,
}

impl AnalysisController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LifecycleState {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            LifecycleState::Ready(r) => Some(&**r),
            _ => None,
        }
    }

    /// Recomputed on every call; only Ready has a verdict.
    pub fn verdict(&self) -> Option<SafetyVerdict> {
        self.result().map(gate::evaluate)
    }

    /// Idle → Submitting. An empty selection is ignored and reported as
    /// `Ok(false)`.
    pub fn select_file(&mut self, selection: Option<Upload>) -> Result<bool, TransitionError> {
        match &self.state {
            LifecycleState::Submitting(_) | LifecycleState::Awaiting => {
                return Err(TransitionError::Busy)
            }
            LifecycleState::Ready(_) | LifecycleState::Failed(_) => {
                return Err(TransitionError::ResetRequired)
            }
            LifecycleState::Idle => {}
        }
        let Some(upload) = selection else {
            tracing::debug!(error = %AnalysisError::EmptySelection, "selection ignored");
            return Ok(false);
        };
        tracing::debug!(file = %upload.file_name, "file selected");
        self.state = LifecycleState::Submitting(upload);
        Ok(true)
    }

    /// Submitting → Awaiting, handing out the upload to send.
    pub fn dispatch(&mut self) -> Result<Upload, TransitionError> {
        match std::mem::replace(&mut self.state, LifecycleState::Awaiting) {
            LifecycleState::Submitting(upload) => Ok(upload),
            other => {
                self.state = other;
                Err(TransitionError::NotSubmitting)
            }
        }
    }

    /// Awaiting → Ready or Failed.
    pub fn resolve(
        &mut self,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) -> Result<(), TransitionError> {
        if self.state != LifecycleState::Awaiting {
            return Err(TransitionError::NotAwaiting);
        }
        self.state = match outcome {
            Ok(result) => {
                tracing::info!(
                    market_state = result.market_state.label(),
                    confidence = result.confidence,
                    "analysis ready"
                );
                LifecycleState::Ready(Box::new(result))
            }
            Err(e) => {
                tracing::warn!(error = %e, "analysis failed");
                LifecycleState::Failed(e.user_message())
            }
        };
        Ok(())
    }

    /// Ready | Failed → Idle, dropping any held result.
    pub fn reset(&mut self) -> Result<(), TransitionError> {
        match self.state {
            LifecycleState::Ready(_) | LifecycleState::Failed(_) => {
                self.state = LifecycleState::Idle;
                Ok(())
            }
            _ => Err(TransitionError::ResetUnavailable),
        }
    }

    /// Run a whole cycle inline: select, dispatch, one request, resolve.
    pub async fn submit(
        &mut self,
        service: &dyn AnalysisService,
        selection: Option<Upload>,
    ) -> Result<&LifecycleState, TransitionError> {
        if !self.select_file(selection)? {
            return Ok(&self.state);
        }
        let upload = self.dispatch()?;
        let outcome = service.analyze(upload).await;
        self.resolve(outcome)?;
        Ok(&self.state)
    }
}

/// Commands emitted by UI layers to drive the lifecycle.
#[derive(Debug, Clone)]
pub(crate) enum UiCommand {
    /// `None` is an empty selection.
    Submit(Option<PathBuf>),
    Reset,
    Quit,
}

type InFlight = tokio::task::JoinHandle<Result<AnalysisResult, AnalysisError>>;

fn emit_state(event_tx: &UnboundedSender<LifecycleEvent>, ctrl: &AnalysisController) {
    let _ = event_tx.send(LifecycleEvent::StateChanged(ctrl.state().clone()));
}

fn emit_info(event_tx: &UnboundedSender<LifecycleEvent>, info: InfoEvent) {
    let _ = event_tx.send(LifecycleEvent::Info(info));
}

/// Drive the lifecycle from UI commands and emit state changes back to presentation layers.
pub(crate) async fn run_controller(
    service: Arc<dyn AnalysisService>,
    event_tx: UnboundedSender<LifecycleEvent>,
    mut cmd_rx: UnboundedReceiver<UiCommand>,
) -> Result<()> {
    let mut ctrl = AnalysisController::new();
    let mut in_flight: Option<InFlight> = None;

    {
        let service = service.clone();
        let event_tx = event_tx.clone();
        tokio::spawn(async move {
            let status = service.status().await.ok();
            let _ = event_tx.send(LifecycleEvent::ServiceStatus(status));
        });
    }
    emit_state(&event_tx, &ctrl);

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UiCommand::Submit(path)) => {
                        // Refuse while busy before touching the disk.
                        if ctrl.is_busy() {
                            emit_info(&event_tx, InfoEvent::Rejected(TransitionError::Busy));
                            continue;
                        }
                        let selection = match path {
                            Some(p) => match Upload::from_path(&p).await {
                                Ok(upload) => Some(upload),
                                Err(e) => {
                                    emit_info(&event_tx, InfoEvent::Unreadable {
                                        path: p.display().to_string(),
                                        error: format!("{:#}", e.root_cause()),
                                    });
                                    continue;
                                }
                            },
                            None => None,
                        };
                        match ctrl.select_file(selection) {
                            Ok(true) => {}
                            Ok(false) => continue,
                            Err(e) => {
                                emit_info(&event_tx, InfoEvent::Rejected(e));
                                continue;
                            }
                        }
                        emit_state(&event_tx, &ctrl);
                        let upload = match ctrl.dispatch() {
                            Ok(u) => u,
                            Err(e) => {
                                emit_info(&event_tx, InfoEvent::Rejected(e));
                                continue;
                            }
                        };
                        emit_state(&event_tx, &ctrl);
                        let service = service.clone();
                        in_flight = Some(tokio::spawn(async move { service.analyze(upload).await }));
                    }
                    Some(UiCommand::Reset) => match ctrl.reset() {
                        Ok(()) => emit_state(&event_tx, &ctrl),
                        Err(e) => emit_info(&event_tx, InfoEvent::Rejected(e)),
                    },
                    Some(UiCommand::Quit) | None => {
                        if let Some(h) = in_flight.take() {
                            h.abort();
                        }
                        break Ok(());
                    }
                }
            }
            // Keep the JoinHandle in place until this branch wins; dropping it from a
            // losing branch would lose the completion.
            outcome = async {
                match in_flight.as_mut() {
                    Some(h) => h.await,
                    None => futures::future::pending().await,
                }
            } => {
                in_flight = None;
                let outcome = outcome.unwrap_or_else(|e| {
                    Err(AnalysisError::TransportFailure(format!("analysis task failed: {e}")))
                });
                if let Err(e) = ctrl.resolve(outcome) {
                    emit_info(&event_tx, InfoEvent::Rejected(e));
                }
                emit_state(&event_tx, &ctrl);
            }
        }
    }
}
