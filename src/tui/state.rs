use crate::gate::{self, SafetyVerdict};
use crate::model::{AnalysisResult, ClientConfig, LifecycleEvent, ServiceStatus};
use crate::orchestrator::LifecycleState;

pub struct UiState {
    pub tab: usize,
    pub info: String,
    /// Mirror of the controller's state; replaced wholesale by `StateChanged` events.
    pub lifecycle: LifecycleState,
    /// Path being typed in the upload box.
    pub input: String,
    pub file_name: Option<String>,
    pub service_status: Option<ServiceStatus>,
    pub status_probed: bool,
    pub config: ClientConfig,
}

impl UiState {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            tab: 0,
            info: String::new(),
            lifecycle: LifecycleState::Idle,
            input: String::new(),
            file_name: None,
            service_status: None,
            status_probed: false,
            config,
        }
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.lifecycle {
            LifecycleState::Ready(r) => Some(&**r),
            _ => None,
        }
    }

    /// Derived on every read, never cached.
    pub fn verdict(&self) -> Option<SafetyVerdict> {
        self.result().map(gate::evaluate)
    }

    /// Idle and Failed show the upload box and accept typed paths.
    pub fn accepts_input(&self) -> bool {
        matches!(
            self.lifecycle,
            LifecycleState::Idle | LifecycleState::Failed(_)
        )
    }

    pub fn service_label(&self) -> String {
        match (&self.service_status, self.status_probed) {
            (Some(s), _) => format!(
                "{} ({})",
                s.system.as_deref().unwrap_or("analysis service"),
                s.status.as_deref().unwrap_or("unknown")
            ),
            (None, true) => "unreachable".into(),
            (None, false) => "probing…".into(),
        }
    }

    pub fn apply_event(&mut self, ev: LifecycleEvent) {
        match ev {
            LifecycleEvent::StateChanged(next) => {
                match &next {
                    LifecycleState::Submitting(upload) => {
                        self.file_name = Some(upload.file_name.clone());
                        self.info = format!("Uploading {}", upload.file_name);
                    }
                    LifecycleState::Awaiting => self.info = "Waiting for analysis…".into(),
                    LifecycleState::Ready(_) => self.info = "Analysis ready".into(),
                    LifecycleState::Failed(_) => self.info = "Analysis failed".into(),
                    LifecycleState::Idle => self.info.clear(),
                }
                self.lifecycle = next;
            }
            LifecycleEvent::Info(info) => self.info = info.to_message(),
            LifecycleEvent::ServiceStatus(status) => {
                self.service_status = status;
                self.status_probed = true;
            }
        }
    }
}
