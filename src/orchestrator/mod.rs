//! Application-level orchestration.
//!
//! This module owns the analysis lifecycle (select/dispatch/resolve/reset) and
//! post-analysis processing such as report building and export. UI/CLI layers
//! call into this module to keep responsibilities separated.

mod controller;
mod post_process;

pub(crate) use controller::{run_controller, UiCommand};
pub use controller::{AnalysisController, LifecycleState, TransitionError};
pub(crate) use post_process::{build_report, export_json};
