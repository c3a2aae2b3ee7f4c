use crate::orchestrator;
use anyhow::{Context, Result};
use std::sync::mpsc as std_mpsc;
use std::sync::OnceLock;
use std::time::Duration;

use super::state::UiState;

// Global clipboard manager channel - initialized once on first use
static CLIPBOARD_SENDER: OnceLock<std_mpsc::Sender<String>> = OnceLock::new();

/// Save the Ready analysis as a JSON report.
/// Uses `explicit` when given, otherwise a timestamped file in the current directory.
pub fn save_report(
    state: &UiState,
    explicit: Option<&std::path::Path>,
) -> Result<std::path::PathBuf> {
    let result = state
        .result()
        .ok_or_else(|| anyhow::anyhow!("No finished analysis to save yet"))?;
    let file_name = state.file_name.as_deref().unwrap_or("upload.csv");
    let report = orchestrator::build_report(&state.config, file_name, result);

    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let default_name = format!(
                "gold-safety-{}.json",
                report.analyzed_at.replace(':', "-").replace('T', "_")
            );
            std::env::current_dir()
                .context("get current directory")?
                .join(default_name)
        }
    };
    orchestrator::export_json(&path, &report)?;
    Ok(path)
}

/// Initialize the clipboard manager thread if not already initialized.
/// Each clipboard instance is kept alive long enough for clipboard managers to read it.
fn init_clipboard_manager() -> Result<&'static std_mpsc::Sender<String>> {
    CLIPBOARD_SENDER.get_or_init(|| {
        let (tx, rx) = std_mpsc::channel::<String>();

        std::thread::spawn(move || {
            use arboard::Clipboard;

            for text in rx {
                if let Ok(mut clipboard) = Clipboard::new() {
                    if clipboard.set_text(&text).is_ok() {
                        std::thread::sleep(Duration::from_secs(2));
                    }
                }
            }
        });

        tx
    });

    CLIPBOARD_SENDER
        .get()
        .ok_or_else(|| anyhow::anyhow!("Failed to initialize clipboard manager"))
}

/// Queue text for the clipboard without blocking the UI thread.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let sender = init_clipboard_manager()?;
    sender
        .send(text.to_string())
        .map_err(|_| anyhow::anyhow!("Clipboard manager channel closed"))?;
    Ok(())
}
