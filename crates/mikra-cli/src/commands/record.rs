//! Standalone microphone recording.

use anyhow::{Context, Result};
use std::path::Path;

use mikra_core::Recorder;

use crate::app::{self, Status, status};

/// Record until Enter and write the encoded asset to `output`.
pub fn run(output: &Path) -> Result<()> {
    let recorder = Recorder::start().context("failed to start recording")?;
    status(Status::Info, "Recording... press Enter to stop.");
    app::wait_for_enter()?;

    let asset = recorder.stop().context("failed to finalize recording")?;

    std::fs::write(output, &asset.data)
        .with_context(|| format!("failed to write {}", output.display()))?;

    let duration = asset
        .duration_secs
        .map(|s| format!("{s:.1}s"))
        .unwrap_or_else(|| "unknown length".to_string());
    status(
        Status::Ok,
        &format!(
            "Saved {} ({duration}, {}) to {}",
            human_size(asset.data.len()),
            asset.mime_type,
            output.display()
        ),
    );

    Ok(())
}

fn human_size(bytes: usize) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}
