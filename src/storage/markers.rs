// src/storage/markers.rs
use std::path::{Path, PathBuf};
use log::debug;
use crate::models::{Dimension, MarkerRecord};
use crate::utils::ExportError;

pub const MARKERS_FILE: &str = "lambda.players.js";

pub fn markers_path(unmined_folder: &Path, dimension: Dimension) -> PathBuf {
    unmined_folder.join(dimension.as_str()).join(MARKERS_FILE)
}

/// Renders markers as a script the map page can include directly.
pub fn render_markers(records: &[MarkerRecord]) -> Result<String, ExportError> {
    let json = serde_json::to_string(records)?;
    Ok(format!("var LambdaPlayers = {};", json))
}

/// Replaces the dimension's marker file. An empty slice still writes a file
/// so stale markers disappear.
pub async fn export_markers(
    records: &[MarkerRecord],
    dimension: Dimension,
    unmined_folder: &Path,
) -> Result<(), ExportError> {
    let script = render_markers(records)?;
    let path = markers_path(unmined_folder, dimension);
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&path, script).await?;
    debug!("Wrote {} markers to {}", records.len(), path.display());
    Ok(())
}
