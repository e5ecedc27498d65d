//! Snapshot location and loading

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::EstimateError;
use crate::snapshot::{Snapshot, SnapshotFormat};

/// Used when neither `--snapshot` nor `LIQ_SNAPSHOT` is given
pub const DEFAULT_SNAPSHOT: &str = "snapshot.toml";

pub struct EstimatorConfig {
    pub snapshot_path: PathBuf,
    pub format: SnapshotFormat,
}

impl EstimatorConfig {
    pub fn new(snapshot_path: Option<PathBuf>) -> Result<Self> {
        let snapshot_path = snapshot_path.unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT));
        let format = format_for(&snapshot_path)?;

        Ok(Self {
            snapshot_path,
            format,
        })
    }

    pub fn load_snapshot(&self) -> Result<Snapshot> {
        load_snapshot(&self.snapshot_path, self.format)
    }
}

/// Pick the parser from the file extension
fn format_for(path: &Path) -> Result<SnapshotFormat> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(SnapshotFormat::Toml),
        Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(SnapshotFormat::Json),
        _ => anyhow::bail!(
            "Unsupported snapshot file: {}. Use a .toml or .json file",
            path.display()
        ),
    }
}

/// Read and parse a snapshot file
fn load_snapshot(path: &Path, format: SnapshotFormat) -> Result<Snapshot> {
    if !path.exists() {
        anyhow::bail!(
            "Snapshot file not found: {}\n\
             Pass one with --snapshot or set LIQ_SNAPSHOT",
            path.display()
        );
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot file: {}", path.display()))?;

    let snapshot = Snapshot::parse(&data, format).map_err(|reason| EstimateError::Snapshot {
        path: path.to_path_buf(),
        reason,
    })?;

    log::debug!(
        "loaded {} reserves and {} positions from {}",
        snapshot.reserves.len(),
        snapshot.positions.len(),
        path.display()
    );
    Ok(snapshot)
}
