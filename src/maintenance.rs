//! Operator maintenance for the generated audio directory.
//!
//! The server writes one MP3 per audio request and never deletes them. This
//! module powers the `learnsphere prune-audio` CLI command:
//!
//! ```text
//! $ learnsphere prune-audio --older-than-hours 72 --dry-run
//! $ learnsphere prune-audio --older-than-hours 72
//! ```

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

/// Outcome of a prune pass
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PruneReport {
    /// MP3 files looked at
    pub scanned: usize,
    /// Files removed, or that would be removed on a dry run
    pub removed: Vec<PathBuf>,
    pub bytes_freed: u64,
    pub dry_run: bool,
}

/// Delete generated MP3 files in `audio_dir` last modified more than
/// `older_than` ago. Other files are left alone. With `dry_run` nothing is
/// deleted and the report lists what would have been.
pub async fn prune_audio(
    audio_dir: &Path,
    older_than: Duration,
    dry_run: bool,
) -> Result<PruneReport> {
    let mut report = PruneReport {
        dry_run,
        ..Default::default()
    };

    if !audio_dir.exists() {
        info!(dir = %audio_dir.display(), "Audio directory does not exist, nothing to prune");
        return Ok(report);
    }

    let now = SystemTime::now();
    let mut entries = tokio::fs::read_dir(audio_dir)
        .await
        .with_context(|| format!("Failed to read audio directory {}", audio_dir.display()))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("mp3") {
            continue;
        }

        let metadata = entry.metadata().await?;
        if !metadata.is_file() {
            continue;
        }
        report.scanned += 1;

        let age = metadata
            .modified()
            .ok()
            .and_then(|modified| now.duration_since(modified).ok())
            .unwrap_or_default();
        if age < older_than {
            continue;
        }

        debug!(path = %path.display(), age_secs = age.as_secs(), "Expired audio file");
        if !dry_run {
            if let Err(e) = tokio::fs::remove_file(&path).await {
                warn!(path = %path.display(), error = %e, "Failed to remove audio file");
                continue;
            }
        }
        report.bytes_freed += metadata.len();
        report.removed.push(path);
    }

    info!(
        scanned = report.scanned,
        removed = report.removed.len(),
        bytes_freed = report.bytes_freed,
        dry_run,
        "Audio prune complete"
    );
    Ok(report)
}
