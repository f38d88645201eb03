//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected files and directories exist at startup.

use std::path::Path;

use tracing::warn;

/// Ensure the writable data directory exists; warn when an expected input file is missing.
pub async fn ensure_env(data_dir: impl AsRef<Path>, expected_files: &[&Path]) -> anyhow::Result<()> {
    let data_dir = data_dir.as_ref();
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", data_dir.display()))?;
    for file in expected_files {
        if tokio::fs::metadata(file).await.is_err() {
            warn!(file = %file.display(), "expected file not found");
        }
    }
    Ok(())
}
