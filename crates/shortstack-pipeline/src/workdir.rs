//! Output directory lifecycle.
//!
//! The output folder is a scratch space shared by every stage of a run:
//! cleared unconditionally before a run starts, pruned down to the final
//! composite after it succeeds.

use std::path::Path;
use tokio::fs;
use tracing::debug;

use crate::error::PipelineResult;

/// Delete every file in `dir`, creating the directory if it is missing.
pub async fn clear_dir(dir: impl AsRef<Path>) -> PipelineResult<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).await?;

    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_file() {
            debug!("Removing stale output: {}", entry.path().display());
            fs::remove_file(entry.path()).await?;
        }
    }
    Ok(())
}

/// Delete every file in `dir` except `keep`.
///
/// Paths are compared canonically so relative and absolute spellings of
/// the kept artifact match.
pub async fn prune_dir_except(dir: impl AsRef<Path>, keep: impl AsRef<Path>) -> PipelineResult<()> {
    let dir = dir.as_ref();
    let keep = fs::canonicalize(keep.as_ref()).await?;

    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        let path = entry.path();
        if fs::canonicalize(&path).await? == keep {
            continue;
        }
        debug!("Removing intermediate file: {}", path.display());
        fs::remove_file(path).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_clear_dir_removes_all_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.mp4"), b"x").await.unwrap();
        fs::write(dir.path().join("b.txt"), b"y").await.unwrap();

        clear_dir(dir.path()).await.unwrap();

        let mut entries = fs::read_dir(dir.path()).await.unwrap();
        assert!(entries.next_entry().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear_dir_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("outputs");
        clear_dir(&nested).await.unwrap();
        assert!(nested.is_dir());
    }

    #[tokio::test]
    async fn test_prune_keeps_only_final_artifact() {
        let dir = TempDir::new().unwrap();
        let keep = dir.path().join("short_final.mp4");
        fs::write(&keep, b"final").await.unwrap();
        fs::write(dir.path().join("main.mp4"), b"x").await.unwrap();
        fs::write(dir.path().join("main_trim.mp4"), b"x")
            .await
            .unwrap();

        prune_dir_except(dir.path(), &keep).await.unwrap();

        let mut names = Vec::new();
        let mut entries = fs::read_dir(dir.path()).await.unwrap();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            names.push(entry.file_name());
        }
        assert_eq!(names, vec!["short_final.mp4"]);
    }
}
