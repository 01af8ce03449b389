//! Periodic database file backup.
//!
//! On each tick the task checkpoints the WAL (`PRAGMA wal_checkpoint
//! (TRUNCATE)`) so the main database file is current, then copies it to a
//! timestamped file in the backup directory and prunes old copies. This is
//! an operational convenience, not a crash-consistency mechanism: a failed
//! run is logged and retried on the next tick, never fatal.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use tokio_util::sync::CancellationToken;

use jobboard_db::DbPool;

/// Suffix shared by all backup files, used to recognize them when pruning.
const BACKUP_SUFFIX: &str = "_database.db";

/// Run the backup loop until `cancel` is triggered.
///
/// `db_path` is the live SQLite file; `keep` bounds how many timestamped
/// copies are retained in `backup_dir`.
pub async fn run(
    pool: DbPool,
    db_path: PathBuf,
    backup_dir: PathBuf,
    interval: Duration,
    keep: usize,
    cancel: CancellationToken,
) {
    tracing::info!(
        db_path = %db_path.display(),
        backup_dir = %backup_dir.display(),
        interval_secs = interval.as_secs(),
        keep,
        "Database backup task started"
    );

    let mut ticker = tokio::time::interval(interval);
    // The first tick fires immediately; skip it so a fresh boot does not
    // back up an empty database.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Database backup task stopping");
                return;
            }
            _ = ticker.tick() => {
                match perform_backup(&pool, &db_path, &backup_dir, keep).await {
                    Ok(path) => {
                        tracing::info!(backup = %path.display(), "Database backup written");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Database backup failed");
                    }
                }
            }
        }
    }
}

/// Checkpoint the WAL, copy the database file, and prune old backups.
///
/// Returns the path of the new backup file.
pub async fn perform_backup(
    pool: &DbPool,
    db_path: &Path,
    backup_dir: &Path,
    keep: usize,
) -> anyhow::Result<PathBuf> {
    // Flush WAL contents into the main file so the copy is complete.
    sqlx::query("PRAGMA wal_checkpoint(TRUNCATE)")
        .execute(pool)
        .await
        .context("WAL checkpoint failed")?;

    tokio::fs::create_dir_all(backup_dir)
        .await
        .with_context(|| format!("creating backup dir {}", backup_dir.display()))?;

    let target = backup_dir.join(backup_filename(Utc::now()));
    tokio::fs::copy(db_path, &target)
        .await
        .with_context(|| format!("copying {} to {}", db_path.display(), target.display()))?;

    prune_old_backups(backup_dir, keep)
        .await
        .context("pruning old backups")?;

    Ok(target)
}

/// `YYYY_MM_DD_HH_MM_SS_database.db` -- lexicographic order equals
/// chronological order, which pruning relies on.
fn backup_filename(now: chrono::DateTime<Utc>) -> String {
    format!("{}{}", now.format("%Y_%m_%d_%H_%M_%S"), BACKUP_SUFFIX)
}

/// Delete the oldest backups, keeping the newest `keep` copies.
async fn prune_old_backups(backup_dir: &Path, keep: usize) -> std::io::Result<()> {
    let mut backups = Vec::new();
    let mut entries = tokio::fs::read_dir(backup_dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(BACKUP_SUFFIX) {
            backups.push(entry.path());
        }
    }

    if backups.len() <= keep {
        return Ok(());
    }

    backups.sort();
    let excess = backups.len() - keep;
    for old in backups.into_iter().take(excess) {
        tracing::debug!(backup = %old.display(), "Removing old backup");
        tokio::fs::remove_file(old).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_backup_filename_format() {
        let ts = Utc.with_ymd_and_hms(2026, 3, 1, 9, 5, 30).unwrap();
        assert_eq!(backup_filename(ts), "2026_03_01_09_05_30_database.db");
    }

    #[tokio::test]
    async fn test_prune_keeps_newest() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "2026_01_01_00_00_00_database.db",
            "2026_01_02_00_00_00_database.db",
            "2026_01_03_00_00_00_database.db",
            "unrelated.txt",
        ] {
            tokio::fs::write(dir.path().join(name), b"x").await.unwrap();
        }

        prune_old_backups(dir.path(), 2).await.unwrap();

        assert!(!dir.path().join("2026_01_01_00_00_00_database.db").exists());
        assert!(dir.path().join("2026_01_02_00_00_00_database.db").exists());
        assert!(dir.path().join("2026_01_03_00_00_00_database.db").exists());
        // Files without the backup suffix are never touched.
        assert!(dir.path().join("unrelated.txt").exists());
    }

    #[tokio::test]
    async fn test_prune_noop_under_limit() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join("2026_01_01_00_00_00_database.db"), b"x")
            .await
            .unwrap();

        prune_old_backups(dir.path(), 5).await.unwrap();
        assert!(dir.path().join("2026_01_01_00_00_00_database.db").exists());
    }
}
