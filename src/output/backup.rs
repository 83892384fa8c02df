// src/output/backup.rs

//! Whole-tree moves between output roots.
//!
//! `backup` / `restore` are plain relocations. `snapshot` and `promote` are
//! what the orchestrator uses: the canonical tree is copied (never moved)
//! into staging, and staging only replaces canonical through `promote`,
//! which is the single place the canonical path changes hands.

use std::path::Path;

use anyhow::Context;
use tracing::{debug, error, info, warn};

use crate::errors::Result;
use crate::fs::{is_cross_device, FileSystem};

/// Move `from` to `to`, falling back to copy + delete when the two paths sit
/// on different filesystems.
pub fn move_tree(fs: &dyn FileSystem, from: &Path, to: &Path) -> Result<()> {
    match fs.rename(from, to) {
        Ok(()) => Ok(()),
        Err(err) if is_cross_device(&err) => {
            debug!(?from, ?to, "rename crosses devices; copying instead");
            fs.copy_dir_all(from, to)?;
            fs.remove_dir_all(from)?;
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

/// Relocate the primary tree to `backup`, overwriting any prior backup.
pub fn backup(fs: &dyn FileSystem, primary: &Path, backup: &Path) -> Result<()> {
    if fs.exists(backup) {
        warn!(?backup, "replacing existing backup");
        fs.remove_dir_all(backup)?;
    }
    move_tree(fs, primary, backup)?;
    debug!(?primary, ?backup, "backed up output");
    Ok(())
}

/// Relocate the backup tree back to `primary`, which must not exist.
pub fn restore(fs: &dyn FileSystem, backup: &Path, primary: &Path) -> Result<()> {
    if fs.exists(primary) {
        return Err(anyhow::anyhow!(
            "cannot restore {:?}: {:?} already exists",
            backup,
            primary
        )
        .into());
    }
    move_tree(fs, backup, primary)?;
    debug!(?backup, ?primary, "restored output");
    Ok(())
}

/// Copy `primary` into `staging`, replacing a stale staging tree if one was
/// left behind. `primary` is not modified.
pub fn snapshot(fs: &dyn FileSystem, primary: &Path, staging: &Path) -> Result<()> {
    if !fs.is_dir(primary) {
        return Err(anyhow::anyhow!("build output {:?} does not exist", primary).into());
    }
    if fs.exists(staging) {
        warn!(?staging, "removing stale staging directory from a previous run");
        fs.remove_dir_all(staging)?;
    }
    fs.copy_dir_all(primary, staging)
        .with_context(|| format!("snapshotting {:?} into {:?}", primary, staging))?;
    info!(?primary, ?staging, "snapshotted build output");
    Ok(())
}

/// Replace `primary` with `staging`.
///
/// The stale primary is parked at `retired`, staging is moved into place,
/// then the retired tree is deleted. If staging cannot be moved into place
/// the retired tree is put back before the error is returned.
pub fn promote(fs: &dyn FileSystem, staging: &Path, primary: &Path, retired: &Path) -> Result<()> {
    if fs.exists(primary) {
        backup(fs, primary, retired)?;
    }

    if let Err(err) = restore(fs, staging, primary) {
        if fs.exists(retired) && !fs.exists(primary) {
            if let Err(undo) = move_tree(fs, retired, primary) {
                error!(?retired, ?primary, error = %undo, "failed to put back previous output");
            }
        }
        return Err(err);
    }

    if fs.exists(retired) {
        fs.remove_dir_all(retired)?;
    }
    info!(?staging, ?primary, "promoted staged output");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;

    #[test]
    fn backup_overwrites_previous_backup() {
        let fs = MockFileSystem::new();
        fs.add_file(".vercel/new.txt", "new");
        fs.add_file(".vercel.bak/old.txt", "old");

        backup(&fs, Path::new(".vercel"), Path::new(".vercel.bak")).unwrap();

        assert!(!fs.exists(Path::new(".vercel")));
        assert!(fs.exists(Path::new(".vercel.bak/new.txt")));
        assert!(!fs.exists(Path::new(".vercel.bak/old.txt")));
    }

    #[test]
    fn restore_refuses_to_clobber_primary() {
        let fs = MockFileSystem::new();
        fs.add_file(".vercel/a", "a");
        fs.add_file(".vercel.bak/b", "b");

        assert!(restore(&fs, Path::new(".vercel.bak"), Path::new(".vercel")).is_err());
        assert!(fs.exists(Path::new(".vercel.bak/b")));
    }

    #[test]
    fn snapshot_leaves_primary_in_place() {
        let fs = MockFileSystem::new();
        fs.add_file(".vercel/output/config.json", "{}");
        fs.add_file(".vercel.staging/leftover", "x");

        snapshot(&fs, Path::new(".vercel"), Path::new(".vercel.staging")).unwrap();

        assert!(fs.exists(Path::new(".vercel/output/config.json")));
        assert!(fs.exists(Path::new(".vercel.staging/output/config.json")));
        assert!(!fs.exists(Path::new(".vercel.staging/leftover")));
    }

    #[test]
    fn snapshot_requires_primary() {
        let fs = MockFileSystem::new();
        assert!(snapshot(&fs, Path::new(".vercel"), Path::new(".vercel.staging")).is_err());
        assert!(!fs.exists(Path::new(".vercel.staging")));
    }

    #[test]
    fn promote_swaps_and_drops_retired() {
        let fs = MockFileSystem::new();
        fs.add_file(".vercel/stale", "stale");
        fs.add_file(".vercel.staging/merged", "merged");

        promote(
            &fs,
            Path::new(".vercel.staging"),
            Path::new(".vercel"),
            Path::new(".vercel.bak"),
        )
        .unwrap();

        assert_eq!(fs.read_to_string(Path::new(".vercel/merged")).unwrap(), "merged");
        assert!(!fs.exists(Path::new(".vercel/stale")));
        assert!(!fs.exists(Path::new(".vercel.staging")));
        assert!(!fs.exists(Path::new(".vercel.bak")));
    }

    #[test]
    fn failed_promote_puts_primary_back() {
        let fs = MockFileSystem::new();
        fs.add_file(".vercel/current", "current");

        let result = promote(
            &fs,
            Path::new(".vercel.staging"),
            Path::new(".vercel"),
            Path::new(".vercel.bak"),
        );

        assert!(result.is_err());
        assert!(fs.exists(Path::new(".vercel/current")));
        assert!(!fs.exists(Path::new(".vercel.bak")));
    }
}
