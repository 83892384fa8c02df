// src/fs/mod.rs

use std::fmt::Debug;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

pub mod mock;

/// Abstract filesystem interface.
///
/// Everything the orchestrator touches on disk goes through this trait, so
/// the whole backup / relocate / patch pipeline can run against
/// [`mock::MockFileSystem`] in tests.
pub trait FileSystem: Send + Sync + Debug {
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Write a file, creating parent directories as needed.
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;

    /// Return a list of entries in a directory.
    /// Returns full paths.
    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Rename a file or directory. Replaces an existing destination file,
    /// fails on an existing non-empty destination directory.
    fn rename(&self, from: &Path, to: &Path) -> Result<()>;
    fn remove_file(&self, path: &Path) -> Result<()>;
    fn remove_dir_all(&self, path: &Path) -> Result<()>;

    /// Recursively copy the directory tree at `from` to `to`.
    fn copy_dir_all(&self, from: &Path, to: &Path) -> Result<()>;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("reading file {:?}", path))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating dir {:?}", parent))?;
            }
        }
        let mut file = fs::File::create(path).with_context(|| format!("creating file {:?}", path))?;
        file.write_all(contents).with_context(|| format!("writing to file {:?}", path))?;
        file.sync_all().with_context(|| format!("syncing file {:?}", path))?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path).with_context(|| format!("reading dir {:?}", path))? {
            let entry = entry?;
            entries.push(entry.path());
        }
        entries.sort();
        Ok(entries)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).with_context(|| format!("creating dir {:?}", path))
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        fs::rename(from, to).with_context(|| format!("renaming {:?} to {:?}", from, to))
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).with_context(|| format!("removing file {:?}", path))
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        fs::remove_dir_all(path).with_context(|| format!("removing dir {:?}", path))
    }

    fn copy_dir_all(&self, from: &Path, to: &Path) -> Result<()> {
        for entry in WalkDir::new(from).follow_links(false) {
            let entry = entry.with_context(|| format!("walking {:?}", from))?;
            let rel = entry
                .path()
                .strip_prefix(from)
                .with_context(|| format!("{:?} is not below {:?}", entry.path(), from))?;
            let target = to.join(rel);
            let file_type = entry.file_type();

            if file_type.is_dir() {
                fs::create_dir_all(&target)
                    .with_context(|| format!("creating dir {:?}", target))?;
            } else if file_type.is_symlink() {
                copy_symlink(entry.path(), &target)?;
            } else {
                fs::copy(entry.path(), &target)
                    .with_context(|| format!("copying {:?} to {:?}", entry.path(), target))?;
            }
        }
        Ok(())
    }
}

/// Recreate a symlink rather than following it; bundles often link into
/// shared `node_modules` trees.
#[cfg(unix)]
fn copy_symlink(src: &Path, dst: &Path) -> Result<()> {
    let link = fs::read_link(src).with_context(|| format!("reading link {:?}", src))?;
    std::os::unix::fs::symlink(&link, dst)
        .with_context(|| format!("creating symlink {:?} -> {:?}", dst, link))
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, dst: &Path) -> Result<()> {
    fs::copy(src, dst)
        .map(|_| ())
        .with_context(|| format!("copying {:?} to {:?}", src, dst))
}

/// True if the error chain bottoms out in a cross-device rename failure.
pub fn is_cross_device(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<io::Error>())
        .any(|io_err| io_err.kind() == io::ErrorKind::CrossesDevices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn copy_dir_all_copies_nested_tree() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        let fs = RealFileSystem;

        fs.write(&src.join("a/b/c.txt"), b"deep").unwrap();
        fs.write(&src.join("top.json"), b"{}").unwrap();

        let dst = dir.path().join("dst");
        fs.copy_dir_all(&src, &dst).unwrap();

        assert_eq!(fs.read_to_string(&dst.join("a/b/c.txt")).unwrap(), "deep");
        assert_eq!(fs.read_to_string(&dst.join("top.json")).unwrap(), "{}");
        assert!(fs.exists(&src.join("top.json")));
    }

    #[test]
    fn rename_onto_non_empty_dir_fails() {
        let dir = tempdir().unwrap();
        let fs = RealFileSystem;
        fs.write(&dir.path().join("a/x"), b"1").unwrap();
        fs.write(&dir.path().join("b/y"), b"2").unwrap();

        let err = fs
            .rename(&dir.path().join("a"), &dir.path().join("b"))
            .unwrap_err();
        assert!(format!("{err:#}").contains("renaming"));
        assert!(!is_cross_device(&err));
    }
}
