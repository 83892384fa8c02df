// src/fs/mock.rs

use super::FileSystem;
use anyhow::{anyhow, bail, Result};
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockEntry {
    File(Vec<u8>),
    Dir,
}

/// In-memory filesystem keyed by normalised relative paths.
///
/// Directories are explicit entries; children are found by scanning for
/// keys whose parent is the directory. The root (`""` / `.`) always exists.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    entries: Arc<Mutex<BTreeMap<PathBuf, MockEntry>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let path = normalize(path.as_ref());
        let mut entries = self.lock();
        if let Some(parent) = path.parent() {
            ensure_dirs(&mut entries, parent);
        }
        entries.insert(path, MockEntry::File(content.into()));
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = normalize(path.as_ref());
        ensure_dirs(&mut self.lock(), &path);
    }

    /// All file paths currently stored, sorted.
    pub fn files(&self) -> Vec<PathBuf> {
        self.lock()
            .iter()
            .filter(|(_, e)| matches!(e, MockEntry::File(_)))
            .map(|(p, _)| p.clone())
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<PathBuf, MockEntry>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

fn is_root(path: &Path) -> bool {
    path.as_os_str().is_empty()
}

fn ensure_dirs(entries: &mut BTreeMap<PathBuf, MockEntry>, path: &Path) {
    for ancestor in path.ancestors().filter(|a| !is_root(a)) {
        entries.entry(ancestor.to_path_buf()).or_insert(MockEntry::Dir);
    }
}

fn dir_exists(entries: &BTreeMap<PathBuf, MockEntry>, path: &Path) -> bool {
    is_root(path) || matches!(entries.get(path), Some(MockEntry::Dir))
}

fn subtree(entries: &BTreeMap<PathBuf, MockEntry>, root: &Path) -> Vec<PathBuf> {
    entries
        .keys()
        .filter(|k| k.starts_with(root))
        .cloned()
        .collect()
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        let path = normalize(path);
        let entries = self.lock();
        match entries.get(&path) {
            Some(MockEntry::File(content)) => {
                String::from_utf8(content.clone()).map_err(|e| anyhow!("Invalid UTF-8: {}", e))
            }
            Some(MockEntry::Dir) => Err(anyhow!("Is a directory: {:?}", path)),
            None => Err(anyhow!("File not found: {:?}", path)),
        }
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if self.is_dir(path) {
            bail!("Is a directory: {:?}", path);
        }
        self.add_file(path, contents);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let path = normalize(path);
        is_root(&path) || self.lock().contains_key(&path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        dir_exists(&self.lock(), &normalize(path))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let path = normalize(path);
        let entries = self.lock();
        if !dir_exists(&entries, &path) {
            bail!("Not a directory or not found: {:?}", path);
        }
        Ok(entries
            .keys()
            .filter(|k| k.parent() == Some(path.as_path()))
            .cloned()
            .collect())
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        let path = normalize(path);
        let mut entries = self.lock();
        if let Some(MockEntry::File(_)) = entries.get(&path) {
            bail!("File exists: {:?}", path);
        }
        ensure_dirs(&mut entries, &path);
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        let from = normalize(from);
        let to = normalize(to);
        let mut entries = self.lock();

        let Some(source) = entries.get(&from).cloned() else {
            bail!("No such file or directory: {:?}", from);
        };
        if let Some(parent) = to.parent() {
            if !dir_exists(&entries, parent) {
                bail!("No such file or directory: {:?}", parent);
            }
        }
        if to.starts_with(&from) {
            bail!("Cannot move {:?} into itself ({:?})", from, to);
        }

        let existing = entries.get(&to).cloned();
        match (existing, &source) {
            (None, _) => {}
            (Some(MockEntry::File(_)), MockEntry::File(_)) => {
                entries.remove(&to);
            }
            (Some(MockEntry::Dir), MockEntry::Dir) if subtree(&entries, &to).len() == 1 => {
                entries.remove(&to);
            }
            (Some(MockEntry::Dir), MockEntry::Dir) => {
                bail!("Directory not empty: {:?}", to);
            }
            _ => bail!("Cannot overwrite {:?} with {:?}", to, from),
        }

        for key in subtree(&entries, &from) {
            if let Some(entry) = entries.remove(&key) {
                let rel = key.strip_prefix(&from)?;
                entries.insert(to.join(rel), entry);
            }
        }
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        let path = normalize(path);
        let mut entries = self.lock();
        match entries.get(&path) {
            Some(MockEntry::File(_)) => {
                entries.remove(&path);
                Ok(())
            }
            Some(MockEntry::Dir) => Err(anyhow!("Is a directory: {:?}", path)),
            None => Err(anyhow!("File not found: {:?}", path)),
        }
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        let path = normalize(path);
        let mut entries = self.lock();
        if !matches!(entries.get(&path), Some(MockEntry::Dir)) {
            bail!("Not a directory or not found: {:?}", path);
        }
        for key in subtree(&entries, &path) {
            entries.remove(&key);
        }
        Ok(())
    }

    fn copy_dir_all(&self, from: &Path, to: &Path) -> Result<()> {
        let from = normalize(from);
        let to = normalize(to);
        let mut entries = self.lock();
        if !matches!(entries.get(&from), Some(MockEntry::Dir)) {
            bail!("Not a directory or not found: {:?}", from);
        }
        ensure_dirs(&mut entries, &to);
        for key in subtree(&entries, &from) {
            let entry = entries[&key].clone();
            let rel = key.strip_prefix(&from)?;
            entries.insert(to.join(rel), entry);
        }
        Ok(())
    }
}
