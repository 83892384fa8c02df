// src/output/relocate.rs

use std::path::Path;

use tracing::info;

use crate::errors::Result;
use crate::fs::FileSystem;
use crate::output::backup::move_tree;

/// Move one function bundle from the latest build into another output tree.
///
/// The destination tree must already exist and must not contain a bundle at
/// `dest`; the two bundles end up as siblings distinguished by name.
pub fn relocate(fs: &dyn FileSystem, source: &Path, dest: &Path) -> Result<()> {
    if !fs.is_dir(source) {
        return Err(anyhow::anyhow!("function bundle {:?} was not produced by the build", source).into());
    }
    if fs.exists(dest) {
        return Err(anyhow::anyhow!("destination bundle {:?} already exists", dest).into());
    }
    if let Some(parent) = dest.parent() {
        fs.create_dir_all(parent)?;
    }

    move_tree(fs, source, dest)?;
    info!(?source, ?dest, "relocated function bundle");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;

    #[test]
    fn bundle_lands_next_to_existing_one() {
        let fs = MockFileSystem::new();
        fs.add_file(".vercel/output/functions/__nitro.func/index.mjs", "node");
        fs.add_file(".vercel.staging/output/functions/__nitro.func/index.mjs", "edge");

        relocate(
            &fs,
            Path::new(".vercel/output/functions/__nitro.func"),
            Path::new(".vercel.staging/output/functions/__nitro-nodejs18x.func"),
        )
        .unwrap();

        assert_eq!(
            fs.read_dir(Path::new(".vercel.staging/output/functions")).unwrap().len(),
            2
        );
        assert_eq!(
            fs.read_to_string(Path::new(
                ".vercel.staging/output/functions/__nitro-nodejs18x.func/index.mjs"
            ))
            .unwrap(),
            "node"
        );
        assert!(!fs.exists(Path::new(".vercel/output/functions/__nitro.func")));
    }

    #[test]
    fn missing_source_is_an_error() {
        let fs = MockFileSystem::new();
        fs.add_dir(".vercel.staging/output/functions");

        let err = relocate(
            &fs,
            Path::new(".vercel/output/functions/__nitro.func"),
            Path::new(".vercel.staging/output/functions/__nitro-x.func"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("was not produced"));
    }

    #[test]
    fn existing_destination_is_not_overwritten() {
        let fs = MockFileSystem::new();
        fs.add_file("a/output/functions/__nitro.func/index.mjs", "new");
        fs.add_file("b/output/functions/__nitro-x.func/index.mjs", "old");

        assert!(
            relocate(
                &fs,
                Path::new("a/output/functions/__nitro.func"),
                Path::new("b/output/functions/__nitro-x.func"),
            )
            .is_err()
        );
        assert_eq!(
            fs.read_to_string(Path::new("b/output/functions/__nitro-x.func/index.mjs"))
                .unwrap(),
            "old"
        );
    }
}
