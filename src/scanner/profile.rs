use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use thiserror::Error;

const PROFILE_PREFIX: &str = "scrape-profile-";

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("could not create profile root {}: {source}", path.display())]
    Root { path: PathBuf, source: io::Error },

    #[error("could not create profile dir in {}: {source}", root.display())]
    Create { root: PathBuf, source: io::Error },

    #[error("Profile dir does not exist: {}", .0.display())]
    Missing(PathBuf),

    #[error("No write permission on profile dir: {}", .0.display())]
    NotWritable(PathBuf),
}

/// Creates a fresh browser profile directory under `root`, creating `root`
/// first if needed. The directory is deleted when the returned handle drops.
pub fn create(root: &Path) -> Result<TempDir, ProfileError> {
    fs::create_dir_all(root).map_err(|source| ProfileError::Root {
        path: root.to_path_buf(),
        source,
    })?;

    let dir = tempfile::Builder::new()
        .prefix(PROFILE_PREFIX)
        .tempdir_in(root)
        .map_err(|source| ProfileError::Create {
            root: root.to_path_buf(),
            source,
        })?;

    check_usable(dir.path())?;
    Ok(dir)
}

fn check_usable(path: &Path) -> Result<(), ProfileError> {
    if !path.is_dir() {
        return Err(ProfileError::Missing(path.to_path_buf()));
    }
    // The test file is removed as soon as it is dropped.
    if tempfile::tempfile_in(path).is_err() {
        return Err(ProfileError::NotWritable(path.to_path_buf()));
    }
    Ok(())
}
