//! Directory identity tracking for cycle detection.

use std::collections::HashMap;
use std::fs::Metadata;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::MetadataExt;

use pixelscan_core::{DirectoryId, ScanError};

/// Remembers the identity of every directory entered during one walk, keyed
/// by the path it was reached through.
///
/// Following a link can lead back into one of the directories above it. A
/// directory whose identity matches one of its own ancestors is reported as
/// [`ScanError::Cycle`]. Two sibling paths to the same directory are not a
/// cycle and are both walked.
#[derive(Debug, Default)]
pub struct DirectoryAncestry {
    ids: HashMap<PathBuf, DirectoryId>,
}

impl DirectoryAncestry {
    /// Create a new tracker.
    pub fn new() -> Self {
        Self {
            ids: HashMap::new(),
        }
    }

    /// Record a directory about to be listed, failing if it is its own ancestor.
    ///
    /// Parents must be entered before their children.
    pub fn enter(&mut self, path: &Path, metadata: &Metadata) -> Result<(), ScanError> {
        let id = directory_id(path, metadata)?;
        let loops = path
            .ancestors()
            .skip(1)
            .any(|ancestor| self.ids.get(ancestor) == Some(&id));
        if loops {
            return Err(ScanError::Cycle {
                path: path.to_path_buf(),
            });
        }
        self.ids.insert(path.to_path_buf(), id);
        Ok(())
    }
}

/// Get the identity of a directory from its metadata.
#[cfg(unix)]
fn directory_id(_path: &Path, metadata: &Metadata) -> Result<DirectoryId, ScanError> {
    Ok(DirectoryId::inode(metadata.dev(), metadata.ino()))
}

#[cfg(not(unix))]
fn directory_id(path: &Path, _metadata: &Metadata) -> Result<DirectoryId, ScanError> {
    path.canonicalize()
        .map(DirectoryId::Canonical)
        .map_err(|e| ScanError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[cfg(unix)]
    #[test]
    fn test_child_with_ancestor_identity_is_cycle() {
        let temp = TempDir::new().unwrap();
        let metadata = fs::metadata(temp.path()).unwrap();
        let mut ancestry = DirectoryAncestry::new();

        ancestry.enter(temp.path(), &metadata).unwrap();
        let err = ancestry
            .enter(&temp.path().join("a/back"), &metadata)
            .unwrap_err();
        assert!(matches!(err, ScanError::Cycle { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_sibling_alias_is_not_cycle() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("a")).unwrap();
        let root_meta = fs::metadata(temp.path()).unwrap();
        let shared = fs::metadata(temp.path().join("a")).unwrap();
        let mut ancestry = DirectoryAncestry::new();

        ancestry.enter(temp.path(), &root_meta).unwrap();
        ancestry.enter(&temp.path().join("a"), &shared).unwrap();
        ancestry.enter(&temp.path().join("b"), &shared).unwrap();
    }

    #[test]
    fn test_reentering_same_path_is_not_cycle() {
        let temp = TempDir::new().unwrap();
        let metadata = fs::metadata(temp.path()).unwrap();
        let mut ancestry = DirectoryAncestry::new();

        ancestry.enter(temp.path(), &metadata).unwrap();
        ancestry.enter(temp.path(), &metadata).unwrap();
    }
}
