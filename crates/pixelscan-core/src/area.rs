//! Pixel area accumulators and per-scan statistics.

use serde::{Deserialize, Serialize};

use crate::error::ScanWarning;

/// Pixel count of one qualifying image (width × height).
pub type FileArea = u64;

/// Sum of [`FileArea`] over every qualifying file of a subtree.
pub type DirectoryArea = u64;

/// Identity of a directory on disk, used to detect link cycles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DirectoryId {
    /// Device and inode pair (Unix).
    Inode {
        /// Device ID.
        device: u64,
        /// Inode number.
        inode: u64,
    },
    /// Canonicalised path, for platforms without inode numbers.
    Canonical(std::path::PathBuf),
}

impl DirectoryId {
    /// Create an inode-based identity.
    pub fn inode(device: u64, inode: u64) -> Self {
        Self::Inode { device, inode }
    }
}

/// Counters collected while walking a subtree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// Qualifying images whose dimensions were read.
    pub images_measured: u64,
    /// Qualifying images skipped under the skip policy.
    pub images_skipped: u64,
    /// Other files passed over.
    pub other_files: u64,
    /// Directories listed, including the starting directory.
    pub dirs_scanned: u64,
    /// Deepest level reached below the starting directory.
    pub max_depth: u32,
}

impl ScanStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a listed directory at the given depth.
    pub fn record_dir(&mut self, depth: u32) {
        self.dirs_scanned += 1;
        self.max_depth = self.max_depth.max(depth);
    }

    /// Total files seen, qualifying or not.
    pub fn files_visited(&self) -> u64 {
        self.images_measured + self.images_skipped + self.other_files
    }
}

/// Result of scanning one subtree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubtreeArea {
    /// Total pixel area of the subtree.
    pub area: DirectoryArea,
    /// Walk counters.
    pub stats: ScanStats,
    /// Non-fatal problems encountered.
    pub warnings: Vec<ScanWarning>,
}
