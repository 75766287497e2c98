//! Scan progress reporting.

use std::path::PathBuf;
use std::time::Duration;

/// Progress information during a scan.
#[derive(Debug, Clone)]
pub struct ScanProgress {
    /// Files looked at so far, qualifying or not.
    pub files_visited: u64,
    /// Images whose dimensions were read so far.
    pub images_measured: u64,
    /// Directories listed so far.
    pub dirs_scanned: u64,
    /// Pixels accumulated so far.
    pub pixels_counted: u64,
    /// Directory being listed.
    pub current_path: PathBuf,
    /// Time elapsed since the subtree scan started.
    pub elapsed: Duration,
}

impl ScanProgress {
    /// Create initial progress state.
    pub fn new() -> Self {
        Self {
            files_visited: 0,
            images_measured: 0,
            dirs_scanned: 0,
            pixels_counted: 0,
            current_path: PathBuf::new(),
            elapsed: Duration::ZERO,
        }
    }

    /// Calculate scan rate in files per second.
    pub fn files_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.files_visited as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }
}

impl Default for ScanProgress {
    fn default() -> Self {
        Self::new()
    }
}
