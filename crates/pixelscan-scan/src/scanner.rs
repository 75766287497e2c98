//! Parallel directory scanner that sums image pixel areas.

use std::fs;
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use jwalk::{Parallelism, WalkDir};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use pixelscan_core::{DecodePolicy, DirectoryArea, ScanConfig, ScanError, ScanWarning, SubtreeArea};

use crate::measure::measure_image;
use crate::progress::ScanProgress;
use crate::visited::DirectoryAncestry;

/// Files visited between two progress broadcasts.
const PROGRESS_INTERVAL: u64 = 256;

/// Scanner computing the total pixel area of every qualifying image in a tree.
///
/// Directories are read in parallel by `jwalk` on rayon. Entries are consumed
/// on the calling thread; the first error ends the walk. Cancellation is
/// checked before each entry.
pub struct AreaScanner {
    config: ScanConfig,
    cancel: CancellationToken,
    progress_tx: broadcast::Sender<ScanProgress>,
}

impl AreaScanner {
    /// Create a new scanner with default config.
    pub fn new() -> Self {
        Self::with_config(ScanConfig::default())
    }

    /// Create a new scanner with custom config.
    pub fn with_config(config: ScanConfig) -> Self {
        let (progress_tx, _) = broadcast::channel(100);
        Self {
            config,
            cancel: CancellationToken::new(),
            progress_tx,
        }
    }

    /// Abort scans when `cancel` fires.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Get the scanner configuration.
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Subscribe to scan progress updates.
    pub fn subscribe(&self) -> broadcast::Receiver<ScanProgress> {
        self.progress_tx.subscribe()
    }

    /// Total pixel area of all qualifying images under `dir`.
    pub fn scan(&self, dir: &Path) -> Result<DirectoryArea, ScanError> {
        self.scan_subtree(dir).map(|subtree| subtree.area)
    }

    /// Walk `dir` and return its pixel area along with counters and warnings.
    pub fn scan_subtree(&self, dir: &Path) -> Result<SubtreeArea, ScanError> {
        let start = Instant::now();
        let metadata = fs::metadata(dir).map_err(|e| ScanError::io(dir, e))?;
        if !metadata.is_dir() {
            return Err(ScanError::NotADirectory {
                path: dir.to_path_buf(),
            });
        }

        let walker = WalkDir::new(dir)
            .parallelism(self.parallelism())
            .skip_hidden(false)
            .follow_links(self.config.follow_symlinks)
            .min_depth(0);

        let mut ancestry = DirectoryAncestry::new();
        let mut subtree = SubtreeArea::default();

        for entry_result in walker {
            self.check_cancelled()?;
            let entry = entry_result.map_err(walk_error)?;
            let path = entry.path();
            let file_type = entry.file_type();

            if file_type.is_dir() {
                let metadata = entry.metadata().map_err(walk_error)?;
                ancestry.enter(&path, &metadata)?;
                subtree.stats.record_dir(entry.depth() as u32);
                debug!(path = %path.display(), depth = entry.depth(), "listing directory");
                continue;
            }

            let is_file = if file_type.is_symlink() {
                if !self.config.follow_symlinks {
                    subtree.warnings.push(ScanWarning::symlink_skipped(&path));
                    continue;
                }
                // The walker leaves links it could not resolve as links; a
                // dangling one fails here like any unreadable entry.
                fs::metadata(&path)
                    .map_err(|e| ScanError::io(&path, e))?
                    .is_file()
            } else {
                file_type.is_file()
            };

            if is_file {
                self.visit_file(&entry.file_name().to_string_lossy(), &path, &mut subtree)?;
                if subtree.stats.files_visited() % PROGRESS_INTERVAL == 0 {
                    self.report_progress(&subtree, &path, start);
                }
            }
        }

        self.report_progress(&subtree, dir, start);
        debug!(
            path = %dir.display(),
            area = subtree.area,
            images = subtree.stats.images_measured,
            "subtree scanned"
        );

        Ok(subtree)
    }

    /// Choose how the walker reads directories.
    ///
    /// A scan started from a rayon worker (a fan-out by the caller) reads
    /// serially, so a busy pool is never blocked on its own walk.
    fn parallelism(&self) -> Parallelism {
        if rayon::current_thread_index().is_some() {
            return Parallelism::Serial;
        }
        match self.config.threads {
            0 => Parallelism::RayonDefaultPool {
                busy_timeout: Duration::from_millis(100),
            },
            n => Parallelism::RayonNewPool(n),
        }
    }

    /// Measure a file if it qualifies and fold it into the running total.
    fn visit_file(
        &self,
        name: &str,
        path: &Path,
        subtree: &mut SubtreeArea,
    ) -> Result<(), ScanError> {
        if !self.config.is_qualifying(name) {
            subtree.stats.other_files += 1;
            return Ok(());
        }

        match measure_image(path) {
            Ok(area) => {
                subtree.area = subtree.area.saturating_add(area);
                subtree.stats.images_measured += 1;
                Ok(())
            }
            Err(ScanError::Decode { path, message })
                if self.config.decode_policy == DecodePolicy::Skip =>
            {
                warn!(path = %path.display(), %message, "skipping unreadable image");
                subtree.stats.images_skipped += 1;
                subtree
                    .warnings
                    .push(ScanWarning::decode_skipped(path, &message));
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    fn check_cancelled(&self) -> Result<(), ScanError> {
        if self.cancel.is_cancelled() {
            Err(ScanError::Interrupted)
        } else {
            Ok(())
        }
    }

    fn report_progress(&self, subtree: &SubtreeArea, current: &Path, start: Instant) {
        if self.progress_tx.receiver_count() == 0 {
            return;
        }
        let _ = self.progress_tx.send(ScanProgress {
            files_visited: subtree.stats.files_visited(),
            images_measured: subtree.stats.images_measured,
            dirs_scanned: subtree.stats.dirs_scanned,
            pixels_counted: subtree.area,
            current_path: current.to_path_buf(),
            elapsed: start.elapsed(),
        });
    }
}

impl Default for AreaScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a walker error onto the scan error taxonomy.
fn walk_error(err: jwalk::Error) -> ScanError {
    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
    if err.loop_ancestor().is_some() {
        return ScanError::Cycle { path };
    }
    let source = match err.io_error() {
        Some(source) => io::Error::new(source.kind(), source.to_string()),
        None => io::Error::other(err.to_string()),
    };
    ScanError::io(path, source)
}
