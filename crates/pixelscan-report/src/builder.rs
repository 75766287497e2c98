//! Ranked per-root report assembly.
//!
//! For each root the builder runs one scan over the whole subtree (the grand
//! total) and one scan per immediate child directory. All of these run as
//! independent tasks on a rayon pool; each accumulates into its own counter,
//! and the results are merged and ranked on the calling thread.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use compact_str::CompactString;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use pixelscan_core::{
    DirectoryArea, DirectoryReport, RootOutcome, ScanConfig, ScanError, SubdirectoryEntry,
    rank_entries,
};
use pixelscan_scan::{AreaScanner, ScanProgress};

/// Builds [`DirectoryReport`]s for one or many roots.
pub struct ReportBuilder {
    scanner: AreaScanner,
    pool: Option<ThreadPool>,
}

impl ReportBuilder {
    /// Create a new builder with default config on the global rayon pool.
    pub fn new() -> Self {
        Self {
            scanner: AreaScanner::new(),
            pool: None,
        }
    }

    /// Create a new builder with custom config.
    ///
    /// A non-zero `threads` bounds the fan-out with a dedicated pool.
    pub fn with_config(config: ScanConfig) -> Result<Self, ScanError> {
        let pool = match config.threads {
            0 => None,
            n => Some(
                ThreadPoolBuilder::new()
                    .num_threads(n)
                    .thread_name(|i| format!("pixelscan-{i}"))
                    .build()
                    .map_err(|e| ScanError::InvalidConfig {
                        message: format!("cannot start {n} scan threads: {e}"),
                    })?,
            ),
        };

        Ok(Self {
            scanner: AreaScanner::with_config(config),
            pool,
        })
    }

    /// Abort in-flight scans when `cancel` fires.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.scanner = self.scanner.with_cancellation(cancel);
        self
    }

    /// Get the scan configuration.
    pub fn config(&self) -> &ScanConfig {
        self.scanner.config()
    }

    /// Subscribe to progress updates from every subtree scan.
    pub fn subscribe(&self) -> broadcast::Receiver<ScanProgress> {
        self.scanner.subscribe()
    }

    /// Build the report for a single root.
    ///
    /// The report carries the canonical root path. Any failing subtree scan
    /// fails the whole report.
    pub fn build_report(&self, root: &Path) -> Result<DirectoryReport, ScanError> {
        let start = Instant::now();
        let metadata = fs::metadata(root).map_err(|e| ScanError::io(root, e))?;
        if !metadata.is_dir() {
            return Err(ScanError::NotADirectory {
                path: root.to_path_buf(),
            });
        }
        let root = root.canonicalize().map_err(|e| ScanError::io(root, e))?;
        let root = root.as_path();

        let children = self.child_directories(root)?;
        debug!(root = %root.display(), children = children.len(), "scanning root");

        let (total, child_areas) = self.install(|| {
            rayon::join(
                || self.scanner.scan_subtree(root),
                || {
                    children
                        .par_iter()
                        .map(|(name, path)| {
                            self.scanner.scan(path).map(|area| (name.clone(), area))
                        })
                        .collect::<Result<Vec<(CompactString, DirectoryArea)>, ScanError>>()
                },
            )
        });
        let total = total?;
        let child_areas = child_areas?;

        let threshold = self.config().high_threshold;
        let mut entries: Vec<SubdirectoryEntry> = child_areas
            .into_iter()
            .map(|(name, area)| SubdirectoryEntry::new(name, area, total.area, threshold))
            .collect();
        rank_entries(&mut entries);

        let report = DirectoryReport {
            root_path: root.to_path_buf(),
            total_area: total.area,
            entries,
            stats: total.stats,
            warnings: total.warnings,
            scan_duration: start.elapsed(),
        };

        info!(
            root = %root.display(),
            total_area = report.total_area,
            entries = report.entries.len(),
            "report built in {:.2}s",
            report.scan_duration.as_secs_f64()
        );

        Ok(report)
    }

    /// Build reports for several roots independently.
    ///
    /// Outcomes come back in input order; one root failing never affects
    /// the others.
    pub fn build_reports<P>(&self, roots: &[P]) -> Vec<RootOutcome>
    where
        P: AsRef<Path> + Sync,
    {
        self.install(|| {
            roots
                .par_iter()
                .map(|root| {
                    let root = root.as_ref();
                    let result = self.build_report(root);
                    if let Err(ref err) = result {
                        warn!(root = %root.display(), error = %err, "root failed");
                    }
                    RootOutcome {
                        root: root.to_path_buf(),
                        result,
                    }
                })
                .collect()
        })
    }

    /// Immediate child directories of `root`, as (name, path) pairs.
    fn child_directories(&self, root: &Path) -> Result<Vec<(CompactString, PathBuf)>, ScanError> {
        let follow_symlinks = self.config().follow_symlinks;
        let mut children = Vec::new();

        for entry in fs::read_dir(root).map_err(|e| ScanError::io(root, e))? {
            let entry = entry.map_err(|e| ScanError::io(root, e))?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|e| ScanError::io(&path, e))?;

            let is_dir = if file_type.is_symlink() {
                follow_symlinks && path.is_dir()
            } else {
                file_type.is_dir()
            };

            if is_dir {
                let name = CompactString::new(entry.file_name().to_string_lossy());
                children.push((name, path));
            }
        }

        Ok(children)
    }

    fn install<R, F>(&self, op: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}
