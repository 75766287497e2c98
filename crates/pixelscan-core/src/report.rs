//! Per-root report container.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::area::{DirectoryArea, ScanStats};
use crate::error::{ScanError, ScanWarning};
use crate::entry::SubdirectoryEntry;

/// Pixel area summary of one root directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryReport {
    /// Root path that was scanned.
    pub root_path: PathBuf,

    /// Pixel area of the entire root subtree, including files directly in the root.
    pub total_area: DirectoryArea,

    /// Immediate child directories, largest first.
    pub entries: Vec<SubdirectoryEntry>,

    /// Counters from the root-wide walk.
    pub stats: ScanStats,

    /// Warnings from the root-wide walk.
    pub warnings: Vec<ScanWarning>,

    /// Wall time spent building the report.
    pub scan_duration: Duration,
}

impl DirectoryReport {
    /// Sum of all entry areas.
    pub fn entries_area(&self) -> DirectoryArea {
        self.entries
            .iter()
            .fold(0, |acc, e| acc.saturating_add(e.area))
    }

    /// Area contributed by images sitting directly in the root.
    pub fn direct_area(&self) -> DirectoryArea {
        self.total_area.saturating_sub(self.entries_area())
    }

    /// Check if no qualifying pixels were found.
    pub fn is_empty(&self) -> bool {
        self.total_area == 0
    }

    /// Check if there were any warnings during scanning.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Outcome of building the report for one root in a batch.
#[derive(Debug)]
pub struct RootOutcome {
    /// Root as supplied by the caller.
    pub root: PathBuf,
    /// The report, or why it could not be built.
    pub result: Result<DirectoryReport, ScanError>,
}

impl RootOutcome {
    /// Check if the report was built.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Get the report if one was built.
    pub fn report(&self) -> Option<&DirectoryReport> {
        self.result.as_ref().ok()
    }

    /// Get the error if the root failed.
    pub fn error(&self) -> Option<&ScanError> {
        self.result.as_ref().err()
    }
}
