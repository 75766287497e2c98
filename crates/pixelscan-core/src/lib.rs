//! Core types and configuration for pixelscan.
//!
//! This crate provides the data structures shared by the scanner, the report
//! builder and the CLI: scan configuration, error types, pixel area
//! accumulators, and the ranked per-root report.

mod area;
mod config;
mod entry;
mod error;
mod report;

pub use area::{DirectoryArea, DirectoryId, FileArea, ScanStats, SubtreeArea};
pub use config::{
    DEFAULT_EXTENSION, DEFAULT_HIGH_THRESHOLD, DecodePolicy, ScanConfig, ScanConfigBuilder,
};
pub use entry::{Share, SubdirectoryEntry, rank_entries, share_ratio};
pub use error::{ErrorKind, ScanError, ScanWarning, WarningKind};
pub use report::{DirectoryReport, RootOutcome};
