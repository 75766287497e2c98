//! Per-root ranked pixel area reports for pixelscan.
//!
//! Given one or more root directories, this crate produces a
//! [`DirectoryReport`] per root: the total pixel area of the whole subtree,
//! plus one ranked entry per immediate child directory with its share of
//! the total.
//!
//! ```rust,no_run
//! use pixelscan_report::ReportBuilder;
//!
//! let builder = ReportBuilder::new();
//! for outcome in builder.build_reports(&["/art/tiles", "/art/ui"]) {
//!     match outcome.result {
//!         Ok(report) => {
//!             println!("{}: {} px", report.root_path.display(), report.total_area);
//!             for entry in &report.entries {
//!                 println!("    {}: {} ({:.0}%)", entry.name, entry.area, entry.percentage());
//!             }
//!         }
//!         Err(err) => eprintln!("{}: {err}", outcome.root.display()),
//!     }
//! }
//! ```

mod builder;

pub use builder::ReportBuilder;

// Re-export core types
pub use pixelscan_core::{
    DirectoryReport, RootOutcome, ScanConfig, ScanError, Share, SubdirectoryEntry,
};
