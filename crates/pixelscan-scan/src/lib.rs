//! Directory walking and image measurement engine for pixelscan.
//!
//! This crate computes the total pixel area (width × height, summed) of every
//! qualifying image file beneath a directory.
//!
//! # Overview
//!
//! - **Header-only measurement** via `imagesize`; pixel data is never decoded
//! - **Parallel walking** via `jwalk` on rayon, failing fast on the first error
//! - **Cycle detection** when a link leads back to one of its own ancestors
//! - **Cancellation** via a `CancellationToken`, checked before each entry
//! - **Progress updates** via broadcast channels
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use pixelscan_scan::AreaScanner;
//!
//! let scanner = AreaScanner::new();
//! let area = scanner.scan(Path::new("/path/to/art")).unwrap();
//!
//! println!("Total pixels: {area}");
//! ```
//!
//! # Progress Monitoring
//!
//! ```rust,no_run
//! use pixelscan_scan::AreaScanner;
//!
//! let scanner = AreaScanner::new();
//! let mut progress_rx = scanner.subscribe();
//!
//! tokio::spawn(async move {
//!     while let Ok(progress) = progress_rx.recv().await {
//!         println!("Measured {} images", progress.images_measured);
//!     }
//! });
//! ```

mod measure;
mod progress;
mod scanner;
mod visited;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

pub use measure::{image_dimensions, measure_image};
pub use progress::ScanProgress;
pub use scanner::AreaScanner;
pub use visited::DirectoryAncestry;

// Re-export core types for convenience
pub use pixelscan_core::{
    DecodePolicy, DirectoryArea, FileArea, ScanConfig, ScanError, ScanStats, ScanWarning,
    SubtreeArea, WarningKind,
};
