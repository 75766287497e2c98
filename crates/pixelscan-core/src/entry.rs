//! Ranked subdirectory entries and share arithmetic.

use std::cmp::Ordering;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::area::DirectoryArea;

/// Fraction of `total` taken by `area`, or 0.0 when `total` is 0.
pub fn share_ratio(area: DirectoryArea, total: DirectoryArea) -> f64 {
    if total == 0 {
        0.0
    } else {
        area as f64 / total as f64
    }
}

/// Classification of an entry's share of the root total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Share {
    /// At or above the configured threshold.
    High,
    /// Below the configured threshold.
    Low,
}

impl Share {
    /// Classify a ratio against a threshold (inclusive).
    pub fn classify(ratio: f64, threshold: f64) -> Self {
        if ratio >= threshold {
            Share::High
        } else {
            Share::Low
        }
    }

    /// Check if this is the high classification.
    pub fn is_high(self) -> bool {
        matches!(self, Share::High)
    }
}

/// One immediate child directory of a scanned root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubdirectoryEntry {
    /// Directory name (not full path).
    pub name: CompactString,

    /// Pixel area of the whole child subtree.
    pub area: DirectoryArea,

    /// `area / total_area` of the owning report.
    pub ratio: f64,

    /// High/low classification of `ratio`.
    pub share: Share,
}

impl SubdirectoryEntry {
    /// Create an entry, deriving its ratio and share from the root total.
    pub fn new(
        name: impl Into<CompactString>,
        area: DirectoryArea,
        total: DirectoryArea,
        threshold: f64,
    ) -> Self {
        let ratio = share_ratio(area, total);
        Self {
            name: name.into(),
            area,
            ratio,
            share: Share::classify(ratio, threshold),
        }
    }

    /// Share as a percentage (0.0..=100.0).
    pub fn percentage(&self) -> f64 {
        self.ratio * 100.0
    }

    /// Ranking order: larger area first, then name ascending.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .area
            .cmp(&self.area)
            .then_with(|| self.name.cmp(&other.name))
    }
}

/// Sort entries into ranking order.
pub fn rank_entries(entries: &mut [SubdirectoryEntry]) {
    entries.sort_by(SubdirectoryEntry::rank_cmp);
}
