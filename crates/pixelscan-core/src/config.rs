//! Scan configuration types.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Default extension of qualifying image files.
pub const DEFAULT_EXTENSION: &str = "png";

/// Default share of the root total at which an entry counts as "high".
pub const DEFAULT_HIGH_THRESHOLD: f64 = 0.2;

/// What to do when a qualifying file's dimensions cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecodePolicy {
    /// Fail the whole scan on the first unreadable image.
    #[default]
    Abort,
    /// Record a warning and count the file as zero pixels.
    Skip,
}

/// Configuration for scanning operations.
///
/// Deserialization goes through [`ScanConfigBuilder`], so missing fields take
/// their defaults and invalid values are rejected.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(
    setter(into),
    derive(Deserialize),
    build_fn(validate = "Self::validate")
)]
#[builder_struct_attr(serde(default))]
#[serde(try_from = "ScanConfigBuilder")]
pub struct ScanConfig {
    /// Extension (without the dot) that marks a qualifying image file.
    #[builder(default = "DEFAULT_EXTENSION.to_string()")]
    pub extension: String,

    /// Match the extension case-sensitively.
    #[builder(default = "true")]
    pub case_sensitive: bool,

    /// Follow symbolic links to files and directories.
    #[builder(default = "true")]
    pub follow_symlinks: bool,

    /// Handling of unreadable qualifying files.
    #[builder(default)]
    pub decode_policy: DecodePolicy,

    /// Share (0.0..=1.0) at or above which an entry is classified as high.
    #[builder(default = "DEFAULT_HIGH_THRESHOLD")]
    pub high_threshold: f64,

    /// Number of threads for subtree scans (0 = auto-detect).
    #[builder(default = "0")]
    pub threads: usize,
}

impl ScanConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref extension) = self.extension {
            if extension.is_empty() {
                return Err("Extension cannot be empty".to_string());
            }
            if extension.starts_with('.') {
                return Err(format!("Extension must not start with a dot: {extension}"));
            }
        }
        if let Some(threshold) = self.high_threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(format!("High threshold must be within 0.0..=1.0, got {threshold}"));
            }
        }
        Ok(())
    }
}

impl TryFrom<ScanConfigBuilder> for ScanConfig {
    type Error = ScanConfigBuilderError;

    fn try_from(builder: ScanConfigBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

impl ScanConfig {
    /// Create a new scan config builder.
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Check whether a file name carries the qualifying extension.
    ///
    /// Matches on the name suffix, so a file called `.png` qualifies too.
    pub fn is_qualifying(&self, name: &str) -> bool {
        let suffix_len = self.extension.len() + 1;
        if name.len() < suffix_len || !name.is_char_boundary(name.len() - suffix_len) {
            return false;
        }
        let suffix = &name[name.len() - suffix_len..];
        let Some(ext) = suffix.strip_prefix('.') else {
            return false;
        };
        if self.case_sensitive {
            ext == self.extension
        } else {
            ext.eq_ignore_ascii_case(&self.extension)
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            case_sensitive: true,
            follow_symlinks: true,
            decode_policy: DecodePolicy::Abort,
            high_threshold: DEFAULT_HIGH_THRESHOLD,
            threads: 0,
        }
    }
}
