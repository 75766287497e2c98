//! Text and JSON renderers for scan outcomes.

use std::fmt::Display;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use crossterm::style::{Color, Stylize, style};
use serde::Serialize;

use pixelscan_core::{DirectoryArea, DirectoryReport, ErrorKind, RootOutcome, Share};

/// How pixel areas are printed.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum Units {
    /// Raw pixel count (width × height, summed).
    #[default]
    Pixels,
    /// Side of the square with the same area, in px².
    Side,
}

impl Units {
    fn format(self, area: DirectoryArea) -> String {
        match self {
            Units::Pixels => area.to_string(),
            Units::Side => format!("{} px²", (area as f64).sqrt() as u64),
        }
    }
}

/// Colours used by the text renderer.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub comment: Color,
    pub path: Color,
    pub pixels: Color,
    pub high: Color,
    pub low: Color,
    pub enabled: bool,
}

impl Theme {
    /// The default dark palette.
    pub fn monokai() -> Self {
        Self {
            comment: Color::Rgb { r: 0x9c, g: 0x9a, b: 0x8b },
            path: Color::Rgb { r: 0xfd, g: 0x97, b: 0x1f },
            pixels: Color::Rgb { r: 0xae, g: 0x81, b: 0xff },
            high: Color::Rgb { r: 0xf9, g: 0x26, b: 0x72 },
            low: Color::Rgb { r: 0x66, g: 0xd9, b: 0xef },
            enabled: true,
        }
    }

    /// No colour at all.
    pub fn plain() -> Self {
        Self {
            enabled: false,
            ..Self::monokai()
        }
    }

    fn paint<D: Display>(&self, text: D, color: Color) -> String {
        if self.enabled {
            style(text).with(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn share(&self, share: Share) -> Color {
        match share {
            Share::High => self.high,
            Share::Low => self.low,
        }
    }
}

/// Plain-text renderer, one block per root.
pub struct TextRenderer {
    theme: Theme,
    units: Units,
}

impl TextRenderer {
    pub fn new(theme: Theme, units: Units) -> Self {
        Self { theme, units }
    }

    /// Print the list of roots about to be scanned.
    pub fn render_pending(&self, w: &mut impl Write, roots: &[PathBuf]) -> io::Result<()> {
        writeln!(w, "Scanning directories:")?;
        for root in roots {
            writeln!(w, "    {}", self.theme.paint(root.display(), self.theme.path))?;
        }
        writeln!(w)?;
        writeln!(w, "{}", self.theme.paint("Please wait...", self.theme.comment))
    }

    /// Print the banner followed by every outcome in order.
    pub fn render(&self, w: &mut impl Write, outcomes: &[RootOutcome]) -> io::Result<()> {
        let rule = "===============================";
        for line in [rule, "=====    Pixel Scanner    =====", rule] {
            writeln!(w, "{}", self.theme.paint(line, self.theme.comment))?;
        }
        writeln!(w)?;

        for outcome in outcomes {
            match &outcome.result {
                Ok(report) => self.render_report(w, report)?,
                Err(err) => self.render_failure(w, &outcome.root, err)?,
            }
            writeln!(w)?;
        }
        Ok(())
    }

    fn render_report(&self, w: &mut impl Write, report: &DirectoryReport) -> io::Result<()> {
        let theme = &self.theme;
        writeln!(
            w,
            "Directory: {}",
            theme.paint(report.root_path.display(), theme.path)
        )?;
        writeln!(
            w,
            "Total pixels: {}",
            theme.paint(self.units.format(report.total_area), theme.pixels)
        )?;
        writeln!(w, "{}", theme.paint("Content:", theme.comment))?;

        for entry in &report.entries {
            writeln!(
                w,
                "    {}: {} ({})",
                entry.name,
                theme.paint(self.units.format(entry.area), theme.pixels),
                theme.paint(
                    format!("{:.0}%", entry.percentage()),
                    theme.share(entry.share)
                )
            )?;
        }

        if report.has_warnings() {
            writeln!(
                w,
                "{}",
                theme.paint(format!("{} warning(s):", report.warnings.len()), theme.comment)
            )?;
            for warning in &report.warnings {
                writeln!(w, "    {}", theme.paint(&warning.message, theme.comment))?;
            }
        }
        Ok(())
    }

    fn render_failure(
        &self,
        w: &mut impl Write,
        root: &Path,
        err: &impl Display,
    ) -> io::Result<()> {
        let theme = &self.theme;
        let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
        writeln!(w, "Directory: {}", theme.paint(root.display(), theme.path))?;
        writeln!(w, "Error: {}", theme.paint(err, theme.high))
    }
}

#[derive(Serialize)]
struct JsonOutcome<'a> {
    root: &'a Path,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<&'a DirectoryReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonError>,
}

#[derive(Serialize)]
struct JsonError {
    kind: ErrorKind,
    message: String,
}

/// Serialise all outcomes as a pretty JSON array.
pub fn render_json(outcomes: &[RootOutcome]) -> serde_json::Result<String> {
    let items: Vec<JsonOutcome<'_>> = outcomes
        .iter()
        .map(|outcome| JsonOutcome {
            root: &outcome.root,
            report: outcome.report(),
            error: outcome.error().map(|err| JsonError {
                kind: err.kind(),
                message: err.to_string(),
            }),
        })
        .collect();
    serde_json::to_string_pretty(&items)
}
