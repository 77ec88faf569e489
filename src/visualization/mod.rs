//! Animation assembly and export.
//!
//! An [`Animation`] is self-contained: it carries the daily averages, the
//! theoretical overlay, the panel geometry and every [`FrameState`], so a
//! renderer can replay it without recomputing anything.
//!
//! # Example
//!
//! ```rust
//! use clt_darts::visualization::{Exporter, ExportFormat};
//!
//! let exporter = Exporter::new(ExportFormat::Json);
//! assert_eq!(exporter.format(), ExportFormat::Json);
//! ```

pub mod palette;

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::clt::{
    ConvergenceReport, DailyAverages, FrameSchedule, FrameState, PanelLayout, SimulationConfig,
    TheoreticalCurve,
};
use crate::error::{CltError, CltResult};

pub use palette::{Rgb, Theme};

/// Default wall-clock interval between frames.
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 30;

// ============================================================================
// Animation Artifact
// ============================================================================

/// Run-level metadata of an animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationMetadata {
    /// Figure title.
    pub title: String,
    /// Parameters of the run.
    pub config: SimulationConfig,
    /// Master seed actually used for sampling.
    pub seed: u64,
    /// Wall-clock interval between frames.
    pub frame_interval_ms: u64,
    /// Empirical vs. predicted moments of x̄.
    pub convergence: ConvergenceReport,
}

/// Replayable animation of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    /// Metadata.
    pub metadata: AnimationMetadata,
    /// Static panel geometry.
    pub layout: PanelLayout,
    /// Daily averages, revealed by prefix.
    pub averages: DailyAverages,
    /// Static Normal overlay.
    pub curve: TheoreticalCurve,
    /// Frames in display order.
    pub frames: Vec<FrameState>,
}

/// Figure title for `darts_per_day`.
#[must_use]
pub fn figure_title(darts_per_day: usize) -> String {
    format!("Convergence with n={darts_per_day} darts/day")
}

impl Animation {
    /// Number of frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame at `index`.
    #[must_use]
    pub fn frame(&self, index: usize) -> Option<&FrameState> {
        self.frames.get(index)
    }

    /// Final frame, which always shows the full dataset.
    #[must_use]
    pub fn last_frame(&self) -> Option<&FrameState> {
        self.frames.last()
    }

    /// Total playback duration in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        self.frames.len() as u64 * self.metadata.frame_interval_ms
    }

    /// Serialize to bytes for hashing and comparison.
    ///
    /// # Errors
    ///
    /// Returns error if binary serialization fails.
    pub fn to_bytes(&self) -> CltResult<Vec<u8>> {
        bincode::serialize(self)
            .map_err(|e| CltError::serialization(format!("Binary serialization failed: {e}")))
    }

    /// Re-check the assembly invariants of a decoded artifact.
    ///
    /// Exports written by this crate always pass; the checks guard the
    /// player against hand-edited or truncated files.
    ///
    /// # Errors
    ///
    /// Returns [`CltError::Serialization`] naming the first broken invariant.
    pub fn validate(&self) -> CltResult<()> {
        let invalid = |message: String| Err(CltError::serialization(message));
        let config = &self.metadata.config;
        config
            .validate()
            .map_err(|e| CltError::serialization(format!("invalid run parameters: {e}")))?;

        for (name, edges) in [
            ("heatmap", &self.layout.heatmap_edges),
            ("histogram", &self.layout.histogram_edges),
        ] {
            if !edges.is_valid() {
                return invalid(format!("{name} edges must be at least 2 increasing values"));
            }
        }

        if self.averages.x().len() != self.averages.y().len() {
            return invalid(format!(
                "average columns differ: {} x values, {} y values",
                self.averages.x().len(),
                self.averages.y().len()
            ));
        }
        if self.averages.len() != config.total_days {
            return invalid(format!(
                "{} daily averages for {} days",
                self.averages.len(),
                config.total_days
            ));
        }
        if self.curve.x_domain.len() != self.curve.density.len() {
            return invalid("curve domain and density differ in length".to_string());
        }

        let expected = FrameSchedule::new(config.total_days, config.frames_speed)?.num_frames();
        if self.frames.len() != expected {
            return invalid(format!(
                "expected {expected} frames, found {}",
                self.frames.len()
            ));
        }

        let heat_bins = self.layout.heatmap_edges.bin_count();
        let heat_cells = heat_bins * heat_bins;
        let hist_bins = self.layout.histogram_edges.bin_count();
        let mut previous = 0;
        for (index, frame) in self.frames.iter().enumerate() {
            if frame.frame != index {
                return invalid(format!("frame {} stored at position {index}", frame.frame));
            }
            if frame.visible_days < previous || frame.visible_days > self.averages.len() {
                return invalid(format!(
                    "frame {index} shows {} days (previous {previous}, total {})",
                    frame.visible_days,
                    self.averages.len()
                ));
            }
            if frame.heatmap.len() != heat_cells {
                return invalid(format!(
                    "frame {index} has {} heatmap cells, expected {heat_cells}",
                    frame.heatmap.len()
                ));
            }
            if frame.density.len() != hist_bins {
                return invalid(format!(
                    "frame {index} has {} histogram bars, expected {hist_bins}",
                    frame.density.len()
                ));
            }
            previous = frame.visible_days;
        }

        match self.frames.last() {
            Some(last) if last.visible_days == self.averages.len() => Ok(()),
            Some(last) => invalid(format!(
                "last frame shows {} of {} days",
                last.visible_days,
                self.averages.len()
            )),
            None => invalid("animation has no frames".to_string()),
        }
    }

    /// blake3 digest of the binary encoding, hex encoded.
    ///
    /// # Errors
    ///
    /// Returns error if binary serialization fails.
    pub fn content_hash(&self) -> CltResult<String> {
        Ok(blake3::hash(&self.to_bytes()?).to_hex().to_string())
    }
}

/// Sequences rendered frames into an [`Animation`].
#[derive(Debug)]
pub struct AnimationBuilder {
    metadata: AnimationMetadata,
    layout: PanelLayout,
    averages: DailyAverages,
    curve: TheoreticalCurve,
    frames: Vec<FrameState>,
    expected_frames: usize,
}

impl AnimationBuilder {
    /// Start assembling an animation for `schedule`.
    #[must_use]
    pub fn new(
        metadata: AnimationMetadata,
        layout: PanelLayout,
        averages: DailyAverages,
        curve: TheoreticalCurve,
        schedule: &FrameSchedule,
    ) -> Self {
        let expected_frames = schedule.num_frames();
        Self {
            metadata,
            layout,
            averages,
            curve,
            frames: Vec::with_capacity(expected_frames),
            expected_frames,
        }
    }

    /// Append the next frame.
    ///
    /// # Errors
    ///
    /// Returns [`CltError::Config`] when frames arrive out of order or the
    /// visible prefix shrinks.
    pub fn push(&mut self, frame: FrameState) -> CltResult<()> {
        if frame.frame != self.frames.len() {
            return Err(CltError::config(format!(
                "frame {} pushed at position {}",
                frame.frame,
                self.frames.len()
            )));
        }
        if let Some(last) = self.frames.last() {
            if frame.visible_days < last.visible_days {
                return Err(CltError::config(format!(
                    "visible days decreased from {} to {}",
                    last.visible_days, frame.visible_days
                )));
            }
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Frames pushed so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Check if no frame has been pushed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Finish the animation.
    ///
    /// # Errors
    ///
    /// Returns [`CltError::Config`] if the frame count does not match the
    /// schedule or the last frame does not show every day.
    pub fn finish(self) -> CltResult<Animation> {
        if self.frames.len() != self.expected_frames {
            return Err(CltError::config(format!(
                "expected {} frames, assembled {}",
                self.expected_frames,
                self.frames.len()
            )));
        }
        if let Some(last) = self.frames.last() {
            if last.visible_days != self.averages.len() {
                return Err(CltError::config(format!(
                    "last frame shows {} of {} days",
                    last.visible_days,
                    self.averages.len()
                )));
            }
        }

        Ok(Animation {
            metadata: self.metadata,
            layout: self.layout,
            averages: self.averages,
            curve: self.curve,
            frames: self.frames,
        })
    }
}

// ============================================================================
// Export Pipeline
// ============================================================================

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    /// Single JSON document.
    #[default]
    Json,
    /// Header line followed by one JSON frame per line.
    JsonLines,
    /// Binary format (bincode).
    Binary,
    /// CSV of the daily averages.
    Csv,
}

impl ExportFormat {
    /// Conventional file extension.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::JsonLines => "jsonl",
            Self::Binary => "bin",
            Self::Csv => "csv",
        }
    }

    /// Infer the format from a path's extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl FromStr for ExportFormat {
    type Err = CltError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "jsonl" | "json-lines" | "ndjson" => Ok(Self::JsonLines),
            "bin" | "binary" | "bincode" => Ok(Self::Binary),
            "csv" => Ok(Self::Csv),
            other => Err(CltError::config(format!("unknown export format '{other}'"))),
        }
    }
}

/// First line of a JSON Lines export: everything except the frames.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct JsonLinesHeader {
    metadata: AnimationMetadata,
    layout: PanelLayout,
    averages: DailyAverages,
    curve: TheoreticalCurve,
    frame_count: usize,
}

/// Exporter for animations.
#[derive(Debug, Clone, Copy, Default)]
pub struct Exporter {
    format: ExportFormat,
}

impl Exporter {
    /// Create an exporter for `format`.
    #[must_use]
    pub const fn new(format: ExportFormat) -> Self {
        Self { format }
    }

    /// Configured format.
    #[must_use]
    pub const fn format(&self) -> ExportFormat {
        self.format
    }

    /// Export using the configured format.
    ///
    /// # Errors
    ///
    /// Returns error if file operations or serialization fail.
    pub fn export(&self, animation: &Animation, path: &Path) -> CltResult<()> {
        match self.format {
            ExportFormat::Json => Self::to_json(animation, path),
            ExportFormat::JsonLines => Self::to_json_lines(animation, path),
            ExportFormat::Binary => Self::to_binary(animation, path),
            ExportFormat::Csv => Self::to_csv(animation, path),
        }
    }

    /// Export as one JSON document.
    ///
    /// # Errors
    ///
    /// Returns error if file operations fail.
    pub fn to_json(animation: &Animation, path: &Path) -> CltResult<()> {
        let mut writer = create(path)?;
        serde_json::to_writer(&mut writer, animation)
            .map_err(|e| CltError::serialization(format!("JSON serialization failed: {e}")))?;
        writer
            .flush()
            .map_err(|e| CltError::io(format!("Flush failed: {e}")))
    }

    /// Export as JSON Lines: a header line, then one frame per line.
    ///
    /// # Errors
    ///
    /// Returns error if file operations fail.
    pub fn to_json_lines(animation: &Animation, path: &Path) -> CltResult<()> {
        let mut writer = create(path)?;

        let header = JsonLinesHeader {
            metadata: animation.metadata.clone(),
            layout: animation.layout.clone(),
            averages: animation.averages.clone(),
            curve: animation.curve.clone(),
            frame_count: animation.frames.len(),
        };
        write_json_line(&mut writer, &header)?;
        for frame in &animation.frames {
            write_json_line(&mut writer, frame)?;
        }

        writer
            .flush()
            .map_err(|e| CltError::io(format!("Flush failed: {e}")))
    }

    /// Export as bincode.
    ///
    /// # Errors
    ///
    /// Returns error if file operations fail.
    pub fn to_binary(animation: &Animation, path: &Path) -> CltResult<()> {
        let writer = create(path)?;
        bincode::serialize_into(writer, animation)
            .map_err(|e| CltError::serialization(format!("Binary serialization failed: {e}")))
    }

    /// Export the daily averages as `day,x_mean,y_mean`.
    ///
    /// # Errors
    ///
    /// Returns error if file operations fail.
    pub fn to_csv(animation: &Animation, path: &Path) -> CltResult<()> {
        let mut writer = create(path)?;
        writeln!(writer, "day,x_mean,y_mean")
            .map_err(|e| CltError::io(format!("Write header failed: {e}")))?;
        for (day, avg) in animation.averages.iter().enumerate() {
            writeln!(writer, "{day},{},{}", avg.x, avg.y)
                .map_err(|e| CltError::io(format!("Write data failed: {e}")))?;
        }
        writer
            .flush()
            .map_err(|e| CltError::io(format!("Flush failed: {e}")))
    }

    /// Load an animation previously written by [`Exporter::export`].
    ///
    /// The format is taken from `format`, or inferred from the extension.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or decoded, the decoded
    /// animation fails [`Animation::validate`], or the format is CSV (which
    /// does not carry frames).
    pub fn load(path: &Path, format: Option<ExportFormat>) -> CltResult<Animation> {
        let format = format
            .or_else(|| ExportFormat::from_path(path))
            .unwrap_or(ExportFormat::Binary);
        let file = File::open(path).map_err(|e| CltError::io(format!("Failed to open file: {e}")))?;
        let reader = BufReader::new(file);

        let animation: Animation = match format {
            ExportFormat::Json => serde_json::from_reader(reader).map_err(|e| {
                CltError::serialization(format!("JSON deserialization failed: {e}"))
            })?,
            ExportFormat::JsonLines => read_json_lines(reader)?,
            ExportFormat::Binary => bincode::deserialize_from(reader).map_err(|e| {
                CltError::serialization(format!("Binary deserialization failed: {e}"))
            })?,
            ExportFormat::Csv => {
                return Err(CltError::config(
                    "CSV exports hold averages only and cannot be replayed",
                ))
            }
        };
        animation.validate()?;
        Ok(animation)
    }
}

fn create(path: &Path) -> CltResult<BufWriter<File>> {
    let file =
        File::create(path).map_err(|e| CltError::io(format!("Failed to create file: {e}")))?;
    Ok(BufWriter::new(file))
}

fn write_json_line<W: Write, T: Serialize>(writer: &mut W, value: &T) -> CltResult<()> {
    let json = serde_json::to_string(value)
        .map_err(|e| CltError::serialization(format!("JSON serialization failed: {e}")))?;
    writeln!(writer, "{json}").map_err(|e| CltError::io(format!("Write failed: {e}")))
}

fn read_json_lines<R: io::Read>(reader: BufReader<R>) -> CltResult<Animation> {
    let mut lines = reader.lines();
    let header_line = lines
        .next()
        .ok_or_else(|| CltError::serialization("JSON Lines export is empty"))?
        .map_err(|e| CltError::io(format!("Read failed: {e}")))?;
    let header: JsonLinesHeader = serde_json::from_str(&header_line)
        .map_err(|e| CltError::serialization(format!("Invalid header line: {e}")))?;

    let mut frames = Vec::with_capacity(header.frame_count);
    for line in lines {
        let line = line.map_err(|e| CltError::io(format!("Read failed: {e}")))?;
        if line.trim().is_empty() {
            continue;
        }
        let frame: FrameState = serde_json::from_str(&line)
            .map_err(|e| CltError::serialization(format!("Invalid frame line: {e}")))?;
        frames.push(frame);
    }

    if frames.len() != header.frame_count {
        return Err(CltError::serialization(format!(
            "header announces {} frames, found {}",
            header.frame_count,
            frames.len()
        )));
    }

    Ok(Animation {
        metadata: header.metadata,
        layout: header.layout,
        averages: header.averages,
        curve: header.curve,
        frames,
    })
}

// ============================================================================
// Tests
// ============================================================================
