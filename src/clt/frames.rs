//! Per-frame derivation of the three animated panels.
//!
//! Frame `f` reveals `idx = min((f + 1) · speed, total_days)` days. Every
//! histogram is rebuilt from the full visible prefix on each frame, so the
//! output never depends on how many days a frame skips.

use serde::{Deserialize, Serialize};

use super::aggregator::DailyAverages;
use super::curve::TheoreticalCurve;
use super::histogram::{BinEdges, Histogram1D, Histogram2D};
use super::PLOT_HALF_WIDTH;
use crate::error::{CltError, CltResult};

/// Edge count of the heatmap grid (39 × 39 bins).
pub const HEATMAP_EDGES: usize = 40;

/// Edge count of the marginal histogram (59 bins).
pub const HISTOGRAM_EDGES: usize = 60;

/// Headroom factor applied to the marginal panel's vertical limit.
pub const Y_HEADROOM: f64 = 1.15;

/// Progress text shown under the panels.
#[must_use]
pub fn progress_label(visible_days: usize, total_days: usize) -> String {
    format!("Days simulated: {visible_days} / {total_days}")
}

/// Frame count and visible prefix length per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSchedule {
    total_days: usize,
    frames_speed: usize,
}

impl FrameSchedule {
    /// Create a schedule.
    ///
    /// # Errors
    ///
    /// Returns [`CltError::Config`] if either argument is zero.
    pub fn new(total_days: usize, frames_speed: usize) -> CltResult<Self> {
        if total_days == 0 || frames_speed == 0 {
            return Err(CltError::config(format!(
                "frame schedule needs positive days and speed, got {total_days} / {frames_speed}"
            )));
        }
        Ok(Self {
            total_days,
            frames_speed,
        })
    }

    /// `ceil(total_days / frames_speed)`.
    #[must_use]
    pub const fn num_frames(&self) -> usize {
        self.total_days.div_ceil(self.frames_speed)
    }

    /// Days visible on `frame`, clamped to the dataset.
    #[must_use]
    pub fn visible_days(&self, frame: usize) -> usize {
        (frame + 1)
            .saturating_mul(self.frames_speed)
            .min(self.total_days)
    }

    /// Total days of the run.
    #[must_use]
    pub const fn total_days(&self) -> usize {
        self.total_days
    }

    /// `(frame, visible_days)` for every frame in order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.num_frames()).map(|f| (f, self.visible_days(f)))
    }
}

/// Static geometry shared by all frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelLayout {
    /// Heatmap edges, used for both axes.
    pub heatmap_edges: BinEdges,
    /// Marginal histogram edges.
    pub histogram_edges: BinEdges,
    /// Fixed scatter color scale for x̄.
    pub scatter_color_range: (f64, f64),
    /// Half-width of the scatter panel's visible window.
    pub scatter_half_width: f64,
    /// Radius of the dashed dartboard outline.
    pub board_radius: f64,
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self {
            heatmap_edges: BinEdges::uniform(-PLOT_HALF_WIDTH, PLOT_HALF_WIDTH, HEATMAP_EDGES),
            histogram_edges: BinEdges::uniform(-PLOT_HALF_WIDTH, PLOT_HALF_WIDTH, HISTOGRAM_EDGES),
            scatter_color_range: (-0.5, 0.5),
            scatter_half_width: 0.7,
            board_radius: 1.0,
        }
    }
}

/// Everything a renderer needs to draw one frame, beyond the static context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameState {
    /// Frame number, starting at 0.
    pub frame: usize,
    /// Length of the visible prefix of daily averages.
    pub visible_days: usize,
    /// Heatmap counts, row-major by y bin.
    pub heatmap: Vec<u32>,
    /// Upper color limit of the heatmap (frame-relative).
    pub heatmap_max: u32,
    /// Density-normalized marginal histogram bars.
    pub density: Vec<f64>,
    /// Vertical limit of the marginal panel.
    pub y_limit: f64,
    /// Progress text.
    pub label: String,
}

impl FrameState {
    /// Scatter coordinates visible in this frame.
    #[must_use]
    pub fn scatter<'a>(&self, averages: &'a DailyAverages) -> (&'a [f64], &'a [f64]) {
        averages.prefix(self.visible_days)
    }

    /// Tallest marginal bar.
    #[must_use]
    pub fn max_density(&self) -> f64 {
        self.density.iter().copied().fold(0.0, f64::max)
    }
}

/// Derives [`FrameState`]s from a run's averages and static overlay.
#[derive(Debug)]
pub struct FrameRenderer<'a> {
    averages: &'a DailyAverages,
    curve: &'a TheoreticalCurve,
    layout: &'a PanelLayout,
}

impl<'a> FrameRenderer<'a> {
    /// Create a renderer over borrowed run data.
    #[must_use]
    pub const fn new(
        averages: &'a DailyAverages,
        curve: &'a TheoreticalCurve,
        layout: &'a PanelLayout,
    ) -> Self {
        Self {
            averages,
            curve,
            layout,
        }
    }

    /// Render `frame` showing the first `visible_days` averages.
    #[must_use]
    pub fn render(&self, frame: usize, visible_days: usize) -> FrameState {
        let (xs, ys) = self.averages.prefix(visible_days);
        let visible_days = xs.len();

        let edges = &self.layout.heatmap_edges;
        let heatmap = Histogram2D::from_points(edges, edges, xs, ys);
        let heatmap_max = heatmap.max_count();

        let density = Histogram1D::from_values(&self.layout.histogram_edges, xs).densities();
        let max_bar = density.iter().copied().fold(0.0, f64::max);
        let y_limit = marginal_y_limit(max_bar, self.curve.max_density());

        FrameState {
            frame,
            visible_days,
            heatmap: heatmap.into_counts(),
            heatmap_max,
            density,
            y_limit,
            label: progress_label(visible_days, self.averages.len()),
        }
    }

    /// Render every frame of `schedule` in order.
    pub fn render_all(&self, schedule: &FrameSchedule) -> impl Iterator<Item = FrameState> + '_ {
        let schedule = *schedule;
        (0..schedule.num_frames()).map(move |f| self.render(f, schedule.visible_days(f)))
    }
}

/// `1.15 × max(bar, curve)`, or 1 when that is zero.
#[must_use]
pub fn marginal_y_limit(max_bar: f64, max_curve: f64) -> f64 {
    let limit = max_bar.max(max_curve) * Y_HEADROOM;
    if limit > 0.0 {
        limit
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clt::aggregator::aggregate;
    use crate::clt::sampler::sample_unit_disk;
    use crate::engine::rng::SimRng;

    fn run_data(n: usize, days: usize, seed: u64) -> (DailyAverages, TheoreticalCurve) {
        let mut rng = SimRng::new(seed);
        let samples = sample_unit_disk(&mut rng, n * days);
        let averages = aggregate(&samples, days, n).unwrap();
        (averages, TheoreticalCurve::new(n).unwrap())
    }

    #[test]
    fn test_schedule_even_division() {
        let schedule = FrameSchedule::new(2000, 50).unwrap();
        assert_eq!(schedule.num_frames(), 40);
        for f in 0..40 {
            assert_eq!(schedule.visible_days(f), ((f + 1) * 50).min(2000));
        }
        assert_eq!(schedule.visible_days(39), 2000);
    }

    #[test]
    fn test_schedule_clamps_last_frame() {
        let schedule = FrameSchedule::new(530, 50).unwrap();
        assert_eq!(schedule.num_frames(), 11);
        assert_eq!(schedule.visible_days(9), 500);
        assert_eq!(schedule.visible_days(10), 530);
    }

    #[test]
    fn test_schedule_speed_exceeds_days() {
        let schedule = FrameSchedule::new(30, 200).unwrap();
        assert_eq!(schedule.num_frames(), 1);
        assert_eq!(schedule.visible_days(0), 30);
    }

    #[test]
    fn test_schedule_rejects_zero() {
        assert!(FrameSchedule::new(0, 10).is_err());
        assert!(FrameSchedule::new(10, 0).is_err());
    }

    #[test]
    fn test_layout_bins() {
        let layout = PanelLayout::default();
        assert_eq!(layout.heatmap_edges.bin_count(), 39);
        assert_eq!(layout.histogram_edges.bin_count(), 59);
    }

    #[test]
    fn test_frame_shapes_and_label() {
        let (averages, curve) = run_data(10, 300, 1);
        let layout = PanelLayout::default();
        let renderer = FrameRenderer::new(&averages, &curve, &layout);

        let frame = renderer.render(2, 150);
        assert_eq!(frame.frame, 2);
        assert_eq!(frame.visible_days, 150);
        assert_eq!(frame.heatmap.len(), 39 * 39);
        assert_eq!(frame.density.len(), 59);
        assert_eq!(frame.label, "Days simulated: 150 / 300");
        assert_eq!(frame.heatmap_max, *frame.heatmap.iter().max().unwrap());
        assert_eq!(frame.scatter(&averages).0.len(), 150);
    }

    #[test]
    fn test_density_integrates_to_one_every_frame() {
        let (averages, curve) = run_data(10, 1000, 2);
        let layout = PanelLayout::default();
        let renderer = FrameRenderer::new(&averages, &curve, &layout);
        let schedule = FrameSchedule::new(1000, 70).unwrap();

        for frame in renderer.render_all(&schedule) {
            let area: f64 = frame
                .density
                .iter()
                .enumerate()
                .map(|(i, d)| d * layout.histogram_edges.width(i))
                .sum();
            assert!((area - 1.0).abs() < 1e-9, "frame {}: area {area}", frame.frame);
        }
    }

    #[test]
    fn test_y_limit_rule() {
        let (averages, curve) = run_data(10, 200, 3);
        let layout = PanelLayout::default();
        let renderer = FrameRenderer::new(&averages, &curve, &layout);
        let frame = renderer.render(0, 50);

        let expected = frame.max_density().max(curve.max_density()) * Y_HEADROOM;
        assert!((frame.y_limit - expected).abs() < 1e-12);
    }

    #[test]
    fn test_marginal_y_limit_floor() {
        assert_eq!(marginal_y_limit(0.0, 0.0), 1.0);
        assert!((marginal_y_limit(2.0, 1.0) - 2.3).abs() < 1e-12);
    }

    /// Recomputing from scratch matches an independent recount.
    #[test]
    fn test_heatmap_matches_recount() {
        let (averages, curve) = run_data(4, 400, 4);
        let layout = PanelLayout::default();
        let renderer = FrameRenderer::new(&averages, &curve, &layout);

        let frame = renderer.render(5, 240);
        let total: u32 = frame.heatmap.iter().sum();
        let (xs, ys) = averages.prefix(240);
        let in_range = xs
            .iter()
            .zip(ys)
            .filter(|(x, y)| x.abs() <= 0.6 && y.abs() <= 0.6)
            .count();
        assert_eq!(total as usize, in_range);
    }

    #[test]
    fn test_visible_days_monotonic() {
        let (averages, curve) = run_data(2, 530, 5);
        let layout = PanelLayout::default();
        let renderer = FrameRenderer::new(&averages, &curve, &layout);
        let schedule = FrameSchedule::new(530, 50).unwrap();

        let frames: Vec<FrameState> = renderer.render_all(&schedule).collect();
        assert_eq!(frames.len(), 11);
        assert!(frames.windows(2).all(|w| w[0].visible_days <= w[1].visible_days));
        assert_eq!(frames.last().unwrap().visible_days, 530);
    }
}
