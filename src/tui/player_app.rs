//! Animation player state and logic.
//!
//! Playback state for the `clt-tui` binary. Terminal I/O is handled by the
//! binary; frame stepping, key handling and the panel geometry in data
//! coordinates live here.

use std::time::Duration;

use crossterm::event::KeyCode;

use crate::clt::{FrameState, SimulationConfig};
use crate::engine::Simulation;
use crate::error::CltResult;
use crate::visualization::palette::{cool, inferno, normalize};
use crate::visualization::{Animation, Rgb, Theme};

/// Legend text of the theoretical curve.
pub const CURVE_LEGEND: &str = "Theoretical Normal";

/// Panel titles in display order.
pub const PANEL_TITLES: [&str; 3] = [
    "1. Averages (Real View)",
    "2. Heat Map",
    "3. Marginal X Distribution (Convergence to Normal)",
];

/// One filled heatmap cell in data coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatCell {
    /// Cell center x.
    pub x: f64,
    /// Cell center y.
    pub y: f64,
    /// Cell color.
    pub color: Rgb,
}

/// Application state for the animation player.
#[derive(Debug, Clone)]
pub struct PlayerApp {
    /// Animation being replayed.
    pub animation: Animation,
    /// Index of the displayed frame.
    pub current: usize,
    /// Whether playback is paused.
    pub paused: bool,
    /// Whether playback wraps to the first frame after the last.
    pub looping: bool,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Renderer colors.
    pub theme: Theme,
}

impl PlayerApp {
    /// Create a player positioned on the first frame.
    #[must_use]
    pub fn new(animation: Animation) -> Self {
        Self {
            animation,
            current: 0,
            paused: false,
            looping: true,
            should_quit: false,
            theme: Theme::dark(),
        }
    }

    /// Compute a fresh animation and wrap it in a player.
    ///
    /// # Errors
    ///
    /// Returns error if the simulation fails.
    pub fn from_simulation(config: SimulationConfig, seed: Option<u64>) -> CltResult<Self> {
        let animation = Simulation::new(config, seed)?.run_silent()?;
        Ok(Self::new(animation))
    }

    /// Displayed frame.
    #[must_use]
    pub fn frame(&self) -> Option<&FrameState> {
        self.animation.frame(self.current)
    }

    /// Whether the last frame is displayed.
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.current + 1 >= self.animation.len()
    }

    /// Wall-clock time between frames.
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.animation.metadata.frame_interval_ms.max(1))
    }

    /// Advance playback by one tick.
    pub fn update(&mut self) {
        if self.paused || self.animation.is_empty() {
            return;
        }
        if !self.at_end() {
            self.current += 1;
        } else if self.looping {
            self.current = 0;
        }
    }

    /// Show the next frame and pause.
    pub fn step_forward(&mut self) {
        self.paused = true;
        if !self.at_end() {
            self.current += 1;
        }
    }

    /// Show the previous frame and pause.
    pub fn step_back(&mut self) {
        self.paused = true;
        self.current = self.current.saturating_sub(1);
    }

    /// Restart playback from the first frame.
    pub fn restart(&mut self) {
        self.current = 0;
        self.paused = false;
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(' ') => self.paused = !self.paused,
            KeyCode::Right => self.step_forward(),
            KeyCode::Left => self.step_back(),
            KeyCode::Char('r') => self.restart(),
            KeyCode::Char('l') => self.looping = !self.looping,
            _ => {}
        }
    }

    /// Visible daily averages with their scatter colors.
    #[must_use]
    pub fn scatter_points(&self) -> Vec<(f64, f64, Rgb)> {
        let Some(frame) = self.frame() else {
            return Vec::new();
        };
        let (lo, hi) = self.animation.layout.scatter_color_range;
        let (xs, ys) = frame.scatter(&self.animation.averages);
        xs.iter()
            .zip(ys)
            .map(|(&x, &y)| (x, y, cool(normalize(x, lo, hi))))
            .collect()
    }

    /// Non-empty heatmap cells colored against the frame's maximum count.
    #[must_use]
    pub fn heatmap_cells(&self) -> Vec<HeatCell> {
        let Some(frame) = self.frame() else {
            return Vec::new();
        };
        let edges = &self.animation.layout.heatmap_edges;
        let nx = edges.bin_count();
        if nx == 0 {
            return Vec::new();
        }
        let max = f64::from(frame.heatmap_max);

        frame
            .heatmap
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(i, &count)| HeatCell {
                x: edges.center(i % nx),
                y: edges.center(i / nx),
                color: inferno(normalize(f64::from(count), 0.0, max)),
            })
            .collect()
    }

    /// `(bin center, density)` of the marginal histogram.
    #[must_use]
    pub fn histogram_bars(&self) -> Vec<(f64, f64)> {
        let Some(frame) = self.frame() else {
            return Vec::new();
        };
        let edges = &self.animation.layout.histogram_edges;
        frame
            .density
            .iter()
            .enumerate()
            .map(|(i, &d)| (edges.center(i), d))
            .collect()
    }

    /// Theoretical curve sampled for line drawing.
    #[must_use]
    pub fn curve_points(&self) -> Vec<(f64, f64)> {
        self.animation.curve.points().collect()
    }

    /// Dashed unit circle as alternating on-segments.
    #[must_use]
    pub fn board_outline(&self, segments: usize) -> Vec<((f64, f64), (f64, f64))> {
        let r = self.animation.layout.board_radius;
        let segments = segments.max(2);
        let step = std::f64::consts::TAU / segments as f64;
        (0..segments)
            .step_by(2)
            .map(|k| {
                let a0 = k as f64 * step;
                let a1 = a0 + step;
                ((r * a0.cos(), r * a0.sin()), (r * a1.cos(), r * a1.sin()))
            })
            .collect()
    }

    /// Bottom status line.
    #[must_use]
    pub fn status_line(&self) -> String {
        let label = self.frame().map_or("", |f| f.label.as_str());
        let state = if self.paused { " [paused]" } else { "" };
        format!(
            "{label}  (frame {}/{}){state}",
            self.current + 1,
            self.animation.len()
        )
    }
}
