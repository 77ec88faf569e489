//! Colormaps and the dark theme used by renderers.
//!
//! Renderer-agnostic: colors are plain RGB triples, converted by each
//! backend. The theme is initialized once per renderer, outside the run.

use serde::{Deserialize, Serialize};

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Linear interpolation between two colors, `t` in [0, 1].
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Self(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

/// Map `value` in `[lo, hi]` to `[0, 1]`, clamping outside values.
///
/// A degenerate range maps everything to 0.
#[must_use]
pub fn normalize(value: f64, lo: f64, hi: f64) -> f64 {
    if hi <= lo || !value.is_finite() {
        return 0.0;
    }
    ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
}

/// Cyan-to-magenta colormap for the scatter panel.
#[must_use]
pub fn cool(t: f64) -> Rgb {
    Rgb(0, 255, 255).lerp(Rgb(255, 0, 255), t)
}

const INFERNO_STOPS: [Rgb; 5] = [
    Rgb(0, 0, 4),
    Rgb(87, 16, 110),
    Rgb(188, 55, 84),
    Rgb(249, 142, 9),
    Rgb(252, 255, 164),
];

/// Black-purple-orange-yellow colormap for the heatmap panel.
#[must_use]
pub fn inferno(t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let segments = (INFERNO_STOPS.len() - 1) as f64;
    let scaled = t * segments;
    let i = (scaled.floor() as usize).min(INFERNO_STOPS.len() - 2);
    INFERNO_STOPS[i].lerp(INFERNO_STOPS[i + 1], scaled - i as f64)
}

/// Colors of the three panels and the figure chrome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Figure background.
    pub background: Rgb,
    /// Figure title and progress text.
    pub foreground: Rgb,
    /// Scatter panel title.
    pub scatter_title: Rgb,
    /// Heatmap panel title.
    pub heatmap_title: Rgb,
    /// Marginal histogram title and bars.
    pub histogram: Rgb,
    /// Dashed dartboard outline.
    pub board: Rgb,
    /// Theoretical curve.
    pub curve: Rgb,
}

impl Theme {
    /// The dark theme.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            background: Rgb(0, 0, 0),
            foreground: Rgb(255, 255, 255),
            scatter_title: Rgb(0, 255, 255),
            heatmap_title: Rgb(255, 165, 0),
            histogram: Rgb(0, 255, 0),
            board: Rgb(0, 128, 0),
            curve: Rgb(255, 255, 255),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
