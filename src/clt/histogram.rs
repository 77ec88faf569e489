//! Fixed-edge histograms for the heatmap and marginal panels.
//!
//! Bins are half-open `[edge[i], edge[i+1])` except the last, which also
//! includes the right edge. Values outside `[lo, hi]` (and NaN) are ignored.

use serde::{Deserialize, Serialize};

/// `count` evenly spaced values over `[start, end]`, endpoints included.
#[must_use]
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| {
                    if i == count - 1 {
                        end
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}

/// Monotonically increasing bin edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinEdges {
    edges: Vec<f64>,
}

impl BinEdges {
    /// `edge_count` evenly spaced edges over `[lo, hi]`, giving
    /// `edge_count - 1` bins.
    #[must_use]
    pub fn uniform(lo: f64, hi: f64, edge_count: usize) -> Self {
        Self {
            edges: linspace(lo, hi, edge_count.max(2)),
        }
    }

    /// Whether the edges describe at least one bin and increase strictly.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.edges.len() >= 2
            && self.edges.iter().all(|e| e.is_finite())
            && self.edges.windows(2).all(|w| w[0] < w[1])
    }

    /// Raw edge values.
    #[must_use]
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Number of bins.
    #[must_use]
    pub fn bin_count(&self) -> usize {
        self.edges.len().saturating_sub(1)
    }

    /// Lower bound of the range.
    #[must_use]
    pub fn lo(&self) -> f64 {
        self.edges.first().copied().unwrap_or(0.0)
    }

    /// Upper bound of the range.
    #[must_use]
    pub fn hi(&self) -> f64 {
        self.edges.last().copied().unwrap_or(0.0)
    }

    /// Width of bin `index`.
    #[must_use]
    pub fn width(&self, index: usize) -> f64 {
        match (self.edges.get(index), self.edges.get(index + 1)) {
            (Some(a), Some(b)) => b - a,
            _ => 0.0,
        }
    }

    /// Midpoint of bin `index`.
    #[must_use]
    pub fn center(&self, index: usize) -> f64 {
        match (self.edges.get(index), self.edges.get(index + 1)) {
            (Some(a), Some(b)) => 0.5 * (a + b),
            _ => 0.0,
        }
    }

    /// Bin containing `value`, or `None` when it falls outside the range.
    #[must_use]
    pub fn bin_index(&self, value: f64) -> Option<usize> {
        let n = self.bin_count();
        let (lo, hi) = (self.lo(), self.hi());
        if n == 0 || !(value >= lo && value <= hi) {
            return None;
        }

        let mut index = (((value - lo) / (hi - lo)) * n as f64) as usize;
        if index >= n {
            index = n - 1;
        }

        // Floating-point division can land one bin off near an edge.
        if index > 0 && value < self.edges[index] {
            index -= 1;
        } else if index + 1 < n && value >= self.edges[index + 1] {
            index += 1;
        }
        Some(index)
    }
}

/// One-dimensional histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram1D {
    edges: BinEdges,
    counts: Vec<u32>,
}

impl Histogram1D {
    /// Bin `values` from scratch.
    #[must_use]
    pub fn from_values(edges: &BinEdges, values: &[f64]) -> Self {
        let mut counts = vec![0; edges.bin_count()];
        for &v in values {
            if let Some(i) = edges.bin_index(v) {
                counts[i] += 1;
            }
        }
        Self {
            edges: edges.clone(),
            counts,
        }
    }

    /// Raw bin counts.
    #[must_use]
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// Number of values that landed inside the range.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    /// Area-normalized bar heights: `count / (total × width)`.
    ///
    /// All zeros when no value fell inside the range.
    #[must_use]
    pub fn densities(&self) -> Vec<f64> {
        let total = self.total() as f64;
        if total == 0.0 {
            return vec![0.0; self.counts.len()];
        }
        self.counts
            .iter()
            .enumerate()
            .map(|(i, &c)| f64::from(c) / (total * self.edges.width(i)))
            .collect()
    }
}

/// Two-dimensional histogram stored row-major by y bin, so row `iy`
/// is one horizontal strip of the heatmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram2D {
    nx: usize,
    ny: usize,
    counts: Vec<u32>,
}

impl Histogram2D {
    /// Bin paired `(xs[i], ys[i])` points from scratch.
    #[must_use]
    pub fn from_points(x_edges: &BinEdges, y_edges: &BinEdges, xs: &[f64], ys: &[f64]) -> Self {
        let nx = x_edges.bin_count();
        let ny = y_edges.bin_count();
        let mut counts = vec![0; nx * ny];
        for (&x, &y) in xs.iter().zip(ys) {
            if let (Some(ix), Some(iy)) = (x_edges.bin_index(x), y_edges.bin_index(y)) {
                counts[iy * nx + ix] += 1;
            }
        }
        Self { nx, ny, counts }
    }

    /// Bins along x.
    #[must_use]
    pub const fn nx(&self) -> usize {
        self.nx
    }

    /// Bins along y.
    #[must_use]
    pub const fn ny(&self) -> usize {
        self.ny
    }

    /// Count in cell `(ix, iy)`.
    #[must_use]
    pub fn get(&self, ix: usize, iy: usize) -> Option<u32> {
        if ix >= self.nx || iy >= self.ny {
            return None;
        }
        self.counts.get(iy * self.nx + ix).copied()
    }

    /// Largest cell count.
    #[must_use]
    pub fn max_count(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Consume into the row-major count buffer.
    #[must_use]
    pub fn into_counts(self) -> Vec<u32> {
        self.counts
    }
}
