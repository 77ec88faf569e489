//! # clt-darts
//!
//! Animated demonstration of the Central Limit Theorem with darts thrown
//! uniformly at a unit-disk board.
//!
//! Every simulated day `n` darts land on the board and their mean position is
//! recorded. As days accumulate, the distribution of the daily means
//! concentrates around the center and the marginal of the x-coordinate
//! approaches `N(0, 0.25 / n)`.
//!
//! The crate computes the full animation up front:
//! - [`clt::sample_unit_disk`] draws the darts
//! - [`clt::aggregate`] reduces them to daily means
//! - [`clt::FrameRenderer`] derives histograms and labels per frame
//! - [`visualization::AnimationBuilder`] assembles a replayable artifact
//!
//! ## Example
//!
//! ```rust
//! use clt_darts::prelude::*;
//!
//! let config = SimulationConfig::new(10, 500, 50).unwrap();
//! let animation = Simulation::new(config, Some(42)).unwrap().run_silent().unwrap();
//! assert_eq!(animation.len(), 10);
//! assert_eq!(animation.last_frame().unwrap().visible_days, 500);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops,
    clippy::imprecise_flops,
    clippy::missing_const_for_fn,
    clippy::needless_range_loop
)]

pub mod cli;
pub mod clt;
pub mod config;
pub mod engine;
pub mod error;
#[cfg(feature = "tui")]
pub mod tui;
pub mod visualization;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::clt::{
        ConvergenceReport, DailyAverages, FrameSchedule, FrameState, SimulationConfig,
        TheoreticalCurve,
    };
    pub use crate::config::{CltConfig, CltConfigBuilder};
    pub use crate::engine::rng::SimRng;
    pub use crate::engine::{RunEvent, RunObserver, Simulation};
    pub use crate::error::{CltError, CltResult};
    pub use crate::visualization::{Animation, ExportFormat, Exporter};
}

/// Re-export for public API
pub use error::{CltError, CltResult};
