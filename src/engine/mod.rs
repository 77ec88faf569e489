//! Simulation run orchestration.
//!
//! A run is one synchronous pass: sample, aggregate, evaluate the curve,
//! render every frame, assemble. Progress is reported through a
//! [`RunObserver`]; nothing is returned until the animation is complete.

pub mod rng;

use tracing::{debug, info};

pub use rng::SimRng;

use crate::clt::{
    aggregate, sample_unit_disk, ConvergenceReport, FrameRenderer, FrameSchedule, PanelLayout,
    SimulationConfig, TheoreticalCurve,
};
use crate::config::CltConfig;
use crate::error::{CltError, CltResult};
use crate::visualization::{
    figure_title, Animation, AnimationBuilder, AnimationMetadata, DEFAULT_FRAME_INTERVAL_MS,
};

/// Progress notifications emitted during a run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    /// Computation started; advisory only.
    Busy {
        /// Darts about to be thrown.
        total_samples: usize,
        /// Frames about to be rendered.
        total_frames: usize,
    },
    /// One frame finished rendering.
    FrameRendered {
        /// Frame number.
        frame: usize,
        /// Days visible in the frame.
        visible_days: usize,
        /// Progress text.
        label: String,
    },
    /// The animation was assembled.
    Completed {
        /// Number of frames.
        frames: usize,
        /// Master seed used.
        seed: u64,
    },
}

/// Receiver of [`RunEvent`]s.
pub trait RunObserver {
    /// Called synchronously for each event.
    fn on_event(&mut self, event: &RunEvent);
}

impl<F: FnMut(&RunEvent)> RunObserver for F {
    fn on_event(&mut self, event: &RunEvent) {
        self(event);
    }
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl RunObserver for NullObserver {
    fn on_event(&mut self, _event: &RunEvent) {}
}

/// One simulation run.
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    rng: SimRng,
    frame_interval_ms: u64,
    layout: PanelLayout,
}

impl Simulation {
    /// Create a run; `seed = None` draws a fresh seed from OS entropy.
    ///
    /// # Errors
    ///
    /// Returns [`CltError::Config`] if any parameter is zero.
    pub fn new(config: SimulationConfig, seed: Option<u64>) -> CltResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng: SimRng::from_optional_seed(seed),
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            layout: PanelLayout::default(),
        })
    }

    /// Create a run from a validated file configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid.
    pub fn from_config(config: &CltConfig) -> CltResult<Self> {
        config.check()?;
        let mut sim = Self::new(config.simulation_config(), config.reproducibility.seed)?;
        sim.frame_interval_ms = config.animation.frame_interval_ms;
        Ok(sim)
    }

    /// Override the frame interval.
    #[must_use]
    pub const fn with_frame_interval_ms(mut self, interval_ms: u64) -> Self {
        self.frame_interval_ms = interval_ms;
        self
    }

    /// Run parameters.
    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Master seed of this run.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.rng.master_seed()
    }

    /// Run without progress reporting.
    ///
    /// # Errors
    ///
    /// See [`Simulation::run`].
    pub fn run_silent(self) -> CltResult<Animation> {
        self.run(&mut NullObserver)
    }

    /// Execute the run to completion.
    ///
    /// # Errors
    ///
    /// Any error is fatal; no partial animation is returned.
    pub fn run<O: RunObserver + ?Sized>(mut self, observer: &mut O) -> CltResult<Animation> {
        let config = self.config;
        let seed = self.seed();
        let schedule = FrameSchedule::new(config.total_days, config.frames_speed)?;

        info!(
            darts_per_day = config.darts_per_day,
            total_days = config.total_days,
            frames_speed = config.frames_speed,
            seed,
            "starting simulation"
        );
        observer.on_event(&RunEvent::Busy {
            total_samples: config.total_samples(),
            total_frames: schedule.num_frames(),
        });

        let samples = sample_unit_disk(&mut self.rng, config.total_samples());
        let averages = aggregate(&samples, config.total_days, config.darts_per_day)?;
        drop(samples);

        if let Some(day) = averages.iter().position(|a| !(a.x.is_finite() && a.y.is_finite())) {
            return Err(CltError::non_finite(format!("daily average {day}")));
        }

        let curve = TheoreticalCurve::new(config.darts_per_day)?;
        let convergence = ConvergenceReport::from_averages(&averages, config.darts_per_day);
        debug!(
            sigma = curve.sigma,
            variance_ratio = convergence.variance_ratio,
            "aggregated daily averages"
        );

        let metadata = AnimationMetadata {
            title: figure_title(config.darts_per_day),
            config,
            seed,
            frame_interval_ms: self.frame_interval_ms,
            convergence,
        };

        let frames: Vec<_> = {
            let renderer = FrameRenderer::new(&averages, &curve, &self.layout);
            renderer.render_all(&schedule).collect()
        };

        let mut builder =
            AnimationBuilder::new(metadata, self.layout, averages, curve, &schedule);
        for frame in frames {
            debug!(frame = frame.frame, visible_days = frame.visible_days, "rendered frame");
            observer.on_event(&RunEvent::FrameRendered {
                frame: frame.frame,
                visible_days: frame.visible_days,
                label: frame.label.clone(),
            });
            builder.push(frame)?;
        }
        let animation = builder.finish()?;

        info!(frames = animation.len(), seed, "simulation complete");
        observer.on_event(&RunEvent::Completed {
            frames: animation.len(),
            seed,
        });

        Ok(animation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_run_shape() {
        let sim = Simulation::new(SimulationConfig::default(), Some(42)).unwrap();
        let animation = sim.run_silent().unwrap();

        assert_eq!(animation.len(), 40);
        assert_eq!(animation.averages.len(), 2000);
        assert_eq!(animation.metadata.seed, 42);
        assert_eq!(animation.metadata.title, "Convergence with n=10 darts/day");
        for (f, frame) in animation.frames.iter().enumerate() {
            assert_eq!(frame.visible_days, ((f + 1) * 50).min(2000));
        }
    }

    #[test]
    fn test_events_in_order() {
        let config = SimulationConfig::new(3, 530, 50).unwrap();
        let sim = Simulation::new(config, Some(1)).unwrap();

        let mut events = Vec::new();
        let mut record = |e: &RunEvent| events.push(e.clone());
        let animation = sim.run(&mut record).unwrap();

        assert_eq!(events.len(), 1 + 11 + 1);
        assert_eq!(
            events[0],
            RunEvent::Busy {
                total_samples: 1590,
                total_frames: 11
            }
        );
        assert_eq!(
            events[11],
            RunEvent::FrameRendered {
                frame: 10,
                visible_days: 530,
                label: "Days simulated: 530 / 530".to_string(),
            }
        );
        assert_eq!(events[12], RunEvent::Completed { frames: 11, seed: 1 });
        assert_eq!(animation.last_frame().unwrap().visible_days, 530);
    }

    #[test]
    fn test_same_seed_same_animation() {
        let config = SimulationConfig::new(4, 200, 20).unwrap();
        let a = Simulation::new(config, Some(9)).unwrap().run_silent().unwrap();
        let b = Simulation::new(config, Some(9)).unwrap().run_silent().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unseeded_run_records_seed() {
        let config = SimulationConfig::new(2, 100, 10).unwrap();
        let sim = Simulation::new(config, None).unwrap();
        let seed = sim.seed();
        let animation = sim.run_silent().unwrap();
        assert_eq!(animation.metadata.seed, seed);

        let replay = Simulation::new(config, Some(seed)).unwrap().run_silent().unwrap();
        assert_eq!(replay.averages, animation.averages);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = SimulationConfig {
            darts_per_day: 0,
            total_days: 10,
            frames_speed: 1,
        };
        assert!(Simulation::new(config, Some(1)).is_err());
    }

    #[test]
    fn test_frame_interval_override() {
        let config = SimulationConfig::new(1, 10, 5).unwrap();
        let animation = Simulation::new(config, Some(3))
            .unwrap()
            .with_frame_interval_ms(100)
            .run_silent()
            .unwrap();
        assert_eq!(animation.metadata.frame_interval_ms, 100);
        assert_eq!(animation.duration_ms(), 200);
    }
}
