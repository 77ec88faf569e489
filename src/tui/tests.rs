//! Integration tests for the TUI module.
//!
//! These tests drive the player over exported and freshly computed
//! animations.

use super::player_app::PlayerApp;
use crate::clt::SimulationConfig;
use crate::engine::Simulation;
use crate::visualization::{ExportFormat, Exporter};
use crossterm::event::KeyCode;
use tempfile::tempdir;

#[test]
fn test_player_lifecycle() {
    let config = SimulationConfig::new(5, 300, 50).unwrap();
    let mut app = PlayerApp::from_simulation(config, Some(42)).unwrap();

    assert!(!app.paused);
    assert!(!app.should_quit);
    assert_eq!(app.animation.len(), 6);

    for _ in 0..3 {
        app.update();
    }
    assert_eq!(app.frame().unwrap().visible_days, 200);

    app.handle_key(KeyCode::Char(' '));
    assert!(app.paused);
    app.update();
    assert_eq!(app.current, 3);

    app.handle_key(KeyCode::Char('r'));
    assert_eq!(app.current, 0);

    app.handle_key(KeyCode::Char('q'));
    assert!(app.should_quit);
}

#[test]
fn test_player_replays_exported_animation() {
    let dir = tempdir().unwrap();
    let config = SimulationConfig::new(3, 250, 100).unwrap();
    let animation = Simulation::new(config, Some(8)).unwrap().run_silent().unwrap();

    for format in [ExportFormat::Binary, ExportFormat::Json, ExportFormat::JsonLines] {
        let path = dir.path().join(format!("run.{}", format.extension()));
        Exporter::new(format).export(&animation, &path).unwrap();

        let mut app = PlayerApp::new(Exporter::load(&path, None).unwrap());
        assert_eq!(app.animation.metadata.title, "Convergence with n=3 darts/day");
        assert_eq!(app.animation.len(), 3);

        app.handle_key(KeyCode::Right);
        app.handle_key(KeyCode::Right);
        assert!(app.at_end());
        assert_eq!(app.scatter_points().len(), 250);
    }
}

#[test]
fn test_final_frame_histogram_matches_curve_scale() {
    let config = SimulationConfig::new(10, 2000, 50).unwrap();
    let mut app = PlayerApp::from_simulation(config, Some(3)).unwrap();
    app.current = app.animation.len() - 1;

    let frame = app.frame().unwrap();
    let peak_bar = app
        .histogram_bars()
        .iter()
        .map(|&(_, d)| d)
        .fold(0.0_f64, f64::max);
    let peak_curve = app.animation.curve.peak_density();

    assert!(frame.y_limit >= peak_curve * 1.15 - 1e-12);
    assert!(peak_bar > 0.5 * peak_curve && peak_bar < 2.0 * peak_curve);
}
