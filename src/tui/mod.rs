//! TUI module for clt-darts.
//!
//! Reusable player state extracted from `bin/clt_tui.rs` so it can be
//! tested. The terminal I/O remains in the binary.

pub mod args;
pub mod player_app;

#[cfg(test)]
mod tests;
