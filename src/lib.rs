//! gomon - terminal dashboard for the runtime health of a Go process.
//!
//! Polls the `golang-stats-api-handler` JSON endpoint of a running Go
//! process, accumulates every snapshot into per-metric time series, and
//! renders the series as a live TUI.
//!
//! - `client` - typed HTTP client for the stats endpoint
//! - `stats` - snapshot model and append-only time-series history
//! - `tui` - poll/render loop and dashboard widgets
//! - `fmt` - shared formatting helpers

pub mod client;
pub mod fmt;
pub mod stats;
pub mod tui;
