//! Scheduler state and per-frame data.

use chrono::{DateTime, Local};

use crate::stats::{CounterMetric, RateMetric, RuntimeInfo, StatsHistory};

/// Poll loop phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollState {
    /// Polling on every tick, modulo backoff.
    Running,
    /// Failure budget exhausted: polling stopped, UI stays up with the
    /// last error on the status line.
    Halted,
}

/// Scheduler bookkeeping surfaced to the status line.
#[derive(Debug)]
pub struct AppState {
    pub poll: PollState,
    pub consecutive_failures: u32,
    pub failure_budget: u32,
    /// Ticks left to skip before the next poll attempt (backoff window).
    pub skip_ticks: u32,
    /// Snapshots appended so far.
    pub samples: usize,
    pub last_poll: Option<DateTime<Local>>,
    pub last_error: Option<String>,
    /// Transient note for the status line (e.g. after a reload).
    pub message: Option<String>,
}

impl AppState {
    pub fn new(failure_budget: u32) -> Self {
        Self {
            poll: PollState::Running,
            consecutive_failures: 0,
            failure_budget,
            skip_ticks: 0,
            samples: 0,
            last_poll: None,
            last_error: None,
            message: None,
        }
    }
}

/// Read-only copy of everything one frame needs.
///
/// Collected from the store before drawing, so rendering never holds the
/// history lock.
#[derive(Debug)]
pub struct Dashboard {
    pub runtime: RuntimeInfo,
    pub goroutine_num: Vec<u64>,
    pub memory_alloc: Vec<u64>,
    pub memory_total_alloc: Vec<u64>,
    pub gc_per_second: Vec<f64>,
    pub gc_pause_per_second: Vec<f64>,
}

impl Dashboard {
    pub fn collect<S>(history: &StatsHistory<S>) -> Self {
        Self {
            runtime: history.runtime(),
            goroutine_num: history.counters(CounterMetric::GoroutineNum),
            memory_alloc: history.counters(CounterMetric::MemoryAlloc),
            memory_total_alloc: history.counters(CounterMetric::MemoryTotalAlloc),
            gc_per_second: history.rates(RateMetric::GcPerSecond),
            gc_pause_per_second: history.rates(RateMetric::GcPausePerSecond),
        }
    }
}
