//! Snapshot model and time-series accumulation for Go runtime stats.

mod history;
mod source;

pub use history::{CounterMetric, HistoryError, RateMetric, RuntimeInfo, StatsHistory};
pub use source::StatsSource;

#[cfg(test)]
pub(crate) use source::mock::ScriptedSource;

use serde::Deserialize;

/// One decoded response from the stats endpoint.
///
/// Field set and keys follow the `golang-stats-api-handler` JSON format.
/// Missing fields decode to zero; unknown fields are ignored.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Stats {
    /// Epoch seconds at which the snapshot was taken.
    pub time: i64,
    // runtime
    pub go_version: String,
    pub go_os: String,
    pub go_arch: String,
    pub cpu_num: u32,
    pub gomaxprocs: u32,
    pub goroutine_num: u64,
    pub cgo_call_num: i64,
    // memory
    pub memory_alloc: u64,
    pub memory_total_alloc: u64,
    pub memory_sys: u64,
    pub memory_lookups: u64,
    pub memory_mallocs: u64,
    pub memory_frees: u64,
    // stack
    pub memory_stack: u64,
    // heap
    pub heap_alloc: u64,
    pub heap_sys: u64,
    pub heap_idle: u64,
    pub heap_inuse: u64,
    pub heap_released: u64,
    pub heap_objects: u64,
    // garbage collection
    pub gc_next: u64,
    pub gc_last: u64,
    pub gc_num: u32,
    pub gc_per_second: f64,
    pub gc_pause_per_second: f64,
    pub gc_pause: Vec<f64>,
}
