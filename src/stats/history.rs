//! Append-only time series of stats snapshots.
//!
//! One entry per successful fetch, per metric, aligned by index: entry `i`
//! of every series came from the same snapshot. Nothing is ever reordered
//! or pruned.

use std::sync::Mutex;

use crate::client::ClientError;

use super::source::StatsSource;
use super::Stats;

/// Identity of the monitored process, mirrored from the latest snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuntimeInfo {
    pub go_version: String,
    pub go_os: String,
    pub go_arch: String,
    pub cpu_num: u32,
    pub gomaxprocs: u32,
}

/// Integer-valued metrics tracked per snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterMetric {
    GoroutineNum,
    MemoryAlloc,
    MemoryTotalAlloc,
    MemorySys,
    MemoryLookups,
    MemoryMallocs,
    MemoryFrees,
    MemoryStack,
    HeapAlloc,
    GcNum,
}

/// Rate-valued metrics tracked per snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RateMetric {
    GcPerSecond,
    GcPausePerSecond,
}

/// Error type for history mutation.
#[derive(Debug)]
pub enum HistoryError {
    /// The underlying fetch failed; nothing was appended.
    Append(ClientError),
}

impl std::fmt::Display for HistoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryError::Append(e) => write!(f, "append failed: {}", e),
        }
    }
}

impl std::error::Error for HistoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HistoryError::Append(e) => Some(e),
        }
    }
}

#[derive(Default)]
struct Series {
    goroutine_num: Vec<u64>,
    memory_alloc: Vec<u64>,
    memory_total_alloc: Vec<u64>,
    memory_sys: Vec<u64>,
    memory_lookups: Vec<u64>,
    memory_mallocs: Vec<u64>,
    memory_frees: Vec<u64>,
    memory_stack: Vec<u64>,
    heap_alloc: Vec<u64>,
    gc_num: Vec<u64>,
    gc_per_second: Vec<f64>,
    gc_pause_per_second: Vec<f64>,
}

#[derive(Default)]
struct Inner {
    runtime: RuntimeInfo,
    snapshots: Vec<Stats>,
    series: Series,
}

/// Append-only, per-metric history of stats snapshots.
///
/// All mutation happens under one lock held for the duration of the
/// fetch-plus-append, so concurrent appends queue rather than race.
/// Readers get copies and release the lock before any rendering happens.
pub struct StatsHistory<S> {
    source: S,
    inner: Mutex<Inner>,
}

impl<S: StatsSource> StatsHistory<S> {
    /// Creates an empty history bound to a source.
    pub fn new(source: S) -> Self {
        Self {
            source,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Fetches one snapshot and appends it to every tracked series.
    ///
    /// All-or-nothing: on fetch failure no series changes length and the
    /// identity fields keep their previous values. On success the identity
    /// fields are overwritten from the new snapshot.
    pub fn append(&self) -> Result<(), HistoryError> {
        let mut inner = self.inner.lock().unwrap();

        let stats = self.source.fetch().map_err(HistoryError::Append)?;

        inner.runtime = RuntimeInfo {
            go_version: stats.go_version.clone(),
            go_os: stats.go_os.clone(),
            go_arch: stats.go_arch.clone(),
            cpu_num: stats.cpu_num,
            gomaxprocs: stats.gomaxprocs,
        };

        let series = &mut inner.series;
        series.goroutine_num.push(stats.goroutine_num);
        series.memory_alloc.push(stats.memory_alloc);
        series.memory_total_alloc.push(stats.memory_total_alloc);
        series.memory_sys.push(stats.memory_sys);
        series.memory_lookups.push(stats.memory_lookups);
        series.memory_mallocs.push(stats.memory_mallocs);
        series.memory_frees.push(stats.memory_frees);
        series.memory_stack.push(stats.memory_stack);
        series.heap_alloc.push(stats.heap_alloc);
        // gc_num arrives as u32 on the wire; its series is u64.
        series.gc_num.push(u64::from(stats.gc_num));
        series.gc_per_second.push(stats.gc_per_second);
        series.gc_pause_per_second.push(stats.gc_pause_per_second);

        inner.snapshots.push(stats);
        Ok(())
    }
}

impl<S> StatsHistory<S> {
    /// Copy of one counter series, oldest first. Empty history yields an
    /// empty vec. Values are exact; any display narrowing happens at the
    /// presentation boundary.
    pub fn counters(&self, metric: CounterMetric) -> Vec<u64> {
        let inner = self.inner.lock().unwrap();
        let series = &inner.series;
        match metric {
            CounterMetric::GoroutineNum => series.goroutine_num.clone(),
            CounterMetric::MemoryAlloc => series.memory_alloc.clone(),
            CounterMetric::MemoryTotalAlloc => series.memory_total_alloc.clone(),
            CounterMetric::MemorySys => series.memory_sys.clone(),
            CounterMetric::MemoryLookups => series.memory_lookups.clone(),
            CounterMetric::MemoryMallocs => series.memory_mallocs.clone(),
            CounterMetric::MemoryFrees => series.memory_frees.clone(),
            CounterMetric::MemoryStack => series.memory_stack.clone(),
            CounterMetric::HeapAlloc => series.heap_alloc.clone(),
            CounterMetric::GcNum => series.gc_num.clone(),
        }
    }

    /// Copy of one rate series, oldest first.
    pub fn rates(&self, metric: RateMetric) -> Vec<f64> {
        let inner = self.inner.lock().unwrap();
        match metric {
            RateMetric::GcPerSecond => inner.series.gc_per_second.clone(),
            RateMetric::GcPausePerSecond => inner.series.gc_pause_per_second.clone(),
        }
    }

    /// Copy of the identity fields from the latest snapshot.
    pub fn runtime(&self) -> RuntimeInfo {
        self.inner.lock().unwrap().runtime.clone()
    }

    /// Number of snapshots appended so far.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the most recent snapshot, if any.
    pub fn latest(&self) -> Option<Stats> {
        self.inner.lock().unwrap().snapshots.last().cloned()
    }

    /// Recent GC pause durations from the latest snapshot.
    pub fn last_gc_pauses(&self) -> Vec<f64> {
        let inner = self.inner.lock().unwrap();
        inner
            .snapshots
            .last()
            .map(|s| s.gc_pause.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{Config, StatsClient};
    use crate::stats::source::mock::ScriptedSource;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    const ALL_COUNTERS: [CounterMetric; 10] = [
        CounterMetric::GoroutineNum,
        CounterMetric::MemoryAlloc,
        CounterMetric::MemoryTotalAlloc,
        CounterMetric::MemorySys,
        CounterMetric::MemoryLookups,
        CounterMetric::MemoryMallocs,
        CounterMetric::MemoryFrees,
        CounterMetric::MemoryStack,
        CounterMetric::HeapAlloc,
        CounterMetric::GcNum,
    ];

    fn sample(goroutines: u64, alloc: u64) -> Stats {
        Stats {
            time: 1,
            go_version: "go1.22.1".to_string(),
            go_os: "linux".to_string(),
            go_arch: "amd64".to_string(),
            cpu_num: 8,
            gomaxprocs: 8,
            goroutine_num: goroutines,
            memory_alloc: alloc,
            gc_num: 2,
            gc_per_second: 0.5,
            gc_pause_per_second: 0.001,
            gc_pause: vec![0.1, 0.2],
            ..Stats::default()
        }
    }

    fn status_error() -> ClientError {
        ClientError::UnexpectedStatus {
            status: 500,
            body: String::new(),
        }
    }

    #[test]
    fn empty_history_projects_empty_series() {
        let history = StatsHistory::new(ScriptedSource::new(vec![]));
        for metric in ALL_COUNTERS {
            assert!(history.counters(metric).is_empty());
        }
        assert!(history.rates(RateMetric::GcPerSecond).is_empty());
        assert!(history.last_gc_pauses().is_empty());
        assert!(history.is_empty());
        assert_eq!(history.latest(), None);
    }

    #[test]
    fn append_updates_every_series_and_identity() {
        let history = StatsHistory::new(ScriptedSource::new(vec![Ok(sample(5, 1000))]));
        history.append().unwrap();

        assert_eq!(history.counters(CounterMetric::GoroutineNum), vec![5]);
        assert_eq!(history.counters(CounterMetric::MemoryAlloc), vec![1000]);
        assert_eq!(history.counters(CounterMetric::GcNum), vec![2]);
        assert_eq!(history.rates(RateMetric::GcPerSecond), vec![0.5]);
        assert_eq!(history.last_gc_pauses(), vec![0.1, 0.2]);

        let runtime = history.runtime();
        assert_eq!(runtime.go_version, "go1.22.1");
        assert_eq!(runtime.go_os, "linux");
        assert_eq!(runtime.cpu_num, 8);
    }

    #[test]
    fn series_stay_aligned_across_appends() {
        let history = StatsHistory::new(ScriptedSource::new(vec![
            Ok(sample(5, 1000)),
            Ok(sample(7, 2000)),
            Ok(sample(6, 1500)),
        ]));
        for _ in 0..3 {
            history.append().unwrap();
        }

        assert_eq!(history.len(), 3);
        for metric in ALL_COUNTERS {
            assert_eq!(history.counters(metric).len(), 3, "{:?}", metric);
        }
        assert_eq!(history.rates(RateMetric::GcPerSecond).len(), 3);
        assert_eq!(history.rates(RateMetric::GcPausePerSecond).len(), 3);
        assert_eq!(history.counters(CounterMetric::GoroutineNum), vec![5, 7, 6]);
        assert_eq!(
            history.counters(CounterMetric::MemoryAlloc),
            vec![1000, 2000, 1500]
        );
    }

    #[test]
    fn failed_append_mutates_nothing() {
        let history = StatsHistory::new(ScriptedSource::new(vec![
            Ok(sample(5, 1000)),
            Err(status_error()),
        ]));
        history.append().unwrap();

        let err = history.append().unwrap_err();
        assert!(matches!(
            err,
            HistoryError::Append(ClientError::UnexpectedStatus { status: 500, .. })
        ));
        assert!(err.to_string().starts_with("append failed: "));

        assert_eq!(history.len(), 1);
        for metric in ALL_COUNTERS {
            assert_eq!(history.counters(metric).len(), 1, "{:?}", metric);
        }
        // Identity from the one successful append survives.
        assert_eq!(history.runtime().go_version, "go1.22.1");
    }

    #[test]
    fn concurrent_appends_never_interleave() {
        let script: Vec<_> = (0..20).map(|i| Ok(sample(i, i * 100))).collect();
        let history = Arc::new(StatsHistory::new(ScriptedSource::new(script)));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let history = Arc::clone(&history);
                thread::spawn(move || {
                    for _ in 0..5 {
                        history.append().unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(history.len(), 20);
        for metric in ALL_COUNTERS {
            assert_eq!(history.counters(metric).len(), 20, "{:?}", metric);
        }
        assert_eq!(history.rates(RateMetric::GcPerSecond).len(), 20);
    }

    #[test]
    fn transport_failure_after_first_append_keeps_length_one() {
        // First connection gets a good response; the second is closed
        // without an answer, which the client reports as a transport error.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let body = r#"{"time":1,"goroutine_num":5,"memory_alloc":1000}"#;
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(response.as_bytes());
            }
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf);
                // Drop without responding.
            }
        });

        let client = StatsClient::new(Config {
            endpoint: format!("http://{}", addr),
            debug: false,
            timeout: Duration::from_secs(2),
        })
        .unwrap();
        let history = StatsHistory::new(client);

        history.append().unwrap();
        assert_eq!(history.len(), 1);

        let err = history.append().unwrap_err();
        assert!(matches!(
            err,
            HistoryError::Append(ClientError::Transport(_))
        ));
        assert_eq!(history.len(), 1);
        assert_eq!(history.counters(CounterMetric::GoroutineNum), vec![5]);
        assert_eq!(history.counters(CounterMetric::MemoryAlloc), vec![1000]);
    }
}
