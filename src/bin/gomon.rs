//! gomon - terminal dashboard for Go runtime stats.
//!
//! Polls the stats endpoint of a Go process (the `golang-stats-api-handler`
//! format) and renders the accumulated series as a live TUI.
//!
//! Usage:
//!   gomon                                 # default endpoint, 2s interval
//!   gomon http://svc:8080/api/stats       # custom endpoint
//!   gomon -i 5                            # poll every 5 seconds
//!   gomon -d                              # log requests/responses to stderr

use tikv_jemallocator::Jemalloc;
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::time::Duration;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use gomon::client::{Config, DEFAULT_ENDPOINT, StatsClient};
use gomon::stats::StatsHistory;
use gomon::tui::App;

/// Terminal dashboard for Go runtime stats.
#[derive(Parser)]
#[command(name = "gomon", about = "Terminal dashboard for Go runtime stats")]
struct Args {
    /// Stats endpoint URL.
    #[arg(value_name = "ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Poll interval in seconds.
    #[arg(short, long, value_name = "SECS", default_value_t = 2)]
    interval: u64,

    /// Request timeout in seconds.
    #[arg(short, long, value_name = "SECS", default_value_t = 5)]
    timeout: u64,

    /// Consecutive poll failures tolerated before the dashboard halts.
    #[arg(long, value_name = "N", default_value_t = 5)]
    failure_budget: u32,

    /// Log outgoing requests and decoded responses.
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(args.debug);

    if args.interval == 0 {
        eprintln!("Error: interval must be at least 1 second");
        std::process::exit(1);
    }
    if args.failure_budget == 0 {
        eprintln!("Error: failure budget must be at least 1");
        std::process::exit(1);
    }

    let config = Config {
        endpoint: args.endpoint.clone(),
        debug: args.debug,
        timeout: Duration::from_secs(args.timeout),
    };
    let client = match StatsClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // First sample before the terminal is taken over; a dead endpoint
    // aborts startup.
    let history = StatsHistory::new(client);
    if let Err(e) = history.append() {
        eprintln!("Error: {}", e);
        eprintln!("Is the stats endpoint reachable at {}?", args.endpoint);
        std::process::exit(1);
    }

    let app = App::new(history, args.failure_budget);
    if let Err(e) = app.run(Duration::from_secs(args.interval)) {
        eprintln!("Error running TUI: {}", e);
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber. The TUI owns stdout, so logs go to
/// stderr; without -d only errors pass the filter.
fn init_logging(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::ERROR };

    let filter = EnvFilter::from_default_env()
        .add_directive(format!("gomon={}", level).parse().unwrap());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
