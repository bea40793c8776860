//! Source seam between the HTTP client and the time-series history.

use crate::client::ClientError;

use super::Stats;

/// Anything that can produce one stats snapshot per call.
///
/// [`crate::client::StatsClient`] is the production implementation; tests
/// substitute a scripted source so history behavior can be exercised
/// without a live endpoint.
pub trait StatsSource {
    /// Fetches one snapshot.
    fn fetch(&self) -> Result<Stats, ClientError>;
}
