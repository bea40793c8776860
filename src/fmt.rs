//! Shared formatting helpers for dashboard widgets.
//!
//! Pure functions only; no ratatui styles or layout here.

/// Format byte count as a compact human-readable size: `"1.5G"`, `"100.3M"`,
/// `"50.0K"`, `"512B"`.
pub fn format_bytes(bytes: u64) -> String {
    const GB: u64 = 1024 * 1024 * 1024;
    const MB: u64 = 1024 * 1024;
    const KB: u64 = 1024;

    if bytes >= GB {
        format!("{:.1}G", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1}M", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1}K", bytes as f64 / KB as f64)
    } else {
        format!("{}B", bytes)
    }
}

/// Narrows a byte-count series to whole mebibytes for bar-chart display.
///
/// Lossy: values truncate to the MiB below, and anything under 1 MiB
/// displays as zero. Chart-only; callers needing exact values must use
/// the store projections directly.
pub fn bytes_to_mib(series: &[u64]) -> Vec<u64> {
    series.iter().map(|b| b / (1024 * 1024)).collect()
}
