// Non-negative per-second rate over a time-ordered counter series.

/// Rate between each pair of consecutive samples, in units per second.
/// `samples` are `(timestamp_ms, value)` ascending by time. A drop in the counter
/// (reset, interface restart) yields 0 for that step; pairs with no elapsed time are skipped.
pub fn non_negative_rates(samples: &[(i64, f64)]) -> Vec<(i64, f64)> {
    samples
        .windows(2)
        .filter_map(|pair| {
            let (t0, v0) = pair[0];
            let (t1, v1) = pair[1];
            let elapsed_secs = (t1 - t0) as f64 / 1000.0;
            if elapsed_secs <= 0.0 {
                return None;
            }
            Some((t1, ((v1 - v0) / elapsed_secs).max(0.0)))
        })
        .collect()
}

/// Most recent rate, or None with fewer than two usable samples.
pub fn latest_rate(samples: &[(i64, f64)]) -> Option<f64> {
    non_negative_rates(samples).last().map(|&(_, rate)| rate)
}
