// CPU metric collection for a single instance.
//
// Failure policy: fail soft. A metric outage on one instance must not abort
// the fleet scan, so any error here is logged and becomes an empty series.
// This is the opposite of the listing policy in fleet.rs.

use chrono::{DateTime, Duration, Timelike, Utc};
use tracing::warn;

use crate::cloud::MetricsApi;
use crate::models::MetricSeries;

/// Rounds `now` down to the nearest period boundary: the minute is truncated
/// to a multiple of `period_secs / 60` and seconds are zeroed.
pub fn align_window_end(now: DateTime<Utc>, period_secs: u32) -> DateTime<Utc> {
    let step = (period_secs / 60).max(1);
    let minute = now.minute() - now.minute() % step;
    now.with_minute(minute)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(now)
}

/// Fetches the aligned `[now - lookback_days, now]` series for one instance.
/// Never returns an error: failures yield `MetricSeries::empty()`.
pub async fn collect_cpu_stats(
    metrics: &dyn MetricsApi,
    instance_id: &str,
    lookback_days: u32,
    period_secs: u32,
) -> MetricSeries {
    let end = align_window_end(Utc::now(), period_secs);
    let start = end - Duration::days(i64::from(lookback_days));

    match metrics
        .cpu_utilization(instance_id, start, end, period_secs)
        .await
    {
        Ok(series) => series,
        Err(e) => {
            warn!(error = %e, instance_id, "CPU stats fetch failed, recording empty series");
            MetricSeries::empty()
        }
    }
}
