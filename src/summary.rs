// Renders the analyzer's summary as text sections. Pure (no printing) so
// tests can assert on the output; main prints the returned string.
//
// Every section is keyed off the summary object and silently skipped when
// its key is absent. Column widths and the wrap-every-4 layout follow the
// original tool.

use std::fmt::Write;

use serde_json::Value;

use crate::models::SummaryResult;

const STAT_COLUMNS: [&str; 6] = ["Min", "Max", "Mean", "<=5%", "<=10%", "<=30%"];

/// Renders all present sections under the `Summary` key, in order.
/// Returns `None` when the result carries no `Summary` at all.
pub fn render_summary(result: &SummaryResult) -> Option<String> {
    let summary = result.get("Summary")?;
    let mut out = String::new();

    for metric in ["Average", "Maximum"] {
        render_cpu_section(&mut out, summary, metric);
    }
    render_distribution(&mut out, summary, "InstanceTypes", "Distribution of Instance Types");
    render_distribution(&mut out, summary, "Regions", "Distribution of Regions");
    render_efficiency(&mut out, summary);
    render_under_utilized(&mut out, summary);

    Some(out)
}

fn render_cpu_section(out: &mut String, summary: &Value, metric: &str) {
    let Some(section) = summary.get(metric) else {
        return;
    };

    let _ = writeln!(out, "\n{0}{metric} CPU Utilization{0}", "-".repeat(35));
    let _ = writeln!(out, "{:^52}|{:^40}", "Distribution", "Summary");

    let mut buckets = String::from("CPU%     : ");
    let mut counts = String::from("Instances: ");
    if let Some(histogram) = section.get("Histogram").and_then(Value::as_array) {
        for pair in histogram {
            let bucket = pair.get(0).map(scalar_to_string).unwrap_or_default();
            let count = pair.get(1).map(scalar_to_string).unwrap_or_default();
            let _ = write!(buckets, "{bucket:<4}");
            let _ = write!(counts, "{count:<4}");
        }
    }
    buckets.push_str(" | ");
    counts.push_str(" | ");
    for stat in STAT_COLUMNS {
        let value = section.get(stat).map(scalar_to_string).unwrap_or_default();
        let _ = write!(buckets, "{stat:<7}");
        let _ = write!(counts, "{value:<7}");
    }

    let _ = writeln!(out, "{buckets}");
    let _ = writeln!(out, "{counts}");
}

/// InstanceTypes/Regions: pairs of (label, count), highest count first,
/// four entries per line.
fn render_distribution(out: &mut String, summary: &Value, key: &str, title: &str) {
    let Some(entries) = summary.get(key).and_then(Value::as_array) else {
        return;
    };

    let _ = writeln!(out, "\n{0}{title}{0}", "-".repeat(32));

    let mut pairs: Vec<(String, i64)> = entries
        .iter()
        .filter_map(|pair| {
            Some((
                pair.get(0).map(scalar_to_string)?,
                pair.get(1).and_then(Value::as_i64)?,
            ))
        })
        .collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1));

    for chunk in pairs.chunks(4) {
        let line: Vec<String> = chunk
            .iter()
            .map(|(label, count)| format!("{label:<10}:{count:>4}"))
            .collect();
        let _ = writeln!(out, "{}", line.join(" | "));
    }
}

fn render_efficiency(out: &mut String, summary: &Value) {
    let Some(efficiency) = summary.get("Efficiency") else {
        return;
    };

    let cost_level = efficiency
        .get("CostLevel")
        .map(scalar_to_string)
        .unwrap_or_default();
    let _ = writeln!(
        out,
        "\n{0}   Efficiency Compared to Users with Monthly Spending Around ${cost_level:<10}{0}",
        "-".repeat(11)
    );

    let mut rows: Vec<(&str, i64)> = [
        ("Average", "Average"),
        ("Efficient Users", "Efficient"),
        ("Your Efficiency", "Efficiency"),
    ]
    .iter()
    .filter_map(|(label, key)| Some((*label, efficiency.get(*key).and_then(Value::as_i64)?)))
    .collect();
    rows.sort_by_key(|r| r.1);

    let line: Vec<String> = rows
        .iter()
        .map(|(label, value)| format!("{label:<20}:{value:>8}"))
        .collect();
    let _ = writeln!(out, "{}", line.join(" | "));
}

/// One instance per line; the header echoes the thresholds the analyzer
/// applied.
fn render_under_utilized(out: &mut String, summary: &Value) {
    let Some(entries) = summary.get("UnderUtilized").and_then(Value::as_array) else {
        return;
    };

    let avg = summary
        .pointer("/Threshold/Avg")
        .map(scalar_to_string)
        .unwrap_or_default();
    let max = summary
        .pointer("/Threshold/Max")
        .map(scalar_to_string)
        .unwrap_or_default();
    let _ = writeln!(
        out,
        "\n{0}Under-Utilized Instances: Avg<={avg}%, Max<={max}%{0}",
        "-".repeat(25)
    );

    for pair in entries {
        let instance_id = pair.get(0).map(scalar_to_string).unwrap_or_default();
        let instance_type = pair.get(1).map(scalar_to_string).unwrap_or_default();
        let _ = writeln!(out, "{instance_id:<20}:{instance_type:<10}");
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
