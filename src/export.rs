use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::chart::ChartSpec;
use crate::error::ChartError;

#[derive(Debug, Serialize)]
struct Row<'a> {
    strategy: &'a str,
    mix: String,
    threads: u32,
    throughput: f64,
    latency: f64,
}

/// Writes the charted numbers, one row per (strategy, thread count).
pub fn export_csv(path: &Path, spec: &ChartSpec) -> Result<usize, ChartError> {
    let mut writer = csv::Writer::from_path(path)?;
    let mut rows = 0;

    for series in spec.series() {
        let points = series
            .thread_counts()
            .iter()
            .zip(series.throughput())
            .zip(series.latency());

        for ((threads, throughput), latency) in points {
            writer.serialize(Row {
                strategy: series.strategy().name(),
                mix: series.mix().to_string(),
                threads: *threads,
                throughput: *throughput,
                latency: *latency,
            })?;
            rows += 1;
        }
    }

    writer.flush()?;
    info!(path = %path.display(), rows, "exported series");
    Ok(rows)
}
