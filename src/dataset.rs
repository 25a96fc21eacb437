use std::collections::BTreeMap;

use tracing::debug;

use crate::error::ChartError;
use crate::perf::{MeasurementSeries, Mix, Strategy};

/// Benchmark results keyed by (strategy, mix), at most one series per key.
///
/// Filled once through `register`, then only read.
#[derive(Debug, Default)]
pub struct ResultDataset {
    series: BTreeMap<(Strategy, Mix), MeasurementSeries>,
}

impl ResultDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, series: MeasurementSeries) -> Result<(), ChartError> {
        let key = (series.strategy(), series.mix());
        if self.series.contains_key(&key) {
            return Err(ChartError::DuplicateSeries {
                strategy: key.0,
                mix: key.1,
            });
        }

        debug!(strategy = %key.0, mix = %key.1, points = series.len(), "registered series");
        self.series.insert(key, series);
        Ok(())
    }

    /// Returns one series per strategy for `mix`, ordered as `Strategy::ALL`.
    pub fn select(&self, mix: Mix) -> Result<Vec<&MeasurementSeries>, ChartError> {
        let mut selected = Vec::with_capacity(Strategy::ALL.len());
        let mut missing = Vec::new();

        for strategy in Strategy::ALL {
            match self.series.get(&(strategy, mix)) {
                Some(series) => selected.push(series),
                None => missing.push(strategy),
            }
        }

        if !missing.is_empty() {
            return Err(ChartError::MissingSeries { mix, missing });
        }

        Ok(selected)
    }

    /// Every mix that has at least one registered series, ascending.
    pub fn mixes(&self) -> Vec<Mix> {
        let mut mixes: Vec<Mix> = self.series.keys().map(|(_, mix)| *mix).collect();
        mixes.sort();
        mixes.dedup();
        mixes
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }
}
