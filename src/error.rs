use thiserror::Error;

use crate::perf::{Mix, Strategy};

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("a {strategy} series for mix {mix} is already registered")]
    DuplicateSeries { strategy: Strategy, mix: Mix },

    #[error("mix {mix} has no series for: {}", strategy_names(.missing))]
    MissingSeries { mix: Mix, missing: Vec<Strategy> },

    #[error("series cannot be compared: {0}")]
    IncomparableSeries(String),

    #[error("{strategy} series for mix {mix} has no data points")]
    EmptySeries { strategy: Strategy, mix: Mix },

    #[error("invalid {strategy} series for mix {mix}: {reason}")]
    InvalidSeries {
        strategy: Strategy,
        mix: Mix,
        reason: String,
    },

    #[error("invalid workload mix '{0}', expected <read>/<write> summing to 100")]
    InvalidMix(String),

    #[error("rendering backend failed: {0}")]
    Backend(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn strategy_names(strategies: &[Strategy]) -> String {
    strategies
        .iter()
        .map(|s| s.name())
        .collect::<Vec<_>>()
        .join(", ")
}
