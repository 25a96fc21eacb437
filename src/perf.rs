use std::fmt;
use std::str::FromStr;

use crate::error::ChartError;

/// The concurrency-control technique a measurement was taken with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Strategy {
    SingleLock,
    OptimisticSync,
    LockFree,
}

impl Strategy {
    /// Every strategy, in the order lines are drawn and listed in legends.
    pub const ALL: [Strategy; 3] = [
        Strategy::SingleLock,
        Strategy::OptimisticSync,
        Strategy::LockFree,
    ];

    /// Position in `Strategy::ALL`.
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::SingleLock => "Single Lock",
            Strategy::OptimisticSync => "Optimistic Synchronization",
            Strategy::LockFree => "Lock-Free Synchronization",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read/write ratio a benchmark was run with, in percent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Mix {
    /// The percentage of operations that are lookups.
    pub read: u8,
    /// The percentage of operations that are inserts.
    pub write: u8,
}

impl Mix {
    pub fn new(read: u8, write: u8) -> Result<Self, ChartError> {
        if u16::from(read) + u16::from(write) != 100 {
            return Err(ChartError::InvalidMix(format!("{}/{}", read, write)));
        }
        Ok(Self { read, write })
    }

    /// Even split between lookups and inserts.
    pub const fn read_50() -> Self {
        Self { read: 50, write: 50 }
    }

    /// Read-heavy workload.
    pub const fn read_80() -> Self {
        Self { read: 80, write: 20 }
    }

    /// Write-heavy workload.
    pub const fn read_20() -> Self {
        Self { read: 20, write: 80 }
    }
}

impl fmt::Display for Mix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.read, self.write)
    }
}

impl FromStr for Mix {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ChartError::InvalidMix(s.to_string());
        let (read, write) = s.trim().split_once('/').ok_or_else(invalid)?;
        let read = read.trim().parse::<u8>().map_err(|_| invalid())?;
        let write = write.trim().parse::<u8>().map_err(|_| invalid())?;
        Mix::new(read, write).map_err(|_| invalid())
    }
}

/// One strategy's results under one workload mix.
///
/// Thread counts are strictly increasing and index-aligned with the
/// throughput (ops/sec) and latency (ms/op) columns. A series never changes
/// after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct MeasurementSeries {
    strategy: Strategy,
    mix: Mix,
    thread_counts: Vec<u32>,
    throughput: Vec<f64>,
    latency: Vec<f64>,
}

impl MeasurementSeries {
    pub fn new(
        strategy: Strategy,
        mix: Mix,
        thread_counts: Vec<u32>,
        throughput: Vec<f64>,
        latency: Vec<f64>,
    ) -> Result<Self, ChartError> {
        let invalid = |reason: String| ChartError::InvalidSeries {
            strategy,
            mix,
            reason,
        };

        if thread_counts.len() != throughput.len() || thread_counts.len() != latency.len() {
            return Err(invalid(format!(
                "column lengths differ (threads {}, throughput {}, latency {})",
                thread_counts.len(),
                throughput.len(),
                latency.len()
            )));
        }

        if thread_counts.first() == Some(&0) {
            return Err(invalid("thread counts must be positive".to_string()));
        }

        if let Some(pair) = thread_counts.windows(2).find(|w| w[0] >= w[1]) {
            return Err(invalid(format!(
                "thread counts must be strictly increasing ({} then {})",
                pair[0], pair[1]
            )));
        }

        let bad_value = |v: &f64| !v.is_finite() || *v < 0.0;
        if let Some(v) = throughput.iter().find(|v| bad_value(v)) {
            return Err(invalid(format!("throughput {} is not a non-negative number", v)));
        }
        if let Some(v) = latency.iter().find(|v| bad_value(v)) {
            return Err(invalid(format!("latency {} is not a non-negative number", v)));
        }

        Ok(Self {
            strategy,
            mix,
            thread_counts,
            throughput,
            latency,
        })
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn mix(&self) -> Mix {
        self.mix
    }

    pub fn thread_counts(&self) -> &[u32] {
        &self.thread_counts
    }

    pub fn throughput(&self) -> &[f64] {
        &self.throughput
    }

    pub fn latency(&self) -> &[f64] {
        &self.latency
    }

    pub fn len(&self) -> usize {
        self.thread_counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thread_counts.is_empty()
    }
}
