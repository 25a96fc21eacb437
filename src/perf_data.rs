use crate::dataset::ResultDataset;
use crate::error::ChartError;
use crate::perf::{MeasurementSeries, Mix, Strategy};

/// A measured series as it came out of the benchmark runs.
pub struct RawSeries {
    pub strategy: Strategy,
    pub mix: Mix,
    pub threads: &'static [u32],
    pub throughput: &'static [f64],
    pub latency: &'static [f64],
}

const THREADS: &[u32] = &[2, 10, 20, 30, 40, 50, 60, 70];

pub static REPORT_DATA: [RawSeries; 9] = [
    RawSeries {
        strategy: Strategy::SingleLock,
        mix: Mix::read_50(),
        threads: THREADS,
        throughput: &[
            331436.0, 347713.0, 344217.0, 345192.0, 338710.0, 339758.0, 339349.0, 338997.0,
        ],
        latency: &[
            0.000786177, 0.00396647, 0.00805666, 0.0120796, 0.0164337, 0.020467, 0.0245776,
            0.0286201,
        ],
    },
    RawSeries {
        strategy: Strategy::OptimisticSync,
        mix: Mix::read_50(),
        threads: THREADS,
        throughput: &[
            260006.0, 548819.0, 795504.0, 789245.0, 788527.0, 783027.0, 766889.0, 774173.0,
        ],
        latency: &[
            0.00101739, 0.00247372, 0.00341029, 0.00496758, 0.00652125, 0.00796424, 0.00744981,
            0.00687366,
        ],
    },
    RawSeries {
        strategy: Strategy::LockFree,
        mix: Mix::read_50(),
        threads: THREADS,
        throughput: &[
            646013.0, 2006330.0, 2592890.0, 2721310.0, 2571700.0, 2754920.0, 2701540.0, 2808740.0,
        ],
        latency: &[
            0.000372885, 0.000590152, 0.000830036, 0.00105262, 0.00117439, 0.00107173, 0.000853811,
            0.000757914,
        ],
    },
    RawSeries {
        strategy: Strategy::SingleLock,
        mix: Mix::read_80(),
        threads: THREADS,
        throughput: &[
            335974.0, 338260.0, 339388.0, 333141.0, 326897.0, 333365.0, 325419.0, 329048.0,
        ],
        latency: &[
            0.000773757, 0.00408503, 0.00820168, 0.0125504, 0.0170249, 0.0208938, 0.025648,
            0.0296864,
        ],
    },
    RawSeries {
        strategy: Strategy::OptimisticSync,
        mix: Mix::read_80(),
        threads: THREADS,
        throughput: &[
            254482.0, 563896.0, 812786.0, 794761.0, 811085.0, 789060.0, 770529.0, 781395.0,
        ],
        latency: &[
            0.00103923, 0.00240075, 0.00335057, 0.00491237, 0.00649947, 0.00801486, 0.007463,
            0.00810371,
        ],
    },
    RawSeries {
        strategy: Strategy::LockFree,
        mix: Mix::read_80(),
        threads: THREADS,
        throughput: &[
            654742.0, 2019250.0, 2634610.0, 2682080.0, 2670350.0, 2782910.0, 2804840.0, 2778370.0,
        ],
        latency: &[
            0.000366858, 0.000585253, 0.000821671, 0.00106829, 0.00102317, 0.00107091, 0.000853744,
            0.000847854,
        ],
    },
    RawSeries {
        strategy: Strategy::SingleLock,
        mix: Mix::read_20(),
        threads: THREADS,
        throughput: &[
            335321.0, 341667.0, 331407.0, 336574.0, 333794.0, 336320.0, 335391.0, 335551.0,
        ],
        latency: &[
            0.000774452, 0.00401965, 0.00837063, 0.0123725, 0.0166623, 0.0206648, 0.0248609,
            0.0289662,
        ],
    },
    RawSeries {
        strategy: Strategy::OptimisticSync,
        mix: Mix::read_20(),
        threads: THREADS,
        throughput: &[
            224370.0, 511954.0, 729529.0, 728610.0, 735686.0, 723162.0, 708026.0, 711350.0,
        ],
        latency: &[
            0.00118987, 0.00264163, 0.00371172, 0.00541072, 0.00730744, 0.00857769, 0.00859281,
            0.00915816,
        ],
    },
    RawSeries {
        strategy: Strategy::LockFree,
        mix: Mix::read_20(),
        threads: THREADS,
        throughput: &[
            626011.0, 2064700.0, 2623590.0, 2845710.0, 2629140.0, 2792570.0, 2746190.0, 2713580.0,
        ],
        latency: &[
            0.000378341, 0.000584939, 0.000813189, 0.00116064, 0.000950099, 0.000958218,
            0.000840077, 0.000960329,
        ],
    },
];

impl RawSeries {
    pub fn to_series(&self) -> Result<MeasurementSeries, ChartError> {
        MeasurementSeries::new(
            self.strategy,
            self.mix,
            self.threads.to_vec(),
            self.throughput.to_vec(),
            self.latency.to_vec(),
        )
    }
}

/// Loads every bundled measurement into a fresh dataset.
pub fn report_dataset() -> Result<ResultDataset, ChartError> {
    let mut dataset = ResultDataset::new();
    for raw in REPORT_DATA.iter() {
        dataset.register(raw.to_series()?)?;
    }
    Ok(dataset)
}
