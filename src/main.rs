use std::error::Error;
use std::path::{Path, PathBuf};
use std::process;

use structopt::StructOpt;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::chart::{ChartSpec, ComparativeChartRenderer};
use crate::dataset::ResultDataset;
use crate::perf::Mix;
use crate::plot::FileSink;

mod chart;
mod dataset;
mod error;
mod export;
mod perf;
mod perf_data;
mod plot;
mod report;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "cmset-plot",
    about = "Plots throughput and latency of the concurrent multiset strategies"
)]
struct Opt {
    /// Read/write workload mix to chart, e.g. 80/20
    #[structopt(short, long, default_value = "50/50")]
    mix: Mix,

    /// Chart every workload mix in the dataset
    #[structopt(long)]
    all: bool,

    /// Output image (.svg or .png); a directory when --all is given
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Also write the charted numbers to this CSV file; a directory when --all is given
    #[structopt(long, parse(from_os_str))]
    csv: Option<PathBuf>,

    /// Figure title, `{mix}` is replaced with the workload mix
    #[structopt(long)]
    title: Option<String>,

    #[structopt(long)]
    x_label: Option<String>,

    #[structopt(long)]
    throughput_label: Option<String>,

    #[structopt(long)]
    latency_label: Option<String>,

    #[structopt(long, default_value = "1400")]
    width: u32,

    #[structopt(long, default_value = "800")]
    height: u32,

    /// List the workload mixes available and exit
    #[structopt(long)]
    list: bool,
}

fn default_file_name(mix: Mix) -> String {
    format!("throughput-latency-{}-{}.svg", mix.read, mix.write)
}

fn csv_file_name(mix: Mix) -> String {
    format!("throughput-latency-{}-{}.csv", mix.read, mix.write)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let opt = Opt::from_args();

    if let Err(e) = run(&opt) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(opt: &Opt) -> Result<(), Box<dyn Error>> {
    let dataset = perf_data::report_dataset()?;
    info!(series = dataset.len(), "loaded measurements");

    if opt.list {
        for mix in dataset.mixes() {
            println!("{}", mix);
        }
        return Ok(());
    }

    let renderer = ComparativeChartRenderer::new();

    if opt.all {
        let dir = opt.output.clone().unwrap_or_else(|| PathBuf::from("."));
        std::fs::create_dir_all(&dir)?;
        if let Some(csv_dir) = &opt.csv {
            std::fs::create_dir_all(csv_dir)?;
        }
        for mix in dataset.mixes() {
            let path = dir.join(default_file_name(mix));
            let csv = opt.csv.as_ref().map(|d| d.join(csv_file_name(mix)));
            chart_one(opt, &dataset, &renderer, mix, &path, csv.as_deref())?;
        }
        return Ok(());
    }

    let path = opt
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(default_file_name(opt.mix)));
    chart_one(opt, &dataset, &renderer, opt.mix, &path, opt.csv.as_deref())
}

fn present(opt: &Opt, mut spec: ChartSpec) -> ChartSpec {
    if let Some(title) = &opt.title {
        spec = spec.with_title_template(title.as_str());
    }
    if let Some(label) = &opt.x_label {
        spec = spec.with_x_label(label.as_str());
    }
    if let Some(label) = &opt.throughput_label {
        spec = spec.with_throughput_label(label.as_str());
    }
    if let Some(label) = &opt.latency_label {
        spec = spec.with_latency_label(label.as_str());
    }
    spec
}

fn chart_one(
    opt: &Opt,
    dataset: &ResultDataset,
    renderer: &ComparativeChartRenderer,
    mix: Mix,
    path: &Path,
    csv: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let mut sink = FileSink::new(path).with_size(opt.width, opt.height);
    let figure = report::chart_mix(dataset, mix, renderer, &mut sink, |spec| present(opt, spec))?;
    info!(
        mix = %figure.mix,
        panels = figure.panels.len(),
        path = %sink.path().display(),
        "chart complete"
    );

    if let Some(csv) = csv {
        let spec = ChartSpec::from_selection(mix, &dataset.select(mix)?)?;
        export::export_csv(csv, &spec)?;
    }

    Ok(())
}
