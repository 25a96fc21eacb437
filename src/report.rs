use tracing::debug;

use crate::chart::{ChartSpec, ComparativeChartRenderer, Figure};
use crate::dataset::ResultDataset;
use crate::error::ChartError;
use crate::perf::Mix;
use crate::plot::FigureSink;

/// Charts every strategy measured under `mix` and hands the figure to `sink`.
///
/// `present` adjusts titles and labels of the spec before rendering. The
/// sink is only reached once selection and rendering have both succeeded,
/// so a failure never leaves a partial chart behind.
pub fn chart_mix<F>(
    dataset: &ResultDataset,
    mix: Mix,
    renderer: &ComparativeChartRenderer,
    sink: &mut dyn FigureSink,
    present: F,
) -> Result<Figure, ChartError>
where
    F: FnOnce(ChartSpec) -> ChartSpec,
{
    let spec = present(ChartSpec::from_selection(mix, &dataset.select(mix)?)?);
    let figure = renderer.render(&spec)?;

    debug!(mix = %spec.mix(), "sending figure to sink");
    sink.display_or_save(&figure)?;
    Ok(figure)
}
