use tracing::debug;

use crate::error::ChartError;
use crate::perf::{MeasurementSeries, Mix, Strategy};

pub const THROUGHPUT_TITLE: &str = "Throughput vs. Number of Threads";
pub const LATENCY_TITLE: &str = "Latency vs. Number of Threads";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Square,
    Triangle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Clone, Debug, PartialEq)]
pub struct StrategyStyle {
    pub marker: Marker,
    pub color: Rgb,
    pub label: String,
}

/// The fixed look of each strategy's line.
pub fn style_for(strategy: Strategy) -> StrategyStyle {
    let (marker, color) = match strategy {
        Strategy::SingleLock => (Marker::Circle, Rgb(214, 39, 40)),
        Strategy::OptimisticSync => (Marker::Square, Rgb(31, 119, 180)),
        Strategy::LockFree => (Marker::Triangle, Rgb(44, 160, 44)),
    };
    StrategyStyle {
        marker,
        color,
        label: strategy.name().to_string(),
    }
}

/// A request to chart the three strategies under one mix.
#[derive(Clone, Debug)]
pub struct ChartSpec {
    mix: Mix,
    series: Vec<MeasurementSeries>,
    title_template: String,
    x_label: String,
    throughput_label: String,
    latency_label: String,
}

impl ChartSpec {
    /// Takes one series per strategy, all measured under `mix`.
    pub fn new(mix: Mix, mut series: Vec<MeasurementSeries>) -> Result<Self, ChartError> {
        if let Some(other) = series.iter().find(|s| s.mix() != mix) {
            return Err(ChartError::IncomparableSeries(format!(
                "{} was measured under mix {} but the chart is for {}",
                other.strategy(),
                other.mix(),
                mix
            )));
        }

        series.sort_by_key(|s| s.strategy());
        if let Some(pair) = series.windows(2).find(|w| w[0].strategy() == w[1].strategy()) {
            return Err(ChartError::DuplicateSeries {
                strategy: pair[0].strategy(),
                mix,
            });
        }

        let missing: Vec<Strategy> = Strategy::ALL
            .into_iter()
            .filter(|strategy| !series.iter().any(|s| s.strategy() == *strategy))
            .collect();
        if !missing.is_empty() {
            return Err(ChartError::MissingSeries { mix, missing });
        }

        Ok(Self {
            mix,
            series,
            title_template: "Concurrent multiset ({mix} read/write)".to_string(),
            x_label: "Number of Threads".to_string(),
            throughput_label: "Throughput (ops/sec)".to_string(),
            latency_label: "Average Latency (ms/op)".to_string(),
        })
    }

    /// Builds a spec straight from a dataset selection.
    pub fn from_selection(mix: Mix, selected: &[&MeasurementSeries]) -> Result<Self, ChartError> {
        Self::new(mix, selected.iter().map(|s| (*s).clone()).collect())
    }

    /// `{mix}` in the template is replaced with the workload mix.
    pub fn with_title_template(mut self, template: impl Into<String>) -> Self {
        self.title_template = template.into();
        self
    }

    pub fn with_x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = label.into();
        self
    }

    pub fn with_throughput_label(mut self, label: impl Into<String>) -> Self {
        self.throughput_label = label.into();
        self
    }

    pub fn with_latency_label(mut self, label: impl Into<String>) -> Self {
        self.latency_label = label.into();
        self
    }

    pub fn mix(&self) -> Mix {
        self.mix
    }

    pub fn series(&self) -> &[MeasurementSeries] {
        &self.series
    }

    pub fn title(&self) -> String {
        self.title_template.replace("{mix}", &self.mix.to_string())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelKind {
    Throughput,
    Latency,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    pub strategy: Strategy,
    pub style: StrategyStyle,
    pub points: Vec<(u32, f64)>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Panel {
    pub kind: PanelKind,
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub grid: bool,
    pub legend: bool,
    pub lines: Vec<Line>,
}

impl Panel {
    pub fn x_max(&self) -> u32 {
        self.points().map(|(x, _)| x).max().unwrap_or(0)
    }

    pub fn y_max(&self) -> f64 {
        self.points().map(|(_, y)| y).fold(0.0, f64::max)
    }

    fn points(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.lines.iter().flat_map(|l| l.points.iter().copied())
    }
}

/// Backend-independent description of the two-panel chart.
#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    pub title: String,
    pub mix: Mix,
    pub panels: Vec<Panel>,
}

pub struct ComparativeChartRenderer {
    styles: [StrategyStyle; 3],
}

impl Default for ComparativeChartRenderer {
    fn default() -> Self {
        Self {
            styles: Strategy::ALL.map(style_for),
        }
    }
}

impl ComparativeChartRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(&self, strategy: Strategy) -> StrategyStyle {
        self.styles[strategy.index()].clone()
    }

    /// Lays out throughput (left) and latency (right) panels, one line per
    /// strategy. Values are plotted exactly as measured.
    pub fn render(&self, spec: &ChartSpec) -> Result<Figure, ChartError> {
        let series = spec.series();

        if let Some(empty) = series.iter().find(|s| s.is_empty()) {
            return Err(ChartError::EmptySeries {
                strategy: empty.strategy(),
                mix: empty.mix(),
            });
        }

        let reference = &series[0];
        for other in &series[1..] {
            if other.thread_counts() != reference.thread_counts() {
                return Err(ChartError::IncomparableSeries(format!(
                    "{} thread counts {:?} differ from {} thread counts {:?}",
                    other.strategy(),
                    other.thread_counts(),
                    reference.strategy(),
                    reference.thread_counts()
                )));
            }
        }

        let panels = vec![
            self.panel(spec, PanelKind::Throughput),
            self.panel(spec, PanelKind::Latency),
        ];

        debug!(mix = %spec.mix(), points = reference.len(), "rendered figure");

        Ok(Figure {
            title: spec.title(),
            mix: spec.mix(),
            panels,
        })
    }

    fn panel(&self, spec: &ChartSpec, kind: PanelKind) -> Panel {
        let (title, y_desc) = match kind {
            PanelKind::Throughput => (THROUGHPUT_TITLE, &spec.throughput_label),
            PanelKind::Latency => (LATENCY_TITLE, &spec.latency_label),
        };

        let lines = spec
            .series()
            .iter()
            .map(|s| {
                let values = match kind {
                    PanelKind::Throughput => s.throughput(),
                    PanelKind::Latency => s.latency(),
                };
                Line {
                    strategy: s.strategy(),
                    style: self.style(s.strategy()),
                    points: s
                        .thread_counts()
                        .iter()
                        .copied()
                        .zip(values.iter().copied())
                        .collect(),
                }
            })
            .collect();

        Panel {
            kind,
            title: title.to_string(),
            x_desc: spec.x_label.clone(),
            y_desc: y_desc.clone(),
            grid: true,
            legend: true,
            lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perf_data::report_dataset;

    fn series(strategy: Strategy, threads: Vec<u32>) -> MeasurementSeries {
        let n = threads.len();
        MeasurementSeries::new(strategy, Mix::read_50(), threads, vec![10.0; n], vec![0.5; n])
            .unwrap()
    }

    fn spec_of(series: Vec<MeasurementSeries>) -> Result<ChartSpec, ChartError> {
        ChartSpec::new(Mix::read_50(), series)
    }

    fn report_spec(mix: Mix) -> ChartSpec {
        let dataset = report_dataset().unwrap();
        ChartSpec::from_selection(mix, &dataset.select(mix).unwrap()).unwrap()
    }

    #[test]
    fn test_render_report_50_50() {
        let figure = ComparativeChartRenderer::new()
            .render(&report_spec(Mix::read_50()))
            .unwrap();

        assert_eq!(figure.panels.len(), 2);
        assert_eq!(figure.title, "Concurrent multiset (50/50 read/write)");

        let throughput = &figure.panels[0];
        assert_eq!(throughput.kind, PanelKind::Throughput);
        assert_eq!(throughput.title, THROUGHPUT_TITLE);
        assert_eq!(throughput.y_desc, "Throughput (ops/sec)");
        assert_eq!(throughput.lines.len(), 3);
        assert!(throughput.lines.iter().all(|l| l.points.len() == 8));

        let optimistic = &throughput.lines[1];
        assert_eq!(optimistic.strategy, Strategy::OptimisticSync);
        assert_eq!(optimistic.points[1], (10, 548819.0));

        let lock_free = &throughput.lines[2];
        assert_eq!(lock_free.strategy, Strategy::LockFree);
        assert_eq!(lock_free.points[1], (10, 2006330.0));

        let latency = &figure.panels[1];
        assert_eq!(latency.kind, PanelKind::Latency);
        assert_eq!(latency.title, LATENCY_TITLE);
        assert_eq!(latency.lines.len(), 3);
        assert_eq!(latency.lines[0].points[0], (2, 0.000786177));
        assert!(latency.grid && latency.legend);
    }

    #[test]
    fn test_every_report_mix_renders() {
        let renderer = ComparativeChartRenderer::new();
        for mix in [Mix::read_50(), Mix::read_80(), Mix::read_20()] {
            let figure = renderer.render(&report_spec(mix)).unwrap();
            assert_eq!(figure.panels.len(), 2);
            assert!(figure.panels.iter().all(|p| p.lines.len() == 3));
        }
    }

    #[test]
    fn test_render_is_repeatable() {
        let spec = report_spec(Mix::read_80());
        let first = ComparativeChartRenderer::new().render(&spec).unwrap();
        let second = ComparativeChartRenderer::new().render(&spec).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_styles_are_fixed_and_distinct() {
        let renderer = ComparativeChartRenderer::new();
        let styles: Vec<_> = Strategy::ALL.iter().map(|s| renderer.style(*s)).collect();

        assert_eq!(styles[0].marker, Marker::Circle);
        assert_eq!(styles[1].marker, Marker::Square);
        assert_eq!(styles[2].marker, Marker::Triangle);
        assert_ne!(styles[0].color, styles[1].color);
        assert_ne!(styles[1].color, styles[2].color);
        assert_eq!(styles[2].label, "Lock-Free Synchronization");

        let figure = renderer.render(&report_spec(Mix::read_50())).unwrap();
        for panel in &figure.panels {
            for line in &panel.lines {
                assert_eq!(line.style, style_for(line.strategy));
            }
        }
    }

    #[test]
    fn test_render_rejects_different_lengths() {
        let spec = spec_of(vec![
            series(Strategy::SingleLock, vec![2, 10, 20]),
            series(Strategy::OptimisticSync, vec![2, 10]),
            series(Strategy::LockFree, vec![2, 10, 20]),
        ])
        .unwrap();

        assert!(matches!(
            ComparativeChartRenderer::new().render(&spec),
            Err(ChartError::IncomparableSeries(_))
        ));
    }

    #[test]
    fn test_render_rejects_different_thread_counts() {
        let spec = spec_of(vec![
            series(Strategy::SingleLock, vec![2, 10, 20]),
            series(Strategy::OptimisticSync, vec![2, 10, 20]),
            series(Strategy::LockFree, vec![2, 12, 20]),
        ])
        .unwrap();

        assert!(matches!(
            ComparativeChartRenderer::new().render(&spec),
            Err(ChartError::IncomparableSeries(_))
        ));
    }

    #[test]
    fn test_render_rejects_empty_series() {
        let spec = spec_of(vec![
            series(Strategy::SingleLock, vec![]),
            series(Strategy::OptimisticSync, vec![]),
            series(Strategy::LockFree, vec![]),
        ])
        .unwrap();

        assert!(matches!(
            ComparativeChartRenderer::new().render(&spec),
            Err(ChartError::EmptySeries {
                strategy: Strategy::SingleLock,
                ..
            })
        ));
    }

    #[test]
    fn test_spec_orders_and_checks_strategies() {
        let spec = spec_of(vec![
            series(Strategy::LockFree, vec![1]),
            series(Strategy::SingleLock, vec![1]),
            series(Strategy::OptimisticSync, vec![1]),
        ])
        .unwrap();
        let order: Vec<_> = spec.series().iter().map(|s| s.strategy()).collect();
        assert_eq!(order, Strategy::ALL.to_vec());

        let missing = spec_of(vec![
            series(Strategy::LockFree, vec![1]),
            series(Strategy::SingleLock, vec![1]),
        ]);
        assert!(matches!(missing, Err(ChartError::MissingSeries { .. })));

        let twice = spec_of(vec![
            series(Strategy::LockFree, vec![1]),
            series(Strategy::LockFree, vec![1]),
            series(Strategy::SingleLock, vec![1]),
        ]);
        assert!(matches!(twice, Err(ChartError::DuplicateSeries { .. })));

        let other_mix = MeasurementSeries::new(
            Strategy::LockFree,
            Mix::read_80(),
            vec![1],
            vec![1.0],
            vec![1.0],
        )
        .unwrap();
        let mixed = spec_of(vec![
            series(Strategy::SingleLock, vec![1]),
            series(Strategy::OptimisticSync, vec![1]),
            other_mix,
        ]);
        assert!(matches!(mixed, Err(ChartError::IncomparableSeries(_))));

        match ChartSpec::new(Mix::read_80(), vec![]) {
            Err(ChartError::MissingSeries { mix, missing }) => {
                assert_eq!(mix, Mix::read_80());
                assert_eq!(missing, Strategy::ALL.to_vec());
            }
            other => panic!("expected MissingSeries, got {:?}", other),
        }
    }

    #[test]
    fn test_spec_presentation_overrides() {
        let spec = report_spec(Mix::read_20())
            .with_title_template("Mix {mix}")
            .with_x_label("Threads")
            .with_throughput_label("ops/s")
            .with_latency_label("ms");
        let figure = ComparativeChartRenderer::new().render(&spec).unwrap();

        assert_eq!(figure.title, "Mix 20/80");
        assert_eq!(figure.panels[0].x_desc, "Threads");
        assert_eq!(figure.panels[0].y_desc, "ops/s");
        assert_eq!(figure.panels[1].y_desc, "ms");
        assert_eq!(figure.panels[1].x_max(), 70);
    }
}
