// File: crates/pyramid-core/src/chart.rs
// Summary: Bar series hand-off (x start/end, y start/end) and the assembled pyramid chart.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::{bucket_with, BarWidth};
use crate::axis::Axis;
use crate::bucket::BucketSpec;
use crate::error::{PyramidError, Result};
use crate::labels::{tick_labels, BucketLabels, Tick};
use crate::series::Dataset;

pub const DEFAULT_TITLE: &str = "Population Distribution by Age Range";

/// Headroom added above the tallest bar on the value axis.
const Y_MARGIN: f64 = 0.02;

/// Four parallel sequences describing one rectangle per point, plus optional point labels.
/// Contract: all sequences have equal length; built through [`ChartSeries::push`] or
/// decoded from JSON, which rejects ragged input.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawChartSeries")]
pub struct ChartSeries {
    x_start: Vec<f64>,
    y_start: Vec<f64>,
    x_end: Vec<f64>,
    y_end: Vec<f64>,
    labels: Vec<Option<String>>,
}

/// Wire shape of [`ChartSeries`] before the length check.
#[derive(Deserialize)]
struct RawChartSeries {
    x_start: Vec<f64>,
    y_start: Vec<f64>,
    x_end: Vec<f64>,
    y_end: Vec<f64>,
    labels: Vec<Option<String>>,
}

impl TryFrom<RawChartSeries> for ChartSeries {
    type Error = PyramidError;

    fn try_from(raw: RawChartSeries) -> Result<Self> {
        let n = raw.x_start.len();
        let lens = [raw.y_start.len(), raw.x_end.len(), raw.y_end.len(), raw.labels.len()];
        if lens.iter().any(|&len| len != n) {
            return Err(PyramidError::shape(format!(
                "chart series columns differ in length: x_start={n}, y_start={}, x_end={}, y_end={}, labels={}",
                lens[0], lens[1], lens[2], lens[3]
            )));
        }
        let RawChartSeries { x_start, y_start, x_end, y_end, labels } = raw;
        Ok(Self { x_start, y_start, x_end, y_end, labels })
    }
}

/// Borrowed view of one bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarPoint<'a> {
    pub x_start: f64,
    pub y_start: f64,
    pub x_end: f64,
    pub y_end: f64,
    pub label: Option<&'a str>,
}

/// Data range covered by a series.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ChartSeries {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            x_start: Vec::with_capacity(n),
            y_start: Vec::with_capacity(n),
            x_end: Vec::with_capacity(n),
            y_end: Vec::with_capacity(n),
            labels: Vec::with_capacity(n),
        }
    }

    /// Append a bar rising from the zero baseline.
    pub fn push(&mut self, x_start: f64, x_end: f64, value: f64, label: Option<String>) {
        self.x_start.push(x_start);
        self.y_start.push(0.0);
        self.x_end.push(x_end);
        self.y_end.push(value);
        self.labels.push(label);
    }

    pub fn x_start(&self) -> &[f64] { &self.x_start }
    pub fn y_start(&self) -> &[f64] { &self.y_start }
    pub fn x_end(&self) -> &[f64] { &self.x_end }
    pub fn y_end(&self) -> &[f64] { &self.y_end }
    pub fn labels(&self) -> &[Option<String>] { &self.labels }

    pub fn len(&self) -> usize { self.x_start.len() }

    pub fn is_empty(&self) -> bool { self.x_start.is_empty() }

    /// Sum of all bar values.
    pub fn total(&self) -> f64 {
        self.y_end.iter().sum()
    }

    pub fn points(&self) -> impl Iterator<Item = BarPoint<'_>> + '_ {
        self.x_start
            .iter()
            .zip(&self.y_start)
            .zip(&self.x_end)
            .zip(&self.y_end)
            .zip(&self.labels)
            .map(|((((&x_start, &y_start), &x_end), &y_end), label)| BarPoint {
                x_start,
                y_start,
                x_end,
                y_end,
                label: label.as_deref(),
            })
    }

    /// Bar at `x_start == x`, if any.
    pub fn point_at(&self, x: f64) -> Option<BarPoint<'_>> {
        self.points().find(|p| p.x_start == x)
    }

    /// X range from the first bar start to the last bar end; Y always includes the baseline.
    pub fn extent(&self) -> Extent {
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for p in self.points() {
            x_min = x_min.min(p.x_start);
            x_max = x_max.max(p.x_end);
            y_min = y_min.min(p.y_start.min(p.y_end));
            y_max = y_max.max(p.y_start.max(p.y_end));
        }
        if !x_min.is_finite() || !x_max.is_finite() || !y_min.is_finite() || !y_max.is_finite() {
            return Extent { x_min: 0.0, x_max: 1.0, y_min: 0.0, y_max: 1.0 };
        }
        if (x_max - x_min).abs() < 1e-9 { x_max = x_min + 1.0; }
        if (y_max - y_min).abs() < 1e-9 { y_max = y_min + 1.0; }
        Extent { x_min, x_max, y_min, y_max }
    }
}

impl Extent {
    /// Grow the top of the value range by `frac` of its span.
    pub fn padded_top(self, frac: f64) -> Self {
        let m = (self.y_max - self.y_min) * frac;
        Self { y_max: self.y_max + m, ..self }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartOptions {
    pub bar_width: BarWidth,
    /// Overrides the dataset title.
    pub title: Option<String>,
}

/// Everything the rendering boundary needs to draw the pyramid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PyramidChart {
    pub title: String,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub series: ChartSeries,
    pub ticks: Vec<Tick>,
}

impl PyramidChart {
    /// Combine the dataset, bucket it with `spec`, and lay out axes and tick labels
    /// from that same spec.
    pub fn build(dataset: &Dataset, spec: &BucketSpec, opts: &ChartOptions) -> Result<Self> {
        let combined = dataset.combine()?;
        let series = bucket_with(&combined, spec, opts.bar_width)?;
        let domain = dataset.domain;

        let x_axis = Axis::age_x(&domain);
        let y_axis = Axis::population_y(series.extent().padded_top(Y_MARGIN).y_max);
        let labels = BucketLabels::new(spec, &domain)?;
        let ticks = tick_labels(&x_axis, &labels);

        let title = opts
            .title
            .clone()
            .or_else(|| dataset.title.clone())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());
        debug!(%title, points = series.len(), ticks = ticks.len(), "assembled pyramid chart");

        Ok(Self { title, x_axis, y_axis, series, ticks })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
