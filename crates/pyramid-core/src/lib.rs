// File: crates/pyramid-core/src/lib.rs
// Summary: Core library entry point; exports the age-band aggregation and chart hand-off API.

pub mod aggregate;
pub mod axis;
pub mod bucket;
pub mod chart;
pub mod config;
pub mod csv_io;
pub mod error;
pub mod labels;
pub mod sample;
pub mod series;
pub mod types;

pub use aggregate::{bucket, bucket_with, combine, BarWidth};
pub use axis::Axis;
pub use bucket::{BucketRule, BucketSpec, MergedRange};
pub use chart::{BarPoint, ChartOptions, ChartSeries, Extent, PyramidChart};
pub use config::PyramidConfig;
pub use csv_io::{load_wide_csv, read_wide_csv, write_chart_csv};
pub use error::{PyramidError, Result};
pub use labels::{tick_labels, BucketLabels, LabelFormatter, PlainLabels, Tick};
pub use series::{CombinedSeries, Dataset, RegionSexSeries};
pub use types::{AgeBand, AgeDomain};
