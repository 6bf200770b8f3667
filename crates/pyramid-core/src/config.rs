// File: crates/pyramid-core/src/config.rs
// Summary: TOML configuration (dataset, bucket rules, bar width) for a pyramid chart.
//
// Example:
//
//   title = "Europe and Africa"
//   bar_width = "step"
//
//   [domain]
//   start = 0
//   step = 5
//   count = 21
//
//   [series]
//   africa_male = [35754890, 31813896, ...]
//
//   [[buckets]]
//   kind = "merge"
//   members = [80, 85, 90, 95, 100]
//   representative = 80
//   label = "80+"

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::BarWidth;
use crate::bucket::BucketSpec;
use crate::chart::ChartOptions;
use crate::error::{PyramidError, Result};
use crate::series::{Dataset, RegionSexSeries};
use crate::types::{AgeDomain, DEFAULT_STEP};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PyramidConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Inferred as `0, 5, 10, ...` with one band per series value when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<AgeDomain>,
    #[serde(default)]
    pub series: BTreeMap<String, RegionSexSeries>,
    /// No rules means every band passes through.
    #[serde(default)]
    pub buckets: BucketSpec,
    #[serde(default)]
    pub bar_width: BarWidth,
}

impl PyramidConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), series = config.series.len(), rules = config.buckets.rules().len(), "loaded config");
        Ok(config)
    }

    /// Dataset described by this config. Series lengths are checked later, by `combine`.
    pub fn dataset(&self) -> Result<Dataset> {
        let domain = match self.domain {
            Some(domain) => domain,
            None => {
                let len = self
                    .series
                    .values()
                    .next()
                    .map(Vec::len)
                    .ok_or_else(|| PyramidError::shape("config defines no series"))?;
                AgeDomain::new(0, DEFAULT_STEP, len)
            }
        };
        domain.validate()?;
        Ok(Dataset { title: self.title.clone(), domain, series: self.series.clone() })
    }

    pub fn chart_options(&self) -> ChartOptions {
        ChartOptions { bar_width: self.bar_width, title: None }
    }
}
