// File: crates/pyramid-core/src/series.rs
// Summary: Input datasets (named per-band series) and the combined per-band totals.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{AgeBand, AgeDomain};

/// Population counts for one (region, sex) pair, one value per age band.
pub type RegionSexSeries = Vec<u64>;

/// Named input series over a shared age domain.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub domain: AgeDomain,
    pub series: BTreeMap<String, RegionSexSeries>,
}

impl Dataset {
    pub fn new(domain: AgeDomain) -> Self {
        Self { title: None, domain, series: BTreeMap::new() }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_series(mut self, name: impl Into<String>, values: RegionSexSeries) -> Self {
        self.series.insert(name.into(), values);
        self
    }

    /// Insert or replace a series, returning the previous values under that name.
    pub fn insert(&mut self, name: impl Into<String>, values: RegionSexSeries) -> Option<RegionSexSeries> {
        self.series.insert(name.into(), values)
    }

    /// Sum all series band by band.
    pub fn combine(&self) -> Result<CombinedSeries> {
        crate::aggregate::combine(&self.domain, &self.series)
    }
}

/// Per-band totals across every input series. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CombinedSeries {
    domain: AgeDomain,
    totals: Vec<u64>,
}

impl CombinedSeries {
    pub(crate) fn new(domain: AgeDomain, totals: Vec<u64>) -> Self {
        debug_assert_eq!(domain.count, totals.len());
        Self { domain, totals }
    }

    pub fn domain(&self) -> AgeDomain { self.domain }

    pub fn totals(&self) -> &[u64] { &self.totals }

    pub fn len(&self) -> usize { self.totals.len() }

    pub fn is_empty(&self) -> bool { self.totals.is_empty() }

    /// Total for `band`, or `None` when the band is outside the domain.
    pub fn get(&self, band: AgeBand) -> Option<u64> {
        self.domain.index_of(band).and_then(|i| self.totals.get(i).copied())
    }

    /// `(band, total)` pairs in ascending band order.
    pub fn iter(&self) -> impl Iterator<Item = (AgeBand, u64)> + '_ {
        self.domain.bands().zip(self.totals.iter().copied())
    }

    /// Sum over every band.
    pub fn total(&self) -> u64 {
        self.totals.iter().sum()
    }
}
