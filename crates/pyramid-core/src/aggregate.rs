// File: crates/pyramid-core/src/aggregate.rs
// Summary: Age-band aggregation (combine named series; re-bucket totals into chart bars).

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::bucket::{BucketSpec, Slot};
use crate::chart::ChartSeries;
use crate::error::{PyramidError, Result};
use crate::series::CombinedSeries;
use crate::types::AgeDomain;

/// Horizontal extent of a merged bar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarWidth {
    /// Every bar is one band step wide, merged or not.
    #[default]
    Step,
    /// A merged bar reaches the upper edge of its highest member band.
    Span,
}

/// Sum named series band by band.
/// Every series must hold exactly one value per band of `domain`.
pub fn combine<I, N, S>(domain: &AgeDomain, series: I) -> Result<CombinedSeries>
where
    I: IntoIterator<Item = (N, S)>,
    N: AsRef<str>,
    S: AsRef<[u64]>,
{
    domain.validate()?;
    let mut totals = vec![0u64; domain.count];
    let mut seen = 0usize;
    for (name, values) in series {
        let values = values.as_ref();
        if values.len() != domain.count {
            return Err(PyramidError::shape(format!(
                "series '{}' has {} values, expected {} (one per age band)",
                name.as_ref(),
                values.len(),
                domain.count
            )));
        }
        for ((total, &v), band) in totals.iter_mut().zip(values).zip(domain.bands()) {
            *total = total.checked_add(v).ok_or_else(|| {
                PyramidError::overflow(format!("band {band} total exceeds u64 after adding series '{}'", name.as_ref()))
            })?;
        }
        seen += 1;
    }
    if seen == 0 {
        return Err(PyramidError::shape("no series to combine"));
    }

    // Keeps `CombinedSeries::total` and every merge-group sum in range.
    totals
        .iter()
        .try_fold(0u64, |acc, &t| acc.checked_add(t))
        .ok_or_else(|| PyramidError::overflow("population total across all bands exceeds u64"))?;

    let combined = CombinedSeries::new(*domain, totals);
    if combined.total() == 0 {
        warn!(series = seen, "combined population is zero in every band");
    }
    debug!(series = seen, bands = domain.count, total = combined.total(), "combined age-band series");
    Ok(combined)
}

/// Re-bucket combined totals into chart bars with one-step bar widths.
pub fn bucket(combined: &CombinedSeries, spec: &BucketSpec) -> Result<ChartSeries> {
    bucket_with(combined, spec, BarWidth::Step)
}

/// Re-bucket combined totals into chart bars.
///
/// Absorbed merge members emit nothing; each merge representative emits the group sum
/// at its own band. Bars always start from a zero baseline.
pub fn bucket_with(combined: &CombinedSeries, spec: &BucketSpec, width: BarWidth) -> Result<ChartSeries> {
    let domain = combined.domain();
    let slots = spec.plan(&domain)?;
    let rules = spec.rules();
    let step = domain.step as f64;

    let mut out = ChartSeries::with_capacity(slots.len());
    for ((band, total), slot) in combined.iter().zip(&slots) {
        let x = band as f64;
        match *slot {
            Slot::Own => out.push(x, x + step, total as f64, None),
            Slot::Representative(rule_index) => {
                let rule = &rules[rule_index];
                let members = rule.bands();
                let sum = members
                    .iter()
                    .filter_map(|&m| combined.get(m))
                    .try_fold(0u64, u64::checked_add)
                    .ok_or_else(|| PyramidError::overflow(format!("merge group at band {band} exceeds u64")))?;
                let x_end = match width {
                    BarWidth::Step => x + step,
                    BarWidth::Span => members.iter().copied().max().unwrap_or(band) as f64 + step,
                };
                out.push(x, x_end, sum as f64, rule.label().map(str::to_owned));
            }
            Slot::Absorbed => {}
        }
    }

    debug!(bands = slots.len(), points = out.len(), rules = rules.len(), ?width, "bucketed age bands");
    Ok(out)
}
