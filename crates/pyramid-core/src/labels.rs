// File: crates/pyramid-core/src/labels.rs
// Summary: Tick-label formatter trait with a bucket-aware implementation, renderer-agnostic.

use serde::{Deserialize, Serialize};

use crate::axis::Axis;
use crate::bucket::{BucketSpec, MergedRange};
use crate::error::Result;
use crate::types::{AgeBand, AgeDomain};

/// Tolerance when matching a tick against a band edge.
const EDGE_EPS: f64 = 1e-9;

/// Turns an axis value into the text printed under its tick.
pub trait LabelFormatter {
    fn id(&self) -> &'static str;
    fn format_label(&self, value: f64) -> String;
}

/// Whole-number labels for every tick.
pub struct PlainLabels;

impl LabelFormatter for PlainLabels {
    fn id(&self) -> &'static str { "plain" }

    fn format_label(&self, value: f64) -> String {
        format!("{value:.0}")
    }
}

/// Labels that follow a [`BucketSpec`]: inside a merged range only the representative's
/// tick keeps its number, and the closing tick of a labeled terminal group prints the
/// group label (e.g. "80+").
pub struct BucketLabels<'a> {
    ranges: Vec<MergedRange<'a>>,
    domain: AgeDomain,
}

impl<'a> BucketLabels<'a> {
    /// Build from the same spec the aggregator uses; rejects specs the aggregator would reject.
    pub fn new(spec: &'a BucketSpec, domain: &AgeDomain) -> Result<Self> {
        spec.validate(domain)?;
        Ok(Self { ranges: spec.merged_ranges(domain), domain: *domain })
    }

    /// Domain band whose `[band, band + step)` interval holds `value`.
    fn containing_band(&self, value: f64) -> Option<AgeBand> {
        let offset = (value - self.domain.start as f64) / self.domain.step as f64;
        if !offset.is_finite() || offset < -EDGE_EPS {
            return None;
        }
        self.domain.band((offset + EDGE_EPS).floor() as usize)
    }
}

impl LabelFormatter for BucketLabels<'_> {
    fn id(&self) -> &'static str { "bucket" }

    fn format_label(&self, value: f64) -> String {
        for range in &self.ranges {
            let lo = range.lower as f64;
            let hi = range.upper as f64;
            let inside = value > lo - EDGE_EPS && value < hi - EDGE_EPS;
            if inside {
                if (value - range.representative as f64).abs() <= EDGE_EPS {
                    break;
                }
                // A non-member band between two members keeps its own tick.
                if self.containing_band(value).is_some_and(|band| range.members.contains(&band)) {
                    return String::new();
                }
                continue;
            }
            if let Some(label) = range.label {
                let terminal = range.upper >= self.domain.end();
                if terminal && (value - hi).abs() <= EDGE_EPS {
                    return label.to_owned();
                }
            }
        }
        PlainLabels.format_label(value)
    }
}

/// One labeled major tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

/// Major ticks of `axis`, each formatted by `formatter`.
pub fn tick_labels(axis: &Axis, formatter: &dyn LabelFormatter) -> Vec<Tick> {
    axis.tick_values()
        .into_iter()
        .map(|value| Tick { value, label: formatter.format_label(value) })
        .collect()
}
