// File: crates/pyramid-core/src/bucket.rs
// Summary: Declarative bucket rules (pass-through / merge) and their validation against a domain.
// Notes:
// - One BucketSpec drives both the aggregator and the tick-label formatter, so merged
//   ranges never need to be restated as separate thresholds.
// - Bands not claimed by any rule pass through unchanged.

use serde::{Deserialize, Serialize};

use crate::error::{PyramidError, Result};
use crate::types::{AgeBand, AgeDomain};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BucketRule {
    /// Emit the band unchanged.
    PassThrough { band: AgeBand },
    /// Sum every member band into one point placed at `representative`.
    Merge {
        members: Vec<AgeBand>,
        representative: AgeBand,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
}

impl BucketRule {
    pub fn pass_through(band: AgeBand) -> Self {
        Self::PassThrough { band }
    }

    pub fn merge(members: impl IntoIterator<Item = AgeBand>, representative: AgeBand) -> Self {
        Self::Merge { members: members.into_iter().collect(), representative, label: None }
    }

    /// Merge every domain band in `[lo, hi)` into the lowest of them.
    pub fn merge_range(domain: &AgeDomain, lo: AgeBand, hi: AgeBand) -> Self {
        let members: Vec<AgeBand> = domain.bands().filter(|b| (lo..hi).contains(b)).collect();
        let representative = members.first().copied().unwrap_or(lo);
        Self::Merge { members, representative, label: None }
    }

    /// Merge every domain band `>= lo` into the lowest of them.
    pub fn merge_from(domain: &AgeDomain, lo: AgeBand) -> Self {
        Self::merge_range(domain, lo, domain.end())
    }

    /// Attach an override label. Pass-through rules have no label and are returned as is.
    pub fn with_label(self, text: impl Into<String>) -> Self {
        match self {
            Self::Merge { members, representative, .. } => {
                Self::Merge { members, representative, label: Some(text.into()) }
            }
            other => other,
        }
    }

    /// Every band this rule claims.
    pub fn bands(&self) -> &[AgeBand] {
        match self {
            Self::PassThrough { band } => std::slice::from_ref(band),
            Self::Merge { members, .. } => members,
        }
    }

    pub fn representative(&self) -> AgeBand {
        match self {
            Self::PassThrough { band } => *band,
            Self::Merge { representative, .. } => *representative,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Self::PassThrough { .. } => None,
            Self::Merge { label, .. } => label.as_deref(),
        }
    }
}

/// What happens to one band of the domain when a spec is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Slot {
    Own,
    /// Carries the sum of the merge rule at this index.
    Representative(usize),
    /// Folded into another band's point.
    Absorbed,
}

/// Extent of one merge group on the band axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MergedRange<'a> {
    /// Lowest member band.
    pub lower: AgeBand,
    /// Upper edge of the highest member band (exclusive).
    pub upper: u32,
    /// Band that carries the group sum.
    pub representative: AgeBand,
    pub members: &'a [AgeBand],
    pub label: Option<&'a str>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BucketSpec {
    rules: Vec<BucketRule>,
}

impl BucketSpec {
    pub fn new() -> Self { Self::default() }

    pub fn with_rule(mut self, rule: BucketRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[BucketRule] { &self.rules }

    pub fn is_empty(&self) -> bool { self.rules.is_empty() }

    /// Rules of the Europe/Africa chart: bands below 10 into 0, `[30, 45)` into 30,
    /// and 80 and above into 80 labeled "80+".
    pub fn reference(domain: &AgeDomain) -> Self {
        Self::new()
            .with_rule(BucketRule::merge_range(domain, 0, 10))
            .with_rule(BucketRule::merge_range(domain, 30, 45))
            .with_rule(BucketRule::merge_from(domain, 80).with_label("80+"))
    }

    pub fn validate(&self, domain: &AgeDomain) -> Result<()> {
        self.plan(domain).map(|_| ())
    }

    /// Merge groups as ranges on the band axis, in rule order.
    pub fn merged_ranges(&self, domain: &AgeDomain) -> Vec<MergedRange<'_>> {
        self.rules
            .iter()
            .filter_map(|rule| match rule {
                BucketRule::Merge { members, representative, label } => {
                    let lower = *members.iter().min()?;
                    let upper = members.iter().max()?.saturating_add(domain.step);
                    Some(MergedRange {
                        lower,
                        upper,
                        representative: *representative,
                        members,
                        label: label.as_deref(),
                    })
                }
                BucketRule::PassThrough { .. } => None,
            })
            .collect()
    }

    /// Resolve every band of `domain` to its slot, rejecting unknown bands,
    /// overlapping claims and malformed merge rules.
    pub(crate) fn plan(&self, domain: &AgeDomain) -> Result<Vec<Slot>> {
        domain.validate()?;
        let mut slots = vec![Slot::Own; domain.count];
        let mut owner: Vec<Option<usize>> = vec![None; domain.count];

        for (rule_index, rule) in self.rules.iter().enumerate() {
            if let BucketRule::Merge { members, representative, .. } = rule {
                if members.is_empty() {
                    return Err(PyramidError::invalid_bucket(format!(
                        "merge rule #{rule_index} has no member bands"
                    )));
                }
                if !members.contains(representative) {
                    return Err(PyramidError::invalid_bucket(format!(
                        "representative band {representative} is not a member of merge rule #{rule_index}"
                    )));
                }
            }

            for &band in rule.bands() {
                let index = domain.index_of(band).ok_or(PyramidError::UnknownBand { band })?;
                match owner[index] {
                    Some(prev) if prev == rule_index => {
                        return Err(PyramidError::invalid_bucket(format!(
                            "band {band} is listed twice in rule #{rule_index}"
                        )));
                    }
                    Some(prev) => {
                        return Err(PyramidError::invalid_bucket(format!(
                            "band {band} is claimed by rule #{prev} and rule #{rule_index}"
                        )));
                    }
                    None => owner[index] = Some(rule_index),
                }
                slots[index] = match rule {
                    BucketRule::PassThrough { .. } => Slot::Own,
                    BucketRule::Merge { representative, .. } if *representative == band => {
                        Slot::Representative(rule_index)
                    }
                    BucketRule::Merge { .. } => Slot::Absorbed,
                };
            }
        }
        Ok(slots)
    }
}
