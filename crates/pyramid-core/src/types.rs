// File: crates/pyramid-core/src/types.rs
// Summary: Shared types and constants (age bands, evenly spaced band domain).

use serde::{Deserialize, Serialize};

use crate::error::{PyramidError, Result};

/// Lower bound, in years, of a fixed-width age band.
pub type AgeBand = u32;

/// Band width of the reference dataset, in years.
pub const DEFAULT_STEP: u32 = 5;
/// Number of bands in the reference dataset (0, 5, ..., 100).
pub const DEFAULT_BAND_COUNT: usize = 21;

/// Evenly spaced age bands: `start, start + step, ...` (`count` bands).
/// Contract: `step > 0`, `count > 0` and the last band fits in `u32`; see [`AgeDomain::validate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeDomain {
    pub start: AgeBand,
    pub step: u32,
    pub count: usize,
}

impl AgeDomain {
    pub const fn new(start: AgeBand, step: u32, count: usize) -> Self {
        Self { start, step, count }
    }

    /// Infer a domain from an explicit, strictly increasing and evenly spaced list of bands.
    /// A single band is assumed to have the default step.
    pub fn from_bands(bands: &[AgeBand]) -> Result<Self> {
        let (&first, rest) = bands
            .split_first()
            .ok_or_else(|| PyramidError::shape("age band list is empty"))?;
        let Some(&second) = rest.first() else {
            return Ok(Self::new(first, DEFAULT_STEP, 1));
        };
        if second <= first {
            return Err(PyramidError::shape(format!(
                "age bands must be strictly increasing (found {first} then {second})"
            )));
        }
        let step = second - first;
        for pair in bands.windows(2) {
            if pair[1] <= pair[0] || pair[1] - pair[0] != step {
                return Err(PyramidError::shape(format!(
                    "age bands must be evenly spaced by {step} (found {} then {})",
                    pair[0], pair[1]
                )));
            }
        }
        Ok(Self::new(first, step, bands.len()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.step == 0 {
            return Err(PyramidError::shape("age domain step must be positive"));
        }
        if self.count == 0 {
            return Err(PyramidError::shape("age domain has no bands"));
        }
        let fits = u32::try_from(self.count - 1)
            .ok()
            .and_then(|n| n.checked_mul(self.step))
            .and_then(|span| span.checked_add(self.start))
            .and_then(|last| last.checked_add(self.step));
        if fits.is_none() {
            return Err(PyramidError::shape(format!(
                "age domain {self:?} exceeds the representable band range"
            )));
        }
        Ok(())
    }

    /// Band at `index`, if the index is inside the domain.
    pub fn band(&self, index: usize) -> Option<AgeBand> {
        if index >= self.count {
            return None;
        }
        Some(self.start + self.step * index as u32)
    }

    /// Position of `band` in the domain; `None` for bands off the grid or out of range.
    pub fn index_of(&self, band: AgeBand) -> Option<usize> {
        if self.step == 0 || band < self.start {
            return None;
        }
        let offset = band - self.start;
        if offset % self.step != 0 {
            return None;
        }
        let index = (offset / self.step) as usize;
        (index < self.count).then_some(index)
    }

    pub fn contains(&self, band: AgeBand) -> bool {
        self.index_of(band).is_some()
    }

    /// Lower bound of the last band.
    pub fn last(&self) -> AgeBand {
        let n = self.count.saturating_sub(1) as u32;
        self.start.saturating_add(self.step.saturating_mul(n))
    }

    /// Upper edge of the last band (`last + step`).
    pub fn end(&self) -> u32 {
        self.last().saturating_add(self.step)
    }

    pub fn bands(&self) -> impl Iterator<Item = AgeBand> {
        let Self { start, step, count } = *self;
        (0..count).map(move |i| start + step * i as u32)
    }
}

impl Default for AgeDomain {
    fn default() -> Self {
        Self::new(0, DEFAULT_STEP, DEFAULT_BAND_COUNT)
    }
}
