// File: crates/pyramid-core/src/axis.rs
// Summary: Axis descriptors handed to the renderer, with fixed-delta tick layout.

use serde::{Deserialize, Serialize};

use crate::types::AgeDomain;

pub const AGE_AXIS_TITLE: &str = "Age Range (Years)";
pub const POPULATION_AXIS_TITLE: &str = "Population (Millions)";

/// Tick count used when an axis has no major delta.
const AUTO_TICKS: usize = 6;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub title: String,
    pub min: f64,
    pub max: f64,
    /// Fixed spacing between major ticks; `None` spreads ticks evenly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_delta: Option<f64>,
}

impl Axis {
    pub fn new(title: impl Into<String>, min: f64, max: f64) -> Self {
        Self { title: title.into(), min, max, major_delta: None }
    }

    pub fn with_major_delta(mut self, delta: f64) -> Self {
        self.major_delta = Some(delta);
        self
    }

    /// X axis spanning every band of `domain`, one tick per band edge.
    pub fn age_x(domain: &AgeDomain) -> Self {
        Self::new(AGE_AXIS_TITLE, domain.start as f64, domain.end() as f64)
            .with_major_delta(domain.step as f64)
    }

    pub fn population_y(max: f64) -> Self {
        Self::new(POPULATION_AXIS_TITLE, 0.0, max)
    }

    /// Major tick positions from `min` up to and including `max`.
    pub fn tick_values(&self) -> Vec<f64> {
        match self.major_delta.filter(|d| d.is_finite() && *d > 0.0) {
            Some(delta) if self.max >= self.min => {
                let n = ((self.max - self.min) / delta + 1e-9).floor() as usize;
                (0..=n).map(|i| self.min + delta * i as f64).collect()
            }
            Some(_) => Vec::new(),
            None => linspace(self.min, self.max, AUTO_TICKS),
        }
    }
}

pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}
