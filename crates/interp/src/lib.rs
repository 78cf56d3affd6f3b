//! Ordered-breakpoint linear interpolation.
//!
//! Both lookup pipelines share this primitive: weight-banded reference
//! speeds interpolate over gross weight, altitude-banded operating limits
//! over pressure altitude. Breakpoints may repeat to encode a step
//! discontinuity (e.g. VMO dropping at a fixed altitude); queries outside
//! the breakpoint range are missing rather than extrapolated.

use thiserror::Error;
use vspeed_core::Samples;

/// Errors detected when a breakpoint table is constructed.
///
/// Queries assume a validated table and never re-check; malformed data is
/// an authoring problem, caught here once.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BreakpointError {
    #[error("breakpoint series is empty")]
    Empty,
    #[error("breakpoint and value series lengths differ ({breakpoints} != {values})")]
    LengthMismatch { breakpoints: usize, values: usize },
    #[error("breakpoint series not sorted ascending at index {0}")]
    Unsorted(usize),
}

/// A piecewise-linear function defined by parallel breakpoint and value
/// series. The breakpoint series is ascending; a repeated breakpoint with
/// two different values encodes a right-continuous step.
#[derive(Debug, Clone, PartialEq)]
pub struct Breakpoints {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Breakpoints {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, BreakpointError> {
        if x.is_empty() {
            return Err(BreakpointError::Empty);
        }
        if x.len() != y.len() {
            return Err(BreakpointError::LengthMismatch {
                breakpoints: x.len(),
                values: y.len(),
            });
        }
        if let Some(i) = x.windows(2).position(|pair| pair[0] > pair[1]) {
            return Err(BreakpointError::Unsorted(i + 1));
        }
        Ok(Breakpoints { x, y })
    }

    pub fn breakpoints(&self) -> &[f64] {
        &self.x
    }

    pub fn values(&self) -> &[f64] {
        &self.y
    }

    /// Evaluate at a single point.
    ///
    /// Returns `None` outside `[x[0], x[last]]` and for NaN input. At a
    /// repeated breakpoint the upper segment wins, making the step
    /// right-continuous.
    pub fn eval(&self, at: f64) -> Option<f64> {
        let n = self.x.len();
        if at.is_nan() || at < self.x[0] || at > self.x[n - 1] {
            return None;
        }
        // First index strictly above the query; everything at or below a
        // repeated breakpoint is skipped, which selects the upper segment.
        let hi = self.x.partition_point(|&bp| bp <= at);
        if hi == n {
            return Some(self.y[n - 1]);
        }
        let lo = hi - 1;
        let (x0, x1) = (self.x[lo], self.x[hi]);
        let (y0, y1) = (self.y[lo], self.y[hi]);
        // x0 <= at < x1 here, so the segment has nonzero width.
        Some(y0 + (y1 - y0) * (at - x0) / (x1 - x0))
    }

    /// Evaluate elementwise over a scalar or series, preserving shape and
    /// missingness.
    pub fn eval_samples(&self, at: &Samples) -> Samples {
        at.map(|value| self.eval(value))
    }
}
