//! Missing-aware scalar/series container.
//!
//! Flight-data pipelines hand the lookup engine either a single recorded
//! value or a whole flight-length series in which individual samples may be
//! unavailable. `Samples` carries that shape through every operation:
//! scalar in, scalar out; series in, same-length series out. A missing slot
//! (`None`) is a first-class result, not an error.

/// A scalar or series of optionally-missing values.
#[derive(Debug, Clone, PartialEq)]
pub enum Samples {
    Scalar(Option<f64>),
    Series(Vec<Option<f64>>),
}

impl Samples {
    /// A fully-missing scalar.
    pub fn missing() -> Self {
        Samples::Scalar(None)
    }

    /// Number of slots: 1 for a scalar, the length for a series.
    pub fn len(&self) -> usize {
        match self {
            Samples::Scalar(_) => 1,
            Samples::Series(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when no slot holds a value. Vacuously true for an empty series.
    pub fn is_all_missing(&self) -> bool {
        match self {
            Samples::Scalar(value) => value.is_none(),
            Samples::Series(values) => values.iter().all(Option::is_none),
        }
    }

    /// Apply `f` to every present value, preserving shape and missingness.
    /// `f` may itself produce a missing slot.
    pub fn map<F>(&self, f: F) -> Samples
    where
        F: Fn(f64) -> Option<f64>,
    {
        match self {
            Samples::Scalar(value) => Samples::Scalar(value.and_then(&f)),
            Samples::Series(values) => {
                Samples::Series(values.iter().map(|v| v.and_then(&f)).collect())
            }
        }
    }

    /// Same shape with every slot present and equal to `value`.
    pub fn broadcast(&self, value: f64) -> Samples {
        match self {
            Samples::Scalar(_) => Samples::Scalar(Some(value)),
            Samples::Series(values) => Samples::Series(vec![Some(value); values.len()]),
        }
    }

    /// Same shape with every slot missing.
    pub fn to_missing(&self) -> Samples {
        match self {
            Samples::Scalar(_) => Samples::Scalar(None),
            Samples::Series(values) => Samples::Series(vec![None; values.len()]),
        }
    }

    /// Replace missing slots with `value`.
    pub fn fill_missing(&mut self, value: f64) {
        match self {
            Samples::Scalar(slot) => {
                slot.get_or_insert(value);
            }
            Samples::Series(values) => {
                for slot in values.iter_mut() {
                    slot.get_or_insert(value);
                }
            }
        }
    }

    /// Raise every present value to at least `floor`.
    pub fn clamp_min(&mut self, floor: f64) {
        let raise = |slot: &mut Option<f64>| {
            if let Some(value) = slot {
                *value = value.max(floor);
            }
        };
        match self {
            Samples::Scalar(slot) => raise(slot),
            Samples::Series(values) => values.iter_mut().for_each(raise),
        }
    }

    /// Iterate over slots in order.
    pub fn iter(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        let slots: &[Option<f64>] = match self {
            Samples::Scalar(value) => std::slice::from_ref(value),
            Samples::Series(values) => values.as_slice(),
        };
        slots.iter().copied()
    }

    /// Collect slots into a plain vector, mostly for serialization.
    pub fn to_vec(&self) -> Vec<Option<f64>> {
        self.iter().collect()
    }
}

impl From<f64> for Samples {
    fn from(value: f64) -> Self {
        Samples::Scalar(Some(value))
    }
}

impl From<Option<f64>> for Samples {
    fn from(value: Option<f64>) -> Self {
        Samples::Scalar(value)
    }
}

impl From<Vec<Option<f64>>> for Samples {
    fn from(values: Vec<Option<f64>>) -> Self {
        Samples::Series(values)
    }
}

impl From<Vec<f64>> for Samples {
    fn from(values: Vec<f64>) -> Self {
        Samples::Series(values.into_iter().map(Some).collect())
    }
}

impl From<&[f64]> for Samples {
    fn from(values: &[f64]) -> Self {
        Samples::Series(values.iter().copied().map(Some).collect())
    }
}
