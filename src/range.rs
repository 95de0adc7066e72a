use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Age, IncomparableUnits, UNBOUNDED};

/// A half-open interval of ages, `[lower, upper)`.
///
/// A missing upper bound means the range is open-ended (`10+ years`).
/// When the upper bound is present, `lower < upper` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Bounds")]
pub struct AgeRange {
    lower: Age,
    upper: Option<Age>,
}

/// Error type for age range construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Lower bound is not strictly below the upper bound.
    #[error("Invalid age range: lower ({lower}) is not below upper ({upper})")]
    Empty { lower: Age, upper: Age },

    /// Bounds are in units that do not compare.
    #[error(transparent)]
    Incomparable(#[from] IncomparableUnits),
}

/// Unvalidated wire form of an [`AgeRange`].
#[derive(Deserialize)]
struct Bounds {
    lower: Age,
    upper: Option<Age>,
}

impl TryFrom<Bounds> for AgeRange {
    type Error = RangeError;

    fn try_from(bounds: Bounds) -> Result<Self, Self::Error> {
        Self::try_new(bounds.lower, bounds.upper)
    }
}

impl AgeRange {
    /// Creates a range, treating inverted or empty bounds as a programming error.
    ///
    /// # Errors
    /// Returns `IncomparableUnits` if the bounds cannot be ordered.
    ///
    /// # Panics
    /// Panics if `upper` is present and `lower >= upper`.
    pub fn new(lower: Age, upper: Option<Age>) -> Result<Self, IncomparableUnits> {
        match Self::try_new(lower, upper) {
            Ok(range) => Ok(range),
            Err(RangeError::Incomparable(err)) => Err(err),
            Err(err @ RangeError::Empty { .. }) => panic!("{err}"),
        }
    }

    /// Creates a range with validation, without panicking.
    ///
    /// # Errors
    /// Returns `RangeError::Empty` if `lower >= upper`, or
    /// `RangeError::Incomparable` if the bounds cannot be ordered.
    pub fn try_new(lower: Age, upper: Option<Age>) -> Result<Self, RangeError> {
        let Some(upper) = upper else {
            return Ok(Self::unbounded(lower));
        };
        if !lower.try_lt(&upper)? {
            return Err(RangeError::Empty { lower, upper });
        }
        Ok(Self { lower, upper: Some(upper) })
    }

    /// Open-ended range starting at `lower`
    pub const fn unbounded(lower: Age) -> Self {
        Self { lower, upper: None }
    }

    pub const fn lower(&self) -> Age {
        self.lower
    }

    pub const fn upper(&self) -> Option<Age> {
        self.upper
    }

    pub const fn is_bounded(&self) -> bool {
        self.upper.is_some()
    }

    /// Checked structural equality. Upper bounds are only compared when the
    /// lower bounds are equal.
    ///
    /// # Errors
    /// Returns `IncomparableUnits` if a pair of bounds cannot be compared.
    pub fn try_eq(&self, other: &Self) -> Result<bool, IncomparableUnits> {
        Ok(self.lower.try_eq(&other.lower)? && upper_bounds_eq(self.upper, other.upper)?)
    }

    /// Is this range inside `other`?
    ///
    /// An open-ended range is only ever inside another open-ended range.
    ///
    /// # Errors
    /// Returns `IncomparableUnits` if the bounds cannot be compared.
    pub fn is_in(&self, other: &Self) -> Result<bool, IncomparableUnits> {
        if !other.lower.try_le(&self.lower)? {
            return Ok(false);
        }
        match (self.upper, other.upper) {
            (_, None) => Ok(true),
            (None, Some(_)) => Ok(false),
            (Some(inner), Some(outer)) => inner.try_le(&outer),
        }
    }

    /// Breaks this range into consecutive ranges at `cuts`.
    ///
    /// `cuts` must start at the lower bound and end at the upper bound. Cut
    /// points may change unit on the way (`11 months` then `1 year`).
    ///
    /// # Errors
    /// Returns `IncomparableUnits` if consecutive cuts cannot be compared.
    ///
    /// # Panics
    /// Panics if the range is open-ended, if fewer than two cuts are given,
    /// if the first and last cuts are not the range's bounds, or if the cuts
    /// are not strictly increasing.
    pub fn subdivide(&self, cuts: &[Age]) -> Result<Vec<Self>, IncomparableUnits> {
        let Some(upper) = self.upper else {
            panic!("Cannot subdivide open-ended range {self}");
        };
        let (Some(first), Some(last)) = (cuts.first(), cuts.last()) else {
            panic!("Cannot subdivide {self}: no cuts given");
        };
        assert!(cuts.len() >= 2, "Cannot subdivide {self}: need at least 2 cuts, got {}", cuts.len());
        assert!(first.try_eq(&self.lower)?, "First cut {first} does not match lower bound of {self}");
        assert!(last.try_eq(&upper)?, "Last cut {last} does not match upper bound of {self}");

        cuts.windows(2)
            .map(|pair| Self::new(pair[0], Some(pair[1])))
            .collect()
    }
}

/// Equality of optional upper bounds; open-ended only equals open-ended.
pub(crate) fn upper_bounds_eq(lhs: Option<Age>, rhs: Option<Age>) -> Result<bool, IncomparableUnits> {
    match (lhs, rhs) {
        (None, None) => Ok(true),
        (Some(lhs), Some(rhs)) => lhs.try_eq(&rhs),
        _ => Ok(false),
    }
}

impl fmt::Display for AgeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upper {
            Some(upper) => write!(f, "[{}, {upper})", self.lower),
            None => write!(f, "[{}, {UNBOUNDED})", self.lower),
        }
    }
}
