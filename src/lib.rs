mod consts;
mod parse;
mod prelude;
mod range;
mod tile;
mod types;

pub use consts::*;
pub use parse::{ParseFailure, parse_range};
pub use range::{AgeRange, RangeError};
pub use tile::tile;
pub use types::Unit;

use crate::prelude::*;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A duration of life: a whole number of years, months or weeks.
///
/// Ages in different units are only partially comparable. Same-unit ages
/// compare by magnitude, years and months convert at 12 months per year,
/// and zero is zero in every unit. Anything else (weeks against years or
/// months) is reported as [`IncomparableUnits`] by the checked comparisons.
///
/// The checked comparisons (`try_*`) are the primary API. The one rule that
/// breaks symmetry is that a zero age is *less than* any non-zero age
/// whatever the units, while the reverse question (`try_gt`, `try_ge`) and
/// `try_cmp` still fail for incomparable units.
///
/// `PartialEq`, `Eq` and `Hash` work on a canonical form (zero, a count of
/// months, or a count of weeks), so `Age::years(1) == Age::months(12)` and
/// both hash the same. Incomparable ages are simply unequal there; use
/// [`Age::try_eq`] when that distinction matters.
#[derive(Debug, Clone, Copy)]
pub struct Age {
    magnitude: u32,
    unit:      Unit,
}

/// Returned when two ages have no common unit to be compared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Cannot compare {lhs} and {rhs}: units do not convert")]
pub struct IncomparableUnits {
    pub lhs: Age,
    pub rhs: Age,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum AgeParseError {
    #[display(fmt = "Invalid age format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid age magnitude: {_0}")]
    InvalidMagnitude(String),
    #[display(fmt = "Unknown unit: {_0} (expected year, month or week)")]
    UnknownUnit(String),
    #[display(fmt = "Empty age string")]
    EmptyInput,
}

impl std::error::Error for AgeParseError {}

/// Canonical form behind `Eq` and `Hash`.
///
/// Variant order makes zero sort first; months and weeks never meet in a
/// well-formed sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Canonical {
    Zero,
    Months(u64),
    Weeks(u64),
}

impl Age {
    pub const fn new(magnitude: u32, unit: Unit) -> Self {
        Self { magnitude, unit }
    }

    pub const fn years(magnitude: u32) -> Self {
        Self::new(magnitude, Unit::Year)
    }

    pub const fn months(magnitude: u32) -> Self {
        Self::new(magnitude, Unit::Month)
    }

    pub const fn weeks(magnitude: u32) -> Self {
        Self::new(magnitude, Unit::Week)
    }

    /// Number of units
    pub const fn magnitude(&self) -> u32 {
        self.magnitude
    }

    pub const fn unit(&self) -> Unit {
        self.unit
    }

    pub const fn is_zero(&self) -> bool {
        self.magnitude == 0
    }

    /// The age counted in months, when its unit converts to months.
    pub const fn in_months(&self) -> Option<u64> {
        match self.unit {
            Unit::Year => Some(self.magnitude as u64 * MONTHS_PER_YEAR),
            Unit::Month => Some(self.magnitude as u64),
            Unit::Week => None,
        }
    }

    const fn canonical(&self) -> Canonical {
        if self.is_zero() {
            return Canonical::Zero;
        }
        match self.in_months() {
            Some(months) => Canonical::Months(months),
            None => Canonical::Weeks(self.magnitude as u64),
        }
    }

    /// Three-way comparison.
    ///
    /// # Errors
    /// Returns `IncomparableUnits` when the units differ, do not convert,
    /// and the ages are not both zero.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, IncomparableUnits> {
        if self.unit == other.unit {
            return Ok(self.magnitude.cmp(&other.magnitude));
        }
        if self.is_zero() && other.is_zero() {
            return Ok(Ordering::Equal);
        }
        match (self.in_months(), other.in_months()) {
            (Some(lhs), Some(rhs)) => Ok(lhs.cmp(&rhs)),
            _ => Err(IncomparableUnits { lhs: *self, rhs: *other }),
        }
    }

    /// # Errors
    /// Returns `IncomparableUnits` under the same conditions as [`Age::try_cmp`].
    pub fn try_eq(&self, other: &Self) -> Result<bool, IncomparableUnits> {
        self.try_cmp(other).map(Ordering::is_eq)
    }

    /// Strictly-less comparison. A zero age is less than every non-zero
    /// age, even one in a unit it does not otherwise convert to.
    ///
    /// # Errors
    /// Returns `IncomparableUnits` when the units do not convert and the
    /// zero rule does not apply.
    pub fn try_lt(&self, other: &Self) -> Result<bool, IncomparableUnits> {
        if self.is_zero() && !other.is_zero() {
            return Ok(true);
        }
        self.try_cmp(other).map(Ordering::is_lt)
    }

    /// `try_lt` or `try_eq`, in that order.
    ///
    /// # Errors
    /// Returns `IncomparableUnits` when either step does.
    pub fn try_le(&self, other: &Self) -> Result<bool, IncomparableUnits> {
        Ok(self.try_lt(other)? || self.try_eq(other)?)
    }

    /// Neither less nor equal. The zero rule is not mirrored here:
    /// `Age::years(1).try_gt(&Age::weeks(0))` fails.
    ///
    /// # Errors
    /// Returns `IncomparableUnits` when the units do not convert.
    pub fn try_gt(&self, other: &Self) -> Result<bool, IncomparableUnits> {
        Ok(!self.try_lt(other)? && !self.try_eq(other)?)
    }

    /// # Errors
    /// Returns `IncomparableUnits` when `try_lt` does.
    pub fn try_ge(&self, other: &Self) -> Result<bool, IncomparableUnits> {
        Ok(!self.try_lt(other)?)
    }
}

impl PartialEq for Age {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for Age {}

impl Hash for Age {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl PartialOrd for Age {
    /// `None` for incomparable units. The zero rule of [`Age::try_lt`] is
    /// not applied here, since it is not symmetric.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(other).ok()
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{AGE_SEPARATOR}{}", self.magnitude, self.unit)?;
        if self.magnitude != 1 {
            write!(f, "s")?;
        }
        Ok(())
    }
}

impl FromStr for Age {
    type Err = AgeParseError;

    /// Parses `<n> <unit>`, e.g. `5 years` or `1 month`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AgeParseError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        let [magnitude, unit] = parts.as_slice() else {
            return Err(AgeParseError::InvalidFormat(trimmed.to_owned()));
        };

        let magnitude = magnitude
            .parse::<u32>()
            .map_err(|_| AgeParseError::InvalidMagnitude((*magnitude).to_owned()))?;
        let unit = unit.parse::<Unit>()?;

        Ok(Self::new(magnitude, unit))
    }
}

impl serde::Serialize for Age {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for Age {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
