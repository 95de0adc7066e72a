use crate::consts::{MONTH, PLURAL_SUFFIX, WEEK, YEAR};
use crate::{AgeParseError, prelude::*};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The unit an [`Age`](crate::Age) is counted in.
///
/// Years and months convert into each other (1 year = 12 months). Weeks
/// stand alone: they only meet the other units at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "week")]
    Week,
}

impl Unit {
    /// Singular name of the unit
    pub const fn name(self) -> &'static str {
        match self {
            Self::Year => YEAR,
            Self::Month => MONTH,
            Self::Week => WEEK,
        }
    }

    /// Matches a unit word, singular or plural (`year`, `years`).
    pub(crate) fn from_word(word: &str) -> Option<Self> {
        let singular = word.strip_suffix(PLURAL_SUFFIX).unwrap_or(word);
        [Self::Year, Self::Month, Self::Week]
            .into_iter()
            .find(|unit| unit.name() == singular)
    }
}

impl FromStr for Unit {
    type Err = AgeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AgeParseError::EmptyInput);
        }
        Self::from_word(trimmed).ok_or_else(|| AgeParseError::UnknownUnit(trimmed.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_from_str_cases() {
        struct TestCase {
            input:    &'static str,
            expected: Option<Unit>,
        }

        let cases = [
            TestCase { input: "year", expected: Some(Unit::Year) },
            TestCase { input: "years", expected: Some(Unit::Year) },
            TestCase { input: "month", expected: Some(Unit::Month) },
            TestCase { input: " months ", expected: Some(Unit::Month) },
            TestCase { input: "week", expected: Some(Unit::Week) },
            TestCase { input: "weeks", expected: Some(Unit::Week) },
            TestCase { input: "day", expected: None },
            TestCase { input: "yearss", expected: None },
            TestCase { input: "Years", expected: None },
        ];

        for case in &cases {
            assert_eq!(case.input.parse::<Unit>().ok(), case.expected, "input {:?}", case.input);
        }
    }

    #[test]
    fn test_unit_from_str_empty() {
        assert!(matches!("  ".parse::<Unit>(), Err(AgeParseError::EmptyInput)));
    }

    #[test]
    fn test_unit_display() {
        assert_eq!(Unit::Year.to_string(), "year");
        assert_eq!(Unit::Month.to_string(), "month");
        assert_eq!(Unit::Week.to_string(), "week");
    }

    #[test]
    fn test_unit_serde() {
        let json = serde_json::to_string(&Unit::Month).unwrap();
        assert_eq!(json, r#""month""#);

        let parsed: Unit = serde_json::from_str(r#""week""#).unwrap();
        assert_eq!(parsed, Unit::Week);
    }
}
