//! Age-range labels as they appear in demographic tables.
//!
//! | Label                | Range                    |
//! |----------------------|--------------------------|
//! | `5 years`            | `[5 years, 6 years)`     |
//! | `10+ years`          | `[10 years, ∞)`          |
//! | `5-9 years`          | `[5 years, 10 years)`    |
//! | `5-<10 years`        | `[5 years, 10 years)`    |
//! | `6 months-4 years`   | `[6 months, 5 years)`    |
//! | `6 months-<5 years`  | `[6 months, 5 years)`    |
//! | `1-11 months`        | `[1 month, 12 months)`   |
//! | `1-<12 months`       | `[1 month, 12 months)`   |
//!
//! A plain upper bound is inclusive of that whole year or month; a `<`
//! upper bound is exclusive. Unit words may be singular or plural.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use crate::{Age, AgeRange};

/// Text that no age-range pattern recognizes.
///
/// Failing to parse is an expected outcome for free-text labels, so this
/// is returned as an ordinary `Err` value and carries the original input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unrecognized age range: {text:?}")]
pub struct ParseFailure {
    pub text: String,
}

impl ParseFailure {
    fn new(text: &str) -> Self {
        Self { text: text.to_owned() }
    }
}

/// Builds a range from the numbers captured by a pattern, in order.
/// `None` when the numbers do not make a valid range.
type Builder = fn(&[u32]) -> Option<AgeRange>;

struct Pattern {
    regex: Regex,
    build: Builder,
}

/// Tried in order; the first full match decides the result.
static PATTERNS: LazyLock<Vec<Pattern>> = LazyLock::new(|| {
    vec![
        pattern(r"^(\d+) years?$", |n| {
            bounded(Age::years(n[0]), Age::years(n[0].checked_add(1)?))
        }),
        pattern(r"^(\d+)\+ years?$", |n| Some(AgeRange::unbounded(Age::years(n[0])))),
        pattern(r"^(\d+)-(\d+) years?$", |n| {
            bounded(Age::years(n[0]), Age::years(n[1].checked_add(1)?))
        }),
        pattern(r"^(\d+)-<(\d+) years?$", |n| bounded(Age::years(n[0]), Age::years(n[1]))),
        pattern(r"^(\d+) months?-(\d+) years?$", |n| {
            bounded(Age::months(n[0]), Age::years(n[1].checked_add(1)?))
        }),
        pattern(r"^(\d+) months?-<(\d+) years?$", |n| bounded(Age::months(n[0]), Age::years(n[1]))),
        pattern(r"^(\d+)-(\d+) months?$", |n| {
            bounded(Age::months(n[0]), Age::months(n[1].checked_add(1)?))
        }),
        pattern(r"^(\d+)-<(\d+) months?$", |n| bounded(Age::months(n[0]), Age::months(n[1]))),
    ]
});

#[allow(clippy::expect_used)]
fn pattern(regex: &str, build: Builder) -> Pattern {
    Pattern {
        regex: Regex::new(regex).expect("age range patterns are valid regexes"),
        build,
    }
}

fn bounded(lower: Age, upper: Age) -> Option<AgeRange> {
    match AgeRange::try_new(lower, Some(upper)) {
        Ok(range) => Some(range),
        Err(err) => {
            debug!(%err, "age range label has unusable bounds");
            None
        },
    }
}

/// Parses an age-range label such as `5-9 years` or `10+ years`.
///
/// Surrounding whitespace is ignored.
///
/// # Errors
/// Returns `ParseFailure` with the original text when no pattern matches,
/// or when the matched numbers do not form a valid range (`5-3 years`,
/// numbers that overflow).
pub fn parse_range(text: &str) -> Result<AgeRange, ParseFailure> {
    let trimmed = text.trim();

    let Some((pattern, captures)) = PATTERNS
        .iter()
        .find_map(|pattern| pattern.regex.captures(trimmed).map(|captures| (pattern, captures)))
    else {
        debug!(text, "no age range pattern matched");
        return Err(ParseFailure::new(text));
    };

    let numbers: Option<Vec<u32>> = captures
        .iter()
        .skip(1)
        .flatten()
        .map(|group| group.as_str().parse().ok())
        .collect();

    match numbers.and_then(|numbers| (pattern.build)(&numbers)) {
        Some(range) => {
            trace!(text, %range, "parsed age range");
            Ok(range)
        },
        None => {
            debug!(text, pattern = pattern.regex.as_str(), "age range label matched but is invalid");
            Err(ParseFailure::new(text))
        },
    }
}

impl FromStr for AgeRange {
    type Err = ParseFailure;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_range(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(lower: Age, upper: Age) -> AgeRange {
        AgeRange::new(lower, Some(upper)).unwrap()
    }

    #[test]
    fn test_parse_cases() {
        struct TestCase {
            input:    &'static str,
            expected: AgeRange,
        }

        let cases = [
            TestCase { input: "5 years", expected: range(Age::years(5), Age::years(6)) },
            TestCase { input: "1 year", expected: range(Age::years(1), Age::years(2)) },
            TestCase { input: "0 years", expected: range(Age::years(0), Age::years(1)) },
            TestCase { input: "10+ years", expected: AgeRange::unbounded(Age::years(10)) },
            TestCase { input: "85+ year", expected: AgeRange::unbounded(Age::years(85)) },
            TestCase { input: "5-9 years", expected: range(Age::years(5), Age::years(10)) },
            TestCase { input: "5-<10 years", expected: range(Age::years(5), Age::years(10)) },
            TestCase { input: "6 months-4 years", expected: range(Age::months(6), Age::years(5)) },
            TestCase { input: "1 month-<5 years", expected: range(Age::months(1), Age::years(5)) },
            TestCase { input: "1-11 months", expected: range(Age::months(1), Age::months(12)) },
            TestCase { input: "0-<6 months", expected: range(Age::months(0), Age::months(6)) },
            TestCase { input: "  15-19 years\n", expected: range(Age::years(15), Age::years(20)) },
        ];

        for case in &cases {
            let parsed = parse_range(case.input).unwrap_or_else(|err| panic!("{err}"));
            assert_eq!(parsed.try_eq(&case.expected), Ok(true), "input {:?}: got {parsed}", case.input);
            assert_eq!(parsed.lower().unit(), case.expected.lower().unit(), "input {:?}", case.input);
        }
    }

    #[test]
    fn test_parse_units_are_kept() {
        let parsed = parse_range("6 months-4 years").unwrap();
        assert_eq!(parsed.lower().unit(), crate::Unit::Month);
        assert_eq!(parsed.upper().map(|age| age.unit()), Some(crate::Unit::Year));
    }

    #[test]
    fn test_parse_failure_cases() {
        let inputs = [
            "foo",
            "",
            "5",
            "years",
            "5 weeks",
            "5 days",
            "-5 years",
            "5.5 years",
            "5 - 9 years",
            "5-9",
            "10+ months",
            "All ages",
            "5 years and over",
        ];

        for input in inputs {
            let result = parse_range(input);
            assert_eq!(result, Err(ParseFailure { text: input.to_owned() }), "input {input:?}");
        }
    }

    #[test]
    fn test_parse_failure_keeps_original_text() {
        let err = parse_range("  foo ").unwrap_err();
        assert_eq!(err.text, "  foo ");
        assert_eq!(err.to_string(), r#"Unrecognized age range: "  foo ""#);
    }

    #[test]
    fn test_parse_matched_but_invalid() {
        assert!(parse_range("9-5 years").is_err());
        assert!(parse_range("5-<5 years").is_err());
        assert!(parse_range("24 months-<1 years").is_err());
        assert!(parse_range("99999999999 years").is_err());
        assert!(parse_range("4294967295 years").is_err());
        assert!(parse_range("4294967295+ years").is_ok());
    }

    #[test]
    fn test_parse_is_deterministic() {
        for input in ["5 years", "10+ years", "6 months-<2 years", "nope"] {
            assert_eq!(parse_range(input), parse_range(input));
        }
    }

    #[test]
    fn test_from_str() {
        let parsed: AgeRange = "20-24 years".parse().unwrap();
        assert_eq!(parsed.try_eq(&range(Age::years(20), Age::years(25))), Ok(true));
        assert!("twenty".parse::<AgeRange>().is_err());
    }

    #[test]
    fn test_patterns_compile() {
        assert_eq!(PATTERNS.len(), 8);
    }
}
