/// Months in one year, the only fixed conversion between units
pub const MONTHS_PER_YEAR: u64 = 12;

/// Singular unit names, as written in age-range labels
pub const YEAR: &str = "year";
/// Singular name for months
pub const MONTH: &str = "month";
/// Singular name for weeks
pub const WEEK: &str = "week";

/// Plural suffix accepted after any unit name
pub(crate) const PLURAL_SUFFIX: char = 's';

/// Separator between magnitude and unit in a single age (`5 years`)
pub const AGE_SEPARATOR: char = ' ';

/// Rendered in place of a missing upper bound
pub const UNBOUNDED: &str = "∞";
