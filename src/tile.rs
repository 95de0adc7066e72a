use tracing::debug;

use crate::range::upper_bounds_eq;
use crate::{AgeRange, IncomparableUnits};

/// Checks that `parts` cover `whole` exactly: no gap, no overlap, and the
/// outer bounds line up.
///
/// The order of `parts` does not matter. An empty `parts` tiles nothing.
///
/// # Errors
/// Returns `IncomparableUnits` if the parts cannot be sorted (non-zero lower
/// bounds in both weeks and years/months) or if a pair of touching bounds
/// cannot be compared.
pub fn tile(parts: &[AgeRange], whole: &AgeRange) -> Result<bool, IncomparableUnits> {
    let mut sorted: Vec<&AgeRange> = parts.iter().collect();
    ensure_sortable(&sorted)?;
    sorted.sort_by_key(|part| part.lower().canonical());

    let (Some(first), Some(last)) = (sorted.first(), sorted.last()) else {
        debug!(%whole, "no parts to tile with");
        return Ok(false);
    };

    if !first.lower().try_eq(&whole.lower())? {
        debug!(%whole, part = %first, "first part does not start at the lower bound");
        return Ok(false);
    }
    if !upper_bounds_eq(last.upper(), whole.upper())? {
        debug!(%whole, part = %last, "last part does not end at the upper bound");
        return Ok(false);
    }

    for pair in sorted.windows(2) {
        let (left, right) = (pair[0], pair[1]);
        if !upper_bounds_eq(left.upper(), Some(right.lower()))? {
            debug!(%whole, %left, %right, "adjacent parts leave a gap or overlap");
            return Ok(false);
        }
    }

    Ok(true)
}

/// Lower bounds must all be zero or share one family of units (years and
/// months, or weeks) for the sort to be meaningful.
fn ensure_sortable(parts: &[&AgeRange]) -> Result<(), IncomparableUnits> {
    let mut in_months = None;
    let mut in_weeks = None;

    for lower in parts.iter().map(|part| part.lower()).filter(|lower| !lower.is_zero()) {
        if lower.in_months().is_some() {
            in_months.get_or_insert(lower);
        } else {
            in_weeks.get_or_insert(lower);
        }
    }

    match (in_months, in_weeks) {
        (Some(lhs), Some(rhs)) => Err(IncomparableUnits { lhs, rhs }),
        _ => Ok(()),
    }
}
