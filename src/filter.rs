//! FilterEngine: narrow the record collection by region and year.

use crate::models::{FilterCriteria, Record};

/// Borrowed view of the records passing `criteria`, in source order.
///
/// Non-destructive (the source is untouched) and commutative across the two
/// dimensions. An unmatched region or year yields an empty view, not an
/// error.
pub fn apply<'a>(records: &'a [Record], criteria: &FilterCriteria) -> Vec<&'a Record> {
    records.iter().filter(|r| criteria.matches(r)).collect()
}
