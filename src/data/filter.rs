use super::model::SalaryRecord;

// ---------------------------------------------------------------------------
// Record validity
// ---------------------------------------------------------------------------

/// A record is usable when it has a truthy `work_year` and a
/// `salary_in_usd` that coerces to a number (blank counts as zero).
pub fn is_valid(record: &SalaryRecord) -> bool {
    record.work_year.is_truthy() && record.salary_in_usd.as_f64().is_some()
}

/// Return the records that pass [`is_valid`], in their original order.
///
/// Invalid records are dropped silently; callers only get to see how many
/// survived.
pub fn filter_valid(records: &[SalaryRecord]) -> Vec<&SalaryRecord> {
    records.iter().filter(|r| is_valid(r)).collect()
}
