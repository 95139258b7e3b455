use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;

use crate::types::{FundingRecord, LoanStatus};

/// derive the automatic loan status from the due date and payment flags
///
/// the due-date check wins over payment state: a loan whose due date has
/// arrived is overdue even when every record is paid out. dates compare at
/// day granularity, so a loan becomes overdue at midnight of its due date.
/// recomputed on every save, never stored as independent truth.
pub fn derive_loan_status(
    time: &SafeTimeProvider,
    due_date: NaiveDate,
    has_unpaid_record: bool,
) -> LoanStatus {
    let today = time.now().date_naive();
    if today >= due_date {
        LoanStatus::Overdue
    } else if has_unpaid_record {
        LoanStatus::PartiallyFunded
    } else {
        LoanStatus::FullyFunded
    }
}

/// convenience over a loan's funding records
pub fn derive_loan_status_for(
    time: &SafeTimeProvider,
    due_date: NaiveDate,
    records: &[FundingRecord],
) -> LoanStatus {
    derive_loan_status(time, due_date, records.iter().any(|r| !r.is_paid))
}
