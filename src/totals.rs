use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::grouping::{group_by_investor, InvestorGroup};
use crate::interest::resolve_interest;
use crate::types::{FundingRecord, InterestSchedule};

/// bundled loan or investor totals consumed by the rollups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TransactionStats {
    pub total_principal: Money,
    pub total_interest: Money,
    pub average_rate: Rate,
    pub total: Money,
}

/// total disbursed principal over all records, grouped or not
pub fn total_principal(records: &[FundingRecord]) -> Money {
    records.iter().map(|r| r.amount).sum()
}

/// lifetime interest for one investor group
///
/// a multi-period group resolves every period against the group's total
/// principal; a single-interest group resolves each record independently.
pub(crate) fn group_interest(group: &InvestorGroup<'_>) -> Money {
    match group.multi_periods() {
        Some(periods) => {
            let principal = group.total_principal();
            periods
                .iter()
                .map(|p| resolve_interest(principal, &p.spec))
                .sum()
        }
        None => group
            .records
            .iter()
            .map(|r| match &r.schedule {
                InterestSchedule::Single(spec) => resolve_interest(r.amount, spec),
                InterestSchedule::Multiple(_) => Money::ZERO,
            })
            .sum(),
    }
}

/// total interest over the loan's whole life, across all interest periods,
/// not filtered by date or period status
pub fn total_interest(records: &[FundingRecord]) -> Money {
    group_by_investor(records)
        .iter()
        .map(group_interest)
        .sum()
}

/// principal plus lifetime interest
pub fn total_amount(records: &[FundingRecord]) -> Money {
    total_principal(records) + total_interest(records)
}

/// weighted average rate derived from the totals, zero when no principal
///
/// never the arithmetic mean of per-record rates; fixed-interest records
/// weigh in through the interest they contribute.
pub fn average_rate(records: &[FundingRecord]) -> Rate {
    Rate::from_ratio(total_interest(records), total_principal(records))
}

/// compute all totals in one pass over the grouped records
pub fn transaction_stats(records: &[FundingRecord]) -> TransactionStats {
    let principal = total_principal(records);
    let interest = total_interest(records);
    TransactionStats {
        total_principal: principal,
        total_interest: interest,
        average_rate: Rate::from_ratio(interest, principal),
        total: principal + interest,
    }
}
