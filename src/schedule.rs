use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::grouping::group_by_investor;
use crate::interest::resolve_interest;
use crate::totals::group_interest;
use crate::types::FundingRecord;

/// paid/pending breakdown across a loan's interest periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PaymentProgress {
    /// true iff any record carries two or more interest periods
    pub has_multiple_due_dates: bool,
    pub total_periods: u32,
    pub completed_periods: u32,
    pub pending_periods: u32,
    pub paid_amount: Money,
    pub pending_amount: Money,
}

impl PaymentProgress {
    /// share of periods completed, zero when there are none
    pub fn completion_ratio(&self) -> Rate {
        if self.total_periods == 0 {
            Rate::ZERO
        } else {
            Rate::from_decimal(
                Decimal::from(self.completed_periods) / Decimal::from(self.total_periods),
            )
        }
    }
}

/// the amount attributable to the loan's closing date
///
/// for a multi-period investor only the final period's interest counts here,
/// alongside the principal repaid on that same date; earlier periods are
/// interest-only checkpoints. a single-interest investor owes everything on
/// the one due date. this intentionally differs from `total_amount`, which
/// sums interest across all periods.
pub fn amount_due_on_final_date(records: &[FundingRecord]) -> Money {
    group_by_investor(records)
        .iter()
        .map(|group| {
            let principal = group.total_principal();
            match group.final_period() {
                Some(final_period) => {
                    principal + resolve_interest(principal, &final_period.spec)
                }
                None => principal + group_interest(group),
            }
        })
        .sum()
}

/// the amount currently past due, not the amount remaining
///
/// multi-period investors contribute only their overdue periods' interest;
/// principal joins in only when the chronologically final period is itself
/// overdue. a single-interest investor has exactly one due date, so overdue
/// means the whole amount.
pub fn overdue_amount(records: &[FundingRecord]) -> Money {
    group_by_investor(records)
        .iter()
        .map(|group| {
            let principal = group.total_principal();
            match group.multi_periods() {
                Some(periods) => {
                    if !periods.iter().any(|p| p.is_overdue()) {
                        return Money::ZERO;
                    }
                    let overdue_interest: Money = periods
                        .iter()
                        .filter(|p| p.is_overdue())
                        .map(|p| resolve_interest(principal, &p.spec))
                        .sum();
                    match group.final_period() {
                        Some(final_period) if final_period.is_overdue() => {
                            overdue_interest + principal
                        }
                        _ => overdue_interest,
                    }
                }
                None => principal + group_interest(group),
            }
        })
        .sum()
}

/// paid vs. pending across all interest periods of all investors
///
/// periods count as paid only when `Completed`; `Pending` and `Overdue` both
/// land in the pending bucket. the final period's contribution includes the
/// investor's principal in whichever bucket it falls into.
pub fn payment_progress(records: &[FundingRecord]) -> PaymentProgress {
    let has_multiple_due_dates = records.iter().any(|r| r.schedule.periods().len() >= 2);
    if !has_multiple_due_dates {
        return PaymentProgress::default();
    }

    let mut progress = PaymentProgress {
        has_multiple_due_dates,
        ..PaymentProgress::default()
    };

    for group in &group_by_investor(records) {
        let Some(periods) = group.multi_periods() else {
            continue;
        };
        let principal = group.total_principal();

        let mut ordered: Vec<_> = periods.iter().collect();
        ordered.sort_by_key(|p| p.due_date);

        let last = ordered.len() - 1;
        for (index, period) in ordered.iter().enumerate() {
            let mut contribution = resolve_interest(principal, &period.spec);
            if index == last {
                contribution += principal;
            }

            progress.total_periods += 1;
            if period.is_completed() {
                progress.completed_periods += 1;
                progress.paid_amount += contribution;
            } else {
                progress.pending_periods += 1;
                progress.pending_amount += contribution;
            }
        }
    }

    progress
}
