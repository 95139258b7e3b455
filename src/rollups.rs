use std::fmt;

use chrono::{Months, NaiveDate};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::grouping::group_by_investor;
use crate::totals::{group_interest, transaction_stats};
use crate::types::{FundingRecord, InvestorId, LoanSnapshot, LoanStatus, TransactionRecord};

/// loan-level summary shown on loan cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LoanSummary {
    pub total_principal: Money,
    pub total_interest: Money,
    pub average_rate: Rate,
    pub total_amount: Money,
    pub unique_investors: u32,
}

/// summarize one loan's funding records
pub fn loan_summary(records: &[FundingRecord]) -> LoanSummary {
    let stats = transaction_stats(records);
    LoanSummary {
        total_principal: stats.total_principal,
        total_interest: stats.total_interest,
        average_rate: stats.average_rate,
        total_amount: stats.total,
        unique_investors: group_by_investor(records).len() as u32,
    }
}

/// investor-level summary across loans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InvestorSummary {
    pub total_capital: Money,
    pub total_interest: Money,
    pub active_loans: u32,
    pub completed_loans: u32,
    pub overdue_loans: u32,
    pub total_loans: u32,
    /// balance of the chronologically latest transaction
    pub current_balance: Money,
    pub total_gain: Money,
}

/// summarize one investor's positions over the given loan snapshots
///
/// loan counts classify by each loan's stored status, never recomputed here;
/// capital and interest come from the investor's own group within each loan.
pub fn investor_summary(
    investor_id: InvestorId,
    loans: &[LoanSnapshot],
    transactions: &[TransactionRecord],
) -> InvestorSummary {
    let mut summary = InvestorSummary::default();

    for loan in loans {
        let groups = group_by_investor(&loan.records);
        let Some(group) = groups.iter().find(|g| g.investor_id == investor_id) else {
            continue;
        };

        summary.total_capital += group.total_principal();
        summary.total_interest += group_interest(group);
        summary.total_loans += 1;
        match loan.status {
            LoanStatus::PartiallyFunded => summary.active_loans += 1,
            LoanStatus::FullyFunded => summary.completed_loans += 1,
            LoanStatus::Overdue => summary.overdue_loans += 1,
        }
    }

    // latest by date, ties broken by id, latest wins
    summary.current_balance = transactions
        .iter()
        .max_by_key(|t| (t.date, t.id))
        .map(|t| t.balance)
        .unwrap_or(Money::ZERO);
    summary.total_gain = summary.total_capital + summary.total_interest;

    summary
}

/// calendar span between a start date and a due date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LoanDuration {
    pub months: u32,
    pub weeks: u32,
    pub days: u32,
}

impl LoanDuration {
    pub fn is_zero(&self) -> bool {
        self.months == 0 && self.weeks == 0 && self.days == 0
    }
}

impl fmt::Display for LoanDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn unit(count: u32, singular: &str) -> String {
            if count == 1 {
                format!("1 {}", singular)
            } else {
                format!("{} {}s", count, singular)
            }
        }

        let mut parts = Vec::new();
        if self.months > 0 {
            parts.push(unit(self.months, "Month"));
        }
        if self.weeks > 0 {
            parts.push(unit(self.weeks, "Week"));
        }
        if self.days > 0 {
            parts.push(unit(self.days, "Day"));
        }

        if parts.is_empty() {
            write!(f, "0 Days")
        } else {
            write!(f, "{}", parts.join(", "))
        }
    }
}

/// duration from today until the due date
pub fn loan_duration(time: &SafeTimeProvider, due_date: NaiveDate) -> LoanDuration {
    loan_duration_from(time.now().date_naive(), due_date)
}

/// duration between two dates, whole calendar months first, then weeks and
/// days from the remainder; zero and negative spans collapse to zero
pub fn loan_duration_from(start: NaiveDate, due_date: NaiveDate) -> LoanDuration {
    if due_date <= start {
        return LoanDuration::default();
    }

    let mut months = 0u32;
    let mut anchor = start;
    loop {
        match start.checked_add_months(Months::new(months + 1)) {
            Some(next) if next <= due_date => {
                months += 1;
                anchor = next;
            }
            _ => break,
        }
    }

    let remainder = (due_date - anchor).num_days() as u32;
    LoanDuration {
        months,
        weeks: remainder / 7,
        days: remainder % 7,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{InterestPeriod, InterestSpec, PeriodStatus};
    use chrono::{TimeZone, Utc};
    use hourglass_rs::TimeSource;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rate_record(investor: Uuid, amount: i64, percent: u32) -> FundingRecord {
        FundingRecord::single(
            investor,
            Money::from_major(amount),
            InterestSpec::Rate(Rate::from_percentage(percent)),
            date(2024, 1, 1),
        )
    }

    fn loan(status: LoanStatus, records: Vec<FundingRecord>) -> LoanSnapshot {
        LoanSnapshot {
            loan_id: Uuid::new_v4(),
            due_date: date(2024, 12, 1),
            status,
            records,
        }
    }

    #[test]
    fn test_loan_summary_counts_unique_investors() {
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let records = vec![
            rate_record(alice, 6_000, 10),
            rate_record(bob, 4_000, 10),
            rate_record(alice, 2_000, 10),
        ];

        let summary = loan_summary(&records);
        assert_eq!(summary.unique_investors, 2);
        assert_eq!(summary.total_principal, Money::from_major(12_000));
        assert_eq!(summary.total_amount, Money::from_major(13_200));
        assert_eq!(summary.average_rate.as_percentage(), dec!(10));
    }

    #[test]
    fn test_investor_summary_across_loans() {
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let loans = vec![
            loan(LoanStatus::FullyFunded, vec![rate_record(alice, 10_000, 10)]),
            loan(
                LoanStatus::Overdue,
                vec![rate_record(alice, 5_000, 20), rate_record(bob, 3_000, 10)],
            ),
            // alice has no position here; must not count towards her totals
            loan(LoanStatus::PartiallyFunded, vec![rate_record(bob, 8_000, 10)]),
        ];

        let summary = investor_summary(alice, &loans, &[]);
        assert_eq!(summary.total_capital, Money::from_major(15_000));
        assert_eq!(summary.total_interest, Money::from_major(2_000));
        assert_eq!(summary.total_gain, Money::from_major(17_000));
        assert_eq!(summary.total_loans, 2);
        assert_eq!(summary.completed_loans, 1);
        assert_eq!(summary.overdue_loans, 1);
        assert_eq!(summary.active_loans, 0);
        assert_eq!(summary.current_balance, Money::ZERO);
    }

    #[test]
    fn test_investor_summary_multi_period_interest() {
        let alice = Uuid::new_v4();
        let loans = vec![loan(
            LoanStatus::PartiallyFunded,
            vec![FundingRecord::with_periods(
                alice,
                Money::from_major(10_000),
                vec![
                    InterestPeriod::new(
                        date(2024, 2, 1),
                        InterestSpec::Rate(Rate::from_percentage(5)),
                        PeriodStatus::Pending,
                    ),
                    InterestPeriod::new(
                        date(2024, 3, 1),
                        InterestSpec::Rate(Rate::from_percentage(5)),
                        PeriodStatus::Pending,
                    ),
                ],
                date(2024, 1, 1),
            )
            .unwrap()],
        )];

        let summary = investor_summary(alice, &loans, &[]);
        assert_eq!(summary.total_interest, Money::from_major(1_000));
        assert_eq!(summary.active_loans, 1);
    }

    #[test]
    fn test_current_balance_is_latest_transaction() {
        let base = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let transactions = vec![
            TransactionRecord {
                id: 1,
                date: base,
                amount: Money::from_major(100),
                balance: Money::from_major(100),
            },
            TransactionRecord {
                id: 3,
                date: base + chrono::Duration::days(2),
                amount: Money::from_major(-40),
                balance: Money::from_major(60),
            },
            // same instant as id 3; the higher id wins
            TransactionRecord {
                id: 4,
                date: base + chrono::Duration::days(2),
                amount: Money::from_major(15),
                balance: Money::from_major(75),
            },
        ];

        let summary = investor_summary(Uuid::new_v4(), &[], &transactions);
        assert_eq!(summary.current_balance, Money::from_major(75));
    }

    #[test]
    fn test_duration_months_weeks_days() {
        let duration = loan_duration_from(date(2024, 1, 15), date(2024, 4, 24));
        // 3 whole months to april 15, then 9 days
        assert_eq!(
            duration,
            LoanDuration {
                months: 3,
                weeks: 1,
                days: 2
            }
        );
        assert_eq!(duration.to_string(), "3 Months, 1 Week, 2 Days");
    }

    #[test]
    fn test_duration_month_end_clamping() {
        // jan 31 + 1 calendar month clamps to feb 29 in a leap year
        let duration = loan_duration_from(date(2024, 1, 31), date(2024, 2, 29));
        assert_eq!(
            duration,
            LoanDuration {
                months: 1,
                weeks: 0,
                days: 0
            }
        );
        assert_eq!(duration.to_string(), "1 Month");
    }

    #[test]
    fn test_duration_zero_and_past() {
        assert_eq!(
            loan_duration_from(date(2024, 5, 1), date(2024, 5, 1)).to_string(),
            "0 Days"
        );
        assert!(loan_duration_from(date(2024, 5, 2), date(2024, 5, 1)).is_zero());
    }

    #[test]
    fn test_duration_uses_time_provider() {
        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
        ));

        let duration = loan_duration(&time, date(2024, 1, 11));
        assert_eq!(
            duration,
            LoanDuration {
                months: 0,
                weeks: 1,
                days: 3
            }
        );
        assert_eq!(duration.to_string(), "1 Week, 3 Days");
    }
}
