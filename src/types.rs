use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::errors::{EngineError, Result};

/// unique identifier for an investor
pub type InvestorId = Uuid;

/// unique identifier for a loan
pub type LoanId = Uuid;

/// interest terms for one principal base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterestSpec {
    /// percentage of the principal
    Rate(Rate),
    /// flat amount owed regardless of principal, including zero principal
    Fixed(Money),
}

/// completion state of one interest period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodStatus {
    Pending,
    Completed,
    Overdue,
}

/// a dated checkpoint within a multi-period schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestPeriod {
    pub due_date: NaiveDate,
    pub spec: InterestSpec,
    pub status: PeriodStatus,
}

impl InterestPeriod {
    pub fn new(due_date: NaiveDate, spec: InterestSpec, status: PeriodStatus) -> Self {
        Self {
            due_date,
            spec,
            status,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == PeriodStatus::Completed
    }

    pub fn is_overdue(&self) -> bool {
        self.status == PeriodStatus::Overdue
    }
}

/// how interest accrues on a funding record
///
/// `Single` resolves the record's own spec against the record's own amount.
/// `Multiple` resolves each period against the investor's total principal for
/// the loan; the period with the latest due date is the final period and is
/// the only one that carries principal repayment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterestSchedule {
    Single(InterestSpec),
    Multiple(Vec<InterestPeriod>),
}

impl InterestSchedule {
    /// build a multi-period schedule, ordered by due date
    pub fn multiple(mut periods: Vec<InterestPeriod>) -> Result<Self> {
        if periods.is_empty() {
            return Err(EngineError::EmptySchedule);
        }
        periods.sort_by_key(|p| p.due_date);
        Ok(InterestSchedule::Multiple(periods))
    }

    pub fn is_multiple(&self) -> bool {
        matches!(self, InterestSchedule::Multiple(_))
    }

    /// periods of a multi-period schedule, empty slice for single
    pub fn periods(&self) -> &[InterestPeriod] {
        match self {
            InterestSchedule::Single(_) => &[],
            InterestSchedule::Multiple(periods) => periods,
        }
    }

    /// the period with the latest due date; ties resolve to the later entry
    pub fn final_period(&self) -> Option<&InterestPeriod> {
        self.periods().iter().max_by_key(|p| p.due_date)
    }
}

/// one investor's capital contribution to one loan
///
/// read-only snapshot at the engine boundary; aggregators never mutate it.
/// `investor_id` is optional to tolerate partially-formed draft records,
/// see `GroupingPolicy` for how unattributed records are handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingRecord {
    pub amount: Money,
    pub schedule: InterestSchedule,
    pub sent_date: NaiveDate,
    /// whether the disbursement occurred on or before today
    pub is_paid: bool,
    pub investor_id: Option<InvestorId>,
}

impl FundingRecord {
    /// record with a single interest spec of its own
    pub fn single(
        investor_id: InvestorId,
        amount: Money,
        spec: InterestSpec,
        sent_date: NaiveDate,
    ) -> Self {
        Self {
            amount,
            schedule: InterestSchedule::Single(spec),
            sent_date,
            is_paid: true,
            investor_id: Some(investor_id),
        }
    }

    /// record carrying the investor's multi-period schedule
    pub fn with_periods(
        investor_id: InvestorId,
        amount: Money,
        periods: Vec<InterestPeriod>,
        sent_date: NaiveDate,
    ) -> Result<Self> {
        Ok(Self {
            amount,
            schedule: InterestSchedule::multiple(periods)?,
            sent_date,
            is_paid: true,
            investor_id: Some(investor_id),
        })
    }

    pub fn unpaid(mut self) -> Self {
        self.is_paid = false;
        self
    }
}

/// automatic loan status derived from due date and payment flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanStatus {
    /// every funding record disbursed
    FullyFunded,
    /// at least one funding record not yet disbursed
    PartiallyFunded,
    /// due date reached, takes priority over payment state
    Overdue,
}

/// a ledger entry on an investor's account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: u64,
    pub date: DateTime<Utc>,
    pub amount: Money,
    /// running balance after this transaction
    pub balance: Money,
}

/// one loan with its stored status and funding records, as fetched per request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanSnapshot {
    pub loan_id: LoanId,
    pub due_date: NaiveDate,
    pub status: LoanStatus,
    pub records: Vec<FundingRecord>,
}
