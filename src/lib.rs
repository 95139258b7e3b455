pub mod decimal;
pub mod errors;
pub mod grouping;
pub mod interest;
pub mod rollups;
pub mod schedule;
pub mod status;
pub mod totals;
pub mod types;

// re-export key types
pub use decimal::{Money, Rate};
pub use errors::{EngineError, Result};
pub use grouping::{group_by_investor, group_by_investor_with, GroupingPolicy, InvestorGroup, InvestorGroups};
pub use interest::resolve_interest;
pub use rollups::{
    investor_summary, loan_duration, loan_duration_from, loan_summary, InvestorSummary,
    LoanDuration, LoanSummary,
};
pub use schedule::{amount_due_on_final_date, overdue_amount, payment_progress, PaymentProgress};
pub use status::{derive_loan_status, derive_loan_status_for};
pub use totals::{
    average_rate, total_amount, total_interest, total_principal, transaction_stats,
    TransactionStats,
};
pub use types::{
    FundingRecord, InterestPeriod, InterestSchedule, InterestSpec, InvestorId, LoanId,
    LoanSnapshot, LoanStatus, PeriodStatus, TransactionRecord,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
