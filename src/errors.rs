use chrono::NaiveDate;
use thiserror::Error;

use crate::decimal::Money;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("funding record has no investor: {amount} sent {sent_date}")]
    MissingInvestor {
        amount: Money,
        sent_date: NaiveDate,
    },

    #[error("multi-period schedule requires at least one period")]
    EmptySchedule,
}

pub type Result<T> = std::result::Result<T, EngineError>;
