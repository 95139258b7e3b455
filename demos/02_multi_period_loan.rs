/// multi-period loan - quarterly interest checkpoints, principal at the end
use chrono::NaiveDate;
use loan_funding_rs::{
    amount_due_on_final_date, overdue_amount, payment_progress, total_amount, FundingRecord,
    InterestPeriod, InterestSpec, Money, PeriodStatus, Rate, Uuid,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== multi-period loan ===\n");

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    let investor = Uuid::new_v4();

    // two disbursements from the same investor; the quarterly periods apply
    // once against their combined 10000 principal
    let records = vec![
        FundingRecord::with_periods(
            investor,
            Money::from_major(6_000),
            vec![
                InterestPeriod::new(
                    date(3, 1),
                    InterestSpec::Rate(Rate::from_percentage(5)),
                    PeriodStatus::Completed,
                ),
                InterestPeriod::new(
                    date(6, 1),
                    InterestSpec::Rate(Rate::from_percentage(5)),
                    PeriodStatus::Overdue,
                ),
                InterestPeriod::new(
                    date(9, 1),
                    InterestSpec::Rate(Rate::from_percentage(5)),
                    PeriodStatus::Pending,
                ),
            ],
            date(1, 5),
        )?,
        FundingRecord::single(
            investor,
            Money::from_major(4_000),
            InterestSpec::Rate(Rate::from_percentage(10)),
            date(1, 20),
        ),
    ];

    // 1. lifetime total across all three periods
    println!("1. lifetime total: {}", total_amount(&records));

    // 2. the closing date carries principal plus only the final period
    println!("2. due on final date: {}", amount_due_on_final_date(&records));

    // 3. one slipped checkpoint; principal is not past due yet
    println!("3. currently overdue: {}", overdue_amount(&records));

    // 4. paid vs pending across the schedule
    let progress = payment_progress(&records);
    println!(
        "4. periods {}/{} completed, paid {}, pending {}",
        progress.completed_periods,
        progress.total_periods,
        progress.paid_amount,
        progress.pending_amount
    );

    Ok(())
}
