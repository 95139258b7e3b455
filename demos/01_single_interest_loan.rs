/// single-interest loan - two investors, one due date
use chrono::{NaiveDate, TimeZone, Utc};
use loan_funding_rs::{
    amount_due_on_final_date, derive_loan_status_for, loan_duration, loan_summary, FundingRecord,
    InterestSpec, Money, Rate, SafeTimeProvider, TimeSource, Uuid,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== single-interest loan ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 20, 0, 0, 0).unwrap(),
    ));
    let due_date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    // alice funds 10000 at 10%, bob funds 5000 for a flat 400
    let records = vec![
        FundingRecord::single(
            alice,
            Money::from_major(10_000),
            InterestSpec::Rate(Rate::from_percentage(10)),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        ),
        FundingRecord::single(
            bob,
            Money::from_major(5_000),
            InterestSpec::Fixed(Money::from_major(400)),
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        )
        .unpaid(),
    ];

    // 1. loan summary
    let summary = loan_summary(&records);
    println!("1. principal: {}", summary.total_principal);
    println!("   interest:  {}", summary.total_interest);
    println!("   total:     {}", summary.total_amount);
    println!("   weighted rate: {}", summary.average_rate);
    println!("   investors: {}", summary.unique_investors);

    // 2. everything is due on the single due date
    println!("\n2. due on {}: {}", due_date, amount_due_on_final_date(&records));

    // 3. status from due date and payment flags (bob not yet disbursed)
    let status = derive_loan_status_for(&time, due_date, &records);
    println!("\n3. status today: {:?}", status);

    // 4. remaining term
    println!("\n4. remaining term: {}", loan_duration(&time, due_date));

    Ok(())
}
