use crate::decimal::Money;
use crate::errors::{EngineError, Result};
use crate::types::{FundingRecord, InterestPeriod, InvestorId};

/// how to treat funding records with no investor identity
///
/// draft records authored in the UI can be saved before an investor is
/// attached; the permissive policy keeps aggregates usable over such data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupingPolicy {
    /// silently exclude unattributed records from every group
    #[default]
    DropUnattributed,
    /// fail on the first unattributed record
    Strict,
}

/// all funding records for one loan belonging to one investor
///
/// the unit over which multi-period interest is computed: periods apply once
/// per investor against the investor's total principal, never per record.
#[derive(Debug, Clone)]
pub struct InvestorGroup<'a> {
    pub investor_id: InvestorId,
    pub records: Vec<&'a FundingRecord>,
}

impl<'a> InvestorGroup<'a> {
    /// the investor's total principal across all records for the loan
    pub fn total_principal(&self) -> Money {
        self.records.iter().map(|r| r.amount).sum()
    }

    /// the investor's multi-period schedule, if any record carries one
    pub fn multi_periods(&self) -> Option<&'a [InterestPeriod]> {
        self.records
            .iter()
            .map(|r| r.schedule.periods())
            .find(|periods| !periods.is_empty())
    }

    /// the period with the latest due date of the multi-period schedule
    pub fn final_period(&self) -> Option<&'a InterestPeriod> {
        self.multi_periods()?.iter().max_by_key(|p| p.due_date)
    }
}

/// investor groups in first-appearance order
#[derive(Debug, Clone, Default)]
pub struct InvestorGroups<'a> {
    groups: Vec<InvestorGroup<'a>>,
}

impl<'a> InvestorGroups<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &InvestorGroup<'a>> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<'a> IntoIterator for &'a InvestorGroups<'a> {
    type Item = &'a InvestorGroup<'a>;
    type IntoIter = std::slice::Iter<'a, InvestorGroup<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// partition funding records by investor, preserving record order within each
/// group and first-appearance order across groups, dropping unattributed
/// records
pub fn group_by_investor(records: &[FundingRecord]) -> InvestorGroups<'_> {
    partition(records).0
}

/// partition under an explicit policy; `Strict` fails on the first record
/// without an investor
pub fn group_by_investor_with(
    records: &[FundingRecord],
    policy: GroupingPolicy,
) -> Result<InvestorGroups<'_>> {
    let (groups, dropped) = partition(records);
    if policy == GroupingPolicy::Strict {
        if let Some(record) = dropped {
            return Err(EngineError::MissingInvestor {
                amount: record.amount,
                sent_date: record.sent_date,
            });
        }
    }
    Ok(groups)
}

fn partition(records: &[FundingRecord]) -> (InvestorGroups<'_>, Option<&FundingRecord>) {
    let mut groups: Vec<InvestorGroup<'_>> = Vec::new();
    let mut first_dropped = None;

    for record in records {
        let investor_id = match record.investor_id {
            Some(id) => id,
            None => {
                first_dropped.get_or_insert(record);
                continue;
            }
        };

        match groups.iter_mut().find(|g| g.investor_id == investor_id) {
            Some(group) => group.records.push(record),
            None => groups.push(InvestorGroup {
                investor_id,
                records: vec![record],
            }),
        }
    }

    (InvestorGroups { groups }, first_dropped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use crate::types::InterestSpec;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(investor_id: InvestorId, amount: i64) -> FundingRecord {
        FundingRecord::single(
            investor_id,
            Money::from_major(amount),
            InterestSpec::Rate(Rate::from_percentage(10)),
            date(2024, 1, 1),
        )
    }

    #[test]
    fn test_groups_preserve_first_appearance_order() {
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let records = vec![
            record(alice, 100),
            record(bob, 200),
            record(alice, 300),
        ];

        let groups = group_by_investor(&records);
        assert_eq!(groups.len(), 2);

        let collected: Vec<_> = groups.iter().collect();
        assert_eq!(collected[0].investor_id, alice);
        assert_eq!(collected[0].records.len(), 2);
        assert_eq!(collected[0].total_principal(), Money::from_major(400));
        assert_eq!(collected[1].investor_id, bob);
        assert_eq!(collected[1].total_principal(), Money::from_major(200));
    }

    #[test]
    fn test_unattributed_record_dropped_by_default() {
        let alice = Uuid::new_v4();
        let mut draft = record(alice, 500);
        draft.investor_id = None;
        let records = vec![record(alice, 100), draft];

        let groups = group_by_investor(&records);
        assert_eq!(groups.len(), 1);
        assert_eq!(
            groups.iter().next().unwrap().total_principal(),
            Money::from_major(100)
        );
    }

    #[test]
    fn test_unattributed_record_fails_in_strict_mode() {
        let mut draft = record(Uuid::new_v4(), 500);
        draft.investor_id = None;

        let err = group_by_investor_with(&[draft], GroupingPolicy::Strict).unwrap_err();
        assert!(matches!(err, EngineError::MissingInvestor { .. }));
    }

    #[test]
    fn test_strict_mode_passes_fully_attributed_records() {
        let alice = Uuid::new_v4();
        let records = vec![record(alice, 100), record(alice, 200)];

        let groups = group_by_investor_with(&records, GroupingPolicy::Strict).unwrap();
        assert_eq!(groups.len(), 1);
    }

    #[test]
    fn test_empty_records_yield_no_groups() {
        let groups = group_by_investor(&[]);
        assert!(groups.is_empty());
    }
}
