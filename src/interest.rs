use crate::decimal::Money;
use crate::types::InterestSpec;

/// resolve interest for one principal base under one interest spec
///
/// `Rate` takes a percentage of the principal; `Fixed` is owed as-is,
/// independent of the principal, including a zero principal.
pub fn resolve_interest(principal: Money, spec: &InterestSpec) -> Money {
    match spec {
        InterestSpec::Rate(rate) => principal.apply_rate(*rate),
        InterestSpec::Fixed(amount) => *amount,
    }
}
