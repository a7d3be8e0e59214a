//! Budget utilization report.
//!
//! [`evaluate`] is a pure function of a budget and an already-aggregated
//! spent total; callers are responsible for defaulting the total to zero
//! when no expenses matched.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::budgets;

/// Snapshot of how much of a budget has been consumed.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStatus {
    pub budget: budgets::Model,
    pub budget_amount: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub percentage_used: Decimal,
    pub is_over_budget: bool,
    pub alert_threshold_reached: bool,
}

/// Combines a budget with its spent total.
///
/// `percentage_used` is the ratio `spent / amount` rounded to 4 decimal
/// places half-up and only then scaled by 100, so `420 / 500` yields
/// exactly `84.0000`. A budget whose amount is zero or negative reports
/// `percentage_used = 0` instead of dividing by zero.
pub fn evaluate(budget: budgets::Model, spent: Decimal) -> BudgetStatus {
    let remaining = budget.amount - spent;

    let percentage_used = if budget.amount > Decimal::ZERO {
        let mut ratio =
            (spent / budget.amount).round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero);
        ratio.rescale(4);
        ratio * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    let is_over_budget = spent > budget.amount;
    let alert_threshold_reached = percentage_used >= budget.alert_threshold;

    BudgetStatus {
        budget_amount: budget.amount,
        spent,
        remaining,
        percentage_used,
        is_over_budget,
        alert_threshold_reached,
        budget,
    }
}
