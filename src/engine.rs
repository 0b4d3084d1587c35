// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;

use crate::models::{Config, DerivedMetrics, Expense};

fn finite_or_zero(x: f64) -> f64 {
    if x.is_finite() { x } else { 0.0 }
}

pub fn spent_total(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|e| finite_or_zero(e.amount)).sum()
}

/// Derive the budget picture for `today` (a local calendar date).
///
/// Day 0 is `config.trip_start`. Dates before the trip map to day 0 and dates
/// after it ends map to the last day, so `remaining_days` is always in
/// `1..=total_days` and today always counts as a spendable day.
/// Overspending shows up as negative `remaining` and `max_per_day`.
pub fn compute_metrics(config: &Config, expenses: &[Expense], today: NaiveDate) -> DerivedMetrics {
    let total_budget = finite_or_zero(config.total_budget);
    let reserved = finite_or_zero(config.reserved);
    let total_days = config.total_days.max(1);

    let spent = spent_total(expenses);
    let usable = total_budget - reserved;
    let remaining = usable - spent;

    let diff_days = (today - config.trip_start).num_days();
    let last = i64::from(total_days) - 1;
    let day_index = diff_days.clamp(0, last);
    let remaining_days = (i64::from(total_days) - day_index).clamp(1, i64::from(total_days));

    let max_per_day = remaining / remaining_days as f64;

    DerivedMetrics {
        total_budget,
        total_days,
        reserved,
        spent_total: spent,
        remaining,
        day_index: day_index as u32,
        remaining_days: remaining_days as u32,
        max_per_day,
    }
}

