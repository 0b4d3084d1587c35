// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::compute_metrics;
use crate::models::DerivedMetrics;
use crate::store::load_state;
use crate::utils::{fmt_brl, maybe_print_json, parse_date};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, sub: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let as_of = match sub.get_one::<String>("as-of") {
        Some(s) => parse_date(s)?,
        None => today,
    };
    let m = metrics(conn, today, as_of)?;

    let payload = json!({ "metrics": m, "overBudget": m.is_over_budget(), "asOf": as_of });
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &payload)? {
        return Ok(());
    }
    for line in summary_lines(&m) {
        println!("{}", line);
    }
    Ok(())
}

/// Metrics for `as_of`; `today` is only the default trip start when nothing
/// is stored yet.
pub fn metrics(conn: &Connection, today: NaiveDate, as_of: NaiveDate) -> Result<DerivedMetrics> {
    let state = load_state(conn, today)?;
    Ok(compute_metrics(&state.config, &state.expenses, as_of))
}

pub fn summary_lines(m: &DerivedMetrics) -> Vec<String> {
    let mut out = vec![
        format!("Remaining:   {}", fmt_brl(m.remaining)),
        format!("Spent:       {}", fmt_brl(m.spent_total)),
        format!("Max per day: {}", fmt_brl(m.max_per_day)),
        format!(
            "Days left (including today): {} • Current day: {}/{}",
            m.remaining_days,
            m.day_index + 1,
            m.total_days
        ),
    ];
    if m.is_over_budget() {
        out.push(format!("⚠ Over budget by {}", fmt_brl(-m.remaining)));
    }
    out
}
