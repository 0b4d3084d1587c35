// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{ConfigInput, save_config};
use crate::store::{load_state, save_state};
use crate::utils::{fmt_brl, maybe_print_json, parse_amount, parse_date, pretty_table};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(conn, sub, today)?,
        Some(("set", sub)) => set(conn, sub, today)?,
        _ => {}
    }
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let state = load_state(conn, today)?;
    let c = &state.config;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), c)? {
        let rows = vec![
            vec!["Total budget".into(), fmt_brl(c.total_budget)],
            vec!["Days".into(), c.total_days.to_string()],
            vec!["Reserved".into(), fmt_brl(c.reserved)],
            vec!["Trip start".into(), c.trip_start.to_string()],
        ];
        println!("{}", pretty_table(&["Setting", "Value"], rows));
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let state = load_state(conn, today)?;
    let mut input = ConfigInput::from_config(&state.config);
    if let Some(s) = sub.get_one::<String>("budget") {
        input.total_budget = parse_amount(s);
    }
    if let Some(s) = sub.get_one::<String>("days") {
        input.total_days = s
            .trim()
            .parse::<i64>()
            .with_context(|| format!("Invalid number of days '{}'", s))?;
    }
    if let Some(s) = sub.get_one::<String>("reserved") {
        input.reserved = Some(parse_amount(s));
    }
    if let Some(s) = sub.get_one::<String>("start") {
        input.trip_start = Some(parse_date(s)?);
    }

    let next = save_config(&state, input, today)?;
    save_state(conn, &next)?;
    let c = &next.config;
    println!(
        "Trip set: {} over {} days from {} (reserved {})",
        fmt_brl(c.total_budget),
        c.total_days,
        c.trip_start,
        fmt_brl(c.reserved)
    );
    Ok(())
}
