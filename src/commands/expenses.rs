// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{
    NewExpense, add_expense, display_to_insertion_index, remove_expense, remove_expense_by_id,
};
use crate::models::AppState;
use crate::store::{load_state, save_state};
use crate::utils::{fmt_brl, fmt_timestamp_es_ar, maybe_print_json, parse_amount, pretty_table};
use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches, now: DateTime<Local>) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub, now)?,
        Some(("list", sub)) => list(conn, sub, now)?,
        Some(("rm", sub)) => rm(conn, sub, now)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches, now: DateTime<Local>) -> Result<()> {
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap());
    let category = sub.get_one::<String>("category").cloned().unwrap_or_default();
    let note = sub.get_one::<String>("note").cloned().unwrap_or_default();

    let state = load_state(conn, now.date_naive())?;
    let next = add_expense(
        &state,
        NewExpense {
            amount,
            category,
            note,
        },
        now.with_timezone(&Utc),
    )?;
    save_state(conn, &next)?;
    if let Some(e) = next.expenses.last() {
        println!("Recorded #{} {} • {}", e.id, e.category, fmt_brl(e.amount));
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches, now: DateTime<Local>) -> Result<()> {
    let state = load_state(conn, now.date_naive())?;
    let data = list_rows(&state);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No expenses recorded yet.");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|r| {
            vec![
                r.position.to_string(),
                r.id.to_string(),
                r.category.clone(),
                fmt_brl(r.amount),
                fmt_timestamp_es_ar(&r.date),
                note_label(&r.note).to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["#", "Id", "Category", "Amount", "When", "Note"], rows)
    );
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches, now: DateTime<Local>) -> Result<()> {
    let state = load_state(conn, now.date_naive())?;
    let next = if let Some(id) = sub.get_one::<u64>("id") {
        remove_expense_by_id(&state, *id)?
    } else {
        let pos = *sub.get_one::<usize>("pos").unwrap();
        remove_at_position(&state, pos)?
    };
    save_state(conn, &next)?;
    println!("Removed 1 expense ({} left)", next.expenses.len());
    Ok(())
}

/// Remove by 1-based listed position (newest first).
pub fn remove_at_position(state: &AppState, pos: usize) -> Result<AppState> {
    let index = pos
        .checked_sub(1)
        .and_then(|d| display_to_insertion_index(state.expenses.len(), d))
        .ok_or_else(|| anyhow::anyhow!("No expense at position {}", pos))?;
    Ok(remove_expense(state, index)?)
}

pub fn note_label(note: &str) -> &str {
    if note.is_empty() { "No note" } else { note }
}

#[derive(Debug, Serialize)]
pub struct ExpenseRow {
    pub position: usize,
    pub id: u64,
    pub date: DateTime<Utc>,
    pub amount: f64,
    pub category: String,
    pub note: String,
}

/// Display order: most recent first, positions starting at 1.
pub fn list_rows(state: &AppState) -> Vec<ExpenseRow> {
    state
        .expenses
        .iter()
        .rev()
        .enumerate()
        .map(|(i, e)| ExpenseRow {
            position: i + 1,
            id: e.id,
            date: e.date,
            amount: e.amount,
            category: e.category.clone(),
            note: e.note.clone(),
        })
        .collect()
}
