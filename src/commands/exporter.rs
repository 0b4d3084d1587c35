// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::load_state;
use anyhow::{Result, bail};
use chrono::NaiveDate;
use rusqlite::Connection;
use serde_json::json;
use tracing::info;

pub fn handle(conn: &Connection, sub: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }

    let state = load_state(conn, today)?;
    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["id", "date", "amount", "category", "note"])?;
            for e in &state.expenses {
                wtr.write_record([
                    e.id.to_string(),
                    e.date.to_rfc3339(),
                    e.amount.to_string(),
                    e.category.clone(),
                    e.note.clone(),
                ])?;
            }
            wtr.flush()?;
        }
        _ => {
            let items: Vec<_> = state
                .expenses
                .iter()
                .map(|e| {
                    json!({
                        "id": e.id, "date": e.date, "amount": e.amount, "category": e.category, "note": e.note
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
    }
    info!(count = state.expenses.len(), format = %fmt, "exported");
    println!("Exported {} expenses to {}", state.expenses.len(), out);
    Ok(())
}
