// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;
use std::io::{self, BufRead, Write};

pub fn handle(conn: &Connection, sub: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    if !sub.get_flag("yes") && !confirm(&mut io::stdin().lock())? {
        println!("Nothing changed.");
        return Ok(());
    }
    let state = store::reset(conn, today)?;
    println!(
        "All data deleted. Defaults: {} days from {}",
        state.config.total_days, state.config.trip_start
    );
    Ok(())
}

pub fn confirm(input: &mut impl BufRead) -> Result<bool> {
    print!("Delete all expenses and settings? [y/N] ");
    io::stdout().flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}
