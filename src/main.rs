// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use plata::{cli, commands, db};

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("PLATA_LOG").unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let path = match matches.get_one::<String>("db") {
        Some(p) => PathBuf::from(p),
        None => db::db_path()?,
    };
    let conn = db::open_at(&path)?;

    let now = Local::now();
    let today = now.date_naive();

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", path.display());
        }
        Some(("status", sub)) => commands::status::handle(&conn, sub, today)?,
        Some(("config", sub)) => commands::config::handle(&conn, sub, today)?,
        Some(("expense", sub)) => commands::expenses::handle(&conn, sub, now)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, sub, today)?,
        Some(("reset", sub)) => commands::reset::handle(&conn, sub, today)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
