// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, info};

use crate::models::AppState;

pub const STORAGE_KEY: &str = "plata_brasil_v1";

pub fn read_raw(conn: &Connection) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM storage WHERE key=?1",
            params![STORAGE_KEY],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

/// Parse a stored blob. Unparseable input yields `None`.
pub fn decode_state(raw: &str) -> Option<AppState> {
    match serde_json::from_str::<AppState>(raw) {
        Ok(mut state) => {
            state.assign_missing_ids();
            Some(state)
        }
        Err(e) => {
            debug!(error = %e, "stored state unreadable");
            None
        }
    }
}

/// Load the trip, falling back to defaults when nothing usable is stored.
pub fn load_state(conn: &Connection, today: NaiveDate) -> Result<AppState> {
    let state = read_raw(conn)?
        .and_then(|raw| decode_state(&raw))
        .unwrap_or_else(|| {
            debug!("using default state");
            AppState::with_defaults(today)
        });
    Ok(state)
}

pub fn save_state(conn: &Connection, state: &AppState) -> Result<()> {
    let raw = serde_json::to_string(state).context("Serialize state")?;
    conn.execute(
        "INSERT INTO storage(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=datetime('now')",
        params![STORAGE_KEY, raw],
    )?;
    debug!(expenses = state.expenses.len(), "state saved");
    Ok(())
}

pub fn clear_state(conn: &Connection) -> Result<()> {
    conn.execute("DELETE FROM storage WHERE key=?1", params![STORAGE_KEY])?;
    Ok(())
}

pub fn reset(conn: &Connection, today: NaiveDate) -> Result<AppState> {
    clear_state(conn)?;
    info!("state reset");
    load_state(conn, today)
}
