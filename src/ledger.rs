// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! State transitions. Every operation takes the current state by reference
//! and returns the next one, leaving the input untouched on rejection.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info};

use crate::error::ValidationError;
use crate::models::{AppState, Config, DEFAULT_CATEGORY, Expense};

#[derive(Debug, Clone, Default)]
pub struct NewExpense {
    pub amount: f64,
    pub category: String,
    pub note: String,
}

/// Settings form values. `None` falls back to the form defaults.
#[derive(Debug, Clone, Default)]
pub struct ConfigInput {
    pub total_budget: f64,
    pub total_days: i64,
    pub reserved: Option<f64>,
    pub trip_start: Option<NaiveDate>,
}

impl ConfigInput {
    /// Pre-fill from an existing config, as the settings form does.
    pub fn from_config(c: &Config) -> Self {
        Self {
            total_budget: c.total_budget,
            total_days: i64::from(c.total_days),
            reserved: Some(c.reserved),
            trip_start: Some(c.trip_start),
        }
    }
}

pub fn add_expense(
    state: &AppState,
    input: NewExpense,
    now: DateTime<Utc>,
) -> Result<AppState, ValidationError> {
    if !input.amount.is_finite() || input.amount <= 0.0 {
        debug!(amount = input.amount, "rejected expense");
        return Err(ValidationError::InvalidAmount);
    }
    let category = if input.category.trim().is_empty() {
        DEFAULT_CATEGORY.to_string()
    } else {
        input.category
    };
    let note = if input.note.trim().is_empty() {
        String::new()
    } else {
        input.note
    };

    let mut next = state.clone();
    let id = next.allocate_id();
    next.expenses.push(Expense {
        id,
        date: now,
        amount: input.amount,
        category,
        note,
    });
    info!(id, amount = input.amount, "expense added");
    Ok(next)
}

/// Remove by insertion index (0 = oldest).
pub fn remove_expense(state: &AppState, index: usize) -> Result<AppState, ValidationError> {
    if index >= state.expenses.len() {
        return Err(ValidationError::NoSuchExpense(index));
    }
    let mut next = state.clone();
    let removed = next.expenses.remove(index);
    info!(id = removed.id, index, "expense removed");
    Ok(next)
}

pub fn remove_expense_by_id(state: &AppState, id: u64) -> Result<AppState, ValidationError> {
    let index = state
        .expenses
        .iter()
        .position(|e| e.id == id)
        .ok_or(ValidationError::UnknownExpenseId(id))?;
    remove_expense(state, index)
}

/// Lists show the newest expense first; map a listed position back to the
/// insertion index.
pub fn display_to_insertion_index(len: usize, display_index: usize) -> Option<usize> {
    (display_index < len).then(|| len - 1 - display_index)
}

pub fn insertion_to_display_index(len: usize, index: usize) -> Option<usize> {
    display_to_insertion_index(len, index)
}

pub fn save_config(
    state: &AppState,
    input: ConfigInput,
    today: NaiveDate,
) -> Result<AppState, ValidationError> {
    if !input.total_budget.is_finite() || input.total_budget <= 0.0 || input.total_days <= 0 {
        return Err(ValidationError::InvalidConfig);
    }
    let reserved = input.reserved.filter(|r| r.is_finite()).unwrap_or(0.0);
    let total_days = u32::try_from(input.total_days).map_err(|_| ValidationError::InvalidConfig)?;

    let mut next = state.clone();
    next.config = Config {
        total_budget: input.total_budget,
        total_days,
        reserved,
        trip_start: input.trip_start.unwrap_or(today),
    };
    info!(
        total_budget = next.config.total_budget,
        total_days,
        reserved,
        trip_start = %next.config.trip_start,
        "config saved"
    );
    Ok(next)
}

pub fn reset_all(today: NaiveDate) -> AppState {
    AppState::with_defaults(today)
}
