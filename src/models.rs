// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const DEFAULT_CATEGORY: &str = "Otros";
pub const DEFAULT_TOTAL_BUDGET: f64 = 2950.0;
pub const DEFAULT_TOTAL_DAYS: u32 = 9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_budget: f64,
    #[serde(default = "one_day", deserialize_with = "lenient_days")]
    pub total_days: u32,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub reserved: f64,
    pub trip_start: NaiveDate, // YYYY-MM-DD
}

impl Config {
    pub fn with_defaults(today: NaiveDate) -> Self {
        Self {
            total_budget: DEFAULT_TOTAL_BUDGET,
            total_days: DEFAULT_TOTAL_DAYS,
            reserved: 0.0,
            trip_start: today,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Stable identifier. Zero only in blobs written before ids existed.
    #[serde(default)]
    pub id: u64,
    pub date: DateTime<Utc>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub amount: f64,
    #[serde(default = "default_category", deserialize_with = "lenient_category")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub note: String,
}

/// Persisted trip: config plus expenses in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub config: Config,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

impl AppState {
    pub fn with_defaults(today: NaiveDate) -> Self {
        Self {
            config: Config::with_defaults(today),
            expenses: Vec::new(),
        }
    }

    /// `None` once the largest id is `u64::MAX`.
    pub fn next_id(&self) -> Option<u64> {
        self.expenses
            .iter()
            .map(|e| e.id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
    }

    /// Reserve an id for a new expense, renumbering in insertion order when
    /// the id space above the current maximum is exhausted.
    pub fn allocate_id(&mut self) -> u64 {
        match self.next_id() {
            Some(id) => id,
            None => {
                self.renumber();
                self.expenses.len() as u64 + 1
            }
        }
    }

    /// Ids become 1..=n in insertion order.
    pub fn renumber(&mut self) {
        for (i, e) in self.expenses.iter_mut().enumerate() {
            e.id = i as u64 + 1;
        }
    }

    /// Gives every expense a unique non-zero id, keeping the ones already valid.
    pub fn assign_missing_ids(&mut self) {
        let mut seen = HashSet::new();
        let needs_id = self
            .expenses
            .iter()
            .any(|e| e.id == 0 || !seen.insert(e.id));
        if !needs_id {
            return;
        }
        let Some(mut next) = self.next_id() else {
            self.renumber();
            return;
        };
        seen.clear();
        for e in &mut self.expenses {
            if e.id == 0 || !seen.insert(e.id) {
                let Some(after) = next.checked_add(1) else {
                    self.renumber();
                    return;
                };
                e.id = next;
                next = after;
                seen.insert(e.id);
            }
        }
    }
}

/// Engine output. Recomputed on every query, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    pub total_budget: f64,
    pub total_days: u32,
    pub reserved: f64,
    pub spent_total: f64,
    pub remaining: f64,
    pub day_index: u32,
    pub remaining_days: u32,
    pub max_per_day: f64,
}

impl DerivedMetrics {
    pub fn is_over_budget(&self) -> bool {
        self.remaining < 0.0
    }
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn one_day() -> u32 {
    1
}

/// Loose number coercion for stored blobs: numeric strings are parsed,
/// anything else (null, garbage, non-finite) is 0.
pub fn coerce_number(v: &Value) -> f64 {
    let n = match v {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        _ => 0.0,
    };
    if n.is_finite() { n } else { 0.0 }
}

fn lenient_f64<'de, D>(d: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(d)?;
    Ok(coerce_number(&v))
}

fn string_or<'de, D>(d: D, fallback: &str) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(d)?;
    Ok(match v {
        Value::String(s) => s,
        Value::Null => fallback.to_string(),
        other => other.to_string(),
    })
}

fn lenient_category<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    string_or(d, DEFAULT_CATEGORY)
}

fn lenient_string<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    string_or(d, "")
}

fn lenient_days<'de, D>(d: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(d)?;
    let n = coerce_number(&v);
    if n >= 1.0 {
        Ok(n.floor().min(u32::MAX as f64) as u32)
    } else {
        Ok(1)
    }
}
