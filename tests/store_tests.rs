// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, TimeZone, Utc};
use plata::ledger::{NewExpense, add_expense};
use plata::store::{STORAGE_KEY, clear_state, load_state, read_raw, reset, save_state};
use plata::{db, engine};
use rusqlite::{Connection, params};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn put_raw(conn: &Connection, raw: &str) {
    conn.execute(
        "INSERT INTO storage(key, value) VALUES (?1, ?2)",
        params![STORAGE_KEY, raw],
    )
    .unwrap();
}

#[test]
fn missing_blob_loads_defaults() {
    let conn = setup();
    let s = load_state(&conn, today()).unwrap();
    assert_eq!(s.config.total_budget, 2950.0);
    assert_eq!(s.config.total_days, 9);
    assert_eq!(s.config.trip_start, today());
    assert!(s.expenses.is_empty());
    assert!(read_raw(&conn).unwrap().is_none());
}

#[test]
fn save_overwrites_and_reloads() {
    let conn = setup();
    let s = load_state(&conn, today()).unwrap();
    let s = add_expense(
        &s,
        NewExpense {
            amount: 45.5,
            category: "Comida".into(),
            note: "Feijoada".into(),
        },
        Utc.with_ymd_and_hms(2024, 1, 1, 13, 30, 0).unwrap(),
    )
    .unwrap();
    save_state(&conn, &s).unwrap();
    save_state(&conn, &s).unwrap();

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM storage", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 1);
    let loaded = load_state(&conn, NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()).unwrap();
    assert_eq!(loaded, s);

    let raw = read_raw(&conn).unwrap().unwrap();
    let v: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(v["config"]["totalBudget"], 2950.0);
    assert_eq!(v["config"]["tripStart"], "2024-01-01");
    assert_eq!(v["expenses"][0]["category"], "Comida");
}

#[test]
fn corrupt_blob_falls_back_silently() {
    let conn = setup();
    put_raw(&conn, "{\"config\": {\"totalBudget\": 10,");
    let s = load_state(&conn, today()).unwrap();
    assert_eq!(s.config.total_budget, 2950.0);
    assert!(s.expenses.is_empty());
}

#[test]
fn legacy_blob_is_coerced_and_gets_ids() {
    let conn = setup();
    put_raw(
        &conn,
        r#"{
            "config": {"totalBudget": "3000", "totalDays": 0, "reserved": null, "tripStart": "2024-01-01"},
            "expenses": [
                {"date": "2024-01-01T12:00:00.000Z", "amount": "45.5", "category": "Comida", "note": ""},
                {"date": "2024-01-02T08:15:00.000Z", "amount": 10, "category": "Taxi"},
                {"date": "2024-01-02T09:00:00.000Z", "amount": "oops", "category": "Otros", "note": "?"}
            ]
        }"#,
    );
    let s = load_state(&conn, today()).unwrap();
    assert_eq!(s.config.total_budget, 3000.0);
    assert_eq!(s.config.total_days, 1);
    assert_eq!(s.config.reserved, 0.0);
    let ids: Vec<u64> = s.expenses.iter().map(|e| e.id).collect();
    assert_eq!(ids, [1, 2, 3]);
    assert_eq!(s.expenses[1].note, "");
    assert_eq!(s.expenses[2].amount, 0.0);

    let m = engine::compute_metrics(&s.config, &s.expenses, today());
    assert_eq!(m.spent_total, 55.5);
    assert_eq!(m.remaining_days, 1);
}

#[test]
fn clear_and_reset_drop_the_blob() {
    let conn = setup();
    let mut s = load_state(&conn, today()).unwrap();
    s.config.total_budget = 500.0;
    save_state(&conn, &s).unwrap();

    clear_state(&conn).unwrap();
    assert!(read_raw(&conn).unwrap().is_none());

    save_state(&conn, &s).unwrap();
    let fresh = reset(&conn, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()).unwrap();
    assert_eq!(fresh.config.total_budget, 2950.0);
    assert_eq!(fresh.config.trip_start, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    assert!(read_raw(&conn).unwrap().is_none());
}

#[test]
fn largest_possible_id_loads_and_renumbers_when_needed() {
    let conn = setup();
    put_raw(
        &conn,
        r#"{
            "config": {"totalBudget": 1000, "totalDays": 3, "reserved": 0, "tripStart": "2024-01-01"},
            "expenses": [
                {"id": 18446744073709551615, "date": "2024-01-01T12:00:00Z", "amount": 10, "category": "Taxi", "note": ""}
            ]
        }"#,
    );
    let s = load_state(&conn, today()).unwrap();
    assert_eq!(s.expenses.len(), 1);
    assert_eq!(s.expenses[0].id, u64::MAX);

    let s = add_expense(
        &s,
        NewExpense {
            amount: 5.0,
            category: "Agua".into(),
            note: String::new(),
        },
        Utc.with_ymd_and_hms(2024, 1, 1, 14, 0, 0).unwrap(),
    )
    .unwrap();
    let ids: Vec<u64> = s.expenses.iter().map(|e| e.id).collect();
    assert_eq!(ids, [1, 2]);
}

#[test]
fn id_overflow_with_missing_ids_renumbers_everything() {
    let conn = setup();
    put_raw(
        &conn,
        r#"{
            "config": {"totalBudget": 1000, "totalDays": 3, "reserved": 0, "tripStart": "2024-01-01"},
            "expenses": [
                {"id": 18446744073709551615, "date": "2024-01-01T12:00:00Z", "amount": 10},
                {"date": "2024-01-01T13:00:00Z", "amount": 20}
            ]
        }"#,
    );
    let s = load_state(&conn, today()).unwrap();
    let ids: Vec<u64> = s.expenses.iter().map(|e| e.id).collect();
    assert_eq!(ids, [1, 2]);
    assert_eq!(s.config.total_budget, 1000.0);
}

#[test]
fn null_text_fields_keep_the_trip() {
    let conn = setup();
    put_raw(
        &conn,
        r#"{
            "config": {"totalBudget": 1200, "totalDays": 4, "reserved": 0, "tripStart": "2024-01-01"},
            "expenses": [
                {"id": 1, "date": "2024-01-01T12:00:00Z", "amount": 30, "category": null, "note": null},
                {"id": 2, "date": "2024-01-01T13:00:00Z", "amount": 12, "category": "Taxi", "note": 7}
            ]
        }"#,
    );
    let s = load_state(&conn, today()).unwrap();
    assert_eq!(s.config.total_budget, 1200.0);
    assert_eq!(s.expenses.len(), 2);
    assert_eq!(s.expenses[0].category, "Otros");
    assert_eq!(s.expenses[0].note, "");
    assert_eq!(s.expenses[1].note, "7");
}
