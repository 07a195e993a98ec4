// Copyright (c) 2025 Spendlens Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Duration, NaiveDateTime};
use rusqlite::Connection;
use spendlens::db;
use spendlens::errors::AnalysisError;
use spendlens::models::Transaction;
use spendlens::store::SnapshotCache;

fn base_conn() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn tx(time: &str, description: &str) -> Transaction {
    Transaction {
        transaction_time: NaiveDateTime::parse_from_str(time, "%Y-%m-%d %H:%M:%S").unwrap(),
        description: description.to_string(),
        amount_gbp: "10".parse().unwrap(),
        amount_charged_ccy: "10".parse().unwrap(),
        currency: "GBP".to_string(),
        category: "Food".to_string(),
        debit_or_credit: "debit".to_string(),
        postcode: None,
    }
}

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

#[test]
fn upsert_reports_conflicts() {
    let conn = base_conn();
    assert!(db::upsert_transaction(&conn, &tx("2025-08-04 09:15:00", "a")).unwrap());
    assert!(!db::upsert_transaction(&conn, &tx("2025-08-04 09:15:00", "b")).unwrap());
}

#[test]
fn snapshot_is_cached_until_the_ttl_lapses() {
    let conn = base_conn();
    db::upsert_transaction(&conn, &tx("2025-08-04 09:15:00", "first")).unwrap();

    let mut cache = SnapshotCache::new(&conn, Duration::hours(24));
    assert_eq!(cache.snapshot(at("2025-08-05 00:00:00")).unwrap().len(), 1);

    // A write inside the TTL is not visible; invalidation is time-based.
    db::upsert_transaction(&conn, &tx("2025-08-05 10:00:00", "second")).unwrap();
    assert_eq!(cache.snapshot(at("2025-08-05 12:00:00")).unwrap().len(), 1);

    assert_eq!(cache.snapshot(at("2025-08-06 01:00:00")).unwrap().len(), 2);
}

#[test]
fn failed_refresh_serves_the_last_good_snapshot() {
    let conn = base_conn();
    db::upsert_transaction(&conn, &tx("2025-08-04 09:15:00", "kept")).unwrap();

    let mut cache = SnapshotCache::new(&conn, Duration::hours(24));
    assert_eq!(cache.snapshot(at("2025-08-05 00:00:00")).unwrap().len(), 1);

    conn.execute_batch("DROP TABLE transactions").unwrap();
    let stale = cache.snapshot(at("2025-08-07 00:00:00")).unwrap();
    assert_eq!(stale.len(), 1);
    assert_eq!(stale[0].description, "kept");
}

#[test]
fn unavailable_store_with_no_cache_is_an_error() {
    let conn = Connection::open_in_memory().unwrap();
    let mut cache = SnapshotCache::new(&conn, Duration::hours(24));
    assert!(matches!(
        cache.snapshot(at("2025-08-05 00:00:00")),
        Err(AnalysisError::StoreUnavailable(_))
    ));
}
