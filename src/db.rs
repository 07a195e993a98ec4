// Copyright (c) 2025 Spendlens Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, params};
use std::fs;
use std::path::PathBuf;

use crate::models::Transaction;
use crate::utils::{parse_datetime, parse_decimal};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.spendlens", "Spendlens", "spendlens"));

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("spendlens.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS transactions(
        transaction_time TEXT PRIMARY KEY,
        description TEXT NOT NULL,
        amount_gbp TEXT NOT NULL,
        amount_charged_ccy TEXT NOT NULL,
        currency TEXT NOT NULL,
        category TEXT NOT NULL,
        debit_or_credit TEXT NOT NULL,
        postcode TEXT
    );
    "#,
    )?;
    Ok(())
}

/// Insert one row, keyed by `transaction_time`. A row with the same key
/// already in the table wins; re-imports are no-ops. Returns whether the
/// row was actually inserted.
pub fn upsert_transaction(conn: &Connection, t: &Transaction) -> Result<bool> {
    let changed = conn.execute(
        "INSERT INTO transactions(transaction_time, description, amount_gbp, amount_charged_ccy, \
         currency, category, debit_or_credit, postcode) \
         VALUES (?1,?2,?3,?4,?5,?6,?7,?8) \
         ON CONFLICT(transaction_time) DO NOTHING",
        params![
            t.transaction_time.format(TIME_FORMAT).to_string(),
            t.description,
            t.amount_gbp.to_string(),
            t.amount_charged_ccy.to_string(),
            t.currency,
            t.category,
            t.debit_or_credit,
            t.postcode.as_deref()
        ],
    )?;
    Ok(changed == 1)
}

/// Bulk snapshot read: the whole table, oldest first.
pub fn all_transactions(conn: &Connection) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT transaction_time, description, amount_gbp, amount_charged_ccy, \
         currency, category, debit_or_credit, postcode \
         FROM transactions ORDER BY transaction_time",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, String>(5)?,
            r.get::<_, String>(6)?,
            r.get::<_, Option<String>>(7)?,
        ))
    })?;

    let mut out = Vec::new();
    for row in rows {
        let (time_s, description, gbp_s, ccy_amt_s, currency, category, debit_or_credit, postcode) =
            row?;
        let transaction_time = parse_datetime(&time_s)
            .with_context(|| format!("Invalid transaction_time '{}' in store", time_s))?;
        let amount_gbp = parse_decimal(&gbp_s)
            .with_context(|| format!("Invalid amount_gbp '{}' at {}", gbp_s, time_s))?;
        let amount_charged_ccy = parse_decimal(&ccy_amt_s)
            .with_context(|| format!("Invalid amount_charged_ccy '{}' at {}", ccy_amt_s, time_s))?;
        out.push(Transaction {
            transaction_time,
            description,
            amount_gbp,
            amount_charged_ccy,
            currency,
            category,
            debit_or_credit,
            postcode,
        });
    }
    Ok(out)
}
