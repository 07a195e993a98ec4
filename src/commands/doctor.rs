// Copyright (c) 2025 Spendlens Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{parse_datetime, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Rows whose stored text does not parse back into the engine's types
    let mut stmt = conn.prepare(
        "SELECT transaction_time, amount_gbp, amount_charged_ccy FROM transactions",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let time_s: String = r.get(0)?;
        let gbp_s: String = r.get(1)?;
        let ccy_s: String = r.get(2)?;
        if parse_datetime(&time_s).is_err() {
            rows.push(vec!["bad_transaction_time".into(), time_s.clone()]);
        }
        if parse_decimal(&gbp_s).is_err() {
            rows.push(vec!["bad_amount_gbp".into(), format!("{} {}", time_s, gbp_s)]);
        }
        if parse_decimal(&ccy_s).is_err() {
            rows.push(vec![
                "bad_amount_charged_ccy".into(),
                format!("{} {}", time_s, ccy_s),
            ]);
        }
    }

    // 2) Blank categories break the category breakdowns
    let mut stmt2 =
        conn.prepare("SELECT transaction_time FROM transactions WHERE trim(category)=''")?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let t: String = r.get(0)?;
        rows.push(vec!["blank_category".into(), t]);
    }

    if rows.is_empty() {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))?;
        println!("doctor: no issues found across {} transactions", count);
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
