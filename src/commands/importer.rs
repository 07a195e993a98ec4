// Copyright (c) 2025 Spendlens Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::models::Transaction;
use crate::utils::{parse_datetime, parse_decimal};
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => import_transactions(conn, sub),
        _ => Ok(()),
    }
}

/// Ingest a card-statement CSV export. Columns, in order:
/// transaction_time, description, amount_gbp, amount_charged_ccy,
/// currency, category, debit_or_credit, postcode. Rows whose
/// transaction_time is already in the store are skipped, not errors, so
/// overlapping exports can be re-imported freely.
fn import_transactions(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let tx = conn.transaction()?;
    let mut inserted = 0usize;
    let mut skipped = 0usize;

    for result in rdr.records() {
        let rec = result?;
        let time_raw = rec.get(0).context("transaction_time missing")?.trim();
        let description = rec.get(1).context("description missing")?.trim().to_string();
        let gbp_raw = rec.get(2).context("amount_gbp missing")?.trim();
        let charged_raw = rec.get(3).context("amount_charged_ccy missing")?.trim();
        let currency = rec.get(4).context("currency missing")?.trim().to_string();
        let category = rec.get(5).context("category missing")?.trim().to_string();
        let debit_or_credit = rec
            .get(6)
            .context("debit_or_credit missing")?
            .trim()
            .to_string();
        let postcode = rec
            .get(7)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());

        let row = Transaction {
            transaction_time: parse_datetime(time_raw)
                .with_context(|| format!("Invalid transaction_time '{}'", time_raw))?,
            amount_gbp: parse_decimal(gbp_raw)
                .with_context(|| format!("Invalid amount_gbp '{}' for {}", gbp_raw, description))?,
            amount_charged_ccy: parse_decimal(charged_raw).with_context(|| {
                format!("Invalid amount_charged_ccy '{}' for {}", charged_raw, description)
            })?,
            description,
            currency,
            category,
            debit_or_credit,
            postcode,
        };
        if db::upsert_transaction(&tx, &row)? {
            inserted += 1;
        } else {
            skipped += 1;
        }
    }
    tx.commit()?;
    println!(
        "Imported {} transactions from {} ({} duplicates skipped)",
        inserted, path, skipped
    );
    Ok(())
}
