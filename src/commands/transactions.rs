// Copyright (c) 2025 Spendlens Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

use crate::db;
use crate::stats::month_key;
use crate::utils::{maybe_print_json, parse_month, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct TransactionRow {
    time: String,
    description: String,
    category: String,
    amount_gbp: String,
    charged: String,
    debit_or_credit: String,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let limit = *sub.get_one::<usize>("limit").unwrap_or(&25);
    let month = sub
        .get_one::<String>("month")
        .map(|s| parse_month(s))
        .transpose()?;

    let mut data = Vec::new();
    for t in db::all_transactions(conn)?.iter().rev() {
        if data.len() == limit {
            break;
        }
        if let Some(ref ym) = month {
            if month_key(t.transaction_time.date()) != *ym {
                continue;
            }
        }
        data.push(TransactionRow {
            time: t.transaction_time.format("%Y-%m-%d %H:%M:%S").to_string(),
            description: t.description.clone(),
            category: t.category.clone(),
            amount_gbp: format!("{:.2}", t.amount_gbp),
            charged: format!("{:.2} {}", t.amount_charged_ccy, t.currency),
            debit_or_credit: t.debit_or_credit.clone(),
        });
    }

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.time.clone(),
                    r.description.clone(),
                    r.category.clone(),
                    r.amount_gbp.clone(),
                    r.charged.clone(),
                    r.debit_or_credit.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Time", "Description", "Category", "GBP", "Charged", "D/C"],
                rows,
            )
        );
    }
    Ok(())
}
