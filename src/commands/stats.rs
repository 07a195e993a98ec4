// Copyright (c) 2025 Spendlens Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Duration;
use rusqlite::Connection;

use crate::errors::AnalysisError;
use crate::models::Frequency;
use crate::period::PeriodIndex;
use crate::stats::period_stats;
use crate::store::SnapshotCache;
use crate::utils::{fmt_gbp, maybe_print_json, parse_datetime, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let frequency = match m.get_one::<String>("period").unwrap().as_str() {
        "week" => Frequency::Weekly,
        _ => Frequency::Monthly,
    };
    // The anchor defaults to now here, at the outermost boundary; the
    // engine itself never reads a clock.
    let anchor = match m.get_one::<String>("anchor") {
        Some(s) => parse_datetime(s)?,
        None => chrono::Local::now().naive_local(),
    };
    let exclude = m.get_one::<String>("exclude-category").map(|s| s.as_str());

    let mut cache = SnapshotCache::new(conn, Duration::days(1));
    let index = PeriodIndex::new(cache.snapshot(anchor)?.to_vec());

    match period_stats(&index, anchor, frequency, exclude) {
        Ok(stats) => {
            if !maybe_print_json(json_flag, jsonl_flag, &stats)? {
                let summary = vec![
                    vec!["Total spend".to_string(), fmt_gbp(&stats.total_expense)],
                    vec![
                        "Average per period".to_string(),
                        fmt_gbp(&stats.average_expense),
                    ],
                    vec![
                        "Top expense".to_string(),
                        format!(
                            "{} ({})",
                            fmt_gbp(&stats.top_expense_amount),
                            stats.top_expense_description
                        ),
                    ],
                    vec![
                        "Vs prior period".to_string(),
                        fmt_gbp(&stats.diff_between_two_periods),
                    ],
                ];
                println!("{}", pretty_table(&["Metric", "Value"], summary));
                let cats = stats
                    .top_expense_categories
                    .into_iter()
                    .map(|(cat, amount)| vec![cat, amount])
                    .collect();
                println!("{}", pretty_table(&["Category", "Spent"], cats));
            }
        }
        // Degraded render, not a crash: the window simply has no data.
        Err(AnalysisError::EmptyPeriod(period)) => {
            println!("No transactions in period {}", period);
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
