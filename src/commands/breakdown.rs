// Copyright (c) 2025 Spendlens Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::db;
use crate::models::Frequency;
use crate::period::PeriodIndex;
use crate::utils::{maybe_print_json, pretty_table};

/// Render the dense (period, category) spend grid that backs the
/// dashboard's stacked chart.
pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let frequency = match m.get_one::<String>("freq").unwrap().as_str() {
        "week" => Frequency::Weekly,
        _ => Frequency::Monthly,
    };

    let index = PeriodIndex::new(db::all_transactions(conn)?);
    let grid = index.periodic_category_spending(frequency);

    if !maybe_print_json(json_flag, jsonl_flag, &grid)? {
        let mut headers: Vec<&str> = vec!["Period"];
        headers.extend(grid.categories.iter().map(|c| c.as_str()));
        let rows = grid
            .rows
            .iter()
            .map(|row| {
                let mut cells = vec![row.period_start.to_string()];
                cells.extend(row.amounts.iter().map(|a| format!("{:.2}", a)));
                cells
            })
            .collect();
        println!("{}", pretty_table(&headers, rows));
    }
    Ok(())
}
