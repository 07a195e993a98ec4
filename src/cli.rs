// Copyright (c) 2025 Spendlens Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print results as pretty JSON")
}

fn jsonl_arg() -> Arg {
    Arg::new("jsonl")
        .long("jsonl")
        .action(ArgAction::SetTrue)
        .help("Print results as JSON lines")
}

pub fn build_cli() -> Command {
    Command::new("spendlens")
        .version(clap::crate_version!())
        .about("Period-aware spending analytics over a personal transaction ledger")
        .subcommand(Command::new("init").about("Initialise the local database"))
        .subcommand(
            Command::new("import").about("Ingest data into the store").subcommand(
                Command::new("transactions")
                    .about("Import a transactions CSV export")
                    .arg(
                        Arg::new("path")
                            .long("path")
                            .required(true)
                            .help("Path to the CSV file"),
                    ),
            ),
        )
        .subcommand(
            Command::new("tx").about("Work with raw transactions").subcommand(
                Command::new("list")
                    .about("List transactions, newest first")
                    .arg(
                        Arg::new("month")
                            .long("month")
                            .help("Restrict to one YYYY-MM month"),
                    )
                    .arg(
                        Arg::new("limit")
                            .long("limit")
                            .value_parser(value_parser!(usize))
                            .default_value("25")
                            .help("Maximum rows to show"),
                    )
                    .arg(json_arg())
                    .arg(jsonl_arg()),
            ),
        )
        .subcommand(
            Command::new("stats")
                .about("Spending statistics for the period containing the anchor")
                .arg(
                    Arg::new("period")
                        .long("period")
                        .value_parser(["week", "month"])
                        .default_value("month")
                        .help("Window granularity"),
                )
                .arg(
                    Arg::new("anchor")
                        .long("anchor")
                        .help("Anchor timestamp (YYYY-MM-DD HH:MM:SS); defaults to now"),
                )
                .arg(
                    Arg::new("exclude-category")
                        .long("exclude-category")
                        .help("Leave one category out of every statistic"),
                )
                .arg(json_arg())
                .arg(jsonl_arg()),
        )
        .subcommand(
            Command::new("breakdown")
                .about("Dense per-period category spending table for charting")
                .arg(
                    Arg::new("freq")
                        .long("freq")
                        .value_parser(["week", "month"])
                        .default_value("month")
                        .help("Bucket frequency"),
                )
                .arg(json_arg())
                .arg(jsonl_arg()),
        )
        .subcommand(Command::new("doctor").about("Sanity-check the store"))
}
