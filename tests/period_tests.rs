// Copyright (c) 2025 Spendlens Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use spendlens::errors::AnalysisError;
use spendlens::models::{Frequency, Transaction};
use spendlens::period::PeriodIndex;

fn tx(time: &str, description: &str, amount: &str, category: &str) -> Transaction {
    Transaction {
        transaction_time: NaiveDateTime::parse_from_str(time, "%Y-%m-%d %H:%M:%S").unwrap(),
        description: description.to_string(),
        amount_gbp: amount.parse().unwrap(),
        amount_charged_ccy: amount.parse().unwrap(),
        currency: "GBP".to_string(),
        category: category.to_string(),
        debit_or_credit: "debit".to_string(),
        postcode: None,
    }
}

#[test]
fn week_includes_exact_iso_boundaries() {
    // ISO week 32 of 2025 runs Monday 2025-08-04 through Sunday 2025-08-10.
    let index = PeriodIndex::new(vec![
        tx("2025-08-03 23:59:59", "before", "1", "Food"),
        tx("2025-08-04 00:00:00", "monday start", "2", "Food"),
        tx("2025-08-10 23:59:59", "sunday end", "3", "Food"),
        tx("2025-08-11 00:00:00", "after", "4", "Food"),
    ]);
    let week = index.week(2025, 32).unwrap();
    let names: Vec<&str> = week.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(names, vec!["monday start", "sunday end"]);
}

#[test]
fn week_uses_iso_year_not_calendar_year() {
    // 2025-12-29 is the Monday of ISO week 1 of 2026.
    let index = PeriodIndex::new(vec![
        tx("2025-12-28 12:00:00", "last of w52", "1", "Food"),
        tx("2025-12-29 09:00:00", "new iso year", "2", "Food"),
        tx("2026-01-01 09:00:00", "first thursday", "3", "Food"),
    ]);
    let w1 = index.week(2026, 1).unwrap();
    assert_eq!(w1.len(), 2);
    let w52 = index.week(2025, 52).unwrap();
    assert_eq!(w52.len(), 1);
    assert_eq!(w52[0].description, "last of w52");
}

#[test]
fn month_matches_calendar_month_only() {
    let index = PeriodIndex::new(vec![
        tx("2025-07-31 23:59:59", "july", "1", "Food"),
        tx("2025-08-01 00:00:00", "first", "2", "Food"),
        tx("2025-08-31 23:59:59", "last", "3", "Food"),
        tx("2025-09-01 00:00:00", "september", "4", "Food"),
    ]);
    let aug = index.month("2025-08").unwrap();
    let names: Vec<&str> = aug.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(names, vec!["first", "last"]);
}

#[test]
fn empty_windows_are_errors_not_empty_sets() {
    let index = PeriodIndex::new(vec![tx("2025-08-05 10:00:00", "a", "1", "Food")]);
    assert!(matches!(
        index.week(2025, 10),
        Err(AnalysisError::EmptyPeriod(_))
    ));
    assert!(matches!(
        index.month("2024-01"),
        Err(AnalysisError::EmptyPeriod(_))
    ));
}

#[test]
fn malformed_month_keys_are_rejected() {
    let index = PeriodIndex::new(vec![tx("2025-08-05 10:00:00", "a", "1", "Food")]);
    assert!(matches!(
        index.month("2025-13"),
        Err(AnalysisError::InvalidPeriod(_))
    ));
    assert!(matches!(
        index.month("garbage"),
        Err(AnalysisError::InvalidPeriod(_))
    ));
}

#[test]
fn grid_fills_unobserved_category_cells_with_zero() {
    // Holiday only appears in August; its September cell must exist and be 0.
    let index = PeriodIndex::new(vec![
        tx("2025-08-05 10:00:00", "flight", "300", "Holiday"),
        tx("2025-08-12 10:00:00", "shop", "40", "Groceries"),
        tx("2025-09-03 10:00:00", "shop", "55", "Groceries"),
    ]);
    let grid = index.periodic_category_spending(Frequency::Monthly);
    assert_eq!(grid.categories, vec!["Groceries", "Holiday"]);
    assert_eq!(grid.rows.len(), 2);

    let sept = &grid.rows[1];
    assert_eq!(sept.period_start, NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
    assert_eq!(sept.amounts[0], Decimal::from(55));
    assert_eq!(sept.amounts[1], Decimal::ZERO);
}

#[test]
fn grid_emits_rows_for_gap_periods() {
    let index = PeriodIndex::new(vec![
        tx("2025-01-10 10:00:00", "a", "10", "Food"),
        tx("2025-03-10 10:00:00", "b", "20", "Food"),
    ]);
    let grid = index.periodic_category_spending(Frequency::Monthly);
    assert_eq!(grid.rows.len(), 3);
    let feb = &grid.rows[1];
    assert_eq!(feb.period_start, NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
    assert_eq!(feb.amounts, vec![Decimal::ZERO]);
}

#[test]
fn weekly_grid_buckets_start_on_mondays() {
    let index = PeriodIndex::new(vec![
        tx("2025-08-06 10:00:00", "wed", "10", "Food"),
        tx("2025-08-14 10:00:00", "next thu", "20", "Food"),
    ]);
    let grid = index.periodic_category_spending(Frequency::Weekly);
    let starts: Vec<NaiveDate> = grid.rows.iter().map(|r| r.period_start).collect();
    assert_eq!(
        starts,
        vec![
            NaiveDate::from_ymd_opt(2025, 8, 4).unwrap(),
            NaiveDate::from_ymd_opt(2025, 8, 11).unwrap(),
        ]
    );
}

#[test]
fn bucket_totals_are_dense_over_the_range() {
    let index = PeriodIndex::new(vec![
        tx("2025-08-04 10:00:00", "w32", "100", "Food"),
        tx("2025-08-20 10:00:00", "w34", "50", "Food"),
    ]);
    let totals = index.bucket_totals(Frequency::Weekly);
    assert_eq!(totals.len(), 3);
    assert_eq!(totals[0].1, Decimal::from(100));
    assert_eq!(totals[1].1, Decimal::ZERO);
    assert_eq!(totals[2].1, Decimal::from(50));
}

#[test]
fn without_category_filters_a_copy_and_leaves_the_source_alone() {
    let index = PeriodIndex::new(vec![
        tx("2025-08-05 10:00:00", "flight", "300", "Holiday"),
        tx("2025-08-06 10:00:00", "shop", "40", "Groceries"),
    ]);
    let filtered = index.without_category("Holiday");
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered.rows()[0].category, "Groceries");
    assert_eq!(index.len(), 2);
}

#[test]
fn rows_are_sorted_by_transaction_time() {
    let index = PeriodIndex::new(vec![
        tx("2025-08-06 10:00:00", "later", "1", "Food"),
        tx("2025-08-05 10:00:00", "earlier", "2", "Food"),
    ]);
    assert_eq!(index.rows()[0].description, "earlier");
}
