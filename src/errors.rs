// Copyright (c) 2025 Spendlens Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures of the analytics engine. All of these are recoverable at the
/// orchestration boundary: callers substitute a placeholder or degrade the
/// render instead of crashing.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A statistic that requires a non-empty subset was asked of zero rows
    /// (top expense has no defined maximum over nothing).
    #[error("no transactions in period {0}")]
    EmptyPeriod(String),

    /// Percentage comparison against a zero prior-period total. The
    /// absolute difference remains well-defined and is the fallback metric.
    #[error("prior period total is zero; percentage change is undefined")]
    UndefinedPercentage,

    /// The snapshot could not be refreshed and no cached snapshot exists.
    #[error("transaction store unavailable: {0}")]
    StoreUnavailable(String),

    /// A malformed period selector, e.g. a month key that is not YYYY-MM.
    #[error("invalid period '{0}', expected YYYY-MM")]
    InvalidPeriod(String),
}
