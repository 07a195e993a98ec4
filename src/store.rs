// Copyright (c) 2025 Spendlens Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Duration, NaiveDateTime};
use rusqlite::Connection;

use crate::db;
use crate::errors::AnalysisError;
use crate::models::Transaction;

/// Read-through cache over the store's bulk snapshot read. The snapshot is
/// reloaded at most once per TTL; invalidation is time-based only, the
/// cache has no visibility into store writes. On a failed refresh the last
/// good snapshot is served, and the pass fails only when there is none.
pub struct SnapshotCache<'a> {
    conn: &'a Connection,
    ttl: Duration,
    loaded_at: Option<NaiveDateTime>,
    snapshot: Option<Vec<Transaction>>,
}

impl<'a> SnapshotCache<'a> {
    pub fn new(conn: &'a Connection, ttl: Duration) -> Self {
        SnapshotCache {
            conn,
            ttl,
            loaded_at: None,
            snapshot: None,
        }
    }

    /// The current snapshot as of `now`, refreshed from the store if the
    /// cached copy is older than the TTL. `now` is passed in, not read
    /// from a clock, so cache behaviour is deterministic under test.
    pub fn snapshot(&mut self, now: NaiveDateTime) -> Result<&[Transaction], AnalysisError> {
        let fresh = matches!(self.loaded_at, Some(at) if now - at < self.ttl);
        if !fresh {
            match db::all_transactions(self.conn) {
                Ok(rows) => {
                    self.snapshot = Some(rows);
                    self.loaded_at = Some(now);
                }
                Err(e) if self.snapshot.is_some() => {
                    eprintln!("warning: snapshot refresh failed ({e:#}); serving stale snapshot");
                }
                Err(e) => return Err(AnalysisError::StoreUnavailable(format!("{e:#}"))),
            }
        }
        Ok(self.snapshot.as_deref().unwrap_or(&[]))
    }
}
