// Copyright (c) 2025 Spendlens Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod analysis;
pub mod cli;
pub mod commands;
pub mod db;
pub mod errors;
pub mod models;
pub mod period;
pub mod stats;
pub mod store;
pub mod utils;
