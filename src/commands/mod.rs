// Copyright (c) 2025 Spendlens Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod breakdown;
pub mod doctor;
pub mod importer;
pub mod stats;
pub mod transactions;
