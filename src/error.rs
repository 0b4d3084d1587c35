// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// User input rejected before any state change.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("invalid amount: expected a positive number")]
    InvalidAmount,
    #[error("invalid config: budget and days must be greater than zero")]
    InvalidConfig,
    #[error("no expense at position {0}")]
    NoSuchExpense(usize),
    #[error("no expense with id {0}")]
    UnknownExpenseId(u64),
}
