// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for queue construction and registry access

use thiserror::Error;

/// Errors raised synchronously by queue and registry operations.
///
/// All of these indicate bad configuration on the caller's side. None are
/// retried internally; an unresolved `consumed` condition is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("queue already exists: {0}")]
    DuplicateName(String),
    #[error("queue not found: {0}")]
    NotFound(String),
    #[error("invalid action: {0}")]
    InvalidAction(String),
    #[error("property is read-only: {0}")]
    ReadOnly(String),
}

impl QueueError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        QueueError::InvalidArgument(message.into())
    }

    pub(crate) fn invalid_action(message: impl Into<String>) -> Self {
        QueueError::InvalidAction(message.into())
    }
}
