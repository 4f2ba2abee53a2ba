// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod check;
pub mod run;

use crate::error::GateqError;
use gateq_core::QueueFile;
use std::path::Path;

/// Read and parse a queue file
pub fn load(path: &Path) -> Result<QueueFile, GateqError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| GateqError::unreadable(path, e))?;
    QueueFile::parse(&content).map_err(|e| GateqError::invalid_file(path, e))
}
