// Copyright (c) 2025 - Cowboy AI, Inc.
//! Command Handler Layer
//!
//! This module orchestrates aggregates and the event log.
//!
//! # Architecture
//!
//! ```text
//! Command
//!     ↓
//! Handler (this module)
//!     ↓
//! Repository → replay → Aggregate → staged Events
//!     ↓
//! EventLog (compare-and-append)
//! ```
//!
//! # Transaction Semantics
//!
//! Each handler call is a transaction:
//! 1. Load the aggregates (and the snapshots the command needs)
//! 2. Check the command's expected version
//! 3. Run the aggregate operation
//! 4. Append staged events at the committed version
//!
//! If any step fails, nothing is persisted. Nothing is retried.

use async_trait::async_trait;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::{CortexError, CortexResult};

pub mod edge;
pub mod link_validator;
pub mod node;
pub mod repository;

pub use edge::EdgeCommandHandlers;
pub use link_validator::{StoreLinkValidator, StoreLinkValidatorSource};
pub use node::NodeCommandHandlers;
pub use repository::Repository;

/// Handles one command type, returning the aggregate version afterwards
#[async_trait]
pub trait Handle<C: Send + 'static>: Send + Sync {
    async fn handle(&self, command: C) -> CortexResult<u64>;
}

/// Fail with `Concurrency` unless the loaded version is the expected one
pub(crate) fn ensure_version(aggregate_id: Uuid, expected: u64, actual: u64) -> CortexResult<()> {
    if expected != actual {
        return Err(CortexError::Concurrency {
            aggregate_id,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Log the outcome of a handled command and pass it through
pub(crate) fn log_outcome(
    command: &'static str,
    aggregate_id: Uuid,
    result: CortexResult<u64>,
) -> CortexResult<u64> {
    match &result {
        Ok(version) => info!(command, aggregate_id = %aggregate_id, version, "Command persisted"),
        Err(e @ CortexError::Concurrency { .. }) => {
            warn!(command, aggregate_id = %aggregate_id, error = %e, "Concurrency conflict")
        }
        Err(e) => debug!(command, aggregate_id = %aggregate_id, error = %e, "Command rejected"),
    }
    result
}
