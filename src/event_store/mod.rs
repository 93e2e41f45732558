// Copyright (c) 2025 - Cowboy AI, Inc.
//! Event Log Abstraction
//!
//! This module defines the event log interface and implementations for
//! persisting and replaying cortex events.
//!
//! # Architecture
//!
//! ```text
//! Command → Aggregate → Events → EventLog → Storage
//! ```
//!
//! # Event Log Requirements
//!
//! 1. **Append-Only**: Events are never updated or deleted
//! 2. **Ordered**: Events keep their order within an aggregate stream
//! 3. **Scoped**: Streams are keyed by avatar and aggregate id
//! 4. **Compare-and-Append**: An append only lands at the expected version
//! 5. **Replay**: Reading back the stream reconstructs the aggregate
//!
//! # Example
//!
//! ```rust
//! use cortex_graph::event_store::{EventLog, InMemoryEventLog};
//! use cortex_graph::domain::AvatarId;
//!
//! # tokio_test::block_on(async {
//! let log = InMemoryEventLog::new();
//! let avatar = AvatarId::new("avatar").unwrap();
//!
//! let history = log.read_history(&avatar, uuid::Uuid::now_v7()).await.unwrap();
//! assert!(history.is_empty());
//! # });
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::EventLogConfig;
use crate::domain::AvatarId;
use crate::errors::CortexResult;
use crate::events::CortexEvent;

pub mod memory;
#[cfg(feature = "nats")]
pub mod nats;

pub use memory::InMemoryEventLog;
#[cfg(feature = "nats")]
pub use nats::NatsEventLog;

/// Stored event envelope
///
/// The event itself carries no timestamp or random id so replay stays
/// deterministic. Everything assigned at write time lives here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEvent<E> {
    /// Aggregate ID this event belongs to
    pub aggregate_id: Uuid,

    /// Avatar scope of the stream
    pub avatar_id: AvatarId,

    /// Position within the aggregate stream, starting at 1
    pub sequence: u64,

    /// Event type name
    pub event_type: String,

    /// When the event log accepted the event
    pub recorded_at: DateTime<Utc>,

    /// Correlation ID of the command that produced the event
    pub correlation_id: Uuid,

    /// The domain event
    pub data: E,
}

/// Write-time metadata forwarded from the command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventMetadata {
    pub correlation_id: Uuid,
}

impl EventMetadata {
    pub fn new(correlation_id: Uuid) -> Self {
        Self { correlation_id }
    }
}

/// Event log trait for persisting and replaying aggregate streams
///
/// Implementations must make the version check and the append a single
/// atomic step per stream.
#[async_trait]
pub trait EventLog: Send + Sync {
    /// Append events to an aggregate stream
    ///
    /// # Returns
    ///
    /// The stream version after the append
    ///
    /// # Errors
    ///
    /// - `Concurrency` if the stored version is not `expected_version`
    /// - `EventLog` / `Serialization` on storage failures
    async fn append(
        &self,
        avatar_id: &AvatarId,
        aggregate_id: Uuid,
        expected_version: u64,
        events: Vec<CortexEvent>,
        metadata: EventMetadata,
    ) -> CortexResult<u64>;

    /// Read the full stream of an aggregate in order
    ///
    /// Unknown ids yield an empty history.
    async fn read_history(
        &self,
        avatar_id: &AvatarId,
        aggregate_id: Uuid,
    ) -> CortexResult<Vec<StoredEvent<CortexEvent>>>;

    /// Current version of a stream, 0 if it has no events
    async fn version(&self, avatar_id: &AvatarId, aggregate_id: Uuid) -> CortexResult<u64> {
        let history = self.read_history(avatar_id, aggregate_id).await?;
        Ok(history.last().map(|e| e.sequence).unwrap_or(0))
    }
}

/// Open the event log selected by `config`
pub async fn open(config: &EventLogConfig) -> CortexResult<Arc<dyn EventLog>> {
    match config {
        EventLogConfig::Memory => Ok(Arc::new(InMemoryEventLog::new())),

        #[cfg(feature = "nats")]
        EventLogConfig::Nats(nats) => Ok(Arc::new(NatsEventLog::connect(nats).await?)),

        #[cfg(not(feature = "nats"))]
        EventLogConfig::Nats(_) => Err(crate::errors::CortexError::EventLog(
            "NATS event log requested but the `nats` feature is disabled".to_string(),
        )),
    }
}
