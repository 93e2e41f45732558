// Copyright (c) 2025 - Cowboy AI, Inc.
//! In-Memory Event Log
//!
//! Streams live in a map guarded by a `tokio` `RwLock`. An append holds the
//! write lock across the version check and the push, which makes
//! compare-and-append atomic per stream.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::domain::AvatarId;
use crate::errors::{CortexError, CortexResult};
use crate::event_store::{EventLog, EventMetadata, StoredEvent};
use crate::events::CortexEvent;

type StreamKey = (AvatarId, Uuid);
type Streams = HashMap<StreamKey, Vec<StoredEvent<CortexEvent>>>;

/// Event log kept in process memory
///
/// Cloning shares the underlying streams.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventLog {
    streams: Arc<RwLock<Streams>>,
}

impl InMemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events stored across every stream
    pub async fn event_count(&self) -> usize {
        self.streams.read().await.values().map(Vec::len).sum()
    }
}

#[async_trait]
impl EventLog for InMemoryEventLog {
    async fn append(
        &self,
        avatar_id: &AvatarId,
        aggregate_id: Uuid,
        expected_version: u64,
        events: Vec<CortexEvent>,
        metadata: EventMetadata,
    ) -> CortexResult<u64> {
        let key = (avatar_id.clone(), aggregate_id);
        let mut streams = self.streams.write().await;

        let actual = streams.get(&key).map_or(0, |stream| stream.len() as u64);
        if actual != expected_version {
            return Err(CortexError::Concurrency {
                aggregate_id,
                expected: expected_version,
                actual,
            });
        }
        if events.is_empty() {
            return Ok(actual);
        }

        let stream = streams.entry(key).or_default();

        let recorded_at = Utc::now();
        for event in events {
            let sequence = stream.len() as u64 + 1;
            stream.push(StoredEvent {
                aggregate_id,
                avatar_id: avatar_id.clone(),
                sequence,
                event_type: event.event_type_name().to_string(),
                recorded_at,
                correlation_id: metadata.correlation_id,
                data: event,
            });
        }

        let version = stream.len() as u64;
        debug!(
            avatar_id = %avatar_id,
            aggregate_id = %aggregate_id,
            version,
            "Appended events to in-memory stream"
        );
        Ok(version)
    }

    async fn read_history(
        &self,
        avatar_id: &AvatarId,
        aggregate_id: Uuid,
    ) -> CortexResult<Vec<StoredEvent<CortexEvent>>> {
        let streams = self.streams.read().await;
        Ok(streams
            .get(&(avatar_id.clone(), aggregate_id))
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{NodeDataChanged, NodeEvent};
    use pretty_assertions::assert_eq;

    fn avatar(name: &str) -> AvatarId {
        AvatarId::new(name).unwrap()
    }

    fn data_changed(id: Uuid, data: &str) -> CortexEvent {
        CortexEvent::Node(NodeEvent::NodeDataChanged(NodeDataChanged {
            event_version: 1,
            aggregate_id: id,
            data: data.to_string(),
        }))
    }

    #[tokio::test]
    async fn test_append_and_read_in_order() {
        let log = InMemoryEventLog::new();
        let id = Uuid::from_u128(1);
        let metadata = EventMetadata::new(Uuid::from_u128(99));

        let version = log
            .append(
                &avatar("a"),
                id,
                0,
                vec![data_changed(id, "1"), data_changed(id, "2")],
                metadata,
            )
            .await
            .unwrap();
        assert_eq!(version, 2);

        let history = log.read_history(&avatar("a"), id).await.unwrap();
        let sequences: Vec<u64> = history.iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, vec![1, 2]);
        assert_eq!(history[1].data, data_changed(id, "2"));
        assert_eq!(history[0].event_type, "NodeDataChanged");
        assert_eq!(history[0].correlation_id, Uuid::from_u128(99));
    }

    #[tokio::test]
    async fn test_wrong_expected_version() {
        let log = InMemoryEventLog::new();
        let id = Uuid::from_u128(1);
        let metadata = EventMetadata::new(Uuid::nil());

        log.append(&avatar("a"), id, 0, vec![data_changed(id, "1")], metadata)
            .await
            .unwrap();

        let err = log
            .append(&avatar("a"), id, 0, vec![data_changed(id, "2")], metadata)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            CortexError::Concurrency {
                aggregate_id: id,
                expected: 0,
                actual: 1
            }
        );
        assert_eq!(log.event_count().await, 1);
    }

    #[tokio::test]
    async fn test_streams_are_scoped_by_avatar() {
        let log = InMemoryEventLog::new();
        let id = Uuid::from_u128(1);
        let metadata = EventMetadata::new(Uuid::nil());

        log.append(&avatar("a"), id, 0, vec![data_changed(id, "1")], metadata)
            .await
            .unwrap();

        assert!(log.read_history(&avatar("b"), id).await.unwrap().is_empty());
        assert_eq!(log.version(&avatar("a"), id).await.unwrap(), 1);
        assert_eq!(log.version(&avatar("b"), id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_appends_at_same_version() {
        let log = InMemoryEventLog::new();
        let id = Uuid::from_u128(1);
        let metadata = EventMetadata::new(Uuid::nil());

        let a = avatar("a");

        let (left, right) = tokio::join!(
            log.append(&a, id, 0, vec![data_changed(id, "l")], metadata),
            log.append(&a, id, 0, vec![data_changed(id, "r")], metadata),
        );

        assert!(left.is_ok() != right.is_ok());
        assert_eq!(log.version(&a, id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_rejected_append_creates_no_stream() {
        let log = InMemoryEventLog::new();
        let id = Uuid::from_u128(1);
        let a = avatar("a");

        let err = log
            .append(&a, id, 3, vec![data_changed(id, "1")], EventMetadata::new(Uuid::nil()))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), crate::errors::ErrorKind::Concurrency);
        assert!(log.streams.read().await.is_empty());
    }
}
