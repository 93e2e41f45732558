// Copyright (c) 2025 - Cowboy AI, Inc.
//! NATS JetStream Event Log Implementation
//!
//! Every aggregate stream maps to one subject:
//!
//! ```text
//! <subject_prefix>.<avatar_id>.<aggregate_id>
//! ```
//!
//! Reads replay the subject through an ephemeral pull consumer. Appends are
//! guarded by JetStream's expected-last-subject-sequence check, so a
//! concurrent writer that landed first makes the server reject the publish.

use async_nats::jetstream::{self, context::Publish, stream::Stream};
use async_trait::async_trait;
use chrono::Utc;
use futures::StreamExt;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::NatsEventLogConfig;
use crate::domain::AvatarId;
use crate::errors::{CortexError, CortexResult};
use crate::event_store::{EventLog, EventMetadata, StoredEvent};
use crate::events::CortexEvent;

const BATCH_SIZE: usize = 10_000;

/// NATS JetStream-backed event log
pub struct NatsEventLog {
    jetstream: jetstream::Context,
    stream: Stream,
    subject_prefix: String,
}

/// Replayed stream plus the JetStream sequence of its last message
struct SubjectHistory {
    events: Vec<StoredEvent<CortexEvent>>,
    last_stream_sequence: u64,
}

impl NatsEventLog {
    /// Connect to NATS and create or get the event stream
    pub async fn connect(config: &NatsEventLogConfig) -> CortexResult<Self> {
        let client = async_nats::connect(config.url.as_str())
            .await
            .map_err(|e| CortexError::EventLog(e.to_string()))?;

        let jetstream = jetstream::new(client);

        let stream = jetstream
            .get_or_create_stream(jetstream::stream::Config {
                name: config.stream_name.clone(),
                subjects: vec![format!("{}.>", config.subject_prefix)],
                max_age: config.max_age,
                storage: jetstream::stream::StorageType::File,
                ..Default::default()
            })
            .await
            .map_err(|e| CortexError::EventLog(e.to_string()))?;

        debug!(
            url = %config.url,
            stream = %config.stream_name,
            "Connected NATS event log"
        );

        Ok(Self {
            jetstream,
            stream,
            subject_prefix: config.subject_prefix.clone(),
        })
    }

    fn subject(&self, avatar_id: &AvatarId, aggregate_id: Uuid) -> String {
        format!("{}.{}.{}", self.subject_prefix, avatar_id, aggregate_id)
    }

    async fn read_subject(
        &self,
        avatar_id: &AvatarId,
        aggregate_id: Uuid,
    ) -> CortexResult<SubjectHistory> {
        let consumer = self
            .stream
            .create_consumer(jetstream::consumer::pull::Config {
                filter_subject: self.subject(avatar_id, aggregate_id),
                ..Default::default()
            })
            .await
            .map_err(|e| CortexError::EventLog(e.to_string()))?;

        let mut history = SubjectHistory {
            events: Vec::new(),
            last_stream_sequence: 0,
        };

        loop {
            let messages_result = consumer
                .fetch()
                .max_messages(BATCH_SIZE)
                .expires(std::time::Duration::from_secs(2))
                .messages()
                .await;

            // An empty subject surfaces as a fetch timeout
            let mut messages = match messages_result {
                Ok(msgs) => msgs,
                Err(e) => {
                    let err_msg = e.to_string().to_lowercase();
                    if err_msg.contains("timeout")
                        || err_msg.contains("timed out")
                        || err_msg.contains("no messages")
                    {
                        break;
                    }
                    return Err(CortexError::EventLog(e.to_string()));
                }
            };

            let mut batch_count = 0;

            while let Some(message) = messages.next().await {
                let msg = message.map_err(|e| CortexError::EventLog(e.to_string()))?;

                let stored: StoredEvent<CortexEvent> = serde_json::from_slice(&msg.payload)?;
                let stream_sequence = msg
                    .info()
                    .map_err(|e| CortexError::EventLog(e.to_string()))?
                    .stream_sequence;

                history.last_stream_sequence = history.last_stream_sequence.max(stream_sequence);
                history.events.push(stored);

                msg.ack()
                    .await
                    .map_err(|e| CortexError::EventLog(e.to_string()))?;

                batch_count += 1;
            }

            if batch_count < BATCH_SIZE {
                break;
            }
        }

        history.events.sort_by_key(|e| e.sequence);
        Ok(history)
    }
}

fn is_wrong_sequence(message: &str) -> bool {
    message.to_lowercase().contains("wrong last sequence")
}

#[async_trait]
impl EventLog for NatsEventLog {
    async fn append(
        &self,
        avatar_id: &AvatarId,
        aggregate_id: Uuid,
        expected_version: u64,
        events: Vec<CortexEvent>,
        metadata: EventMetadata,
    ) -> CortexResult<u64> {
        let history = self.read_subject(avatar_id, aggregate_id).await?;

        let actual = history.events.len() as u64;
        if actual != expected_version {
            return Err(CortexError::Concurrency {
                aggregate_id,
                expected: expected_version,
                actual,
            });
        }

        let subject = self.subject(avatar_id, aggregate_id);
        let mut last_stream_sequence = history.last_stream_sequence;
        let mut version = actual;

        for event in events {
            version += 1;

            let stored = StoredEvent {
                aggregate_id,
                avatar_id: avatar_id.clone(),
                sequence: version,
                event_type: event.event_type_name().to_string(),
                recorded_at: Utc::now(),
                correlation_id: metadata.correlation_id,
                data: event,
            };
            let payload = serde_json::to_vec(&stored)?;

            let publish = Publish::build()
                .payload(payload.into())
                .expected_last_subject_sequence(last_stream_sequence);

            let ack = self
                .jetstream
                .send_publish(subject.clone(), publish)
                .await
                .map_err(|e| CortexError::EventLog(e.to_string()))?
                .await;

            match ack {
                Ok(ack) => last_stream_sequence = ack.sequence,
                Err(e) if is_wrong_sequence(&e.to_string()) => {
                    warn!(
                        avatar_id = %avatar_id,
                        aggregate_id = %aggregate_id,
                        expected_version,
                        "Concurrent append detected by JetStream"
                    );
                    return Err(CortexError::Concurrency {
                        aggregate_id,
                        expected: expected_version,
                        actual: expected_version + 1,
                    });
                }
                Err(e) => return Err(CortexError::EventLog(e.to_string())),
            }
        }

        debug!(
            avatar_id = %avatar_id,
            aggregate_id = %aggregate_id,
            version,
            "Appended events to JetStream"
        );
        Ok(version)
    }

    async fn read_history(
        &self,
        avatar_id: &AvatarId,
        aggregate_id: Uuid,
    ) -> CortexResult<Vec<StoredEvent<CortexEvent>>> {
        Ok(self.read_subject(avatar_id, aggregate_id).await?.events)
    }
}
