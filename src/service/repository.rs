// Copyright (c) 2025 - Cowboy AI, Inc.
//! Aggregate Repository
//!
//! Replays aggregates from the event log and persists their staged events.
//! Also builds the per-command snapshots handlers need: layers and authors.

use std::sync::Arc;
use uuid::Uuid;

use crate::aggregate::{Aggregate, Node};
use crate::domain::{parse_id, Author, AvatarId, Layer};
use crate::errors::{CortexError, CortexResult};
use crate::event_store::{EventLog, EventMetadata};
use crate::events::CortexEvent;

/// Event-log-backed store for node and edge aggregates
#[derive(Clone)]
pub struct Repository {
    log: Arc<dyn EventLog>,
}

impl Repository {
    pub fn new(log: Arc<dyn EventLog>) -> Self {
        Self { log }
    }

    pub fn log(&self) -> &Arc<dyn EventLog> {
        &self.log
    }

    /// Replay aggregate `id`, `None` if the stream is empty
    ///
    /// A stream of another aggregate kind fails with `InvalidArgument`.
    pub async fn load<A: Aggregate>(&self, avatar_id: &AvatarId, id: Uuid) -> CortexResult<Option<A>> {
        self.load_as(avatar_id, id, "id").await
    }

    /// Replay aggregate `id`, failing with `InvalidArgument` naming `role` if missing
    pub async fn require<A: Aggregate>(
        &self,
        avatar_id: &AvatarId,
        id: Uuid,
        role: &str,
    ) -> CortexResult<A> {
        self.load_as(avatar_id, id, role).await?.ok_or_else(|| {
            CortexError::invalid_argument(role, format!("No {} with id {} exists", A::KIND, id))
        })
    }

    async fn load_as<A: Aggregate>(
        &self,
        avatar_id: &AvatarId,
        id: Uuid,
        role: &str,
    ) -> CortexResult<Option<A>> {
        let history = self.log.read_history(avatar_id, id).await?;
        if history.is_empty() {
            return Ok(None);
        }

        let events = history
            .into_iter()
            .map(|stored| {
                A::Event::try_from(stored.data).map_err(|other| {
                    CortexError::invalid_argument(
                        role,
                        format!(
                            "{} does not refer to a stream of kind {}, found {} events",
                            id,
                            A::KIND,
                            other.kind()
                        ),
                    )
                })
            })
            .collect::<CortexResult<Vec<_>>>()?;

        Ok(Some(A::from_history(events)))
    }

    /// Append staged events at the committed version, then mark them committed
    ///
    /// Returns the aggregate version. Nothing is written if nothing is staged.
    pub async fn save<A: Aggregate>(
        &self,
        avatar_id: &AvatarId,
        aggregate: &mut A,
        metadata: EventMetadata,
    ) -> CortexResult<u64> {
        if aggregate.uncommitted_changes().is_empty() {
            return Ok(aggregate.version());
        }

        let events: Vec<CortexEvent> = aggregate
            .uncommitted_changes()
            .iter()
            .cloned()
            .map(Into::into)
            .collect();

        let version = self
            .log
            .append(
                avatar_id,
                aggregate.id(),
                aggregate.committed_version(),
                events,
                metadata,
            )
            .await?;

        aggregate.mark_committed();
        Ok(version)
    }

    /// Resolve a layer id; nil is the root layer, anything else must be a node
    pub async fn layer(&self, avatar_id: &AvatarId, layer_id: Uuid, role: &str) -> CortexResult<Layer> {
        if layer_id == Layer::ROOT_ID {
            return Ok(Layer::root());
        }
        let node: Node = self.require(avatar_id, layer_id, role).await?;
        Ok(Layer::of(&node))
    }

    /// Load the author node named by `author_id` together with its layer
    pub async fn author(&self, avatar_id: &AvatarId, author_id: &str) -> CortexResult<Author> {
        let author_id = parse_id("author_id", author_id)?;
        let node: Node = self.require(avatar_id, author_id, "author").await?;
        let layer = self.layer(avatar_id, node.layer_id(), "layer").await?;
        Author::new(node, layer)
    }
}
