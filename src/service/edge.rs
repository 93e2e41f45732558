// Copyright (c) 2025 - Cowboy AI, Inc.
//! Edge Command Handlers
//!
//! Edges act on snapshots of the involved nodes. The snapshots are read before
//! the edge is mutated and are not re-checked when the edge is appended.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::aggregate::*;
use crate::domain::{AvatarId, TagSharingOracle};
use crate::errors::CortexResult;
use crate::event_store::{EventLog, EventMetadata};
use crate::service::{ensure_version, log_outcome, Handle, Repository};

/// Handles every edge command against one event log
#[derive(Clone)]
pub struct EdgeCommandHandlers {
    repository: Repository,
    oracle: Arc<dyn TagSharingOracle>,
}

impl EdgeCommandHandlers {
    pub fn new(log: Arc<dyn EventLog>, oracle: Arc<dyn TagSharingOracle>) -> Self {
        Self {
            repository: Repository::new(log),
            oracle,
        }
    }

    /// Replay edge `id` in `avatar_id`
    pub async fn edge(&self, avatar_id: &AvatarId, id: Uuid) -> CortexResult<Option<Edge>> {
        self.repository.load(avatar_id, id).await
    }

    async fn create_edge(&self, command: CreateEdge) -> CortexResult<u64> {
        let avatar_id = &command.avatar_id;

        let author = self.repository.author(avatar_id, &command.author_id).await?;
        let presynaptic: Node = self
            .repository
            .require(avatar_id, command.presynaptic_id, "presynaptic")
            .await?;
        let postsynaptic: Node = self
            .repository
            .require(avatar_id, command.postsynaptic_id, "postsynaptic")
            .await?;
        let presynaptic_layer = self
            .repository
            .layer(avatar_id, presynaptic.layer_id(), "presynaptic_layer")
            .await?;

        let mut edge = Edge::create(
            command.id,
            &presynaptic,
            &presynaptic_layer,
            &postsynaptic,
            command.effect,
            command.strength,
            &author,
            self.oracle.as_ref(),
        )?;

        self.repository
            .save(avatar_id, &mut edge, EventMetadata::new(command.correlation_id))
            .await
    }

    async fn deactivate(&self, command: DeactivateEdge) -> CortexResult<u64> {
        let avatar_id = &command.avatar_id;

        let mut edge: Edge = self.repository.require(avatar_id, command.id, "id").await?;
        ensure_version(command.id, command.expected_version, edge.version())?;

        let author = self.repository.author(avatar_id, &command.author_id).await?;
        let presynaptic: Node = self
            .repository
            .require(avatar_id, edge.presynaptic_id(), "presynaptic")
            .await?;
        let presynaptic_layer = self
            .repository
            .layer(avatar_id, presynaptic.layer_id(), "presynaptic_layer")
            .await?;

        edge.deactivate(
            &presynaptic,
            &presynaptic_layer,
            &author,
            self.oracle.as_ref(),
        )?;

        self.repository
            .save(avatar_id, &mut edge, EventMetadata::new(command.correlation_id))
            .await
    }
}

#[async_trait]
impl Handle<CreateEdge> for EdgeCommandHandlers {
    async fn handle(&self, command: CreateEdge) -> CortexResult<u64> {
        let id = command.id;
        debug!(
            aggregate_id = %id,
            avatar_id = %command.avatar_id,
            presynaptic_id = %command.presynaptic_id,
            postsynaptic_id = %command.postsynaptic_id,
            "Handling CreateEdge"
        );
        log_outcome("CreateEdge", id, self.create_edge(command).await)
    }
}

#[async_trait]
impl Handle<DeactivateEdge> for EdgeCommandHandlers {
    async fn handle(&self, command: DeactivateEdge) -> CortexResult<u64> {
        let id = command.id;
        debug!(aggregate_id = %id, avatar_id = %command.avatar_id, "Handling DeactivateEdge");
        log_outcome("DeactivateEdge", id, self.deactivate(command).await)
    }
}
