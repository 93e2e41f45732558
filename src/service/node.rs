// Copyright (c) 2025 - Cowboy AI, Inc.
//! Node Command Handlers

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::aggregate::*;
use crate::domain::{parse_id, AvatarId, Layer, LinkValidatorSource};
use crate::errors::CortexResult;
use crate::event_store::{EventLog, EventMetadata};
use crate::service::{ensure_version, log_outcome, Handle, Repository};

/// Handles every node command against one event log
#[derive(Clone)]
pub struct NodeCommandHandlers {
    repository: Repository,
    link_validators: Arc<dyn LinkValidatorSource>,
}

impl NodeCommandHandlers {
    pub fn new(log: Arc<dyn EventLog>, link_validators: Arc<dyn LinkValidatorSource>) -> Self {
        Self {
            repository: Repository::new(log),
            link_validators,
        }
    }

    /// Replay node `id` in `avatar_id`
    pub async fn node(&self, avatar_id: &AvatarId, id: Uuid) -> CortexResult<Option<Node>> {
        self.repository.load(avatar_id, id).await
    }

    /// Load node `id` and check it is at `expected_version`
    async fn load_for_update(
        &self,
        avatar_id: &AvatarId,
        id: Uuid,
        expected_version: u64,
    ) -> CortexResult<Node> {
        let node: Node = self.repository.require(avatar_id, id, "id").await?;
        ensure_version(id, expected_version, node.version())?;
        Ok(node)
    }

    async fn create_node(&self, command: CreateNode) -> CortexResult<u64> {
        let layer_id = match command.layer_id {
            Some(layer_id) => {
                self.repository
                    .layer(&command.avatar_id, layer_id, "layer_id")
                    .await?
                    .id()
            }
            None => Layer::ROOT_ID,
        };

        let mut node =
            Node::create_in_layer(command.id, command.tag, layer_id, &command.author_id)?;

        self.repository
            .save(
                &command.avatar_id,
                &mut node,
                EventMetadata::new(command.correlation_id),
            )
            .await
    }

    async fn change_tag(&self, command: ChangeNodeTag) -> CortexResult<u64> {
        let mut node = self
            .load_for_update(&command.avatar_id, command.id, command.expected_version)
            .await?;
        let author_id = parse_id("author_id", &command.author_id)?;

        node.change_tag(command.new_tag, author_id)?;

        self.repository
            .save(
                &command.avatar_id,
                &mut node,
                EventMetadata::new(command.correlation_id),
            )
            .await
    }

    async fn change_data(&self, command: ChangeNodeData) -> CortexResult<u64> {
        let mut node = self
            .load_for_update(&command.avatar_id, command.id, command.expected_version)
            .await?;

        node.change_data(command.new_data)?;

        self.repository
            .save(
                &command.avatar_id,
                &mut node,
                EventMetadata::new(command.correlation_id),
            )
            .await
    }

    async fn deactivate(&self, command: DeactivateNode) -> CortexResult<u64> {
        let mut node = self
            .load_for_update(&command.avatar_id, command.id, command.expected_version)
            .await?;
        let author_id = parse_id("author_id", &command.author_id)?;

        node.deactivate(author_id)?;

        self.repository
            .save(
                &command.avatar_id,
                &mut node,
                EventMetadata::new(command.correlation_id),
            )
            .await
    }

    async fn add_edges(&self, command: AddEdgesToNode) -> CortexResult<u64> {
        let mut node = self
            .load_for_update(&command.avatar_id, command.id, command.expected_version)
            .await?;
        let link_validator = self.link_validators.validator_for(&command.avatar_id);

        debug!(
            aggregate_id = %command.id,
            edges = command.edges.len(),
            "Validating link targets"
        );
        node.add_edges(link_validator.as_ref(), &command.edges).await?;

        self.repository
            .save(
                &command.avatar_id,
                &mut node,
                EventMetadata::new(command.correlation_id),
            )
            .await
    }

    async fn remove_edges(&self, command: RemoveEdgesFromNode) -> CortexResult<u64> {
        let mut node = self
            .load_for_update(&command.avatar_id, command.id, command.expected_version)
            .await?;

        node.remove_edges(&command.edges)?;

        self.repository
            .save(
                &command.avatar_id,
                &mut node,
                EventMetadata::new(command.correlation_id),
            )
            .await
    }
}

#[async_trait]
impl Handle<CreateNode> for NodeCommandHandlers {
    async fn handle(&self, command: CreateNode) -> CortexResult<u64> {
        let id = command.id;
        debug!(aggregate_id = %id, avatar_id = %command.avatar_id, "Handling CreateNode");
        log_outcome("CreateNode", id, self.create_node(command).await)
    }
}

#[async_trait]
impl Handle<ChangeNodeTag> for NodeCommandHandlers {
    async fn handle(&self, command: ChangeNodeTag) -> CortexResult<u64> {
        let id = command.id;
        debug!(aggregate_id = %id, avatar_id = %command.avatar_id, "Handling ChangeNodeTag");
        log_outcome("ChangeNodeTag", id, self.change_tag(command).await)
    }
}

#[async_trait]
impl Handle<ChangeNodeData> for NodeCommandHandlers {
    async fn handle(&self, command: ChangeNodeData) -> CortexResult<u64> {
        let id = command.id;
        debug!(aggregate_id = %id, avatar_id = %command.avatar_id, "Handling ChangeNodeData");
        log_outcome("ChangeNodeData", id, self.change_data(command).await)
    }
}

#[async_trait]
impl Handle<DeactivateNode> for NodeCommandHandlers {
    async fn handle(&self, command: DeactivateNode) -> CortexResult<u64> {
        let id = command.id;
        debug!(aggregate_id = %id, avatar_id = %command.avatar_id, "Handling DeactivateNode");
        log_outcome("DeactivateNode", id, self.deactivate(command).await)
    }
}

#[async_trait]
impl Handle<AddEdgesToNode> for NodeCommandHandlers {
    async fn handle(&self, command: AddEdgesToNode) -> CortexResult<u64> {
        let id = command.id;
        debug!(aggregate_id = %id, avatar_id = %command.avatar_id, "Handling AddEdgesToNode");
        log_outcome("AddEdgesToNode", id, self.add_edges(command).await)
    }
}

#[async_trait]
impl Handle<RemoveEdgesFromNode> for NodeCommandHandlers {
    async fn handle(&self, command: RemoveEdgesFromNode) -> CortexResult<u64> {
        let id = command.id;
        debug!(aggregate_id = %id, avatar_id = %command.avatar_id, "Handling RemoveEdgesFromNode");
        log_outcome("RemoveEdgesFromNode", id, self.remove_edges(command).await)
    }
}
