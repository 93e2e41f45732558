// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for cortex-graph
//!
//! Provides deterministic ids, command builders and a handler harness over an
//! in-memory event log.
//!
//! # Design Principles
//! - All ids are fixed constants (no `Uuid::now_v7()`)
//! - Commands are built here, tests only override the fields they exercise
//! - Every harness owns a fresh event log

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use cortex_graph::aggregate::*;
use cortex_graph::domain::{
    AvatarId, AxonEntry, Effect, LinkValidator, LinkValidatorSource, NoSharedTags,
    TagSharingOracle,
};
use cortex_graph::event_store::{EventLog, InMemoryEventLog};
use cortex_graph::service::{
    EdgeCommandHandlers, Handle, NodeCommandHandlers, Repository, StoreLinkValidatorSource,
};
use cortex_graph::CortexResult;

pub const AVATAR: &str = "test-avatar";

pub const AUTHOR_ID: &str = "01934f4a-a000-7000-8000-00000000a000";
pub const NODE_ID_1: &str = "01934f4a-1000-7000-8000-000000001000";
pub const NODE_ID_2: &str = "01934f4a-1001-7000-8000-000000001001";
pub const NODE_ID_3: &str = "01934f4a-1002-7000-8000-000000001002";
pub const LAYER_ID: &str = "01934f4a-3000-7000-8000-000000003000";
pub const EDGE_ID_1: &str = "01934f4a-2000-7000-8000-000000002000";

pub const CORRELATION_ID_1: &str = "01934f4a-c001-7000-8000-00000000c001";

/// Parse a fixed UUID from a constant string
pub fn parse_uuid(s: &str) -> Uuid {
    Uuid::parse_str(s).expect("Invalid UUID in test fixture")
}

pub fn avatar() -> AvatarId {
    AvatarId::new(AVATAR).expect("Invalid avatar in test fixture")
}

pub fn correlation_id() -> Uuid {
    parse_uuid(CORRELATION_ID_1)
}

/// Link validator with a fixed answer
pub struct FixedLinkValidator(pub bool);

#[async_trait]
impl LinkValidator for FixedLinkValidator {
    async fn is_valid_target(&self, _node_id: Uuid) -> bool {
        self.0
    }
}

/// Source handing out the same validator for every avatar
pub struct FixedLinkValidatorSource(pub Arc<dyn LinkValidator>);

impl LinkValidatorSource for FixedLinkValidatorSource {
    fn validator_for(&self, _avatar_id: &AvatarId) -> Arc<dyn LinkValidator> {
        self.0.clone()
    }
}

/// Node and edge handlers sharing one in-memory event log
pub struct Harness {
    pub log: Arc<InMemoryEventLog>,
    pub nodes: NodeCommandHandlers,
    pub edges: EdgeCommandHandlers,
}

impl Harness {
    /// Link targets validated against the event log, no shared tags
    pub fn new() -> Self {
        let log = Arc::new(InMemoryEventLog::new());
        let source = StoreLinkValidatorSource::new(Repository::new(log.clone()));
        Self::build(log, Arc::new(source), Arc::new(NoSharedTags))
    }

    /// Every link target answers `valid`
    pub fn with_link_validator(valid: bool) -> Self {
        let log = Arc::new(InMemoryEventLog::new());
        let source = FixedLinkValidatorSource(Arc::new(FixedLinkValidator(valid)));
        Self::build(log, Arc::new(source), Arc::new(NoSharedTags))
    }

    pub fn with_oracle(oracle: Arc<dyn TagSharingOracle>) -> Self {
        let log = Arc::new(InMemoryEventLog::new());
        let source = StoreLinkValidatorSource::new(Repository::new(log.clone()));
        Self::build(log, Arc::new(source), oracle)
    }

    fn build(
        log: Arc<InMemoryEventLog>,
        source: Arc<dyn LinkValidatorSource>,
        oracle: Arc<dyn TagSharingOracle>,
    ) -> Self {
        let shared: Arc<dyn EventLog> = log.clone();
        Self {
            nodes: NodeCommandHandlers::new(shared.clone(), source),
            edges: EdgeCommandHandlers::new(shared, oracle),
            log,
        }
    }

    pub async fn node(&self, id: &str) -> Node {
        self.nodes
            .node(&avatar(), parse_uuid(id))
            .await
            .expect("Failed to read node")
            .expect("Node does not exist")
    }

    pub async fn edge(&self, id: &str) -> Edge {
        self.edges
            .edge(&avatar(), parse_uuid(id))
            .await
            .expect("Failed to read edge")
            .expect("Edge does not exist")
    }

    /// Create a root-layer node authored by itself
    pub async fn create_node(&self, id: &str, tag: &str) -> CortexResult<u64> {
        self.nodes.handle(create_node(id, tag, id)).await
    }

    /// Create the author node and two endpoint nodes authored by it
    pub async fn seed_endpoints(&self) {
        self.create_node(AUTHOR_ID, "Author").await.expect("Failed to seed author");
        self.nodes
            .handle(create_node(NODE_ID_1, "Pre", AUTHOR_ID))
            .await
            .expect("Failed to seed presynaptic node");
        self.nodes
            .handle(create_node(NODE_ID_2, "Post", AUTHOR_ID))
            .await
            .expect("Failed to seed postsynaptic node");
    }
}

pub fn create_node(id: &str, tag: &str, author_id: &str) -> CreateNode {
    CreateNode {
        avatar_id: avatar(),
        id: parse_uuid(id),
        tag: tag.to_string(),
        layer_id: None,
        author_id: author_id.to_string(),
        correlation_id: correlation_id(),
    }
}

pub fn change_data(id: &str, data: &str, expected_version: u64) -> ChangeNodeData {
    ChangeNodeData {
        avatar_id: avatar(),
        id: parse_uuid(id),
        new_data: data.to_string(),
        expected_version,
        correlation_id: correlation_id(),
    }
}

pub fn change_tag(id: &str, tag: &str, expected_version: u64) -> ChangeNodeTag {
    ChangeNodeTag {
        avatar_id: avatar(),
        id: parse_uuid(id),
        new_tag: tag.to_string(),
        author_id: AUTHOR_ID.to_string(),
        expected_version,
        correlation_id: correlation_id(),
    }
}

pub fn deactivate_node(id: &str, expected_version: u64) -> DeactivateNode {
    DeactivateNode {
        avatar_id: avatar(),
        id: parse_uuid(id),
        author_id: AUTHOR_ID.to_string(),
        expected_version,
        correlation_id: correlation_id(),
    }
}

pub fn add_edges(id: &str, targets: &[&str], expected_version: u64) -> AddEdgesToNode {
    AddEdgesToNode {
        avatar_id: avatar(),
        id: parse_uuid(id),
        edges: targets.iter().map(|t| AxonEntry::to(parse_uuid(t))).collect(),
        expected_version,
        correlation_id: correlation_id(),
    }
}

pub fn remove_edges(id: &str, targets: &[&str], expected_version: u64) -> RemoveEdgesFromNode {
    RemoveEdgesFromNode {
        avatar_id: avatar(),
        id: parse_uuid(id),
        edges: targets.iter().map(|t| AxonEntry::to(parse_uuid(t))).collect(),
        expected_version,
        correlation_id: correlation_id(),
    }
}

/// Excitatory edge NODE_ID_1 → NODE_ID_2 authored by AUTHOR_ID
pub fn create_edge(id: &str, strength: f32) -> CreateEdge {
    CreateEdge {
        avatar_id: avatar(),
        id: parse_uuid(id),
        presynaptic_id: parse_uuid(NODE_ID_1),
        postsynaptic_id: parse_uuid(NODE_ID_2),
        effect: Effect::Excite,
        strength,
        author_id: AUTHOR_ID.to_string(),
        correlation_id: correlation_id(),
    }
}

pub fn deactivate_edge(id: &str, expected_version: u64) -> DeactivateEdge {
    DeactivateEdge {
        avatar_id: avatar(),
        id: parse_uuid(id),
        author_id: AUTHOR_ID.to_string(),
        expected_version,
        correlation_id: correlation_id(),
    }
}
