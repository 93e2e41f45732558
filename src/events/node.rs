// Copyright (c) 2025 - Cowboy AI, Inc.
//! Node Domain Events
//!
//! Every state change of a [`Node`](crate::aggregate::Node) is one of these
//! facts. They carry only domain data; sequence numbers, timestamps and
//! correlation ids live on the [`StoredEvent`](crate::event_store::StoredEvent)
//! envelope so that replay stays deterministic.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::AxonEntry;

/// Node Domain Events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeEvent {
    /// Node was created (always the first event of a node stream)
    NodeCreated(NodeCreated),

    /// Tag was changed
    NodeTagChanged(NodeTagChanged),

    /// Data payload was changed
    NodeDataChanged(NodeDataChanged),

    /// Outgoing edges were appended to the axon
    EdgesAdded(EdgesAdded),

    /// Outgoing edges were removed from the axon
    EdgesRemoved(EdgesRemoved),

    /// Node was deactivated (terminal state)
    NodeDeactivated(NodeDeactivated),
}

/// Node was created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeCreated {
    /// Event version for schema evolution
    pub event_version: u32,

    /// Node aggregate ID
    pub aggregate_id: Uuid,

    /// Initial tag
    pub tag: String,

    /// Layer the node belongs to (nil = root layer)
    pub layer_id: Uuid,

    /// Author who created the node
    pub author_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeTagChanged {
    pub event_version: u32,
    pub aggregate_id: Uuid,
    pub tag: String,
    pub author_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDataChanged {
    pub event_version: u32,
    pub aggregate_id: Uuid,
    pub data: String,
}

/// Edges appended to the axon, in call order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgesAdded {
    pub event_version: u32,
    pub aggregate_id: Uuid,
    pub entries: Vec<AxonEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgesRemoved {
    pub event_version: u32,
    pub aggregate_id: Uuid,
    pub entries: Vec<AxonEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDeactivated {
    pub event_version: u32,
    pub aggregate_id: Uuid,
    pub author_id: Uuid,
}

impl NodeCreated {
    pub const CURRENT_VERSION: u32 = 1;
}

impl NodeTagChanged {
    pub const CURRENT_VERSION: u32 = 1;
}

impl NodeDataChanged {
    pub const CURRENT_VERSION: u32 = 1;
}

impl EdgesAdded {
    pub const CURRENT_VERSION: u32 = 1;
}

impl EdgesRemoved {
    pub const CURRENT_VERSION: u32 = 1;
}

impl NodeDeactivated {
    pub const CURRENT_VERSION: u32 = 1;
}

impl NodeEvent {
    /// Extract aggregate ID from node event
    pub fn aggregate_id(&self) -> Uuid {
        use NodeEvent::*;

        match self {
            NodeCreated(e) => e.aggregate_id,
            NodeTagChanged(e) => e.aggregate_id,
            NodeDataChanged(e) => e.aggregate_id,
            EdgesAdded(e) => e.aggregate_id,
            EdgesRemoved(e) => e.aggregate_id,
            NodeDeactivated(e) => e.aggregate_id,
        }
    }

    /// Extract event version from node event
    pub fn event_version(&self) -> u32 {
        use NodeEvent::*;

        match self {
            NodeCreated(e) => e.event_version,
            NodeTagChanged(e) => e.event_version,
            NodeDataChanged(e) => e.event_version,
            EdgesAdded(e) => e.event_version,
            EdgesRemoved(e) => e.event_version,
            NodeDeactivated(e) => e.event_version,
        }
    }

    /// Get human-readable event type name
    pub fn event_type_name(&self) -> &'static str {
        use NodeEvent::*;

        match self {
            NodeCreated(_) => "NodeCreated",
            NodeTagChanged(_) => "NodeTagChanged",
            NodeDataChanged(_) => "NodeDataChanged",
            EdgesAdded(_) => "EdgesAdded",
            EdgesRemoved(_) => "EdgesRemoved",
            NodeDeactivated(_) => "NodeDeactivated",
        }
    }
}
