// Copyright (c) 2025 - Cowboy AI, Inc.
//! Commands for Node and Edge Aggregates
//!
//! Commands express user intent and can fail validation.
//!
//! # Command Pattern
//!
//! ```text
//! Command → Handler → Aggregate → Events → EventLog
//! ```
//!
//! Commands differ from Events:
//! - Commands express intent (what should happen)
//! - Events express facts (what did happen)
//! - Commands can be rejected by business rules
//!
//! Every command carries the avatar scope it targets and a correlation id
//! that the handler forwards into the stored event metadata. Modification
//! commands also carry the version the caller believes the aggregate is at.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{AvatarId, AxonEntry, Effect};

/// Create a new node
///
/// `layer_id` of `None` places the node in the root layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateNode {
    pub avatar_id: AvatarId,
    pub id: Uuid,
    pub tag: String,
    pub layer_id: Option<Uuid>,
    /// Node id of the author, as text
    pub author_id: String,
    pub correlation_id: Uuid,
}

/// Change the tag of a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeNodeTag {
    pub avatar_id: AvatarId,
    pub id: Uuid,
    pub new_tag: String,
    pub author_id: String,
    pub expected_version: u64,
    pub correlation_id: Uuid,
}

/// Replace the data payload of a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeNodeData {
    pub avatar_id: AvatarId,
    pub id: Uuid,
    pub new_data: String,
    pub expected_version: u64,
    pub correlation_id: Uuid,
}

/// Deactivate a node permanently
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeactivateNode {
    pub avatar_id: AvatarId,
    pub id: Uuid,
    pub author_id: String,
    pub expected_version: u64,
    pub correlation_id: Uuid,
}

/// Append outgoing edges to a node's axon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddEdgesToNode {
    pub avatar_id: AvatarId,
    pub id: Uuid,
    pub edges: Vec<AxonEntry>,
    pub expected_version: u64,
    pub correlation_id: Uuid,
}

/// Remove outgoing edges from a node's axon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveEdgesFromNode {
    pub avatar_id: AvatarId,
    pub id: Uuid,
    pub edges: Vec<AxonEntry>,
    pub expected_version: u64,
    pub correlation_id: Uuid,
}

/// Create an edge between two existing nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEdge {
    pub avatar_id: AvatarId,
    pub id: Uuid,
    pub presynaptic_id: Uuid,
    pub postsynaptic_id: Uuid,
    pub effect: Effect,
    /// Raw strength, validated by the aggregate
    pub strength: f32,
    pub author_id: String,
    pub correlation_id: Uuid,
}

/// Deactivate an edge permanently
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeactivateEdge {
    pub avatar_id: AvatarId,
    pub id: Uuid,
    pub author_id: String,
    pub expected_version: u64,
    pub correlation_id: Uuid,
}
