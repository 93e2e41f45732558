// Copyright (c) 2025 - Cowboy AI, Inc.
//! Edge (Terminal) Domain Events

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Effect, Strength};

/// Edge Domain Events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EdgeEvent {
    /// Edge was created between two nodes
    EdgeCreated(EdgeCreated),

    /// Edge was deactivated (terminal state)
    EdgeDeactivated(EdgeDeactivated),
}

/// Edge was created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeCreated {
    /// Event version for schema evolution
    pub event_version: u32,

    /// Edge aggregate ID
    pub aggregate_id: Uuid,

    /// Source node
    pub presynaptic_id: Uuid,

    /// Target node
    pub postsynaptic_id: Uuid,

    pub effect: Effect,

    pub strength: Strength,

    /// Node id of the author who created the edge
    pub author_id: Uuid,
}

/// Edge was deactivated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeDeactivated {
    pub event_version: u32,
    pub aggregate_id: Uuid,
    pub author_id: Uuid,
}

impl EdgeCreated {
    pub const CURRENT_VERSION: u32 = 1;
}

impl EdgeDeactivated {
    pub const CURRENT_VERSION: u32 = 1;
}

impl EdgeEvent {
    pub fn aggregate_id(&self) -> Uuid {
        match self {
            EdgeEvent::EdgeCreated(e) => e.aggregate_id,
            EdgeEvent::EdgeDeactivated(e) => e.aggregate_id,
        }
    }

    pub fn event_version(&self) -> u32 {
        match self {
            EdgeEvent::EdgeCreated(e) => e.event_version,
            EdgeEvent::EdgeDeactivated(e) => e.event_version,
        }
    }

    pub fn event_type_name(&self) -> &'static str {
        match self {
            EdgeEvent::EdgeCreated(_) => "EdgeCreated",
            EdgeEvent::EdgeDeactivated(_) => "EdgeDeactivated",
        }
    }
}
