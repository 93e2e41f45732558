// Copyright (c) 2025 - Cowboy AI, Inc.
//! Cortex Event Envelope
//!
//! Polymorphic envelope for all aggregate events. The event log stores and
//! returns `CortexEvent`; each aggregate narrows it back to its own closed
//! event enum through `TryFrom`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::edge::EdgeEvent;
use super::node::NodeEvent;

/// Stream kind an event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateKind {
    Node,
    Edge,
}

impl std::fmt::Display for AggregateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AggregateKind::Node => write!(f, "node"),
            AggregateKind::Edge => write!(f, "edge"),
        }
    }
}

/// Cortex Domain Events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "aggregate_type", content = "event", rename_all = "snake_case")]
pub enum CortexEvent {
    /// Events from the Node aggregate
    Node(NodeEvent),

    /// Events from the Edge aggregate
    Edge(EdgeEvent),
}

impl CortexEvent {
    pub fn kind(&self) -> AggregateKind {
        match self {
            CortexEvent::Node(_) => AggregateKind::Node,
            CortexEvent::Edge(_) => AggregateKind::Edge,
        }
    }

    /// Extract aggregate ID from any event type
    pub fn aggregate_id(&self) -> Uuid {
        match self {
            CortexEvent::Node(event) => event.aggregate_id(),
            CortexEvent::Edge(event) => event.aggregate_id(),
        }
    }

    /// Extract event version from any event type
    pub fn event_version(&self) -> u32 {
        match self {
            CortexEvent::Node(event) => event.event_version(),
            CortexEvent::Edge(event) => event.event_version(),
        }
    }

    /// Get human-readable event type name
    pub fn event_type_name(&self) -> &'static str {
        match self {
            CortexEvent::Node(event) => event.event_type_name(),
            CortexEvent::Edge(event) => event.event_type_name(),
        }
    }
}

impl From<NodeEvent> for CortexEvent {
    fn from(event: NodeEvent) -> Self {
        CortexEvent::Node(event)
    }
}

impl From<EdgeEvent> for CortexEvent {
    fn from(event: EdgeEvent) -> Self {
        CortexEvent::Edge(event)
    }
}

/// Narrowing fails with the original envelope so the caller can report it
impl TryFrom<CortexEvent> for NodeEvent {
    type Error = CortexEvent;

    fn try_from(event: CortexEvent) -> Result<Self, Self::Error> {
        match event {
            CortexEvent::Node(event) => Ok(event),
            other => Err(other),
        }
    }
}

impl TryFrom<CortexEvent> for EdgeEvent {
    type Error = CortexEvent;

    fn try_from(event: CortexEvent) -> Result<Self, Self::Error> {
        match event {
            CortexEvent::Edge(event) => Ok(event),
            other => Err(other),
        }
    }
}
