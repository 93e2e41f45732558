// Copyright (c) 2025 - Cowboy AI, Inc.
//! Node ("Neuron") Aggregate
//!
//! A node is a versioned vertex with a tag, a free-form data payload, an
//! active/inactive lifecycle and an ordered, duplicate-free axon of outgoing
//! connections.
//!
//! # Lifecycle
//!
//! ```text
//! create ──► active ──deactivate──► inactive (terminal)
//!              │
//!              └── change_tag / change_data / add_edges / remove_edges
//! ```
//!
//! Link targets are checked through an injected [`LinkValidator`] before
//! `EdgesAdded` is staged, so replaying that event never repeats the check.

use futures::future::try_join_all;
use std::collections::HashSet;
use uuid::Uuid;

use crate::aggregate::{Aggregate, Changes};
use crate::domain::{ensure_not_nil, parse_id, AxonEntry, Layer, LinkValidator};
use crate::errors::{CortexError, CortexResult};
use crate::events::*;

const DEACTIVATED_MESSAGE: &str = "Node is already deactivated";

/// Node aggregate root
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    id: Uuid,
    tag: String,
    data: String,
    creator_id: Uuid,
    layer_id: Uuid,
    active: bool,
    axon: Vec<AxonEntry>,
    changes: Changes<NodeEvent>,
}

impl Node {
    /// Create a node in the root layer
    pub fn create(id: Uuid, tag: impl Into<String>, author_id: &str) -> CortexResult<Self> {
        Self::create_in_layer(id, tag, Layer::ROOT_ID, author_id)
    }

    /// Create a node belonging to `layer_id`
    ///
    /// # Business Rules
    /// - `id` must not be nil
    /// - `tag` must not be empty
    /// - `author_id` must parse to a non-nil id
    pub fn create_in_layer(
        id: Uuid,
        tag: impl Into<String>,
        layer_id: Uuid,
        author_id: &str,
    ) -> CortexResult<Self> {
        let tag = tag.into();

        ensure_not_nil("id", id)?;
        ensure_tag("tag", &tag)?;
        let author_id = parse_id("author_id", author_id)?;

        let mut node = Node::default();
        node.apply_change(NodeEvent::NodeCreated(NodeCreated {
            event_version: NodeCreated::CURRENT_VERSION,
            aggregate_id: id,
            tag,
            layer_id,
            author_id,
        }));
        Ok(node)
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn creator_id(&self) -> Uuid {
        self.creator_id
    }

    pub fn layer_id(&self) -> Uuid {
        self.layer_id
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn axon(&self) -> &[AxonEntry] {
        &self.axon
    }

    pub fn has_target(&self, target_id: Uuid) -> bool {
        self.axon.iter().any(|entry| entry.target_id == target_id)
    }

    /// Change the tag; no-op when unchanged
    pub fn change_tag(&mut self, new_tag: impl Into<String>, author_id: Uuid) -> CortexResult<()> {
        let new_tag = new_tag.into();

        self.ensure_active()?;
        ensure_tag("new_tag", &new_tag)?;

        if new_tag == self.tag {
            return Ok(());
        }

        self.apply_change(NodeEvent::NodeTagChanged(NodeTagChanged {
            event_version: NodeTagChanged::CURRENT_VERSION,
            aggregate_id: self.id,
            tag: new_tag,
            author_id,
        }));
        Ok(())
    }

    /// Change the data payload; no-op when unchanged
    pub fn change_data(&mut self, new_data: impl Into<String>) -> CortexResult<()> {
        let new_data = new_data.into();

        self.ensure_active()?;

        if new_data == self.data {
            return Ok(());
        }

        self.apply_change(NodeEvent::NodeDataChanged(NodeDataChanged {
            event_version: NodeDataChanged::CURRENT_VERSION,
            aggregate_id: self.id,
            data: new_data,
        }));
        Ok(())
    }

    /// Append outgoing edges to the axon, all or nothing
    ///
    /// # Business Rules
    /// - At least one edge
    /// - Node must be active
    /// - No target may already be in the axon or repeat within `edges`
    /// - Every target must pass `link_validator`; the first rejection fails the call
    pub async fn add_edges(
        &mut self,
        link_validator: &dyn LinkValidator,
        edges: &[AxonEntry],
    ) -> CortexResult<()> {
        if edges.is_empty() {
            return Err(CortexError::invalid_argument(
                "edges",
                "At least one edge must be specified",
            ));
        }

        self.ensure_active()?;

        let mut seen = HashSet::with_capacity(edges.len());
        for entry in edges {
            ensure_not_nil("edges", entry.target_id)?;
            if self.has_target(entry.target_id) || !seen.insert(entry.target_id) {
                return Err(CortexError::invalid_argument(
                    "edges",
                    format!("Axon already contains an edge to {}", entry.target_id),
                ));
            }
        }

        try_join_all(edges.iter().map(|entry| async move {
            if link_validator.is_valid_target(entry.target_id).await {
                Ok(())
            } else {
                Err(CortexError::invalid_argument(
                    "edges",
                    format!("Target {} is not a valid link target", entry.target_id),
                ))
            }
        }))
        .await?;

        self.apply_change(NodeEvent::EdgesAdded(EdgesAdded {
            event_version: EdgesAdded::CURRENT_VERSION,
            aggregate_id: self.id,
            entries: edges.to_vec(),
        }));
        Ok(())
    }

    /// Remove outgoing edges from the axon, all or nothing
    pub fn remove_edges(&mut self, edges: &[AxonEntry]) -> CortexResult<()> {
        if edges.is_empty() {
            return Err(CortexError::invalid_argument(
                "edges",
                "At least one edge must be specified",
            ));
        }

        self.ensure_active()?;

        if let Some(missing) = edges.iter().find(|entry| !self.has_target(entry.target_id)) {
            return Err(CortexError::invalid_argument(
                "edges",
                format!("Axon does not contain an edge to {}", missing.target_id),
            ));
        }

        self.apply_change(NodeEvent::EdgesRemoved(EdgesRemoved {
            event_version: EdgesRemoved::CURRENT_VERSION,
            aggregate_id: self.id,
            entries: edges.to_vec(),
        }));
        Ok(())
    }

    /// Deactivate the node; permanent
    pub fn deactivate(&mut self, author_id: Uuid) -> CortexResult<()> {
        self.ensure_active()?;

        self.apply_change(NodeEvent::NodeDeactivated(NodeDeactivated {
            event_version: NodeDeactivated::CURRENT_VERSION,
            aggregate_id: self.id,
            author_id,
        }));
        Ok(())
    }

    fn ensure_active(&self) -> CortexResult<()> {
        if !self.active {
            return Err(CortexError::illegal_state(DEACTIVATED_MESSAGE));
        }
        Ok(())
    }
}

fn ensure_tag(field: &str, tag: &str) -> CortexResult<()> {
    if tag.trim().is_empty() {
        return Err(CortexError::invalid_argument(field, "Tag cannot be empty"));
    }
    Ok(())
}

impl Aggregate for Node {
    type Event = NodeEvent;

    const KIND: AggregateKind = AggregateKind::Node;

    fn id(&self) -> Uuid {
        self.id
    }

    fn apply(&mut self, event: &NodeEvent) {
        match event {
            NodeEvent::NodeCreated(e) => {
                self.id = e.aggregate_id;
                self.tag = e.tag.clone();
                self.data = String::new();
                self.creator_id = e.author_id;
                self.layer_id = e.layer_id;
                self.active = true;
                self.axon.clear();
            }

            NodeEvent::NodeTagChanged(e) => {
                self.tag = e.tag.clone();
            }

            NodeEvent::NodeDataChanged(e) => {
                self.data = e.data.clone();
            }

            NodeEvent::EdgesAdded(e) => {
                self.axon.extend(e.entries.iter().copied());
            }

            NodeEvent::EdgesRemoved(e) => {
                self.axon
                    .retain(|entry| !e.entries.iter().any(|r| r.target_id == entry.target_id));
            }

            NodeEvent::NodeDeactivated(_) => {
                self.active = false;
            }
        }
    }

    fn changes(&self) -> &Changes<NodeEvent> {
        &self.changes
    }

    fn changes_mut(&mut self) -> &mut Changes<NodeEvent> {
        &mut self.changes
    }
}
