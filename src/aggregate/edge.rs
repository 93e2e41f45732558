// Copyright (c) 2025 - Cowboy AI, Inc.
//! Edge ("Terminal") Aggregate
//!
//! A directed, typed, weighted connection from a presynaptic node to a
//! postsynaptic node. Creation and deactivation work on snapshots of the
//! involved nodes, taken by the handler before the call.

use uuid::Uuid;

use crate::aggregate::{Aggregate, Changes, Node};
use crate::authorization::authorize;
use crate::domain::{ensure_not_nil, Author, Effect, Layer, Strength, TagSharingOracle};
use crate::errors::{CortexError, CortexResult};
use crate::events::*;

/// Edge aggregate root
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Edge {
    id: Uuid,
    presynaptic_id: Uuid,
    postsynaptic_id: Uuid,
    effect: Effect,
    strength: f32,
    creator_id: Uuid,
    active: bool,
    changes: Changes<EdgeEvent>,
}

impl Edge {
    /// Create an edge from `presynaptic` to `postsynaptic`
    ///
    /// # Business Rules
    /// - `id` must not be nil
    /// - Both endpoints and the author node must be active, else `InvalidArgument` naming the role
    /// - `effect` must be set and `strength` in (0, 1]
    /// - No self-loops and no id shared with an endpoint or the author
    /// - `presynaptic_layer` must be the presynaptic node's layer
    /// - The author must pass the authorization rule for the presynaptic node
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        id: Uuid,
        presynaptic: &Node,
        presynaptic_layer: &Layer,
        postsynaptic: &Node,
        effect: Effect,
        strength: f32,
        author: &Author,
        oracle: &dyn TagSharingOracle,
    ) -> CortexResult<Self> {
        ensure_not_nil("id", id)?;

        ensure_participant_active("presynaptic", presynaptic)?;
        ensure_participant_active("postsynaptic", postsynaptic)?;
        if !effect.is_set() {
            return Err(CortexError::invalid_argument(
                "effect",
                "Effect must be excite or inhibit",
            ));
        }
        let strength = Strength::new(strength)?;
        ensure_participant_active("author", author.node())?;

        if postsynaptic.id() == presynaptic.id() {
            return Err(CortexError::invalid_argument(
                "postsynaptic",
                format!(
                    "Postsynaptic node {} must differ from the presynaptic node",
                    postsynaptic.id()
                ),
            ));
        }
        if id == presynaptic.id() || id == postsynaptic.id() || id == author.id() {
            return Err(CortexError::invalid_argument(
                "id",
                format!("Edge id {} collides with an involved node", id),
            ));
        }

        ensure_layer_of(presynaptic, presynaptic_layer)?;
        authorize(
            presynaptic.creator_id(),
            presynaptic.tag(),
            presynaptic_layer,
            author,
            oracle,
        )?;

        let mut edge = Edge::default();
        edge.apply_change(EdgeEvent::EdgeCreated(EdgeCreated {
            event_version: EdgeCreated::CURRENT_VERSION,
            aggregate_id: id,
            presynaptic_id: presynaptic.id(),
            postsynaptic_id: postsynaptic.id(),
            effect,
            strength,
            author_id: author.id(),
        }));
        Ok(edge)
    }

    pub fn presynaptic_id(&self) -> Uuid {
        self.presynaptic_id
    }

    pub fn postsynaptic_id(&self) -> Uuid {
        self.postsynaptic_id
    }

    pub fn effect(&self) -> Effect {
        self.effect
    }

    pub fn strength(&self) -> f32 {
        self.strength
    }

    pub fn creator_id(&self) -> Uuid {
        self.creator_id
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Deactivate the edge; permanent
    pub fn deactivate(
        &mut self,
        presynaptic: &Node,
        presynaptic_layer: &Layer,
        author: &Author,
        oracle: &dyn TagSharingOracle,
    ) -> CortexResult<()> {
        if !author.node().is_active() {
            return Err(CortexError::illegal_state(format!(
                "Author {} is deactivated",
                author.id()
            )));
        }
        if !self.active {
            return Err(CortexError::illegal_state("Edge is already deactivated"));
        }

        if presynaptic.id() != self.presynaptic_id {
            return Err(CortexError::invalid_argument(
                "presynaptic",
                format!(
                    "Node {} is not the presynaptic node {} of edge {}",
                    presynaptic.id(),
                    self.presynaptic_id,
                    self.id
                ),
            ));
        }

        ensure_layer_of(presynaptic, presynaptic_layer)?;
        authorize(
            presynaptic.creator_id(),
            presynaptic.tag(),
            presynaptic_layer,
            author,
            oracle,
        )?;

        self.apply_change(EdgeEvent::EdgeDeactivated(EdgeDeactivated {
            event_version: EdgeDeactivated::CURRENT_VERSION,
            aggregate_id: self.id,
            author_id: author.id(),
        }));
        Ok(())
    }
}

fn ensure_participant_active(role: &str, node: &Node) -> CortexResult<()> {
    if !node.is_active() {
        return Err(CortexError::invalid_argument(
            role,
            format!("Node {} is deactivated", node.id()),
        ));
    }
    Ok(())
}

fn ensure_layer_of(node: &Node, layer: &Layer) -> CortexResult<()> {
    if node.layer_id() != layer.id() {
        return Err(CortexError::invalid_argument(
            "presynaptic_layer",
            format!(
                "Layer {} is not the layer {} of node {}",
                layer.id(),
                node.layer_id(),
                node.id()
            ),
        ));
    }
    Ok(())
}

impl Aggregate for Edge {
    type Event = EdgeEvent;

    const KIND: AggregateKind = AggregateKind::Edge;

    fn id(&self) -> Uuid {
        self.id
    }

    fn apply(&mut self, event: &EdgeEvent) {
        match event {
            EdgeEvent::EdgeCreated(e) => {
                self.id = e.aggregate_id;
                self.presynaptic_id = e.presynaptic_id;
                self.postsynaptic_id = e.postsynaptic_id;
                self.effect = e.effect;
                self.strength = e.strength.value();
                self.creator_id = e.author_id;
                self.active = true;
            }

            EdgeEvent::EdgeDeactivated(_) => {
                self.active = false;
            }
        }
    }

    fn changes(&self) -> &Changes<EdgeEvent> {
        &self.changes
    }

    fn changes_mut(&mut self) -> &mut Changes<EdgeEvent> {
        &mut self.changes
    }
}
