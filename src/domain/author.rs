// Copyright (c) 2025 - Cowboy AI, Inc.
//! Layer and Author snapshots
//!
//! Both are ephemeral: handlers build them from freshly replayed nodes for
//! each command and never persist them.

use uuid::Uuid;

use crate::aggregate::{Aggregate, Node};
use crate::errors::{CortexError, CortexResult};

/// Parse an identifier supplied as text
///
/// Fails with `InvalidArgument` naming `field` when the text is not a UUID or
/// is the nil UUID.
pub fn parse_id(field: &str, value: &str) -> CortexResult<Uuid> {
    let id = Uuid::parse_str(value.trim()).map_err(|e| {
        CortexError::invalid_argument(field, format!("'{}' is not a valid id: {}", value, e))
    })?;
    ensure_not_nil(field, id)?;
    Ok(id)
}

/// Reject the nil UUID
pub fn ensure_not_nil(field: &str, id: Uuid) -> CortexResult<()> {
    if id.is_nil() {
        return Err(CortexError::invalid_argument(field, "Id cannot be empty"));
    }
    Ok(())
}

/// Topological layer a node belongs to
///
/// The nil id is the root layer, which is not backed by a node. Every other
/// layer is a node acting as the layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    id: Uuid,
    tag: String,
}

impl Layer {
    pub const ROOT_ID: Uuid = Uuid::nil();

    pub fn root() -> Self {
        Self {
            id: Self::ROOT_ID,
            tag: "root".to_string(),
        }
    }

    /// Layer backed by `node`
    pub fn of(node: &Node) -> Self {
        Self {
            id: node.id(),
            tag: node.tag().to_string(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn is_root(&self) -> bool {
        self.id.is_nil()
    }
}

/// Acting identity: the author's node and the layer it acts in
#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    node: Node,
    layer: Layer,
}

impl Author {
    /// Build an author from a node and the layer the node belongs to
    ///
    /// Fails with `InvalidArgument` if `layer` is not the node's own layer.
    pub fn new(node: Node, layer: Layer) -> CortexResult<Self> {
        if node.layer_id() != layer.id() {
            return Err(CortexError::invalid_argument(
                "author",
                format!(
                    "Layer {} is not the layer {} of author {}",
                    layer.id(),
                    node.layer_id(),
                    node.id()
                ),
            ));
        }
        Ok(Self { node, layer })
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn layer(&self) -> &Layer {
        &self.layer
    }

    /// Node id of the author
    pub fn id(&self) -> Uuid {
        self.node.id()
    }
}
