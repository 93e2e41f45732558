// Copyright (c) 2025 - Cowboy AI, Inc.
//! Injected Capabilities
//!
//! Aggregates never reach for ambient services. Anything they consult beyond
//! their own history is passed in explicitly:
//!
//! - [`LinkValidator`] - asynchronous target check used while adding edges
//! - [`TagSharingOracle`] - synchronous tag-sharing predicate used by the
//!   authorization rule

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::AvatarId;

/// Decides whether a node id is a valid link target
///
/// Side-effect free from the aggregate's point of view.
#[async_trait]
pub trait LinkValidator: Send + Sync {
    async fn is_valid_target(&self, node_id: Uuid) -> bool;
}

/// Hands out a [`LinkValidator`] for the avatar scope of a command
pub trait LinkValidatorSource: Send + Sync {
    fn validator_for(&self, avatar_id: &AvatarId) -> Arc<dyn LinkValidator>;
}

/// Decides whether `tag` is shared within layer `layer_id`
pub trait TagSharingOracle: Send + Sync {
    fn is_tag_shared(&self, layer_id: Uuid, tag: &str) -> bool;
}

/// Oracle under which no tag is shared: only creators may act
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSharedTags;

impl TagSharingOracle for NoSharedTags {
    fn is_tag_shared(&self, _layer_id: Uuid, _tag: &str) -> bool {
        false
    }
}

/// Oracle backed by an explicit set of `(layer, tag)` pairs
#[derive(Debug, Clone, Default)]
pub struct SharedTags {
    shared: HashSet<(Uuid, String)>,
}

impl SharedTags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `tag` as shared within `layer_id`
    pub fn share(mut self, layer_id: Uuid, tag: impl Into<String>) -> Self {
        self.shared.insert((layer_id, tag.into()));
        self
    }
}

impl TagSharingOracle for SharedTags {
    fn is_tag_shared(&self, layer_id: Uuid, tag: &str) -> bool {
        self.shared.contains(&(layer_id, tag.to_string()))
    }
}
