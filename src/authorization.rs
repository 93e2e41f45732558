// Copyright (c) 2025 - Cowboy AI, Inc.
//! Authorization Rule
//!
//! Decides whether an author may act on a resource:
//!
//! 1. The resource creator may always act.
//! 2. Anyone else must act from the claimed layer, and the resource tag must be
//!    shared within that layer.
//!
//! The rule is pure. The oracle is synchronous and side-effect free.

use uuid::Uuid;

use crate::domain::{Author, Layer, TagSharingOracle};
use crate::errors::{CortexError, CortexResult};

/// Check `author` against a resource created by `resource_creator_id`
pub fn authorize(
    resource_creator_id: Uuid,
    resource_tag: &str,
    claimed_layer: &Layer,
    author: &Author,
    oracle: &dyn TagSharingOracle,
) -> CortexResult<()> {
    if author.id() == resource_creator_id {
        return Ok(());
    }

    if author.layer().id() == claimed_layer.id()
        && oracle.is_tag_shared(claimed_layer.id(), resource_tag)
    {
        return Ok(());
    }

    Err(CortexError::unauthorized(format!(
        "Author {} may not act on '{}' resources created by {} in layer {}",
        author.id(),
        resource_tag,
        resource_creator_id,
        claimed_layer.id()
    )))
}
