// Copyright (c) 2025 - Cowboy AI, Inc.
//! Cortex Domain Models
//!
//! Value objects and capabilities shared by the node and edge aggregates.
//!
//! # Value Objects with Invariants
//!
//! - [`AvatarId`] - tenant scope partitioning aggregate id spaces
//! - [`Effect`] - signed terminal effect (Excite / Inhibit)
//! - [`Strength`] - terminal weight in (0, 1]
//! - [`AxonEntry`] - outgoing connection snapshot held in a node's axon
//!
//! # Ephemeral Snapshots
//!
//! - [`Layer`] - layer a resource belongs to (nil id = root layer)
//! - [`Author`] - acting node plus the layer it acts in

pub mod author;
pub mod avatar;
pub mod capabilities;
pub mod synapse;

pub use author::{ensure_not_nil, parse_id, Author, Layer};
pub use avatar::AvatarId;
pub use capabilities::{
    LinkValidator, LinkValidatorSource, NoSharedTags, SharedTags, TagSharingOracle,
};
pub use synapse::{AxonEntry, Effect, Strength};
