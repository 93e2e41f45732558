// Copyright (c) 2025 - Cowboy AI, Inc.
//! Cortex Domain Events
//!
//! Events are immutable facts representing state changes that have occurred.
//!
//! # Event Sourcing Principles
//!
//! 1. **Events are immutable**: Once created, events never change
//! 2. **Events are past tense**: Named for what happened (Created, not Create)
//! 3. **Events are versioned**: `event_version` field for schema evolution
//! 4. **Events are closed**: each aggregate owns one enum and matches it exhaustively
//!
//! # Event Flow
//!
//! ```text
//! Command → Aggregate → Event → EventLog
//!   (what to do)  (validate)  (what happened)  (persist)
//! ```
//!
//! Sequence numbers, timestamps and correlation ids are assigned by the event
//! log on the [`StoredEvent`](crate::event_store::StoredEvent) envelope.
//!
//! # Module Organization
//!
//! - [`cortex`] - Top-level polymorphic event envelope
//! - [`node`] - Node aggregate events
//! - [`edge`] - Edge aggregate events

pub mod cortex;
pub mod edge;
pub mod node;

pub use cortex::{AggregateKind, CortexEvent};
pub use edge::{EdgeCreated, EdgeDeactivated, EdgeEvent};
pub use node::{
    EdgesAdded, EdgesRemoved, NodeCreated, NodeDataChanged, NodeDeactivated, NodeEvent,
    NodeTagChanged,
};
