// Copyright (c) 2025 - Cowboy AI, Inc.
//! Event-Sourced Aggregates
//!
//! This module provides the aggregate pattern for event sourcing:
//! - State reconstruction by replaying events in order: [Event] → State
//! - Command methods validate, then stage new events
//! - Staged ("uncommitted") events are what a handler persists
//!
//! # Event Sourcing Pattern
//!
//! ```text
//! Command → Aggregate → Events → Event Log
//!    ↓          ↓          ↓
//! Intent   Validation    Facts
//! ```
//!
//! # Replay
//!
//! ```rust,ignore
//! let node = Node::from_history(events);
//! assert_eq!(node.version(), events.len() as u64);
//! ```
//!
//! # Design Principles
//!
//! ## 1. Closed Event Dispatch
//! - Each aggregate owns one event enum
//! - `apply` is an exhaustive `match`; there is no unhandled event type
//!
//! ## 2. Pure Event Application
//! - `apply(&mut self, &Event)` never fails and performs no I/O
//! - No validation in event application (already happened)
//! - Two replays of the same history produce equal aggregates
//!
//! ## 3. Command Methods
//! - All validation happens before an event is staged
//! - A failing command leaves the aggregate untouched
//! - External checks are injected as parameters, never ambient
//!
//! ## 4. Versioning
//! - Version = replayed events + staged events
//! - The committed version is the expected version used when persisting

pub mod commands;
pub mod edge;
pub mod node;

pub use commands::*;
pub use edge::Edge;
pub use node::Node;

use uuid::Uuid;

use crate::events::{AggregateKind, CortexEvent};

/// Version bookkeeping and staged events of an aggregate
#[derive(Debug, Clone, PartialEq)]
pub struct Changes<E> {
    base_version: u64,
    uncommitted: Vec<E>,
}

impl<E> Default for Changes<E> {
    fn default() -> Self {
        Self {
            base_version: 0,
            uncommitted: Vec::new(),
        }
    }
}

/// Behaviour shared by every event-sourced aggregate
pub trait Aggregate: Default + Sized {
    /// Closed set of events this aggregate understands
    type Event: Clone + Into<CortexEvent> + TryFrom<CortexEvent, Error = CortexEvent>;

    /// Stream kind used when narrowing envelopes and in error messages
    const KIND: AggregateKind;

    fn id(&self) -> Uuid;

    /// Apply one event to the in-memory state
    fn apply(&mut self, event: &Self::Event);

    fn changes(&self) -> &Changes<Self::Event>;

    fn changes_mut(&mut self) -> &mut Changes<Self::Event>;

    /// Rebuild an aggregate by applying `history` in order
    ///
    /// The number of replayed events becomes the committed version.
    fn from_history<I>(history: I) -> Self
    where
        I: IntoIterator<Item = Self::Event>,
    {
        let mut aggregate = Self::default();
        let mut replayed = 0;

        for event in history {
            aggregate.apply(&event);
            replayed += 1;
        }

        aggregate.changes_mut().base_version = replayed;
        aggregate
    }

    /// Current in-memory version (committed + staged)
    fn version(&self) -> u64 {
        let changes = self.changes();
        changes.base_version + changes.uncommitted.len() as u64
    }

    /// Version of the last persisted event
    fn committed_version(&self) -> u64 {
        self.changes().base_version
    }

    /// Staged events in emission order
    fn uncommitted_changes(&self) -> &[Self::Event] {
        &self.changes().uncommitted
    }

    /// Apply `event` and stage it for persistence
    fn apply_change(&mut self, event: Self::Event) {
        self.apply(&event);
        self.changes_mut().uncommitted.push(event);
    }

    /// Clear staged events after they were persisted
    fn mark_committed(&mut self) {
        let changes = self.changes_mut();
        changes.base_version += changes.uncommitted.len() as u64;
        changes.uncommitted.clear();
    }
}
