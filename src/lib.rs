// Copyright (c) 2025 - Cowboy AI, Inc.
//! Event-sourced graph of nodes ("neurons") and edges ("terminals")
//!
//! This crate provides the write side of a versioned, multi-tenant graph:
//! event-sourced aggregates, a layer-based authorization rule, optimistic
//! concurrency through compare-and-append event logs, and the command
//! handlers that tie them together.
//!
//! # Modules
//!
//! - [`domain`] - identifiers, value objects and injected capabilities
//! - [`events`] - closed event enums and the [`CortexEvent`] envelope
//! - [`aggregate`] - [`Node`] and [`Edge`] aggregates plus commands
//! - [`authorization`] - the creator-or-shared-tag rule
//! - [`event_store`] - [`EventLog`] with in-memory and JetStream backends
//! - [`service`] - command handlers and the repository
//! - [`config`] - runtime configuration and tracing bootstrap

pub mod aggregate;
pub mod authorization;
pub mod config;
pub mod domain;
pub mod errors;
pub mod event_store;
pub mod events;
pub mod service;

// Re-export commonly used types
pub use aggregate::{Aggregate, Edge, Node};
pub use config::{init_tracing, CortexConfig};
pub use errors::{CortexError, CortexResult, ErrorKind};
pub use event_store::{EventLog, EventMetadata, InMemoryEventLog, StoredEvent};
pub use events::CortexEvent;
pub use service::{EdgeCommandHandlers, Handle, NodeCommandHandlers, Repository};
