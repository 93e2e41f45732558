// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! This module contains property-based tests using proptest to verify
//! replay and axon properties of the node aggregate.

mod node_replay;
mod strength;
