// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Node Replay
//!
//! Arbitrary operation sequences are run against a node. Failing operations
//! are part of the sequence on purpose: they must leave no trace.

use async_trait::async_trait;
use proptest::prelude::*;
use std::collections::HashSet;
use uuid::Uuid;

use cortex_graph::aggregate::{Aggregate, Node};
use cortex_graph::domain::{AxonEntry, LinkValidator};

// ============================================================================
// Test Doubles
// ============================================================================

/// Accepts even target ids only
struct EvenTargets;

#[async_trait]
impl LinkValidator for EvenTargets {
    async fn is_valid_target(&self, node_id: Uuid) -> bool {
        node_id.as_u128() % 2 == 0
    }
}

#[derive(Debug, Clone)]
enum Operation {
    ChangeData(String),
    ChangeTag(String),
    AddEdges(Vec<u8>),
    RemoveEdges(Vec<u8>),
    Deactivate,
}

// ============================================================================
// Property Test Strategies
// ============================================================================

fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        4 => "[a-c]{0,3}".prop_map(Operation::ChangeData),
        2 => "[a-c ]{0,3}".prop_map(Operation::ChangeTag),
        6 => prop::collection::vec(0u8..12, 0..4).prop_map(Operation::AddEdges),
        3 => prop::collection::vec(0u8..12, 0..3).prop_map(Operation::RemoveEdges),
        1 => Just(Operation::Deactivate),
    ]
}

fn operations() -> impl Strategy<Value = Vec<Operation>> {
    prop::collection::vec(operation(), 0..40)
}

fn entries(targets: &[u8]) -> Vec<AxonEntry> {
    targets
        .iter()
        .map(|t| AxonEntry::to(Uuid::from_u128(u128::from(*t) + 100)))
        .collect()
}

fn new_node() -> Node {
    let id = Uuid::from_u128(1);
    Node::create(id, "Tag", &id.to_string()).unwrap()
}

/// Run `op`, returning whether it succeeded
fn run(node: &mut Node, op: &Operation) -> bool {
    let author = Uuid::from_u128(1);
    match op {
        Operation::ChangeData(data) => node.change_data(data.clone()).is_ok(),
        Operation::ChangeTag(tag) => node.change_tag(tag.clone(), author).is_ok(),
        Operation::AddEdges(targets) => {
            tokio_test::block_on(node.add_edges(&EvenTargets, &entries(targets))).is_ok()
        }
        Operation::RemoveEdges(targets) => node.remove_edges(&entries(targets)).is_ok(),
        Operation::Deactivate => node.deactivate(author).is_ok(),
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: Replay is deterministic
    ///
    /// Replaying the same history twice yields identical aggregates, equal in
    /// state to the live aggregate that produced the history.
    #[test]
    fn prop_replay_is_deterministic(ops in operations()) {
        let mut node = new_node();
        for op in &ops {
            run(&mut node, op);
        }

        let history = node.uncommitted_changes().to_vec();
        let first = Node::from_history(history.clone());
        let second = Node::from_history(history);

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.tag(), node.tag());
        prop_assert_eq!(first.data(), node.data());
        prop_assert_eq!(first.axon(), node.axon());
        prop_assert_eq!(first.is_active(), node.is_active());
        prop_assert_eq!(first.committed_version(), node.version());
    }

    /// Property: The axon never holds duplicate targets
    #[test]
    fn prop_axon_has_no_duplicates(ops in operations()) {
        let mut node = new_node();
        for op in &ops {
            run(&mut node, op);

            let unique: HashSet<Uuid> = node.axon().iter().map(|e| e.target_id).collect();
            prop_assert_eq!(unique.len(), node.axon().len());
        }
    }

    /// Property: Failed operations leave no trace
    ///
    /// A rejected operation stages nothing; a successful one stages at most
    /// one event.
    #[test]
    fn prop_failed_operations_stage_nothing(ops in operations()) {
        let mut node = new_node();
        for op in &ops {
            let before = node.clone();
            let staged = node.uncommitted_changes().len();

            if run(&mut node, op) {
                prop_assert!(node.uncommitted_changes().len() <= staged + 1);
            } else {
                prop_assert_eq!(&node, &before);
            }
        }
    }

    /// Property: Inactive is terminal
    #[test]
    fn prop_inactive_is_terminal(ops in operations()) {
        let mut node = new_node();
        node.deactivate(Uuid::from_u128(1)).unwrap();
        let version = node.version();

        for op in &ops {
            prop_assert!(!run(&mut node, op));
        }
        prop_assert_eq!(node.version(), version);
    }
}
