// Copyright (c) 2025 - Cowboy AI, Inc.
//! Event-Log-Backed Link Validation
//!
//! A target is valid when its stream, in the same avatar scope, replays to an
//! active node. Read failures count as invalid.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::aggregate::Node;
use crate::domain::{AvatarId, LinkValidator, LinkValidatorSource};
use crate::service::Repository;

/// Link validator scoped to one avatar
#[derive(Clone)]
pub struct StoreLinkValidator {
    repository: Repository,
    avatar_id: AvatarId,
}

impl StoreLinkValidator {
    pub fn new(repository: Repository, avatar_id: AvatarId) -> Self {
        Self {
            repository,
            avatar_id,
        }
    }
}

#[async_trait]
impl LinkValidator for StoreLinkValidator {
    async fn is_valid_target(&self, node_id: Uuid) -> bool {
        match self.repository.load::<Node>(&self.avatar_id, node_id).await {
            Ok(Some(node)) => node.is_active(),
            Ok(None) => false,
            Err(e) => {
                debug!(node_id = %node_id, error = %e, "Link target unreadable");
                false
            }
        }
    }
}

/// Hands out a [`StoreLinkValidator`] per command scope
#[derive(Clone)]
pub struct StoreLinkValidatorSource {
    repository: Repository,
}

impl StoreLinkValidatorSource {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }
}

impl LinkValidatorSource for StoreLinkValidatorSource {
    fn validator_for(&self, avatar_id: &AvatarId) -> Arc<dyn LinkValidator> {
        Arc::new(StoreLinkValidator::new(
            self.repository.clone(),
            avatar_id.clone(),
        ))
    }
}
