// Copyright (c) 2025 - Cowboy AI, Inc.
//! AvatarId Value Object
//!
//! An avatar scopes aggregate id spaces: the same UUID in two avatars names
//! two unrelated streams. The core never interprets it beyond that.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{CortexError, CortexResult};

/// Tenant/avatar scope identifier
///
/// # Invariants
/// - Non-empty
/// - At most [`AvatarId::MAX_LENGTH`] characters
/// - ASCII alphanumerics, `-` and `_` only (safe as a subject token)
///
/// ```rust
/// use cortex_graph::domain::AvatarId;
///
/// assert!(AvatarId::new("samplebody").is_ok());
/// assert!(AvatarId::new("").is_err());
/// assert!(AvatarId::new("a.b").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AvatarId(String);

impl AvatarId {
    pub const MAX_LENGTH: usize = 128;

    pub fn new(avatar_id: impl Into<String>) -> CortexResult<Self> {
        let avatar_id = avatar_id.into();

        if avatar_id.is_empty() {
            return Err(CortexError::invalid_argument(
                "avatar_id",
                "Avatar id cannot be empty",
            ));
        }

        if avatar_id.len() > Self::MAX_LENGTH {
            return Err(CortexError::invalid_argument(
                "avatar_id",
                format!(
                    "Avatar id exceeds {} characters: {}",
                    Self::MAX_LENGTH,
                    avatar_id.len()
                ),
            ));
        }

        if let Some(c) = avatar_id
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(CortexError::invalid_argument(
                "avatar_id",
                format!("Invalid character in avatar id: {:?}", c),
            ));
        }

        Ok(Self(avatar_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AvatarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for AvatarId {
    type Error = CortexError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AvatarId> for String {
    fn from(value: AvatarId) -> Self {
        value.0
    }
}
