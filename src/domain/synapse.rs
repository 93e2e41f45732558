// Copyright (c) 2025 - Cowboy AI, Inc.
//! Terminal Value Objects
//!
//! - [`Effect`] - signed neurotransmitter effect of a terminal
//! - [`Strength`] - terminal weight in the interval (0, 1]
//! - [`AxonEntry`] - value snapshot of an outgoing connection held in a node's axon

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::errors::{CortexError, CortexResult};

/// Signed effect a terminal has on its postsynaptic node
///
/// Serialized as its sign: `1`, `-1`, or `0` for `NotSet`, the unset
/// sentinel. `NotSet` deserializes fine but is rejected by every aggregate
/// operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Effect {
    #[default]
    NotSet,
    Excite,
    Inhibit,
}

impl Effect {
    /// Sign of the effect: `1` excite, `-1` inhibit, `0` unset
    pub fn sign(&self) -> i32 {
        match self {
            Effect::NotSet => 0,
            Effect::Excite => 1,
            Effect::Inhibit => -1,
        }
    }

    pub fn is_set(&self) -> bool {
        *self != Effect::NotSet
    }
}

impl TryFrom<i32> for Effect {
    type Error = CortexError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Effect::NotSet),
            1 => Ok(Effect::Excite),
            -1 => Ok(Effect::Inhibit),
            other => Err(CortexError::invalid_argument(
                "effect",
                format!("Unknown effect value: {}", other),
            )),
        }
    }
}

impl From<Effect> for i32 {
    fn from(value: Effect) -> Self {
        value.sign()
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::NotSet => write!(f, "not_set"),
            Effect::Excite => write!(f, "excite"),
            Effect::Inhibit => write!(f, "inhibit"),
        }
    }
}

/// Terminal strength
///
/// Valid range is the open-closed interval (0, 1]. NaN is rejected.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Strength(f32);

impl Strength {
    pub const MAX: f32 = 1.0;

    pub fn new(value: f32) -> CortexResult<Self> {
        // NaN fails both comparisons
        if value > 0.0 && value <= Self::MAX {
            Ok(Self(value))
        } else {
            Err(CortexError::invalid_argument(
                "strength",
                format!("Strength must be greater than 0 and at most 1, got {}", value),
            ))
        }
    }

    pub fn value(&self) -> f32 {
        self.0
    }
}

impl TryFrom<f32> for Strength {
    type Error = CortexError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Strength> for f32 {
    fn from(value: Strength) -> Self {
        value.0
    }
}

/// Outgoing connection recorded in a node's axon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AxonEntry {
    /// Node this connection points at
    pub target_id: Uuid,
}

impl AxonEntry {
    pub fn to(target_id: Uuid) -> Self {
        Self { target_id }
    }
}
