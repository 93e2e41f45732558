// Copyright (c) 2025 - Cowboy AI, Inc.
//! Runtime Configuration
//!
//! Selects the event log backend and the log filter. Values come from
//! defaults, a deserialized document, or the environment:
//!
//! | Variable                | Meaning                          | Default                 |
//! |-------------------------|----------------------------------|-------------------------|
//! | `CORTEX_EVENT_LOG`      | `memory` or `nats`               | `memory`                |
//! | `NATS_URL`              | NATS server URL                  | `nats://localhost:4222` |
//! | `CORTEX_NATS_STREAM`    | JetStream stream name            | `CORTEX_EVENTS`         |
//! | `CORTEX_SUBJECT_PREFIX` | Subject prefix of every stream   | `cortex`                |
//! | `CORTEX_LOG`            | `tracing` env-filter directives  | `info`                  |

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::{CortexError, CortexResult};

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CortexConfig {
    pub event_log: EventLogConfig,
    pub log: LogConfig,
}

/// Event log backend
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum EventLogConfig {
    /// Process-local log, lost on exit
    #[default]
    Memory,

    /// NATS JetStream, requires the `nats` feature
    Nats(NatsEventLogConfig),
}

/// Connection and stream settings for the JetStream event log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NatsEventLogConfig {
    pub url: String,
    pub stream_name: String,
    /// Prefix of every stream subject: `<prefix>.<avatar>.<aggregate_id>`
    pub subject_prefix: String,
    /// Maximum age of stored events
    pub max_age: Duration,
}

impl Default for NatsEventLogConfig {
    fn default() -> Self {
        Self {
            url: "nats://localhost:4222".to_string(),
            stream_name: "CORTEX_EVENTS".to_string(),
            subject_prefix: "cortex".to_string(),
            max_age: Duration::from_secs(365 * 24 * 60 * 60),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directives
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl CortexConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> CortexResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> CortexResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let event_log = match lookup("CORTEX_EVENT_LOG").as_deref().map(str::trim) {
            None | Some("memory") => EventLogConfig::Memory,
            Some("nats") => {
                let defaults = NatsEventLogConfig::default();
                EventLogConfig::Nats(NatsEventLogConfig {
                    url: non_empty(&lookup, "NATS_URL")?.unwrap_or(defaults.url),
                    stream_name: non_empty(&lookup, "CORTEX_NATS_STREAM")?
                        .unwrap_or(defaults.stream_name),
                    subject_prefix: non_empty(&lookup, "CORTEX_SUBJECT_PREFIX")?
                        .unwrap_or(defaults.subject_prefix),
                    max_age: defaults.max_age,
                })
            }
            Some(other) => {
                return Err(CortexError::invalid_argument(
                    "CORTEX_EVENT_LOG",
                    format!("Unknown event log '{}', expected 'memory' or 'nats'", other),
                ))
            }
        };

        let log = match non_empty(&lookup, "CORTEX_LOG")? {
            Some(filter) => {
                parse_filter(&filter)?;
                LogConfig { filter }
            }
            None => LogConfig::default(),
        };

        Ok(Self { event_log, log })
    }
}

fn non_empty<F>(lookup: &F, name: &str) -> CortexResult<Option<String>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if value.trim().is_empty() => Err(CortexError::invalid_argument(
            name,
            "Value must not be empty when set",
        )),
        Some(value) => Ok(Some(value.trim().to_string())),
        None => Ok(None),
    }
}

fn parse_filter(filter: &str) -> CortexResult<tracing_subscriber::EnvFilter> {
    tracing_subscriber::EnvFilter::try_new(filter).map_err(|e| {
        CortexError::invalid_argument("CORTEX_LOG", format!("Invalid log filter: {}", e))
    })
}

/// Install the global `tracing` subscriber
///
/// A subscriber that is already installed is left in place.
pub fn init_tracing(config: &LogConfig) -> CortexResult<()> {
    let filter = parse_filter(&config.filter)?;
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    Ok(())
}
