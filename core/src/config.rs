use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};

/// Depth bound used by `route` when the caller does not supply one.
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Upper bound accepted for `default_max_depth`.
pub const MAX_DEPTH_LIMIT: usize = 1_000_000;

/// Batches with at least this many pairs go to the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// Engine settings. Every field has a default, so a partial JSON/TOML
/// document deserializes cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub default_max_depth: usize,
    pub parallel_routing_threshold: usize,
    pub parallel_routing: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_max_depth: DEFAULT_MAX_DEPTH,
            parallel_routing_threshold: DEFAULT_PARALLEL_THRESHOLD,
            parallel_routing: true,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.default_max_depth > MAX_DEPTH_LIMIT {
            return Err(GraphError::InvalidConfig {
                field: "default_max_depth",
                reason: format!("must be at most {MAX_DEPTH_LIMIT}, got {}", self.default_max_depth),
            });
        }
        if self.parallel_routing_threshold == 0 {
            return Err(GraphError::InvalidConfig {
                field: "parallel_routing_threshold",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Defaults overlaid with `DYNGRAPH_*` environment variables.
    ///
    /// Unset or empty variables keep the default. Unparseable values are
    /// reported rather than ignored.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = read_var(&lookup, "DYNGRAPH_DEFAULT_MAX_DEPTH") {
            config.default_max_depth = parse_var("default_max_depth", &raw)?;
        }
        if let Some(raw) = read_var(&lookup, "DYNGRAPH_PARALLEL_THRESHOLD") {
            config.parallel_routing_threshold = parse_var("parallel_routing_threshold", &raw)?;
        }
        if let Some(raw) = read_var(&lookup, "DYNGRAPH_PARALLEL_ROUTING") {
            config.parallel_routing = match raw.to_ascii_lowercase().as_str() {
                "1" | "true" | "on" | "yes" => true,
                "0" | "false" | "off" | "no" => false,
                _ => {
                    return Err(GraphError::InvalidConfig {
                        field: "parallel_routing",
                        reason: format!("expected a boolean, got '{raw}'"),
                    })
                }
            };
        }

        config.validate()?;
        Ok(config)
    }
}

fn read_var<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn parse_var(field: &'static str, raw: &str) -> Result<usize> {
    raw.parse::<usize>().map_err(|e| GraphError::InvalidConfig {
        field,
        reason: format!("'{raw}': {e}"),
    })
}
