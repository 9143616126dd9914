//! Engine configuration
//!
//! Tunables consumed by the core services. Loading from environment or file
//! lives in `rollcall-infra`; this crate only defines the shape and defaults.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BATCH_CONCURRENCY, DEFAULT_TOKEN_PAD_WIDTH};

/// Attendance engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Zero-pad width for purely numeric biometric tokens
    #[serde(default = "default_token_pad_width")]
    pub token_pad_width: usize,

    /// Upper bound on concurrent employee-day evaluations in a batch run
    #[serde(default = "default_batch_concurrency")]
    pub batch_concurrency: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            token_pad_width: DEFAULT_TOKEN_PAD_WIDTH,
            batch_concurrency: DEFAULT_BATCH_CONCURRENCY,
        }
    }
}

fn default_token_pad_width() -> usize {
    DEFAULT_TOKEN_PAD_WIDTH
}

fn default_batch_concurrency() -> usize {
    DEFAULT_BATCH_CONCURRENCY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.token_pad_width, 6);
        assert_eq!(config.batch_concurrency, 8);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: EngineConfig = serde_json::from_str("{}").expect("empty config parses");
        assert_eq!(config, EngineConfig::default());
    }
}
