//! Environment behavior switches
//!
//! Everything tunable about the episode protocol lives here; the physical
//! dimensions of the lot stay in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::HARD_TIME_LIMIT;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvConfig {
    /// Terminate episodes that outlive the per-episode deadline
    pub enforce_deadline: bool,
    /// Sample the spawn pose inside the start region instead of using the
    /// fixed spawn point
    pub random_start: bool,
    /// Seed for spawn-pose sampling
    pub seed: u64,
    /// Absolute tick ceiling applied regardless of `enforce_deadline`
    pub hard_time_limit: u32,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            enforce_deadline: false,
            random_start: false,
            seed: 0,
            hard_time_limit: HARD_TIME_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_json_round_trip() {
        let config = EnvConfig {
            enforce_deadline: true,
            random_start: true,
            seed: 42,
            hard_time_limit: 500,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: EnvConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.enforce_deadline, config.enforce_deadline);
        assert_eq!(back.random_start, config.random_start);
        assert_eq!(back.seed, config.seed);
        assert_eq!(back.hard_time_limit, config.hard_time_limit);
    }

    #[test]
    fn test_default_matches_reference_protocol() {
        let config = EnvConfig::default();
        assert!(!config.enforce_deadline);
        assert!(!config.random_start);
        assert_eq!(config.hard_time_limit, 1000);
    }
}
