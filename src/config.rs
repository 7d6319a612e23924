//! Runtime configuration read from the environment.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::EngineConfig;
use crate::types::{PROGRESS_FULL, TICK_MS};

/// Settings for the interactive binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub seed: u32,
    /// Frame interval in milliseconds.
    pub tick_ms: u32,
    /// Motion progress removed per tick, in thousandths.
    pub anim_step: u16,
    /// Log file; logging stays off when unset.
    pub log_path: Option<String>,
}

impl AppConfig {
    /// Load from environment variables:
    /// - `TUI_2048_SEED` (default: derived from the wall clock)
    /// - `TUI_2048_TICK_MS` (default: 16)
    /// - `TUI_2048_ANIM_STEP` (default: 100, range 1..=1000)
    /// - `TUI_2048_LOG` (default: unset)
    ///
    /// Missing or invalid values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = lookup("TUI_2048_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let tick_ms = lookup("TUI_2048_TICK_MS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&ms: &u32| ms > 0)
            .unwrap_or(TICK_MS);

        let anim_step = lookup("TUI_2048_ANIM_STEP")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&step: &u16| (1..=PROGRESS_FULL).contains(&step))
            .unwrap_or(EngineConfig::default().anim_step);

        let log_path = lookup("TUI_2048_LOG")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Self {
            seed,
            tick_ms,
            anim_step,
            log_path,
        }
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            anim_step: self.anim_step,
        }
    }
}

/// Seed from the current time; never zero.
pub fn clock_seed() -> u32 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let mixed = (now.as_secs() as u32) ^ now.subsec_nanos().rotate_left(16);
    mixed.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let cfg = AppConfig::from_lookup(lookup(&[]));
        assert_ne!(cfg.seed, 0);
        assert_eq!(cfg.tick_ms, TICK_MS);
        assert_eq!(cfg.anim_step, 100);
        assert_eq!(cfg.log_path, None);
    }

    #[test]
    fn test_reads_all_variables() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("TUI_2048_SEED", "42"),
            ("TUI_2048_TICK_MS", " 33 "),
            ("TUI_2048_ANIM_STEP", "250"),
            ("TUI_2048_LOG", "/tmp/2048.log"),
        ]));
        assert_eq!(
            cfg,
            AppConfig {
                seed: 42,
                tick_ms: 33,
                anim_step: 250,
                log_path: Some("/tmp/2048.log".to_string()),
            }
        );
        assert_eq!(cfg.engine_config().anim_step, 250);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("TUI_2048_SEED", "not-a-number"),
            ("TUI_2048_TICK_MS", "0"),
            ("TUI_2048_ANIM_STEP", "5000"),
            ("TUI_2048_LOG", "   "),
        ]));
        assert_ne!(cfg.seed, 0);
        assert_eq!(cfg.tick_ms, TICK_MS);
        assert_eq!(cfg.anim_step, 100);
        assert_eq!(cfg.log_path, None);
    }

    #[test]
    fn test_zero_anim_step_is_rejected() {
        let cfg = AppConfig::from_lookup(lookup(&[("TUI_2048_ANIM_STEP", "0")]));
        assert_eq!(cfg.anim_step, 100);
    }

    #[test]
    fn test_from_env_does_not_panic() {
        let _cfg = AppConfig::from_env();
    }
}
