//! Environment-driven configuration for the runner.
//!
//! `SKYFORCE_TABLES` names a JSON data table file (built-in tables when
//! unset), `SKYFORCE_SEED` seeds the run, `SKYFORCE_TICKS` caps its length.

use std::sync::Arc;

use tracing::{info, warn};

use skyforce_core::{DataTables, TableError};
use skyforce_sim::engine::SimConfig;

pub const TABLES_VAR: &str = "SKYFORCE_TABLES";
pub const SEED_VAR: &str = "SKYFORCE_SEED";
pub const TICKS_VAR: &str = "SKYFORCE_TICKS";

/// Two minutes of simulated time at the fixed tick rate.
pub const DEFAULT_MAX_TICKS: u64 = 7200;

/// Build the engine configuration from the process environment.
pub fn sim_config_from_env() -> Result<SimConfig, TableError> {
    let tables = match std::env::var(TABLES_VAR) {
        Ok(path) => {
            let tables = DataTables::load(&path)?;
            info!(%path, "data tables loaded");
            tables
        }
        Err(_) => DataTables::default(),
    };

    let defaults = SimConfig::default();
    Ok(SimConfig {
        seed: parse_u64(SEED_VAR, std::env::var(SEED_VAR).ok(), defaults.seed),
        tables: Arc::new(tables),
        ..defaults
    })
}

pub fn max_ticks_from_env() -> u64 {
    parse_u64(TICKS_VAR, std::env::var(TICKS_VAR).ok(), DEFAULT_MAX_TICKS)
}

/// Parse an optional variable, falling back to `default` when it is unset or malformed.
pub fn parse_u64(name: &str, value: Option<String>, default: u64) -> u64 {
    match value {
        None => default,
        Some(raw) => match raw.trim().parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(
                    variable = name,
                    value = %raw,
                    error = %e,
                    default,
                    "ignoring malformed value"
                );
                default
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_u64_fallbacks() {
        assert_eq!(parse_u64(SEED_VAR, None, 42), 42);
        assert_eq!(parse_u64(SEED_VAR, Some("7".into()), 42), 7);
        assert_eq!(parse_u64(SEED_VAR, Some(" 9 ".into()), 42), 9);
        assert_eq!(parse_u64(SEED_VAR, Some("seven".into()), 42), 42);
        assert_eq!(parse_u64(TICKS_VAR, Some("-1".into()), 100), 100);
    }
}
