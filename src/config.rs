use std::env;

use crate::auth::password::DEFAULT_HASH_COST;

/// Runtime configuration for the core, read from the environment by the
/// embedding application.
#[derive(Debug, Clone)]
pub struct Config {
    /// bcrypt cost factor for newly created password hashes. Verification is
    /// unaffected: any cost embedded in a stored hash remains verifiable.
    pub hash_cost: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            hash_cost: env::var("HASH_COST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_HASH_COST),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hash_cost: DEFAULT_HASH_COST,
        }
    }
}
