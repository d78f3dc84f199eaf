use std::env;

use anyhow::{Context, Result};

use crate::corpus::collocation::CollocationParams;
use crate::corpus::vocabulary::VocabularyParams;

/// Central configuration loaded from environment variables.
///
/// Every knob has a default matching the reference pipeline, so an empty
/// environment is a fully valid configuration. The .env file is loaded
/// automatically at startup via dotenvy.
pub struct Config {
    /// Collocation detection parameters (OVERHEARD_MIN_COUNT, OVERHEARD_THRESHOLD)
    pub collocation: CollocationParams,
    /// Vocabulary filtering parameters (OVERHEARD_NO_BELOW, OVERHEARD_NO_ABOVE)
    pub vocabulary: VocabularyParams,
    /// Random seed shared by every training run (OVERHEARD_SEED)
    pub seed: u64,
}

impl Config {
    /// Load configuration from environment variables, falling back to the
    /// pipeline defaults for anything unset.
    pub fn load() -> Result<Self> {
        Ok(Self {
            collocation: CollocationParams {
                min_count: parse_env("OVERHEARD_MIN_COUNT", CollocationParams::default().min_count)?,
                threshold: parse_env("OVERHEARD_THRESHOLD", CollocationParams::default().threshold)?,
            },
            vocabulary: VocabularyParams {
                no_below: parse_env("OVERHEARD_NO_BELOW", VocabularyParams::default().no_below)?,
                no_above: parse_env("OVERHEARD_NO_ABOVE", VocabularyParams::default().no_above)?,
            },
            seed: parse_env("OVERHEARD_SEED", 42)?,
        })
    }
}

/// Parse an env var into `T`, or return `default` when unset.
/// A set-but-unparseable value is an error, not a silent fallback.
fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{name} has an invalid value: {raw:?}")),
        Err(_) => Ok(default),
    }
}
