//! Process-level engine settings read from the environment.

use std::env;

use crate::error::AppError;

pub const DEFAULT_MAX_CONFLICT_RETRIES: u32 = 3;
pub const DEFAULT_BROADCAST_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    /// How many times an intent is re-run after a stale-version write.
    pub max_conflict_retries: u32,
    /// Fixed seed for reproducible deals; OS entropy when unset.
    pub deal_seed: Option<u64>,
    /// Buffer size of the update broadcast channel.
    pub broadcast_capacity: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_conflict_retries: DEFAULT_MAX_CONFLICT_RETRIES,
            deal_seed: None,
            broadcast_capacity: DEFAULT_BROADCAST_CAPACITY,
        }
    }
}

impl EngineSettings {
    /// Read `SCUM_MAX_CONFLICT_RETRIES`, `SCUM_DEAL_SEED` and
    /// `SCUM_BROADCAST_CAPACITY`. Unset variables fall back to defaults.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let max_conflict_retries = parse_var(&lookup, "SCUM_MAX_CONFLICT_RETRIES")?
            .unwrap_or(defaults.max_conflict_retries);
        let deal_seed = parse_var(&lookup, "SCUM_DEAL_SEED")?;
        let broadcast_capacity = parse_var(&lookup, "SCUM_BROADCAST_CAPACITY")?
            .unwrap_or(defaults.broadcast_capacity);

        if broadcast_capacity == 0 {
            return Err(AppError::config(
                "SCUM_BROADCAST_CAPACITY must be greater than zero",
            ));
        }

        Ok(Self {
            max_conflict_retries,
            deal_seed,
            broadcast_capacity,
        })
    }

    pub fn with_deal_seed(mut self, seed: u64) -> Self {
        self.deal_seed = Some(seed);
        self
    }

    pub fn with_max_conflict_retries(mut self, retries: u32) -> Self {
        self.max_conflict_retries = retries;
        self
    }
}

fn parse_var<T, F>(lookup: &F, name: &str) -> Result<Option<T>, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(name) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|err| AppError::config(format!("Invalid {name}={trimmed}: {err}")))
}
