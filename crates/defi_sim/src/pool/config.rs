//! Pool file configuration.
//!
//! Without a pool file the engine serves the single built-in ETH pool, and
//! every requested id resolves to it. A pool file replaces that set entirely;
//! unknown ids are then rejected unless the file names a `fallback_pool_id`.
//!
//! Load from: env `DEFI_SIM_POOLS_PATH`, or `./config/pools.json`, or `./pools.json`.

use crate::pool::model::{PoolError, StakingPool};
use crate::pool::registry::PoolRegistry;
use crate::simulate::Simulator;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Env var naming an explicit pool file.
pub const POOLS_PATH_ENV: &str = "DEFI_SIM_POOLS_PATH";

const DEFAULT_CANDIDATES: [&str; 2] = ["./config/pools.json", "./pools.json"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("pool file lists no pools")]
    NoPools,
    #[error("pool: {0}")]
    Pool(#[from] PoolError),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoolsConfig {
    pub pools: Vec<StakingPool>,
    /// Pool that ids missing from `pools` resolve to. Unset means unknown ids are rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_pool_id: Option<i64>,
    /// Reject negative amounts and durations instead of computing them through.
    #[serde(default)]
    pub strict_validation: bool,
}

impl Default for PoolsConfig {
    fn default() -> Self {
        let eth = StakingPool::eth_default();
        let fallback_pool_id = Some(eth.id);
        Self {
            pools: vec![eth],
            fallback_pool_id,
            strict_validation: false,
        }
    }
}

impl PoolsConfig {
    /// Read and parse a pool file.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), pools = config.pools.len(), "loaded pool file");
        Ok(config)
    }

    /// Load config: env DEFI_SIM_POOLS_PATH, then ./config/pools.json, then ./pools.json.
    /// Falls back to the built-in ETH pool when no file is found.
    pub fn load() -> Result<Self, ConfigError> {
        let env_path = std::env::var_os(POOLS_PATH_ENV).map(PathBuf::from);
        let candidates = DEFAULT_CANDIDATES.map(Path::new);
        Self::load_first(env_path.as_deref(), &candidates)
    }

    /// Load the env-named file if it exists, else the first existing candidate, else the default.
    fn load_first(env_path: Option<&Path>, candidates: &[&Path]) -> Result<Self, ConfigError> {
        if let Some(p) = env_path {
            if p.exists() {
                return Self::load_from_path(p);
            }
            warn!(path = %p.display(), "{POOLS_PATH_ENV} points at a missing file, ignoring");
        }
        for candidate in candidates {
            if candidate.exists() {
                return Self::load_from_path(candidate);
            }
        }
        Ok(Self::default())
    }

    /// Validate pools and build the registry.
    pub fn into_registry(self) -> Result<PoolRegistry, ConfigError> {
        if self.pools.is_empty() {
            return Err(ConfigError::NoPools);
        }
        Ok(PoolRegistry::new(self.pools, self.fallback_pool_id)?)
    }

    /// Build the registry and a simulator honouring `strict_validation`.
    pub fn into_simulator(self) -> Result<Simulator, ConfigError> {
        let strict = self.strict_validation;
        Ok(Simulator::new(self.into_registry()?).with_strict_validation(strict))
    }
}
