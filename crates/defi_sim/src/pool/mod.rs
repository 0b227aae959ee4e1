//! Staking pools: model, registry, and pool file configuration.

mod config;
mod model;
mod registry;

pub use config::{ConfigError, PoolsConfig, POOLS_PATH_ENV};
pub use model::{PoolError, StakingPool, Token};
pub use registry::PoolRegistry;
