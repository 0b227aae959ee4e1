//! Token and staking pool definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PoolError {
    #[error("token name must not be empty")]
    EmptyTokenName,
    #[error("pool {pool_id}: apy must be finite and non-negative, got {apy}")]
    InvalidApy { pool_id: i64, apy: f64 },
    #[error("duplicate pool id {0}")]
    DuplicatePoolId(i64),
    #[error("fallback pool {0} is not in the registry")]
    UnknownFallback(i64),
}

/// Asset being staked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub name: String,
}

impl Token {
    pub fn new(name: impl Into<String>) -> Result<Self, PoolError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PoolError::EmptyTokenName);
        }
        Ok(Self { name })
    }
}

/// A yield-bearing position type: one token, one APY.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StakingPool {
    pub id: i64,
    pub token: Token,
    pub name: String,
    /// Annual percentage yield as a percentage value (25.0 means 25%).
    pub apy: f64,
}

impl StakingPool {
    pub fn new(id: i64, token: Token, name: impl Into<String>, apy: f64) -> Self {
        Self {
            id,
            token,
            name: name.into(),
            apy,
        }
    }

    /// The built-in ETH pool served when no pool file is configured.
    pub fn eth_default() -> Self {
        Self::new(
            1,
            Token {
                name: "ETH".to_string(),
            },
            "ETH Staking Pool",
            25.0,
        )
    }

    /// Check the invariants a registry relies on.
    pub fn validate(&self) -> Result<(), PoolError> {
        if self.token.name.trim().is_empty() {
            return Err(PoolError::EmptyTokenName);
        }
        if !self.apy.is_finite() || self.apy < 0.0 {
            return Err(PoolError::InvalidApy {
                pool_id: self.id,
                apy: self.apy,
            });
        }
        Ok(())
    }
}
