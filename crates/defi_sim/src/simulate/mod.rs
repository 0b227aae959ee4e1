//! Staking simulation requests: pool resolution, optional range checks, compute.

use crate::compute::{compute, SimulationResult};
use crate::pool::PoolRegistry;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Inbound simulation parameters. Field presence and types are checked by
/// deserialization; range and existence checks happen in [`Simulator`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub pool_id: i64,
    pub amount_staked: f64,
    pub duration_days: i64,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("pool {pool_id} not found")]
    PoolNotFound { pool_id: i64 },
    #[error("amount_staked must be non-negative, got {0}")]
    NegativeAmount(f64),
    #[error("duration_days must be non-negative, got {0}")]
    NegativeDuration(i64),
    #[error("amount_staked must be a finite number")]
    NonFiniteAmount,
}

impl SimulationError {
    /// Stable snake_case identifier for API clients.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PoolNotFound { .. } => "pool_not_found",
            Self::NegativeAmount(_) => "negative_amount",
            Self::NegativeDuration(_) => "negative_duration",
            Self::NonFiniteAmount => "non_finite_amount",
        }
    }
}

/// Runs simulations against an injected, read-only pool registry.
///
/// By default amounts and durations compute through unchecked, negative
/// values included. Strict validation rejects them with a named error.
#[derive(Clone, Debug)]
pub struct Simulator {
    registry: Arc<PoolRegistry>,
    strict_validation: bool,
}

impl Simulator {
    pub fn new(registry: PoolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            strict_validation: false,
        }
    }

    /// Reject negative or non-finite amounts and negative durations.
    pub fn with_strict_validation(mut self, strict: bool) -> Self {
        self.strict_validation = strict;
        self
    }

    pub fn registry(&self) -> &PoolRegistry {
        &self.registry
    }

    pub fn strict_validation(&self) -> bool {
        self.strict_validation
    }

    /// Resolve the request's pool and compute projected earnings.
    pub fn handle_simulate_staking(
        &self,
        request: &SimulationRequest,
    ) -> Result<SimulationResult, SimulationError> {
        let outcome = self.simulate(request);
        match &outcome {
            Ok(result) => debug!(
                pool_id = result.pool_id,
                amount_staked = result.amount_staked,
                duration_days = result.duration_days,
                earnings = result.earnings,
                "staking simulated"
            ),
            Err(e) => debug!(pool_id = request.pool_id, kind = e.kind(), error = %e, "simulation rejected"),
        }
        outcome
    }

    fn simulate(&self, request: &SimulationRequest) -> Result<SimulationResult, SimulationError> {
        if self.strict_validation {
            check_ranges(request)?;
        }
        let pool = self
            .registry
            .resolve(request.pool_id)
            .ok_or(SimulationError::PoolNotFound {
                pool_id: request.pool_id,
            })?;
        Ok(compute(pool, request.amount_staked, request.duration_days))
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(PoolRegistry::default())
    }
}

fn check_ranges(request: &SimulationRequest) -> Result<(), SimulationError> {
    if !request.amount_staked.is_finite() {
        return Err(SimulationError::NonFiniteAmount);
    }
    if request.amount_staked < 0.0 {
        return Err(SimulationError::NegativeAmount(request.amount_staked));
    }
    if request.duration_days < 0 {
        return Err(SimulationError::NegativeDuration(request.duration_days));
    }
    Ok(())
}
