//! Projected staking earnings: linear interest at the pool's APY.

use crate::pool::StakingPool;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// No leap-year adjustment.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Outcome of one staking simulation; serialized as the HTTP response body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub pool_id: i64,
    pub pool_name: String,
    pub amount_staked: f64,
    pub duration_days: i64,
    /// Rounded to 2 decimal places.
    pub earnings: f64,
}

/// Daily rate from an APY given as a percentage.
pub fn daily_rate(apy_pct: f64) -> f64 {
    (apy_pct / 100.0) / DAYS_PER_YEAR
}

/// Round to 2 decimal places on the exact binary value, ties to even.
///
/// Values outside the `Decimal` range (and non-finite values) are returned
/// as-is; they carry no fractional cents anyway.
pub fn round_to_cents(value: f64) -> f64 {
    let Some(exact) = Decimal::from_f64_retain(value) else {
        return value;
    };
    let cents = exact.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    // Parse the decimal text so the result is the f64 nearest to it.
    cents.to_string().parse::<f64>().unwrap_or(value)
}

/// Compute earnings for `amount_staked` held `duration_days` in `pool`.
///
/// Never fails: negative or zero inputs compute through. Callers that need
/// semantic checks go through [`crate::Simulator`].
pub fn compute(pool: &StakingPool, amount_staked: f64, duration_days: i64) -> SimulationResult {
    let earnings = amount_staked * daily_rate(pool.apy) * duration_days as f64;
    SimulationResult {
        pool_id: pool.id,
        pool_name: pool.name.clone(),
        amount_staked,
        duration_days,
        earnings: round_to_cents(earnings),
    }
}
