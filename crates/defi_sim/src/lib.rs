//! defi_sim — staking yield simulation engine.
//!
//! Projects simple (non-compounding) earnings for a hypothetical stake in a
//! configured pool. Stateless; no persistence; no chain interaction.

pub mod compute;
pub mod pool;
pub mod simulate;

pub use compute::{compute, round_to_cents, SimulationResult};
pub use pool::{ConfigError, PoolError, PoolRegistry, PoolsConfig, StakingPool, Token};
pub use simulate::{SimulationError, SimulationRequest, Simulator};
