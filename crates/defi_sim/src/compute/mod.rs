//! Simple-interest yield math.

mod yield_calc;

pub use yield_calc::{compute, daily_rate, round_to_cents, SimulationResult, DAYS_PER_YEAR};
