//! Time-based schedules: reflection decay and vesting release.
//!
//! ```text
//! DECAY (elapsed since last claim → rate, later divided by 100)
//!   ≥ 365 d → 20 | ≥ 180 d → 16 | ≥ 90 d → 12
//!   ≥  30 d →  8 | ≥   7 d →  4 | ≥  1 d →  2 | else 0
//!
//! VESTING (elapsed since cliff, 24 months in four 6-month steps)
//!   < 6 m → 0% | 6 m → 25% | 12 m → 50% | 18 m → 75% | ≥ 24 m → 100%
//! ```

use primitive_types::U256;

use crate::constants::{DECAY_SCHEDULE, RATE_DENOMINATOR, VESTING_INTERVAL, VESTING_INTERVALS};

/// Maps time since the last claim to a decay rate.
pub fn decay_rate(elapsed: u64) -> u128 {
    DECAY_SCHEDULE
        .iter()
        .find(|(threshold, _)| elapsed >= *threshold)
        .map(|(_, rate)| *rate)
        .unwrap_or(0)
}

/// `rate * balance * pool / (total_supply * 100)`, floored.
///
/// Never exceeds `pool` while `balance <= total_supply`.
pub fn reflection_share(rate: u128, balance: u128, pool: u128, total_supply: u128) -> u128 {
    if rate == 0 || balance == 0 || pool == 0 || total_supply == 0 {
        return 0;
    }
    let numerator = U256::from(rate)
        .saturating_mul(U256::from(balance))
        .saturating_mul(U256::from(pool));
    let denominator = U256::from(total_supply).saturating_mul(U256::from(RATE_DENOMINATOR));
    (numerator / denominator).min(U256::from(pool)).low_u128()
}

/// Amount of `allocation` unlocked at `now` for a schedule starting at `cliff`.
pub fn vested_amount(allocation: u128, cliff: u64, now: u64) -> u128 {
    let steps = (now.saturating_sub(cliff) / VESTING_INTERVAL).min(VESTING_INTERVALS);
    if steps == VESTING_INTERVALS {
        return allocation;
    }
    let steps = u128::from(steps);
    let intervals = u128::from(VESTING_INTERVALS);
    // Split to stay exact without widening.
    (allocation / intervals) * steps + (allocation % intervals) * steps / intervals
}
