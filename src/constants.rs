//! Design constants. Every percentage is in basis points over
//! [`BPS_DENOMINATOR`]; every duration is in milliseconds, the unit of the
//! ink! block timestamp.

pub const DECIMALS: u8 = 18;
pub const ONE_TOKEN: u128 = 1_000_000_000_000_000_000;
pub const TOTAL_SUPPLY: u128 = 1_000_000 * ONE_TOKEN;

/// Largest supply the reflection math accepts. Keeps
/// `rate * balance * pool` inside 256 bits.
pub const MAX_TOTAL_SUPPLY: u128 = u128::MAX >> 8;

pub const BPS_DENOMINATOR: u128 = 10_000;

// ── Tax ──────────────────────────────────────────────────────────────────────

/// 1.5% of every transfer between two non-excluded holders.
pub const TAX_RATE_BPS: u128 = 150;
/// Developer half of the tax.
pub const DEVELOPER_SHARE_BPS: u128 = 5_000;
/// Reflection-pool half of the tax.
pub const REFLECTION_SHARE_BPS: u128 = 5_000;

// ── Time ─────────────────────────────────────────────────────────────────────

pub const DAY: u64 = 86_400_000;
pub const MONTH: u64 = 30 * DAY;

// ── Reflection decay ─────────────────────────────────────────────────────────

/// `(minimum elapsed, rate)` pairs, longest first. The first entry whose
/// threshold is met wins; below one day the rate is zero.
pub const DECAY_SCHEDULE: [(u64, u128); 6] = [
    (365 * DAY, 20),
    (180 * DAY, 16),
    (90 * DAY, 12),
    (30 * DAY, 8),
    (7 * DAY, 4),
    (DAY, 2),
];

/// Divisor applied to the decay rate.
pub const RATE_DENOMINATOR: u128 = 100;

// ── Vesting ──────────────────────────────────────────────────────────────────

/// 10% of supply is carved out for vesting and held by the contract.
pub const VESTING_ALLOCATION_BPS: u128 = 1_000;
pub const VESTING_DURATION: u64 = 24 * MONTH;
pub const VESTING_INTERVALS: u64 = 4;
pub const VESTING_INTERVAL: u64 = VESTING_DURATION / VESTING_INTERVALS;

// ── Addresses ────────────────────────────────────────────────────────────────

pub const ZERO_ADDRESS: [u8; 32] = [0u8; 32];

/// Conventional burn address: 0x000…dEaD.
pub const DEAD_ADDRESS: [u8; 32] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xdE, 0xaD,
];
