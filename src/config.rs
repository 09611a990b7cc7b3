use primitive_types::U256;

use crate::constants::{
    BPS_DENOMINATOR, DEVELOPER_SHARE_BPS, REFLECTION_SHARE_BPS, TAX_RATE_BPS,
};

/// Tax parameters, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct TaxConfig {
    tax_rate_bps: u128,
    developer_share_bps: u128,
    reflection_share_bps: u128,
}

/// How one taxed transfer is divided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxSplit {
    /// Credited to the recipient.
    pub net: u128,
    pub developer: u128,
    pub reflection: u128,
}

impl TaxConfig {
    /// Returns `None` unless the rate is at most 100% and the two shares
    /// add up to exactly 100% of the tax.
    pub fn new(
        tax_rate_bps: u128,
        developer_share_bps: u128,
        reflection_share_bps: u128,
    ) -> Option<Self> {
        if tax_rate_bps > BPS_DENOMINATOR {
            return None;
        }
        if developer_share_bps.checked_add(reflection_share_bps)? != BPS_DENOMINATOR {
            return None;
        }
        Some(Self {
            tax_rate_bps,
            developer_share_bps,
            reflection_share_bps,
        })
    }

    pub fn tax_rate_bps(&self) -> u128 {
        self.tax_rate_bps
    }

    pub fn developer_share_bps(&self) -> u128 {
        self.developer_share_bps
    }

    pub fn reflection_share_bps(&self) -> u128 {
        self.reflection_share_bps
    }

    /// Splits `amount` into the recipient's net and the two tax cuts.
    ///
    /// Rounding dust (`tax - developer - reflection`) is not part of any
    /// leg and stays with the sender.
    pub fn split(&self, amount: u128) -> TaxSplit {
        let tax = bps_of(amount, self.tax_rate_bps);
        TaxSplit {
            net: amount - tax,
            developer: bps_of(tax, self.developer_share_bps),
            reflection: bps_of(tax, self.reflection_share_bps),
        }
    }
}

/// `amount * bps / 10_000` without a `u128` intermediate. Never exceeds
/// `amount` for `bps <= 10_000`.
fn bps_of(amount: u128, bps: u128) -> u128 {
    let scaled = U256::from(amount) * U256::from(bps) / U256::from(BPS_DENOMINATOR);
    scaled.min(U256::from(amount)).low_u128()
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self {
            tax_rate_bps: TAX_RATE_BPS,
            developer_share_bps: DEVELOPER_SHARE_BPS,
            reflection_share_bps: REFLECTION_SHARE_BPS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_shares_cover_whole_tax() {
        let cfg = TaxConfig::default();
        assert_eq!(cfg.developer_share_bps() + cfg.reflection_share_bps(), BPS_DENOMINATOR);
        assert_eq!(
            TaxConfig::new(TAX_RATE_BPS, DEVELOPER_SHARE_BPS, REFLECTION_SHARE_BPS),
            Some(cfg)
        );
    }

    #[test]
    fn shares_must_sum_to_denominator() {
        assert_eq!(TaxConfig::new(150, 5_000, 4_999), None);
        assert_eq!(TaxConfig::new(150, 6_000, 5_000), None);
        assert_eq!(TaxConfig::new(150, u128::MAX, 1), None);
        assert!(TaxConfig::new(150, 10_000, 0).is_some());
    }

    #[test]
    fn rate_above_hundred_percent_rejected() {
        assert_eq!(TaxConfig::new(10_001, 5_000, 5_000), None);
        assert!(TaxConfig::new(10_000, 5_000, 5_000).is_some());
    }

    #[test]
    fn split_without_dust() {
        // 10 000 × 150 / 10 000 = 150 tax, halved 75 / 75.
        let s = TaxConfig::default().split(10_000);
        assert_eq!(s, TaxSplit { net: 9_850, developer: 75, reflection: 75 });
        assert_eq!(s.net + s.developer + s.reflection, 10_000);
    }

    #[test]
    fn split_dust_stays_off_the_legs() {
        // 200 × 150 / 10 000 = 3 tax; 3 × 5 000 / 10 000 = 1 each, 1 left over.
        let s = TaxConfig::default().split(200);
        assert_eq!(s, TaxSplit { net: 197, developer: 1, reflection: 1 });
        assert_eq!(200 - (s.net + s.developer + s.reflection), 1);
    }

    #[test]
    fn split_small_amount_is_untaxed() {
        let s = TaxConfig::default().split(66);
        assert_eq!(s, TaxSplit { net: 66, developer: 0, reflection: 0 });
    }

    #[test]
    fn split_full_rate_at_u128_max() {
        let cfg = TaxConfig::new(10_000, 5_000, 5_000).unwrap();
        let s = cfg.split(u128::MAX);
        assert_eq!(s.net, 0);
        assert_eq!(s.developer, u128::MAX / 2);
        assert_eq!(s.reflection, u128::MAX / 2);
    }

    #[test]
    fn split_large_amount_matches_small_ratio() {
        let amount = crate::constants::MAX_TOTAL_SUPPLY / 4;
        let s = TaxConfig::default().split(amount);
        let tax = amount - s.net;
        assert_eq!(tax, amount / 10_000 * 150 + amount % 10_000 * 150 / 10_000);
        assert_eq!(s.developer, tax / 2);
        assert_eq!(s.reflection, tax / 2);
    }
}
