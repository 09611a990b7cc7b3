#![cfg_attr(not(feature = "std"), no_std, no_main)]

//! # Reflect Token
//!
//! Fixed-supply token ledger with three behaviours layered over plain
//! transfers:
//!
//! ```text
//! TAX (both parties outside the exclusion set):
//!   amount × 1.50%  = tax
//!   tax    × 50%    → developer address
//!   tax    × 50%    → contract balance, added to the reflection pool
//!   amount − tax    → recipient
//!
//! REFLECTION:
//!   claim = rate(elapsed) × balance × pool / (total_supply × 100)
//!
//! VESTING (10% of supply, held by the contract):
//!   released to the releaser in four equal steps over 24 months
//! ```
//!
//! Every transfer runs the same pipeline: settle both parties' reflections
//! at their pre-transfer balances, then route the value with or without tax.

pub mod config;
pub mod constants;
pub mod schedule;

pub use self::reflect_token::{Error, ReflectToken, ReflectTokenRef};

#[ink::contract]
mod reflect_token {
    use crate::config::{TaxConfig, TaxSplit};
    use crate::constants::*;
    use crate::schedule;
    use ink::storage::Mapping;

    // =========================================================================
    // STORAGE
    // =========================================================================

    #[ink(storage)]
    pub struct ReflectToken {
        // ── Ledger ────────────────────────────────────────────────────────
        balances: Mapping<AccountId, Balance>,
        allowances: Mapping<(AccountId, AccountId), Balance>,
        total_supply: Balance,

        // ── Roles ─────────────────────────────────────────────────────────
        owner: AccountId,
        developer: AccountId,
        releaser: AccountId,
        /// Exempt from tax. Membership is fixed at construction.
        excluded: Mapping<AccountId, bool>,

        // ── Tax & reflection ──────────────────────────────────────────────
        tax: TaxConfig,
        /// Tokens held by the contract on behalf of reflection claimants.
        reflection_pool: Balance,
        /// Time of the most recent taxed transfer. Baseline for holders that
        /// have never settled.
        last_pool_update: Timestamp,
        last_claim: Mapping<AccountId, Timestamp>,

        // ── Vesting ───────────────────────────────────────────────────────
        vesting_cliff: Timestamp,
        vesting_allocation: Balance,
        released: Balance,

        // ── Reentrancy flags ──────────────────────────────────────────────
        claim_entered: bool,
        release_entered: bool,
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    #[ink(event)]
    pub struct Transfer {
        #[ink(topic)]
        from: Option<AccountId>,
        #[ink(topic)]
        to: Option<AccountId>,
        value: Balance,
    }

    #[ink(event)]
    pub struct Approval {
        #[ink(topic)]
        owner: AccountId,
        #[ink(topic)]
        spender: AccountId,
        value: Balance,
    }

    /// Vested tokens paid out to the releaser.
    #[ink(event)]
    pub struct TokensReleased {
        #[ink(topic)]
        beneficiary: AccountId,
        amount: Balance,
    }

    #[ink(event)]
    pub struct DeveloperAddressUpdated {
        #[ink(topic)]
        new_address: AccountId,
        timestamp: Timestamp,
    }

    // =========================================================================
    // ERRORS
    // =========================================================================

    #[derive(Debug, PartialEq, Eq, scale::Encode, scale::Decode)]
    #[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
    pub enum Error {
        /// Sender's balance does not cover the transfer.
        InsufficientBalance,
        /// Spender's allowance does not cover the transfer.
        InsufficientAllowance,
        /// Caller is not the identity this call is restricted to.
        Unauthorized,
        /// Zero, burn, or contract address supplied where a wallet is required.
        InvalidAddress,
        /// Nothing has vested since the last release.
        NoTokensDue,
        /// A guarded message was entered while already executing.
        ReentrancyRejected,
        /// Tax shares do not add up to 100%, the rate exceeds 100%, or the
        /// supply is outside the supported range.
        InvalidTaxConfig,
        /// An arithmetic operation overflowed.
        Overflow,
    }

    #[derive(Clone, Copy)]
    enum Guard {
        Claim,
        Release,
    }

    // =========================================================================
    // IMPLEMENTATION
    // =========================================================================

    impl ReflectToken {
        // ---------------------------------------------------------------------
        // Constructors
        // ---------------------------------------------------------------------

        /// Deploy with the default supply and a 1.5% tax split evenly between
        /// the developer and the reflection pool.
        ///
        /// 90% of supply goes to the deployer; 10% stays in the contract as
        /// the vesting allocation, with the cliff at deployment time.
        #[ink(constructor)]
        pub fn new(developer: AccountId, releaser: AccountId) -> Self {
            Self::build(developer, releaser, TOTAL_SUPPLY, TaxConfig::default())
        }

        #[ink(constructor)]
        pub fn new_with_config(
            developer: AccountId,
            releaser: AccountId,
            total_supply: Balance,
            tax_rate_bps: u128,
            developer_share_bps: u128,
            reflection_share_bps: u128,
        ) -> Result<Self, Error> {
            if total_supply == 0 || total_supply > MAX_TOTAL_SUPPLY {
                return Err(Error::InvalidTaxConfig);
            }
            let tax = TaxConfig::new(tax_rate_bps, developer_share_bps, reflection_share_bps)
                .ok_or(Error::InvalidTaxConfig)?;
            Ok(Self::build(developer, releaser, total_supply, tax))
        }

        fn build(
            developer: AccountId,
            releaser: AccountId,
            total_supply: Balance,
            tax: TaxConfig,
        ) -> Self {
            let caller = Self::env().caller();
            let contract = Self::env().account_id();
            let now = Self::env().block_timestamp();

            let vesting_allocation = (total_supply / BPS_DENOMINATOR) * VESTING_ALLOCATION_BPS
                + (total_supply % BPS_DENOMINATOR) * VESTING_ALLOCATION_BPS / BPS_DENOMINATOR;
            let deployer_amount = total_supply - vesting_allocation;

            let mut balances = Mapping::default();
            balances.insert(caller, &deployer_amount);
            balances.insert(contract, &vesting_allocation);

            let mut excluded = Mapping::default();
            for account in [caller, developer, releaser, contract] {
                excluded.insert(account, &true);
            }

            Self::env().emit_event(Transfer {
                from: None,
                to: Some(caller),
                value: deployer_amount,
            });
            Self::env().emit_event(Transfer {
                from: None,
                to: Some(contract),
                value: vesting_allocation,
            });

            Self {
                balances,
                allowances: Mapping::default(),
                total_supply,
                owner: caller,
                developer,
                releaser,
                excluded,
                tax,
                reflection_pool: 0,
                last_pool_update: now,
                last_claim: Mapping::default(),
                vesting_cliff: now,
                vesting_allocation,
                released: 0,
                claim_entered: false,
                release_entered: false,
            }
        }

        // =====================================================================
        // TOKEN SURFACE
        // =====================================================================

        #[ink(message)]
        pub fn total_supply(&self) -> Balance {
            self.total_supply
        }

        #[ink(message)]
        pub fn decimals(&self) -> u8 {
            DECIMALS
        }

        #[ink(message)]
        pub fn balance_of(&self, owner: AccountId) -> Balance {
            self.balances.get(owner).unwrap_or(0)
        }

        #[ink(message)]
        pub fn allowance(&self, owner: AccountId, spender: AccountId) -> Balance {
            self.allowances.get((owner, spender)).unwrap_or(0)
        }

        #[ink(message)]
        pub fn approve(&mut self, spender: AccountId, value: Balance) -> Result<(), Error> {
            let owner = self.env().caller();
            self.allowances.insert((owner, spender), &value);
            self.env().emit_event(Approval { owner, spender, value });
            Ok(())
        }

        #[ink(message)]
        pub fn transfer(&mut self, to: AccountId, value: Balance) -> Result<(), Error> {
            let from = self.env().caller();
            self.update(from, to, value)
        }

        #[ink(message)]
        pub fn transfer_from(
            &mut self,
            from: AccountId,
            to: AccountId,
            value: Balance,
        ) -> Result<(), Error> {
            let caller = self.env().caller();
            let allowance = self.allowance(from, caller);
            if allowance < value {
                return Err(Error::InsufficientAllowance);
            }
            self.update(from, to, value)?;
            self.allowances.insert((from, caller), &(allowance - value));
            Ok(())
        }

        // =====================================================================
        // REFLECTIONS
        // =====================================================================

        /// Reflection amount `account` would receive if settled now.
        #[ink(message)]
        pub fn calculate_reflections(&self, account: AccountId) -> Balance {
            if account == self.env().account_id() {
                return 0;
            }
            let baseline = self
                .last_claim
                .get(account)
                .unwrap_or(self.last_pool_update);
            let elapsed = self.env().block_timestamp().saturating_sub(baseline);
            schedule::reflection_share(
                schedule::decay_rate(elapsed),
                self.balance_of(account),
                self.reflection_pool,
                self.total_supply,
            )
        }

        /// Settle `recipient`'s pending reflections. Anyone may call this for
        /// any account; the payout always goes to `recipient`.
        #[ink(message)]
        pub fn claim_reflections(&mut self, recipient: AccountId) -> Result<Balance, Error> {
            self.non_reentrant(Guard::Claim, |this| this.settle_reflections(recipient))
        }

        #[ink(message)]
        pub fn reflection_pool(&self) -> Balance {
            self.reflection_pool
        }

        #[ink(message)]
        pub fn last_pool_update(&self) -> Timestamp {
            self.last_pool_update
        }

        #[ink(message)]
        pub fn last_claim_of(&self, account: AccountId) -> Option<Timestamp> {
            self.last_claim.get(account)
        }

        // =====================================================================
        // VESTING
        // =====================================================================

        #[ink(message)]
        pub fn vested_amount(&self) -> Balance {
            schedule::vested_amount(
                self.vesting_allocation,
                self.vesting_cliff,
                self.env().block_timestamp(),
            )
        }

        #[ink(message)]
        pub fn releasable_amount(&self) -> Balance {
            self.vested_amount().saturating_sub(self.released)
        }

        /// Pay everything vested so far to the releaser.
        #[ink(message)]
        pub fn release(&mut self) -> Result<Balance, Error> {
            self.non_reentrant(Guard::Release, |this| {
                if this.env().caller() != this.releaser {
                    return Err(Error::Unauthorized);
                }
                let amount = this.releasable_amount();
                if amount == 0 {
                    return Err(Error::NoTokensDue);
                }
                let contract = this.env().account_id();
                let released = this.released.checked_add(amount).ok_or(Error::Overflow)?;
                let beneficiary = this.releaser;

                this.update(contract, beneficiary, amount)?;
                this.released = released;

                this.env().emit_event(TokensReleased { beneficiary, amount });
                Ok(amount)
            })
        }

        #[ink(message)]
        pub fn vesting_cliff(&self) -> Timestamp {
            self.vesting_cliff
        }

        #[ink(message)]
        pub fn vesting_allocation(&self) -> Balance {
            self.vesting_allocation
        }

        #[ink(message)]
        pub fn released(&self) -> Balance {
            self.released
        }

        // =====================================================================
        // ADMIN & ROLES
        // =====================================================================

        /// Redirect the developer share of future taxes.
        ///
        /// Exclusion membership is left as it was: the previous developer
        /// stays untaxed and the new one is taxed unless already excluded.
        #[ink(message)]
        pub fn set_developer_address(&mut self, new_address: AccountId) -> Result<(), Error> {
            self.only_owner()?;
            if new_address == AccountId::from(ZERO_ADDRESS)
                || new_address == AccountId::from(DEAD_ADDRESS)
                || new_address == self.env().account_id()
                || self.env().is_contract(&new_address)
            {
                return Err(Error::InvalidAddress);
            }
            self.developer = new_address;
            self.env().emit_event(DeveloperAddressUpdated {
                new_address,
                timestamp: self.env().block_timestamp(),
            });
            Ok(())
        }

        #[ink(message)]
        pub fn owner(&self) -> AccountId {
            self.owner
        }

        #[ink(message)]
        pub fn developer_address(&self) -> AccountId {
            self.developer
        }

        #[ink(message)]
        pub fn releaser(&self) -> AccountId {
            self.releaser
        }

        #[ink(message)]
        pub fn tax_config(&self) -> TaxConfig {
            self.tax
        }

        /// The contract's own account is always excluded.
        #[ink(message)]
        pub fn is_excluded(&self, account: AccountId) -> bool {
            account == self.env().account_id() || self.excluded.get(account).unwrap_or(false)
        }

        // =====================================================================
        // INTERNAL HELPERS
        // =====================================================================

        /// Transfer pipeline: settle → route → tax.
        ///
        /// The balance check and the tax split come first so a failing
        /// transfer leaves no settlement behind.
        fn update(
            &mut self,
            from: AccountId,
            to: AccountId,
            value: Balance,
        ) -> Result<(), Error> {
            if self.balance_of(from) < value {
                return Err(Error::InsufficientBalance);
            }
            let split = if self.is_excluded(from) || self.is_excluded(to) {
                None
            } else {
                let split = self.tax.split(value);
                // Settlement only shrinks the pool, so this stays valid.
                self.reflection_pool
                    .checked_add(split.reflection)
                    .ok_or(Error::Overflow)?;
                Some(split)
            };

            self.settle_reflections(from)?;
            self.settle_reflections(to)?;

            match split {
                Some(split) => self.route_taxed(from, to, split),
                None => self.raw_transfer(from, to, value),
            }
        }

        fn route_taxed(
            &mut self,
            from: AccountId,
            to: AccountId,
            split: TaxSplit,
        ) -> Result<(), Error> {
            let contract = self.env().account_id();
            let developer = self.developer;

            self.raw_transfer(from, to, split.net)?;
            self.raw_transfer(from, contract, split.reflection)?;
            self.raw_transfer(from, developer, split.developer)?;

            self.reflection_pool += split.reflection;
            self.last_pool_update = self.env().block_timestamp();
            Ok(())
        }

        /// Pays `account` its pending reflections and restarts its clock.
        /// The payout is already untaxed (the contract is excluded) and the
        /// recipient has just been stamped, so it moves as a raw transfer.
        fn settle_reflections(&mut self, account: AccountId) -> Result<Balance, Error> {
            let contract = self.env().account_id();
            if account == contract {
                return Ok(0);
            }
            let amount = self.calculate_reflections(account);
            if self.balance_of(contract) < amount {
                return Err(Error::InsufficientBalance);
            }
            let pool = self
                .reflection_pool
                .checked_sub(amount)
                .ok_or(Error::Overflow)?;

            let now = self.env().block_timestamp();
            self.reflection_pool = pool;
            self.last_claim.insert(account, &now);
            self.raw_transfer(contract, account, amount)?;
            Ok(amount)
        }

        /// The only primitive that moves value. Zero is a no-op.
        fn raw_transfer(
            &mut self,
            from: AccountId,
            to: AccountId,
            value: Balance,
        ) -> Result<(), Error> {
            if value == 0 {
                return Ok(());
            }
            self.subtract_balance(from, value)?;
            self.add_balance(to, value)?;
            self.env().emit_event(Transfer {
                from: Some(from),
                to: Some(to),
                value,
            });
            Ok(())
        }

        fn subtract_balance(&mut self, account: AccountId, amount: Balance) -> Result<(), Error> {
            let balance = self.balance_of(account);
            if balance < amount {
                return Err(Error::InsufficientBalance);
            }
            self.balances.insert(account, &(balance - amount));
            Ok(())
        }

        fn add_balance(&mut self, account: AccountId, amount: Balance) -> Result<(), Error> {
            let balance = self.balance_of(account);
            let new_balance = balance.checked_add(amount).ok_or(Error::Overflow)?;
            self.balances.insert(account, &new_balance);
            Ok(())
        }

        /// Runs `body` holding `guard`; the flag is cleared on every exit path.
        fn non_reentrant<T>(
            &mut self,
            guard: Guard,
            body: impl FnOnce(&mut Self) -> Result<T, Error>,
        ) -> Result<T, Error> {
            if *self.guard_flag(guard) {
                return Err(Error::ReentrancyRejected);
            }
            *self.guard_flag(guard) = true;
            let result = body(self);
            *self.guard_flag(guard) = false;
            result
        }

        fn guard_flag(&mut self, guard: Guard) -> &mut bool {
            match guard {
                Guard::Claim => &mut self.claim_entered,
                Guard::Release => &mut self.release_entered,
            }
        }

        fn only_owner(&self) -> Result<(), Error> {
            if self.env().caller() != self.owner {
                return Err(Error::Unauthorized);
            }
            Ok(())
        }
    }

    // =========================================================================
    // UNIT TESTS
    // =========================================================================
    //
    // Roles: alice = deployer/owner, bob = developer, charlie = releaser.
    // django, eve and frank are ordinary (taxed) holders.

}
