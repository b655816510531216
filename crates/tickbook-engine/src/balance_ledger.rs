//! Balance ledger for the reservation discipline.
//!
//! Tracks per-(user, asset) balances with free/reserved accounting. All
//! mutations are atomic relative to the single call that invoked them:
//! either the full transition applies or the entry is unchanged. Only the
//! matching engine and the cancel path write balances.

use std::collections::HashMap;

use tickbook_types::{Asset, BalanceEntry, Result, TickbookError, UserId};

/// The source of truth for all balance state.
///
/// Points and every per-(market, outcome) share position are independent
/// ledger entries with identical semantics; the [`Asset`] key picks one.
#[derive(Debug, Default)]
pub struct BalanceLedger {
    /// Per-(user, asset) balances.
    balances: HashMap<(UserId, Asset), BalanceEntry>,
}

impl BalanceLedger {
    /// Create a new empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            balances: HashMap::new(),
        }
    }

    /// Credit free balance. Used by the bridging collaborators to fund an
    /// account and by fill settlement on the receiving side.
    pub fn credit(&mut self, user: UserId, asset: Asset, amount: u64) {
        let entry = self.balances.entry((user, asset)).or_default();
        entry.free += amount;
    }

    /// Move free → reserved, backing a new resting order.
    ///
    /// # Errors
    /// Returns `InsufficientFree` if free < amount, with no partial effect.
    pub fn reserve(&mut self, user: UserId, asset: Asset, amount: u64) -> Result<()> {
        let entry = self.balances.entry((user, asset)).or_default();
        if entry.free < amount {
            return Err(TickbookError::InsufficientFree {
                asset,
                needed: amount,
                free: entry.free,
            });
        }
        entry.free -= amount;
        entry.reserved += amount;
        Ok(())
    }

    /// Move reserved → free, unwinding a cancelled order's backing.
    ///
    /// # Errors
    /// Returns `InsufficientReserved` if reserved < amount. Should never
    /// trigger given correct callers — a defensive invariant check.
    pub fn release(&mut self, user: UserId, asset: Asset, amount: u64) -> Result<()> {
        let entry = self.entry_mut(user, asset, amount)?;
        entry.reserved -= amount;
        entry.free += amount;
        Ok(())
    }

    /// Consume reserved balance during fill settlement (maker leg).
    ///
    /// # Errors
    /// Returns `InsufficientReserved` if reserved < amount.
    pub fn debit_reserved(&mut self, user: UserId, asset: Asset, amount: u64) -> Result<()> {
        let entry = self.entry_mut(user, asset, amount)?;
        entry.reserved -= amount;
        Ok(())
    }

    /// Consume free balance during fill settlement (taker leg).
    ///
    /// # Errors
    /// Returns `InsufficientFree` if free < amount.
    pub fn debit_free(&mut self, user: UserId, asset: Asset, amount: u64) -> Result<()> {
        let entry = self.balances.entry((user, asset)).or_default();
        if entry.free < amount {
            return Err(TickbookError::InsufficientFree {
                asset,
                needed: amount,
                free: entry.free,
            });
        }
        entry.free -= amount;
        Ok(())
    }

    /// The balance for a (user, asset) pair.
    #[must_use]
    pub fn balance(&self, user: UserId, asset: Asset) -> BalanceEntry {
        self.balances
            .get(&(user, asset))
            .copied()
            .unwrap_or_default()
    }

    /// Total supply of an asset (sum of all users' free + reserved).
    #[must_use]
    pub fn total_supply(&self, asset: Asset) -> u64 {
        self.balances
            .iter()
            .filter(|((_, a), _)| *a == asset)
            .map(|(_, entry)| entry.total())
            .sum()
    }

    fn entry_mut(&mut self, user: UserId, asset: Asset, amount: u64) -> Result<&mut BalanceEntry> {
        let entry = self.balances.entry((user, asset)).or_default();
        if entry.reserved < amount {
            return Err(TickbookError::InsufficientReserved {
                asset,
                needed: amount,
                reserved: entry.reserved,
            });
        }
        Ok(entry)
    }
}
