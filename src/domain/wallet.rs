//! Wallet balance
//!
//! A user's running spendable total. Storage puts no floor on it; the
//! transfer rules check coverage before debiting.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wallet(Decimal);

impl Wallet {
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// True when the wallet holds at least `amount`.
    pub fn covers(&self, amount: &Amount) -> bool {
        self.0 >= amount.value()
    }

    pub fn credit(&self, amount: &Amount) -> Wallet {
        Self(self.0 + amount.value())
    }

    /// Subtract without a floor check; callers gate on [`Wallet::covers`].
    pub fn debit(&self, amount: &Amount) -> Wallet {
        Self(self.0 - amount.value())
    }
}

impl From<Decimal> for Wallet {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl fmt::Display for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_wallet_credit_debit() {
        let wallet = Wallet::zero();
        let top_up = Amount::new(dec!(100)).unwrap();
        let wallet = wallet.credit(&top_up);
        assert_eq!(wallet.value(), dec!(100));

        let lend = Amount::new(dec!(40)).unwrap();
        let wallet = wallet.debit(&lend);
        assert_eq!(wallet.value(), dec!(60));
    }

    #[test]
    fn test_wallet_covers_exact_balance() {
        let wallet = Wallet::new(dec!(40));
        assert!(wallet.covers(&Amount::new(dec!(40)).unwrap()));
        assert!(!wallet.covers(&Amount::new(dec!(40.01)).unwrap()));
    }

    #[test]
    fn test_wallet_has_no_storage_floor() {
        let wallet = Wallet::new(dec!(5)).debit(&Amount::new(dec!(10)).unwrap());
        assert_eq!(wallet.value(), dec!(-5));
        assert_eq!(wallet.to_string(), "-5.00");
    }
}
