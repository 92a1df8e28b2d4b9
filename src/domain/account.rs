use crate::error::LedgerError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::ops::{AddAssign, SubAssign};

/// Spendable funds held by an account.
///
/// Wraps `rust_decimal::Decimal` so balance arithmetic stays exact and cannot be
/// mixed up with raw request amounts.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Balance(pub Decimal);

/// A strictly positive payment amount.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, LedgerError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(LedgerError::InvalidAmount(value))
        }
    }
}

impl From<Amount> for Balance {
    fn from(amount: Amount) -> Self {
        Self(amount.0)
    }
}

impl Balance {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn covers(&self, amount: Amount) -> bool {
        self.0 >= amount.0
    }
}

impl AddAssign for Balance {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Balance {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

/// A registered holder of funds, customer or merchant.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Account {
    /// Assigned by the repository on creation.
    pub id: String,
    pub username: String,
    pub email: String,
    /// Compared by exact match; hashing happens outside this crate.
    pub password: String,
    pub balance: Balance,
    /// Set by login, cleared by logout.
    pub is_active: bool,
}

impl Account {
    /// Removes `amount` from the balance if it is covered.
    pub fn debit(&mut self, amount: Amount) -> Result<(), LedgerError> {
        if self.balance.covers(amount) {
            self.balance -= amount.into();
            Ok(())
        } else {
            Err(LedgerError::InsufficientBalance(self.id.clone()))
        }
    }

    pub fn credit(&mut self, amount: Amount) {
        self.balance += amount.into();
    }
}

/// An account as shown to callers, without its password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub id: String,
    pub username: String,
    pub email: String,
    pub balance: Balance,
    pub is_active: bool,
}

impl From<Account> for AccountSummary {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email: account.email,
            balance: account.balance,
            is_active: account.is_active,
        }
    }
}

/// Caller-supplied fields of an account about to be created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl NewAccount {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    pub(crate) fn into_account(self, id: String, balance: Balance) -> Account {
        Account {
            id,
            username: self.username,
            email: self.email,
            password: self.password,
            balance,
            is_active: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn account(balance: Decimal) -> Account {
        NewAccount::new("alice01", "alice@example.com", "secret123")
            .into_account("1".into(), Balance::new(balance))
    }

    #[test]
    fn test_balance_covers() {
        let balance = Balance::new(dec!(10.0));
        assert!(balance.covers(Amount::new(dec!(10.0)).unwrap()));
        assert!(!balance.covers(Amount::new(dec!(10.01)).unwrap()));
    }

    #[test]
    fn test_credit_then_debit() {
        let mut account = account(dec!(5.0));
        account.credit(Amount::new(dec!(2.5)).unwrap());
        assert_eq!(account.balance, Balance::new(dec!(7.5)));
        account.debit(Amount::new(dec!(7.5)).unwrap()).unwrap();
        assert_eq!(account.balance, Balance::ZERO);
    }

    #[test]
    fn test_amount_validation() {
        assert!(Amount::new(dec!(0.01)).is_ok());
        assert!(matches!(
            Amount::new(dec!(0.0)),
            Err(LedgerError::InvalidAmount(_))
        ));
        assert!(matches!(
            Amount::new(dec!(-1.0)),
            Err(LedgerError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_new_account_starts_inactive() {
        let account = account(dec!(0));
        assert_eq!(account.id, "1");
        assert!(!account.is_active);
        assert_eq!(account.balance, Balance::ZERO);
    }

    #[test]
    fn test_debit_exact_balance() {
        let mut account = account(dec!(500.0));
        account.debit(Amount::new(dec!(500.0)).unwrap()).unwrap();
        assert_eq!(account.balance, Balance::ZERO);
    }

    #[test]
    fn test_debit_insufficient() {
        let mut account = account(dec!(10.0));
        let result = account.debit(Amount::new(dec!(20.0)).unwrap());
        assert!(matches!(result, Err(LedgerError::InsufficientBalance(_))));
        assert_eq!(account.balance, Balance::new(dec!(10.0)));
    }

    #[test]
    fn test_summary_leaves_out_password() {
        let json = serde_json::to_value(AccountSummary::from(account(dec!(3)))).unwrap();
        assert_eq!(json["username"], "alice01");
        assert_eq!(json["balance"], "3");
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_account_json_shape() {
        let json = serde_json::to_value(account(dec!(12.5))).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["is_active"], false);
        assert_eq!(json["balance"], "12.5");
    }
}
