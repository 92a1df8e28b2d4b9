use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    Login,
    Logout,
    Payment,
    FailedLogin,
    FailedPayment,
}

impl ActivityType {
    /// Wire name, identical to the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "LOGIN",
            Self::Logout => "LOGOUT",
            Self::Payment => "PAYMENT",
            Self::FailedLogin => "FAILED_LOGIN",
            Self::FailedPayment => "FAILED_PAYMENT",
        }
    }
}

/// One attempted activity recorded in the ledger.
///
/// Records are immutable once appended. `id` is empty on drafts and assigned by
/// the ledger repository.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Transaction {
    pub id: String,
    pub account_id: String,
    /// Counterpart account of a payment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<String>,
    pub activity_type: ActivityType,
    pub timestamp: DateTime<Utc>,
    pub details: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
}

impl Transaction {
    pub fn draft(account_id: impl Into<String>, activity_type: ActivityType) -> Self {
        Self {
            id: String::new(),
            account_id: account_id.into(),
            merchant_id: None,
            activity_type,
            timestamp: Utc::now(),
            details: String::new(),
            amount: None,
        }
    }

    pub fn with_merchant(mut self, merchant_id: impl Into<String>) -> Self {
        self.merchant_id = Some(merchant_id.into());
        self
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    /// Sets the outcome of a draft before it is appended.
    pub fn mark(&mut self, activity_type: ActivityType, details: &str) {
        self.activity_type = activity_type;
        self.details = details.to_string();
    }
}
