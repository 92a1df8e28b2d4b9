use crate::application::session::AccountProfile;
use crate::domain::transaction::Transaction;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct AccountRow<'a> {
    id: &'a str,
    username: &'a str,
    email: &'a str,
    balance: String,
    active: bool,
    roles: String,
}

#[derive(Serialize)]
struct TransactionRow<'a> {
    id: &'a str,
    account_id: &'a str,
    merchant_id: &'a str,
    activity_type: &'a str,
    timestamp: String,
    amount: String,
    details: &'a str,
}

/// Writes accounts and ledger entries as CSV. Passwords are never written.
pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_accounts(&mut self, profiles: &[AccountProfile]) -> Result<()> {
        for profile in profiles {
            let account = &profile.account;
            self.writer.serialize(AccountRow {
                id: &account.id,
                username: &account.username,
                email: &account.email,
                balance: account.balance.0.normalize().to_string(),
                active: account.is_active,
                roles: profile.roles.join(";"),
            })?;
        }
        self.writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    pub fn write_transactions(&mut self, transactions: &[Transaction]) -> Result<()> {
        for tx in transactions {
            self.writer.serialize(TransactionRow {
                id: &tx.id,
                account_id: &tx.account_id,
                merchant_id: tx.merchant_id.as_deref().unwrap_or(""),
                activity_type: tx.activity_type.as_str(),
                timestamp: tx.timestamp.to_rfc3339(),
                amount: tx.amount.map(|a| a.normalize().to_string()).unwrap_or_default(),
                details: &tx.details,
            })?;
        }
        self.writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::{Balance, NewAccount};
    use crate::domain::transaction::ActivityType;
    use rust_decimal_macros::dec;

    #[test]
    fn test_write_accounts() {
        let account = NewAccount::new("alice01", "alice@example.com", "secret123")
            .into_account("1".into(), Balance::new(dec!(1500.00)));
        let profiles = vec![AccountProfile {
            account,
            roles: vec!["customer".into(), "merchant".into()],
        }];

        let mut buf = Vec::new();
        ReportWriter::new(&mut buf).write_accounts(&profiles).unwrap();
        let out = String::from_utf8(buf).unwrap();

        assert!(out.starts_with("id,username,email,balance,active,roles\n"));
        assert!(out.contains("1,alice01,alice@example.com,1500,false,customer;merchant"));
        assert!(!out.contains("secret123"));
    }

    #[test]
    fn test_write_transactions() {
        let tx = Transaction {
            id: "4".into(),
            ..Transaction::draft("1", ActivityType::FailedPayment)
                .with_merchant("2")
                .with_amount(dec!(2000.0))
                .with_details("insufficient balance")
        };

        let mut buf = Vec::new();
        ReportWriter::new(&mut buf).write_transactions(&[tx]).unwrap();
        let out = String::from_utf8(buf).unwrap();

        assert!(out.contains("4,1,2,FAILED_PAYMENT,"));
        assert!(out.contains(",2000,insufficient balance"));
    }
}
