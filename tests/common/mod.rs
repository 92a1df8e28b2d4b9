#![allow(dead_code)]

use account_ledger::application::context::{LedgerContext, provision_default_roles};
use account_ledger::config::LedgerConfig;
use account_ledger::domain::account::{Account, Balance, NewAccount};
use account_ledger::domain::ports::AccountRepository;
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use std::path::Path;

pub const MERCHANT_ROLE: &str = "1";
pub const CUSTOMER_ROLE: &str = "2";

/// Opens a ledger in `dir` with the default roles provisioned.
pub fn open_ledger(dir: &Path) -> LedgerContext {
    let config = LedgerConfig::with_data_dir(dir);
    provision_default_roles(&config).expect("Failed to provision roles");
    LedgerContext::open(&config)
}

/// Creates an account holding `role_id`, then activates and funds it.
pub async fn active_account(
    ctx: &LedgerContext,
    username: &str,
    role_id: &str,
    balance: Decimal,
) -> Account {
    let roles: BTreeSet<String> = [role_id.to_string()].into();
    let mut account = ctx
        .accounts
        .create(
            NewAccount::new(username, format!("{username}@example.com"), "secret123"),
            &roles,
        )
        .await
        .expect("Failed to create account");
    account.is_active = true;
    account.balance = Balance::new(balance);
    ctx.accounts
        .update(account.clone())
        .await
        .expect("Failed to update account");
    account
}
