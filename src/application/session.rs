use crate::domain::account::{Account, NewAccount};
use crate::domain::ports::{AccountRepositoryRef, LedgerRepositoryRef, RoleRepositoryRef};
use crate::domain::transaction::{ActivityType, Transaction};
use crate::error::{LedgerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Account id of ledger entries that belong to no account.
pub const UNKNOWN_ACCOUNT: &str = "";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    /// Role names, resolved to ids before the account is created.
    pub roles: Vec<String>,
}

/// An account together with the names of its roles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountProfile {
    pub account: Account,
    pub roles: Vec<String>,
}

/// Registration and the login/logout lifecycle that drives `is_active`.
///
/// Token issuance is left to the caller; this service only flips account state
/// and records LOGIN, LOGOUT and FAILED_LOGIN entries in the ledger.
#[derive(Clone)]
pub struct SessionService {
    accounts: AccountRepositoryRef,
    roles: RoleRepositoryRef,
    ledger: LedgerRepositoryRef,
}

impl SessionService {
    pub fn new(
        accounts: AccountRepositoryRef,
        roles: RoleRepositoryRef,
        ledger: LedgerRepositoryRef,
    ) -> Self {
        Self {
            accounts,
            roles,
            ledger,
        }
    }

    /// Creates an account holding the named roles.
    ///
    /// # Arguments
    ///
    /// * `registration` - Account fields plus role names. Every name must exist,
    ///   otherwise `RoleNotFound` is returned and nothing is written.
    pub async fn register(&self, registration: Registration) -> Result<Account> {
        let mut role_ids = BTreeSet::new();
        for name in &registration.roles {
            role_ids.insert(self.roles.find_by_name(name).await?.id);
        }

        let account = NewAccount::new(
            registration.username,
            registration.email,
            registration.password,
        );
        self.accounts.create(account, &role_ids).await
    }

    /// Checks the credentials and marks the account active.
    ///
    /// Every attempt is recorded. A rejected attempt for an unknown username is
    /// stored under an empty account id with the username in its details.
    pub async fn login(&self, username: &str, password: &str) -> Result<Account> {
        let found = match self.accounts.find_by_username(username).await {
            Ok(account) => Some(account),
            Err(LedgerError::AccountNotFound(_)) => None,
            Err(e) => return Err(e),
        };

        let mut account = match found {
            Some(account) if account.password == password => account,
            Some(account) => {
                tracing::warn!(account_id = %account.id, "login rejected");
                let details = "invalid credentials".to_string();
                self.record_failed_login(&account.id, details).await?;
                return Err(LedgerError::InvalidCredentials);
            }
            // No account owns the attempt, so it must not land in any account's history.
            None => {
                tracing::warn!(username = %username, "login rejected for unknown username");
                let details = format!("invalid credentials for username {username}");
                self.record_failed_login(UNKNOWN_ACCOUNT, details).await?;
                return Err(LedgerError::InvalidCredentials);
            }
        };

        account.is_active = true;
        self.accounts.update(account.clone()).await?;
        let record = Transaction::draft(&account.id, ActivityType::Login).with_details("logged in");
        self.ledger.append(record).await?;

        tracing::info!(account_id = %account.id, "logged in");
        Ok(account)
    }

    /// Deactivates the account and records a LOGOUT entry.
    pub async fn logout(&self, account_id: &str) -> Result<Account> {
        let mut account = self.accounts.find_by_id(account_id).await?;
        account.is_active = false;
        self.accounts.update(account.clone()).await?;
        let record =
            Transaction::draft(&account.id, ActivityType::Logout).with_details("logged out");
        self.ledger.append(record).await?;

        tracing::info!(account_id = %account.id, "logged out");
        Ok(account)
    }

    /// Lists every account with the names of its roles.
    ///
    /// Accounts without role links are listed with an empty role list.
    pub async fn directory(&self) -> Result<Vec<AccountProfile>> {
        let accounts = self.accounts.list_all().await?;
        let mut profiles = Vec::with_capacity(accounts.len());
        for account in accounts {
            let links = match self.roles.find_roles_for_account(&account.id).await {
                Ok(links) => links,
                Err(LedgerError::RolesNotAssigned(_)) => Vec::new(),
                Err(e) => return Err(e),
            };
            let mut roles = Vec::with_capacity(links.len());
            for link in links {
                roles.push(self.roles.find_by_id(&link.role_id).await?.name);
            }
            profiles.push(AccountProfile { account, roles });
        }
        Ok(profiles)
    }

    async fn record_failed_login(&self, account_id: &str, details: String) -> Result<()> {
        let record =
            Transaction::draft(account_id, ActivityType::FailedLogin).with_details(details);
        self.ledger.append(record).await?;
        Ok(())
    }
}
