use super::account_roles::AccountRoleTable;
use super::next_sequential_id;
use super::snapshot::SnapshotFile;
use crate::domain::account::{Account, Balance, NewAccount};
use crate::domain::ports::{AccountRepository, RoleRepositoryRef};
use crate::error::{LedgerError, Result};
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

/// File-backed account store.
///
/// Reads take the shared lock. Writes hold the exclusive lock across the
/// snapshot write, and the in-memory collection is only replaced once the
/// snapshot has been written, so a failed write leaves memory as it was.
#[derive(Clone)]
pub struct JsonAccountRepository {
    accounts: Arc<RwLock<Vec<Account>>>,
    snapshot: SnapshotFile,
    links: AccountRoleTable,
    roles: RoleRepositoryRef,
    starting_balance: Balance,
}

impl JsonAccountRepository {
    /// Loads the accounts snapshot at `path`, starting empty if it is missing or unreadable.
    ///
    /// # Arguments
    ///
    /// * `path` - Location of the accounts snapshot.
    /// * `links` - Join table that receives the roles of created accounts.
    /// * `roles` - Catalogue used to validate requested role ids.
    /// * `starting_balance` - Balance given to every new account.
    pub fn open(
        path: impl Into<PathBuf>,
        links: AccountRoleTable,
        roles: RoleRepositoryRef,
        starting_balance: Balance,
    ) -> Self {
        let snapshot = SnapshotFile::new(path);
        let accounts = snapshot.load_or_empty();
        Self {
            accounts: Arc::new(RwLock::new(accounts)),
            snapshot,
            links,
            roles,
            starting_balance,
        }
    }

    async fn find_by<F>(&self, predicate: F, key: &str) -> Result<Account>
    where
        F: Fn(&Account) -> bool,
    {
        let accounts = self.accounts.read().await;
        accounts
            .iter()
            .find(|&a| predicate(a))
            .cloned()
            .ok_or_else(|| LedgerError::AccountNotFound(key.to_string()))
    }

    async fn resolve_roles(&self, role_ids: &BTreeSet<String>) -> Vec<String> {
        let mut resolved = Vec::with_capacity(role_ids.len());
        for role_id in role_ids {
            match self.roles.find_by_id(role_id).await {
                Ok(role) => resolved.push(role.id),
                Err(_) => tracing::debug!(role_id = %role_id, "ignoring unknown role id"),
            }
        }
        resolved
    }
}

#[async_trait]
impl AccountRepository for JsonAccountRepository {
    async fn find_by_username(&self, username: &str) -> Result<Account> {
        self.find_by(|a| a.username == username, username).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Account> {
        self.find_by(|a| a.email == email, email).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Account> {
        self.find_by(|a| a.id == id, id).await
    }

    /// Checks uniqueness (username first, then email), keeps the known role ids,
    /// and persists the account and its role links before publishing them.
    async fn create(&self, account: NewAccount, role_ids: &BTreeSet<String>) -> Result<Account> {
        let mut accounts = self.accounts.write().await;

        if accounts.iter().any(|a| a.username == account.username) {
            return Err(LedgerError::DuplicateUsername(account.username));
        }
        if accounts.iter().any(|a| a.email == account.email) {
            return Err(LedgerError::DuplicateEmail(account.email));
        }

        let resolved = self.resolve_roles(role_ids).await;
        if resolved.is_empty() {
            return Err(LedgerError::InvalidRole);
        }

        let id = next_sequential_id(accounts.iter().map(|a| a.id.as_str()));
        let created = account.into_account(id, self.starting_balance);

        let mut next = accounts.clone();
        next.push(created.clone());
        self.snapshot.write(&next)?;

        if let Err(e) = self.links.link(&created.id, &resolved).await {
            // Put the accounts file back so neither file references the half-created account.
            if let Err(restore) = self.snapshot.write(accounts.as_slice()) {
                tracing::error!(error = %restore, "failed to restore accounts snapshot");
            }
            return Err(e.into());
        }
        *accounts = next;

        tracing::info!(
            account_id = %created.id,
            username = %created.username,
            roles = ?resolved,
            "account created"
        );
        Ok(created)
    }

    /// Replaces the stored account with the same id.
    async fn update(&self, account: Account) -> Result<()> {
        let mut accounts = self.accounts.write().await;
        let index = accounts
            .iter()
            .position(|a| a.id == account.id)
            .ok_or_else(|| LedgerError::AccountNotFound(account.id.clone()))?;

        let mut next = accounts.clone();
        next[index] = account;
        self.snapshot.write(&next)?;
        *accounts = next;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Account>> {
        Ok(self.accounts.read().await.clone())
    }
}
