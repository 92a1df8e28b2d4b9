use super::account::{Account, NewAccount};
use super::role::{AccountRole, Role};
use super::transaction::Transaction;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::Arc;

#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Account>;
    async fn find_by_email(&self, email: &str) -> Result<Account>;
    async fn find_by_id(&self, id: &str) -> Result<Account>;
    async fn create(&self, account: NewAccount, role_ids: &BTreeSet<String>) -> Result<Account>;
    async fn update(&self, account: Account) -> Result<()>;
    async fn list_all(&self) -> Result<Vec<Account>>;
}

#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn find_by_name(&self, name: &str) -> Result<Role>;
    async fn find_by_id(&self, id: &str) -> Result<Role>;
    /// Fails with `RolesNotAssigned` when the account holds no role.
    async fn find_roles_for_account(&self, account_id: &str) -> Result<Vec<AccountRole>>;
}

#[async_trait]
pub trait LedgerRepository: Send + Sync {
    async fn append(&self, transaction: Transaction) -> Result<Transaction>;
    async fn list_all(&self) -> Result<Vec<Transaction>>;
}

pub type AccountRepositoryRef = Arc<dyn AccountRepository>;
pub type RoleRepositoryRef = Arc<dyn RoleRepository>;
pub type LedgerRepositoryRef = Arc<dyn LedgerRepository>;
