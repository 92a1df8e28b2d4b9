use super::engine::PaymentEngine;
use super::session::SessionService;
use crate::config::LedgerConfig;
use crate::domain::account::Balance;
use crate::domain::ports::{AccountRepositoryRef, LedgerRepositoryRef, RoleRepositoryRef};
use crate::domain::role::default_roles;
use crate::error::Result;
use crate::infrastructure::account_repository::JsonAccountRepository;
use crate::infrastructure::account_roles::AccountRoleTable;
use crate::infrastructure::ledger_repository::JsonLedgerRepository;
use crate::infrastructure::role_repository::JsonRoleRepository;
use crate::infrastructure::snapshot::SnapshotFile;
use std::sync::Arc;

/// Repositories and services built from one [`LedgerConfig`].
#[derive(Clone)]
pub struct LedgerContext {
    pub accounts: AccountRepositoryRef,
    pub roles: RoleRepositoryRef,
    pub ledger: LedgerRepositoryRef,
    pub payments: PaymentEngine,
    pub sessions: SessionService,
}

impl LedgerContext {
    /// Loads every snapshot under `config.data_dir`; missing files start empty.
    pub fn open(config: &LedgerConfig) -> Self {
        let links = AccountRoleTable::open(config.account_roles_path());
        let roles: RoleRepositoryRef = Arc::new(JsonRoleRepository::open(
            config.roles_path(),
            &config.roles,
            links.clone(),
        ));
        let accounts: AccountRepositoryRef = Arc::new(JsonAccountRepository::open(
            config.accounts_path(),
            links,
            roles.clone(),
            Balance::new(config.starting_balance),
        ));
        let ledger: LedgerRepositoryRef =
            Arc::new(JsonLedgerRepository::open(config.transactions_path()));

        tracing::info!(data_dir = %config.data_dir.display(), "ledger opened");
        Self {
            payments: PaymentEngine::new(accounts.clone(), roles.clone(), ledger.clone()),
            sessions: SessionService::new(accounts.clone(), roles.clone(), ledger.clone()),
            accounts,
            roles,
            ledger,
        }
    }
}

/// Seeds the default merchant and customer roles.
///
/// Returns `false` without touching anything when a roles snapshot already exists.
pub fn provision_default_roles(config: &LedgerConfig) -> Result<bool> {
    let snapshot = SnapshotFile::new(config.roles_path());
    if snapshot.exists() {
        return Ok(false);
    }
    snapshot.write(&default_roles())?;
    tracing::info!(path = %snapshot.path().display(), "default roles provisioned");
    Ok(true)
}
