use super::account_roles::AccountRoleTable;
use super::snapshot::SnapshotFile;
use crate::domain::ports::RoleRepository;
use crate::domain::role::{AccountRole, Role, RolePolicy};
use crate::error::{LedgerError, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Read-only role catalogue loaded from the roles snapshot.
///
/// Roles are provisioned out of band; each one gets its [`crate::domain::role::RoleKind`]
/// from the [`RolePolicy`] at load time.
#[derive(Clone)]
pub struct JsonRoleRepository {
    roles: Arc<RwLock<Vec<Role>>>,
    links: AccountRoleTable,
}

impl JsonRoleRepository {
    /// Loads the roles snapshot at `path` and classifies each role with `policy`.
    pub fn open(path: impl Into<PathBuf>, policy: &RolePolicy, links: AccountRoleTable) -> Self {
        let snapshot = SnapshotFile::new(path);
        let roles = snapshot.load_or_empty::<Role>();
        Self::from_roles(roles, policy, links)
    }

    /// Builds the catalogue from roles already in memory.
    pub fn from_roles(mut roles: Vec<Role>, policy: &RolePolicy, links: AccountRoleTable) -> Self {
        for role in &mut roles {
            role.kind = policy.classify(&role.id);
        }
        tracing::info!(count = roles.len(), "roles loaded");
        Self {
            roles: Arc::new(RwLock::new(roles)),
            links,
        }
    }
}

#[async_trait]
impl RoleRepository for JsonRoleRepository {
    async fn find_by_name(&self, name: &str) -> Result<Role> {
        let roles = self.roles.read().await;
        roles
            .iter()
            .find(|r| r.name == name)
            .cloned()
            .ok_or_else(|| LedgerError::RoleNotFound(name.to_string()))
    }

    async fn find_by_id(&self, id: &str) -> Result<Role> {
        let roles = self.roles.read().await;
        roles
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| LedgerError::RoleNotFound(id.to_string()))
    }

    async fn find_roles_for_account(&self, account_id: &str) -> Result<Vec<AccountRole>> {
        let links = self.links.for_account(account_id).await;
        if links.is_empty() {
            return Err(LedgerError::RolesNotAssigned(account_id.to_string()));
        }
        Ok(links)
    }
}
