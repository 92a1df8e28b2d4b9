use super::next_sequential_id;
use super::snapshot::SnapshotFile;
use crate::domain::role::AccountRole;
use crate::error::PersistenceError;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

/// The account-to-role join table.
///
/// Written only by the account repository when an account is created; the role
/// repository holds a clone for lookups. Cloning shares the underlying lock.
#[derive(Debug, Clone)]
pub struct AccountRoleTable {
    links: Arc<RwLock<Vec<AccountRole>>>,
    snapshot: SnapshotFile,
}

impl AccountRoleTable {
    /// Loads the join table snapshot at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let snapshot = SnapshotFile::new(path);
        let links = snapshot.load_or_empty();
        Self {
            links: Arc::new(RwLock::new(links)),
            snapshot,
        }
    }

    /// Links of one account, in creation order.
    pub async fn for_account(&self, account_id: &str) -> Vec<AccountRole> {
        let links = self.links.read().await;
        links
            .iter()
            .filter(|link| link.account_id == account_id)
            .cloned()
            .collect()
    }

    pub async fn all(&self) -> Vec<AccountRole> {
        self.links.read().await.clone()
    }

    /// Persists one link per role id and only then publishes them in memory.
    pub(crate) async fn link(
        &self,
        account_id: &str,
        role_ids: &[String],
    ) -> Result<Vec<AccountRole>, PersistenceError> {
        let mut links = self.links.write().await;
        let mut next = links.clone();
        let mut added = Vec::with_capacity(role_ids.len());
        for role_id in role_ids {
            let link = AccountRole {
                id: next_sequential_id(next.iter().map(|l| l.id.as_str())),
                account_id: account_id.to_string(),
                role_id: role_id.clone(),
            };
            next.push(link.clone());
            added.push(link);
        }

        self.snapshot.write(&next)?;
        *links = next;
        Ok(added)
    }
}
