use super::next_sequential_id;
use super::snapshot::SnapshotFile;
use crate::domain::ports::LedgerRepository;
use crate::domain::transaction::Transaction;
use crate::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Append-only transaction history persisted as one JSON array.
#[derive(Clone)]
pub struct JsonLedgerRepository {
    transactions: Arc<RwLock<Vec<Transaction>>>,
    snapshot: SnapshotFile,
}

impl JsonLedgerRepository {
    /// Loads the transactions snapshot at `path`, starting empty if it is missing
    /// or unreadable.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let snapshot = SnapshotFile::new(path);
        let transactions = snapshot.load_or_empty();
        Self {
            transactions: Arc::new(RwLock::new(transactions)),
            snapshot,
        }
    }
}

#[async_trait]
impl LedgerRepository for JsonLedgerRepository {
    /// Assigns the next sequential id and persists the record.
    ///
    /// A failed write is returned and the record is not kept in memory.
    async fn append(&self, mut transaction: Transaction) -> Result<Transaction> {
        let mut transactions = self.transactions.write().await;
        transaction.id = next_sequential_id(transactions.iter().map(|t| t.id.as_str()));

        let mut next = transactions.clone();
        next.push(transaction.clone());
        self.snapshot.write(&next)?;
        *transactions = next;

        tracing::debug!(
            transaction_id = %transaction.id,
            account_id = %transaction.account_id,
            activity = ?transaction.activity_type,
            "ledger entry appended"
        );
        Ok(transaction)
    }

    async fn list_all(&self) -> Result<Vec<Transaction>> {
        Ok(self.transactions.read().await.clone())
    }
}
