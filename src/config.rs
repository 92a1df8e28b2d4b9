use crate::domain::role::RolePolicy;
use crate::error::{LedgerError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const ACCOUNTS_FILE: &str = "accounts.json";
pub const ROLES_FILE: &str = "roles.json";
pub const ACCOUNT_ROLES_FILE: &str = "account_roles.json";
pub const TRANSACTIONS_FILE: &str = "transactions.json";

/// Runtime settings of the ledger.
///
/// Every field has a default, so a config file only needs the keys it changes:
///
/// ```json
/// { "data_dir": "/var/lib/ledger", "starting_balance": "1000000" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Directory holding the four snapshot files.
    pub data_dir: PathBuf,
    /// Balance granted to newly created accounts.
    pub starting_balance: Decimal,
    pub roles: RolePolicy,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            starting_balance: Decimal::ZERO,
            roles: RolePolicy::default(),
        }
    }
}

impl LedgerConfig {
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| LedgerError::Config(format!("{}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|e| LedgerError::Config(format!("{}: {}", path.display(), e)))?;
        if config.starting_balance < Decimal::ZERO {
            return Err(LedgerError::Config(
                "starting_balance must not be negative".to_string(),
            ));
        }
        Ok(config)
    }

    pub fn accounts_path(&self) -> PathBuf {
        self.data_dir.join(ACCOUNTS_FILE)
    }

    pub fn roles_path(&self) -> PathBuf {
        self.data_dir.join(ROLES_FILE)
    }

    pub fn account_roles_path(&self) -> PathBuf {
        self.data_dir.join(ACCOUNT_ROLES_FILE)
    }

    pub fn transactions_path(&self) -> PathBuf {
        self.data_dir.join(TRANSACTIONS_FILE)
    }
}
