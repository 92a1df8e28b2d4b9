use std::path::PathBuf;
use thiserror::Error;

/// Failure to read or write a snapshot file.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("snapshot I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed snapshot at {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl PersistenceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Malformed {
            path: path.into(),
            source,
        }
    }
}

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("account not found: {0}")]
    AccountNotFound(String),
    #[error("role not found: {0}")]
    RoleNotFound(String),
    #[error("account {0} has no roles assigned")]
    RolesNotAssigned(String),
    #[error("username already exists: {0}")]
    DuplicateUsername(String),
    #[error("email already exists: {0}")]
    DuplicateEmail(String),
    #[error("none of the requested role ids exist")]
    InvalidRole,
    #[error("amount must be positive, got {0}")]
    InvalidAmount(rust_decimal::Decimal),
    #[error("account is not active: {0}")]
    AccountInactive(String),
    #[error("insufficient balance on account {0}")]
    InsufficientBalance(String),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("configuration error: {0}")]
    Config(String),
}

impl LedgerError {
    /// Business-rule rejections, as opposed to internal failures.
    pub fn is_business(&self) -> bool {
        !matches!(self, Self::Persistence(_) | Self::Csv(_) | Self::Config(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::AccountNotFound(_) | Self::RoleNotFound(_) | Self::RolesNotAssigned(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
