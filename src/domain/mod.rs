//! Records and repository ports of the ledger.

pub mod account;
pub mod ports;
pub mod role;
pub mod transaction;
