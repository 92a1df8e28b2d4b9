//! Application layer orchestrating the repositories.
//!
//! [`engine::PaymentEngine`] runs payments and history queries,
//! [`session::SessionService`] covers registration and login state, and
//! [`context::LedgerContext`] wires both onto the file-backed repositories.

pub mod context;
pub mod engine;
pub mod session;
