//! Service layer: business logic orchestration.
//!
//! [`VaultService`] serialises mutating calls into the
//! [`crate::domain::Vault`] and shapes results for the API.

pub mod vault_service;

pub use vault_service::{PauseSnapshot, PoolRegistration, VaultService};
