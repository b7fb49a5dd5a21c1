//! # hydra-vault
//!
//! Pool registry and time-gated pause vault, served over REST and
//! WebSocket.
//!
//! The [`domain::Vault`] is the central ledger: pools register an ordered
//! token list once, an [`domain::Authorizer`] decides who may register,
//! pause or unpause, and a pause window followed by a buffer period bounds
//! how long the vault can be halted. Pool math, swaps and balances are out
//! of scope; this crate only keeps the registry and the pause lifecycle.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── VaultService (service/)
//!     ├── EventBus (domain/)
//!     │
//!     ├── Vault (domain/)
//!     │     ├── PoolRegistry
//!     │     ├── PauseState
//!     │     └── Authorizer
//!     │
//!     └── PostgreSQL Event Log
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod ws;
