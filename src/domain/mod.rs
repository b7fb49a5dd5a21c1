//! Domain layer: the vault core, its components, and the event system.
//!
//! Leaves first: [`Address`] and [`TokenDescriptor`] are plain values;
//! [`Authorizer`] and [`Clock`] are the seams to the outside world;
//! [`PauseState`] and [`PoolRegistry`] hold the ledger; [`Vault`]
//! composes them and publishes [`VaultEvent`]s on the [`EventBus`].

pub mod address;
pub mod authorizer;
pub mod clock;
pub mod error;
pub mod event_bus;
pub mod pause;
pub mod pool_entry;
pub mod pool_registry;
pub mod token;
pub mod vault;
pub mod vault_event;

pub use address::{Address, AddressParseError};
pub use authorizer::{Action, AllowAllAuthorizer, Authorizer, BasicAuthorizer};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ErrorKind, PauseError, RegistryError, VaultError};
pub use event_bus::EventBus;
pub use pause::{PauseState, PauseStatus};
pub use pool_entry::{PoolEntry, PoolSummary};
pub use pool_registry::PoolRegistry;
pub use token::TokenDescriptor;
pub use vault::{Vault, VaultSettings};
pub use vault_event::VaultEvent;
