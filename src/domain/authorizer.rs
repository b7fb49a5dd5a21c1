//! Capability-based authorization.
//!
//! The vault never decides who may do what; it asks an [`Authorizer`]
//! whether `caller` may perform an [`Action`] on a `target`. The
//! authorizer is shared by reference and never mutated by the vault.

use std::collections::HashSet;
use std::fmt;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::Address;

/// Privileged actions guarded by the authorizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Register a pool (target: the pool).
    RegisterPool,
    /// Pause the vault (target: the vault).
    Pause,
    /// Unpause the vault (target: the vault).
    Unpause,
    /// Replace the vault's authorizer (target: the vault).
    SetAuthorizer,
}

impl Action {
    /// Every action, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::RegisterPool,
        Self::Pause,
        Self::Unpause,
        Self::SetAuthorizer,
    ];

    /// Returns the action as a static string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RegisterPool => "register_pool",
            Self::Pause => "pause",
            Self::Unpause => "unpause",
            Self::SetAuthorizer => "set_authorizer",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Answers "may `caller` perform `action` on `target`?".
///
/// Implementations must give the same answer for the same inputs as long
/// as their own policy does not change.
pub trait Authorizer: Send + Sync + fmt::Debug {
    /// Returns `true` if the action is permitted.
    fn can_perform(&self, action: Action, caller: Address, target: Address) -> bool;
}

/// Grants every request. Intended for local development only.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAllAuthorizer;

impl Authorizer for AllowAllAuthorizer {
    fn can_perform(&self, _action: Action, _caller: Address, _target: Address) -> bool {
        true
    }
}

/// In-memory role table.
///
/// Roles are granted either globally (any target) or for one specific
/// target. A request is allowed if either kind of grant matches.
#[derive(Debug, Default)]
pub struct BasicAuthorizer {
    global: RwLock<HashSet<(Action, Address)>>,
    specific: RwLock<HashSet<(Action, Address, Address)>>,
}

impl BasicAuthorizer {
    /// Creates an authorizer with no grants.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allows `account` to perform `action` on any target.
    pub fn grant_role(&self, action: Action, account: Address) {
        self.global.write().insert((action, account));
    }

    /// Allows `account` to perform `action` on `target` only.
    pub fn grant_role_for(&self, action: Action, account: Address, target: Address) {
        self.specific.write().insert((action, account, target));
    }

    /// Allows `account` every action on any target.
    pub fn grant_all(&self, account: Address) {
        let mut global = self.global.write();
        for action in Action::ALL {
            global.insert((action, account));
        }
    }

    /// Removes a global grant. Target-specific grants are untouched.
    pub fn revoke_role(&self, action: Action, account: Address) {
        self.global.write().remove(&(action, account));
    }

    /// Removes a target-specific grant.
    pub fn revoke_role_for(&self, action: Action, account: Address, target: Address) {
        self.specific.write().remove(&(action, account, target));
    }
}

impl Authorizer for BasicAuthorizer {
    fn can_perform(&self, action: Action, caller: Address, target: Address) -> bool {
        self.global.read().contains(&(action, caller))
            || self.specific.read().contains(&(action, caller, target))
    }
}
