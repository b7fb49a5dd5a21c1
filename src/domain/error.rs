//! Vault error taxonomy.
//!
//! [`RegistryError`] and [`PauseError`] are raised by the component that
//! detects them; [`VaultError`] is the aggregate returned at the vault
//! boundary, together with the authorization, lifecycle, and concurrency
//! failures the façade itself detects.

use serde::Serialize;

use super::{Action, Address};

/// Broad failure category, used by callers to decide what to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Caller must change its input.
    Validation,
    /// Caller lacks rights for the action.
    Authorization,
    /// The vault's pause lifecycle forbids the call.
    Lifecycle,
    /// Another mutating call is in progress on the same vault.
    Concurrency,
}

/// Errors raised by [`super::PoolRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The pool is already registered.
    #[error("pool {0} is already registered")]
    PoolAlreadyRegistered(Address),

    /// The pool has never been registered.
    #[error("pool {0} is not registered")]
    PoolNotRegistered(Address),

    /// Fewer than two tokens were supplied.
    #[error("pool needs at least 2 tokens, got {count}")]
    TooFewTokens {
        /// Number of tokens supplied.
        count: usize,
    },

    /// More tokens than the registry accepts per pool.
    #[error("pool accepts at most {max} tokens, got {count}")]
    TooManyTokens {
        /// Number of tokens supplied.
        count: usize,
        /// Configured maximum.
        max: usize,
    },

    /// A token address is the zero address.
    #[error("token at index {index} has the zero address")]
    InvalidToken {
        /// Position of the offending token.
        index: usize,
    },

    /// The same token address appears more than once.
    #[error("token {0} appears more than once")]
    DuplicateToken(Address),

    /// A token's decimals exceed the 18-decimal normalisation.
    #[error("token {token} has unsupported decimals {decimals}")]
    UnsupportedDecimals {
        /// Token address.
        token: Address,
        /// Declared decimals.
        decimals: u8,
    },
}

/// Errors raised by [`super::PauseState`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PauseError {
    /// Pause or unpause attempted at or after the pause window end.
    #[error("pause window has expired")]
    PauseWindowExpired,

    /// Configured pause window exceeds the allowed maximum.
    #[error("pause window of {requested_secs}s exceeds maximum of {max_secs}s")]
    PauseWindowTooLong {
        /// Requested duration in seconds.
        requested_secs: u64,
        /// Maximum duration in seconds.
        max_secs: u64,
    },

    /// Configured buffer period exceeds the allowed maximum.
    #[error("buffer period of {requested_secs}s exceeds maximum of {max_secs}s")]
    BufferPeriodTooLong {
        /// Requested duration in seconds.
        requested_secs: u64,
        /// Maximum duration in seconds.
        max_secs: u64,
    },
}

/// Error surface of every [`super::Vault`] operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VaultError {
    /// Pool registry validation or lookup failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Pause lifecycle rejected the call.
    #[error(transparent)]
    Pause(#[from] PauseError),

    /// The authorizer denied the action.
    #[error("{caller} is not authorized to {action}")]
    Unauthorized {
        /// Requested action.
        action: Action,
        /// Calling account.
        caller: Address,
    },

    /// The vault is manually paused inside its pause window.
    #[error("vault is paused")]
    VaultPaused,

    /// A mutating call re-entered the vault before the previous one finished.
    #[error("reentrant call rejected")]
    Reentrant,
}

impl VaultError {
    /// Returns the failure category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Registry(_) => ErrorKind::Validation,
            Self::Pause(PauseError::PauseWindowExpired) | Self::VaultPaused => ErrorKind::Lifecycle,
            Self::Pause(_) => ErrorKind::Validation,
            Self::Unauthorized { .. } => ErrorKind::Authorization,
            Self::Reentrant => ErrorKind::Concurrency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        let pool = Address::repeat_byte(1);
        assert_eq!(
            VaultError::from(RegistryError::PoolNotRegistered(pool)).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            VaultError::from(PauseError::PauseWindowExpired).kind(),
            ErrorKind::Lifecycle
        );
        assert_eq!(VaultError::VaultPaused.kind(), ErrorKind::Lifecycle);
        assert_eq!(
            VaultError::Unauthorized {
                action: Action::Pause,
                caller: pool,
            }
            .kind(),
            ErrorKind::Authorization
        );
        assert_eq!(VaultError::Reentrant.kind(), ErrorKind::Concurrency);
    }

    #[test]
    fn registry_message_is_transparent() {
        let pool = Address::repeat_byte(2);
        let err = VaultError::from(RegistryError::PoolAlreadyRegistered(pool));
        assert_eq!(err.to_string(), format!("pool {pool} is already registered"));
    }
}
