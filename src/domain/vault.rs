//! The vault: single source of truth for pools and the pause lifecycle.
//!
//! [`Vault`] composes the [`PoolRegistry`], the [`PauseState`], and a
//! shared [`Authorizer`]. Every mutating call runs the same gauntlet, and
//! the first failing check is the one reported:
//!
//! 1. reentrancy guard ([`VaultError::Reentrant`]),
//! 2. pause lifecycle ([`VaultError::VaultPaused`] or
//!    [`super::PauseError::PauseWindowExpired`]),
//! 3. authorization ([`VaultError::Unauthorized`]),
//! 4. registry validation ([`super::RegistryError`]).
//!
//! All ledger writes of one call happen under a single write-lock
//! acquisition after every check has passed, so a failed call leaves the
//! vault exactly as it was and emits no event.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration as StdDuration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use super::pool_entry::{PoolEntry, PoolSummary};
use super::pool_registry::DEFAULT_MAX_TOKENS_PER_POOL;
use super::{
    Action, Address, Authorizer, Clock, EventBus, PauseState, PauseStatus, PoolRegistry,
    SystemClock, TokenDescriptor, VaultError, VaultEvent,
};

/// Construction parameters for a [`Vault`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultSettings {
    /// The vault's own address; target of pause and authorizer actions.
    pub address: Address,
    /// Length of the window during which the vault can be paused.
    pub pause_window_duration: StdDuration,
    /// Length of the buffer period following the pause window.
    pub buffer_period_duration: StdDuration,
    /// Maximum number of tokens per pool.
    pub max_tokens_per_pool: usize,
}

impl VaultSettings {
    /// Creates settings with the default token limit.
    #[must_use]
    pub fn new(
        address: Address,
        pause_window_duration: StdDuration,
        buffer_period_duration: StdDuration,
    ) -> Self {
        Self {
            address,
            pause_window_duration,
            buffer_period_duration,
            max_tokens_per_pool: DEFAULT_MAX_TOKENS_PER_POOL,
        }
    }
}

/// State mutated by vault calls, guarded by one lock.
#[derive(Debug)]
struct Ledger {
    registry: PoolRegistry,
    pause: PauseState,
}

/// Releases the in-progress flag on every exit path.
#[derive(Debug)]
struct CallGuard<'a> {
    busy: &'a AtomicBool,
}

impl Drop for CallGuard<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// Central ledger coordinating pool registration and the pause lifecycle.
///
/// # Concurrency
///
/// Mutating calls are expected to be serialised by the caller. A mutating
/// call that arrives while another one is still in progress on the same
/// vault, including a callback from the authorizer, is rejected with
/// [`VaultError::Reentrant`] rather than queued. Queries never block on
/// the in-progress flag and always observe a fully applied state.
#[derive(Debug)]
pub struct Vault {
    address: Address,
    authorizer: RwLock<Arc<dyn Authorizer>>,
    clock: Arc<dyn Clock>,
    ledger: RwLock<Ledger>,
    busy: AtomicBool,
    event_bus: EventBus,
}

impl Vault {
    /// Creates a vault on the system clock with a random address.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Pause`] if either duration exceeds its maximum.
    pub fn new(
        authorizer: Arc<dyn Authorizer>,
        pause_window_duration: StdDuration,
        buffer_period_duration: StdDuration,
    ) -> Result<Self, VaultError> {
        Self::with_parts(
            authorizer,
            Arc::new(SystemClock),
            EventBus::default(),
            VaultSettings::new(
                Address::random(),
                pause_window_duration,
                buffer_period_duration,
            ),
        )
    }

    /// Creates a vault from explicit collaborators.
    ///
    /// The pause window starts at `clock.now()`.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Pause`] if either duration exceeds its maximum.
    pub fn with_parts(
        authorizer: Arc<dyn Authorizer>,
        clock: Arc<dyn Clock>,
        event_bus: EventBus,
        settings: VaultSettings,
    ) -> Result<Self, VaultError> {
        let pause = PauseState::new(
            clock.now(),
            settings.pause_window_duration,
            settings.buffer_period_duration,
        )?;
        let registry = PoolRegistry::with_max_tokens(settings.max_tokens_per_pool);

        tracing::debug!(
            vault = %settings.address,
            pause_window_end = %pause.pause_window_end(),
            buffer_period_end = %pause.buffer_period_end(),
            "vault created"
        );

        Ok(Self {
            address: settings.address,
            authorizer: RwLock::new(authorizer),
            clock,
            ledger: RwLock::new(Ledger { registry, pause }),
            busy: AtomicBool::new(false),
            event_bus,
        })
    }

    // ── Mutations ────────────────────────────────────────────────────────

    /// Registers `pool` with its tokens in canonical order.
    ///
    /// Emits [`VaultEvent::PoolRegistered`] on success.
    ///
    /// # Errors
    ///
    /// Returns, in order of precedence: [`VaultError::Reentrant`],
    /// [`VaultError::VaultPaused`], [`VaultError::Unauthorized`] (action
    /// [`Action::RegisterPool`] on `pool`), or a [`super::RegistryError`].
    pub fn register_pool(
        &self,
        caller: Address,
        pool: Address,
        name: &str,
        symbol: &str,
        factory: Address,
        tokens: Vec<TokenDescriptor>,
    ) -> Result<(), VaultError> {
        let _guard = self.enter()?;
        let now = self.clock.now();

        let result = self.ensure_operation_allowed(now).and_then(|()| {
            self.authorize(Action::RegisterPool, caller, pool)?;
            let entry = PoolEntry::new(
                pool,
                name.to_string(),
                symbol.to_string(),
                factory,
                tokens.clone(),
                now,
            );
            self.ledger.write().registry.register(entry)?;
            Ok(())
        });

        match result {
            Ok(()) => {
                tracing::info!(%pool, %factory, tokens = tokens.len(), "pool registered");
                self.event_bus.publish(VaultEvent::PoolRegistered {
                    pool,
                    factory,
                    tokens,
                    timestamp: now,
                });
                Ok(())
            }
            Err(e) => {
                tracing::debug!(%caller, %pool, error = %e, "pool registration rejected");
                Err(e)
            }
        }
    }

    /// Sets the manual pause flag.
    ///
    /// Emits [`VaultEvent::PausedStateChanged`] on success.
    ///
    /// # Errors
    ///
    /// Returns, in order of precedence: [`VaultError::Reentrant`],
    /// [`super::PauseError::PauseWindowExpired`], or [`VaultError::Unauthorized`]
    /// (action [`Action::Pause`] on the vault address).
    pub fn pause(&self, caller: Address) -> Result<(), VaultError> {
        self.set_paused(caller, true)
    }

    /// Clears the manual pause flag.
    ///
    /// Emits [`VaultEvent::PausedStateChanged`] on success.
    ///
    /// # Errors
    ///
    /// Returns, in order of precedence: [`VaultError::Reentrant`],
    /// [`super::PauseError::PauseWindowExpired`], or [`VaultError::Unauthorized`]
    /// (action [`Action::Unpause`] on the vault address).
    pub fn unpause(&self, caller: Address) -> Result<(), VaultError> {
        self.set_paused(caller, false)
    }

    /// Replaces the authorizer consulted by every later call.
    ///
    /// The current authorizer decides. Not gated by the pause state.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Reentrant`] or [`VaultError::Unauthorized`]
    /// (action [`Action::SetAuthorizer`] on the vault address).
    pub fn set_authorizer(
        &self,
        caller: Address,
        authorizer: Arc<dyn Authorizer>,
    ) -> Result<(), VaultError> {
        let _guard = self.enter()?;
        self.authorize(Action::SetAuthorizer, caller, self.address)?;
        *self.authorizer.write() = authorizer;

        tracing::info!(%caller, "authorizer changed");
        self.event_bus.publish(VaultEvent::AuthorizerChanged {
            timestamp: self.clock.now(),
        });
        Ok(())
    }

    fn set_paused(&self, caller: Address, paused: bool) -> Result<(), VaultError> {
        let _guard = self.enter()?;
        let now = self.clock.now();
        let action = if paused {
            Action::Pause
        } else {
            Action::Unpause
        };

        self.ledger.read().pause.ensure_window_open(now)?;
        self.authorize(action, caller, self.address)?;
        self.ledger.write().pause.set_paused(paused, now)?;

        tracing::info!(%caller, paused, "vault paused state changed");
        self.event_bus.publish(VaultEvent::PausedStateChanged {
            paused,
            timestamp: now,
        });
        Ok(())
    }

    // ── Queries ──────────────────────────────────────────────────────────

    /// Returns `true` if the pool has been registered.
    #[must_use]
    pub fn is_registered(&self, pool: Address) -> bool {
        self.ledger.read().registry.is_registered(pool)
    }

    /// Returns the pool's tokens in canonical order.
    ///
    /// # Errors
    ///
    /// Returns [`super::RegistryError::PoolNotRegistered`] if the pool is absent.
    pub fn tokens_of(&self, pool: Address) -> Result<Vec<TokenDescriptor>, VaultError> {
        Ok(self.ledger.read().registry.tokens_of(pool)?.to_vec())
    }

    /// Returns the full registry entry for a pool.
    ///
    /// # Errors
    ///
    /// Returns [`super::RegistryError::PoolNotRegistered`] if the pool is absent.
    pub fn pool(&self, pool: Address) -> Result<PoolEntry, VaultError> {
        Ok(self.ledger.read().registry.get(pool)?.clone())
    }

    /// Returns summaries of every registered pool in registration order.
    #[must_use]
    pub fn pools(&self) -> Vec<PoolSummary> {
        self.ledger.read().registry.list()
    }

    /// Returns the number of registered pools.
    #[must_use]
    pub fn pool_count(&self) -> usize {
        self.ledger.read().registry.len()
    }

    /// Returns the 18-decimal scaling factor of each of the pool's tokens.
    ///
    /// # Errors
    ///
    /// Returns [`super::RegistryError::PoolNotRegistered`] or
    /// [`super::RegistryError::UnsupportedDecimals`].
    pub fn scaling_factors(&self, pool: Address) -> Result<Vec<u128>, VaultError> {
        Ok(self.ledger.read().registry.scaling_factors(pool)?)
    }

    /// Derives the pause status at `now`.
    #[must_use]
    pub fn pause_status(&self, now: DateTime<Utc>) -> PauseStatus {
        self.ledger.read().pause.status_at(now)
    }

    /// Derives the pause status at the vault clock's current time.
    #[must_use]
    pub fn pause_status_now(&self) -> PauseStatus {
        self.pause_status(self.clock.now())
    }

    /// Returns a copy of the pause configuration and manual flag.
    #[must_use]
    pub fn pause_state(&self) -> PauseState {
        self.ledger.read().pause.clone()
    }

    /// Returns `true` unless a manual pause is in force right now.
    #[must_use]
    pub fn is_operation_allowed_now(&self) -> bool {
        self.ledger.read().pause.is_operation_allowed(self.clock.now())
    }

    /// The vault's own address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Current time according to the vault clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Returns the authorizer currently consulted.
    #[must_use]
    pub fn authorizer(&self) -> Arc<dyn Authorizer> {
        Arc::clone(&self.authorizer.read())
    }

    /// Returns the event bus the vault publishes to.
    #[must_use]
    pub const fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    // ── Checks ───────────────────────────────────────────────────────────

    fn enter(&self) -> Result<CallGuard<'_>, VaultError> {
        self.busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map_err(|_| VaultError::Reentrant)?;
        Ok(CallGuard { busy: &self.busy })
    }

    fn ensure_operation_allowed(&self, now: DateTime<Utc>) -> Result<(), VaultError> {
        if self.ledger.read().pause.is_operation_allowed(now) {
            Ok(())
        } else {
            Err(VaultError::VaultPaused)
        }
    }

    /// Consults the authorizer without holding any vault lock.
    fn authorize(&self, action: Action, caller: Address, target: Address) -> Result<(), VaultError> {
        let authorizer = self.authorizer();
        if authorizer.can_perform(action, caller, target) {
            Ok(())
        } else {
            Err(VaultError::Unauthorized { action, caller })
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::{OnceLock, Weak};

    use chrono::Duration;
    use parking_lot::Mutex;
    use tokio::sync::broadcast::error::TryRecvError;

    use super::*;
    use crate::domain::pause::MONTH;
    use crate::domain::{BasicAuthorizer, ManualClock, PauseError, RegistryError};

    const ADMIN: Address = Address::repeat_byte(0xad);
    const STRANGER: Address = Address::repeat_byte(0x5e);
    const FACTORY: Address = Address::repeat_byte(0xfa);
    const POOL_A: Address = Address::repeat_byte(0xa1);
    const POOL_B: Address = Address::repeat_byte(0xb1);
    const TOKEN_A: Address = Address::repeat_byte(0x0a);
    const TOKEN_B: Address = Address::repeat_byte(0x0b);
    const TOKEN_C: Address = Address::repeat_byte(0x0c);
    const VAULT: Address = Address::repeat_byte(0xba);

    struct Fixture {
        vault: Vault,
        clock: Arc<ManualClock>,
        auth: Arc<BasicAuthorizer>,
        start: DateTime<Utc>,
    }

    fn months(n: i64) -> Duration {
        Duration::days(30 * n)
    }

    fn make_fixture() -> Fixture {
        let start = Utc::now();
        let clock = Arc::new(ManualClock::new(start));
        let auth = Arc::new(BasicAuthorizer::new());
        auth.grant_all(ADMIN);

        let authorizer: Arc<dyn Authorizer> = Arc::<BasicAuthorizer>::clone(&auth);
        let vault_clock: Arc<dyn Clock> = Arc::<ManualClock>::clone(&clock);
        let Ok(vault) = Vault::with_parts(
            authorizer,
            vault_clock,
            EventBus::new(64),
            VaultSettings::new(VAULT, MONTH * 3, MONTH),
        ) else {
            panic!("valid settings");
        };
        Fixture {
            vault,
            clock,
            auth,
            start,
        }
    }

    fn three_tokens() -> Vec<TokenDescriptor> {
        vec![
            TokenDescriptor::new(TOKEN_A, 18),
            TokenDescriptor::new(TOKEN_B, 6),
            TokenDescriptor::new(TOKEN_C, 8),
        ]
    }

    fn register(vault: &Vault, caller: Address, pool: Address) -> Result<(), VaultError> {
        vault.register_pool(caller, pool, "Pool A", "POOLA", FACTORY, three_tokens())
    }

    #[test]
    fn register_pool_stores_tokens_and_emits_event() {
        let f = make_fixture();
        let mut rx = f.vault.event_bus().subscribe();

        assert!(register(&f.vault, ADMIN, POOL_A).is_ok());
        assert!(f.vault.is_registered(POOL_A));
        assert_eq!(f.vault.tokens_of(POOL_A), Ok(three_tokens()));

        let Ok(VaultEvent::PoolRegistered { pool, tokens, .. }) = rx.try_recv() else {
            panic!("expected pool registered event");
        };
        assert_eq!(pool, POOL_A);
        assert_eq!(tokens, three_tokens());
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn duplicate_registration_keeps_first_state() {
        let f = make_fixture();
        assert!(register(&f.vault, ADMIN, POOL_A).is_ok());
        let before = f.vault.pool(POOL_A);
        let mut rx = f.vault.event_bus().subscribe();

        let second = f.vault.register_pool(
            ADMIN,
            POOL_A,
            "Other",
            "OTHER",
            FACTORY,
            vec![
                TokenDescriptor::new(TOKEN_A, 18),
                TokenDescriptor::new(TOKEN_B, 6),
            ],
        );
        assert_eq!(
            second,
            Err(VaultError::Registry(RegistryError::PoolAlreadyRegistered(
                POOL_A
            )))
        );
        assert_eq!(f.vault.pool(POOL_A), before);
        assert_eq!(f.vault.pool_count(), 1);
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn unauthorized_registration_leaves_pool_absent() {
        let f = make_fixture();
        let mut rx = f.vault.event_bus().subscribe();

        assert_eq!(
            register(&f.vault, STRANGER, POOL_A),
            Err(VaultError::Unauthorized {
                action: Action::RegisterPool,
                caller: STRANGER,
            })
        );
        assert!(!f.vault.is_registered(POOL_A));
        assert!(f.vault.pools().is_empty());
        assert_eq!(
            f.vault.tokens_of(POOL_A),
            Err(VaultError::Registry(RegistryError::PoolNotRegistered(POOL_A)))
        );
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn pool_specific_grant_is_enough() {
        let f = make_fixture();
        f.auth
            .grant_role_for(Action::RegisterPool, STRANGER, POOL_B);
        assert!(register(&f.vault, STRANGER, POOL_A).is_err());
        assert!(register(&f.vault, STRANGER, POOL_B).is_ok());
    }

    #[test]
    fn authorization_checked_before_registry_validation() {
        let f = make_fixture();
        let result = f.vault.register_pool(
            STRANGER,
            POOL_A,
            "Bad",
            "BAD",
            FACTORY,
            vec![TokenDescriptor::new(TOKEN_A, 18)],
        );
        assert!(matches!(result, Err(VaultError::Unauthorized { .. })));
    }

    #[test]
    fn paused_vault_rejects_registration_before_authorization() {
        let f = make_fixture();
        assert!(f.vault.pause(ADMIN).is_ok());

        assert_eq!(register(&f.vault, ADMIN, POOL_A), Err(VaultError::VaultPaused));
        assert_eq!(
            register(&f.vault, STRANGER, POOL_A),
            Err(VaultError::VaultPaused)
        );
        assert!(!f.vault.is_registered(POOL_A));

        assert!(f.vault.unpause(ADMIN).is_ok());
        assert!(register(&f.vault, ADMIN, POOL_A).is_ok());
    }

    #[test]
    fn queries_available_while_paused() {
        let f = make_fixture();
        assert!(register(&f.vault, ADMIN, POOL_A).is_ok());
        assert!(f.vault.pause(ADMIN).is_ok());

        assert!(f.vault.is_registered(POOL_A));
        assert_eq!(f.vault.tokens_of(POOL_A), Ok(three_tokens()));
        assert_eq!(f.vault.pause_status_now(), PauseStatus::Paused);
        assert!(!f.vault.is_operation_allowed_now());
    }

    #[test]
    fn pause_window_boundaries() {
        let f = make_fixture();
        let t0 = f.start;

        f.clock.set(t0 + months(2));
        assert!(f.vault.pause(ADMIN).is_ok());
        assert_eq!(f.vault.pause_status_now(), PauseStatus::Paused);

        f.clock.set(t0 + months(3));
        assert_eq!(
            f.vault.pause(ADMIN),
            Err(VaultError::Pause(PauseError::PauseWindowExpired))
        );
        assert_eq!(
            f.vault.unpause(ADMIN),
            Err(VaultError::Pause(PauseError::PauseWindowExpired))
        );

        let mid_buffer = t0 + months(3) + Duration::days(15);
        assert_eq!(f.vault.pause_status(mid_buffer), PauseStatus::BufferPeriod);

        for later in [months(4), months(5), months(40)] {
            assert_eq!(
                f.vault.pause_status(t0 + later),
                PauseStatus::PermanentlyUnpaused
            );
        }
    }

    #[test]
    fn pause_left_set_blocks_registration_until_buffer_end() {
        let f = make_fixture();
        assert!(f.vault.pause(ADMIN).is_ok());

        f.clock.advance(months(3) + Duration::days(1));
        assert_eq!(f.vault.pause_status_now(), PauseStatus::BufferPeriod);
        assert!(!f.vault.is_operation_allowed_now());
        assert_eq!(register(&f.vault, ADMIN, POOL_A), Err(VaultError::VaultPaused));
        assert!(f.vault.unpause(ADMIN).is_err());

        f.clock.advance(months(1));
        assert_eq!(f.vault.pause_status_now(), PauseStatus::PermanentlyUnpaused);
        assert!(f.vault.is_operation_allowed_now());
        assert!(register(&f.vault, ADMIN, POOL_A).is_ok());
    }

    #[test]
    fn pause_requires_authorization_after_window_check() {
        let f = make_fixture();
        assert_eq!(
            f.vault.pause(STRANGER),
            Err(VaultError::Unauthorized {
                action: Action::Pause,
                caller: STRANGER,
            })
        );
        assert_eq!(f.vault.pause_status_now(), PauseStatus::Active);

        f.clock.advance(months(3));
        assert_eq!(
            f.vault.pause(STRANGER),
            Err(VaultError::Pause(PauseError::PauseWindowExpired))
        );
    }

    #[test]
    fn pause_targets_vault_address() {
        let f = make_fixture();
        f.auth.grant_role_for(Action::Pause, STRANGER, VAULT);
        assert!(f.vault.pause(STRANGER).is_ok());
        assert!(matches!(
            f.vault.unpause(STRANGER),
            Err(VaultError::Unauthorized {
                action: Action::Unpause,
                ..
            })
        ));
    }

    #[test]
    fn pause_and_unpause_emit_events() {
        let f = make_fixture();
        let mut rx = f.vault.event_bus().subscribe();

        assert!(f.vault.pause(ADMIN).is_ok());
        assert!(f.vault.unpause(ADMIN).is_ok());

        let Ok(VaultEvent::PausedStateChanged { paused: first, .. }) = rx.try_recv() else {
            panic!("expected pause event");
        };
        let Ok(VaultEvent::PausedStateChanged { paused: second, .. }) = rx.try_recv() else {
            panic!("expected unpause event");
        };
        assert!(first);
        assert!(!second);
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[derive(Debug, Default)]
    struct ReentrantAuthorizer {
        vault: OnceLock<Weak<Vault>>,
        inner: Mutex<Option<Result<(), VaultError>>>,
    }

    impl Authorizer for ReentrantAuthorizer {
        fn can_perform(&self, _action: Action, caller: Address, _target: Address) -> bool {
            if let Some(vault) = self.vault.get().and_then(Weak::upgrade) {
                let mut inner = self.inner.lock();
                if inner.is_none() {
                    *inner = Some(vault.pause(caller));
                }
            }
            true
        }
    }

    #[test]
    fn reentrant_call_is_rejected_and_guard_released() {
        let auth = Arc::new(ReentrantAuthorizer::default());
        let authorizer: Arc<dyn Authorizer> = Arc::<ReentrantAuthorizer>::clone(&auth);
        let Ok(vault) = Vault::new(authorizer, MONTH * 3, MONTH) else {
            panic!("valid durations");
        };
        let vault = Arc::new(vault);
        if auth.vault.set(Arc::downgrade(&vault)).is_err() {
            panic!("vault set once");
        }

        assert!(register(&vault, ADMIN, POOL_A).is_ok());
        assert_eq!(*auth.inner.lock(), Some(Err(VaultError::Reentrant)));
        assert_eq!(vault.pause_status_now(), PauseStatus::Active);

        // Guard is released: a fresh outer call goes through.
        assert!(vault.pause(ADMIN).is_ok());
    }

    #[test]
    fn guard_released_after_failed_call() {
        let f = make_fixture();
        assert!(register(&f.vault, STRANGER, POOL_A).is_err());
        assert!(register(&f.vault, ADMIN, POOL_A).is_ok());
    }

    #[test]
    fn set_authorizer_requires_permission_and_swaps_policy() {
        let f = make_fixture();
        let replacement = Arc::new(BasicAuthorizer::new());
        replacement.grant_role(Action::RegisterPool, STRANGER);

        let candidate: Arc<dyn Authorizer> = Arc::<BasicAuthorizer>::clone(&replacement);
        assert!(matches!(
            f.vault.set_authorizer(STRANGER, Arc::clone(&candidate)),
            Err(VaultError::Unauthorized {
                action: Action::SetAuthorizer,
                ..
            })
        ));

        // Admin flows stay available while paused.
        assert!(f.vault.pause(ADMIN).is_ok());
        let mut rx = f.vault.event_bus().subscribe();
        assert!(f.vault.set_authorizer(ADMIN, candidate).is_ok());
        assert!(matches!(
            rx.try_recv(),
            Ok(VaultEvent::AuthorizerChanged { .. })
        ));

        // The old admin is unknown to the new policy.
        assert!(matches!(
            f.vault.unpause(ADMIN),
            Err(VaultError::Unauthorized { .. })
        ));
    }

    #[test]
    fn new_uses_random_address_and_system_clock() {
        let authorizer: Arc<dyn Authorizer> = Arc::new(BasicAuthorizer::new());
        let Ok(vault) = Vault::new(authorizer, MONTH * 3, MONTH) else {
            panic!("valid durations");
        };
        assert!(!vault.address().is_zero());
        assert_eq!(vault.pause_status_now(), PauseStatus::Active);
        let state = vault.pause_state();
        assert!(state.pause_window_end() > Utc::now());
    }

    #[test]
    fn oversized_durations_rejected_at_construction() {
        let authorizer: Arc<dyn Authorizer> = Arc::new(BasicAuthorizer::new());
        let result = Vault::new(authorizer, MONTH * 12, MONTH);
        assert!(matches!(
            result,
            Err(VaultError::Pause(PauseError::PauseWindowTooLong { .. }))
        ));
    }
}
