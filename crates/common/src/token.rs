//! Connection token store
//!
//! Maps opaque token ids to the address and password of a bridged VNC
//! session. Entries expire after a fixed TTL and are swept lazily whenever
//! the store is touched; there is no background reaper.

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

use crate::types::{ConnectionToken, Credentials, TokenId};
use crate::{Error, Result};

/// Default token lifetime in seconds (24h)
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Issue/redeem interface used by the web handlers
pub trait TokenStore: Send + Sync {
    /// Store credentials under a fresh id.
    fn issue(&self, target_address: &str, password: &str) -> ConnectionToken;

    /// Look up credentials, sweeping expired entries first.
    fn redeem(&self, token: &str) -> Result<Credentials>;

    /// Remove expired entries, returning how many were dropped.
    fn sweep(&self) -> usize;
}

/// Process-local token store
pub struct InMemoryTokenStore<C: Clock = SystemClock> {
    entries: Mutex<HashMap<TokenId, ConnectionToken>>,
    ttl: Duration,
    clock: C,
}

impl InMemoryTokenStore<SystemClock> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, SystemClock)
    }
}

impl Default for InMemoryTokenStore<SystemClock> {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_TOKEN_TTL_SECS))
    }
}

impl<C: Clock> InMemoryTokenStore<C> {
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of live (not yet swept) entries
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn sweep_locked(entries: &mut HashMap<TokenId, ConnectionToken>, now: DateTime<Utc>) -> usize {
        let before = entries.len();
        entries.retain(|_, token| !token.is_expired_at(now));
        before - entries.len()
    }
}

impl<C: Clock> TokenStore for InMemoryTokenStore<C> {
    fn issue(&self, target_address: &str, password: &str) -> ConnectionToken {
        let now = self.clock.now();
        let mut entries = self.entries.lock();

        // v4 collisions are not a practical concern, but never overwrite a live entry
        let mut id = Uuid::new_v4().to_string();
        while entries.contains_key(&id) {
            id = Uuid::new_v4().to_string();
        }

        let token = ConnectionToken {
            id: id.clone(),
            target_address: target_address.to_string(),
            password: password.to_string(),
            expires_at: expiry_after(now, self.ttl),
        };
        entries.insert(id, token.clone());

        let swept = Self::sweep_locked(&mut entries, now);
        if swept > 0 {
            debug!("Swept {} expired tokens", swept);
        }

        token
    }

    fn redeem(&self, token: &str) -> Result<Credentials> {
        let now = self.clock.now();
        let mut entries = self.entries.lock();

        let swept = Self::sweep_locked(&mut entries, now);
        if swept > 0 {
            debug!("Swept {} expired tokens", swept);
        }

        entries
            .get(token)
            .map(ConnectionToken::credentials)
            .ok_or(Error::TokenNotFound)
    }

    fn sweep(&self) -> usize {
        let now = self.clock.now();
        Self::sweep_locked(&mut self.entries.lock(), now)
    }
}

/// `now + ttl`, saturating at the latest representable instant
pub fn expiry_after(now: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

impl<T: Clock> Clock for std::sync::Arc<T> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
