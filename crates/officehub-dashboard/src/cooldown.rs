//! Per-identity, per-surface manual refresh cooldown.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;

use officehub_core::types::{CommunityId, MemberId};

/// Tracks the last accepted manual refresh per (identity, surface).
///
/// Entries are never purged; expiry is checked lazily on the next attempt.
#[derive(Debug)]
pub struct CooldownTracker {
    /// Minimum gap between accepted refreshes.
    window: Duration,
    /// Last accepted instant per key.
    last_accepted: Mutex<HashMap<(MemberId, CommunityId), Instant>>,
}

impl CooldownTracker {
    /// Create a tracker with the given window in seconds.
    pub fn new(window_seconds: u64) -> Self {
        Self {
            window: Duration::from_secs(window_seconds),
            last_accepted: Mutex::new(HashMap::new()),
        }
    }

    /// Accept the attempt and record it, or return the whole seconds left
    /// (rounded up) before the next attempt will be accepted.
    pub fn try_acquire(&self, identity: &MemberId, surface: CommunityId) -> Result<(), u64> {
        let mut map = self.last_accepted.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();
        let key = (identity.clone(), surface);

        if let Some(last) = map.get(&key) {
            let elapsed = now.duration_since(*last);
            if elapsed < self.window {
                let remaining = self.window - elapsed;
                let secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
                return Err(secs.max(1));
            }
        }

        map.insert(key, now);
        Ok(())
    }

    /// Forget an accepted attempt whose refresh was never queued.
    pub fn release(&self, identity: &MemberId, surface: CommunityId) {
        let mut map = self.last_accepted.lock().unwrap_or_else(|e| e.into_inner());
        map.remove(&(identity.clone(), surface));
    }
}
