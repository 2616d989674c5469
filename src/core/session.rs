//! Per-user pending requests between the upload and the top-N reply.

use crate::core::Candidate;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub candidates: Vec<Candidate>,
    pub stored_at: DateTime<Utc>,
}

/// One pending request per user. Entries older than the TTL count as absent.
#[derive(Debug)]
pub struct SessionStore {
    ttl: Option<Duration>,
    pending: Mutex<HashMap<i64, PendingRequest>>,
}

impl SessionStore {
    /// `ttl_secs == 0` disables expiry.
    pub fn new(ttl_secs: u64) -> Self {
        let ttl = (ttl_secs > 0)
            .then(|| i64::try_from(ttl_secs).ok().and_then(Duration::try_seconds))
            .flatten();
        Self {
            ttl,
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Replaces any earlier request from the same user.
    pub fn insert(&self, user_id: i64, candidates: Vec<Candidate>, now: DateTime<Utc>) {
        let replaced = self.lock().insert(
            user_id,
            PendingRequest {
                candidates,
                stored_at: now,
            },
        );
        if replaced.is_some() {
            tracing::debug!("Replaced pending request for user {}", user_id);
        }
    }

    /// Removes and returns the user's request if it is still live.
    pub fn take(&self, user_id: i64, now: DateTime<Utc>) -> Option<Vec<Candidate>> {
        let request = self.lock().remove(&user_id)?;
        if self.is_expired(&request, now) {
            tracing::debug!("Pending request for user {} expired", user_id);
            return None;
        }
        Some(request.candidates)
    }

    pub fn contains(&self, user_id: i64, now: DateTime<Utc>) -> bool {
        self.lock()
            .get(&user_id)
            .is_some_and(|request| !self.is_expired(request, now))
    }

    /// Drops expired entries, returning how many were removed.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut pending = self.lock();
        let before = pending.len();
        pending.retain(|_, request| !self.is_expired(request, now));
        before - pending.len()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_expired(&self, request: &PendingRequest, now: DateTime<Utc>) -> bool {
        self.ttl
            .is_some_and(|ttl| now.signed_duration_since(request.stored_at) > ttl)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<i64, PendingRequest>> {
        // 無跨 await 持有鎖，poison 時沿用內部資料
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
