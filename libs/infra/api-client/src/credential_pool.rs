// [libs/infra/api-client/src/credential_pool.rs]
//! =================================================================
//! APARATO: CREDENTIAL POOL
//! RESPONSABILIDAD: ARRENDAMIENTO ROTATIVO DE CLAVES CON PRESUPUESTO RPM
//! =================================================================
//!
//! One instance per pool kind (main/tournament, spec §4.1). A single
//! mutex guards both the round-robin cursor and every credential's sliding
//! window, matching spec §5's "guarded by a single mutex covering both the
//! round-robin pointer and the per-credential time windows." No failure
//! here is fatal: the caller decides whether to retry or give up: this
//! pool only ever blocks or hands out a lease.

use std::collections::VecDeque;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use tokio::sync::Mutex;
use tokio::time::sleep;

use skirmish_domain_models::CredentialSpec;

const WINDOW_SECONDS: i64 = 60;
const MAX_BACKOFF_SECONDS: i64 = 64;

struct CredentialState {
    secret: String,
    rpm_limit: u32,
    dispatch_window: VecDeque<DateTime<Utc>>,
    backoff_until: Option<DateTime<Utc>>,
    consecutive_throttles: u32,
}

impl CredentialState {
    fn new(spec: CredentialSpec) -> Self {
        Self {
            secret: spec.secret,
            rpm_limit: spec.rpm_limit.max(1),
            dispatch_window: VecDeque::with_capacity(spec.rpm_limit as usize),
            backoff_until: None,
            consecutive_throttles: 0,
        }
    }

    /// Spec §4.1 availability rule: fewer than `rpm_limit` entries in the
    /// window, or the oldest entry is more than 60s old.
    fn available_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        if let Some(until) = self.backoff_until {
            if until > now {
                return Some(until);
            }
        }

        if (self.dispatch_window.len() as u32) < self.rpm_limit {
            return None;
        }

        match self.dispatch_window.front() {
            Some(oldest) => {
                let age = now - *oldest;
                if age >= Duration::seconds(WINDOW_SECONDS) {
                    None
                } else {
                    Some(*oldest + Duration::seconds(WINDOW_SECONDS))
                }
            }
            None => None,
        }
    }

    fn prune_window(&mut self, now: DateTime<Utc>) {
        while let Some(oldest) = self.dispatch_window.front() {
            if now - *oldest >= Duration::seconds(WINDOW_SECONDS) {
                self.dispatch_window.pop_front();
            } else {
                break;
            }
        }
    }
}

struct PoolInner {
    credentials: Vec<CredentialState>,
    next_index: usize,
}

/// A usable-once handle into the pool. Dropping it without calling either
/// `record_request` or `record_throttled` is harmless: the credential
/// simply was never marked dispatched.
pub struct CredentialLease {
    pub secret: String,
    index: usize,
}

pub struct CredentialPool {
    inner: Mutex<PoolInner>,
}

impl CredentialPool {
    pub fn new(specs: Vec<CredentialSpec>) -> Self {
        assert!(!specs.is_empty(), "a credential pool needs at least one key");
        Self {
            inner: Mutex::new(PoolInner {
                credentials: specs.into_iter().map(CredentialState::new).collect(),
                next_index: 0,
            }),
        }
    }

    /// Blocks until a credential is available, then returns it. Scans
    /// round-robin from the last-leased index; if nothing is free, sleeps
    /// until the earliest predicted availability across the whole pool.
    pub async fn lease(&self) -> CredentialLease {
        loop {
            let wait_until = {
                let mut guard = self.inner.lock().await;
                let now = Utc::now();
                let len = guard.credentials.len();
                let start = guard.next_index;

                let mut earliest_wait: Option<DateTime<Utc>> = None;
                for offset in 0..len {
                    let idx = (start + offset) % len;
                    guard.credentials[idx].prune_window(now);
                    match guard.credentials[idx].available_at(now) {
                        None => {
                            guard.next_index = (idx + 1) % len;
                            let secret = guard.credentials[idx].secret.clone();
                            return CredentialLease { secret, index: idx };
                        }
                        Some(at) => {
                            earliest_wait = Some(match earliest_wait {
                                Some(current) if current <= at => current,
                                _ => at,
                            });
                        }
                    }
                }

                earliest_wait.unwrap_or(now)
            };

            let now = Utc::now();
            if wait_until > now {
                let wait = (wait_until - now)
                    .to_std()
                    .unwrap_or(StdDuration::from_millis(50));
                sleep(wait).await;
            } else {
                sleep(StdDuration::from_millis(50)).await;
            }
        }
    }

    /// Called immediately after the HTTP request is dispatched (spec §4.1):
    /// the sliding window counts every dispatch, including ones that later
    /// turn out to have been throttled (§14 open-question decision).
    pub async fn record_request(&self, lease: &CredentialLease, at: DateTime<Utc>) {
        let mut guard = self.inner.lock().await;
        if let Some(state) = guard.credentials.get_mut(lease.index) {
            state.dispatch_window.push_back(at);
            state.consecutive_throttles = 0;
        }
    }

    /// Applies `min(2^n, 64)s` exponential backoff with small jitter on a
    /// throttled (HTTP 429) response (spec §4.1).
    pub async fn record_throttled(&self, lease: &CredentialLease) {
        let mut guard = self.inner.lock().await;
        if let Some(state) = guard.credentials.get_mut(lease.index) {
            state.consecutive_throttles += 1;
            let exponent = state.consecutive_throttles.min(6);
            let base_seconds = (1i64 << exponent).min(MAX_BACKOFF_SECONDS);
            let jitter_ms = rand::thread_rng().gen_range(0..500);
            state.backoff_until =
                Some(Utc::now() + Duration::seconds(base_seconds) + Duration::milliseconds(jitter_ms));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(secret: &str, rpm: u32) -> CredentialSpec {
        CredentialSpec {
            secret: secret.to_string(),
            rpm_limit: rpm,
        }
    }

    #[tokio::test]
    async fn leases_round_robin_across_credentials() {
        let pool = CredentialPool::new(vec![spec("a", 100), spec("b", 100)]);
        let first = pool.lease().await;
        pool.record_request(&first, Utc::now()).await;
        let second = pool.lease().await;
        pool.record_request(&second, Utc::now()).await;
        assert_ne!(first.secret, second.secret);
    }

    #[tokio::test]
    async fn respects_rpm_limit_within_sliding_window() {
        let pool = CredentialPool::new(vec![spec("only", 2)]);
        let l1 = pool.lease().await;
        pool.record_request(&l1, Utc::now()).await;
        let l2 = pool.lease().await;
        pool.record_request(&l2, Utc::now()).await;

        // Third lease must block until the window frees up; we don't wait
        // out the full 60s here, we just assert it would not return
        // instantly by checking the window is indeed full.
        let guard = pool.inner.lock().await;
        assert_eq!(guard.credentials[0].dispatch_window.len(), 2);
    }

    #[tokio::test]
    async fn throttled_credential_backs_off() {
        let pool = CredentialPool::new(vec![spec("only", 100)]);
        let lease = pool.lease().await;
        pool.record_throttled(&lease).await;
        let guard = pool.inner.lock().await;
        assert!(guard.credentials[0].backoff_until.unwrap() > Utc::now());
    }
}
