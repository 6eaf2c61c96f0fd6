use dashmap::DashMap;
use ingot_primitives::Address;
use parking_lot::Mutex;
use std::{
    collections::BTreeMap,
    sync::Arc,
    time::{Duration, Instant},
};
use tracing::{debug, warn};

/// What the store decided about a reservation after a reported outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NonceDisposition {
    /// Keep the reservation and submit again with the same number.
    RetryWithSame,
    /// The reservation was removed; no higher reservation exists, so the
    /// number pool stays dense.
    RemovedOk,
    /// The reservation was removed and a higher reservation exists: a gap
    /// now sits below the committed frontier. Submissions above it will
    /// not commit until the gap is refilled.
    RemovedGapDetected,
    /// The reservation is retained because the chain performed work (and
    /// consumed the number) even though the call failed.
    NotRemovedGasSpent,
}

/// Per-sender reservation state. The value per number is the time of the
/// last recorded submission failure, if any.
#[derive(Default)]
struct SenderNonces {
    reserved: BTreeMap<u64, Option<Instant>>,
}

impl SenderNonces {
    /// Smallest number at or above `floor` that is not reserved.
    fn next_free(&self, floor: u64) -> u64 {
        let mut candidate = floor;
        for &reserved in self.reserved.keys().filter(|k| **k >= floor) {
            if reserved == candidate {
                candidate += 1;
            } else {
                break;
            }
        }
        candidate
    }

    fn has_higher(&self, n: u64) -> bool {
        self.reserved.keys().next_back().is_some_and(|highest| *highest > n)
    }
}

/// The concurrent sequence-number reservation store.
///
/// Each sender owns an independent record; a reservation's lifecycle is
/// reserve → (succeed | retain | release). Committed numbers are retained
/// so the reserved set stays a dense prefix; the only legitimate source of
/// a gap is [`NonceDisposition::RemovedGapDetected`], which is logged.
///
/// The critical section is one lock acquisition per operation, per
/// sender, so two concurrent `reserve` calls can never hand out the same
/// number. This in-memory store uses a coarse per-sender lock; a
/// networked implementation would need a compare-and-swap on its backing
/// store instead.
#[derive(Clone, Debug)]
pub struct NonceStore {
    senders: Arc<DashMap<Address, Arc<Mutex<SenderNonces>>>>,
    cooldown: Duration,
}

impl Default for NonceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SenderNonces {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SenderNonces").field("reserved", &self.reserved.len()).finish()
    }
}

/// How long a failed number keeps being retried before the store lets it
/// be removed.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(10);

impl NonceStore {
    /// A store with the default failure cool-down.
    pub fn new() -> Self {
        Self::with_cooldown(DEFAULT_COOLDOWN)
    }

    /// A store with a custom failure cool-down.
    pub fn with_cooldown(cooldown: Duration) -> Self {
        Self { senders: Arc::new(DashMap::new()), cooldown }
    }

    fn sender(&self, sender: Address) -> Arc<Mutex<SenderNonces>> {
        // locks the map shard briefly to clone the Arc
        Arc::clone(self.senders.entry(sender).or_default().value())
    }

    /// Reserves the smallest unreserved number for `sender`.
    pub fn reserve(&self, sender: Address) -> u64 {
        let entry = self.sender(sender);
        let mut guard = entry.lock();
        let n = guard.next_free(0);
        guard.reserved.insert(n, None);
        n
    }

    /// Marks `n` as committed to the chain. The reservation is retained;
    /// any failure record is cleared.
    pub fn on_success(&self, sender: Address, n: u64) {
        let entry = self.sender(sender);
        let mut guard = entry.lock();
        if let Some(failure) = guard.reserved.get_mut(&n) {
            *failure = None;
        }
    }

    /// Records a submission failure for `n` and decides its fate: retry
    /// while the cool-down window is open, release it afterwards.
    pub fn on_submission_failure(&self, sender: Address, n: u64) -> NonceDisposition {
        let entry = self.sender(sender);
        let mut guard = entry.lock();
        enum Fate {
            FirstFailure,
            WithinCooldown,
            Release,
            Unknown,
        }
        let fate = match guard.reserved.get(&n) {
            Some(None) => Fate::FirstFailure,
            Some(Some(first_failure)) if first_failure.elapsed() < self.cooldown => {
                Fate::WithinCooldown
            }
            Some(Some(_)) => Fate::Release,
            // not reserved here; classify as if it had just been removed
            None => Fate::Unknown,
        };
        match fate {
            Fate::FirstFailure => {
                guard.reserved.insert(n, Some(Instant::now()));
                NonceDisposition::RetryWithSame
            }
            Fate::WithinCooldown => NonceDisposition::RetryWithSame,
            Fate::Release => {
                guard.reserved.remove(&n);
                self.removal_disposition(&guard, sender, n)
            }
            Fate::Unknown => self.removal_disposition(&guard, sender, n),
        }
    }

    fn removal_disposition(
        &self,
        guard: &SenderNonces,
        sender: Address,
        n: u64,
    ) -> NonceDisposition {
        if guard.has_higher(n) {
            warn!(%sender, nonce = n, "released sequence number below the committed frontier, gap created");
            NonceDisposition::RemovedGapDetected
        } else {
            debug!(%sender, nonce = n, "released sequence number");
            NonceDisposition::RemovedOk
        }
    }

    /// Handles a "nonce too low" verdict: `n` is treated as committed and
    /// the smallest reservable number strictly above it is reserved and
    /// returned.
    pub fn on_nonce_too_low(&self, sender: Address, n: u64) -> u64 {
        let entry = self.sender(sender);
        let mut guard = entry.lock();
        if let Some(failure) = guard.reserved.get_mut(&n) {
            *failure = None;
        }
        let next = guard.next_free(n + 1);
        guard.reserved.insert(next, None);
        next
    }

    /// Handles a revert: chain work was performed and the number was
    /// consumed, so the reservation is retained.
    pub fn on_revert(&self, sender: Address, n: u64) -> NonceDisposition {
        self.retain_spent(sender, n)
    }

    /// Handles an out-of-gas failure: same retention rule as a revert.
    pub fn on_out_of_gas(&self, sender: Address, n: u64) -> NonceDisposition {
        self.retain_spent(sender, n)
    }

    fn retain_spent(&self, sender: Address, n: u64) -> NonceDisposition {
        let entry = self.sender(sender);
        let mut guard = entry.lock();
        if let Some(failure) = guard.reserved.get_mut(&n) {
            *failure = None;
        }
        NonceDisposition::NotRemovedGasSpent
    }

    /// Whether `n` is currently reserved for `sender`.
    pub fn is_reserved(&self, sender: Address, n: u64) -> bool {
        let entry = self.sender(sender);
        let guard = entry.lock();
        guard.reserved.contains_key(&n)
    }
}
