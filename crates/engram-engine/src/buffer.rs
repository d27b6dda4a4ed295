// SPDX-FileCopyrightText: 2026 Engram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bounded, time-decaying holding area for raw observations.
//!
//! The buffer bridges "just observed" and "durably distilled". It is
//! deliberately lossy under sustained overload: inserting beyond
//! capacity silently evicts the oldest not-yet-consolidated entry.
//!
//! All operations serialize through one mutex per buffer instance, since
//! `add` races with the periodic consolidation task. `snapshot` and
//! `clear` stay available as separate steps for callers that want to
//! retry distillation without losing data; `snapshot_and_clear` takes
//! the lock once so no concurrent `add` can slip between the two.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};
use engram_core::{Clock, Observation};

struct BufferEntry {
    captured_at: DateTime<Utc>,
    observation: Observation,
}

/// Capacity- and TTL-bounded FIFO of observations.
pub struct SensoryBuffer {
    entries: Mutex<VecDeque<BufferEntry>>,
    capacity: usize,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl SensoryBuffer {
    pub fn new(capacity: usize, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            ttl,
            clock,
        }
    }

    // Entries stay structurally valid across a panicking holder, so a
    // poisoned lock is recoverable.
    fn lock(&self) -> MutexGuard<'_, VecDeque<BufferEntry>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Append an observation, evicting the oldest entries if capacity is
    /// exceeded. Always succeeds.
    pub fn add(&self, observation: Observation) {
        let mut entries = self.lock();
        entries.push_back(BufferEntry {
            captured_at: self.clock.now(),
            observation,
        });
        while entries.len() > self.capacity {
            entries.pop_front();
        }
    }

    /// Purge expired entries, then return the remaining observations in
    /// insertion order. Does NOT clear the buffer.
    pub fn snapshot(&self) -> Vec<Observation> {
        let mut entries = self.lock();
        purge_expired(&mut entries, self.clock.now() - self.ttl);
        entries.iter().map(|e| e.observation.clone()).collect()
    }

    /// Remove all entries unconditionally.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Atomic snapshot-then-clear under a single lock acquisition, so a
    /// concurrent `add` lands either in the returned snapshot or in the
    /// buffer afterwards, never in neither.
    pub fn snapshot_and_clear(&self) -> Vec<Observation> {
        let mut entries = self.lock();
        purge_expired(&mut entries, self.clock.now() - self.ttl);
        entries.drain(..).map(|e| e.observation).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

// An entry captured exactly TTL ago is already expired.
fn purge_expired(entries: &mut VecDeque<BufferEntry>, cutoff: DateTime<Utc>) {
    entries.retain(|e| e.captured_at > cutoff);
}
