//! Deferred events keyed by simulation epoch
//!
//! Spawn warnings and countdown steps fire later on the host clock. Each event
//! remembers the epoch it was scheduled in; resets bump the epoch, so anything
//! queued before a reset is discarded when it comes due instead of needing a
//! cancellation handle.

use glam::Vec2;

use super::state::{CountdownLabel, EnemyKind};

/// Something that happens after a delay
#[derive(Debug, Clone, PartialEq)]
pub enum DeferredEvent {
    /// Warning elapsed; the enemy becomes solid
    MaterializeEnemy { kind: EnemyKind, pos: Vec2 },
    /// Show the next countdown label
    CountdownStep(CountdownLabel),
    /// Countdown done; start running
    CountdownFinished,
}

#[derive(Debug, Clone)]
struct Scheduled {
    fire_at: f64,
    epoch: u64,
    seq: u64,
    event: DeferredEvent,
}

/// Pending deferred events
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    pending: Vec<Scheduled>,
    next_seq: u64,
}

impl Schedule {
    pub fn push(&mut self, fire_at: f64, epoch: u64, event: DeferredEvent) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Scheduled {
            fire_at,
            epoch,
            seq,
            event,
        });
    }

    /// Remove and return every event due at `now`, oldest first, with its epoch.
    pub fn drain_due(&mut self, now: f64) -> Vec<(u64, DeferredEvent)> {
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|s| s.fire_at <= now);
        self.pending = rest;
        due.sort_by(|a, b| a.fire_at.total_cmp(&b.fire_at).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|s| (s.epoch, s.event)).collect()
    }

    /// Drop pending events that fail `keep`
    pub fn retain(&mut self, mut keep: impl FnMut(&DeferredEvent) -> bool) {
        self.pending.retain(|s| keep(&s.event));
    }

    /// Drop every pending event
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
