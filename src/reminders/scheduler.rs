use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use tracing::{debug, info};

use super::{EntryId, EventStore, ReminderEntry};

/// A reminder whose time has come.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: EntryId,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct PendingFire {
    at: NaiveDateTime,
    id: EntryId,
}

/// Fires each of today's reminders once, during its minute.
///
/// Pending fires sit in a min-heap ordered by time, so a tick only looks at
/// what is due. Queued fires are checked against the store when popped, which
/// makes deletions and edits need no bookkeeping here. `notified` holds the
/// ids already delivered today and is cleared when the date rolls over.
pub struct ReminderClock {
    day: NaiveDate,
    queue: BinaryHeap<Reverse<PendingFire>>,
    notified: HashSet<EntryId>,
}

impl ReminderClock {
    pub fn new(store: &EventStore, now: NaiveDateTime) -> Self {
        let mut clock = Self {
            day: now.date(),
            queue: BinaryHeap::new(),
            notified: HashSet::new(),
        };
        clock.schedule_day(store, now);
        clock
    }

    /// Queue a newly added entry if it is due later today.
    pub fn schedule(&mut self, date: NaiveDate, entry: &ReminderEntry, now: NaiveDateTime) {
        if date != self.day {
            return;
        }
        let at = date.and_time(entry.time);
        if at < minute_start(now) {
            debug!(%date, id = %entry.id, "reminder time already passed today");
            return;
        }
        self.queue.push(Reverse(PendingFire { at, id: entry.id }));
    }

    /// Drop any notified marker for `id`.
    pub fn forget(&mut self, id: EntryId) {
        self.notified.remove(&id);
    }

    /// Advance to `now` and return the reminders to announce.
    pub fn tick(&mut self, store: &EventStore, now: NaiveDateTime) -> Vec<Notification> {
        if now.date() != self.day {
            info!(from = %self.day, to = %now.date(), "new day, resetting notified reminders");
            self.day = now.date();
            self.notified.clear();
            self.queue.clear();
            self.schedule_day(store, now);
        }

        let mut due = Vec::new();
        while let Some(Reverse(next)) = self.queue.peek().copied() {
            if next.at > now {
                break;
            }
            self.queue.pop();

            if now - next.at >= Duration::minutes(1) {
                debug!(id = %next.id, at = %next.at, "reminder missed its minute");
                continue;
            }
            if self.notified.contains(&next.id) {
                continue;
            }
            let date = next.at.date();
            let Some(entry) = live_entry(store, &next) else {
                continue;
            };

            info!(%date, id = %entry.id, "reminder due");
            self.notified.insert(entry.id);
            due.push(Notification {
                id: entry.id,
                date,
                time: entry.time,
                description: entry.description.clone(),
            });
        }
        due
    }

    /// Fires still to come today whose entry exists unchanged in `store`.
    pub fn pending(&self, store: &EventStore) -> usize {
        self.queue
            .iter()
            .filter(|Reverse(fire)| !self.notified.contains(&fire.id))
            .filter(|Reverse(fire)| live_entry(store, fire).is_some())
            .count()
    }

    fn schedule_day(&mut self, store: &EventStore, now: NaiveDateTime) {
        let day = self.day;
        for entry in store.entries_on(day) {
            if !self.notified.contains(&entry.id) {
                self.schedule(day, entry, now);
            }
        }
        debug!(%day, pending = self.queue.len(), "reminders scheduled");
    }
}

/// The stored entry a queued fire still refers to, if it was not deleted or moved.
fn live_entry<'a>(store: &'a EventStore, fire: &PendingFire) -> Option<&'a ReminderEntry> {
    store
        .get(fire.at.date(), fire.id)
        .filter(|entry| fire.at.date().and_time(entry.time) == fire.at)
}

fn minute_start(at: NaiveDateTime) -> NaiveDateTime {
    at.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(at)
}
