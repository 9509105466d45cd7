//! Logical simulation clock and pending wake-up queue.
//!
//! Time is an integer tick count. Events are kept in a min-heap ordered by
//! timestamp; events sharing a timestamp pop in the order they were scheduled.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use bevy_ecs::prelude::{Entity, Resource};

/// Ticks per simulated hour of day; the hour is `tick % HOURS_PER_DAY`.
pub const HOURS_PER_DAY: u64 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    SimulationStarted,
    VehicleStep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventSubject {
    Vehicle(Entity),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub timestamp: u64,
    pub kind: EventKind,
    pub subject: Option<EventSubject>,
    seq: u64,
}

impl Event {
    /// Insertion sequence number; breaks timestamp ties first-in first-out.
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap a min-heap by (timestamp, seq).
        other
            .timestamp
            .cmp(&self.timestamp)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The event currently being processed by the schedule.
#[derive(Debug, Clone, Copy, Resource)]
pub struct CurrentEvent(pub Event);

#[derive(Debug, Default, Resource)]
pub struct SimulationClock {
    now: u64,
    next_seq: u64,
    events: BinaryHeap<Event>,
}

impl SimulationClock {
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Hour of the simulated day for the current tick.
    pub fn hour_of_day(&self) -> u64 {
        self.now % HOURS_PER_DAY
    }

    pub fn schedule_at(&mut self, timestamp: u64, kind: EventKind, subject: Option<EventSubject>) {
        debug_assert!(
            timestamp >= self.now,
            "event timestamp must be >= current time"
        );
        let seq = self.next_seq;
        self.next_seq += 1;
        self.events.push(Event {
            timestamp,
            kind,
            subject,
            seq,
        });
    }

    pub fn schedule_in(&mut self, delay: u64, kind: EventKind, subject: Option<EventSubject>) {
        self.schedule_at(self.now.saturating_add(delay), kind, subject);
    }

    pub fn pop_next(&mut self) -> Option<Event> {
        let event = self.events.pop()?;
        self.now = event.timestamp;
        Some(event)
    }

    pub fn next_event_time(&self) -> Option<u64> {
        self.events.peek().map(|event| event.timestamp)
    }

    pub fn pending(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
