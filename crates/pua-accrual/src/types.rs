use serde::{Deserialize, Serialize};

/// Status transition reported for a subject.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    Pickup,
    Dropoff,
}

impl EventKind {
    /// Tie-break rank for events sharing a timestamp. Lower sorts first.
    ///
    /// `Pickup = 1`, `Dropoff = 2`: at a tied instant the rate increase is
    /// applied before the decrease.
    pub fn ordinal(&self) -> u8 {
        match self {
            EventKind::Pickup => 1,
            EventKind::Dropoff => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Pickup => "PICKUP",
            EventKind::Dropoff => "DROPOFF",
        }
    }
}

/// A single timestamped status event (the accrual atom).
///
/// `timestamp` is seconds from the start of the observation window.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event {
    pub timestamp: u64,
    pub kind: EventKind,
}

impl Event {
    pub fn new(timestamp: u64, kind: EventKind) -> Self {
        Self { timestamp, kind }
    }

    pub fn pickup(timestamp: u64) -> Self {
        Self::new(timestamp, EventKind::Pickup)
    }

    pub fn dropoff(timestamp: u64) -> Self {
        Self::new(timestamp, EventKind::Dropoff)
    }
}

/// One subject's events for one evaluation window, in arrival order.
///
/// Arrival order carries no meaning; the engine imposes its own order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventSequence {
    events: Vec<Event>,
}

impl EventSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn as_slice(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl From<Vec<Event>> for EventSequence {
    fn from(events: Vec<Event>) -> Self {
        Self { events }
    }
}

impl FromIterator<Event> for EventSequence {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

impl AsRef<[Event]> for EventSequence {
    fn as_ref(&self) -> &[Event] {
        &self.events
    }
}
