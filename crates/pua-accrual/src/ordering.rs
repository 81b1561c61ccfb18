//! Event ordering policy
//!
//! Defines the canonical sequence events are swept in. The same multiset of
//! events must always produce the same accrued total regardless of the order
//! in which the caller collected them, so the sweep never sees raw input.
//!
//! # Canonical sort key
//!
//! `(timestamp, kind_ord)` ascending.
//! `kind_ord`: `Pickup = 1`, `Dropoff = 2`; pickups precede dropoffs on a
//! tied timestamp, so the rate rises before it falls at that instant. This is
//! observable in the result: `[(100, D), (100, P), (300, D)]` accrues 0, where
//! dropoff-first would clamp the dropoff and then accrue 200.
//!
//! # Usage
//!
//! ```ignore
//! use pua_accrual::{normalize, sweep, Event};
//!
//! let events = vec![Event::dropoff(300), Event::pickup(100)];
//! let canonical = normalize(&events)?;
//! assert_eq!(sweep(&canonical), 200);
//! ```

use std::cmp::Ordering;

use crate::{AccrualError, Event};

// ---------------------------------------------------------------------------
// Canonical sort
// ---------------------------------------------------------------------------

/// Sort `events` into canonical order **in place**.
///
/// Sort key (all ascending): `(timestamp, kind_ord)`.
///
/// Pure and deterministic. Events equal under the key are identical values,
/// so the unstable sort cannot produce an observable difference.
pub fn sort_events_canonical(events: &mut [Event]) {
    events.sort_unstable_by(canonical_cmp);
}

fn canonical_cmp(a: &Event, b: &Event) -> Ordering {
    a.timestamp
        .cmp(&b.timestamp)
        .then_with(|| a.kind.ordinal().cmp(&b.kind.ordinal()))
}

// ---------------------------------------------------------------------------
// CanonicalSequence
// ---------------------------------------------------------------------------

/// A non-empty event sequence in canonical order.
///
/// Only [`normalize`] constructs this, so holding one proves both properties.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanonicalSequence {
    events: Vec<Event>,
}

impl CanonicalSequence {
    pub fn as_slice(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Always false; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    pub fn into_inner(self) -> Vec<Event> {
        self.events
    }
}

impl<'a> IntoIterator for &'a CanonicalSequence {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

// ---------------------------------------------------------------------------
// Normalize
// ---------------------------------------------------------------------------

/// Copy `events` into canonical order.
///
/// The caller's collection is not touched.
///
/// # Errors
///
/// Returns [`AccrualError::EmptyHistory`] when `events` is empty, so callers
/// can tell "no events" apart from "events that accrued zero".
pub fn normalize(events: &[Event]) -> Result<CanonicalSequence, AccrualError> {
    if events.is_empty() {
        return Err(AccrualError::EmptyHistory);
    }
    let mut events = events.to_vec();
    sort_events_canonical(&mut events);
    Ok(CanonicalSequence { events })
}
