//! Accrual sweep over a canonical sequence.
//!
//! The rate is a piecewise-constant step function that only changes at event
//! boundaries. Between two consecutive events the total grows by
//! `rate * (t_next - t_prev)`. Elapsed time is measured from the window start
//! (`previous_timestamp = 0`), and the rate is 0 before the first event, so
//! the first event never contributes.
//!
//! A dropoff at rate 0 is a no-op on the rate, never an error.

use tracing::{debug, trace};

use crate::{CanonicalSequence, Event, EventKind};

fn mul_rate_elapsed(rate: u64, elapsed: u64) -> u128 {
    (rate as u128) * (elapsed as u128)
}

fn u128_to_u64_clamp(x: u128) -> u64 {
    if x > u64::MAX as u128 {
        u64::MAX
    } else {
        x as u64
    }
}

// ---------------------------------------------------------------------------
// Fold state
// ---------------------------------------------------------------------------

/// Explicit accumulator threaded through the sweep.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AccrualState {
    pub previous_timestamp: u64,
    /// Current multiplier. Unsigned, so it cannot go below zero.
    pub rate: u64,
    pub total: u64,
}

impl AccrualState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event: accrue the elapsed interval at the current rate, then
    /// move the rate.
    ///
    /// Callers must feed events in canonical order; `elapsed` saturates at 0
    /// if they don't.
    pub fn apply(self, event: &Event) -> Self {
        self.apply_traced(event).0
    }

    /// Same as [`AccrualState::apply`], also returning the accrual contributed
    /// by this event and whether a dropoff was clamped.
    fn apply_traced(self, event: &Event) -> (Self, u64, bool) {
        let elapsed = event.timestamp.saturating_sub(self.previous_timestamp);
        let accrued = u128_to_u64_clamp(mul_rate_elapsed(self.rate, elapsed));
        let total = self.total.saturating_add(accrued);

        let (rate, clamped) = match event.kind {
            EventKind::Pickup => (self.rate.saturating_add(1), false),
            EventKind::Dropoff => (self.rate.saturating_sub(1), self.rate == 0),
        };

        let next = Self {
            previous_timestamp: event.timestamp,
            rate,
            total,
        };
        (next, accrued, clamped)
    }
}

// ---------------------------------------------------------------------------
// Step records
// ---------------------------------------------------------------------------

/// Per-event breakdown of the sweep.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct AccrualStep {
    pub event: Event,
    /// Accrual added for the interval ending at this event.
    pub accrued: u64,
    /// Rate after the event was applied.
    pub rate_after: u64,
    /// Running total after the event was applied.
    pub total_after: u64,
    /// True for a dropoff seen at rate 0 (no outstanding pickup).
    pub clamped: bool,
}

// ---------------------------------------------------------------------------
// Sweep
// ---------------------------------------------------------------------------

/// Fold `canonical` into a single accrued total.
///
/// Infallible: the only failure mode (empty history) is ruled out by
/// [`CanonicalSequence`].
pub fn sweep(canonical: &CanonicalSequence) -> u64 {
    canonical
        .iter()
        .fold(AccrualState::new(), |state, event| state.apply(event))
        .total
}

/// Like [`sweep`], but records one [`AccrualStep`] per event.
pub fn sweep_steps(canonical: &CanonicalSequence) -> Vec<AccrualStep> {
    let mut state = AccrualState::new();
    let mut steps = Vec::with_capacity(canonical.len());

    for event in canonical {
        let (next, accrued, clamped) = state.apply_traced(event);
        trace!(
            timestamp = event.timestamp,
            kind = event.kind.as_str(),
            accrued,
            rate = next.rate,
            total = next.total,
            "sweep step"
        );
        if clamped {
            debug!(
                timestamp = event.timestamp,
                "dropoff with no outstanding pickup; rate stays at 0"
            );
        }
        steps.push(AccrualStep {
            event: *event,
            accrued,
            rate_after: next.rate,
            total_after: next.total,
            clamped,
        });
        state = next;
    }

    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize;

    #[test]
    fn first_event_contributes_nothing() {
        let s = AccrualState::new().apply(&Event::pickup(1_000));
        assert_eq!(s.total, 0);
        assert_eq!(s.rate, 1);
        assert_eq!(s.previous_timestamp, 1_000);
    }

    #[test]
    fn dropoff_at_zero_rate_is_clamped() {
        let s = AccrualState::new().apply(&Event::dropoff(10));
        assert_eq!(s.rate, 0);
        assert_eq!(s.total, 0);
    }

    #[test]
    fn accrues_rate_times_elapsed() {
        let s = AccrualState::new()
            .apply(&Event::pickup(100))
            .apply(&Event::pickup(150))
            .apply(&Event::dropoff(200));
        // 1 * 50 + 2 * 50
        assert_eq!(s.total, 150);
        assert_eq!(s.rate, 1);
    }

    #[test]
    fn product_is_computed_wide_and_clamped() {
        let s = AccrualState {
            previous_timestamp: 0,
            rate: u64::MAX,
            total: 0,
        }
        .apply(&Event::dropoff(u64::MAX));
        assert_eq!(s.total, u64::MAX);
        assert_eq!(s.rate, u64::MAX - 1);
    }

    #[test]
    fn steps_agree_with_sweep() {
        let canonical = normalize(&[
            Event::pickup(400),
            Event::pickup(100),
            Event::pickup(200),
            Event::dropoff(300),
            Event::dropoff(350),
        ])
        .unwrap();

        let steps = sweep_steps(&canonical);
        assert_eq!(steps.len(), 5);
        assert_eq!(steps.last().unwrap().total_after, sweep(&canonical));

        let rates: Vec<u64> = steps.iter().map(|s| s.rate_after).collect();
        assert_eq!(rates, vec![1, 2, 1, 0, 1]);

        let accrued: Vec<u64> = steps.iter().map(|s| s.accrued).collect();
        assert_eq!(accrued, vec![0, 100, 200, 50, 0]);
        assert!(steps.iter().all(|s| !s.clamped));
    }

    #[test]
    fn steps_flag_unmatched_dropoffs() {
        let canonical = normalize(&[
            Event::dropoff(50),
            Event::pickup(100),
            Event::dropoff(200),
            Event::dropoff(300),
        ])
        .unwrap();
        let clamped: Vec<bool> = sweep_steps(&canonical).iter().map(|s| s.clamped).collect();
        assert_eq!(clamped, vec![true, false, false, true]);
        assert_eq!(sweep(&canonical), 100);
    }
}
