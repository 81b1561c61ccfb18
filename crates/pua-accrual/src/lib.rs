//! pua-accrual
//!
//! Pay-unit accrual engine.
//! - Canonical event ordering (timestamp, then pickup before dropoff)
//! - Sweep-line integration of rate x elapsed time
//! - Rate floored at zero; unmatched dropoffs are no-ops
//! - Pure deterministic logic (no IO, no clock, no shared state)
//!
//! One call handles one subject's history. The engine holds no subject
//! identity and remembers nothing between calls.

mod engine;
mod error;
mod types;

pub mod ordering;
pub mod sweep;

pub use engine::{calculate_pay_units, AccrualEngine, AccrualReport, AccrualSettings};
pub use error::AccrualError;
pub use ordering::{normalize, sort_events_canonical, CanonicalSequence};
pub use sweep::{sweep, sweep_steps, AccrualState, AccrualStep};
pub use types::{Event, EventKind, EventSequence};
