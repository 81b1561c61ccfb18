use anyhow::{bail, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{normalize, sweep, sweep_steps, AccrualError, AccrualStep, Event};

/// Normalize then sweep: the whole function-call contract in one place.
///
/// # Errors
///
/// [`AccrualError::EmptyHistory`] when `events` is empty.
pub fn calculate_pay_units(events: &[Event]) -> Result<u64, AccrualError> {
    let canonical = normalize(events)?;
    Ok(sweep(&canonical))
}

/// Engine knobs. None of them change the accrued total.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccrualSettings {
    /// Warn when the peak rate of a history exceeds this.
    pub rate_warn_threshold: Option<u64>,
    /// Keep the per-event breakdown in [`AccrualReport::steps`].
    pub record_steps: bool,
}

impl AccrualSettings {
    pub fn sane_defaults() -> Self {
        Self {
            rate_warn_threshold: None,
            record_steps: false,
        }
    }

    /// Build from canonical config JSON (produced by pua-config).
    ///
    /// Optional:
    /// - engine.rate_warn_threshold (non-negative integer); default=none
    /// - engine.record_steps (bool); default=false
    pub fn from_config_json(cfg: &Value) -> Result<Self> {
        let mut out = Self::sane_defaults();

        match cfg.pointer("/engine/rate_warn_threshold") {
            None | Some(Value::Null) => {}
            Some(v) => match v.as_u64() {
                Some(n) => out.rate_warn_threshold = Some(n),
                None => bail!(
                    "CONFIG_INVALID: engine.rate_warn_threshold must be a non-negative integer (got {v})"
                ),
            },
        }

        match cfg.pointer("/engine/record_steps") {
            None | Some(Value::Null) => {}
            Some(Value::Bool(b)) => out.record_steps = *b,
            Some(v) => bail!("CONFIG_INVALID: engine.record_steps must be a bool (got {v})"),
        }

        Ok(out)
    }
}

impl Default for AccrualSettings {
    fn default() -> Self {
        Self::sane_defaults()
    }
}

/// Result of one [`AccrualEngine::accrue`] call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AccrualReport {
    pub total: u64,
    pub event_count: usize,
    /// Highest rate reached after any event.
    pub peak_rate: u64,
    /// Rate after the last event (pickups still outstanding).
    pub final_rate: u64,
    /// Dropoffs seen with no outstanding pickup.
    pub unmatched_dropoffs: usize,
    /// Empty unless [`AccrualSettings::record_steps`] is set.
    pub steps: Vec<AccrualStep>,
}

/// Stateless accrual engine: one subject's history per call, no memory
/// between calls.
#[derive(Clone, Debug, Default)]
pub struct AccrualEngine {
    settings: AccrualSettings,
}

impl AccrualEngine {
    pub fn new(settings: AccrualSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &AccrualSettings {
        &self.settings
    }

    /// Accrue one subject's history into a report.
    ///
    /// `report.total` always equals [`calculate_pay_units`] on the same input.
    pub fn accrue(&self, events: &[Event]) -> Result<AccrualReport, AccrualError> {
        let canonical = normalize(events)?;
        let steps = sweep_steps(&canonical);

        let total = steps.last().map(|s| s.total_after).unwrap_or(0);
        let final_rate = steps.last().map(|s| s.rate_after).unwrap_or(0);
        let peak_rate = steps.iter().map(|s| s.rate_after).max().unwrap_or(0);
        let unmatched_dropoffs = steps.iter().filter(|s| s.clamped).count();

        debug!(
            events = canonical.len(),
            total, peak_rate, final_rate, unmatched_dropoffs, "accrual complete"
        );

        if let Some(threshold) = self.settings.rate_warn_threshold {
            if peak_rate > threshold {
                warn!(
                    peak_rate,
                    threshold, "peak rate above configured threshold; check for missing dropoffs"
                );
            }
        }

        Ok(AccrualReport {
            total,
            event_count: canonical.len(),
            peak_rate,
            final_rate,
            unmatched_dropoffs,
            steps: if self.settings.record_steps {
                steps
            } else {
                Vec::new()
            },
        })
    }
}
