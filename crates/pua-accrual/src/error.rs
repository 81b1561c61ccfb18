/// Failures the accrual engine can surface.
///
/// There is exactly one: a caller-input error. It is deterministic, so
/// retrying with the same input fails identically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccrualError {
    /// The event history handed to the engine had zero events.
    EmptyHistory,
}

impl AccrualError {
    /// Stable, copy/paste friendly code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyHistory => "ACCRUAL_EMPTY_HISTORY",
        }
    }
}

impl std::fmt::Display for AccrualError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyHistory => write!(
                f,
                "{}: event history is empty; nothing to accrue",
                self.code()
            ),
        }
    }
}

impl std::error::Error for AccrualError {}
