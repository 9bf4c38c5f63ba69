//! §7 Error taxonomy. Mirrors the teacher's hand-rolled `ConfigValidationErr`
//! / `DecoCalculationError` -- no `anyhow`/`thiserror`, `Display` over
//! `core::fmt` so the crate stays `no_std`-friendly.

use core::fmt;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfigValidationErr {
    pub field: alloc::string::String,
    pub reason: alloc::string::String,
}

impl ConfigValidationErr {
    pub fn new(field: &str, reason: &str) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ConfigValidationErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Config error [{}]: {}", self.field, self.reason)
    }
}

/// §7: the core never returns a validation error for the driver's own
/// plan input (malformed stops are dropped at the boundary); this error
/// only guards algorithm *configuration* construction.
pub trait DecoModelConfig {
    fn validate(&self) -> Result<(), ConfigValidationErr>;
}
