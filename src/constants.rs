//! Shared numeric constants used across the physics layer and algorithm family.

/// Standard atmospheric pressure at sea level, in bar.
pub const P_SURFACE: f64 = 1.01325;

/// Alveolar water vapor pressure assuming 47 mmHg at 37°C (Bühlmann's value), in bar.
pub const P_WATER_VAPOR: f64 = 0.0627;

/// VPM-B surface tension of a bubble skin, N/m.
pub const VPM_GAMMA: f64 = 0.0179;

/// VPM-B surface tension of a fully compressed bubble skin, N/m.
pub const VPM_GAMMA_C: f64 = 0.0257;

/// VPM-B Laplace-to-bar conversion factor (Pa per bar is 1e5; kept as a
/// named constant since the teacher's math_utils convention favors named
/// magic numbers over inline literals).
pub const VPM_PASCAL_PER_BAR: f64 = 1.0e5;

/// Workman/Thalmann linear M-value slope reference, also used for the
/// He diffusion-coefficient ratio applied to Bühlmann N2 half-times.
pub const HE_N2_HALFTIME_RATIO: f64 = 2.65;

pub const METERS_TO_FEET: f64 = 3.28084;

/// All stop depths are quantised to multiples of this, in meters.
pub const STOP_INTERVAL: f64 = 3.0;

/// Iteration cap for the per-stop search loop in the deco scheduler.
pub const MAX_STOP_MINUTES: u32 = 999;

/// Ten meters of seawater equals one bar of hydrostatic pressure.
pub const METERS_PER_BAR: f64 = 10.0;
