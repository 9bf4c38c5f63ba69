//! §4.1 Physics layer: pressure/depth conversion, inspired-gas pressure,
//! the Schreiner exponential tissue-loading equation, and MOD.
//!
//! This is the only place the core converts between depth and ambient
//! pressure, and the only tissue-update primitive besides Thalmann's
//! asymmetric elimination (§4.5.6), which layers on top of it.

use crate::mathx;

/// `depth_to_pressure(d) = P_SURFACE + d/10`
pub fn depth_to_pressure(depth_m: f64) -> f64 {
    crate::constants::P_SURFACE + depth_m / crate::constants::METERS_PER_BAR
}

/// Inverse of [`depth_to_pressure`], clamped at the surface.
pub fn pressure_to_depth(pressure_bar: f64) -> f64 {
    let depth = (pressure_bar - crate::constants::P_SURFACE) * crate::constants::METERS_PER_BAR;
    if depth < 0.0 {
        0.0
    } else {
        depth
    }
}

/// Inspired partial pressure of a gas fraction at depth, after subtracting
/// lung water-vapor pressure.
pub fn inspired_pressure(depth_m: f64, fraction: f64) -> f64 {
    (depth_to_pressure(depth_m) - crate::constants::P_WATER_VAPOR) * fraction
}

/// Schreiner equation: `p = p0 + (pi - p0) * (1 - 2^(-t/tau))`.
/// Returns `p0` unchanged when `t <= 0`. `t` and `tau` are in minutes.
pub fn schreiner(p0: f64, pi: f64, t_minutes: f64, tau_minutes: f64) -> f64 {
    if t_minutes <= 0.0 {
        return p0;
    }
    let k = mathx::powf(2.0, -t_minutes / tau_minutes);
    p0 + (pi - p0) * (1.0 - k)
}

/// `calc_mod(fO2, ppO2) = floor(10 * (ppO2/fO2 - 1))`, 0 when `fO2 <= 0`.
pub fn calc_mod(f_o2: f64, pp_o2_limit: f64) -> f64 {
    if f_o2 <= 0.0 {
        return 0.0;
    }
    mathx::floor(crate::constants::METERS_PER_BAR * (pp_o2_limit / f_o2 - 1.0))
}
