//! §4.9 Gas-consumption planner: per-phase liters at a given SAC rate,
//! rock-bottom reserve for an emergency ascent, and rule-of-thirds
//! turnaround pressure.

use crate::mathx;
use crate::profile::{average_depth, Phase};
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 3-minute safety stop folded into the rock-bottom ascent-gas estimate,
/// matching the ascent assembler's own no-algorithm safety-stop policy.
const SAFETY_STOP_DEPTH: f64 = 6.0;
const SAFETY_STOP_MINUTES: f64 = 3.0;
const STRESS_SAC_MULTIPLIER: f64 = 2.0;

/// Ambient pressure factor in ata: `f(d) = d/10 + 1`.
fn ambient_factor(depth_m: f64) -> f64 {
    depth_m / 10.0 + 1.0
}

/// Liters consumed breathing `sac_rate_lpm` at `depth_m` for `minutes`.
pub fn liters_at_depth(sac_rate_lpm: f64, depth_m: f64, minutes: f64) -> f64 {
    sac_rate_lpm * ambient_factor(depth_m) * minutes
}

/// Liters consumed by a single phase: transit phases are charged at half
/// their end depth, stays and stops at their own depth (§4.9, shared
/// with the oxygen accounting's average-depth convention).
pub fn phase_liters(phase: &Phase, sac_rate_lpm: f64) -> f64 {
    liters_at_depth(sac_rate_lpm, average_depth(phase), phase.duration as f64)
}

/// Running total across `phases`, monotone non-decreasing by construction.
pub fn running_totals(phases: &[Phase], sac_rate_lpm: f64) -> Vec<f64> {
    let mut total = 0.0;
    let mut out = Vec::with_capacity(phases.len());
    for phase in phases {
        total += phase_liters(phase, sac_rate_lpm);
        out.push(total);
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RockBottom {
    pub liters: f64,
    pub bar: f64,
}

/// Rock-bottom gas: enough, at a doubled (stressed) SAC rate, to ascend
/// from `max_depth` -- charged at half of max depth for the time it takes
/// to reach the surface at `ascent_rate` -- plus a final 3-minute safety
/// stop at 6 m, converted to bar via `tank_size_liters` (the cylinder's
/// water volume) with `reserve_bar` added on top.
pub fn rock_bottom(max_depth: f64, ascent_rate: f64, sac_rate_lpm: f64, tank_size_liters: f64, reserve_bar: f64) -> RockBottom {
    let stress_sac = sac_rate_lpm * STRESS_SAC_MULTIPLIER;
    let ascent_minutes = mathx::ceil(max_depth / ascent_rate);
    let ascent_liters = liters_at_depth(stress_sac, max_depth / 2.0, ascent_minutes);
    let safety_stop_liters = liters_at_depth(stress_sac, SAFETY_STOP_DEPTH, SAFETY_STOP_MINUTES);
    let liters = ascent_liters + safety_stop_liters;
    let bar = liters / tank_size_liters + reserve_bar;
    RockBottom { liters, bar }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RuleOfThirds {
    pub turn_pressure: f64,
    pub sufficient: bool,
}

/// Rule of thirds: a third of usable gas (start minus reserve) in, a
/// third out, a third held back. `sufficient` compares the planned
/// consumption (converted to bar) plus reserve against the starting
/// pressure.
pub fn rule_of_thirds(start_pressure: f64, reserve_bar: f64, planned_liters: f64, tank_size_liters: f64) -> RuleOfThirds {
    let usable = start_pressure - reserve_bar;
    let one_third = mathx::floor(usable / 3.0);
    let turn_pressure = start_pressure - one_third;
    let planned_bar = planned_liters / tank_size_liters;
    let sufficient = planned_bar + reserve_bar <= start_pressure;
    RuleOfThirds { turn_pressure, sufficient }
}
