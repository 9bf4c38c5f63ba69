//! §4.5.2 VPM-B: bubble-mechanics model. Rather than a fixed M-value,
//! each compartment carries a critical bubble radius that gets crushed by
//! the deepest ambient pressure reached on the dive; a smaller crushed
//! radius tolerates a larger supersaturation gradient on the way back up.
//! Boyle's-law compensation further reduces that gradient at shallower
//! stops to account for bubbles already formed at depth expanding as
//! ambient pressure drops. GF-low/GF-high are repurposed here as a
//! conservatism scalar on the allowed gradient, sloped the same way the
//! Bühlmann family slopes its gradient factor between the deepest
//! required stop and the surface.

use super::{round_up_to_stop_interval, DecoAlgorithmCore};
use crate::constants::{P_SURFACE, VPM_GAMMA, VPM_GAMMA_C, VPM_PASCAL_PER_BAR};
use crate::gas::GasMix;
use crate::physics;
use crate::profile::Phase;
use crate::result::{DecoResult, RunOptions};
use crate::scheduler::schedule_deco_stops;
use crate::tissue::TissueState;
use alloc::vec::Vec;
use core::cell::Cell;

const HALF_TIMES: [f64; 16] = [
    4.0, 8.0, 12.5, 18.5, 27.0, 38.3, 54.3, 77.0, 109.0, 146.0, 187.0, 239.0, 305.0, 390.0, 498.0, 635.0,
];

// Initial critical radii in meters; faster compartments seed a larger
// radius, slower ones smaller, per the published VPM-B tissue table.
const INITIAL_RADII_M: [f64; 16] = [
    0.8e-6, 0.79e-6, 0.77e-6, 0.74e-6, 0.70e-6, 0.65e-6, 0.61e-6, 0.58e-6, 0.555e-6, 0.535e-6, 0.52e-6, 0.51e-6,
    0.505e-6, 0.50e-6, 0.50e-6, 0.50e-6,
];

/// Damping applied to the Boyle-law compensation term.
const BOYLE_DAMPING: f64 = 0.4;

pub struct Vpm {
    gf_low: f64,
    gf_high: f64,
    deepest_ambient: Cell<f64>,
    first_stop_ambient: Cell<f64>,
    /// Fixed GF-interpolation reference depth (the first stop), cached
    /// once per spec.md §4.5.2/§4.5.1's shared slope rather than
    /// recomputed from the (off-gassing) tissue state on every
    /// `can_ascend` call.
    gf_low_depth: Cell<f64>,
}

impl Vpm {
    pub fn new(gf_low: u8, gf_high: u8) -> Self {
        Self {
            gf_low: (gf_low as f64 / 100.0).clamp(0.01, 1.0),
            gf_high: (gf_high as f64 / 100.0).clamp(0.01, 1.0),
            deepest_ambient: Cell::new(P_SURFACE),
            first_stop_ambient: Cell::new(0.0),
            gf_low_depth: Cell::new(0.0),
        }
    }

    pub fn note_depth(&self, depth: f64) {
        let amb = physics::depth_to_pressure(depth);
        if amb > self.deepest_ambient.get() {
            self.deepest_ambient.set(amb);
        }
    }

    /// Records the ambient pressure of the first (deepest) deco stop, so
    /// later stops can compensate for bubbles expanding since then.
    pub fn set_first_stop(&self, first_stop_depth: f64) {
        self.first_stop_ambient.set(physics::depth_to_pressure(first_stop_depth.max(0.0)));
        self.gf_low_depth.set(first_stop_depth.max(0.0));
    }

    fn gf_at_depth(&self, depth: f64, gf_low_depth: f64) -> f64 {
        if gf_low_depth <= 0.0 || depth >= gf_low_depth {
            return if gf_low_depth <= 0.0 { self.gf_high } else { self.gf_low };
        }
        if depth <= 0.0 {
            return self.gf_high;
        }
        self.gf_high - ((self.gf_high - self.gf_low) / gf_low_depth) * depth
    }

    /// Allowed gas-tension gradient (bar) above `p_stop_ambient` before
    /// the bubble's critical radius begins to grow, for compartment `i`,
    /// scaled by the gradient-factor-style conservatism `gf` and reduced
    /// by Boyle-law compensation relative to the first stop.
    fn allowed_gradient(&self, i: usize, gf: f64, p_stop_ambient: f64) -> f64 {
        let r0 = INITIAL_RADII_M[i];
        let gamma_diff_pa = (VPM_GAMMA_C - VPM_GAMMA) * VPM_PASCAL_PER_BAR;
        let crushing_pa = (self.deepest_ambient.get() - P_SURFACE) * VPM_PASCAL_PER_BAR;
        let crush_factor = 1.0 + (crushing_pa * r0) / (2.0 * gamma_diff_pa);
        let base_gradient_pa = (2.0 * VPM_GAMMA * gamma_diff_pa) / (r0 * VPM_GAMMA_C);
        let base_gradient = base_gradient_pa * crush_factor / VPM_PASCAL_PER_BAR;

        let first_stop = self.first_stop_ambient.get();
        let boyle_term = if first_stop > 0.0 && p_stop_ambient > 0.0 {
            (BOYLE_DAMPING * (first_stop / p_stop_ambient - 1.0)).max(0.0)
        } else {
            0.0
        };

        base_gradient * (1.0 - boyle_term).max(0.0) * gf
    }

    /// Required ambient pressure (the ceiling, iterated twice since the
    /// Boyle term itself depends on the stop pressure it's reducing
    /// the gradient for).
    fn required_ambient(&self, tissue: &TissueState, gf: f64) -> f64 {
        let mut p_stop = P_SURFACE;
        for _ in 0..2 {
            let mut max_amb = P_SURFACE;
            for i in 0..tissue.p_n2.len() {
                let required = tissue.p_n2[i] - self.allowed_gradient(i, gf, p_stop);
                max_amb = max_amb.max(required);
            }
            p_stop = max_amb;
        }
        p_stop
    }
}

impl DecoAlgorithmCore for Vpm {
    fn compartment_count(&self) -> usize {
        HALF_TIMES.len()
    }

    fn half_times(&self) -> Vec<f64> {
        HALF_TIMES.to_vec()
    }

    fn ceiling(&self, tissue: &TissueState) -> f64 {
        physics::pressure_to_depth(self.required_ambient(tissue, self.gf_low))
    }

    fn can_ascend(&self, tissue: &TissueState, next_depth: f64) -> bool {
        let gf = self.gf_at_depth(next_depth.max(0.0), self.gf_low_depth.get());
        let next_amb = physics::depth_to_pressure(next_depth.max(0.0));
        (0..tissue.p_n2.len()).all(|i| tissue.p_n2[i] - self.allowed_gradient(i, gf, next_amb) <= next_amb)
    }

    fn update_tissue(&self, tissue: &mut TissueState, depth: f64, gas: GasMix, minutes: f64) {
        self.note_depth(depth);
        tissue.update(depth, gas, minutes, &HALF_TIMES, &HALF_TIMES);
    }

    fn m_values_at_surface(&self) -> Vec<f64> {
        (0..HALF_TIMES.len())
            .map(|i| P_SURFACE + self.allowed_gradient(i, self.gf_high, P_SURFACE))
            .collect()
    }
}

pub fn run(phases: &[Phase], options: &RunOptions) -> DecoResult {
    let algo = Vpm::new(options.gf_low, options.gf_high);
    let bottom_gas = options.bottom_gas();
    let mut tissue = algo.initial_tissue(bottom_gas);
    let mut deepest = 0.0_f64;

    for phase in phases {
        algo.update_tissue(&mut tissue, phase.depth, bottom_gas, phase.duration as f64);
        deepest = deepest.max(phase.depth);
    }

    let raw_ceiling = algo.ceiling(&tissue);
    let first_stop_depth = round_up_to_stop_interval(raw_ceiling);

    let mut result = DecoResult::no_deco(algo.compartment_count(), tissue.p_n2.clone(), algo.half_times());
    result.m_values = algo.m_values_at_surface();
    result.ceiling = raw_ceiling;

    if first_stop_depth <= 0.0 {
        return result;
    }

    algo.set_first_stop(first_stop_depth);

    let outcome = schedule_deco_stops(
        &algo,
        &mut tissue,
        first_stop_depth,
        deepest,
        options.last_stop_depth,
        options.deco_ascent_rate,
        |_| bottom_gas,
    );

    result.deco_stops = outcome.stops;
    result.first_stop_depth = first_stop_depth;
    result.no_deco_limit = false;
    result.iteration_cap_reached = outcome.iteration_cap_reached;
    result.tissue_loading = tissue.p_n2.clone();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{build_profile, Stop};

    fn opts(gf_low: u8, gf_high: u8) -> RunOptions<'static> {
        RunOptions {
            f_o2: 0.21,
            f_he: 0.0,
            gf_low,
            gf_high,
            ascent_rate: 9.0,
            deco_ascent_rate: 9.0,
            gas_switches: &[],
            last_stop_depth: 3.0,
        }
    }

    #[test]
    fn test_shallow_no_deco() {
        let profile = build_profile(&[Stop { depth: 10.0, time: 20 }], 18.0, 9.0);
        let result = run(&profile.phases, &opts(100, 100));
        assert!(result.no_deco_limit);
    }

    #[test]
    fn test_deeper_dive_crushes_radius_and_requires_deco() {
        let profile = build_profile(&[Stop { depth: 45.0, time: 25 }], 18.0, 9.0);
        let result = run(&profile.phases, &opts(100, 100));
        assert!(!result.no_deco_limit);
        assert_eq!(result.compartment_count, 16);
    }

    #[test]
    fn test_lower_gf_high_is_more_conservative() {
        let profile = build_profile(&[Stop { depth: 45.0, time: 25 }], 18.0, 9.0);
        let conservative = run(&profile.phases, &opts(30, 70));
        let liberal = run(&profile.phases, &opts(30, 100));
        assert!(conservative.first_stop_depth >= liberal.first_stop_depth);
    }

    #[test]
    fn test_boyle_compensation_reduces_allowed_gradient_at_shallow_stop() {
        let algo = Vpm::new(100, 100);
        algo.note_depth(60.0);
        algo.set_first_stop(27.0);
        let deep_gradient = algo.allowed_gradient(0, 1.0, physics::depth_to_pressure(27.0));
        let shallow_gradient = algo.allowed_gradient(0, 1.0, physics::depth_to_pressure(3.0));
        assert!(shallow_gradient < deep_gradient);
    }
}
