//! §4.5.1 Bühlmann ZH-L16 family: 16 compartments, N2 and He tracked
//! separately and combined per-compartment by their relative partial
//! pressures, gradient factors sloped linearly between GF-low (at the
//! deepest required stop) and GF-high (at the surface).
//!
//! The six variants share one coefficient table (a faithful transcription
//! of ZHL-16C's N2 side and ZHL-16A's He side) and differ by a
//! conservatism multiplier applied to the `a` coefficient. The earlier
//! ZH-L12/ZH-L6/ZH-L8 ADT models predate the published 16-compartment
//! table and are approximated the same way the ZHL16A/B/C split is:
//! matching any one computer's output bit-for-bit isn't a goal (spec.md
//! §1 Non-goals), but the relative ordering -- ZHL16A is the most
//! conservative and ZHL8ADT the least -- is preserved.

use super::{round_up_to_stop_interval, CeilingType, DecoAlgorithmCore};
use crate::constants::{HE_N2_HALFTIME_RATIO, P_SURFACE};
use crate::gas::{active_gas_at, GasMix};
use crate::physics;
use crate::profile::Phase;
use crate::result::{DecoResult, RunOptions, Supersaturation};
use crate::scheduler::schedule_deco_stops;
use crate::tissue::TissueState;
use alloc::vec::Vec;
use core::cell::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Zhl16a,
    Zhl16b,
    Zhl16c,
    Zhl12,
    Zhl6,
    Zhl8adt,
}

impl Variant {
    fn conservatism(&self) -> f64 {
        match self {
            Self::Zhl16a => 0.95,
            Self::Zhl16b => 0.975,
            Self::Zhl16c => 1.0,
            Self::Zhl12 => 0.92,
            Self::Zhl6 => 0.88,
            Self::Zhl8adt => 0.97,
        }
    }
}

// (n2_half_time, n2_a, n2_b, he_half_time, he_a, he_b), ZHL-16C N2 / ZHL-16A He.
const ZHL16_PARAMS: [(f64, f64, f64, f64, f64, f64); 16] = [
    (4.0, 1.2599, 0.5050, 1.51, 1.7424, 0.4245),
    (8.0, 1.0000, 0.6514, 3.02, 1.3830, 0.5747),
    (12.5, 0.8618, 0.7222, 4.72, 1.1919, 0.6527),
    (18.5, 0.7562, 0.7825, 6.99, 1.0458, 0.7223),
    (27.0, 0.6200, 0.8126, 10.21, 0.9220, 0.7582),
    (38.3, 0.5043, 0.8434, 14.48, 0.8205, 0.7957),
    (54.3, 0.4410, 0.8693, 20.53, 0.7305, 0.8279),
    (77.0, 0.4000, 0.8910, 29.11, 0.6502, 0.8553),
    (109.0, 0.3750, 0.9092, 41.20, 0.5950, 0.8757),
    (146.0, 0.3500, 0.9222, 55.19, 0.5545, 0.8903),
    (187.0, 0.3295, 0.9319, 70.69, 0.5333, 0.8997),
    (239.0, 0.3065, 0.9403, 90.34, 0.5189, 0.9073),
    (305.0, 0.2835, 0.9477, 115.29, 0.5181, 0.9122),
    (390.0, 0.2610, 0.9544, 147.42, 0.5176, 0.9171),
    (498.0, 0.2480, 0.9602, 188.24, 0.5172, 0.9217),
    (635.0, 0.2327, 0.9653, 240.03, 0.5119, 0.9267),
];

struct CompartmentParams {
    n2_half_time: f64,
    n2_a: f64,
    n2_b: f64,
    he_half_time: f64,
    he_a: f64,
    he_b: f64,
}

pub struct Buhlmann {
    variant: Variant,
    params: Vec<CompartmentParams>,
    gf_low: f64,
    gf_high: f64,
    /// Fixed GF-interpolation reference (the first stop depth), cached
    /// once per spec.md §4.5.1 rather than recomputed from the
    /// (off-gassing) tissue state on every `can_ascend` call -- same
    /// `gf_low_depth` cache the teacher's `BuehlmannState` keeps.
    gf_low_depth: Cell<f64>,
}

impl Buhlmann {
    pub fn new(variant: Variant, gf_low: u8, gf_high: u8) -> Self {
        let conservatism = variant.conservatism();
        let params = ZHL16_PARAMS
            .iter()
            .map(|&(n2_ht, n2_a, n2_b, he_ht, he_a, he_b)| {
                debug_assert!((n2_ht / he_ht - HE_N2_HALFTIME_RATIO).abs() < 0.1);
                CompartmentParams {
                    n2_half_time: n2_ht,
                    n2_a: n2_a * conservatism,
                    n2_b,
                    he_half_time: he_ht,
                    he_a: he_a * conservatism,
                    he_b,
                }
            })
            .collect();
        Self {
            variant,
            params,
            gf_low: (gf_low as f64 / 100.0).clamp(0.01, 1.0),
            gf_high: (gf_high as f64 / 100.0).clamp(0.01, 1.0),
            gf_low_depth: Cell::new(0.0),
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Fixes the GF-interpolation reference depth once the first stop is
    /// known, so later `can_ascend` calls slope gf_low -> gf_high against
    /// a stable reference instead of the shrinking instantaneous ceiling.
    pub fn set_gf_low_depth(&self, first_stop_depth: f64) {
        self.gf_low_depth.set(first_stop_depth.max(0.0));
    }

    /// Combines N2/He coefficients by their relative share of total inert
    /// gas pressure in this compartment, falling back to pure N2 when both
    /// are zero (surface-equilibrated start).
    fn weighted_ab(&self, i: usize, p_n2: f64, p_he: f64) -> (f64, f64) {
        let total = p_n2 + p_he;
        let p = &self.params[i];
        if total <= 0.0 {
            return (p.n2_a, p.n2_b);
        }
        let a = (p.n2_a * p_n2 + p.he_a * p_he) / total;
        let b = (p.n2_b * p_n2 + p.he_b * p_he) / total;
        (a, b)
    }

    /// Minimum tolerable ambient pressure for compartment `i` given its
    /// current inert pressure and a gradient factor fraction.
    fn min_tolerable_amb(&self, i: usize, p_n2: f64, p_he: f64, gf: f64) -> f64 {
        let (a, b) = self.weighted_ab(i, p_n2, p_he);
        let total = p_n2 + p_he;
        let b_adj = b / (gf - gf * b + b);
        (total - a * gf) * b_adj
    }

    /// M-value (gf = 100%) at a given ambient pressure, for introspection.
    fn m_value_pure(&self, i: usize, amb: f64, p_n2: f64, p_he: f64) -> f64 {
        let (a, b) = self.weighted_ab(i, p_n2, p_he);
        a + amb / b
    }

    fn ceiling_at_gf(&self, tissue: &TissueState, gf: f64) -> f64 {
        let mut max_amb = P_SURFACE;
        for i in 0..tissue.p_n2.len() {
            let amb = self.min_tolerable_amb(i, tissue.p_n2[i], tissue.p_he[i], gf);
            max_amb = max_amb.max(amb);
        }
        physics::pressure_to_depth(max_amb)
    }

    fn gf_at_depth(&self, depth: f64, gf_low_depth: f64) -> f64 {
        if gf_low_depth <= 0.0 {
            return self.gf_high;
        }
        if depth >= gf_low_depth {
            return self.gf_low;
        }
        if depth <= 0.0 {
            return self.gf_high;
        }
        self.gf_high - ((self.gf_high - self.gf_low) / gf_low_depth) * depth
    }

    /// Current and projected-at-surface gradient factor, expressed as a
    /// percentage of the gf=100% M-value (§11 supplement).
    pub fn supersaturation(&self, tissue: &TissueState, depth: f64) -> Supersaturation {
        let amb = physics::depth_to_pressure(depth);
        let mut gf_99 = 0.0_f64;
        let mut gf_surf = 0.0_f64;
        for i in 0..tissue.p_n2.len() {
            let p_n2 = tissue.p_n2[i];
            let p_he = tissue.p_he[i];
            let total = p_n2 + p_he;
            let m_now = self.m_value_pure(i, amb, p_n2, p_he);
            if m_now > amb {
                gf_99 = gf_99.max((total - amb) / (m_now - amb) * 100.0);
            }
            let m_surf = self.m_value_pure(i, P_SURFACE, p_n2, p_he);
            if m_surf > P_SURFACE {
                gf_surf = gf_surf.max((total - P_SURFACE) / (m_surf - P_SURFACE) * 100.0);
            }
        }
        Supersaturation { gf_99, gf_surf }
    }

    /// §11 supplement: the `Adaptive` ceiling type. Projects tissue
    /// loading forward by the time it would take to ascend from
    /// `current_depth` to the actual (`Actual`) ceiling at
    /// `ascent_rate`, then reports the ceiling the diver would face on
    /// arrival rather than the one measured where they are now.
    pub fn adaptive_ceiling(&self, tissue: &TissueState, current_depth: f64, gas: GasMix, ascent_rate: f64) -> f64 {
        let actual = self.ceiling(tissue);
        if actual <= 0.0 || current_depth <= actual {
            return actual;
        }
        let transit = crate::mathx::ceil((current_depth - actual) / ascent_rate.max(0.1));
        let mut projected = tissue.clone();
        self.update_tissue(&mut projected, actual, gas, transit);
        self.ceiling(&projected)
    }

    /// Resolves the ceiling according to `ceiling_type`; `Actual` is a
    /// thin wrapper over [`DecoAlgorithmCore::ceiling`].
    pub fn ceiling_for(&self, tissue: &TissueState, ceiling_type: CeilingType, current_depth: f64, gas: GasMix, ascent_rate: f64) -> f64 {
        match ceiling_type {
            CeilingType::Actual => self.ceiling(tissue),
            CeilingType::Adaptive => self.adaptive_ceiling(tissue, current_depth, gas, ascent_rate),
        }
    }
}

impl DecoAlgorithmCore for Buhlmann {
    fn compartment_count(&self) -> usize {
        self.params.len()
    }

    fn half_times(&self) -> Vec<f64> {
        self.params.iter().map(|p| p.n2_half_time).collect()
    }

    fn ceiling(&self, tissue: &TissueState) -> f64 {
        self.ceiling_at_gf(tissue, self.gf_low)
    }

    fn can_ascend(&self, tissue: &TissueState, next_depth: f64) -> bool {
        let gf = self.gf_at_depth(next_depth.max(0.0), self.gf_low_depth.get());
        let next_amb = physics::depth_to_pressure(next_depth.max(0.0));
        (0..tissue.p_n2.len())
            .all(|i| self.min_tolerable_amb(i, tissue.p_n2[i], tissue.p_he[i], gf) <= next_amb)
    }

    fn update_tissue(&self, tissue: &mut TissueState, depth: f64, gas: GasMix, minutes: f64) {
        if minutes <= 0.0 {
            return;
        }
        let inspired = gas.inspired_pressures(depth);
        for i in 0..tissue.p_n2.len() {
            let p = &self.params[i];
            tissue.p_n2[i] = physics::schreiner(tissue.p_n2[i], inspired.n2, minutes, p.n2_half_time);
            tissue.p_he[i] = physics::schreiner(tissue.p_he[i], inspired.he, minutes, p.he_half_time);
        }
    }

    fn m_values_at_surface(&self) -> Vec<f64> {
        (0..self.params.len())
            .map(|i| self.m_value_pure(i, P_SURFACE, physics::inspired_pressure(0.0, 0.79), 0.0))
            .collect()
    }
}

pub fn run(variant: Variant, phases: &[Phase], options: &RunOptions) -> DecoResult {
    let algo = Buhlmann::new(variant, options.gf_low, options.gf_high);
    let bottom_gas = options.bottom_gas();
    let mut tissue = algo.initial_tissue(bottom_gas);
    let mut deepest = 0.0_f64;
    let mut final_depth = 0.0_f64;

    for phase in phases {
        algo.update_tissue(&mut tissue, phase.depth, bottom_gas, phase.duration as f64);
        deepest = deepest.max(phase.depth);
        final_depth = phase.depth;
    }

    let raw_ceiling = algo.ceiling(&tissue);
    let first_stop_depth = round_up_to_stop_interval(raw_ceiling);

    let mut result = DecoResult::no_deco(algo.compartment_count(), tissue.p_n2.clone(), algo.half_times());
    result.he_loading = Some(tissue.p_he.clone());
    result.m_values = algo.m_values_at_surface();
    result.ceiling = raw_ceiling;
    result.supersaturation = Some(algo.supersaturation(&tissue, final_depth));

    if first_stop_depth <= 0.0 {
        return result;
    }

    algo.set_gf_low_depth(first_stop_depth);

    let outcome = schedule_deco_stops(
        &algo,
        &mut tissue,
        first_stop_depth,
        deepest,
        options.last_stop_depth,
        options.deco_ascent_rate,
        |depth| active_gas_at(depth, options.gas_switches, bottom_gas),
    );

    result.deco_stops = outcome.stops;
    result.first_stop_depth = first_stop_depth;
    result.no_deco_limit = false;
    result.iteration_cap_reached = outcome.iteration_cap_reached;
    result.tissue_loading = tissue.p_n2.clone();
    result.he_loading = Some(tissue.p_he.clone());
    result.supersaturation = Some(algo.supersaturation(&tissue, first_stop_depth));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gas::GasSwitch;
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
        let result = run(Variant::Zhl16c, &profile.phases, &opts(100, 100));
        assert!(result.no_deco_limit);
    }

    #[test]
    fn test_deep_dive_requires_deco() {
        let profile = build_profile(&[Stop { depth: 45.0, time: 30 }], 18.0, 9.0);
        let result = run(Variant::Zhl16c, &profile.phases, &opts(30, 85));
        assert!(!result.no_deco_limit);
        assert!(!result.deco_stops.is_empty());
        assert_eq!(result.compartment_count, 16);
        assert!(result.he_loading.is_some());
    }

    #[test]
    fn test_lower_gf_high_is_more_conservative() {
        let profile = build_profile(&[Stop { depth: 45.0, time: 30 }], 18.0, 9.0);
        let conservative = run(Variant::Zhl16c, &profile.phases, &opts(30, 70));
        let liberal = run(Variant::Zhl16c, &profile.phases, &opts(30, 100));
        let total_conservative: i32 = conservative.deco_stops.iter().map(|s| s.time).sum();
        let total_liberal: i32 = liberal.deco_stops.iter().map(|s| s.time).sum();
        assert!(total_conservative >= total_liberal);
    }

    #[test]
    fn test_zhl16a_more_conservative_than_zhl16c() {
        let profile = build_profile(&[Stop { depth: 45.0, time: 30 }], 18.0, 9.0);
        let a = run(Variant::Zhl16a, &profile.phases, &opts(70, 90));
        let c = run(Variant::Zhl16c, &profile.phases, &opts(70, 90));
        assert!(a.first_stop_depth >= c.first_stop_depth);
    }

    #[test]
    fn test_trimix_gas_switch_emits_marker() {
        let profile = build_profile(&[Stop { depth: 45.0, time: 25 }], 18.0, 9.0);
        let ean50 = GasMix::new(0.5, 0.0);
        let switches = [GasSwitch { depth: 21.0, gas: ean50 }];
        let mut options = opts(30, 80);
        options.gas_switches = &switches;
        options.f_he = 0.25;
        let result = run(Variant::Zhl16c, &profile.phases, &options);
        assert!(result.deco_stops.iter().any(|s| s.gas_switch));
    }
}
