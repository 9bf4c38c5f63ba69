//! §4.5.7 DCIEM: 4 compartments wired in SERIES rather than in parallel.
//! Compartment 0 sees the inspired pressure directly; each compartment
//! after that sees the mean of its upstream neighbor's pre- and
//! post-update pressure as its own "inspired" input, cascading down the
//! chain. Ascent is additionally slowed by a fixed 1.1x duration penalty
//! relative to the requested deco ascent rate.

use super::{round_up_to_stop_interval, DecoAlgorithmCore};
use crate::constants::P_SURFACE;
use crate::gas::GasMix;
use crate::physics;
use crate::profile::Phase;
use crate::result::{DecoResult, RunOptions};
use crate::scheduler::schedule_deco_stops;
use crate::tissue::TissueState;
use alloc::vec::Vec;

const HALF_TIMES: [f64; 4] = [2.5, 7.5, 20.0, 80.0];
const RATIOS: [f64; 4] = [2.3, 1.9, 1.6, 1.4];
const SAFETY_FACTOR: f64 = 0.9;
const ASCENT_PENALTY: f64 = 1.1;

pub struct Dciem;

impl Dciem {
    pub fn new() -> Self {
        Self
    }

    fn limit(&self, i: usize) -> f64 {
        RATIOS[i] * SAFETY_FACTOR
    }

    /// Cascades `minutes` of loading through the serial chain for one depth.
    fn update_serial(&self, p_n2: &mut [f64; 4], inspired_n2: f64, minutes: f64) {
        let mut input = inspired_n2;
        for i in 0..4 {
            let p0 = p_n2[i];
            let p1 = physics::schreiner(p0, input, minutes, HALF_TIMES[i]);
            p_n2[i] = p1;
            input = (p0 + p1) / 2.0;
        }
    }
}

impl Default for Dciem {
    fn default() -> Self {
        Self::new()
    }
}

impl DecoAlgorithmCore for Dciem {
    fn compartment_count(&self) -> usize {
        HALF_TIMES.len()
    }

    fn half_times(&self) -> Vec<f64> {
        HALF_TIMES.to_vec()
    }

    fn ceiling(&self, tissue: &TissueState) -> f64 {
        let mut max_depth = 0.0_f64;
        for i in 0..tissue.p_n2.len() {
            let amb_required = tissue.p_n2[i] / self.limit(i);
            let depth = (amb_required - P_SURFACE) * 10.0;
            max_depth = max_depth.max(depth.max(0.0));
        }
        max_depth
    }

    fn can_ascend(&self, tissue: &TissueState, next_depth: f64) -> bool {
        let amb = physics::depth_to_pressure(next_depth.max(0.0));
        (0..tissue.p_n2.len()).all(|i| tissue.p_n2[i] <= self.limit(i) * amb)
    }

    fn update_tissue(&self, tissue: &mut TissueState, depth: f64, gas: GasMix, minutes: f64) {
        if minutes <= 0.0 {
            return;
        }
        let inspired_n2 = physics::inspired_pressure(depth, gas.f_n2());
        let mut chain: [f64; 4] = [tissue.p_n2[0], tissue.p_n2[1], tissue.p_n2[2], tissue.p_n2[3]];
        self.update_serial(&mut chain, inspired_n2, minutes);
        tissue.p_n2.copy_from_slice(&chain);
    }

    fn m_values_at_surface(&self) -> Vec<f64> {
        (0..HALF_TIMES.len()).map(|i| self.limit(i) * P_SURFACE).collect()
    }
}

pub fn run(phases: &[Phase], options: &RunOptions) -> DecoResult {
    let algo = Dciem::new();
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

    let penalized_ascent_rate = options.deco_ascent_rate / ASCENT_PENALTY;
    let outcome = schedule_deco_stops(
        &algo,
        &mut tissue,
        first_stop_depth,
        deepest,
        options.last_stop_depth,
        penalized_ascent_rate,
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

    fn opts() -> RunOptions<'static> {
        RunOptions {
            f_o2: 0.21,
            f_he: 0.0,
            gf_low: 100,
            gf_high: 100,
            ascent_rate: 9.0,
            deco_ascent_rate: 9.0,
            gas_switches: &[],
            last_stop_depth: 3.0,
        }
    }

    #[test]
    fn test_serial_cascade_lags_downstream_compartments() {
        let algo = Dciem::new();
        let mut chain = [physics::inspired_pressure(0.0, 0.79); 4];
        algo.update_serial(&mut chain, physics::inspired_pressure(30.0, 0.79), 10.0);
        assert!(chain[0] > chain[1]);
        assert!(chain[1] > chain[2]);
        assert!(chain[2] > chain[3]);
    }

    #[test]
    fn test_shallow_no_deco() {
        let profile = build_profile(&[Stop { depth: 5.0, time: 20 }], 18.0, 9.0);
        let result = run(&profile.phases, &opts());
        assert!(result.no_deco_limit);
    }

    #[test]
    fn test_deep_deco() {
        let profile = build_profile(&[Stop { depth: 50.0, time: 25 }], 18.0, 9.0);
        let result = run(&profile.phases, &opts());
        assert!(!result.no_deco_limit);
        assert_eq!(result.compartment_count, 4);
    }
}
