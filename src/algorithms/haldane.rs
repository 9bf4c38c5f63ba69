//! §4.5.4 Haldane (1908): 5 compartments, fixed 2:1 supersaturation ratio.

use super::{round_up_to_stop_interval, DecoAlgorithmCore};
use crate::constants::P_SURFACE;
use crate::gas::GasMix;
use crate::physics;
use crate::profile::Phase;
use crate::result::{DecoResult, RunOptions};
use crate::scheduler::schedule_deco_stops;
use crate::tissue::TissueState;
use alloc::vec::Vec;

const HALF_TIMES: [f64; 5] = [5.0, 10.0, 20.0, 40.0, 75.0];
const RATIO: f64 = 2.0;

pub struct Haldane;

impl Haldane {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Haldane {
    fn default() -> Self {
        Self::new()
    }
}

impl DecoAlgorithmCore for Haldane {
    fn compartment_count(&self) -> usize {
        HALF_TIMES.len()
    }

    fn half_times(&self) -> Vec<f64> {
        HALF_TIMES.to_vec()
    }

    fn ceiling(&self, tissue: &TissueState) -> f64 {
        let max_p = super::max_of(&tissue.p_n2);
        let depth = (max_p / RATIO - P_SURFACE) * 10.0;
        if depth > 0.0 {
            depth
        } else {
            0.0
        }
    }

    fn can_ascend(&self, tissue: &TissueState, next_depth: f64) -> bool {
        let amb = physics::depth_to_pressure(next_depth.max(0.0));
        tissue.p_n2.iter().all(|&p| p <= RATIO * amb)
    }

    fn update_tissue(&self, tissue: &mut TissueState, depth: f64, gas: GasMix, minutes: f64) {
        tissue.update(depth, gas, minutes, &HALF_TIMES, &HALF_TIMES);
    }

    fn m_values_at_surface(&self) -> Vec<f64> {
        alloc::vec![RATIO * P_SURFACE; HALF_TIMES.len()]
    }
}

pub fn run(phases: &[Phase], options: &RunOptions) -> DecoResult {
    let algo = Haldane::new();
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
    use crate::gas::GasSwitch;
    use crate::profile::build_profile;

    fn opts(f_o2: f64) -> RunOptions<'static> {
        RunOptions {
            f_o2,
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
    fn test_shallow_no_deco() {
        let profile = build_profile(&[crate::profile::Stop { depth: 5.0, time: 30 }], 18.0, 9.0);
        let result = run(&profile.phases, &opts(0.21));
        assert!(result.no_deco_limit);
        assert!(result.deco_stops.is_empty());
    }

    #[test]
    fn test_deep_dive_requires_deco() {
        let profile = build_profile(&[crate::profile::Stop { depth: 60.0, time: 20 }], 18.0, 9.0);
        let result = run(&profile.phases, &opts(0.21));
        assert!(!result.no_deco_limit);
        assert!(!result.deco_stops.is_empty());
    }

    #[test]
    fn test_result_shape() {
        let profile = build_profile(&[crate::profile::Stop { depth: 60.0, time: 20 }], 18.0, 9.0);
        let result = run(&profile.phases, &opts(0.21));
        assert_eq!(result.compartment_count, 5);
        assert_eq!(result.tissue_loading.len(), 5);
        let _ = GasSwitch { depth: 0.0, gas: GasMix::air() };
    }
}
