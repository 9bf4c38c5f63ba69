//! §4.5.5 Workman (1965): 9 compartments, linear M-value in feet of
//! seawater. `Mi(d) = M0_i + dM_i * d_feet`.
//!
//! The classical Workman 1965 table publishes M0/dM in fsw; this crate
//! works in bar throughout, so the constants below are the same table
//! converted by the 33fsw-per-atmosphere rule (approximate, since no
//! bit-exact computer match is a project goal -- see spec.md §1 Non-goals).

use super::{round_up_to_stop_interval, DecoAlgorithmCore};
use crate::constants::METERS_TO_FEET;
use crate::gas::GasMix;
use crate::profile::Phase;
use crate::result::{DecoResult, RunOptions};
use crate::scheduler::schedule_deco_stops;
use crate::tissue::TissueState;
use alloc::vec::Vec;

const FSW_PER_ATM: f64 = 33.0;

// (half_time_minutes, M0_fsw, dM_fsw_per_ft)
const TABLE: [(f64, f64, f64); 9] = [
    (5.0, 104.0, 2.27),
    (10.0, 88.0, 2.01),
    (20.0, 72.0, 1.67),
    (40.0, 58.0, 1.34),
    (80.0, 52.0, 1.26),
    (120.0, 51.0, 1.19),
    (160.0, 50.0, 1.17),
    (200.0, 50.0, 1.15),
    (240.0, 50.0, 1.13),
];

pub struct Workman {
    half_times: [f64; 9],
    m0_bar: [f64; 9],
    dm_bar_per_ft: [f64; 9],
}

impl Workman {
    pub fn new() -> Self {
        let mut half_times = [0.0; 9];
        let mut m0_bar = [0.0; 9];
        let mut dm_bar_per_ft = [0.0; 9];
        for (i, (tau, m0, dm)) in TABLE.into_iter().enumerate() {
            half_times[i] = tau;
            m0_bar[i] = m0 / FSW_PER_ATM;
            dm_bar_per_ft[i] = dm / FSW_PER_ATM;
        }
        Self { half_times, m0_bar, dm_bar_per_ft }
    }

    fn m_value(&self, i: usize, depth_m: f64) -> f64 {
        self.m0_bar[i] + self.dm_bar_per_ft[i] * (depth_m * METERS_TO_FEET)
    }
}

impl Default for Workman {
    fn default() -> Self {
        Self::new()
    }
}

impl DecoAlgorithmCore for Workman {
    fn compartment_count(&self) -> usize {
        self.half_times.len()
    }

    fn half_times(&self) -> Vec<f64> {
        self.half_times.to_vec()
    }

    fn ceiling(&self, tissue: &TissueState) -> f64 {
        let mut max_depth = 0.0_f64;
        for i in 0..tissue.p_n2.len() {
            // p_tissue = M0 + dM * d_feet  =>  d_feet = (p_tissue - M0) / dM
            let d_feet = (tissue.p_n2[i] - self.m0_bar[i]) / self.dm_bar_per_ft[i];
            let d_m = (d_feet / METERS_TO_FEET).max(0.0);
            max_depth = max_depth.max(d_m);
        }
        max_depth
    }

    fn can_ascend(&self, tissue: &TissueState, next_depth: f64) -> bool {
        (0..tissue.p_n2.len()).all(|i| tissue.p_n2[i] <= self.m_value(i, next_depth.max(0.0)))
    }

    fn update_tissue(&self, tissue: &mut TissueState, depth: f64, gas: GasMix, minutes: f64) {
        tissue.update(depth, gas, minutes, &self.half_times, &self.half_times);
    }

    fn m_values_at_surface(&self) -> Vec<f64> {
        (0..self.half_times.len()).map(|i| self.m_value(i, 0.0)).collect()
    }
}

pub fn run(phases: &[Phase], options: &RunOptions) -> DecoResult {
    let algo = Workman::new();
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
