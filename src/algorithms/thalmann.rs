//! §4.5.6 Thalmann VVAL-18: 9 compartments with asymmetric kinetics.
//! On-gassing uses Schreiner with the uptake half-time; off-gassing below
//! the elimination threshold uses Schreiner with the elimination
//! half-time; supersaturated off-gassing uses linear elimination. This is
//! the one algorithm in the family that doesn't use the plain Schreiner
//! update from [`crate::tissue`] for both directions.

use super::{round_up_to_stop_interval, DecoAlgorithmCore};
use crate::constants::METERS_TO_FEET;
use crate::gas::GasMix;
use crate::physics;
use crate::profile::Phase;
use crate::result::{DecoResult, RunOptions};
use crate::scheduler::schedule_deco_stops;
use crate::tissue::TissueState;
use alloc::vec::Vec;

const FSW_PER_ATM: f64 = 33.0;
const SUPERSATURATION_THRESHOLD: f64 = 1.05;

// (uptake_half_time, elimination_half_time, M0_fsw, dM_fsw_per_ft)
const TABLE: [(f64, f64, f64, f64); 9] = [
    (1.0, 1.5, 104.0, 2.27),
    (2.0, 3.0, 92.0, 2.08),
    (5.0, 7.5, 80.0, 1.82),
    (10.0, 15.0, 68.0, 1.55),
    (20.0, 30.0, 60.0, 1.38),
    (40.0, 60.0, 54.0, 1.28),
    (80.0, 120.0, 51.0, 1.21),
    (160.0, 240.0, 50.0, 1.16),
    (320.0, 480.0, 49.0, 1.13),
];

pub struct Thalmann {
    uptake: [f64; 9],
    elim: [f64; 9],
    m0_bar: [f64; 9],
    dm_bar_per_ft: [f64; 9],
}

impl Thalmann {
    pub fn new() -> Self {
        let mut uptake = [0.0; 9];
        let mut elim = [0.0; 9];
        let mut m0_bar = [0.0; 9];
        let mut dm_bar_per_ft = [0.0; 9];
        for (i, (u, e, m0, dm)) in TABLE.into_iter().enumerate() {
            uptake[i] = u;
            elim[i] = e;
            m0_bar[i] = m0 / FSW_PER_ATM;
            dm_bar_per_ft[i] = dm / FSW_PER_ATM;
        }
        Self { uptake, elim, m0_bar, dm_bar_per_ft }
    }

    fn m_value(&self, i: usize, depth_m: f64) -> f64 {
        self.m0_bar[i] + self.dm_bar_per_ft[i] * (depth_m * METERS_TO_FEET)
    }
}

impl Default for Thalmann {
    fn default() -> Self {
        Self::new()
    }
}

impl DecoAlgorithmCore for Thalmann {
    fn compartment_count(&self) -> usize {
        self.uptake.len()
    }

    fn half_times(&self) -> Vec<f64> {
        self.uptake.to_vec()
    }

    fn ceiling(&self, tissue: &TissueState) -> f64 {
        let mut max_depth = 0.0_f64;
        for i in 0..tissue.p_n2.len() {
            let d_feet = (tissue.p_n2[i] - self.m0_bar[i]) / self.dm_bar_per_ft[i];
            max_depth = max_depth.max((d_feet / METERS_TO_FEET).max(0.0));
        }
        max_depth
    }

    fn can_ascend(&self, tissue: &TissueState, next_depth: f64) -> bool {
        (0..tissue.p_n2.len()).all(|i| tissue.p_n2[i] <= self.m_value(i, next_depth.max(0.0)))
    }

    fn update_tissue(&self, tissue: &mut TissueState, depth: f64, gas: GasMix, minutes: f64) {
        if minutes <= 0.0 {
            return;
        }
        let inspired_n2 = physics::inspired_pressure(depth, gas.f_n2());
        let amb = physics::depth_to_pressure(depth);
        for i in 0..tissue.p_n2.len() {
            let p0 = tissue.p_n2[i];
            tissue.p_n2[i] = if inspired_n2 >= p0 {
                physics::schreiner(p0, inspired_n2, minutes, self.uptake[i])
            } else {
                let threshold = SUPERSATURATION_THRESHOLD * amb;
                if p0 > threshold {
                    let rate = (p0 - threshold) / (2.0 * self.elim[i]);
                    (p0 - rate * minutes).max(inspired_n2)
                } else {
                    physics::schreiner(p0, inspired_n2, minutes, self.elim[i])
                }
            };
        }
    }

    fn m_values_at_surface(&self) -> Vec<f64> {
        (0..self.uptake.len()).map(|i| self.m_value(i, 0.0)).collect()
    }
}

pub fn run(phases: &[Phase], options: &RunOptions) -> DecoResult {
    let algo = Thalmann::new();
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
