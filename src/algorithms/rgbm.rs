//! §4.5.3 RGBM: dual-phase bubble-probability model, approximated here as
//! Bühlmann-style M-values scaled by four reduction-factor multipliers --
//! a linear-in-compartment factor (fast tissues see the steepest
//! reduction, since fast-tissue bubble growth dominates RGBM's
//! probability term), an ascent-rate band, a depth band, and a
//! diminishing factor for total elapsed dive time -- times a single
//! overall conservatism scalar, the same role gf_high plays for VPM-B
//! (§11 supplement). The resulting allowed pressure is bounded below at
//! `1.01 * P_amb` so the model never demands an ascent past the diver's
//! own position.

use super::{round_up_to_stop_interval, DecoAlgorithmCore};
use crate::constants::P_SURFACE;
use crate::gas::GasMix;
use crate::physics;
use crate::profile::Phase;
use crate::result::{DecoResult, RunOptions};
use crate::scheduler::schedule_deco_stops;
use crate::tissue::TissueState;
use alloc::vec::Vec;
use core::cell::Cell;

// (half_time, a, b), N2 side of the ZHL-16C table -- RGBM has no published
// coefficient set of its own, so this crate reuses Bühlmann's as the
// underlying tissue/M-value substrate and layers the reduction factors on top.
const TABLE: [(f64, f64, f64); 16] = [
    (4.0, 1.2599, 0.5050),
    (8.0, 1.0000, 0.6514),
    (12.5, 0.8618, 0.7222),
    (18.5, 0.7562, 0.7825),
    (27.0, 0.6200, 0.8126),
    (38.3, 0.5043, 0.8434),
    (54.3, 0.4410, 0.8693),
    (77.0, 0.4000, 0.8910),
    (109.0, 0.3750, 0.9092),
    (146.0, 0.3500, 0.9222),
    (187.0, 0.3295, 0.9319),
    (239.0, 0.3065, 0.9403),
    (305.0, 0.2835, 0.9477),
    (390.0, 0.2610, 0.9544),
    (498.0, 0.2480, 0.9602),
    (635.0, 0.2327, 0.9653),
];

// Fast -> slow reduction-factor bands, four compartments per band.
const REDUCTION_FACTORS: [f64; 4] = [0.80, 0.85, 0.90, 0.95];

const AMBIENT_FLOOR_MULTIPLIER: f64 = 1.01;

fn reduction_factor(i: usize) -> f64 {
    REDUCTION_FACTORS[(i / 4).min(3)]
}

/// Ascent-rate band multiplier: ≤10 m/min is unpenalized, 10-18 is mild,
/// >18 m/min (outrunning off-gassing bubbles) is penalized hardest.
fn ascent_rate_band_factor(rate_mpm: f64) -> f64 {
    if rate_mpm <= 10.0 {
        1.0
    } else if rate_mpm <= 18.0 {
        0.95
    } else {
        0.85
    }
}

/// Depth band multiplier: deeper stops see a larger bubble population and
/// are penalized more.
fn depth_band_factor(depth: f64) -> f64 {
    if depth < 18.0 {
        1.0
    } else if depth <= 40.0 {
        0.92
    } else {
        0.85
    }
}

/// Diminishing factor for total elapsed dive time -- longer exposures
/// accumulate more bubble nuclei, capped at a 15% reduction.
fn time_diminishing_factor(elapsed_minutes: f64) -> f64 {
    (1.0 - (elapsed_minutes / 500.0).min(0.15)).max(0.85)
}

pub struct Rgbm {
    conservatism: f64,
    ascent_rate_mpm: Cell<f64>,
    elapsed_minutes: Cell<f64>,
    prev_depth: Cell<f64>,
}

impl Rgbm {
    pub fn new(gf_high: u8) -> Self {
        Self {
            conservatism: (gf_high as f64 / 100.0).clamp(0.01, 1.0),
            ascent_rate_mpm: Cell::new(0.0),
            elapsed_minutes: Cell::new(0.0),
            prev_depth: Cell::new(0.0),
        }
    }

    fn effective_gf(&self, i: usize, depth_for_band: f64) -> f64 {
        reduction_factor(i)
            * self.conservatism
            * ascent_rate_band_factor(self.ascent_rate_mpm.get())
            * depth_band_factor(depth_for_band)
            * time_diminishing_factor(self.elapsed_minutes.get())
    }

    fn min_tolerable_amb(&self, i: usize, p_n2: f64, depth_for_band: f64, floor: f64) -> f64 {
        let (_, a, b) = TABLE[i];
        let gf = self.effective_gf(i, depth_for_band);
        let b_adj = b / (gf - gf * b + b);
        ((p_n2 - a * gf) * b_adj).max(floor)
    }

    /// Required ambient pressure, iterated twice since the depth band and
    /// ambient floor both depend on the stop pressure they constrain.
    fn required_ambient(&self, tissue: &TissueState) -> f64 {
        let mut p_stop = P_SURFACE;
        for _ in 0..2 {
            let depth_for_band = physics::pressure_to_depth(p_stop).max(0.0);
            let floor = AMBIENT_FLOOR_MULTIPLIER * p_stop;
            let mut max_amb = P_SURFACE;
            for i in 0..tissue.p_n2.len() {
                max_amb = max_amb.max(self.min_tolerable_amb(i, tissue.p_n2[i], depth_for_band, floor));
            }
            p_stop = max_amb;
        }
        p_stop
    }
}

impl DecoAlgorithmCore for Rgbm {
    fn compartment_count(&self) -> usize {
        TABLE.len()
    }

    fn half_times(&self) -> Vec<f64> {
        TABLE.iter().map(|&(ht, _, _)| ht).collect()
    }

    fn ceiling(&self, tissue: &TissueState) -> f64 {
        physics::pressure_to_depth(self.required_ambient(tissue))
    }

    fn can_ascend(&self, tissue: &TissueState, next_depth: f64) -> bool {
        let next_amb = physics::depth_to_pressure(next_depth.max(0.0));
        let floor = AMBIENT_FLOOR_MULTIPLIER * next_amb;
        (0..tissue.p_n2.len())
            .all(|i| self.min_tolerable_amb(i, tissue.p_n2[i], next_depth.max(0.0), floor) <= next_amb)
    }

    fn update_tissue(&self, tissue: &mut TissueState, depth: f64, gas: GasMix, minutes: f64) {
        if minutes > 0.0 {
            let prev = self.prev_depth.get();
            if depth < prev {
                self.ascent_rate_mpm.set((prev - depth) / minutes);
            }
            self.elapsed_minutes.set(self.elapsed_minutes.get() + minutes);
            self.prev_depth.set(depth);
        }
        let half_times: Vec<f64> = self.half_times();
        tissue.update(depth, gas, minutes, &half_times, &half_times);
    }

    /// Tissue pressure at which the ceiling would sit exactly at the surface.
    fn m_values_at_surface(&self) -> Vec<f64> {
        (0..TABLE.len())
            .map(|i| {
                let (_, a, b) = TABLE[i];
                let gf = self.effective_gf(i, 0.0);
                let b_adj = b / (gf - gf * b + b);
                P_SURFACE / b_adj + a * gf
            })
            .collect()
    }
}

pub fn run(phases: &[Phase], options: &RunOptions) -> DecoResult {
    let algo = Rgbm::new(options.gf_high);
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
