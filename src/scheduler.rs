//! §4.6 Deco scheduler: generic over any algorithm with `can_ascend`.
//! Drives ascent at 3m intervals, allocating per-stop time by 1-minute
//! simulation. This is the one piece of control flow every §4.5 algorithm
//! that computes mandatory stops shares; table algorithms (§4.5.8) bypass
//! it entirely since their stops come from a published lookup.

use crate::algorithms::DecoAlgorithmCore;
use crate::constants::{MAX_STOP_MINUTES, STOP_INTERVAL};
use crate::gas::GasMix;
use crate::mathx;
use crate::result::DecoStop;
use crate::tissue::TissueState;
use alloc::vec::Vec;

pub struct ScheduleOutcome {
    pub stops: Vec<DecoStop>,
    pub iteration_cap_reached: bool,
}

/// Drives ascent from `first_stop_depth` down to `last_stop_depth` in
/// `STOP_INTERVAL` decrements, mutating `working` tissue state in place
/// and returning the emitted deco stops (deepest first).
pub fn schedule_deco_stops<A: DecoAlgorithmCore>(
    algorithm: &A,
    working: &mut TissueState,
    first_stop_depth: f64,
    deepest_user_depth: f64,
    last_stop_depth: f64,
    deco_ascent_rate: f64,
    mut get_gas_at: impl FnMut(f64) -> GasMix,
) -> ScheduleOutcome {
    let mut stops = Vec::new();
    let mut iteration_cap_reached = false;
    let mut current = first_stop_depth;
    let mut prev_depth = deepest_user_depth;
    let mut prev_gas: Option<GasMix> = None;

    while current >= last_stop_depth && current > 0.0 {
        let gas = get_gas_at(current);

        let transit = if prev_depth > current {
            mathx::ceil((prev_depth - current) / deco_ascent_rate)
        } else {
            0.0
        };
        algorithm.update_tissue(working, current, gas, transit);

        let next_depth = current - STOP_INTERVAL;
        let mut sim = working.clone();
        let mut stop_time: u32 = 0;
        let mut broke = false;
        for minute in 1..MAX_STOP_MINUTES {
            if algorithm.can_ascend(&sim, next_depth) {
                stop_time = minute;
                broke = true;
                break;
            }
            algorithm.update_tissue(&mut sim, current, gas, 1.0);
            stop_time = minute + 1;
        }
        if !broke {
            iteration_cap_reached = true;
        }

        if let Some(pg) = prev_gas {
            if pg != gas {
                stops.push(DecoStop {
                    depth: current,
                    time: 0,
                    gas: Some(gas.label()),
                    gas_switch: true,
                });
            }
        }

        let emitted_time = stop_time.max(1) as i32;
        stops.push(DecoStop {
            depth: current,
            time: emitted_time,
            gas: Some(gas.label()),
            gas_switch: false,
        });

        algorithm.update_tissue(working, current, gas, stop_time as f64);

        prev_depth = current;
        prev_gas = Some(gas);
        current -= STOP_INTERVAL;
    }

    ScheduleOutcome { stops, iteration_cap_reached }
}
