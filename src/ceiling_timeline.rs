//! §4.11 Ceiling timeline: replays the whole profile (bottom + deco) one
//! minute at a time, interpolating depth linearly between adjacent
//! profile points, and records the ceiling at every minute for plotting
//! against the depth profile. Generic over [`DecoAlgorithmCore`] like the
//! scheduler and NDL solver; table algorithms don't produce one since
//! their tissue loading is display-only.

use crate::algorithms::DecoAlgorithmCore;
use crate::gas::GasMix;
use crate::profile::{Phase, ProfilePoint};
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CeilingPoint {
    pub time: i32,
    pub depth: f64,
    pub ceiling: f64,
}

/// Linear interpolation of depth at `minute` between the bracketing
/// [`ProfilePoint`]s. Clamps to the first/last point outside the range.
fn depth_at(points: &[ProfilePoint], minute: i32) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    if minute <= points[0].time {
        return points[0].depth;
    }
    let last = points[points.len() - 1];
    if minute >= last.time {
        return last.depth;
    }
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if minute >= a.time && minute <= b.time {
            if b.time == a.time {
                return b.depth;
            }
            let frac = (minute - a.time) as f64 / (b.time - a.time) as f64;
            return a.depth + (b.depth - a.depth) * frac;
        }
    }
    last.depth
}

/// Active gas at `minute`: the tag on whichever phase covers it, falling
/// back to the bottom gas when untagged or uncovered.
fn gas_at(phases: &[Phase], minute: i32, bottom_gas: GasMix) -> GasMix {
    for phase in phases {
        if minute > phase.run_time && minute <= phase.run_time + phase.duration {
            if let Some(gas) = phase.gas.as_deref().and_then(GasMix::parse_label) {
                return gas;
            }
            return bottom_gas;
        }
    }
    bottom_gas
}

/// Replays `points` (the full profile: bottom phases plus any appended
/// ascent/deco legs) minute by minute, resolving the active gas from
/// `phases`' tags at each minute and recording the algorithm's ceiling.
pub fn compute<A: DecoAlgorithmCore>(
    algo: &A,
    points: &[ProfilePoint],
    phases: &[Phase],
    bottom_gas: GasMix,
) -> Vec<CeilingPoint> {
    let mut tissue = algo.initial_tissue(bottom_gas);
    let total_minutes = points.last().map(|p| p.time).unwrap_or(0);
    let mut out = Vec::with_capacity(total_minutes.max(0) as usize);

    for minute in 1..=total_minutes {
        let depth = depth_at(points, minute);
        let gas = gas_at(phases, minute, bottom_gas);
        algo.update_tissue(&mut tissue, depth, gas, 1.0);
        out.push(CeilingPoint { time: minute, depth, ceiling: algo.ceiling(&tissue) });
    }

    out
}
