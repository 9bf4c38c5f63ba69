//! §4.2 Profile builder: turns a user plan (stops) into a phase stream,
//! folding transit time into the planned stop duration, and a parallel
//! list of profile points for plotting/interpolation.

use crate::mathx;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_DESCENT_RATE: f64 = 18.0;
pub const DEFAULT_ASCENT_RATE: f64 = 9.0;

/// A user-planned stop: depth and time, input-order-significant.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Stop {
    pub depth: f64,
    pub time: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Action {
    Descend,
    Ascend,
    Stay,
    DecoStop,
    GasSwitch,
    SafetyStop,
}

/// One leg of the simulation stream.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Phase {
    pub depth: f64,
    pub duration: i32,
    pub run_time: i32,
    pub action: Action,
    pub gas: Option<alloc::string::String>,
    pub gas_switch: bool,
}

impl Phase {
    fn new(depth: f64, duration: i32, run_time: i32, action: Action) -> Self {
        Self {
            depth,
            duration,
            run_time,
            action,
            gas: None,
            gas_switch: false,
        }
    }
}

/// A plotted point: minute + depth. Used to interpolate depth at any
/// minute for the ceiling timeline (§4.11).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProfilePoint {
    pub time: i32,
    pub depth: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuiltProfile {
    pub points: Vec<ProfilePoint>,
    pub phases: Vec<Phase>,
    pub last_stop_end: i32,
    pub last_depth: f64,
}

/// Average depth used when a phase's exposure (oxygen, gas consumption)
/// is charged at a single representative depth: half the end depth for
/// transit phases (Ascend/Descend), the depth itself otherwise.
pub fn average_depth(phase: &Phase) -> f64 {
    match phase.action {
        Action::Ascend | Action::Descend => phase.depth / 2.0,
        _ => phase.depth,
    }
}

/// §4.2 algorithm. Transit is consumed from the planned stop time, not
/// added: `25m : 10min` means ten minutes from leaving the surface until
/// leaving 25m.
pub fn build_profile(stops: &[Stop], descent_rate: f64, ascent_rate: f64) -> BuiltProfile {
    let mut points = Vec::new();
    let mut phases = Vec::new();
    let mut t_cum: i32 = 0;
    let mut d_cur: f64 = 0.0;
    points.push(ProfilePoint { time: 0, depth: 0.0 });

    for stop in stops {
        let delta_d = mathx::abs(stop.depth - d_cur);
        let (rate, action) = if stop.depth > d_cur {
            (descent_rate, Action::Descend)
        } else if stop.depth < d_cur {
            (ascent_rate, Action::Ascend)
        } else {
            (descent_rate, Action::Stay)
        };
        let transit: i32 = if delta_d > 0.0 {
            mathx::ceil(delta_d / rate) as i32
        } else {
            0
        };
        let stay = (stop.time - transit).max(0);

        if transit > 0 {
            t_cum += transit;
            phases.push(Phase::new(stop.depth, transit, t_cum - transit, action));
            points.push(ProfilePoint { time: t_cum, depth: stop.depth });
        }
        if stay > 0 {
            t_cum += stay;
            phases.push(Phase::new(stop.depth, stay, t_cum - stay, Action::Stay));
            points.push(ProfilePoint { time: t_cum, depth: stop.depth });
        }

        d_cur = stop.depth;
    }

    BuiltProfile {
        points,
        phases,
        last_stop_end: t_cum,
        last_depth: d_cur,
    }
}
