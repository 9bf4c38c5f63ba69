//! §4.7 Ascent assembler: turns a [`DecoResult`]'s flat stop list plus the
//! deepest point of the dive into a phase-by-phase plan a diver (or a
//! dive computer's runtime display) can follow -- ascent legs, stops, and
//! gas switches interleaved in order. Reuses the same [`Phase`]/[`Action`]
//! types the profile builder produces so callers can splice the two
//! streams together without translation.

use crate::mathx;
use crate::profile::{Action, Phase};
use crate::result::DecoResult;
use alloc::vec::Vec;

/// Deepest-point threshold past which a no-deco "simple ascent" earns a
/// 3-minute safety stop at 6 m (§4.6 edge policy, no-algorithm path).
const SAFETY_STOP_THRESHOLD: f64 = 6.0;
const SAFETY_STOP_DEPTH: f64 = 6.0;
const SAFETY_STOP_MINUTES: i32 = 3;

struct Builder {
    phases: Vec<Phase>,
    run_time: i32,
}

impl Builder {
    fn new(run_time: i32) -> Self {
        Self { phases: Vec::new(), run_time }
    }

    fn push(&mut self, depth: f64, duration: i32, action: Action, gas: Option<alloc::string::String>, gas_switch: bool) {
        let phase = Phase {
            depth,
            duration,
            run_time: self.run_time,
            action,
            gas,
            gas_switch,
        };
        self.run_time += duration;
        self.phases.push(phase);
    }

    fn ascend(&mut self, from_depth: f64, to_depth: f64, rate: f64) {
        let duration = transit_minutes(from_depth, to_depth, rate);
        if duration > 0 {
            self.push(to_depth, duration, Action::Ascend, None, false);
        }
    }
}

/// Assembles the ascent from `deepest_depth` to the surface, threading in
/// every stop (and zero-duration gas-switch marker) the deco result
/// produced, interleaved with the transit legs between them. `run_time`
/// is the cumulative dive clock at the moment the ascent begins, so the
/// emitted phases splice directly onto the built profile's own phases.
/// When `result` carries no stops, this is the same "simple ascent"
/// routine run against an empty deco list (§4.7).
pub fn assemble(result: &DecoResult, deepest_depth: f64, run_time: i32, deco_ascent_rate: f64, ascent_rate: f64) -> Vec<Phase> {
    let mut builder = Builder::new(run_time);
    let mut cursor = deepest_depth;

    if result.deco_stops.is_empty() {
        builder.ascend(cursor, 0.0, ascent_rate);
        if deepest_depth > SAFETY_STOP_THRESHOLD {
            builder.push(SAFETY_STOP_DEPTH, SAFETY_STOP_MINUTES, Action::SafetyStop, None, false);
            builder.ascend(SAFETY_STOP_DEPTH, 0.0, ascent_rate);
        }
        return builder.phases;
    }

    for stop in &result.deco_stops {
        if cursor > stop.depth {
            builder.ascend(cursor, stop.depth, deco_ascent_rate);
            cursor = stop.depth;
        }

        if stop.gas_switch {
            builder.push(stop.depth, 0, Action::GasSwitch, stop.gas.clone(), true);
            continue;
        }

        builder.push(stop.depth, stop.time, Action::DecoStop, stop.gas.clone(), false);
    }

    builder.ascend(cursor, 0.0, ascent_rate);
    builder.phases
}

/// Total dive-clock minutes consumed by an assembled ascent.
pub fn time_to_surface(phases: &[Phase]) -> i32 {
    phases.iter().map(|p| p.duration).sum()
}

fn transit_minutes(from_depth: f64, to_depth: f64, rate: f64) -> i32 {
    let delta = mathx::abs(from_depth - to_depth);
    if delta <= 0.0 {
        return 0;
    }
    mathx::ceil(delta / rate) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{DecoResult, DecoStop};

    #[test]
    fn test_no_deco_shallow_is_a_single_ascent_phase() {
        let result = DecoResult::no_deco(5, alloc::vec![0.8; 5], alloc::vec![5.0; 5]);
        let phases = assemble(&result, 3.0, 0, 9.0, 9.0);
        assert_eq!(phases.len(), 1);
        assert_eq!(phases[0].action, Action::Ascend);
        assert_eq!(time_to_surface(&phases), 1);
    }

    #[test]
    fn test_no_deco_but_deep_adds_safety_stop() {
        let result = DecoResult::no_deco(5, alloc::vec![0.8; 5], alloc::vec![5.0; 5]);
        let phases = assemble(&result, 18.0, 0, 9.0, 9.0);
        let actions: Vec<Action> = phases.iter().map(|p| p.action).collect();
        assert_eq!(actions, alloc::vec![Action::Ascend, Action::SafetyStop, Action::Ascend]);
        assert_eq!(phases[1].depth, SAFETY_STOP_DEPTH);
        assert_eq!(phases[1].duration, SAFETY_STOP_MINUTES);
    }

    #[test]
    fn test_deco_stops_interleave_with_ascent_legs() {
        let mut result = DecoResult::no_deco(5, alloc::vec![0.8; 5], alloc::vec![5.0; 5]);
        result.no_deco_limit = false;
        result.deco_stops = alloc::vec![
            DecoStop { depth: 9.0, time: 3, gas: Some("21/0".into()), gas_switch: false },
            DecoStop { depth: 6.0, time: 0, gas: Some("50/0".into()), gas_switch: true },
            DecoStop { depth: 6.0, time: 4, gas: Some("50/0".into()), gas_switch: false },
            DecoStop { depth: 3.0, time: 8, gas: Some("50/0".into()), gas_switch: false },
        ];
        let phases = assemble(&result, 30.0, 0, 9.0, 9.0);
        let actions: Vec<Action> = phases.iter().map(|p| p.action).collect();
        assert_eq!(
            actions,
            alloc::vec![
                Action::Ascend,
                Action::DecoStop,
                Action::Ascend,
                Action::GasSwitch,
                Action::DecoStop,
                Action::Ascend,
                Action::DecoStop,
                Action::Ascend,
            ]
        );
        assert_eq!(time_to_surface(&phases), 3 + 3 + 1 + 0 + 4 + 1 + 8 + 1);
    }

    #[test]
    fn test_run_time_is_contiguous_from_start() {
        let mut result = DecoResult::no_deco(5, alloc::vec![0.8; 5], alloc::vec![5.0; 5]);
        result.no_deco_limit = false;
        result.deco_stops = alloc::vec![DecoStop { depth: 3.0, time: 5, gas: Some("21/0".into()), gas_switch: false }];
        let phases = assemble(&result, 18.0, 20, 9.0, 9.0);
        let mut prev_end = 20;
        for phase in &phases {
            assert_eq!(phase.run_time, prev_end);
            prev_end = phase.run_time + phase.duration;
        }
    }

    #[test]
    fn test_gas_switch_marker_carries_new_gas_label() {
        let mut result = DecoResult::no_deco(5, alloc::vec![0.8; 5], alloc::vec![5.0; 5]);
        result.no_deco_limit = false;
        result.deco_stops = alloc::vec![
            DecoStop { depth: 6.0, time: 0, gas: Some("50/0".into()), gas_switch: true },
            DecoStop { depth: 6.0, time: 4, gas: Some("50/0".into()), gas_switch: false },
        ];
        let phases = assemble(&result, 6.0, 0, 9.0, 9.0);
        assert_eq!(phases[0].action, Action::GasSwitch);
        assert_eq!(phases[0].gas.as_deref(), Some("50/0"));
        assert_eq!(phases[0].duration, 0);
    }
}
