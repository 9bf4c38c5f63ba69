//! §2 item 13 / §6 driver: wires the whole pipeline together -- profile
//! builder, gas model, algorithm dispatch, ascent assembler -- into the
//! single entry point a host application calls per dive plan.

use crate::algorithms::{run_algorithm, AlgorithmId};
use crate::ascent;
use crate::config::PlanSettings;
use crate::gas::{GasMix, GasSwitch};
use crate::profile::{build_profile, Action, Phase, ProfilePoint, Stop};
use crate::result::{DecoResult, RunOptions};
use alloc::vec::Vec;

/// Matches §6's driver input shape, with [`PlanSettings`] covering every
/// field but the stop list itself.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverInput<'a> {
    pub stops: &'a [Stop],
    pub settings: PlanSettings,
}

/// §6's driver output shape: `{ points[], phases[], total_time, deco_info }`.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverOutput {
    pub points: Vec<ProfilePoint>,
    pub phases: Vec<Phase>,
    pub total_time: i32,
    pub deco_info: DecoResult,
}

/// One minute of notional exposure charged to a gas-switch marker when
/// `gas_switch_time_flag` asks for it not to be instantaneous.
const GAS_SWITCH_MINUTES: i32 = 1;

fn gas_switches_from(settings: &PlanSettings) -> Vec<GasSwitch> {
    let mut switches = Vec::new();
    if let Some(gas) = settings.deco_gas_1 {
        switches.push(GasSwitch { depth: gas.mod_depth(settings.ppo2_deco), gas });
    }
    if let Some(gas) = settings.deco_gas_2 {
        switches.push(GasSwitch { depth: gas.mod_depth(settings.ppo2_deco), gas });
    }
    switches
}

fn deepest_point(phases: &[Phase]) -> f64 {
    phases.iter().map(|p| p.depth).fold(0.0, f64::max)
}

/// Re-threads `run_time` sequentially and, when `enabled`, inflates every
/// gas-switch marker to [`GAS_SWITCH_MINUTES`] instead of zero duration.
fn finalize_ascent_phases(mut phases: Vec<Phase>, start_run_time: i32, gas_switch_time_flag: bool) -> Vec<Phase> {
    let mut run_time = start_run_time;
    for phase in &mut phases {
        if gas_switch_time_flag && phase.action == Action::GasSwitch {
            phase.duration = GAS_SWITCH_MINUTES;
        }
        phase.run_time = run_time;
        run_time += phase.duration;
    }
    phases
}

fn points_from_phases(start_time: i32, phases: &[Phase]) -> Vec<ProfilePoint> {
    let mut points = Vec::with_capacity(phases.len());
    let mut time = start_time;
    for phase in phases {
        time = phase.run_time + phase.duration;
        if phase.duration > 0 {
            points.push(ProfilePoint { time, depth: phase.depth });
        }
    }
    points
}

/// Runs the full pipeline for one dive plan: builds the phase stream,
/// dispatches the chosen algorithm, and assembles the resulting ascent
/// (stops and gas switches for an algorithm that produced any, or a
/// simple ascent -- with the §4.6 safety-stop edge policy -- otherwise).
pub fn run_plan(input: DriverInput) -> DriverOutput {
    let settings = &input.settings;
    let profile = build_profile(input.stops, settings.descent_rate, settings.ascent_rate);
    let gas_switches = gas_switches_from(settings);

    let options = RunOptions {
        f_o2: settings.f_o2,
        f_he: settings.f_he,
        gf_low: settings.gf_low,
        gf_high: settings.gf_high,
        ascent_rate: settings.ascent_rate,
        deco_ascent_rate: settings.deco_ascent_rate,
        gas_switches: &gas_switches,
        last_stop_depth: settings.last_stop_depth,
    };

    let deco_info = match run_algorithm(settings.algorithm_id, &profile.phases, &options) {
        Some(result) => result,
        None => DecoResult::no_deco(0, Vec::new(), Vec::new()),
    };

    let deepest = deepest_point(&profile.phases).max(profile.last_depth);
    let raw_ascent = ascent::assemble(&deco_info, deepest, profile.last_stop_end, settings.deco_ascent_rate, settings.ascent_rate);
    let ascent_phases = finalize_ascent_phases(raw_ascent, profile.last_stop_end, settings.gas_switch_time_flag);

    let mut points = profile.points.clone();
    points.extend(points_from_phases(profile.last_stop_end, &ascent_phases));

    let mut phases = profile.phases;
    phases.extend(ascent_phases);

    let total_time = points.last().map(|p| p.time).unwrap_or(profile.last_stop_end);

    DriverOutput { points, phases, total_time, deco_info }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::AlgorithmId;

    fn settings(algorithm_id: AlgorithmId) -> PlanSettings {
        PlanSettings { algorithm_id, ..PlanSettings::default() }
    }

    #[test]
    fn test_shallow_dive_ends_with_simple_ascent_and_no_deco() {
        let stops = [Stop { depth: 12.0, time: 15 }];
        let output = run_plan(DriverInput { stops: &stops, settings: settings(AlgorithmId::Zhl16c) });
        assert!(output.deco_info.no_deco_limit);
        assert!(output.phases.iter().any(|p| p.action == Action::Ascend));
        assert_eq!(output.points.last().unwrap().depth, 0.0);
    }

    #[test]
    fn test_deep_dive_adds_deco_stop_phases() {
        let stops = [Stop { depth: 45.0, time: 30 }];
        let mut plan_settings = settings(AlgorithmId::Zhl16c);
        plan_settings.gf_low = 30;
        plan_settings.gf_high = 80;
        let output = run_plan(DriverInput { stops: &stops, settings: plan_settings });
        assert!(!output.deco_info.no_deco_limit);
        assert!(output.phases.iter().any(|p| p.action == Action::DecoStop));
    }

    #[test]
    fn test_no_algorithm_is_simple_ascent_with_safety_stop() {
        let stops = [Stop { depth: 20.0, time: 20 }];
        let output = run_plan(DriverInput { stops: &stops, settings: settings(AlgorithmId::None) });
        assert!(output.phases.iter().any(|p| p.action == Action::SafetyStop));
    }

    #[test]
    fn test_total_time_matches_last_point() {
        let stops = [Stop { depth: 18.0, time: 10 }];
        let output = run_plan(DriverInput { stops: &stops, settings: settings(AlgorithmId::Haldane) });
        assert_eq!(output.total_time, output.points.last().unwrap().time);
    }

    #[test]
    fn test_gas_switch_time_flag_inflates_marker_duration() {
        let stops = [Stop { depth: 45.0, time: 30 }];
        let mut plan_settings = settings(AlgorithmId::Zhl16c);
        plan_settings.f_he = 0.25;
        plan_settings.gf_low = 30;
        plan_settings.gf_high = 70;
        plan_settings.deco_gas_1 = Some(GasMix::new(0.5, 0.0));
        plan_settings.gas_switch_time_flag = true;
        let output = run_plan(DriverInput { stops: &stops, settings: plan_settings });
        let switch = output.phases.iter().find(|p| p.action == Action::GasSwitch);
        if let Some(switch) = switch {
            assert_eq!(switch.duration, GAS_SWITCH_MINUTES);
        }
    }
}
