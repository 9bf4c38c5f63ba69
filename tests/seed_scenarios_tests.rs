//! §8 seed end-to-end scenarios: literal input -> assertion, run against
//! the public driver/profile-builder surface rather than any one
//! algorithm's internals.

use deco_engine::algorithms::AlgorithmId;
use deco_engine::physics::calc_mod;
use deco_engine::profile::{build_profile, Action, Stop};
use deco_engine::{oxygen, DriverInput, GasMix, PlanSettingsBuilder};
pub mod fixtures;

#[test]
fn test_seed_1_single_stop_folds_transit_into_stay() {
    let profile = build_profile(&[Stop { depth: 25.0, time: 10 }], 18.0, 9.0);
    assert_eq!(profile.phases.len(), 2);

    assert_eq!(profile.phases[0].depth, 25.0);
    assert_eq!(profile.phases[0].duration, 2);
    assert_eq!(profile.phases[0].action, Action::Descend);
    assert_eq!(profile.phases[0].run_time, 0);

    assert_eq!(profile.phases[1].depth, 25.0);
    assert_eq!(profile.phases[1].duration, 8);
    assert_eq!(profile.phases[1].action, Action::Stay);
    assert_eq!(profile.phases[1].run_time, 2);

    assert_eq!(profile.last_stop_end, 10);
    assert_eq!(profile.last_depth, 25.0);
}

#[test]
fn test_seed_2_two_stops_four_phases() {
    let stops = [Stop { depth: 25.0, time: 10 }, Stop { depth: 20.0, time: 5 }];
    let profile = build_profile(&stops, 18.0, 9.0);
    let durations: Vec<i32> = profile.phases.iter().map(|p| p.duration).collect();
    assert_eq!(durations, vec![2, 8, 1, 4]);
    assert_eq!(profile.last_stop_end, 15);
}

#[test]
fn test_seed_3_buhlmann_16c_result_shape() {
    let settings = PlanSettingsBuilder::new().algorithm(AlgorithmId::Zhl16c).gradient_factors(50, 70).build().unwrap();
    let stops = [Stop { depth: 30.0, time: 20 }];
    let output = deco_engine::run_plan(DriverInput { stops: &stops, settings });
    assert_eq!(output.deco_info.compartment_count, 16);
    for stop in &output.deco_info.deco_stops {
        assert!(stop.depth <= 30.0);
    }
    let real_stops: Vec<_> = output.deco_info.deco_stops.iter().filter(|s| !s.gas_switch).collect();
    for pair in real_stops.windows(2) {
        assert!(pair[0].depth > pair[1].depth);
    }
}

#[test]
fn test_seed_4_gas_switch_reduces_deco_time() {
    let stops = [Stop { depth: 40.0, time: 25 }];

    let without_switch = PlanSettingsBuilder::new().algorithm(AlgorithmId::Zhl16c).gradient_factors(50, 80).build().unwrap();
    let with_switch = PlanSettingsBuilder::new()
        .algorithm(AlgorithmId::Zhl16c)
        .gradient_factors(50, 80)
        .deco_gases(Some(GasMix::new(0.5, 0.0)), None)
        .build()
        .unwrap();

    let plain = deco_engine::run_plan(DriverInput { stops: &stops, settings: without_switch });
    let switched = deco_engine::run_plan(DriverInput { stops: &stops, settings: with_switch });

    let plain_total: i32 = plain.deco_info.deco_stops.iter().filter(|s| !s.gas_switch).map(|s| s.time).sum();
    let switched_total: i32 = switched.deco_info.deco_stops.iter().filter(|s| !s.gas_switch).map(|s| s.time).sum();
    assert!(switched_total < plain_total);
}

#[test]
fn test_seed_5_calc_mod_values() {
    assert_eq!(calc_mod(0.21, 1.4), 56.0);
    assert_eq!(calc_mod(0.32, 1.4), 33.0);
    assert_eq!(calc_mod(1.0, 1.6), 6.0);
    assert_eq!(calc_mod(0.0, 1.4), 0.0);
}

#[test]
fn test_seed_6_cns_and_otu_on_pure_oxygen() {
    let profile = build_profile(&[Stop { depth: 6.0, time: 45 }], 18.0, 9.0);
    let oxygen = GasMix::new(1.0, 0.0);
    let exposure = oxygen::accumulate(&profile.phases, oxygen, &[]);
    assert!((exposure.cns_percent - 100.0).abs() < 5.0);

    let shorter = build_profile(&[Stop { depth: 6.0, time: 30 }], 18.0, 9.0);
    let otu_exposure = oxygen::accumulate(&shorter.phases, oxygen, &[]);
    assert!(otu_exposure.otu > 40.0 && otu_exposure.otu < 100.0);
}

#[test]
fn test_shallow_no_deco_across_every_algorithm() {
    let stops = [Stop { depth: 5.0, time: 30 }];
    for id in all_algorithms() {
        let settings = PlanSettingsBuilder::new().algorithm(id).build().unwrap();
        let output = deco_engine::run_plan(DriverInput { stops: &stops, settings });
        assert!(output.deco_info.no_deco_limit, "{id:?} should report no-deco at 5m/30min");
        assert!(output.deco_info.deco_stops.is_empty(), "{id:?} should emit no stops at 5m/30min");
    }
}

#[test]
fn test_deep_deco_across_every_algorithm() {
    let stops = [Stop { depth: 60.0, time: 20 }];
    for id in all_algorithms() {
        let settings = PlanSettingsBuilder::new().algorithm(id).build().unwrap();
        let output = deco_engine::run_plan(DriverInput { stops: &stops, settings });
        assert!(!output.deco_info.no_deco_limit, "{id:?} should require deco at 60m/20min");
        assert!(!output.deco_info.deco_stops.is_empty(), "{id:?} should emit at least one stop at 60m/20min");
    }
}

#[test]
fn test_depth_monotonicity_strict_between_20m_and_60m() {
    for id in all_algorithms() {
        let settings = PlanSettingsBuilder::new().algorithm(id).build().unwrap();
        let shallow = deco_engine::run_plan(DriverInput { stops: &[Stop { depth: 20.0, time: 20 }], settings });
        let deep = deco_engine::run_plan(DriverInput { stops: &[Stop { depth: 60.0, time: 20 }], settings });
        let shallow_total: i32 = shallow.deco_info.deco_stops.iter().filter(|s| !s.gas_switch).map(|s| s.time).sum();
        let deep_total: i32 = deep.deco_info.deco_stops.iter().filter(|s| !s.gas_switch).map(|s| s.time).sum();
        assert!(deep_total > shallow_total, "{id:?} should owe strictly more deco time at 60m than 20m");
    }
}

#[test]
fn test_time_monotonicity_at_fixed_depth() {
    for id in all_algorithms() {
        let settings = PlanSettingsBuilder::new().algorithm(id).build().unwrap();
        let short = deco_engine::run_plan(DriverInput { stops: &[Stop { depth: 45.0, time: 15 }], settings });
        let long = deco_engine::run_plan(DriverInput { stops: &[Stop { depth: 45.0, time: 35 }], settings });
        let short_total: i32 = short.deco_info.deco_stops.iter().filter(|s| !s.gas_switch).map(|s| s.time).sum();
        let long_total: i32 = long.deco_info.deco_stops.iter().filter(|s| !s.gas_switch).map(|s| s.time).sum();
        assert!(long_total >= short_total, "{id:?} should owe at least as much deco time for a longer bottom time");
    }
}

#[test]
fn test_gf_ordering_on_buhlmann_vpm_rgbm() {
    let stops = [Stop { depth: 50.0, time: 20 }];
    for id in [AlgorithmId::Zhl16c, AlgorithmId::Vpm, AlgorithmId::Rgbm] {
        let gf_30_70 = PlanSettingsBuilder::new().algorithm(id).gradient_factors(30, 70).build().unwrap();
        let gf_50_70 = PlanSettingsBuilder::new().algorithm(id).gradient_factors(50, 70).build().unwrap();
        let gf_80_100 = PlanSettingsBuilder::new().algorithm(id).gradient_factors(80, 100).build().unwrap();

        let out_30_70 = deco_engine::run_plan(DriverInput { stops: &stops, settings: gf_30_70 });
        let out_50_70 = deco_engine::run_plan(DriverInput { stops: &stops, settings: gf_50_70 });
        let out_80_100 = deco_engine::run_plan(DriverInput { stops: &stops, settings: gf_80_100 });

        let total = |out: &deco_engine::DriverOutput| -> i32 { out.deco_info.deco_stops.iter().filter(|s| !s.gas_switch).map(|s| s.time).sum() };
        assert!(total(&out_30_70) >= total(&out_50_70), "{id:?} GF 30/70 should owe at least as much deco as 50/70");
        assert!(total(&out_50_70) >= total(&out_80_100), "{id:?} GF 50/70 should owe at least as much deco as 80/100");
        assert!(out_30_70.deco_info.first_stop_depth >= out_50_70.deco_info.first_stop_depth, "{id:?} lower gf_low should not surface a shallower first stop");
    }
}

#[test]
fn test_vpm_first_stop_at_least_as_deep_as_buhlmann() {
    let stops = [Stop { depth: 60.0, time: 20 }];
    let buhlmann = PlanSettingsBuilder::new().algorithm(AlgorithmId::Zhl16c).build().unwrap();
    let vpm = PlanSettingsBuilder::new().algorithm(AlgorithmId::Vpm).build().unwrap();
    let buhlmann_out = deco_engine::run_plan(DriverInput { stops: &stops, settings: buhlmann });
    let vpm_out = deco_engine::run_plan(DriverInput { stops: &stops, settings: vpm });
    assert!(vpm_out.deco_info.first_stop_depth >= buhlmann_out.deco_info.first_stop_depth);
}

fn all_algorithms() -> [AlgorithmId; 15] {
    [
        AlgorithmId::Zhl16a,
        AlgorithmId::Zhl16b,
        AlgorithmId::Zhl16c,
        AlgorithmId::Zhl12,
        AlgorithmId::Zhl6,
        AlgorithmId::Zhl8adt,
        AlgorithmId::Vpm,
        AlgorithmId::Rgbm,
        AlgorithmId::Haldane,
        AlgorithmId::Workman,
        AlgorithmId::Thalmann,
        AlgorithmId::Dciem,
        AlgorithmId::Dsat,
        AlgorithmId::Usnavy,
        AlgorithmId::Bsac,
    ]
}
