use deco_engine::algorithms::AlgorithmId;
use deco_engine::{DriverInput, PlanSettingsBuilder, Stop};

/// Runs the same profile through every algorithm that accepts it and
/// prints total deco time side by side, the way a host comparison view
/// would.
fn main() {
    let stops = [Stop { depth: 50.0, time: 20 }];

    let ids = [
        AlgorithmId::Zhl16c,
        AlgorithmId::Vpm,
        AlgorithmId::Rgbm,
        AlgorithmId::Haldane,
        AlgorithmId::Workman,
        AlgorithmId::Thalmann,
        AlgorithmId::Dciem,
        AlgorithmId::Dsat,
        AlgorithmId::Usnavy,
        AlgorithmId::Bsac,
    ];

    for id in ids {
        let settings = PlanSettingsBuilder::new().algorithm(id).gradient_factors(50, 80).build().expect("valid settings");
        let output = deco_engine::run_plan(DriverInput { stops: &stops, settings });
        let deco_minutes: i32 = output.deco_info.deco_stops.iter().map(|s| s.time).sum();
        println!("{id:?}: {deco_minutes} min of deco, first stop {} m", output.deco_info.first_stop_depth);
    }
}
