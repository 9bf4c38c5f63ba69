use deco_engine::algorithms::buhlmann::{Buhlmann, Variant};
use deco_engine::profile::{build_profile, Stop};
use deco_engine::{compute_ceiling_timeline, GasMix};

fn main() {
    let profile = build_profile(&[Stop { depth: 45.0, time: 25 }, Stop { depth: 5.0, time: 5 }], 18.0, 9.0);
    let algo = Buhlmann::new(Variant::Zhl16c, 30, 70);

    let timeline = compute_ceiling_timeline(&algo, &profile.points, &profile.phases, GasMix::air());
    for point in timeline.iter().filter(|p| p.ceiling > 0.0) {
        println!("t={:>3} min  depth={:>5.1} m  ceiling={:>5.1} m", point.time, point.depth, point.ceiling);
    }
}
