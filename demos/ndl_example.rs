use deco_engine::algorithms::buhlmann::{Buhlmann, Variant};
use deco_engine::{ndl, GasMix};

fn main() {
    let algo = Buhlmann::new(Variant::Zhl16c, 100, 100);
    let air = GasMix::air();

    for depth in [15.0, 21.0, 30.0, 40.0] {
        let minutes = ndl::solve(&algo, depth, air);
        println!("NDL at {depth:>3.0} m on air: {minutes} min");
    }
}
