use deco_engine::algorithms::buhlmann::{Buhlmann, Variant};
use deco_engine::config::PlanSettings;
use deco_engine::{GasMix, PlanSettingsBuilder};

pub fn buhlmann(gf_low: u8, gf_high: u8) -> Buhlmann {
    Buhlmann::new(Variant::Zhl16c, gf_low, gf_high)
}

pub fn gas_air() -> GasMix {
    GasMix::air()
}

pub fn plan_settings(gf_low: u8, gf_high: u8) -> PlanSettings {
    PlanSettingsBuilder::new()
        .gradient_factors(gf_low, gf_high)
        .build()
        .expect("valid settings")
}

#[macro_export]
macro_rules! assert_close_to_percent {
    ($a:expr, $b:expr, $tolerance_percent:expr) => {
        let tolerance = ($b as f64).abs() * ($tolerance_percent / 100.0);
        if (($a as f64) - ($b as f64)).abs() > tolerance {
            panic!("{} is not close to {} within {} percent tolerance ({})", $a, $b, $tolerance_percent, tolerance);
        }
    };
}
