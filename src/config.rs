//! §10 ambient stack: builder-style configuration, one per algorithm
//! family plus a top-level [`PlanSettings`] for the driver, each mirroring
//! the teacher's `BuhlmannConfig::with_gradient_factors()` /
//! `BuhlmannConfig::validate()` pattern -- fluent setters that return
//! `Self`, and a `validate()` gate invoked once at construction time
//! rather than threaded through every call site.

use crate::algorithms::buhlmann::Variant as BuhlmannVariant;
use crate::algorithms::{AlgorithmId, CeilingType};
use crate::error::{ConfigValidationErr, DecoModelConfig};
use crate::gas::GasMix;

fn validate_gf(field: &str, value: u8) -> Result<(), ConfigValidationErr> {
    if !(1..=100).contains(&value) {
        return Err(ConfigValidationErr::new(field, "gradient factor must be in 1..=100"));
    }
    Ok(())
}

fn validate_rate(field: &str, value: f64) -> Result<(), ConfigValidationErr> {
    if !(value > 0.0 && value <= 30.0) {
        return Err(ConfigValidationErr::new(field, "rate must be a positive number of meters per minute, capped at 30"));
    }
    Ok(())
}

/// Bühlmann family configuration: variant, gradient factors, and the
/// §11-supplemented ceiling type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuhlmannConfig {
    pub variant: BuhlmannVariant,
    pub gf_low: u8,
    pub gf_high: u8,
    pub ceiling_type: CeilingType,
}

impl Default for BuhlmannConfig {
    fn default() -> Self {
        Self {
            variant: BuhlmannVariant::Zhl16c,
            gf_low: 100,
            gf_high: 100,
            ceiling_type: CeilingType::Actual,
        }
    }
}

impl BuhlmannConfig {
    pub fn with_variant(mut self, variant: BuhlmannVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_gradient_factors(mut self, gf_low: u8, gf_high: u8) -> Self {
        self.gf_low = gf_low;
        self.gf_high = gf_high;
        self
    }

    pub fn with_ceiling_type(mut self, ceiling_type: CeilingType) -> Self {
        self.ceiling_type = ceiling_type;
        self
    }
}

impl DecoModelConfig for BuhlmannConfig {
    fn validate(&self) -> Result<(), ConfigValidationErr> {
        validate_gf("gf_low", self.gf_low)?;
        validate_gf("gf_high", self.gf_high)?;
        if self.gf_low > self.gf_high {
            return Err(ConfigValidationErr::new("gf_low", "gf_low must not exceed gf_high"));
        }
        Ok(())
    }
}

/// VPM-B configuration: same gradient-factor conservatism slope as
/// Bühlmann (§4.5.2: "GF in VPM-B is repurposed as a conservatism scalar").
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VpmConfig {
    pub gf_low: u8,
    pub gf_high: u8,
}

impl Default for VpmConfig {
    fn default() -> Self {
        Self { gf_low: 100, gf_high: 100 }
    }
}

impl VpmConfig {
    pub fn with_gradient_factors(mut self, gf_low: u8, gf_high: u8) -> Self {
        self.gf_low = gf_low;
        self.gf_high = gf_high;
        self
    }
}

impl DecoModelConfig for VpmConfig {
    fn validate(&self) -> Result<(), ConfigValidationErr> {
        validate_gf("gf_low", self.gf_low)?;
        validate_gf("gf_high", self.gf_high)?;
        if self.gf_low > self.gf_high {
            return Err(ConfigValidationErr::new("gf_low", "gf_low must not exceed gf_high"));
        }
        Ok(())
    }
}

/// RGBM configuration: a single conservatism scalar (§4.5.3 uses
/// `gf_high` in the same role).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RgbmConfig {
    pub conservatism: u8,
}

impl Default for RgbmConfig {
    fn default() -> Self {
        Self { conservatism: 100 }
    }
}

impl RgbmConfig {
    pub fn with_conservatism(mut self, conservatism: u8) -> Self {
        self.conservatism = conservatism;
        self
    }
}

impl DecoModelConfig for RgbmConfig {
    fn validate(&self) -> Result<(), ConfigValidationErr> {
        validate_gf("conservatism", self.conservatism)
    }
}

/// Top-level driver configuration (§6 driver input), built fluently and
/// validated once before being handed to [`crate::driver::run_plan`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanSettings {
    pub algorithm_id: AlgorithmId,
    pub f_o2: f64,
    pub f_he: f64,
    pub gf_low: u8,
    pub gf_high: u8,
    pub descent_rate: f64,
    pub ascent_rate: f64,
    pub deco_ascent_rate: f64,
    pub ppo2_max: f64,
    pub ppo2_deco: f64,
    pub deco_gas_1: Option<GasMix>,
    pub deco_gas_2: Option<GasMix>,
    pub gas_switch_time_flag: bool,
    pub last_stop_depth: f64,
    pub sac_rate: f64,
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self {
            algorithm_id: AlgorithmId::Zhl16c,
            f_o2: 0.21,
            f_he: 0.0,
            gf_low: 100,
            gf_high: 100,
            descent_rate: crate::profile::DEFAULT_DESCENT_RATE,
            ascent_rate: crate::profile::DEFAULT_ASCENT_RATE,
            deco_ascent_rate: crate::profile::DEFAULT_ASCENT_RATE,
            ppo2_max: 1.4,
            ppo2_deco: 1.6,
            deco_gas_1: None,
            deco_gas_2: None,
            gas_switch_time_flag: false,
            last_stop_depth: 3.0,
            sac_rate: 20.0,
        }
    }
}

/// Fluent builder over [`PlanSettings`], mirroring
/// `BuhlmannConfig::default().gradient_factors(...)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlanSettingsBuilder {
    settings: PlanSettings,
}

impl PlanSettingsBuilder {
    pub fn new() -> Self {
        Self { settings: PlanSettings::default() }
    }

    pub fn algorithm(mut self, algorithm_id: AlgorithmId) -> Self {
        self.settings.algorithm_id = algorithm_id;
        self
    }

    pub fn bottom_gas(mut self, f_o2: f64, f_he: f64) -> Self {
        self.settings.f_o2 = f_o2;
        self.settings.f_he = f_he;
        self
    }

    pub fn gradient_factors(mut self, gf_low: u8, gf_high: u8) -> Self {
        self.settings.gf_low = gf_low;
        self.settings.gf_high = gf_high;
        self
    }

    pub fn rates(mut self, descent_rate: f64, ascent_rate: f64, deco_ascent_rate: f64) -> Self {
        self.settings.descent_rate = descent_rate;
        self.settings.ascent_rate = ascent_rate;
        self.settings.deco_ascent_rate = deco_ascent_rate;
        self
    }

    pub fn ppo2_limits(mut self, ppo2_max: f64, ppo2_deco: f64) -> Self {
        self.settings.ppo2_max = ppo2_max;
        self.settings.ppo2_deco = ppo2_deco;
        self
    }

    pub fn deco_gases(mut self, deco_gas_1: Option<GasMix>, deco_gas_2: Option<GasMix>) -> Self {
        self.settings.deco_gas_1 = deco_gas_1;
        self.settings.deco_gas_2 = deco_gas_2;
        self
    }

    pub fn gas_switch_time_flag(mut self, flag: bool) -> Self {
        self.settings.gas_switch_time_flag = flag;
        self
    }

    pub fn last_stop_depth(mut self, depth: f64) -> Self {
        self.settings.last_stop_depth = depth;
        self
    }

    pub fn sac_rate(mut self, sac_rate: f64) -> Self {
        self.settings.sac_rate = sac_rate;
        self
    }

    pub fn build(self) -> Result<PlanSettings, ConfigValidationErr> {
        self.settings.validate()?;
        Ok(self.settings)
    }
}

impl DecoModelConfig for PlanSettings {
    fn validate(&self) -> Result<(), ConfigValidationErr> {
        validate_gf("gf_low", self.gf_low)?;
        validate_gf("gf_high", self.gf_high)?;
        if self.gf_low > self.gf_high {
            return Err(ConfigValidationErr::new("gf_low", "gf_low must not exceed gf_high"));
        }
        validate_rate("descent_rate", self.descent_rate)?;
        validate_rate("ascent_rate", self.ascent_rate)?;
        validate_rate("deco_ascent_rate", self.deco_ascent_rate)?;
        if self.last_stop_depth != 3.0 && self.last_stop_depth != 6.0 {
            return Err(ConfigValidationErr::new("last_stop_depth", "must be 3 or 6 meters"));
        }
        if self.sac_rate <= 0.0 {
            return Err(ConfigValidationErr::new("sac_rate", "must be positive"));
        }
        Ok(())
    }
}
