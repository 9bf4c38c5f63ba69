//! §4.3 Gas model: gas-mix representation, gas-switch list, active-gas
//! lookup during ascent, and MOD.

use crate::physics;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use alloc::string::String;

/// A breathing gas mix: `fO2`, `fHe`, implicit `fN2 = 1 - fO2 - fHe`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GasMix {
    pub f_o2: f64,
    pub f_he: f64,
}

impl GasMix {
    /// Builds a gas mix. Panics on out-of-range fractions, mirroring the
    /// teacher's `Gas::new` invariant checks.
    pub fn new(f_o2: f64, f_he: f64) -> Self {
        if !(0.0..=1.0).contains(&f_o2) {
            panic!("Invalid fO2 [{f_o2}]");
        }
        if !(0.0..=1.0).contains(&f_he) {
            panic!("Invalid fHe [{f_he}]");
        }
        if f_o2 + f_he > 1.0 {
            panic!("fO2 + fHe can't exceed 1.0");
        }
        Self { f_o2, f_he }
    }

    pub fn air() -> Self {
        Self::new(0.21, 0.0)
    }

    pub fn f_n2(&self) -> f64 {
        1.0 - self.f_o2 - self.f_he
    }

    /// Inspired N2/He/O2 partial pressures at a depth, in bar.
    pub fn inspired_pressures(&self, depth_m: f64) -> InspiredPressures {
        InspiredPressures {
            o2: physics::inspired_pressure(depth_m, self.f_o2),
            n2: physics::inspired_pressure(depth_m, self.f_n2()),
            he: physics::inspired_pressure(depth_m, self.f_he),
        }
    }

    /// Maximum Operating Depth for a chosen ppO2 ceiling.
    pub fn mod_depth(&self, pp_o2_limit: f64) -> f64 {
        physics::calc_mod(self.f_o2, pp_o2_limit)
    }

    /// Label used on phases/deco stops, e.g. "21/0" for air, "50/0" for EAN50.
    pub fn label(&self) -> String {
        alloc::format!("{:.0}/{:.0}", self.f_o2 * 100.0, self.f_he * 100.0)
    }

    /// Parses a `label()`-shaped string ("50/0") back into a mix. Returns
    /// `None` on anything that isn't exactly two whole-percent integers
    /// separated by `/`, mirroring the plan dialect's drop-silently policy.
    pub fn parse_label(label: &str) -> Option<Self> {
        let mut parts = label.splitn(2, '/');
        let o2_pct: f64 = parts.next()?.trim().parse().ok()?;
        let he_pct: f64 = parts.next()?.trim().parse().ok()?;
        let f_o2 = o2_pct / 100.0;
        let f_he = he_pct / 100.0;
        if !(0.0..=1.0).contains(&f_o2) || !(0.0..=1.0).contains(&f_he) || f_o2 + f_he > 1.0 {
            return None;
        }
        Some(Self { f_o2, f_he })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InspiredPressures {
    pub o2: f64,
    pub n2: f64,
    pub he: f64,
}

/// A deco gas candidate: activation depth (MOD) and mix.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GasSwitch {
    pub depth: f64,
    pub gas: GasMix,
}

/// §4.3: active gas at a given depth during ascent. Among gas-switches
/// sorted by switch depth ascending, return the first one whose switch
/// depth is >= the current depth ("the first gas whose MOD we have
/// reached coming up"); fall back to the bottom gas.
pub fn active_gas_at(current_depth: f64, switches: &[GasSwitch], bottom_gas: GasMix) -> GasMix {
    let mut sorted: alloc::vec::Vec<&GasSwitch> = switches.iter().collect();
    sorted.sort_by(|a, b| a.depth.partial_cmp(&b.depth).unwrap());
    for switch in sorted {
        if switch.depth >= current_depth {
            return switch.gas;
        }
    }
    bottom_gas
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_air() {
        let air = GasMix::air();
        assert_eq!(air.f_o2, 0.21);
        assert_eq!(air.f_n2(), 0.79);
    }

    #[test]
    #[should_panic]
    fn test_invalid_fractions() {
        GasMix::new(0.6, 0.6);
    }

    #[test]
    fn test_mod_depth() {
        let ean32 = GasMix::new(0.32, 0.0);
        assert_eq!(ean32.mod_depth(1.4), 33.0);
    }

    #[test]
    fn test_active_gas_at_picks_shallowest_eligible() {
        let bottom = GasMix::new(0.18, 0.45);
        let ean50 = GasMix::new(0.5, 0.0);
        let oxygen = GasMix::new(1.0, 0.0);
        let switches = [
            GasSwitch { depth: 21.0, gas: ean50 },
            GasSwitch { depth: 6.0, gas: oxygen },
        ];
        assert_eq!(active_gas_at(30.0, &switches, bottom), bottom);
        assert_eq!(active_gas_at(21.0, &switches, bottom), ean50);
        assert_eq!(active_gas_at(10.0, &switches, bottom), ean50);
        assert_eq!(active_gas_at(6.0, &switches, bottom), oxygen);
        assert_eq!(active_gas_at(3.0, &switches, bottom), oxygen);
    }

    #[test]
    fn test_active_gas_at_falls_back_to_bottom_gas() {
        let bottom = GasMix::air();
        assert_eq!(active_gas_at(30.0, &[], bottom), bottom);
    }

    #[test]
    fn test_label() {
        assert_eq!(GasMix::new(0.5, 0.0).label(), "50/0");
        assert_eq!(GasMix::new(0.21, 0.35).label(), "21/35");
    }

    #[test]
    fn test_label_round_trip() {
        let gas = GasMix::new(0.32, 0.0);
        assert_eq!(GasMix::parse_label(&gas.label()), Some(gas));
    }

    #[test]
    fn test_parse_label_rejects_garbage() {
        assert_eq!(GasMix::parse_label("not-a-gas"), None);
        assert_eq!(GasMix::parse_label("200/0"), None);
    }
}
