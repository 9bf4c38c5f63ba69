//! §4.8 Oxygen accounting: NOAA CNS clock and Lambertsen OTU, accumulated
//! minute-by-minute (well, phase-by-phase) across a phase stream.

use crate::gas::{active_gas_at, GasMix, GasSwitch};
use crate::mathx;
use crate::physics;
use crate::profile::Phase;

/// NOAA single-exposure step table: `(threshold, max_minutes)`, descending
/// by threshold. Lookup matches the highest threshold `<=` the ppO2.
const CNS_STEPS: [(f64, f64); 11] = [
    (1.6, 45.0),
    (1.5, 120.0),
    (1.4, 150.0),
    (1.3, 180.0),
    (1.2, 210.0),
    (1.1, 240.0),
    (1.0, 300.0),
    (0.9, 360.0),
    (0.8, 450.0),
    (0.7, 570.0),
    (0.6, 720.0),
];

const CNS_SATURATION_CAP: f64 = 999.0;

fn max_minutes_for(pp_o2: f64) -> Option<f64> {
    CNS_STEPS.iter().find(|&&(threshold, _)| pp_o2 >= threshold).map(|&(_, max_minutes)| max_minutes)
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OxygenExposure {
    pub cns_percent: f64,
    pub otu: f64,
}

/// Ambient (not alveolar-reduced) ppO2 at `depth` breathing `fraction` --
/// the convention the NOAA/Lambertsen tables were built against.
fn ambient_pp_o2(depth: f64, fraction: f64) -> f64 {
    physics::depth_to_pressure(depth) * fraction
}

/// Walks the phase stream accumulating CNS% and OTU. A phase's own `gas`
/// label, when present, overrides `bottom_gas`/`gas_switches` for that
/// phase's fO2; otherwise the active gas is resolved the same way the
/// deco scheduler resolves it.
pub fn accumulate(phases: &[Phase], bottom_gas: GasMix, gas_switches: &[GasSwitch]) -> OxygenExposure {
    let mut cns = 0.0_f64;
    let mut otu = 0.0_f64;

    for phase in phases {
        if phase.duration <= 0 {
            continue;
        }
        let minutes = phase.duration as f64;
        let avg_depth = crate::profile::average_depth(phase);
        let f_o2 = phase
            .gas
            .as_deref()
            .and_then(GasMix::parse_label)
            .unwrap_or_else(|| active_gas_at(phase.depth, gas_switches, bottom_gas))
            .f_o2;
        let pp_o2 = ambient_pp_o2(avg_depth, f_o2);

        if pp_o2 >= 0.5 {
            if let Some(max_minutes) = max_minutes_for(pp_o2) {
                cns = (cns + minutes / max_minutes * 100.0).min(CNS_SATURATION_CAP);
            }
            otu += minutes * mathx::powf((pp_o2 - 0.5) / 0.5, 0.83);
        }
    }

    OxygenExposure { cns_percent: cns, otu }
}
