//! §4.5 Algorithm family: ten deco models sharing one contract. Modeled as
//! a capability trait (§9 design note) rather than inheritance; the
//! scheduler (§4.6) is generic over this trait, not any one algorithm.

pub mod buhlmann;
pub mod dciem;
pub mod haldane;
pub mod rgbm;
pub mod tables;
pub mod thalmann;
pub mod vpm;
pub mod workman;

use crate::gas::GasMix;
use crate::profile::Phase;
use crate::result::{DecoResult, RunOptions};
use crate::tissue::TissueState;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable wire identifiers, §6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AlgorithmId {
    None,
    Zhl16a,
    Zhl16b,
    Zhl16c,
    Zhl12,
    Zhl6,
    Zhl8adt,
    Vpm,
    Rgbm,
    Haldane,
    Workman,
    Thalmann,
    Dciem,
    Dsat,
    Usnavy,
    Bsac,
}

impl AlgorithmId {
    pub fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "none" => Self::None,
            "zhl16a" => Self::Zhl16a,
            "zhl16b" => Self::Zhl16b,
            "zhl16c" => Self::Zhl16c,
            "zhl12" => Self::Zhl12,
            "zhl6" => Self::Zhl6,
            "zhl8adt" => Self::Zhl8adt,
            "vpm" => Self::Vpm,
            "rgbm" => Self::Rgbm,
            "haldane" => Self::Haldane,
            "workman" => Self::Workman,
            "thalmann" => Self::Thalmann,
            "dciem" => Self::Dciem,
            "dsat" => Self::Dsat,
            "usnavy" => Self::Usnavy,
            "bsac" => Self::Bsac,
            _ => return None,
        })
    }

    pub fn capabilities(&self) -> Capabilities {
        match self {
            Self::Zhl16a | Self::Zhl16b | Self::Zhl16c | Self::Zhl12 | Self::Zhl6 | Self::Zhl8adt => {
                Capabilities { trimix: true, multi_gas: true, gf: true }
            }
            Self::Vpm | Self::Rgbm => Capabilities { trimix: false, multi_gas: false, gf: true },
            _ => Capabilities { trimix: false, multi_gas: false, gf: false },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Capabilities {
    pub trimix: bool,
    pub multi_gas: bool,
    pub gf: bool,
}

/// §11 supplement: `Actual` reads the instantaneous ceiling straight off
/// the leading compartment (spec.md §4.5.1's default); `Adaptive`
/// projects tissues forward along the ascent to avoid reporting a
/// ceiling the diver would already have outrun by the time they get
/// there. Display-only -- it never changes which stops the scheduler
/// emits, only the `DecoResult::ceiling` diagnostic field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CeilingType {
    Actual,
    Adaptive,
}

impl Default for CeilingType {
    fn default() -> Self {
        Self::Actual
    }
}

/// §9: the capability interface the scheduler is generic over. Table
/// algorithms (§4.5.8) don't implement this directly -- their tissue
/// loading is display-only and their stops come straight from the
/// published table, so they build a [`DecoResult`] without routing
/// through [`crate::scheduler`].
pub trait DecoAlgorithmCore {
    fn compartment_count(&self) -> usize;
    fn half_times(&self) -> Vec<f64>;

    /// Ceiling in meters; 0.0 means no obligation.
    fn ceiling(&self, tissue: &TissueState) -> f64;

    /// Can the diver ascend from the current stop to `next_depth`?
    fn can_ascend(&self, tissue: &TissueState, next_depth: f64) -> bool;

    fn update_tissue(&self, tissue: &mut TissueState, depth: f64, gas: GasMix, minutes: f64);

    /// M-values evaluated at the surface (1 bar ambient), for DecoResult
    /// introspection.
    fn m_values_at_surface(&self) -> Vec<f64>;

    fn initial_tissue(&self, surface_gas: GasMix) -> TissueState {
        TissueState::equilibrated_at_surface(self.compartment_count(), surface_gas)
    }
}

/// Dispatches to the algorithm named by `id`. Returns `None` for an
/// unknown identifier (§7: the ascent assembler falls back to simple
/// ascent in that case) or `AlgorithmId::None` (no-algorithm path).
pub fn run_algorithm(id: AlgorithmId, phases: &[Phase], options: &RunOptions) -> Option<DecoResult> {
    match id {
        AlgorithmId::None => None,
        AlgorithmId::Zhl16a => Some(buhlmann::run(buhlmann::Variant::Zhl16a, phases, options)),
        AlgorithmId::Zhl16b => Some(buhlmann::run(buhlmann::Variant::Zhl16b, phases, options)),
        AlgorithmId::Zhl16c => Some(buhlmann::run(buhlmann::Variant::Zhl16c, phases, options)),
        AlgorithmId::Zhl12 => Some(buhlmann::run(buhlmann::Variant::Zhl12, phases, options)),
        AlgorithmId::Zhl6 => Some(buhlmann::run(buhlmann::Variant::Zhl6, phases, options)),
        AlgorithmId::Zhl8adt => Some(buhlmann::run(buhlmann::Variant::Zhl8adt, phases, options)),
        AlgorithmId::Vpm => Some(vpm::run(phases, options)),
        AlgorithmId::Rgbm => Some(rgbm::run(phases, options)),
        AlgorithmId::Haldane => Some(haldane::run(phases, options)),
        AlgorithmId::Workman => Some(workman::run(phases, options)),
        AlgorithmId::Thalmann => Some(thalmann::run(phases, options)),
        AlgorithmId::Dciem => Some(dciem::run(phases, options)),
        AlgorithmId::Dsat => Some(tables::run(tables::TableKind::Dsat, phases, options)),
        AlgorithmId::Usnavy => Some(tables::run(tables::TableKind::Usnavy, phases, options)),
        AlgorithmId::Bsac => Some(tables::run(tables::TableKind::Bsac, phases, options)),
    }
}

pub(crate) fn round_up_to_stop_interval(depth: f64) -> f64 {
    if depth <= 0.0 {
        return 0.0;
    }
    crate::mathx::ceil(depth / crate::constants::STOP_INTERVAL) * crate::constants::STOP_INTERVAL
}

pub(crate) fn max_of(values: &[f64]) -> f64 {
    values.iter().cloned().fold(0.0, f64::max)
}
