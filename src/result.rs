//! §3 DecoResult/DecoStop -- the shape every algorithm in the family
//! returns from `run()`.

use crate::gas::GasMix;
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecoStop {
    pub depth: f64,
    pub time: i32,
    pub gas: Option<String>,
    pub gas_switch: bool,
}

/// Optional diagnostics produced only by the Bühlmann family (§11
/// supplement): current max gradient factor at depth / at an instantaneous
/// surfacing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Supersaturation {
    pub gf_99: f64,
    pub gf_surf: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecoResult {
    /// Ordered deepest -> shallowest, ignoring zero-duration gas-switch
    /// markers which share the depth of the next real stop.
    pub deco_stops: Vec<DecoStop>,
    pub first_stop_depth: f64,
    pub tissue_loading: Vec<f64>,
    pub he_loading: Option<Vec<f64>>,
    pub ceiling: f64,
    pub no_deco_limit: bool,
    pub compartment_count: usize,
    pub half_times: Vec<f64>,
    pub m_values: Vec<f64>,
    /// NDL in minutes, table algorithms only.
    pub ndl: Option<i32>,
    /// Rounded table depth/time used for the lookup, table algorithms only.
    pub table_depth: Option<f64>,
    pub table_time: Option<i32>,
    pub supersaturation: Option<Supersaturation>,
    /// §9 design note: when the scheduler's 999-minute iteration cap is
    /// reached at any stop, this is set rather than silently guessing an
    /// alternative; the stop time itself is still finite (cap + 1).
    pub iteration_cap_reached: bool,
}

impl DecoResult {
    pub fn no_deco(compartment_count: usize, tissue_loading: Vec<f64>, half_times: Vec<f64>) -> Self {
        Self {
            deco_stops: Vec::new(),
            first_stop_depth: 0.0,
            tissue_loading,
            he_loading: None,
            ceiling: 0.0,
            no_deco_limit: true,
            compartment_count,
            half_times,
            m_values: Vec::new(),
            ndl: None,
            table_depth: None,
            table_time: None,
            supersaturation: None,
            iteration_cap_reached: false,
        }
    }
}

/// Options passed into every algorithm's `run()`. Each algorithm ignores
/// options inapplicable to it (Haldane ignores gradient factors, etc.)
/// but must return the full [`DecoResult`] shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunOptions<'a> {
    pub f_o2: f64,
    pub f_he: f64,
    pub gf_low: u8,
    pub gf_high: u8,
    pub ascent_rate: f64,
    pub deco_ascent_rate: f64,
    pub gas_switches: &'a [crate::gas::GasSwitch],
    pub last_stop_depth: f64,
}

impl<'a> RunOptions<'a> {
    pub fn bottom_gas(&self) -> GasMix {
        GasMix::new(self.f_o2, self.f_he)
    }
}
