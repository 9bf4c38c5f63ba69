//! §4.4 Tissue simulator: per-compartment N2/He partial pressures, updated
//! across a phase stream via the Schreiner equation (§4.1). Individual
//! algorithms own their compartment half-time tables and call into this
//! module rather than duplicating the Schreiner math (DCIEM's serial
//! model and Thalmann's asymmetric kinetics are the two exceptions that
//! layer extra behavior on top; see `algorithms::dciem`/`thalmann`).

use crate::gas::GasMix;
use crate::physics;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parallel per-compartment inert-gas pressures, in bar.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TissueState {
    pub p_n2: Vec<f64>,
    pub p_he: Vec<f64>,
}

impl TissueState {
    /// Initialised to the inspired surface N2 partial pressure (air by
    /// default), 0 for He, for `n` compartments.
    pub fn equilibrated_at_surface(n: usize, surface_gas: GasMix) -> Self {
        let p_n2_surface = physics::inspired_pressure(0.0, surface_gas.f_n2());
        Self {
            p_n2: alloc::vec![p_n2_surface; n],
            p_he: alloc::vec![0.0; n],
        }
    }

    pub fn len(&self) -> usize {
        self.p_n2.len()
    }

    pub fn is_empty(&self) -> bool {
        self.p_n2.is_empty()
    }

    /// Applies the Schreiner equation to every compartment for `minutes`
    /// spent at `depth` breathing `gas`, using per-compartment half-times.
    pub fn update(
        &mut self,
        depth: f64,
        gas: GasMix,
        minutes: f64,
        n2_half_times: &[f64],
        he_half_times: &[f64],
    ) {
        let inspired = gas.inspired_pressures(depth);
        for i in 0..self.p_n2.len() {
            self.p_n2[i] = physics::schreiner(self.p_n2[i], inspired.n2, minutes, n2_half_times[i]);
            self.p_he[i] = physics::schreiner(self.p_he[i], inspired.he, minutes, he_half_times[i]);
        }
    }
}
