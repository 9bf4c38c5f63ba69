//! §4.10 NDL solver: binary search over bottom-time minutes for the
//! largest value that doesn't yet produce a ceiling, generic over the
//! same [`DecoAlgorithmCore`] trait the scheduler uses. Table algorithms
//! (§4.5.8) have their own published NDL and don't go through this path.

use crate::algorithms::DecoAlgorithmCore;
use crate::gas::GasMix;
use crate::profile::Phase;
use crate::tissue::TissueState;

pub const NDL_SEARCH_MIN: i32 = 1;
pub const NDL_SEARCH_MAX: i32 = 300;

fn requires_deco<A: DecoAlgorithmCore>(algo: &A, tissue: &TissueState, depth: f64, gas: GasMix, minutes: i32) -> bool {
    let mut probe = tissue.clone();
    algo.update_tissue(&mut probe, depth, gas, minutes as f64);
    algo.ceiling(&probe) > 0.0
}

/// Largest bottom time in `[1, 300]` minutes, starting from a
/// surface-equilibrated tissue state, that can be spent at `depth` on
/// `gas` without requiring a mandatory stop.
pub fn solve<A: DecoAlgorithmCore>(algo: &A, depth: f64, gas: GasMix) -> i32 {
    let tissue0 = algo.initial_tissue(gas);
    solve_from(algo, &tissue0, depth, gas)
}

/// Same search, but starting from an arbitrary (already-loaded) tissue
/// state -- used to extend only the last user stop's duration when
/// probing the NDL of an in-progress profile, per §4.10.
pub fn solve_from<A: DecoAlgorithmCore>(algo: &A, tissue: &TissueState, depth: f64, gas: GasMix) -> i32 {
    if !requires_deco(algo, tissue, depth, gas, NDL_SEARCH_MAX) {
        return NDL_SEARCH_MAX;
    }
    if requires_deco(algo, tissue, depth, gas, NDL_SEARCH_MIN) {
        return 0;
    }

    let mut lo = NDL_SEARCH_MIN;
    let mut hi = NDL_SEARCH_MAX;
    while lo < hi {
        let mid = lo + (hi - lo + 1) / 2;
        if requires_deco(algo, tissue, depth, gas, mid) {
            hi = mid - 1;
        } else {
            lo = mid;
        }
    }
    lo
}

/// NDL of the current profile: replays every phase but the last, then
/// binary-searches the last user stop's duration alone (§4.10: "extend
/// only the last user stop's duration").
pub fn solve_for_profile<A: DecoAlgorithmCore>(algo: &A, phases: &[Phase], gas: GasMix) -> i32 {
    let Some((last, rest)) = phases.split_last() else {
        return solve_from(algo, &algo.initial_tissue(gas), 0.0, gas);
    };
    let mut tissue = algo.initial_tissue(gas);
    for phase in rest {
        algo.update_tissue(&mut tissue, phase.depth, gas, phase.duration as f64);
    }
    solve_from(algo, &tissue, last.depth, gas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::buhlmann::{Buhlmann, Variant};
    use crate::algorithms::haldane::Haldane;
    use crate::profile::build_profile;

    #[test]
    fn test_shallow_dive_hits_cutoff() {
        let algo = Buhlmann::new(Variant::Zhl16c, 100, 100);
        let ndl = solve(&algo, 10.0, GasMix::air());
        assert_eq!(ndl, NDL_SEARCH_MAX);
    }

    #[test]
    fn test_deeper_dive_has_finite_ndl() {
        let algo = Buhlmann::new(Variant::Zhl16c, 100, 100);
        let ndl = solve(&algo, 40.0, GasMix::air());
        assert!(ndl < NDL_SEARCH_MAX);
        assert!(ndl > 0);
    }

    #[test]
    fn test_ndl_monotone_decreasing_with_depth() {
        let algo = Haldane::new();
        let shallow = solve(&algo, 18.0, GasMix::air());
        let deep = solve(&algo, 36.0, GasMix::air());
        assert!(deep <= shallow);
    }

    #[test]
    fn test_richer_gas_extends_ndl() {
        let algo = Buhlmann::new(Variant::Zhl16c, 100, 100);
        let air_ndl = solve(&algo, 30.0, GasMix::air());
        let ean32_ndl = solve(&algo, 30.0, GasMix::new(0.32, 0.0));
        assert!(ean32_ndl >= air_ndl);
    }

    #[test]
    fn test_solve_for_profile_extends_only_last_stop() {
        let algo = Buhlmann::new(Variant::Zhl16c, 100, 100);
        let profile = build_profile(&[crate::profile::Stop { depth: 18.0, time: 5 }], 18.0, 9.0);
        let ndl = solve_for_profile(&algo, &profile.phases, GasMix::air());
        assert!(ndl > 0);
    }
}
