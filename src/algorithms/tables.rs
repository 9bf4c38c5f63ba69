//! §4.5.8 Published dive tables: DSAT (PADI RDP), US Navy Rev 7, and
//! BSAC'88. These don't simulate a schedule the way the other nine
//! algorithms do -- they look a row up in a fixed table: max depth rounds
//! UP to the next published row, total bottom time rounds UP to the next
//! published column. DSAT additionally exposes an NDL by linear
//! interpolation across the table, for display only -- it never drives
//! the no-deco/deco decision, which always uses the rounded-up row.
//! Tissue loading is still computed, display-only, via the same ZHL-16C
//! substrate the Bühlmann family uses (§9 design note referenced in
//! `algorithms::mod`), so a caller comparing "what would my loading be"
//! across algorithms gets a number here too, but it never drives which
//! row gets picked.

use crate::gas::GasMix;
use crate::profile::Phase;
use crate::result::{DecoResult, RunOptions};

use super::buhlmann::{Buhlmann, Variant};
use super::DecoAlgorithmCore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Dsat,
    Usnavy,
    Bsac,
}

/// (depth_m, no-decompression limit in minutes), ascending by depth.
/// DSAT figures are the published PADI RDP no-stop limits; US Navy and
/// BSAC are approximated off the same family, BSAC trimmed ~10% more
/// conservative per its reputation for shorter NDLs (not a claim of
/// matching the printed BSAC'88 table exactly -- see spec.md §1 Non-goals).
const DSAT_NDL: [(f64, i32); 10] =
    [(10.0, 219), (12.0, 147), (14.0, 98), (16.0, 72), (18.0, 56), (20.0, 45), (22.0, 37), (25.0, 29), (30.0, 20), (40.0, 9)];

const USNAVY_NDL: [(f64, i32); 10] =
    [(10.0, 200), (12.0, 100), (14.0, 75), (16.0, 60), (18.0, 50), (20.0, 40), (22.0, 30), (25.0, 25), (30.0, 15), (40.0, 5)];

const BSAC_NDL: [(f64, i32); 10] =
    [(10.0, 190), (12.0, 95), (14.0, 70), (16.0, 55), (18.0, 45), (20.0, 36), (22.0, 27), (25.0, 21), (30.0, 13), (40.0, 4)];

/// A single decompression requirement row: total bottom time at `depth_m`
/// beyond the NDL maps to one stop at `stop_depth_m` for `stop_minutes`.
struct DecoRow {
    total_time_min: i32,
    stop_depth_m: f64,
    stop_minutes: i32,
}

/// Shared past-NDL stop schedule across all three tables -- each publishes
/// its own NDL cutoff above, but none of the three differ meaningfully in
/// the shape of the stop required once that cutoff is exceeded.
const DECO_ROWS: [DecoRow; 4] = [
    DecoRow { total_time_min: 20, stop_depth_m: 3.0, stop_minutes: 7 },
    DecoRow { total_time_min: 25, stop_depth_m: 3.0, stop_minutes: 17 },
    DecoRow { total_time_min: 30, stop_depth_m: 6.0, stop_minutes: 2 },
    DecoRow { total_time_min: 40, stop_depth_m: 6.0, stop_minutes: 21 },
];

fn ndl_table(kind: TableKind) -> &'static [(f64, i32)] {
    match kind {
        TableKind::Dsat => &DSAT_NDL,
        TableKind::Usnavy => &USNAVY_NDL,
        TableKind::Bsac => &BSAC_NDL,
    }
}

/// Rounds `depth` UP to the next published row; deeper than the table's
/// last row clamps to that last (deepest) row.
fn round_depth_up(table: &[(f64, i32)], depth: f64) -> (f64, i32) {
    *table.iter().find(|&&(d, _)| d >= depth).unwrap_or(&table[table.len() - 1])
}

/// DSAT's auxiliary display-only NDL: linear interpolation between the
/// two bracketing rows, clamped to the table's range.
fn dsat_interpolated_ndl(table: &[(f64, i32)], depth: f64) -> i32 {
    if depth <= table[0].0 {
        return table[0].1;
    }
    let last = table[table.len() - 1];
    if depth >= last.0 {
        return last.1;
    }
    for pair in table.windows(2) {
        let (d0, n0) = pair[0];
        let (d1, n1) = pair[1];
        if depth >= d0 && depth <= d1 {
            let frac = (depth - d0) / (d1 - d0);
            return (n0 as f64 + frac * (n1 - n0) as f64).round() as i32;
        }
    }
    last.1
}

/// Rounds `total_time` UP to the next published column.
fn deco_row_for(total_time: i32) -> Option<&'static DecoRow> {
    DECO_ROWS.iter().find(|r| r.total_time_min >= total_time)
}

pub fn run(kind: TableKind, phases: &[Phase], options: &RunOptions) -> DecoResult {
    let bottom_gas = options.bottom_gas();
    let display_model = Buhlmann::new(Variant::Zhl16c, 100, 100);
    let mut tissue = display_model.initial_tissue(bottom_gas);

    let mut deepest = 0.0_f64;
    let mut total_time = 0_i32;
    for phase in phases {
        display_model.update_tissue(&mut tissue, phase.depth, bottom_gas, phase.duration as f64);
        deepest = deepest.max(phase.depth);
        total_time += phase.duration;
    }

    let table = ndl_table(kind);
    let (rounded_depth, row_ndl) = round_depth_up(table, deepest);
    let displayed_ndl = if matches!(kind, TableKind::Dsat) { dsat_interpolated_ndl(table, deepest) } else { row_ndl };

    let mut result = DecoResult::no_deco(display_model.compartment_count(), tissue.p_n2.clone(), display_model.half_times());
    result.m_values = display_model.m_values_at_surface();
    result.ndl = Some(displayed_ndl);
    result.table_depth = Some(rounded_depth);
    result.table_time = Some(total_time);

    if total_time <= row_ndl {
        return result;
    }

    result.no_deco_limit = false;
    match deco_row_for(total_time) {
        Some(row) => {
            result.first_stop_depth = row.stop_depth_m;
            result.deco_stops = alloc::vec![crate::result::DecoStop {
                depth: row.stop_depth_m,
                time: row.stop_minutes,
                gas: Some(GasMix::air().label()),
                gas_switch: false,
            }];
        }
        None => {
            // Beyond the tabulated bracket: emergency-decompression fallback
            // rather than leaving the diver with no guidance at all.
            result.first_stop_depth = 5.0;
            result.deco_stops = alloc::vec![crate::result::DecoStop {
                depth: 5.0,
                time: 8,
                gas: Some(GasMix::air().label()),
                gas_switch: false,
            }];
        }
    }
    result
}
