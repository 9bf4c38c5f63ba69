//! §4.12 Plan serialization: the `D1:T1,D2:T2,...` surface dialect used
//! to round-trip a [`Stop`] list through a URL or a text field. This is
//! the only "wire format" the core owns; everything else in §6's
//! persistent-URL layout is host concern.

use crate::profile::Stop;
use alloc::string::String;
use alloc::vec::Vec;

/// Parses `D:T,D:T,...`. Non-parseable pairs (wrong arity, non-integer
/// field) are dropped silently; empty input parses to an empty sequence.
pub fn parse(input: &str) -> Vec<Stop> {
    input
        .split(',')
        .filter_map(|pair| {
            let pair = pair.trim();
            if pair.is_empty() {
                return None;
            }
            let mut parts = pair.splitn(2, ':');
            let depth_str = parts.next()?.trim();
            let time_str = parts.next()?.trim();
            let depth: i32 = depth_str.parse().ok()?;
            let time: i32 = time_str.parse().ok()?;
            Some(Stop { depth: depth as f64, time })
        })
        .collect()
}

/// Inverse of [`parse`].
pub fn serialize(stops: &[Stop]) -> String {
    let mut out = String::new();
    for (i, stop) in stops.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&alloc::format!("{}:{}", stop.depth as i64, stop.time));
    }
    out
}
