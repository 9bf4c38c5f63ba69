//! A pluggable decompression-schedule engine: tissue loading, gradient
//! factors, and ten deco models (Bühlmann ZH-L16 family, VPM-B, RGBM,
//! Haldane, Workman, Thalmann, DCIEM, and three published dive tables)
//! over one shared phase stream, plus the derived metrics -- CNS %, OTU,
//! gas consumption, NDL, ceiling timeline -- every caller needs
//! regardless of which algorithm produced the schedule.

#![cfg_attr(feature = "no-std", no_std)]
extern crate alloc;

pub mod algorithms;
pub mod ascent;
pub mod config;
pub mod constants;
pub mod consumption;
pub mod error;
pub mod gas;
pub mod mathx;
pub mod ndl;
pub mod oxygen;
pub mod physics;
pub mod plan;
pub mod profile;
pub mod result;
pub mod scheduler;
pub mod tissue;

mod ceiling_timeline;
mod driver;

pub use ascent::assemble as assemble_ascent;
pub use ceiling_timeline::{compute as compute_ceiling_timeline, CeilingPoint};
pub use config::{PlanSettings, PlanSettingsBuilder};
pub use driver::{run_plan, DriverInput, DriverOutput};
pub use error::{ConfigValidationErr, DecoModelConfig};
pub use gas::{GasMix, GasSwitch};
pub use profile::{build_profile, Action, BuiltProfile, Phase, ProfilePoint, Stop};
pub use result::{DecoResult, DecoStop, RunOptions, Supersaturation};

pub use alloc::vec;
pub use alloc::vec::Vec;
