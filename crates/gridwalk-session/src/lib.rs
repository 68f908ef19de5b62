//! Session controller for the gridwalk search engine.
//!
//! A [`Session`] owns the obstacle grid and the selected [`Algorithm`], and
//! drives at most one [`Search`] at a time:
//!
//! ```text
//! Idle --start_search--> Running --advance--> Found | Exhausted
//!   ^                                              |
//!   +------------- reset / any accepted edit ------+
//! ```
//!
//! Callers read progress through [`Session::stats`] and
//! [`Session::snapshot`]; both are pure reads.

mod config;
mod error;
mod preset;
mod session;
mod snapshot;

pub use config::{DEPTH_STEP, MAX_CELLS, MAX_NUDGED_DEPTH, MIN_NUDGED_DEPTH, SearchConfig};
pub use error::SessionError;
pub use preset::{Preset, RANDOM_WALL_DENSITY};
pub use session::{Phase, Session};
pub use snapshot::{CellView, Overlay, Snapshot, Stats, path_cost};

pub use gridwalk_core::{Cell, CellType, Grid};
pub use gridwalk_search::{Algorithm, Search, StepResult};
