//! Step-driven uninformed search over a grid.
//!
//! Every algorithm advances by exactly one unit of work per call to `step`
//! and exposes its frontier, explored set and back-pointers in between, so
//! callers can watch a search unfold:
//!
//! - **BFS** over a FIFO queue ([`Bfs`])
//! - **DFS** over a LIFO stack ([`Dfs`])
//! - **UCS** over a min-priority queue keyed by move cost ([`Ucs`])
//! - **DLS** depth-limited DFS ([`Dls`])
//! - **IDDFS** iterative deepening over DLS passes ([`Iddfs`])
//! - **Bidirectional** BFS from both ends ([`Bidirectional`])
//!
//! [`Search`] wraps all six behind a single [`Algorithm`] tag.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | BFS, DFS, DLS, IDDFS, Bidirectional |
//! | [`WeightedPather`] : [`Pather`] | UCS, [`Search`] |

mod bfs;
mod bidir;
mod dfs;
mod dls;
mod path;
mod search;
mod traits;
mod tree;
mod ucs;

pub use bfs::Bfs;
pub use bidir::Bidirectional;
pub use dfs::Dfs;
pub use dls::{Dls, Iddfs};
pub use path::{join, reconstruct};
pub use search::{Algorithm, ParseAlgorithmError, Search, StepResult};
pub use traits::{Pather, WeightedPather};
pub use tree::SearchTree;
pub use ucs::Ucs;
