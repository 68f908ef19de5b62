//! The [`Session`]: one grid, one selected algorithm, at most one search.
//!
//! Editing calls are refused while a search is running. An accepted edit
//! while a search is finished throws that search away, so a snapshot never
//! pairs a grid with a search run on a different one.

use std::fmt;

use gridwalk_core::{Cell, CellType, Grid};
use gridwalk_search::{Algorithm, Search, StepResult};
use rand::Rng;

use crate::config::{SearchConfig, check_dimensions};
use crate::error::SessionError;
use crate::preset::Preset;
use crate::snapshot::{Snapshot, Stats, path_cost};

/// Where the session is in its lifecycle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Found,
    Exhausted,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Found | Self::Exhausted)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Found => "found",
            Self::Exhausted => "exhausted",
        })
    }
}

/// Owns the grid and drives the selected search one step at a time.
#[derive(Debug, Clone)]
pub struct Session {
    config: SearchConfig,
    grid: Grid,
    algorithm: Algorithm,
    search: Option<Search>,
    path: Option<Vec<Cell>>,
    ticks: usize,
}

impl Default for Session {
    fn default() -> Self {
        let config = SearchConfig::default();
        Self {
            grid: Grid::new(config.rows, config.cols),
            config,
            algorithm: Algorithm::default(),
            search: None,
            path: None,
            ticks: 0,
        }
    }
}

impl Session {
    /// Create an idle session with an empty grid sized by `config`.
    pub fn new(config: SearchConfig) -> Result<Self, SessionError> {
        config.validate()?;
        Ok(Self {
            grid: Grid::new(config.rows, config.cols),
            config,
            ..Self::default()
        })
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// The active search state, if a search has been started.
    #[inline]
    pub fn search(&self) -> Option<&Search> {
        self.search.as_ref()
    }

    /// The Start → Target path, once found.
    #[inline]
    pub fn path(&self) -> Option<&[Cell]> {
        self.path.as_deref()
    }

    pub fn phase(&self) -> Phase {
        match self.search.as_ref().map(Search::outcome) {
            None => Phase::Idle,
            Some(None) => Phase::Running,
            Some(Some(StepResult::Found(_))) => Phase::Found,
            Some(Some(_)) => Phase::Exhausted,
        }
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    fn ensure_editable(&self, action: &str) -> Result<(), SessionError> {
        if self.phase() == Phase::Running {
            log::warn!("{action} rejected: a {} search is running", self.algorithm);
            return Err(SessionError::SearchRunning);
        }
        Ok(())
    }

    /// Drop a finished search after an accepted edit.
    fn discard_search(&mut self) {
        self.search = None;
        self.path = None;
        self.ticks = 0;
    }

    /// Replace the grid with an empty `rows × cols` one, keeping walls and
    /// markers that still fit.
    pub fn set_grid_dimensions(&mut self, rows: i32, cols: i32) -> Result<(), SessionError> {
        self.ensure_editable("resize")?;
        check_dimensions(rows, cols)?;
        let mut grid = Grid::new(rows, cols);
        for (cell, kind) in self.grid.iter() {
            if kind != CellType::Empty && grid.contains(cell) {
                grid.set(cell, kind)?;
            }
        }
        self.grid = grid;
        self.config.rows = rows;
        self.config.cols = cols;
        self.discard_search();
        Ok(())
    }

    /// Set the content of one cell. `Start` and `Target` move the marker.
    pub fn set_cell(&mut self, cell: Cell, kind: CellType) -> Result<(), SessionError> {
        self.ensure_editable("set_cell")?;
        self.grid.set(cell, kind)?;
        self.discard_search();
        Ok(())
    }

    pub fn set_start(&mut self, cell: Cell) -> Result<(), SessionError> {
        self.ensure_editable("set_start")?;
        self.grid.set_start(cell)?;
        self.discard_search();
        Ok(())
    }

    pub fn set_target(&mut self, cell: Cell) -> Result<(), SessionError> {
        self.ensure_editable("set_target")?;
        self.grid.set_target(cell)?;
        self.discard_search();
        Ok(())
    }

    /// Empty every cell and unset Start and Target.
    pub fn clear_grid(&mut self) -> Result<(), SessionError> {
        self.ensure_editable("clear_grid")?;
        self.grid.clear();
        self.discard_search();
        Ok(())
    }

    /// Replace the grid with `preset`, sized to the current dimensions.
    pub fn load_preset<R: Rng>(&mut self, preset: Preset, rng: &mut R) -> Result<(), SessionError> {
        self.ensure_editable("load_preset")?;
        self.grid = preset.build(self.config.rows, self.config.cols, rng)?;
        self.discard_search();
        log::debug!("loaded {preset} preset");
        Ok(())
    }

    pub fn select_algorithm(&mut self, algorithm: Algorithm) -> Result<(), SessionError> {
        self.ensure_editable("select_algorithm")?;
        self.algorithm = algorithm;
        self.discard_search();
        Ok(())
    }

    /// Select an algorithm by its display name, ignoring case.
    pub fn select_algorithm_by_name(&mut self, name: &str) -> Result<Algorithm, SessionError> {
        let algorithm: Algorithm = name.parse()?;
        self.select_algorithm(algorithm)?;
        Ok(algorithm)
    }

    /// Set the DLS depth limit.
    pub fn configure(&mut self, depth_limit: usize) -> Result<(), SessionError> {
        self.ensure_editable("configure")?;
        if depth_limit == 0 {
            return Err(SessionError::InvalidDepthLimit(depth_limit));
        }
        self.config.depth_limit = depth_limit;
        self.discard_search();
        Ok(())
    }

    /// Nudge the depth limit by `delta` steps of five, staying within
    /// 5..=100. Returns the new limit.
    pub fn bump_depth_limit(&mut self, delta: i32) -> Result<usize, SessionError> {
        let limit = self.config.nudged_depth_limit(delta);
        self.configure(limit)?;
        Ok(limit)
    }

    // -----------------------------------------------------------------------
    // Running
    // -----------------------------------------------------------------------

    /// Begin a fresh search with the selected algorithm.
    pub fn start_search(&mut self) -> Result<(), SessionError> {
        self.ensure_editable("start_search")?;
        let start = self.grid.start().ok_or(SessionError::MissingStart)?;
        let target = self.grid.target().ok_or(SessionError::MissingTarget)?;

        log::info!(
            "starting {} from {start} to {target} (depth limit {}, iddfs ceiling {})",
            self.algorithm,
            self.config.depth_limit,
            self.config.iddfs_max_depth,
        );
        self.search = Some(Search::new(
            self.algorithm,
            start,
            target,
            self.config.depth_limit,
            self.config.iddfs_max_depth,
        ));
        self.path = None;
        self.ticks = 0;
        Ok(())
    }

    /// Advance the running search by one step.
    ///
    /// Once the search is over this returns the terminal result again
    /// without doing any work.
    pub fn advance(&mut self) -> Result<StepResult, SessionError> {
        let search = self.search.as_mut().ok_or(SessionError::NoActiveSearch)?;
        if let Some(done) = search.outcome() {
            return Ok(done);
        }

        let result = search.step(&self.grid);
        self.ticks += 1;

        match result {
            StepResult::Continue => {}
            StepResult::Found(_) => {
                let path = search.path();
                log::info!(
                    "{} found a path of {} cells after {} steps",
                    self.algorithm,
                    path.as_ref().map_or(0, Vec::len),
                    search.steps(),
                );
                self.path = path;
            }
            StepResult::Exhausted => {
                log::info!(
                    "{} exhausted after {} steps, {} cells explored",
                    self.algorithm,
                    search.steps(),
                    search.tree().explored_len(),
                );
            }
        }
        Ok(result)
    }

    /// Call [`advance`](Self::advance) until the search ends or `max_ticks`
    /// calls have been made. Returns the last result.
    pub fn run(&mut self, max_ticks: usize) -> Result<StepResult, SessionError> {
        let mut result = StepResult::Continue;
        for _ in 0..max_ticks {
            result = self.advance()?;
            if result.is_terminal() {
                break;
            }
        }
        Ok(result)
    }

    /// Abandon any search and return to Idle. The grid is kept.
    pub fn reset(&mut self) {
        if self.search.is_some() {
            log::debug!("discarding {} search in phase {}", self.algorithm, self.phase());
        }
        self.discard_search();
    }

    // -----------------------------------------------------------------------
    // Views
    // -----------------------------------------------------------------------

    pub fn stats(&self) -> Stats {
        let path = self.path.as_deref().unwrap_or(&[]);
        let mut stats = Stats {
            algorithm: self.algorithm,
            phase: self.phase(),
            steps: 0,
            ticks: self.ticks,
            frontier: 0,
            frontier_backward: 0,
            explored: 0,
            explored_backward: 0,
            path_len: path.len(),
            path_cost: path_cost(path),
            depth_limit: match self.algorithm {
                Algorithm::Dls => Some(self.config.depth_limit),
                Algorithm::Iddfs => Some(0),
                _ => None,
            },
            restarts: 0,
        };
        if let Some(s) = &self.search {
            stats.steps = s.steps();
            stats.frontier = s.frontier_len();
            stats.frontier_backward = s.backward_frontier_len();
            stats.explored = s.tree().explored_len();
            stats.explored_backward = s.backward_tree().map_or(0, |t| t.explored_len());
            stats.depth_limit = s.depth_limit();
            stats.restarts = s.restarts();
        }
        stats
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(
            &self.grid,
            self.search.as_ref(),
            self.path.as_deref(),
            self.stats(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Overlay;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn session(rows: i32, cols: i32) -> Session {
        Session::new(SearchConfig {
            rows,
            cols,
            ..SearchConfig::default()
        })
        .unwrap()
    }

    fn corners(rows: i32, cols: i32) -> Session {
        let mut s = session(rows, cols);
        s.set_start(Cell::new(0, 0)).unwrap();
        s.set_target(Cell::new(rows - 1, cols - 1)).unwrap();
        s
    }

    #[test]
    fn start_requires_markers() {
        let mut s = session(5, 5);
        assert_eq!(s.start_search(), Err(SessionError::MissingStart));
        s.set_start(Cell::new(0, 0)).unwrap();
        assert_eq!(s.start_search(), Err(SessionError::MissingTarget));
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.advance(), Err(SessionError::NoActiveSearch));
    }

    #[test]
    fn five_by_five_bfs_uses_the_diagonal() {
        let mut s = corners(5, 5);
        s.start_search().unwrap();
        assert_eq!(s.run(1000), Ok(StepResult::Found(Cell::new(4, 4))));
        assert_eq!(s.phase(), Phase::Found);
        let stats = s.stats();
        assert_eq!(stats.path_len, 5);
        assert!((stats.path_cost - 4.0 * gridwalk_core::DIAGONAL_COST).abs() < 1e-9);
    }

    #[test]
    fn edits_rejected_while_running() {
        let mut s = corners(5, 5);
        s.start_search().unwrap();
        s.advance().unwrap();
        let before = s.grid().clone();
        assert_eq!(
            s.set_cell(Cell::new(2, 2), CellType::Wall),
            Err(SessionError::SearchRunning)
        );
        assert_eq!(s.select_algorithm(Algorithm::Dfs), Err(SessionError::SearchRunning));
        assert_eq!(s.configure(3), Err(SessionError::SearchRunning));
        assert_eq!(s.clear_grid(), Err(SessionError::SearchRunning));
        assert_eq!(s.start_search(), Err(SessionError::SearchRunning));
        assert_eq!(s.grid(), &before);
        assert_eq!(s.phase(), Phase::Running);
        assert_eq!(s.algorithm(), Algorithm::Bfs);
    }

    #[test]
    fn edit_after_finish_discards_search() {
        let mut s = corners(4, 4);
        s.start_search().unwrap();
        s.run(1000).unwrap();
        assert_eq!(s.phase(), Phase::Found);
        s.set_cell(Cell::new(1, 2), CellType::Wall).unwrap();
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.path(), None);
        assert_eq!(s.stats().ticks, 0);
    }

    #[test]
    fn terminal_advance_is_idempotent() {
        let mut s = corners(4, 6);
        s.select_algorithm(Algorithm::Bidirectional).unwrap();
        s.start_search().unwrap();
        let done = s.run(1000).unwrap();
        assert!(done.is_terminal());
        let stats = s.stats();
        let snap = s.snapshot();
        for _ in 0..3 {
            assert_eq!(s.advance(), Ok(done));
        }
        assert_eq!(s.stats(), stats);
        assert_eq!(s.snapshot(), snap);
    }

    #[test]
    fn reset_returns_to_idle_shape() {
        for a in Algorithm::ALL {
            let mut s = corners(5, 5);
            let idle = s.snapshot();
            s.select_algorithm(a).unwrap();
            s.start_search().unwrap();
            s.run(3).unwrap();
            s.reset();
            assert_eq!(s.phase(), Phase::Idle, "{a}");
            let snap = s.snapshot();
            assert_eq!(snap.cells, idle.cells, "{a}");
            assert_eq!(snap.stats.steps, 0);
            assert_eq!(snap.stats.ticks, 0);
            assert_eq!(snap.stats.explored, 0);
            assert_eq!(snap.stats.path_len, 0);
        }
    }

    #[test]
    fn every_algorithm_exhausts_behind_a_wall_row() {
        for a in Algorithm::ALL {
            let mut s = corners(6, 6);
            for c in 0..6 {
                s.set_cell(Cell::new(3, c), CellType::Wall).unwrap();
            }
            s.select_algorithm(a).unwrap();
            s.start_search().unwrap();
            assert_eq!(s.run(100_000), Ok(StepResult::Exhausted), "{a}");
            assert_eq!(s.phase(), Phase::Exhausted);
            assert_eq!(s.path(), None);
        }
    }

    #[test]
    fn dls_and_iddfs_against_a_short_limit() {
        let mut s = session(1, 6);
        s.set_start(Cell::new(0, 0)).unwrap();
        s.set_target(Cell::new(0, 5)).unwrap();
        s.configure(2).unwrap();

        s.select_algorithm(Algorithm::Dls).unwrap();
        s.start_search().unwrap();
        assert_eq!(s.run(1000), Ok(StepResult::Exhausted));
        assert_eq!(s.stats().depth_limit, Some(2));

        s.select_algorithm(Algorithm::Iddfs).unwrap();
        s.start_search().unwrap();
        assert_eq!(s.run(1000), Ok(StepResult::Found(Cell::new(0, 5))));
        let stats = s.stats();
        assert_eq!(stats.depth_limit, Some(5));
        assert_eq!(stats.restarts, 5);
        assert_eq!(stats.path_len, 6);
    }

    #[test]
    fn configure_validates_and_bumps_clamp() {
        let mut s = Session::default();
        assert_eq!(s.configure(0), Err(SessionError::InvalidDepthLimit(0)));
        assert_eq!(s.config().depth_limit, 20);
        assert_eq!(s.bump_depth_limit(1), Ok(25));
        assert_eq!(s.bump_depth_limit(-100), Ok(5));
        assert_eq!(s.bump_depth_limit(100), Ok(100));
    }

    #[test]
    fn select_by_name() {
        let mut s = Session::default();
        assert_eq!(s.select_algorithm_by_name("ucs"), Ok(Algorithm::Ucs));
        assert_eq!(s.algorithm(), Algorithm::Ucs);
        assert_eq!(
            s.select_algorithm_by_name("greedy"),
            Err(SessionError::UnknownAlgorithm("greedy".into()))
        );
        assert_eq!(s.algorithm(), Algorithm::Ucs);
    }

    #[test]
    fn markers_and_walls() {
        let mut s = session(3, 3);
        s.set_cell(Cell::new(0, 0), CellType::Start).unwrap();
        s.set_cell(Cell::new(2, 2), CellType::Target).unwrap();
        assert_eq!(
            s.set_cell(Cell::new(0, 0), CellType::Wall),
            Err(SessionError::ReservedCell(Cell::new(0, 0)))
        );
        assert_eq!(
            s.set_cell(Cell::new(3, 0), CellType::Wall),
            Err(SessionError::OutOfBounds(Cell::new(3, 0)))
        );
        // Moving Start onto Target unsets Target.
        s.set_start(Cell::new(2, 2)).unwrap();
        assert_eq!(s.grid().start(), Some(Cell::new(2, 2)));
        assert_eq!(s.grid().target(), None);
        assert_eq!(s.grid().at(Cell::new(0, 0)), CellType::Empty);
    }

    #[test]
    fn resize_keeps_what_fits() {
        let mut s = corners(5, 5);
        s.set_cell(Cell::new(1, 1), CellType::Wall).unwrap();
        s.set_grid_dimensions(3, 3).unwrap();
        assert_eq!((s.grid().rows(), s.grid().cols()), (3, 3));
        assert_eq!(s.grid().start(), Some(Cell::new(0, 0)));
        assert_eq!(s.grid().target(), None);
        assert_eq!(s.grid().at(Cell::new(1, 1)), CellType::Wall);
        assert_eq!(
            s.set_grid_dimensions(0, 3),
            Err(SessionError::InvalidDimensions { rows: 0, cols: 3 })
        );
        assert_eq!(
            s.set_grid_dimensions(100_000, 100_000),
            Err(SessionError::InvalidDimensions {
                rows: 100_000,
                cols: 100_000
            })
        );
        assert_eq!(s.config().rows, 3);
        assert_eq!(s.grid().len(), 9);
    }

    #[test]
    fn snapshot_lookup_stays_in_bounds() {
        let s = corners(3, 4);
        let snap = s.snapshot();
        assert_eq!(snap.at(Cell::new(2, 3)).map(|v| v.cell), Some(Cell::new(2, 3)));
        assert_eq!(snap.at(Cell::new(2, 3)).map(|v| v.kind), Some(CellType::Target));
        assert_eq!(snap.at(Cell::new(1, 0)).map(|v| v.cell), Some(Cell::new(1, 0)));
        assert!(snap.at(Cell::new(3, 0)).is_none());
        assert!(snap.at(Cell::new(0, 4)).is_none());
        assert!(snap.at(Cell::new(-1, 2)).is_none());
    }

    #[test]
    fn clear_grid_unsets_everything() {
        let mut s = corners(4, 4);
        s.set_cell(Cell::new(1, 1), CellType::Wall).unwrap();
        s.clear_grid().unwrap();
        assert!(s.grid().iter().all(|(_, k)| k == CellType::Empty));
        assert_eq!(s.start_search(), Err(SessionError::MissingStart));
    }

    #[test]
    fn presets_load_into_current_size() {
        let mut s = Session::default();
        let mut rng = StdRng::seed_from_u64(1);
        for p in Preset::ALL {
            s.load_preset(p, &mut rng).unwrap();
            assert!(s.grid().start().is_some(), "{p}");
            assert!(s.grid().target().is_some(), "{p}");
        }
        s.load_preset(Preset::Simple, &mut rng).unwrap();
        s.start_search().unwrap();
        assert!(matches!(s.run(100_000), Ok(StepResult::Found(_))));
    }

    #[test]
    fn snapshot_overlays_bidirectional_sides() {
        let mut s = corners(1, 7);
        s.select_algorithm(Algorithm::Bidirectional).unwrap();
        s.start_search().unwrap();
        s.run(2).unwrap();
        // Forward explored (0,0) and queued (0,1); backward explored (0,6)
        // and queued (0,5).
        assert_eq!(s.snapshot().render_ascii(), "S+...-T");
        let snap = s.snapshot();
        assert_eq!(snap.at(Cell::new(0, 1)).map(|v| v.overlay), Some(Overlay::Frontier));
        assert_eq!(snap.at(Cell::new(0, 5)).map(|v| v.overlay), Some(Overlay::Frontier2));
        assert_eq!(snap.at(Cell::new(0, 6)).map(|v| v.overlay), Some(Overlay::Explored2));

        s.run(1000).unwrap();
        assert_eq!(s.snapshot().render_ascii(), "S*****T");
    }

    #[test]
    fn render_marks_walls_and_explored() {
        let mut s = corners(2, 3);
        s.set_cell(Cell::new(0, 1), CellType::Wall).unwrap();
        s.select_algorithm(Algorithm::Dfs).unwrap();
        s.start_search().unwrap();
        s.advance().unwrap();
        assert_eq!(s.snapshot().render_ascii(), "S#.\n++T");
    }
}
