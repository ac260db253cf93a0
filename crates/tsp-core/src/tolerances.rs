//! Numeric tolerances and search parameters threaded through the solver.
//!
//! Grouping these into plain structs (rather than a config file format) mirrors this
//! workspace's existing preference for explicit struct parameters over external
//! configuration; the CLI crate is the only place these get constructed from parsed
//! flags.

/// Variable-value and cut-violation tolerances used throughout the LP/cut machinery.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    /// Values within this of an integer are considered integral.
    pub zero: f64,
    /// Cuts violated by less than this are not worth adding.
    pub cut: f64,
    /// Cut duals below this magnitude are treated as slack for aging purposes.
    pub dual_dust: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            zero: 1e-6,
            cut: 1e-4,
            dual_dust: 1e-3,
        }
    }
}

/// Node-selection rule for the ABC search tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeSelectionRule {
    /// Best-tour order, with every 10th pop taken by best-bound instead.
    #[default]
    Interleaved,
    BestTour,
    BestBound,
    Dfs,
}

/// Which family of separators to prioritize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CutPreset {
    Vanilla,
    #[default]
    Aggressive,
}

/// Initial edge set used to seed the core graph before pricing takes over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitialEdgeSet {
    #[default]
    LkUnion,
    Delaunay,
}

/// Parameters steering the overall search, as exposed by the CLI.
#[derive(Debug, Clone)]
pub struct SearchParams {
    pub node_selection: NodeSelectionRule,
    pub cut_preset: CutPreset,
    pub initial_edge_set: InitialEdgeSet,
    /// `-S`: no pricing, safe Gomory cuts enabled by default.
    pub sparse: bool,
    /// `-P`: pure primal cutting plane, skip branching entirely.
    pub pure_primal: bool,
    /// `-l`: stop and report optimal once the tour matches this lower bound.
    pub lower_bound_target: Option<f64>,
    /// Cut-pool capacity before LRU-by-pivot-age eviction kicks in.
    pub pool_capacity: usize,
    /// Strong branching candidate count per round.
    pub strong_branch_candidates: usize,
    /// Strong branching γ weight favoring the worse of the two child estimates.
    pub strong_branch_gamma: f64,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            node_selection: NodeSelectionRule::default(),
            cut_preset: CutPreset::default(),
            initial_edge_set: InitialEdgeSet::default(),
            sparse: false,
            pure_primal: false,
            lower_bound_target: None,
            pool_capacity: 2000,
            strong_branch_candidates: 5,
            strong_branch_gamma: 100.0,
        }
    }
}
