//! Command-line surface: `clap`'s derive API, the same style already used for CLI parsing
//! elsewhere in this codebase's lineage.

use std::path::PathBuf;

use clap::{ArgGroup, Parser, ValueEnum};
use tsp_core::tolerances::{CutPreset as CoreCutPreset, InitialEdgeSet as CoreInitialEdgeSet, NodeSelectionRule as CoreNodeSelectionRule};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NodeSelectionRuleArg {
    Interleaved,
    BestTour,
    BestBound,
    Dfs,
}

impl From<NodeSelectionRuleArg> for CoreNodeSelectionRule {
    fn from(value: NodeSelectionRuleArg) -> Self {
        match value {
            NodeSelectionRuleArg::Interleaved => CoreNodeSelectionRule::Interleaved,
            NodeSelectionRuleArg::BestTour => CoreNodeSelectionRule::BestTour,
            NodeSelectionRuleArg::BestBound => CoreNodeSelectionRule::BestBound,
            NodeSelectionRuleArg::Dfs => CoreNodeSelectionRule::Dfs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CutPresetArg {
    Vanilla,
    Aggressive,
}

impl From<CutPresetArg> for CoreCutPreset {
    fn from(value: CutPresetArg) -> Self {
        match value {
            CutPresetArg::Vanilla => CoreCutPreset::Vanilla,
            CutPresetArg::Aggressive => CoreCutPreset::Aggressive,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InitialEdgeSetArg {
    LkUnion,
    Delaunay,
}

impl From<InitialEdgeSetArg> for CoreInitialEdgeSet {
    fn from(value: InitialEdgeSetArg) -> Self {
        match value {
            InitialEdgeSetArg::LkUnion => CoreInitialEdgeSet::LkUnion,
            InitialEdgeSetArg::Delaunay => CoreInitialEdgeSet::Delaunay,
        }
    }
}

/// A primal cutting-plane / augment-branch-cut solver for the symmetric TSP.
#[derive(Debug, Parser)]
#[command(name = "tsp-rs", version, group(
    ArgGroup::new("source").required(true).args(["input", "random"]),
))]
pub struct Cli {
    /// TSPLIB instance file to load.
    pub input: Option<PathBuf>,

    /// Generate a random Euclidean instance instead of reading a file.
    #[arg(short = 'R')]
    pub random: bool,

    /// Sparse mode: no pricing, enable safe Gomory cuts by default.
    #[arg(short = 'S')]
    pub sparse: bool,

    /// Pure primal cutting plane: skip branching entirely.
    #[arg(short = 'P')]
    pub pure_primal: bool,

    /// Verbose output.
    #[arg(short = 'V')]
    pub verbose: bool,

    /// Dump xy-coordinates to a file when available.
    #[arg(short = 'X')]
    pub dump_coords: bool,

    /// Write the final tour's edges to a file.
    #[arg(short = 'E')]
    pub dump_edges: bool,

    /// GIF mode: write each new improving tour to a distinct file.
    #[arg(short = 'G')]
    pub gif_mode: bool,

    /// Progress-bar output.
    #[arg(short = 'B')]
    pub progress_bar: bool,

    /// Node-selection rule.
    #[arg(short = 'b', value_enum, default_value = "interleaved")]
    pub node_selection: NodeSelectionRuleArg,

    /// Cut-selection preset.
    #[arg(short = 'c', value_enum, default_value = "aggressive")]
    pub cut_preset: CutPresetArg,

    /// Initial edge set used to seed the core graph.
    #[arg(short = 'e', value_enum, default_value = "lk-union")]
    pub initial_edge_set: InitialEdgeSetArg,

    /// Random-instance node count.
    #[arg(short = 'n', default_value_t = 100)]
    pub node_count: usize,

    /// Random-instance grid side.
    #[arg(short = 'g', default_value_t = 1_000_000)]
    pub grid_side: u32,

    /// Random seed (default: wall-clock time).
    #[arg(short = 's')]
    pub seed: Option<u64>,

    /// Load an initial tour from a tour-nodes file.
    #[arg(short = 't')]
    pub tour_file: Option<PathBuf>,

    /// Target lower bound: report optimal once the tour reaches this value.
    #[arg(short = 'l')]
    pub lower_bound_target: Option<f64>,
}
