//! Reference-counted, LP-row-decoupled representation of cutting planes.

pub mod bank;
pub mod clique;
pub mod external_cuts;
pub mod hypergraph;
pub mod tooth;

pub use bank::Bank;
pub use clique::Clique;
pub use external_cuts::ExternalCuts;
pub use hypergraph::{CutType, HyperGraph, Sense};
pub use tooth::Tooth;

pub type CliqueBank = Bank<Clique>;
pub type ToothBank = Bank<Tooth>;
