//! Single-switch scan/select automaton shared by every screen.
//!
//! A screen hands the engine an [`OptionTree`]; activation and timer events move a
//! highlight through it and eventually commit one item back to the screen.

mod engine;
mod tree;

pub use engine::{Commit, ScanEngine, ScanState, Stage, Transition};
pub use tree::{CommitPolicy, OptionItem, OptionTree};
