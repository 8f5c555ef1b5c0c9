// Adapters layer: terminal-facing implementations of the presentation and input boundaries.

pub mod chart;
pub mod input;
pub mod report;
pub mod terminal;
