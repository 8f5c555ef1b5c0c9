// Domain layer: game state types and the ports the sequencer talks through.
// No runtime or terminal dependencies here.

pub mod model;
pub mod ports;
