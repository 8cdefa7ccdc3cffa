//! NNUE (Efficiently Updatable Neural Network) evaluation.
//!
//! A (768 -> 256) x 2 perspectives -> 1 network. Hidden-layer
//! activations are maintained incrementally: the board emits one
//! activate/deactivate per feature toggled by a move, and a fixed-depth
//! accumulator stack is pushed/popped in lockstep with make/unmake.

pub mod accumulator;
pub mod network;

pub use accumulator::{Accumulator, Nnue, STACK_DEPTH};
pub use network::{NnueNetwork, HIDDEN_SIZE, INPUT_SIZE};

/// Feature-weight quantization factor, also the clipped-ReLU ceiling
pub const QA: i32 = 255;

/// Output-weight quantization factor
pub const QB: i32 = 64;

/// Output-bias quantization factor (QA * QB)
pub const QAB: i32 = QA * QB;

/// Evaluation scale factor (centipawns)
pub const SCALE: i32 = 400;
