// procpipe/src/pipeline/mod.rs

//! Defines the `Pipeline` value, its composition operators, its textual form and execution.

pub mod compose;
pub mod definition;
pub mod execution;
pub mod render;
pub(crate) mod wiring;

// Re-export the main Pipeline struct
pub use compose::Operand;
pub use definition::Pipeline;
