pub mod args;
pub mod control;
pub mod endpoint;
pub mod segment;

// Re-export key types for easier access from other procpipe modules (and lib.rs)
pub use args::Args;
pub use control::{Captured, ResultMode, RunOptions, RunResult};
pub use endpoint::Endpoint;
pub use segment::Segment;
