// src/lib.rs

//! procpipe: composable process pipelines without a shell.
//!
//! A [`Pipeline`] is an immutable value describing a chain of external commands:
//!  - Argument vectors, extended from lists or POSIX-quoted strings.
//!  - Per-command stderr merging (`!p`) and exit checking (`-p`).
//!  - Concatenation of pipelines (`p | q`).
//!  - Input and output endpoints: literal bytes or text, open descriptors,
//!    the null device, or captured output.
//!
//! Building a pipeline never touches the OS. [`Pipeline::execute`] (or the async
//! [`Pipeline::run`]) spawns the chain with every standard stream wired, feeds
//! literal input from a separate thread, collects captured output and enforces
//! exit-status policy.
//!
//! ```no_run
//! use procpipe::{Endpoint, Pipeline, RunOptions};
//!
//! # fn main() -> procpipe::ProcResult<()> {
//! let words = Pipeline::new("tr").arg("' ' '\\n'")?
//!   | Pipeline::new("sort")
//!   | Pipeline::new("uniq").arg("-c")?;
//! let counted = words
//!   .stdin("b a b")?
//!   .stdout(Endpoint::CaptureText)?
//!   .execute(&RunOptions::default())?;
//! println!("{}", counted.text().unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod error;
pub mod pipeline;

// --- Re-exports for the Public API ---

// Value types that users will interact with frequently
pub use crate::core::args::Args;
pub use crate::core::control::{Captured, ResultMode, RunOptions, RunResult};
pub use crate::core::endpoint::Endpoint;
pub use crate::core::segment::Segment;

// The main Pipeline struct and the operand accepted by `attach`
pub use crate::pipeline::compose::Operand;
pub use crate::pipeline::definition::Pipeline;

pub use crate::error::{ProcPipeError, ProcResult};

/*
    Core Workflow:
    1. Create one `Pipeline` per command with `Pipeline::new("prog")`.
    2. Add arguments with `.arg("-l -a")?` or `.arg(["-l", "-a"])?`.
    3. Flip per-command flags: `!p` merges stderr into stdout, `-p` ignores its exit status.
    4. Chain commands with `p | q`, or `p.attach(q)?`.
    5. Bind endpoints: `.stdin("text")?` / `.attach_reversed(Endpoint::Discard)?` for input,
       `.stdout(Endpoint::CaptureText)?` / `.attach(Endpoint::CaptureBytes)?` for output.
    6. Run with `.execute(&RunOptions::default())?` or `.run(options).await?`.
*/
