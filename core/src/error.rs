// procpipe/src/error.rs
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcPipeError {
  #[error("Invalid operand: {reason}")]
  InvalidOperand { reason: String },

  #[error("Failed to spawn '{program}'. Source: {source}")]
  SpawnFailure {
    program: String,
    #[source]
    source: io::Error,
  },

  #[error("Command {args:?} exited with status {status}")]
  ExitStatusFailure { args: Vec<String>, status: i32 },

  #[error("I/O error while driving the pipeline. Source: {0}")]
  Io(#[from] io::Error),

  #[error("Internal procpipe error: {0}")]
  Internal(String),
}

impl ProcPipeError {
  pub(crate) fn invalid_operand<S: Into<String>>(reason: S) -> Self {
    ProcPipeError::InvalidOperand { reason: reason.into() }
  }

  /// Exit status carried by an `ExitStatusFailure`, if this is one.
  pub fn exit_status(&self) -> Option<i32> {
    match self {
      ProcPipeError::ExitStatusFailure { status, .. } => Some(*status),
      _ => None,
    }
  }
}

pub type ProcResult<T, E = ProcPipeError> = std::result::Result<T, E>;
