// procpipe/src/pipeline/compose.rs

//! Composition: concatenating pipelines and binding stream endpoints.

use crate::core::endpoint::Endpoint;
use crate::error::{ProcPipeError, ProcResult};
use crate::pipeline::definition::Pipeline;
use std::ops::{BitOr, Neg, Not};
use std::os::fd::RawFd;
use tracing::{event, Level};

/// Right-hand side of [`Pipeline::attach`].
#[derive(Debug, Clone)]
pub enum Operand {
  /// Concatenate another pipeline downstream.
  Pipeline(Pipeline),
  /// Bind the output endpoint.
  Endpoint(Endpoint),
}

impl From<Pipeline> for Operand {
  fn from(pipeline: Pipeline) -> Self {
    Operand::Pipeline(pipeline)
  }
}

impl From<&Pipeline> for Operand {
  fn from(pipeline: &Pipeline) -> Self {
    Operand::Pipeline(pipeline.clone())
  }
}

impl From<Endpoint> for Operand {
  fn from(endpoint: Endpoint) -> Self {
    Operand::Endpoint(endpoint)
  }
}

impl From<RawFd> for Operand {
  fn from(fd: RawFd) -> Self {
    Operand::Endpoint(Endpoint::from(fd))
  }
}

impl Pipeline {
  /// Attaches `right` downstream of this pipeline.
  ///
  /// A pipeline operand is concatenated: its segments follow ours and its output
  /// endpoint, when set, replaces ours. Its input endpoint is dropped since only
  /// the head of a chain reads from an input endpoint.
  ///
  /// An endpoint operand becomes the output endpoint. Literal content cannot be
  /// an output and fails with `InvalidOperand`.
  pub fn attach<O: Into<Operand>>(&self, right: O) -> ProcResult<Self> {
    match right.into() {
      Operand::Pipeline(right) => Ok(self.concat(&right)),
      Operand::Endpoint(endpoint) if endpoint.valid_as_output() => {
        let mut next = self.clone();
        next.output = endpoint;
        Ok(next)
      }
      Operand::Endpoint(endpoint) => Err(ProcPipeError::invalid_operand(format!(
        "{} endpoint cannot receive pipeline output",
        endpoint.kind()
      ))),
    }
  }

  /// Attaches `left` upstream of this pipeline, as its input endpoint.
  ///
  /// Capture modes cannot be an input and fail with `InvalidOperand`.
  pub fn attach_reversed<E: Into<Endpoint>>(&self, left: E) -> ProcResult<Self> {
    let endpoint = left.into();
    if !endpoint.valid_as_input() {
      return Err(ProcPipeError::invalid_operand(format!(
        "{} endpoint cannot feed pipeline input",
        endpoint.kind()
      )));
    }
    let mut next = self.clone();
    next.input = endpoint;
    Ok(next)
  }

  /// Shorthand for `attach_reversed(endpoint)`.
  pub fn stdin<E: Into<Endpoint>>(&self, endpoint: E) -> ProcResult<Self> {
    self.attach_reversed(endpoint)
  }

  /// Shorthand for `attach(Operand::Endpoint(endpoint))`.
  pub fn stdout<E: Into<Endpoint>>(&self, endpoint: E) -> ProcResult<Self> {
    self.attach(Operand::Endpoint(endpoint.into()))
  }

  fn concat(&self, right: &Pipeline) -> Self {
    if !right.input.is_inherit() {
      event!(
        Level::DEBUG,
        input = right.input.kind(),
        "Ignoring input endpoint of a downstream pipeline."
      );
    }
    let mut next = self.clone();
    next.segments.extend(right.segments.iter().cloned());
    if !right.output.is_inherit() {
      next.output = right.output.clone();
    }
    next
  }
}

/// `left | right` concatenates two pipelines.
impl BitOr for Pipeline {
  type Output = Pipeline;

  fn bitor(self, rhs: Pipeline) -> Pipeline {
    self.concat(&rhs)
  }
}

impl BitOr<&Pipeline> for &Pipeline {
  type Output = Pipeline;

  fn bitor(self, rhs: &Pipeline) -> Pipeline {
    self.concat(rhs)
  }
}

/// `!p` toggles stderr merging on the current segment.
impl Not for Pipeline {
  type Output = Pipeline;

  fn not(self) -> Pipeline {
    self.toggle_combine_stderr()
  }
}

/// `-p` toggles exit checking on the current segment.
impl Neg for Pipeline {
  type Output = Pipeline;

  fn neg(self) -> Pipeline {
    self.toggle_check_exit()
  }
}
