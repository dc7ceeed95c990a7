// procpipe/src/core/segment.rs

//! Defines a single external command within a pipeline.

/// One external command plus its per-command flags.
///
/// Segments are shared between pipelines through `Arc` and are never mutated
/// after being shared; every operator that changes a flag or the argument
/// vector builds a replacement segment instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
  pub(crate) args: Vec<String>,
  pub(crate) combine_stderr: bool,
  pub(crate) check_exit: bool,
}

impl Segment {
  pub(crate) fn new(program: String) -> Self {
    Self {
      args: vec![program],
      combine_stderr: false,
      check_exit: true,
    }
  }

  /// Full argument vector; the first element is the program.
  pub fn args(&self) -> &[String] {
    &self.args
  }

  pub fn program(&self) -> &str {
    // args is seeded with the program and only ever grows
    &self.args[0]
  }

  /// Whether stderr is merged into this command's own stdout.
  pub fn combine_stderr(&self) -> bool {
    self.combine_stderr
  }

  /// Whether a nonzero exit status of this command fails the run.
  pub fn check_exit(&self) -> bool {
    self.check_exit
  }

  pub(crate) fn with_args<I>(&self, extra: I) -> Self
  where
    I: IntoIterator<Item = String>,
  {
    let mut next = self.clone();
    next.args.extend(extra);
    next
  }

  pub(crate) fn with_combine_toggled(&self) -> Self {
    Self {
      combine_stderr: !self.combine_stderr,
      ..self.clone()
    }
  }

  pub(crate) fn with_check_toggled(&self) -> Self {
    Self {
      check_exit: !self.check_exit,
      ..self.clone()
    }
  }
}
