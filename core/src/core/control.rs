// procpipe/src/core/control.rs

//! Defines per-run options and the outcome of a pipeline run.

/// What a run hands back to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResultMode {
  /// The captured output, or nothing when the output was not captured.
  #[default]
  Output,
  /// The exit status of the last command.
  ExitStatus,
  /// Both the last command's exit status and the captured output.
  Both,
}

/// Options for a single run. The pipeline value itself is not affected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
  pub result: ResultMode,
  /// Send every command's stderr to the null device.
  pub suppress_stderr: bool,
  /// Merge every command's stderr into its own stdout.
  /// Ignored for a command when `suppress_stderr` is also set.
  pub capture_stderr: bool,
  /// Do not fail on nonzero exit statuses.
  pub suppress_exit_check: bool,
}

impl RunOptions {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_result(mut self, result: ResultMode) -> Self {
    self.result = result;
    self
  }

  pub fn suppress_stderr(mut self) -> Self {
    self.suppress_stderr = true;
    self
  }

  pub fn capture_stderr(mut self) -> Self {
    self.capture_stderr = true;
    self
  }

  pub fn suppress_exit_check(mut self) -> Self {
    self.suppress_exit_check = true;
    self
  }
}

/// Output collected from the last command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Captured {
  Bytes(Vec<u8>),
  /// Invalid UTF-8 sequences were replaced with U+FFFD.
  Text(String),
}

impl Captured {
  pub fn as_bytes(&self) -> &[u8] {
    match self {
      Captured::Bytes(bytes) => bytes,
      Captured::Text(text) => text.as_bytes(),
    }
  }

  pub fn as_text(&self) -> Option<&str> {
    match self {
      Captured::Text(text) => Some(text),
      Captured::Bytes(_) => None,
    }
  }

  pub fn into_bytes(self) -> Vec<u8> {
    match self {
      Captured::Bytes(bytes) => bytes,
      Captured::Text(text) => text.into_bytes(),
    }
  }
}

/// Outcome of a full pipeline run, shaped by [`ResultMode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunResult {
  Output(Option<Captured>),
  ExitStatus(i32),
  Both(i32, Option<Captured>),
}

impl RunResult {
  pub fn exit_status(&self) -> Option<i32> {
    match self {
      RunResult::ExitStatus(status) | RunResult::Both(status, _) => Some(*status),
      RunResult::Output(_) => None,
    }
  }

  pub fn captured(&self) -> Option<&Captured> {
    match self {
      RunResult::Output(captured) | RunResult::Both(_, captured) => captured.as_ref(),
      RunResult::ExitStatus(_) => None,
    }
  }

  pub fn into_captured(self) -> Option<Captured> {
    match self {
      RunResult::Output(captured) | RunResult::Both(_, captured) => captured,
      RunResult::ExitStatus(_) => None,
    }
  }

  /// Captured text, when the output was captured as text.
  pub fn text(&self) -> Option<&str> {
    self.captured().and_then(Captured::as_text)
  }

  /// Captured output as raw bytes, whichever capture mode was used.
  pub fn bytes(&self) -> Option<&[u8]> {
    self.captured().map(Captured::as_bytes)
  }
}
