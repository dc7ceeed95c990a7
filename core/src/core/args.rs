// procpipe/src/core/args.rs

//! Arguments accepted by `Pipeline::arg`: a ready-made list or a shell-like line.

use crate::error::{ProcPipeError, ProcResult};

/// Arguments to append to the current segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Args {
  /// Appended verbatim.
  List(Vec<String>),
  /// Split with POSIX shell quoting rules before being appended.
  Line(String),
}

impl Args {
  /// Resolves into the final token list.
  pub fn into_tokens(self) -> ProcResult<Vec<String>> {
    match self {
      Args::List(list) => Ok(list),
      Args::Line(line) => shlex::split(&line)
        .ok_or_else(|| ProcPipeError::invalid_operand(format!("cannot tokenize argument line {line:?}"))),
    }
  }
}

impl From<&str> for Args {
  fn from(line: &str) -> Self {
    Args::Line(line.to_string())
  }
}

impl From<String> for Args {
  fn from(line: String) -> Self {
    Args::Line(line)
  }
}

impl From<Vec<String>> for Args {
  fn from(list: Vec<String>) -> Self {
    Args::List(list)
  }
}

impl From<Vec<&str>> for Args {
  fn from(list: Vec<&str>) -> Self {
    Args::List(list.into_iter().map(str::to_string).collect())
  }
}

impl From<&[&str]> for Args {
  fn from(list: &[&str]) -> Self {
    Args::List(list.iter().map(|s| (*s).to_string()).collect())
  }
}

impl<const N: usize> From<[&str; N]> for Args {
  fn from(list: [&str; N]) -> Self {
    Args::List(list.iter().map(|s| (*s).to_string()).collect())
  }
}
