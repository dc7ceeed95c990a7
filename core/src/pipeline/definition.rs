// procpipe/src/pipeline/definition.rs

//! Contains the `Pipeline` struct definition, its constructor and the
//! per-segment operators (argument extension and flag toggles).

use crate::core::args::Args;
use crate::core::endpoint::Endpoint;
use crate::core::segment::Segment;
use crate::error::ProcResult;
use std::sync::Arc;

/// An immutable chain of external commands with optional input and output endpoints.
///
/// Every operator takes `&self` (or `self` for the operator traits) and returns a
/// new `Pipeline`; the receiver is never modified. Cloning is cheap: the chain is a
/// vector of shared, immutable segments.
///
/// The "current" segment is the last one in the chain. `arg`,
/// `toggle_combine_stderr` and `toggle_check_exit` (and so `!p` and `-p`)
/// act on it, never on the head: `!(ls | grep)` renders as `ls | ~grep`, and
/// `(ls | grep).arg("-v")` extends `grep`. To flag an earlier command, apply
/// the operator before concatenating, as in `!ls | grep`.
#[derive(Debug, Clone)]
pub struct Pipeline {
  /// Ordered chain, never empty.
  pub(crate) segments: Vec<Arc<Segment>>,
  /// Stdin of the first segment.
  pub(crate) input: Endpoint,
  /// Stdout of the last segment.
  pub(crate) output: Endpoint,
}

impl Pipeline {
  /// Creates a one-segment pipeline running `program` with no arguments.
  pub fn new<S: Into<String>>(program: S) -> Self {
    Self {
      segments: vec![Arc::new(Segment::new(program.into()))],
      input: Endpoint::Inherit,
      output: Endpoint::Inherit,
    }
  }

  pub fn segments(&self) -> &[Arc<Segment>] {
    &self.segments
  }

  /// Number of commands in the chain. Always at least one.
  pub fn len(&self) -> usize {
    self.segments.len()
  }

  /// Always `false`: a pipeline holds at least one command.
  pub fn is_empty(&self) -> bool {
    self.segments.is_empty()
  }

  pub fn input(&self) -> &Endpoint {
    &self.input
  }

  pub fn output(&self) -> &Endpoint {
    &self.output
  }

  /// Appends arguments to the current segment.
  ///
  /// A string is split with POSIX shell quoting rules; a list is appended as is.
  /// Fails with `InvalidOperand` when a string cannot be tokenized.
  pub fn arg<A: Into<Args>>(&self, args: A) -> ProcResult<Self> {
    let tokens = args.into().into_tokens()?;
    Ok(self.with_current(|segment| segment.with_args(tokens)))
  }

  /// Flips stderr merging on the current segment.
  pub fn toggle_combine_stderr(&self) -> Self {
    self.with_current(Segment::with_combine_toggled)
  }

  /// Flips exit checking on the current segment. Checking is on by default.
  pub fn toggle_check_exit(&self) -> Self {
    self.with_current(Segment::with_check_toggled)
  }

  /// Copies the chain, replacing the current segment with `update(current)`.
  fn with_current(&self, update: impl FnOnce(&Segment) -> Segment) -> Self {
    let mut next = self.clone();
    if let Some(current) = next.segments.last_mut() {
      *current = Arc::new(update(current.as_ref()));
    }
    next
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn new_has_single_checked_segment() {
    let ls = Pipeline::new("ls");
    assert_eq!(ls.len(), 1);
    assert!(!ls.is_empty());
    assert_eq!(ls.segments()[0].args(), ["ls"]);
    assert!(ls.segments()[0].check_exit());
    assert!(!ls.segments()[0].combine_stderr());
    assert!(ls.input().is_inherit() && ls.output().is_inherit());
  }

  #[test]
  fn toggles_share_untouched_segments() {
    let chain = Pipeline::new("ls") | Pipeline::new("grep");
    let toggled = chain.toggle_check_exit();
    assert!(Arc::ptr_eq(&chain.segments()[0], &toggled.segments()[0]));
    assert!(!Arc::ptr_eq(&chain.segments()[1], &toggled.segments()[1]));
    assert!(chain.segments()[1].check_exit());
    assert!(!toggled.segments()[1].check_exit());
  }

  #[test]
  fn operators_act_on_last_segment_not_head() {
    let chain = Pipeline::new("ls") | Pipeline::new("grep");
    assert_eq!(chain.len(), 2);
    assert!(!chain.is_empty());
    assert_eq!((!chain.clone()).to_string(), "ls | ~grep");
    assert_eq!((-chain.clone()).to_string(), "ls | -grep");
    assert_eq!((!Pipeline::new("ls") | Pipeline::new("grep")).to_string(), "~ls | grep");
  }

  #[test]
  fn arg_extends_current_segment() {
    let chain = (Pipeline::new("ls") | Pipeline::new("grep")).arg("-v foo").unwrap();
    assert_eq!(chain.segments()[0].args(), ["ls"]);
    assert_eq!(chain.segments()[1].args(), ["grep", "-v", "foo"]);
  }
}
