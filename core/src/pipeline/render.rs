// procpipe/src/pipeline/render.rs

//! Textual form of a pipeline, e.g. `<text> | ~grep -v x | -head | <bytes>`.

use crate::core::segment::Segment;
use crate::pipeline::definition::Pipeline;
use std::fmt;

impl fmt::Display for Segment {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.combine_stderr {
      f.write_str("~")?;
    }
    if !self.check_exit {
      f.write_str("-")?;
    }
    f.write_str(&self.args.join(" "))
  }
}

impl fmt::Display for Pipeline {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut parts: Vec<String> = Vec::with_capacity(self.segments.len() + 2);
    if !self.input.is_inherit() {
      parts.push(self.input.to_string());
    }
    parts.extend(self.segments.iter().map(|segment| segment.to_string()));
    if !self.output.is_inherit() {
      parts.push(self.output.to_string());
    }
    f.write_str(&parts.join(" | "))
  }
}
