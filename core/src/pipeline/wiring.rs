// procpipe/src/pipeline/wiring.rs

//! Resolves endpoints and per-run options into the standard streams handed to each child.
//!
//! Every descriptor created here is close-on-exec and owned: whatever is moved into a
//! `Command` is closed in this process as soon as that `Command` is dropped.

use crate::core::control::{Captured, RunOptions};
use crate::core::endpoint::Endpoint;
use crate::core::segment::Segment;
use crate::error::{ProcPipeError, ProcResult};
use std::io::{self, PipeReader, PipeWriter, Read, Write};
use std::os::fd::{AsFd, BorrowedFd, OwnedFd, RawFd};
use std::process::Stdio;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{event, Level};

/// Where a command's stdout goes. Kept apart from `Stdio` so stderr can be
/// merged into the very same target.
#[derive(Debug)]
pub(crate) enum OutTarget {
  Inherit,
  Null,
  Fd(OwnedFd),
}

impl OutTarget {
  /// A second handle on the same target, for `2>&1`.
  pub(crate) fn merged(&self) -> io::Result<Stdio> {
    Ok(match self {
      OutTarget::Inherit => Stdio::from(io::stdout().as_fd().try_clone_to_owned()?),
      OutTarget::Null => Stdio::null(),
      OutTarget::Fd(fd) => Stdio::from(fd.try_clone()?),
    })
  }

  pub(crate) fn into_stdio(self) -> Stdio {
    match self {
      OutTarget::Inherit => Stdio::inherit(),
      OutTarget::Null => Stdio::null(),
      OutTarget::Fd(fd) => Stdio::from(fd),
    }
  }
}

/// Literal input waiting to be written into the head command's stdin.
pub(crate) struct Feed {
  writer: PipeWriter,
  content: Arc<[u8]>,
}

impl Feed {
  /// Starts the feeder thread. It owns the write end and closes it when done.
  pub(crate) fn start(self) -> io::Result<JoinHandle<io::Result<()>>> {
    thread::Builder::new()
      .name("procpipe-feeder".to_string())
      .spawn(move || self.feed())
  }

  fn feed(mut self) -> io::Result<()> {
    let result = if self.content.is_empty() {
      Ok(())
    } else {
      self.writer.write_all(&self.content)
    };
    drop(self.writer);
    match result {
      Ok(()) => {
        event!(Level::TRACE, bytes = self.content.len(), "Literal input fed.");
        Ok(())
      }
      // The consumer exited before reading everything.
      Err(e) if is_closed_consumer(&e) => {
        event!(Level::DEBUG, error = %e, "Consumer closed its input early.");
        Ok(())
      }
      Err(e) => Err(e),
    }
  }
}

/// Broken pipe, or `EINVAL` from a descriptor invalidated under the writer.
pub(crate) fn is_closed_consumer(err: &io::Error) -> bool {
  matches!(err.kind(), io::ErrorKind::BrokenPipe | io::ErrorKind::InvalidInput)
}

/// Read end of the tail pipe, drained once every command has been spawned.
pub(crate) struct Collector {
  reader: PipeReader,
  text: bool,
}

impl Collector {
  pub(crate) fn collect(mut self) -> io::Result<Captured> {
    let mut buf = Vec::new();
    self.reader.read_to_end(&mut buf)?;
    event!(Level::TRACE, bytes = buf.len(), "Captured output collected.");
    Ok(if self.text {
      Captured::Text(String::from_utf8_lossy(&buf).into_owned())
    } else {
      Captured::Bytes(buf)
    })
  }
}

/// Duplicates a caller-held descriptor number for one run.
pub(crate) fn dup_raw(fd: RawFd) -> io::Result<OwnedFd> {
  if fd < 0 {
    return Err(io::Error::new(
      io::ErrorKind::InvalidInput,
      format!("invalid descriptor {fd}"),
    ));
  }
  // SAFETY: the borrow lasts only for the duplication; the caller keeps `fd`
  // open while the pipeline runs, and a closed number fails with EBADF.
  unsafe { BorrowedFd::borrow_raw(fd) }.try_clone_to_owned()
}

/// Stdin of the first command, plus the literal content to feed when there is one.
pub(crate) fn head_input(endpoint: &Endpoint) -> ProcResult<(Stdio, Option<Feed>)> {
  if let Some(content) = endpoint.literal() {
    let (reader, writer) = io::pipe()?;
    return Ok((Stdio::from(reader), Some(Feed { writer, content })));
  }
  match endpoint {
    Endpoint::Inherit => Ok((Stdio::inherit(), None)),
    Endpoint::Discard => Ok((Stdio::null(), None)),
    Endpoint::Descriptor(fd) => Ok((Stdio::from(fd.try_clone()?), None)),
    Endpoint::RawDescriptor(fd) => Ok((Stdio::from(dup_raw(*fd)?), None)),
    other => Err(ProcPipeError::invalid_operand(format!(
      "{} endpoint cannot feed pipeline input",
      other.kind()
    ))),
  }
}

/// Stdout of the last command, plus the collector when output is captured.
pub(crate) fn tail_output(endpoint: &Endpoint) -> ProcResult<(OutTarget, Option<Collector>)> {
  match endpoint {
    Endpoint::Inherit => Ok((OutTarget::Inherit, None)),
    Endpoint::Discard => Ok((OutTarget::Null, None)),
    Endpoint::Descriptor(fd) => Ok((OutTarget::Fd(fd.try_clone()?), None)),
    Endpoint::RawDescriptor(fd) => Ok((OutTarget::Fd(dup_raw(*fd)?), None)),
    Endpoint::CaptureBytes | Endpoint::CaptureText => {
      let (reader, writer) = io::pipe()?;
      let collector = Collector {
        reader,
        text: matches!(endpoint, Endpoint::CaptureText),
      };
      Ok((OutTarget::Fd(OwnedFd::from(writer)), Some(collector)))
    }
    other => Err(ProcPipeError::invalid_operand(format!(
      "{} endpoint cannot receive pipeline output",
      other.kind()
    ))),
  }
}

/// Stdout of an interior command: a fresh pipe whose read end feeds the next command.
pub(crate) fn interior_output() -> io::Result<(OutTarget, PipeReader)> {
  let (reader, writer) = io::pipe()?;
  Ok((OutTarget::Fd(OwnedFd::from(writer)), reader))
}

/// Stderr for `segment`. `suppress_stderr` is checked before `capture_stderr`.
pub(crate) fn stderr_for(segment: &Segment, options: &RunOptions, stdout: &OutTarget) -> io::Result<Stdio> {
  if options.suppress_stderr {
    Ok(Stdio::null())
  } else if options.capture_stderr || segment.combine_stderr() {
    stdout.merged()
  } else {
    Ok(Stdio::inherit())
  }
}
