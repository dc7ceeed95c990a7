// procpipe/src/core/endpoint.rs

//! Defines the stream endpoints a pipeline can be attached to.

use std::fmt;
use std::fs::File;
use std::os::fd::{AsFd, AsRawFd, OwnedFd, RawFd};
use std::sync::Arc;

/// Where the first command reads from, or where the last command writes to.
///
/// The same enumeration serves both ends of a pipeline. Not every variant is
/// meaningful on both sides: literal content only makes sense as input and
/// capture modes only make sense as output. See [`Endpoint::valid_as_input`]
/// and [`Endpoint::valid_as_output`].
#[derive(Clone, Default)]
pub enum Endpoint {
  /// Share the calling process's own stream. This is the unset state.
  #[default]
  Inherit,
  /// The null device.
  Discard,
  /// Collect the final output as raw bytes.
  CaptureBytes,
  /// Collect the final output and decode it lossily as UTF-8.
  CaptureText,
  /// A descriptor owned by the endpoint, e.g. a `File` moved in. It is
  /// duplicated for every run and closed once the last pipeline holding it
  /// is dropped.
  Descriptor(Arc<OwnedFd>),
  /// A descriptor number held open by the caller, e.g. `1` for stdout.
  /// Nothing is duplicated until a run starts; the caller must keep it open
  /// whenever the pipeline runs.
  RawDescriptor(RawFd),
  /// Literal bytes fed to the first command.
  Bytes(Arc<[u8]>),
  /// Literal text fed to the first command, UTF-8 encoded.
  Text(Arc<str>),
}

impl Endpoint {
  /// Refers to the descriptor behind `fd`, keeping its number.
  ///
  /// `fd` is only borrowed: it must stay open whenever the pipeline runs.
  pub fn fd<F: AsFd + ?Sized>(fd: &F) -> Self {
    Endpoint::RawDescriptor(fd.as_fd().as_raw_fd())
  }

  /// Refers to descriptor number `fd`, which the caller keeps open.
  pub fn raw_fd(fd: RawFd) -> Self {
    Endpoint::RawDescriptor(fd)
  }

  /// Number of the descriptor this endpoint refers to, if any.
  pub fn raw_descriptor(&self) -> Option<RawFd> {
    match self {
      Endpoint::Descriptor(fd) => Some(fd.as_raw_fd()),
      Endpoint::RawDescriptor(fd) => Some(*fd),
      _ => None,
    }
  }

  pub fn is_inherit(&self) -> bool {
    matches!(self, Endpoint::Inherit)
  }

  pub fn valid_as_input(&self) -> bool {
    !matches!(self, Endpoint::CaptureBytes | Endpoint::CaptureText)
  }

  pub fn valid_as_output(&self) -> bool {
    !matches!(self, Endpoint::Bytes(_) | Endpoint::Text(_))
  }

  /// Content to feed when this endpoint is used as input.
  pub(crate) fn literal(&self) -> Option<Arc<[u8]>> {
    match self {
      Endpoint::Bytes(bytes) => Some(Arc::clone(bytes)),
      Endpoint::Text(text) => Some(Arc::from(text.as_bytes())),
      _ => None,
    }
  }

  pub(crate) fn kind(&self) -> &'static str {
    match self {
      Endpoint::Inherit => "inherit",
      Endpoint::Discard => "discard",
      Endpoint::CaptureBytes => "capture-bytes",
      Endpoint::CaptureText => "capture-text",
      Endpoint::Descriptor(_) | Endpoint::RawDescriptor(_) => "descriptor",
      Endpoint::Bytes(_) => "literal-bytes",
      Endpoint::Text(_) => "literal-text",
    }
  }
}

/// Renders the token used in a pipeline's textual form.
impl fmt::Display for Endpoint {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Endpoint::Inherit => Ok(()),
      Endpoint::Discard => f.write_str("<discard>"),
      Endpoint::CaptureBytes | Endpoint::Bytes(_) => f.write_str("<bytes>"),
      Endpoint::CaptureText | Endpoint::Text(_) => f.write_str("<text>"),
      Endpoint::Descriptor(fd) => write!(f, "{}", fd.as_raw_fd()),
      Endpoint::RawDescriptor(fd) => write!(f, "{}", fd),
    }
  }
}

impl fmt::Debug for Endpoint {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Endpoint::Descriptor(fd) => f.debug_tuple("Descriptor").field(&fd.as_raw_fd()).finish(),
      Endpoint::RawDescriptor(fd) => f.debug_tuple("RawDescriptor").field(fd).finish(),
      Endpoint::Bytes(bytes) => f.debug_struct("Bytes").field("len", &bytes.len()).finish(),
      Endpoint::Text(text) => f.debug_struct("Text").field("len", &text.len()).finish(),
      other => f.write_str(other.kind()),
    }
  }
}

impl From<&str> for Endpoint {
  fn from(text: &str) -> Self {
    Endpoint::Text(Arc::from(text))
  }
}

impl From<String> for Endpoint {
  fn from(text: String) -> Self {
    Endpoint::Text(Arc::from(text))
  }
}

impl From<&[u8]> for Endpoint {
  fn from(bytes: &[u8]) -> Self {
    Endpoint::Bytes(Arc::from(bytes))
  }
}

impl<const N: usize> From<&[u8; N]> for Endpoint {
  fn from(bytes: &[u8; N]) -> Self {
    Endpoint::Bytes(Arc::from(&bytes[..]))
  }
}

impl From<Vec<u8>> for Endpoint {
  fn from(bytes: Vec<u8>) -> Self {
    Endpoint::Bytes(Arc::from(bytes))
  }
}

impl From<OwnedFd> for Endpoint {
  fn from(fd: OwnedFd) -> Self {
    Endpoint::Descriptor(Arc::new(fd))
  }
}

impl From<RawFd> for Endpoint {
  fn from(fd: RawFd) -> Self {
    Endpoint::RawDescriptor(fd)
  }
}

impl From<File> for Endpoint {
  fn from(file: File) -> Self {
    Endpoint::Descriptor(Arc::new(OwnedFd::from(file)))
  }
}
