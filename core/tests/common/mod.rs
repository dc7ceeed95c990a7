// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use once_cell::sync::Lazy;
use procpipe::{Endpoint, Pipeline, ProcResult};
use tracing::Level;

// --- Helper for Tracing Setup (call once per test run if needed) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Common Pipelines ---

/// `sh -c <script>`; the script is passed as one argument, unsplit.
pub fn sh(script: &str) -> Pipeline {
  Pipeline::new("sh").arg(["-c", script]).expect("list arguments never fail")
}

/// Copies stdin to stdout.
pub fn identity() -> Pipeline {
  Pipeline::new("cat")
}

/// Reads all of stdin and prints `hello <stdin>`.
pub fn greeter() -> Pipeline {
  sh(r#"printf 'hello %s\n' "$(cat)""#)
}

/// Like `greeter`, then writes `stderr` to stderr after stdout is flushed.
pub fn noisy_greeter() -> Pipeline {
  sh(r#"printf 'hello %s\n' "$(cat)"; echo stderr >&2"#)
}

pub fn capture_text(pipeline: &Pipeline) -> ProcResult<Pipeline> {
  pipeline.stdout(Endpoint::CaptureText)
}

pub fn capture_bytes(pipeline: &Pipeline) -> ProcResult<Pipeline> {
  pipeline.stdout(Endpoint::CaptureBytes)
}
