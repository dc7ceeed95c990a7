// procpipe/src/pipeline/execution.rs

//! Contains `Pipeline::execute()` and `Pipeline::run()`, which spawn the chain as
//! wired child processes, collect the final output and enforce exit-status policy.

use crate::core::control::{Captured, ResultMode, RunOptions, RunResult};
use crate::error::{ProcPipeError, ProcResult};
use crate::pipeline::definition::Pipeline;
use crate::pipeline::wiring::{self, Collector};
use std::io::{self, PipeReader};
use std::os::unix::process::ExitStatusExt;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::JoinHandle;
use tracing::{event, instrument, span, Level};

type FeederHandle = JoinHandle<io::Result<()>>;

impl Pipeline {
  /// Runs the pipeline to completion on the calling thread.
  ///
  /// Commands are spawned in chain order, each stdin wired to the previous stdout.
  /// Literal input is written by a dedicated feeder thread so a large input cannot
  /// deadlock against a command that has not started reading yet. The call blocks
  /// until every command has exited; there is no timeout.
  ///
  /// Children that were spawned are always waited on, even when a later command
  /// fails to spawn.
  #[instrument(
        name = "Pipeline::execute",
        skip_all,
        fields(
            pipeline = %self,
            num_segments = self.segments.len(),
            result_mode = ?options.result,
        ),
        err(Display)
    )]
  pub fn execute(&self, options: &RunOptions) -> ProcResult<RunResult> {
    event!(Level::DEBUG, "Pipeline execution starting.");

    let mut children: Vec<Child> = Vec::with_capacity(self.segments.len());
    let mut feeder: Option<FeederHandle> = None;

    let collected = self
      .launch(options, &mut children, &mut feeder)
      .and_then(|collector| collector.map(|c| c.collect().map_err(ProcPipeError::from)).transpose());
    let waited = wait_all(&mut children);
    let fed = join_feeder(feeder);

    let captured = collected?;
    let statuses = waited?;
    fed?;

    if options.suppress_exit_check {
      event!(Level::TRACE, "Exit-status checks suppressed for this run.");
    } else {
      self.check_statuses(&statuses)?;
    }

    let last = statuses
      .last()
      .map(|status| status_code(*status))
      .ok_or_else(|| ProcPipeError::Internal("pipeline finished without spawning a process".to_string()))?;

    event!(Level::DEBUG, exit_status = last, "Pipeline execution completed.");
    Ok(shape(options.result, last, captured))
  }

  /// Async entry point: runs [`Pipeline::execute`] on tokio's blocking pool.
  pub async fn run(&self, options: RunOptions) -> ProcResult<RunResult> {
    let pipeline = self.clone();
    tokio::task::spawn_blocking(move || pipeline.execute(&options))
      .await
      .map_err(|e| ProcPipeError::Internal(format!("blocking executor task failed: {e}")))?
  }

  /// Spawns every segment. Returns the tail collector when output is captured.
  fn launch(
    &self,
    options: &RunOptions,
    children: &mut Vec<Child>,
    feeder: &mut Option<FeederHandle>,
  ) -> ProcResult<Option<Collector>> {
    let last = self.segments.len() - 1;
    let mut upstream: Option<PipeReader> = None;
    let mut collector = None;

    for (index, segment) in self.segments.iter().enumerate() {
      let segment_span = span!(
        Level::DEBUG,
        "pipeline_segment_spawn",
        segment_index = index,
        program = segment.program()
      );
      let _segment_span_guard = segment_span.enter();

      let (stdin, feed) = if index == 0 {
        wiring::head_input(&self.input)?
      } else {
        let reader = upstream
          .take()
          .ok_or_else(|| ProcPipeError::Internal(format!("segment {index} has no upstream pipe")))?;
        (Stdio::from(reader), None)
      };

      let stdout = if index < last {
        let (target, reader) = wiring::interior_output()?;
        upstream = Some(reader);
        target
      } else {
        let (target, tail) = wiring::tail_output(&self.output)?;
        collector = tail;
        target
      };
      let stderr = wiring::stderr_for(segment, options, &stdout)?;

      let mut command = Command::new(segment.program());
      command
        .args(&segment.args()[1..])
        .stdin(stdin)
        .stdout(stdout.into_stdio())
        .stderr(stderr);
      let child = command.spawn().map_err(|source| {
        event!(Level::ERROR, error = %source, "Failed to spawn segment.");
        ProcPipeError::SpawnFailure {
          program: segment.program().to_string(),
          source,
        }
      })?;
      // Closes the far ends held by the command.
      drop(command);

      event!(Level::DEBUG, pid = child.id(), "Segment spawned.");
      children.push(child);

      if let Some(feed) = feed {
        *feeder = Some(feed.start()?);
      }
    }

    Ok(collector)
  }

  /// Fails on the first checked segment, in chain order, with a nonzero status.
  fn check_statuses(&self, statuses: &[ExitStatus]) -> ProcResult<()> {
    for (index, (segment, status)) in self.segments.iter().zip(statuses).enumerate() {
      let code = status_code(*status);
      if code == 0 {
        continue;
      }
      if segment.check_exit() {
        event!(
          Level::ERROR,
          segment_index = index,
          program = segment.program(),
          status = code,
          "Checked segment exited with a nonzero status."
        );
        return Err(ProcPipeError::ExitStatusFailure {
          args: segment.args().to_vec(),
          status: code,
        });
      }
      event!(
        Level::DEBUG,
        segment_index = index,
        status = code,
        "Unchecked segment exited with a nonzero status."
      );
    }
    Ok(())
  }
}

/// Waits on every child in order, reporting the first wait error afterwards.
fn wait_all(children: &mut [Child]) -> ProcResult<Vec<ExitStatus>> {
  let mut statuses = Vec::with_capacity(children.len());
  let mut first_error: Option<io::Error> = None;
  for child in children.iter_mut() {
    match child.wait() {
      Ok(status) => statuses.push(status),
      Err(e) => {
        event!(Level::WARN, pid = child.id(), error = %e, "Waiting on child failed.");
        if first_error.is_none() {
          first_error = Some(e);
        }
      }
    }
  }
  match first_error {
    Some(e) => Err(e.into()),
    None => Ok(statuses),
  }
}

fn join_feeder(feeder: Option<FeederHandle>) -> ProcResult<()> {
  match feeder {
    None => Ok(()),
    Some(handle) => handle
      .join()
      .map_err(|_| ProcPipeError::Internal("feeder thread panicked".to_string()))?
      .map_err(ProcPipeError::from),
  }
}

/// Exit code, or the negated signal number for a signal-terminated child.
fn status_code(status: ExitStatus) -> i32 {
  status
    .code()
    .unwrap_or_else(|| status.signal().map_or(-1, |signal| -signal))
}

fn shape(mode: ResultMode, status: i32, captured: Option<Captured>) -> RunResult {
  match mode {
    ResultMode::Output => RunResult::Output(captured),
    ResultMode::ExitStatus => RunResult::ExitStatus(status),
    ResultMode::Both => RunResult::Both(status, captured),
  }
}
