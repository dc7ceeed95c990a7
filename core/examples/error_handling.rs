// procpipe/examples/error_handling.rs

use procpipe::{Endpoint, Pipeline, ProcPipeError, RunOptions};
use tracing::{error, info};

// 1. Define a custom application error type
#[derive(Debug, thiserror::Error)]
enum ExampleAppError {
  #[error("Command output did not look right: {0}")]
  UnexpectedOutput(String),

  #[error("procpipe error during pipeline execution: {0}")]
  Pipeline(#[from] ProcPipeError), // Allows ProcPipeError to be converted into ExampleAppError
}

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Error Handling Example ---");

  info!("\nScenario 1: A checked command exits with a nonzero status");
  report(failing_grep().await);

  info!("\nScenario 2: A command in the middle of the chain does not exist");
  report(missing_program().await);

  info!("\nScenario 3: An endpoint attached to the wrong side");
  report(wrong_side());

  info!("\nScenario 4: The consumer stops reading early; this is not an error");
  report(early_close().await);
}

fn report(outcome: Result<String, ExampleAppError>) {
  match outcome {
    Ok(output) => info!("Succeeded with output {:?}", output),
    Err(ExampleAppError::Pipeline(ProcPipeError::ExitStatusFailure { args, status })) => {
      info!("Command {:?} failed with status {} (as expected)", args, status)
    }
    Err(ExampleAppError::Pipeline(ProcPipeError::SpawnFailure { program, source })) => {
      info!("Could not start '{}': {} (as expected)", program, source)
    }
    Err(ExampleAppError::Pipeline(ProcPipeError::InvalidOperand { reason })) => {
      info!("Rejected while building: {} (as expected)", reason)
    }
    Err(e) => error!("Unexpected error: {}", e),
  }
}

async fn failing_grep() -> Result<String, ExampleAppError> {
  // grep exits with 1 when nothing matches.
  let p = Pipeline::new("grep")
    .arg("needle")?
    .stdin("hay\nstack\n")?
    .stdout(Endpoint::CaptureText)?;
  let result = p.run(Default::default()).await?;
  Ok(result.text().unwrap_or_default().to_string())
}

async fn missing_program() -> Result<String, ExampleAppError> {
  let p = (Pipeline::new("cat") | Pipeline::new("no-such-program-here") | Pipeline::new("wc"))
    .stdin("some input\n")?
    .stdout(Endpoint::CaptureText)?;
  let result = p.run(Default::default()).await?;
  Ok(result.text().unwrap_or_default().to_string())
}

fn wrong_side() -> Result<String, ExampleAppError> {
  let p = Pipeline::new("cat").stdout("literal text cannot be an output")?;
  Ok(p.to_string())
}

async fn early_close() -> Result<String, ExampleAppError> {
  let p = (Pipeline::new("cat") | Pipeline::new("head").arg("-n 1")?)
    .stdin("first\n".repeat(500_000))?
    .stdout(Endpoint::CaptureText)?;
  let options = RunOptions::default().suppress_exit_check();
  let result = p.run(options).await?;
  let text = result.text().unwrap_or_default().to_string();
  if text != "first\n" {
    return Err(ExampleAppError::UnexpectedOutput(text));
  }
  Ok(text)
}
