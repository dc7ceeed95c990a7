// procpipe/examples/basic_pipeline.rs

use procpipe::{Endpoint, Pipeline, ProcPipeError, ResultMode, RunOptions};
use tracing::info;

fn main() -> anyhow::Result<()> {
  // Initialize tracing (optional, for demonstration)
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Basic Pipeline Example ---");

  // 1. One pipeline value per command. Nothing runs yet.
  let split = Pipeline::new("tr").arg("-s ' ' '\\n'")?;
  let sort = Pipeline::new("sort");
  let count = Pipeline::new("uniq").arg(["-c"])?;

  // 2. Chain them and bind the endpoints: literal text in, captured text out.
  let words = (split | sort | count)
    .stdin("the quick brown fox jumps over the lazy dog the end")?
    .stdout(Endpoint::CaptureText)?;
  info!("Built: {}", words);

  // 3. Run it.
  let result = words.execute(&RunOptions::default())?;
  for line in result.text().unwrap_or_default().lines() {
    info!("{}", line.trim());
  }

  // 4. The value is unchanged and reusable; ask for the exit status as well.
  let both = words.execute(&RunOptions::default().with_result(ResultMode::Both))?;
  info!("Exit status of the last command: {:?}", both.exit_status());

  // 5. `-p` ignores a command's exit status, `!p` merges its stderr into stdout.
  let lenient = !-Pipeline::new("sh").arg(["-c", "echo to-stdout; echo to-stderr >&2; exit 1"])?;
  let lenient = lenient.stdout(Endpoint::CaptureText)?;
  info!("Built: {}", lenient);
  match lenient.execute(&RunOptions::default()) {
    Ok(result) => info!("Merged output: {:?}", result.text()),
    Err(ProcPipeError::ExitStatusFailure { args, status }) => {
      info!("Unexpected failure of {:?} with {}", args, status)
    }
    Err(e) => return Err(e.into()),
  }

  info!("--- Basic Pipeline Example Finished ---");
  Ok(())
}
