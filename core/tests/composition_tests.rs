// tests/composition_tests.rs
mod common;

use common::*;
use procpipe::{Endpoint, Operand, Pipeline, ProcPipeError};
use std::io;
use std::os::fd::AsRawFd;

fn ls() -> Pipeline {
  Pipeline::new("ls")
}

#[test]
fn test_toggles_are_involutive() {
  setup_tracing();
  let ls = ls();
  assert_eq!(ls.to_string(), "ls");
  assert_eq!((!ls.clone()).to_string(), "~ls");
  assert_eq!((!(!ls.clone())).to_string(), "ls");
  assert_eq!((-ls.clone()).to_string(), "-ls");
  assert_eq!((-(-ls.clone())).to_string(), "ls");
  assert_eq!(ls.toggle_combine_stderr().toggle_combine_stderr().to_string(), ls.to_string());
  assert_eq!(ls.toggle_check_exit().toggle_check_exit().to_string(), ls.to_string());
}

#[test]
fn test_line_and_list_arguments_render_identically() {
  setup_tracing();
  assert_eq!(ls().arg("-la").unwrap().to_string(), "ls -la");
  assert_eq!(ls().arg(["-la"]).unwrap().to_string(), "ls -la");
  assert_eq!(ls().arg("-l -a").unwrap().to_string(), "ls -l -a");
  assert_eq!(ls().arg(["-l", "-a"]).unwrap().to_string(), "ls -l -a");
  assert_eq!(
    ls().arg("-l -a").unwrap().segments()[0].args(),
    ls().arg(vec!["-l".to_string(), "-a".to_string()]).unwrap().segments()[0].args()
  );
}

#[test]
fn test_arguments_accumulate() {
  setup_tracing();
  let p = ls().arg("-l").unwrap().arg(["-a", "my dir"]).unwrap();
  assert_eq!(p.segments()[0].args(), ["ls", "-l", "-a", "my dir"]);
}

#[test]
fn test_discard_endpoints() {
  setup_tracing();
  assert_eq!(ls().attach(Endpoint::Discard).unwrap().to_string(), "ls | <discard>");
  assert_eq!(ls().attach_reversed(Endpoint::Discard).unwrap().to_string(), "<discard> | ls");
  let both = ls()
    .attach_reversed(Endpoint::Discard)
    .and_then(|p| p.attach(Endpoint::Discard))
    .unwrap();
  assert_eq!(both.to_string(), "<discard> | ls | <discard>");
}

#[test]
fn test_standard_descriptors_render_their_number() {
  setup_tracing();
  assert_eq!(ls().attach(1).unwrap().to_string(), "ls | 1");
  assert_eq!(ls().attach_reversed(1).unwrap().to_string(), "1 | ls");
  let both = ls().stdin(1).and_then(|p| p.stdout(1)).unwrap();
  assert_eq!(both.to_string(), "1 | ls | 1");
  assert_eq!(ls().stdout(Endpoint::fd(&io::stdout())).unwrap().to_string(), "ls | 1");
  assert_eq!(ls().stdout(Endpoint::fd(&io::stderr())).unwrap().to_string(), "ls | 2");
  assert_eq!(ls().stdin(Endpoint::raw_fd(0)).unwrap().to_string(), "0 | ls");
}

#[test]
fn test_descriptor_endpoints_render_their_number() {
  setup_tracing();
  let file = tempfile::tempfile().unwrap();
  let endpoint = Endpoint::fd(&file);
  let fd = endpoint.to_string();
  assert_eq!(fd, file.as_raw_fd().to_string());
  assert_eq!(ls().attach(endpoint.clone()).unwrap().to_string(), format!("ls | {fd}"));
  assert_eq!(ls().attach_reversed(endpoint.clone()).unwrap().to_string(), format!("{fd} | ls"));
  let both = ls().stdin(endpoint.clone()).and_then(|p| p.stdout(endpoint)).unwrap();
  assert_eq!(both.to_string(), format!("{fd} | ls | {fd}"));
}

#[test]
fn test_literal_and_capture_endpoints() {
  setup_tracing();
  assert_eq!(capture_text(&ls()).unwrap().to_string(), "ls | <text>");
  assert_eq!(ls().stdin("hello").unwrap().to_string(), "<text> | ls");
  assert_eq!(capture_bytes(&ls()).unwrap().to_string(), "ls | <bytes>");
  assert_eq!(ls().stdin(b"hello").unwrap().to_string(), "<bytes> | ls");
  let full = ls().stdin(b"hello".to_vec()).and_then(|p| capture_bytes(&p)).unwrap();
  assert_eq!(full.to_string(), "<bytes> | ls | <bytes>");
}

#[test]
fn test_concatenation_keeps_operands_intact() {
  setup_tracing();
  let grep = Pipeline::new("grep");
  let less = Pipeline::new("less");
  let p = ls() | grep;
  assert_eq!((p.clone() | less.clone()).to_string(), "ls | grep | less");
  assert_eq!((less.clone() | p.clone()).to_string(), "less | ls | grep");
  assert_eq!((less.clone() | p.clone() | less.clone()).to_string(), "less | ls | grep | less");
  assert_eq!(p.to_string(), "ls | grep");
  assert_eq!(less.to_string(), "less");
}

#[test]
fn test_concatenation_of_chains() {
  setup_tracing();
  let p = ls() | Pipeline::new("grep");
  let q = ls() | Pipeline::new("head");
  assert_eq!((&p | &q).to_string(), "ls | grep | ls | head");
  assert_eq!((&(&p | &p) | &q).to_string(), "ls | grep | ls | grep | ls | head");
  assert_eq!((&(&p | &q) | &q).to_string(), "ls | grep | ls | head | ls | head");
  assert_eq!((&(&(&p | &q) | &p) | &q).to_string(), "ls | grep | ls | head | ls | grep | ls | head");
  assert_eq!(p.to_string(), "ls | grep");
  assert_eq!(q.to_string(), "ls | head");
}

#[test]
fn test_concatenation_carries_endpoints() {
  setup_tracing();
  let file = tempfile::tempfile().unwrap();
  let fd = file.as_raw_fd().to_string();
  let p = ls().stdin(Endpoint::Discard).unwrap();
  let q = Pipeline::new("head").stdout(Endpoint::from(file)).unwrap();
  assert_eq!(p.attach(&q).unwrap().to_string(), format!("<discard> | ls | head | {fd}"));
  assert_eq!((&(&p | &p) | &q).to_string(), format!("<discard> | ls | ls | head | {fd}"));
  assert_eq!((&(&p | &q) | &q).to_string(), format!("<discard> | ls | head | head | {fd}"));
  assert_eq!(
    (&(&(&p | &q) | &p) | &q).to_string(),
    format!("<discard> | ls | head | ls | head | {fd}")
  );
  assert_eq!(p.to_string(), "<discard> | ls");
  assert_eq!(q.to_string(), format!("head | {fd}"));
}

#[test]
fn test_concatenation_is_associative() {
  setup_tracing();
  let p = ls().arg("-l").unwrap();
  let q = !Pipeline::new("grep").arg("x").unwrap();
  let r = -Pipeline::new("wc").arg("-l").unwrap();
  let left = (&p | &q) | r.clone();
  let right = p.clone() | (&q | &r);
  assert_eq!(left.to_string(), right.to_string());
  assert_eq!(left.to_string(), "ls -l | ~grep x | -wc -l");
}

#[test]
fn test_flags_apply_to_current_segment() {
  setup_tracing();
  let p = !(ls() | Pipeline::new("grep"));
  assert_eq!(p.to_string(), "ls | ~grep");
  let p = -(p.arg("-v").unwrap());
  assert_eq!(p.to_string(), "ls | ~-grep -v");
}

#[test]
fn test_attach_accepts_operand_directly() {
  setup_tracing();
  let p = ls().attach(Operand::Pipeline(Pipeline::new("sort"))).unwrap();
  assert_eq!(p.to_string(), "ls | sort");
  let p = p.attach(Operand::Endpoint(Endpoint::CaptureText)).unwrap();
  assert_eq!(p.to_string(), "ls | sort | <text>");
}

#[test]
fn test_wrong_side_endpoints_are_invalid_operands() {
  setup_tracing();
  let err = ls().attach(Endpoint::from("literal")).unwrap_err();
  assert!(matches!(err, ProcPipeError::InvalidOperand { .. }));
  let err = ls().stdout(b"bytes").unwrap_err();
  assert!(matches!(err, ProcPipeError::InvalidOperand { .. }));
  let err = ls().attach_reversed(Endpoint::CaptureBytes).unwrap_err();
  assert!(matches!(err, ProcPipeError::InvalidOperand { .. }));
  let err = ls().arg("'unterminated").unwrap_err();
  assert!(matches!(err, ProcPipeError::InvalidOperand { .. }));
}

#[test]
fn test_later_output_endpoint_wins() {
  setup_tracing();
  let p = capture_text(&ls()).unwrap().stdout(Endpoint::Discard).unwrap();
  assert_eq!(p.to_string(), "ls | <discard>");
  let p = capture_text(&ls()).unwrap() | Pipeline::new("head");
  assert_eq!(p.to_string(), "ls | head | <text>");
}
