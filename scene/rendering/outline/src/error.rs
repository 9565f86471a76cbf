use crate::*;

/// Compile or link failure of an outline program, holding every message the device reported.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("outline program failed to build: {}", .messages.join("; "))]
pub struct ProgramBuildError {
  pub messages: Vec<String>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OutlineDrawError {
  #[error("outline program {0:?} failed to build and can not be drawn")]
  ProgramNotLinked(OutlineProgramId),
}
