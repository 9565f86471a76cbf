use std::fmt;

use crate::*;

/// Key of the program cache. Two meshes with equal hashes are drawn by the same program.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OutlineProgramHash {
  canvas: String,
  gamma_output: bool,
  clips: String,
  geometry: String,
  mesh: String,
}

impl OutlineProgramHash {
  pub fn compute(mesh: &OutlineMeshRef) -> Self {
    let scene = mesh.scene;
    Self {
      canvas: scene.canvas_id.clone(),
      // gamma input does not change the outline program
      gamma_output: scene.gamma_output,
      clips: scene.clips.hash_signature(),
      geometry: mesh.geometry.hash.clone(),
      mesh: mesh.mesh.hash.clone(),
    }
  }
}

impl fmt::Display for OutlineProgramHash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let gamma = if self.gamma_output { "go" } else { "" };
    write!(
      f,
      "{};{};{};{};{}",
      self.canvas, gamma, self.clips, self.geometry, self.mesh
    )
  }
}
