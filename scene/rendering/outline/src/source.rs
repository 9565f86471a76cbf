use crate::*;

/// Generated program source, plus the names the source declares.
///
/// The declared names let the pass tell an uniform the compiler optimized away apart from one the
/// generator never emitted for this feature set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OutlineShaderSource {
  pub vertex: String,
  pub fragment: String,
  pub uniforms: Vec<String>,
  pub attributes: Vec<String>,
}

impl OutlineShaderSource {
  pub fn declares_uniform(&self, name: &str) -> bool {
    self.uniforms.iter().any(|u| u == name)
  }

  pub fn declares_attribute(&self, name: &str) -> bool {
    self.attributes.iter().any(|a| a == name)
  }
}

pub trait OutlineShaderSourceProvider {
  fn generate(
    &self,
    mesh: &OutlineMeshRef<'_>,
    naming: &OutlineShaderNaming,
  ) -> OutlineShaderSource;
}

impl<F> OutlineShaderSourceProvider for F
where
  F: Fn(&OutlineMeshRef<'_>, &OutlineShaderNaming) -> OutlineShaderSource,
{
  fn generate(
    &self,
    mesh: &OutlineMeshRef<'_>,
    naming: &OutlineShaderNaming,
  ) -> OutlineShaderSource {
    self(mesh, naming)
  }
}
