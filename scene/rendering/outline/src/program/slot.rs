use crate::*;

/// Resolution of one named uniform or attribute, decided once when the program is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaderSlot<L> {
  Active(L),
  /// declared by the generated source, but the linked program has no location for it
  Inactive,
  /// the generated source never declared it
  Absent,
}

pub type UniformSlot = ShaderSlot<UniformLocation>;
pub type AttributeSlot = ShaderSlot<AttributeLocation>;

impl<L: Copy> ShaderSlot<L> {
  pub fn location(&self) -> Option<L> {
    match self {
      Self::Active(location) => Some(*location),
      _ => None,
    }
  }

  pub fn is_active(&self) -> bool {
    matches!(self, Self::Active(_))
  }

  fn resolve(declared: bool, location: Option<L>) -> Self {
    match (location, declared) {
      (Some(location), _) => Self::Active(location),
      (None, true) => Self::Inactive,
      (None, false) => Self::Absent,
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClipPlaneSlots {
  pub active: UniformSlot,
  pub position: UniformSlot,
  pub direction: UniformSlot,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutlineProgramSlots {
  pub positions_decode_matrix: UniformSlot,
  pub uv_decode_matrix: UniformSlot,
  pub model_matrix: UniformSlot,
  pub model_normal_matrix: UniformSlot,
  pub view_matrix: UniformSlot,
  pub projection_matrix: UniformSlot,
  pub color: UniformSlot,
  pub width: UniformSlot,
  pub clippable: UniformSlot,
  pub gamma_factor: UniformSlot,
  /// one entry per clip plane configured when the program was built
  pub clips: Vec<ClipPlaneSlots>,
  pub position: AttributeSlot,
  pub normal: AttributeSlot,
}

pub(crate) struct SlotResolver<'a> {
  pub device: &'a dyn GLESOutlineDevice,
  pub program: ProgramObject,
  pub source: &'a OutlineShaderSource,
}

impl SlotResolver<'_> {
  pub fn uniform(&self, name: &str) -> UniformSlot {
    let location = self.device.uniform_location(self.program, name);
    ShaderSlot::resolve(self.source.declares_uniform(name), location)
  }

  pub fn attribute(&self, name: &str) -> AttributeSlot {
    let location = self.device.attribute_location(self.program, name);
    ShaderSlot::resolve(self.source.declares_attribute(name), location)
  }

  pub fn resolve_all(
    &self,
    naming: &OutlineShaderNaming,
    clip_count: usize,
  ) -> OutlineProgramSlots {
    let clips = (0..clip_count)
      .map(|i| ClipPlaneSlots {
        active: self.uniform(&naming.clip_active(i)),
        position: self.uniform(&naming.clip_position(i)),
        direction: self.uniform(&naming.clip_direction(i)),
      })
      .collect();

    OutlineProgramSlots {
      positions_decode_matrix: self.uniform(&naming.positions_decode_matrix),
      uv_decode_matrix: self.uniform(&naming.uv_decode_matrix),
      model_matrix: self.uniform(&naming.model_matrix),
      model_normal_matrix: self.uniform(&naming.model_normal_matrix),
      view_matrix: self.uniform(&naming.view_matrix),
      projection_matrix: self.uniform(&naming.projection_matrix),
      color: self.uniform(&naming.color),
      width: self.uniform(&naming.width),
      clippable: self.uniform(&naming.clippable),
      gamma_factor: self.uniform(&naming.gamma_factor),
      clips,
      position: self.attribute(&naming.position_attribute),
      normal: self.attribute(&naming.normal_attribute),
    }
  }
}
