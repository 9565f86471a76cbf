use crate::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProgramObject(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AttributeLocation(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BufferObject(pub u32);

pub type Mat3f = [f32; 9];
pub type Mat4f = [f32; 16];

/// Values the outline pass uploads. Matrices are column major.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum UniformValue {
  Mat3(Mat3f),
  Mat4(Mat4f),
  Float(f32),
  Vec3([f32; 3]),
  Vec4([f32; 4]),
  Bool(bool),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum VertexAttributeDataType {
  F32,
  U16,
  I16,
  I8,
  U8,
}

impl VertexAttributeDataType {
  pub fn for_position(quantized: bool) -> Self {
    if quantized {
      Self::U16
    } else {
      Self::F32
    }
  }

  pub fn for_normal(quantized: bool) -> Self {
    if quantized {
      Self::I8
    } else {
      Self::F32
    }
  }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IndexFormat {
  U8,
  U16,
  U32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum PrimitiveTopology {
  PointList,
  LineList,
  LineStrip,
  #[default]
  TriangleList,
  TriangleStrip,
}

/// The slice of a gles context the outline pass talks to.
///
/// Methods take `&self` like the underlying context does. Implementations own their interior
/// state (a gl context is already a shared handle).
pub trait GLESOutlineDevice {
  /// Compile and link. The error side carries every compiler or linker message.
  fn create_program(&self, source: &OutlineShaderSource) -> Result<ProgramObject, Vec<String>>;
  fn destroy_program(&self, program: ProgramObject);

  fn uniform_location(&self, program: ProgramObject, name: &str) -> Option<UniformLocation>;
  fn attribute_location(&self, program: ProgramObject, name: &str) -> Option<AttributeLocation>;

  fn use_program(&self, program: ProgramObject);
  fn upload_uniform(&self, location: UniformLocation, value: UniformValue);

  /// Bind `buffer` as the tightly packed source of `location` and enable the attribute.
  fn bind_vertex_attribute(
    &self,
    location: AttributeLocation,
    buffer: BufferObject,
    data_type: VertexAttributeDataType,
  );
  fn bind_index_buffer(&self, buffer: BufferObject);

  fn draw_elements(&self, topology: PrimitiveTopology, count: u32, format: IndexFormat);
  fn draw_arrays(&self, topology: PrimitiveTopology, first: u32, count: u32);
}
