use std::cell::RefCell;

use crate::*;

#[derive(Clone, Debug, PartialEq)]
pub enum GPUCommand {
  CreateProgram(ProgramObject),
  DestroyProgram(ProgramObject),
  UseProgram(ProgramObject),
  Uniform(String, UniformValue),
  BindAttribute(String, BufferObject, VertexAttributeDataType),
  BindIndex(BufferObject),
  DrawElements(PrimitiveTopology, u32, IndexFormat),
  DrawArrays(PrimitiveTopology, u32, u32),
}

#[derive(Default)]
struct RecordingDeviceInner {
  commands: Vec<GPUCommand>,
  next_object: u32,
  uniform_names: Vec<String>,
  attribute_names: Vec<String>,
  /// every program alive on the device with the source it was built from
  programs: Vec<(ProgramObject, OutlineShaderSource)>,
}

/// Pretends to be a gl context and records every command it receives.
///
/// Sources containing `#error` fail to compile. Only names the source declares get a location,
/// minus the ones listed in `optimized_out`.
#[derive(Default)]
pub struct RecordingDevice {
  inner: RefCell<RecordingDeviceInner>,
  pub optimized_out: Vec<String>,
}

impl RecordingDevice {
  pub fn with_optimized_out(names: &[&str]) -> Self {
    Self {
      optimized_out: names.iter().map(|n| n.to_string()).collect(),
      ..Default::default()
    }
  }

  pub fn commands(&self) -> Vec<GPUCommand> {
    self.inner.borrow().commands.clone()
  }

  pub fn take_commands(&self) -> Vec<GPUCommand> {
    std::mem::take(&mut self.inner.borrow_mut().commands)
  }

  pub fn live_programs(&self) -> usize {
    self.inner.borrow().programs.len()
  }

  pub fn count(&self, f: impl Fn(&GPUCommand) -> bool) -> usize {
    self.inner.borrow().commands.iter().filter(|c| f(c)).count()
  }

  pub fn uniform_uploads(&self, name: &str) -> usize {
    self.count(|c| matches!(c, GPUCommand::Uniform(n, _) if n == name))
  }

  fn has_location(
    &self,
    program: ProgramObject,
    name: &str,
    declares: fn(&OutlineShaderSource, &str) -> bool,
  ) -> bool {
    if self.optimized_out.iter().any(|n| n == name) {
      return false;
    }
    let inner = self.inner.borrow();
    inner
      .programs
      .iter()
      .any(|(p, source)| *p == program && declares(source, name))
  }

  fn alloc_object(&self) -> u32 {
    let mut inner = self.inner.borrow_mut();
    inner.next_object += 1;
    inner.next_object
  }
}

impl GLESOutlineDevice for RecordingDevice {
  fn create_program(&self, source: &OutlineShaderSource) -> Result<ProgramObject, Vec<String>> {
    if source.vertex.contains("#error") {
      return Err(vec!["ERROR: 0:1: '#error' : compilation terminated".to_string()]);
    }
    let program = ProgramObject(self.alloc_object());
    let mut inner = self.inner.borrow_mut();
    inner.programs.push((program, source.clone()));
    inner.commands.push(GPUCommand::CreateProgram(program));
    Ok(program)
  }

  fn destroy_program(&self, program: ProgramObject) {
    let mut inner = self.inner.borrow_mut();
    inner.programs.retain(|(p, _)| *p != program);
    inner.commands.push(GPUCommand::DestroyProgram(program));
  }

  fn uniform_location(&self, program: ProgramObject, name: &str) -> Option<UniformLocation> {
    if !self.has_location(program, name, OutlineShaderSource::declares_uniform) {
      return None;
    }
    let mut inner = self.inner.borrow_mut();
    inner.uniform_names.push(name.to_string());
    Some(UniformLocation(inner.uniform_names.len() as u32 - 1))
  }

  fn attribute_location(&self, program: ProgramObject, name: &str) -> Option<AttributeLocation> {
    if !self.has_location(program, name, OutlineShaderSource::declares_attribute) {
      return None;
    }
    let mut inner = self.inner.borrow_mut();
    inner.attribute_names.push(name.to_string());
    Some(AttributeLocation(inner.attribute_names.len() as u32 - 1))
  }

  fn use_program(&self, program: ProgramObject) {
    let mut inner = self.inner.borrow_mut();
    inner.commands.push(GPUCommand::UseProgram(program));
  }

  fn upload_uniform(&self, location: UniformLocation, value: UniformValue) {
    let mut inner = self.inner.borrow_mut();
    let name = inner.uniform_names[location.0 as usize].clone();
    inner.commands.push(GPUCommand::Uniform(name, value));
  }

  fn bind_vertex_attribute(
    &self,
    location: AttributeLocation,
    buffer: BufferObject,
    data_type: VertexAttributeDataType,
  ) {
    let mut inner = self.inner.borrow_mut();
    let name = inner.attribute_names[location.0 as usize].clone();
    inner
      .commands
      .push(GPUCommand::BindAttribute(name, buffer, data_type));
  }

  fn bind_index_buffer(&self, buffer: BufferObject) {
    let mut inner = self.inner.borrow_mut();
    inner.commands.push(GPUCommand::BindIndex(buffer));
  }

  fn draw_elements(&self, topology: PrimitiveTopology, count: u32, format: IndexFormat) {
    let mut inner = self.inner.borrow_mut();
    inner
      .commands
      .push(GPUCommand::DrawElements(topology, count, format));
  }

  fn draw_arrays(&self, topology: PrimitiveTopology, first: u32, count: u32) {
    let mut inner = self.inner.borrow_mut();
    inner
      .commands
      .push(GPUCommand::DrawArrays(topology, first, count));
  }
}

/// Declares what a real outline generator would for the mesh's features. A mesh hash containing
/// `broken` produces source that fails to compile.
pub fn test_source_provider(
  mesh: &OutlineMeshRef,
  naming: &OutlineShaderNaming,
) -> OutlineShaderSource {
  let mut uniforms = vec![
    naming.positions_decode_matrix.clone(),
    naming.model_matrix.clone(),
    naming.view_matrix.clone(),
    naming.projection_matrix.clone(),
    naming.color.clone(),
    naming.width.clone(),
    naming.clippable.clone(),
  ];
  for i in 0..mesh.scene.clips.len() {
    uniforms.push(naming.clip_active(i));
    uniforms.push(naming.clip_position(i));
    uniforms.push(naming.clip_direction(i));
  }
  if mesh.scene.gamma_output {
    uniforms.push(naming.gamma_factor.clone());
  }
  if mesh.geometry.uv_decode_matrix.is_some() {
    uniforms.push(naming.uv_decode_matrix.clone());
  }

  let vertex = if mesh.mesh.hash.contains("broken") {
    "#error broken outline shader".to_string()
  } else {
    "void main() {}".to_string()
  };

  OutlineShaderSource {
    vertex,
    fragment: "void main() {}".to_string(),
    uniforms,
    attributes: vec![
      naming.position_attribute.clone(),
      naming.normal_attribute.clone(),
    ],
  }
}

/// The device stays accessible to the test through the returned Arc.
pub fn test_context(device: RecordingDevice) -> (Arc<RecordingDevice>, OutlineRenderContext) {
  let device = Arc::new(device);
  let context = OutlineRenderContext::new(device.clone(), test_source_provider);
  (device, context)
}

pub fn test_scene(clip_count: usize) -> OutlineSceneState {
  let planes = (0..clip_count)
    .map(|i| ClipPlane {
      active: i % 2 == 0,
      position: [i as f32, 0., 0.],
      direction: [0., 0., -1.],
    })
    .collect();
  OutlineSceneState {
    canvas_id: "canvas-0".to_string(),
    gamma_output: false,
    gamma_factor: 2.2,
    clips: ClipPlanesState { planes },
    view_matrix: MAT4_IDENTITY,
    projection_matrix: MAT4_IDENTITY,
  }
}

pub fn test_material(id: u64) -> OutlineMaterial {
  OutlineMaterial {
    id: MaterialIdentity::new(id),
    width: 4.,
    color: [1., 0.5, 0.],
    alpha: 0.8,
  }
}

pub fn test_mesh(id: u64) -> MeshState {
  MeshState {
    id: MeshIdentity::new(id),
    hash: "mesh-default".to_string(),
    world_matrix: MAT4_IDENTITY,
    world_normal_matrix: MAT4_IDENTITY,
    clippable: true,
  }
}

pub fn separate_geometry(
  id: u64,
  indices: Option<u32>,
  vertex_count: Option<u32>,
) -> GeometryState {
  GeometryState {
    id: GeometryIdentity::new(id),
    hash: "geometry-separate".to_string(),
    primitive: PrimitiveTopology::TriangleList,
    quantized: false,
    positions_decode_matrix: MAT4_IDENTITY,
    uv_decode_matrix: None,
    storage: GeometryStorage::Separate {
      positions: vertex_count.map(|_| BufferObject(100 + id as u32)),
      normals: vertex_count.map(|_| BufferObject(200 + id as u32)),
      indices: indices.map(|count| IndexBufferView {
        buffer: BufferObject(300 + id as u32),
        count,
        format: IndexFormat::U16,
      }),
      vertex_count,
    },
  }
}

pub fn combined_geometry(id: u64, buffer_set: u64, indices: Option<u32>) -> GeometryState {
  GeometryState {
    id: GeometryIdentity::new(id),
    hash: "geometry-combined".to_string(),
    primitive: PrimitiveTopology::TriangleList,
    quantized: true,
    positions_decode_matrix: MAT4_IDENTITY,
    uv_decode_matrix: None,
    storage: GeometryStorage::Combined {
      vertex_buffers: VertexBufferSet {
        id: VertexBufferSetIdentity::new(buffer_set),
        positions: Some(BufferObject(10 + buffer_set as u32)),
        normals: Some(BufferObject(20 + buffer_set as u32)),
        quantized: true,
      },
      indices: indices.map(|count| IndexBufferView {
        buffer: BufferObject(300 + id as u32),
        count,
        format: IndexFormat::U32,
      }),
    },
  }
}
