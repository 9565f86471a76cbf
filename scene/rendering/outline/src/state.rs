use crate::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipPlane {
  pub active: bool,
  pub position: [f32; 3],
  pub direction: [f32; 3],
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClipPlanesState {
  pub planes: Vec<ClipPlane>,
}

impl ClipPlanesState {
  /// Contribution to the program hash. Only the plane count shapes the program, so that is all
  /// the signature encodes, and any count change yields a different signature.
  pub fn hash_signature(&self) -> String {
    let mut signature = "cp".repeat(self.planes.len());
    signature.push(';');
    signature
  }

  pub fn len(&self) -> usize {
    self.planes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.planes.is_empty()
  }
}

/// Scene wide state read by the outline pass.
#[derive(Clone, Debug, PartialEq)]
pub struct OutlineSceneState {
  /// identity of the canvas (gl context) the scene renders into
  pub canvas_id: String,
  pub gamma_output: bool,
  pub gamma_factor: f32,
  pub clips: ClipPlanesState,
  pub view_matrix: Mat4f,
  pub projection_matrix: Mat4f,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OutlineMaterial {
  pub id: MaterialIdentity,
  pub width: f32,
  pub color: [f32; 3],
  pub alpha: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexBufferView {
  pub buffer: BufferObject,
  pub count: u32,
  pub format: IndexFormat,
}

/// Shared vertex buffers many combined geometries pack their data into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexBufferSet {
  pub id: VertexBufferSetIdentity,
  pub positions: Option<BufferObject>,
  pub normals: Option<BufferObject>,
  pub quantized: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GeometryStorage {
  /// vertex data lives in a shared [`VertexBufferSet`], the geometry owns an index range into it
  Combined {
    vertex_buffers: VertexBufferSet,
    indices: Option<IndexBufferView>,
  },
  Separate {
    positions: Option<BufferObject>,
    normals: Option<BufferObject>,
    indices: Option<IndexBufferView>,
    /// vertex count of the raw position data, if the geometry has any
    vertex_count: Option<u32>,
  },
}

#[derive(Clone, Debug, PartialEq)]
pub struct GeometryState {
  pub id: GeometryIdentity,
  /// feature hash of the geometry, part of the program hash
  pub hash: String,
  pub primitive: PrimitiveTopology,
  pub quantized: bool,
  pub positions_decode_matrix: Mat4f,
  pub uv_decode_matrix: Option<Mat3f>,
  pub storage: GeometryStorage,
}

impl GeometryState {
  pub fn is_combined(&self) -> bool {
    matches!(self.storage, GeometryStorage::Combined { .. })
  }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MeshState {
  pub id: MeshIdentity,
  /// feature hash of the mesh and its material, part of the program hash
  pub hash: String,
  pub world_matrix: Mat4f,
  pub world_normal_matrix: Mat4f,
  pub clippable: bool,
}

/// Everything the outline pass reads to hash, build and draw one mesh.
#[derive(Clone, Copy)]
pub struct OutlineMeshRef<'a> {
  pub scene: &'a OutlineSceneState,
  pub mesh: &'a MeshState,
  pub geometry: &'a GeometryState,
  pub material: &'a OutlineMaterial,
}

pub const MAT4_IDENTITY: Mat4f = [
  1., 0., 0., 0., //
  0., 1., 0., 0., //
  0., 0., 1., 0., //
  0., 0., 0., 1., //
];

pub const MAT3_IDENTITY: Mat3f = [
  1., 0., 0., //
  0., 1., 0., //
  0., 0., 1., //
];
