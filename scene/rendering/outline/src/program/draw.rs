use crate::*;

/// What the program has been drawn with since it was last bound in the current frame.
///
/// Reset to all `None` whenever the program is bound, so the first mesh after a bind refreshes
/// every per mesh uniform and buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OutlineDrawState {
  pub last_material: Option<MaterialIdentity>,
  pub last_vertex_buffers: Option<VertexBufferSetIdentity>,
  pub last_geometry: Option<GeometryIdentity>,
}

impl OutlineProgram {
  /// Draw one mesh, binding the program first if another one was bound last in this frame.
  ///
  /// Only uniforms and buffers that differ from the previous mesh drawn with this program are
  /// sent, except the model matrix which changes for every mesh.
  pub fn draw_mesh(
    &self,
    frame: &mut OutlineFrameCtx,
    mesh: &OutlineMeshRef,
  ) -> Result<(), OutlineDrawError> {
    let linked = self
      .linked
      .as_ref()
      .map_err(|_| OutlineDrawError::ProgramNotLinked(self.id))?;
    let slots = &linked.slots;
    let gl = &*self.device;
    let mut state = self.draw_state.lock();

    if frame.last_program != Some(self.bind_key) {
      frame.last_program = Some(self.bind_key);
      *state = OutlineDrawState::default();
      self.bind_program(linked, frame, mesh.scene);
    }

    let material = mesh.material;
    if state.last_material != Some(material.id) {
      upload(gl, slots.width, || UniformValue::Float(material.width));
      upload(gl, slots.color, || {
        let [r, g, b] = material.color;
        UniformValue::Vec4([r, g, b, material.alpha])
      });
      state.last_material = Some(material.id);
    }

    upload(gl, slots.model_matrix, || UniformValue::Mat4(mesh.mesh.world_matrix));
    upload(gl, slots.model_normal_matrix, || {
      UniformValue::Mat4(mesh.mesh.world_normal_matrix)
    });
    upload(gl, slots.clippable, || UniformValue::Bool(mesh.mesh.clippable));

    let geometry = mesh.geometry;
    if let GeometryStorage::Combined { vertex_buffers, .. } = &geometry.storage {
      if state.last_vertex_buffers != Some(vertex_buffers.id) {
        let quantized = vertex_buffers.quantized;
        bind_attribute(
          gl,
          frame,
          slots.position,
          vertex_buffers.positions,
          VertexAttributeDataType::for_position(quantized),
        );
        bind_attribute(
          gl,
          frame,
          slots.normal,
          vertex_buffers.normals,
          VertexAttributeDataType::for_normal(quantized),
        );
        state.last_vertex_buffers = Some(vertex_buffers.id);
      }
    }

    if state.last_geometry != Some(geometry.id) {
      upload(gl, slots.positions_decode_matrix, || {
        UniformValue::Mat4(geometry.positions_decode_matrix)
      });
      if let Some(uv_decode) = geometry.uv_decode_matrix {
        upload(gl, slots.uv_decode_matrix, || UniformValue::Mat3(uv_decode));
      }
      match &geometry.storage {
        // vertex buffers were bound by the shared buffer set above
        GeometryStorage::Combined { indices, .. } => {
          if let Some(indices) = indices {
            gl.bind_index_buffer(indices.buffer);
            frame.array_binds += 1;
          }
        }
        GeometryStorage::Separate {
          positions,
          normals,
          indices,
          ..
        } => {
          let quantized = geometry.quantized;
          bind_attribute(
            gl,
            frame,
            slots.position,
            *positions,
            VertexAttributeDataType::for_position(quantized),
          );
          bind_attribute(
            gl,
            frame,
            slots.normal,
            *normals,
            VertexAttributeDataType::for_normal(quantized),
          );
          if let Some(indices) = indices {
            gl.bind_index_buffer(indices.buffer);
            frame.array_binds += 1;
          }
        }
      }
      state.last_geometry = Some(geometry.id);
    }

    match &geometry.storage {
      GeometryStorage::Combined {
        indices: Some(indices),
        ..
      }
      | GeometryStorage::Separate {
        indices: Some(indices),
        ..
      } => {
        gl.draw_elements(geometry.primitive, indices.count, indices.format);
        frame.draw_elements += 1;
      }
      GeometryStorage::Separate {
        vertex_count: Some(count),
        ..
      } => {
        gl.draw_arrays(PrimitiveTopology::TriangleList, 0, *count);
        frame.draw_arrays += 1;
      }
      _ => log::trace!("outline program {:?} skipped geometry without draw data", self.id),
    }

    Ok(())
  }

  /// Bind the program and upload the uniforms that stay the same for the whole frame.
  fn bind_program(
    &self,
    linked: &LinkedOutlineProgram,
    frame: &mut OutlineFrameCtx,
    scene: &OutlineSceneState,
  ) {
    let gl = &*self.device;
    let slots = &linked.slots;

    gl.use_program(linked.program);
    frame.program_binds += 1;

    upload(gl, slots.view_matrix, || UniformValue::Mat4(scene.view_matrix));
    upload(gl, slots.projection_matrix, || {
      UniformValue::Mat4(scene.projection_matrix)
    });

    // planes configured after this program was built have no slots and are left alone
    for (clip_slots, clip) in slots.clips.iter().zip(&scene.clips.planes) {
      upload(gl, clip_slots.active, || UniformValue::Bool(clip.active));
      upload(gl, clip_slots.position, || UniformValue::Vec3(clip.position));
      upload(gl, clip_slots.direction, || UniformValue::Vec3(clip.direction));
    }

    upload(gl, slots.gamma_factor, || UniformValue::Float(scene.gamma_factor));
  }
}

fn upload(gl: &dyn GLESOutlineDevice, slot: UniformSlot, value: impl FnOnce() -> UniformValue) {
  if let Some(location) = slot.location() {
    gl.upload_uniform(location, value());
  }
}

fn bind_attribute(
  gl: &dyn GLESOutlineDevice,
  frame: &mut OutlineFrameCtx,
  slot: AttributeSlot,
  buffer: Option<BufferObject>,
  data_type: VertexAttributeDataType,
) {
  if let (Some(location), Some(buffer)) = (slot.location(), buffer) {
    gl.bind_vertex_attribute(location, buffer, data_type);
    frame.array_binds += 1;
  }
}
