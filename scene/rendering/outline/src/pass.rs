use crate::*;

/// Program handles of the meshes an outline pass currently draws, keyed by mesh.
///
/// A mesh holds its handle from [`prepare`](Self::prepare) until [`remove`](Self::remove) (or until
/// this container drops), which is the acquire / release pairing the program cache relies on.
pub struct OutlineMeshPrograms {
  context: OutlineRenderContext,
  programs: FastHashMap<MeshIdentity, OutlineProgramHandle>,
}

impl OutlineMeshPrograms {
  pub fn new(context: OutlineRenderContext) -> Self {
    Self {
      context,
      programs: Default::default(),
    }
  }

  pub fn context(&self) -> &OutlineRenderContext {
    &self.context
  }

  /// Make sure the mesh holds the program of its current feature hash. A mesh whose hash changed
  /// (new clip plane count, different geometry features...) switches program and releases the
  /// old one.
  pub fn prepare(&mut self, mesh: &OutlineMeshRef) -> &OutlineProgramHandle {
    use hashbrown::hash_map::Entry;

    let hash = OutlineProgramHash::compute(mesh);
    match self.programs.entry(mesh.mesh.id) {
      Entry::Occupied(mut entry) => {
        if entry.get().hash() != &hash {
          // the previous handle drops after the new one is acquired
          entry.insert(self.context.acquire(mesh));
        }
        entry.into_mut()
      }
      Entry::Vacant(entry) => entry.insert(self.context.acquire(mesh)),
    }
  }

  pub fn get(&self, id: MeshIdentity) -> Option<&OutlineProgramHandle> {
    self.programs.get(&id)
  }

  /// Release the mesh's program. Returns false if the mesh held none.
  pub fn remove(&mut self, id: MeshIdentity) -> bool {
    self.programs.remove(&id).is_some()
  }

  /// Prepare and draw the mesh. Meshes whose program failed to build are skipped, the failure
  /// has been reported when the program was built. Returns whether the mesh was drawn.
  pub fn draw(
    &mut self,
    frame: &mut OutlineFrameCtx,
    mesh: &OutlineMeshRef,
  ) -> Result<bool, OutlineDrawError> {
    let program = self.prepare(mesh);
    if !program.errors().is_empty() {
      return Ok(false);
    }
    program.draw_mesh(frame, mesh)?;
    Ok(true)
  }

  pub fn len(&self) -> usize {
    self.programs.len()
  }

  pub fn is_empty(&self) -> bool {
    self.programs.is_empty()
  }

  pub fn clear(&mut self) {
    self.programs.clear();
  }
}
