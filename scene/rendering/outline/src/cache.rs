use std::ops::Deref;

use crate::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OutlineStatistics {
  /// live programs, failed builds included
  pub programs: usize,
}

struct OutlineProgramCacheEntry {
  program: Arc<OutlineProgram>,
  use_count: usize,
}

struct OutlineProgramCache {
  device: Arc<dyn GLESOutlineDevice>,
  source: Box<dyn OutlineShaderSourceProvider>,
  naming: OutlineShaderNaming,
  ids: IdReusePool,
  programs: FastHashMap<OutlineProgramHash, OutlineProgramCacheEntry>,
  statistics: OutlineStatistics,
}

impl OutlineProgramCache {
  fn acquire(&mut self, mesh: &OutlineMeshRef) -> Arc<OutlineProgram> {
    let hash = OutlineProgramHash::compute(mesh);
    if let Some(entry) = self.programs.get_mut(&hash) {
      entry.use_count += 1;
      return entry.program.clone();
    }

    let id = OutlineProgramId(self.ids.alloc());
    let program = OutlineProgram::build(
      id,
      hash.clone(),
      mesh,
      self.device.clone(),
      &*self.source,
      &self.naming,
    );
    if let Some(err) = program.build_error() {
      log::warn!("outline program {id:?} for `{hash}`: {err}");
    } else {
      log::debug!("outline program {id:?} created for `{hash}`");
    }

    let program = Arc::new(program);
    self.programs.insert(
      hash,
      OutlineProgramCacheEntry {
        program: program.clone(),
        use_count: 1,
      },
    );
    self.statistics.programs += 1;
    program
  }

  fn retain(&mut self, hash: &OutlineProgramHash) {
    if let Some(entry) = self.programs.get_mut(hash) {
      entry.use_count += 1;
    }
  }

  fn release(&mut self, hash: &OutlineProgramHash) {
    let Some(entry) = self.programs.get_mut(hash) else {
      return;
    };
    entry.use_count -= 1;
    if entry.use_count > 0 {
      return;
    }

    if let Some(entry) = self.programs.remove(hash) {
      let program = entry.program;
      self.ids.release(program.id().0);
      program.destroy();
      self.statistics.programs -= 1;
      log::debug!("outline program {:?} destroyed", program.id());
    }
  }
}

/// Owns everything the outline pass keeps across frames: the program cache, the program id pool
/// and the statistics. Cheap to clone, clones share the same cache.
#[derive(Clone)]
pub struct OutlineRenderContext {
  internal: Arc<RwLock<OutlineProgramCache>>,
}

impl OutlineRenderContext {
  pub fn new(
    device: Arc<dyn GLESOutlineDevice>,
    source: impl OutlineShaderSourceProvider + 'static,
  ) -> Self {
    Self {
      internal: Arc::new(RwLock::new(OutlineProgramCache {
        device,
        source: Box::new(source),
        naming: Default::default(),
        ids: Default::default(),
        programs: Default::default(),
        statistics: Default::default(),
      })),
    }
  }

  /// Programs already built keep the names they were resolved with.
  pub fn with_naming(self, naming: OutlineShaderNaming) -> Self {
    self.internal.write().naming = naming;
    self
  }

  /// Get the program for the mesh's feature hash, building it on first use.
  ///
  /// A failed build is cached like a good one, check [`OutlineProgram::errors`] before drawing.
  pub fn acquire(&self, mesh: &OutlineMeshRef) -> OutlineProgramHandle {
    let program = self.internal.write().acquire(mesh);
    OutlineProgramHandle {
      context: self.clone(),
      program,
    }
  }

  pub fn statistics(&self) -> OutlineStatistics {
    self.internal.read().statistics
  }

  pub fn live_program_count(&self) -> usize {
    self.internal.read().programs.len()
  }

  pub fn use_count(&self, hash: &OutlineProgramHash) -> usize {
    self
      .internal
      .read()
      .programs
      .get(hash)
      .map(|e| e.use_count)
      .unwrap_or(0)
  }
}

/// One user's share of a cached program. Dropping it releases the share, the last release
/// destroys the gpu program.
pub struct OutlineProgramHandle {
  context: OutlineRenderContext,
  program: Arc<OutlineProgram>,
}

impl OutlineProgramHandle {
  pub fn program(&self) -> &Arc<OutlineProgram> {
    &self.program
  }

  /// Same as dropping the handle.
  pub fn put(self) {}
}

impl Deref for OutlineProgramHandle {
  type Target = OutlineProgram;

  fn deref(&self) -> &Self::Target {
    &self.program
  }
}

impl Clone for OutlineProgramHandle {
  fn clone(&self) -> Self {
    self.context.internal.write().retain(self.program.hash());
    Self {
      context: self.context.clone(),
      program: self.program.clone(),
    }
  }
}

impl Drop for OutlineProgramHandle {
  fn drop(&mut self) {
    self.context.internal.write().release(self.program.hash());
  }
}

impl std::fmt::Debug for OutlineProgramHandle {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_tuple("OutlineProgramHandle")
      .field(&self.program)
      .finish()
  }
}
