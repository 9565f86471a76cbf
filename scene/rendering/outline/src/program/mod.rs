use std::sync::atomic::{AtomicU64, Ordering};

use crate::*;

mod draw;
pub use draw::*;
mod slot;
pub use slot::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OutlineProgramId(pub u32);

static GLOBAL_BIND_KEY: AtomicU64 = AtomicU64::new(0);

/// Identifies a program for the frame binding record. Unlike [`OutlineProgramId`] it is never
/// reused, not after the program is destroyed and not across render contexts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OutlineProgramBindKey(u64);

impl OutlineProgramBindKey {
  fn next() -> Self {
    Self(GLOBAL_BIND_KEY.fetch_add(1, Ordering::Relaxed))
  }
}

pub(crate) struct LinkedOutlineProgram {
  pub program: ProgramObject,
  pub slots: OutlineProgramSlots,
}

/// A compiled outline program with its resolved slots, shared by every mesh with the same hash.
///
/// A program whose build failed stays inert: it keeps its id and hash so the cache does not try to
/// compile the same broken source again, but it never binds or draws.
pub struct OutlineProgram {
  id: OutlineProgramId,
  bind_key: OutlineProgramBindKey,
  hash: OutlineProgramHash,
  device: Arc<dyn GLESOutlineDevice>,
  linked: Result<LinkedOutlineProgram, ProgramBuildError>,
  draw_state: Mutex<OutlineDrawState>,
}

impl OutlineProgram {
  pub(crate) fn build(
    id: OutlineProgramId,
    hash: OutlineProgramHash,
    mesh: &OutlineMeshRef,
    device: Arc<dyn GLESOutlineDevice>,
    source_provider: &dyn OutlineShaderSourceProvider,
    naming: &OutlineShaderNaming,
  ) -> Self {
    let source = source_provider.generate(mesh, naming);

    let linked = device
      .create_program(&source)
      .map(|program| {
        let resolver = SlotResolver {
          device: &*device,
          program,
          source: &source,
        };
        LinkedOutlineProgram {
          program,
          slots: resolver.resolve_all(naming, mesh.scene.clips.len()),
        }
      })
      .map_err(|messages| ProgramBuildError { messages });

    Self {
      id,
      bind_key: OutlineProgramBindKey::next(),
      hash,
      device,
      linked,
      draw_state: Default::default(),
    }
  }

  pub fn id(&self) -> OutlineProgramId {
    self.id
  }

  pub fn bind_key(&self) -> OutlineProgramBindKey {
    self.bind_key
  }

  pub fn hash(&self) -> &OutlineProgramHash {
    &self.hash
  }

  /// Empty when the program linked. Callers must check this before drawing.
  pub fn errors(&self) -> &[String] {
    match &self.linked {
      Ok(_) => &[],
      Err(e) => e.messages.as_slice(),
    }
  }

  pub fn build_error(&self) -> Option<&ProgramBuildError> {
    self.linked.as_ref().err()
  }

  pub fn is_linked(&self) -> bool {
    self.linked.is_ok()
  }

  /// `None` if the build failed.
  pub fn slots(&self) -> Option<&OutlineProgramSlots> {
    self.linked.as_ref().ok().map(|l| &l.slots)
  }

  pub fn draw_state(&self) -> OutlineDrawState {
    *self.draw_state.lock()
  }

  pub(crate) fn destroy(&self) {
    if let Ok(linked) = &self.linked {
      self.device.destroy_program(linked.program);
    }
  }
}

impl std::fmt::Debug for OutlineProgram {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("OutlineProgram")
      .field("id", &self.id)
      .field("hash", &self.hash)
      .field("errors", &self.errors())
      .finish()
  }
}
