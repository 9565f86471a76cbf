//! Outline pass for the gles style renderer.
//!
//! Every mesh that should be outlined maps to a program by its feature hash. Programs are shared
//! by all meshes with the same hash and live as long as any [`OutlineProgramHandle`] does. Inside
//! a frame each program remembers the last material, vertex buffer set and geometry it has been
//! drawn with, so consecutive meshes only upload what actually changed.

mod cache;
pub use cache::*;
mod device;
pub use device::*;
mod error;
pub use error::*;
mod frame;
pub use frame::*;
mod hash;
pub use hash::*;
mod identity;
pub use identity::*;
mod naming;
pub use naming::*;
mod pass;
pub use pass::*;
mod program;
pub use program::*;
mod source;
pub use source::*;
mod state;
pub use state::*;

#[cfg(test)]
mod test_util;

use std::sync::Arc;

use id_reuse::IdReusePool;
use parking_lot::{Mutex, RwLock};

pub type FastHashMap<K, V> =
  hashbrown::HashMap<K, V, std::hash::BuildHasherDefault<rustc_hash::FxHasher>>;
