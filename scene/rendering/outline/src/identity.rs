use std::hash::Hash;
use std::marker::PhantomData;

/// Stable identity of a piece of externally owned state.
///
/// Only used to detect "is this the same thing I bound last time", it carries no ownership.
pub struct StateIdentity<T> {
  value: u64,
  ty: PhantomData<T>,
}

impl<T> StateIdentity<T> {
  pub const fn new(value: u64) -> Self {
    Self {
      value,
      ty: PhantomData,
    }
  }

  pub fn raw(&self) -> u64 {
    self.value
  }
}

impl<T> Clone for StateIdentity<T> {
  fn clone(&self) -> Self {
    *self
  }
}

impl<T> Copy for StateIdentity<T> {}

impl<T> PartialEq for StateIdentity<T> {
  fn eq(&self, other: &Self) -> bool {
    self.value == other.value
  }
}

impl<T> Eq for StateIdentity<T> {}

impl<T> Hash for StateIdentity<T> {
  fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
    self.value.hash(state)
  }
}

impl<T> std::fmt::Debug for StateIdentity<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_tuple("StateIdentity").field(&self.value).finish()
  }
}

pub type MaterialIdentity = StateIdentity<crate::OutlineMaterial>;
pub type GeometryIdentity = StateIdentity<crate::GeometryState>;
pub type VertexBufferSetIdentity = StateIdentity<crate::VertexBufferSet>;
pub type MeshIdentity = StateIdentity<crate::MeshState>;
