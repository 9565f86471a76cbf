use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Issues small integer ids and hands released ids out again before growing.
///
/// The smallest released id is always reused first, so ids stay dense and can be used to index
/// side tables directly.
#[derive(Default, Debug)]
pub struct IdReusePool {
  next: u32,
  free: BinaryHeap<Reverse<u32>>,
  live: usize,
}

impl IdReusePool {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn alloc(&mut self) -> u32 {
    self.live += 1;
    if let Some(Reverse(id)) = self.free.pop() {
      id
    } else {
      let id = self.next;
      self.next += 1;
      id
    }
  }

  /// The id must be live (allocated and not released yet), releasing twice is a logic error of
  /// the caller and will hand the same id to two users.
  pub fn release(&mut self, id: u32) {
    debug_assert!(id < self.next, "release id never allocated: {id}");
    debug_assert!(self.live > 0);
    self.live -= 1;
    if id + 1 == self.next {
      self.next -= 1;
      self.shrink_tail();
    } else {
      self.free.push(Reverse(id));
    }
  }

  // keep the free heap small when the top ids are released in any order
  fn shrink_tail(&mut self) {
    if self.free.is_empty() {
      return;
    }
    let mut remains: Vec<_> = self.free.drain().map(|Reverse(id)| id).collect();
    remains.sort_unstable();
    while remains.last().is_some_and(|&id| id + 1 == self.next) {
      remains.pop();
      self.next -= 1;
    }
    self.free.extend(remains.into_iter().map(Reverse));
  }

  pub fn live_count(&self) -> usize {
    self.live
  }

  /// Upper bound (exclusive) of every id currently issued.
  pub fn id_bound(&self) -> u32 {
    self.next
  }
}

#[test]
fn ids_are_dense_and_reused() {
  let mut pool = IdReusePool::new();
  let a = pool.alloc();
  let b = pool.alloc();
  let c = pool.alloc();
  assert_eq!((a, b, c), (0, 1, 2));
  assert_eq!(pool.live_count(), 3);

  pool.release(b);
  assert_eq!(pool.live_count(), 2);
  assert_eq!(pool.alloc(), 1);

  pool.release(a);
  pool.release(b);
  assert_eq!(pool.alloc(), 0);
  assert_eq!(pool.alloc(), 1);
  assert_eq!(pool.alloc(), 3);
}

#[test]
fn releasing_tail_shrinks_bound() {
  let mut pool = IdReusePool::new();
  let ids: Vec<_> = (0..4).map(|_| pool.alloc()).collect();
  assert_eq!(pool.id_bound(), 4);

  pool.release(ids[2]);
  pool.release(ids[3]);
  assert_eq!(pool.id_bound(), 2);
  assert_eq!(pool.alloc(), 2);

  pool.release(0);
  pool.release(1);
  pool.release(2);
  assert_eq!(pool.id_bound(), 0);
  assert_eq!(pool.live_count(), 0);
}
