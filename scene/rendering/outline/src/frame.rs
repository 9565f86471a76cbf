use crate::*;

/// Per frame binding record shared by every outline program drawn in that frame.
///
/// Create one at frame start and drop (or [`reset`](Self::reset)) it at frame end, it must never
/// carry over to the next frame. Programs are told apart by their bind key, so programs released
/// mid frame and programs of other render contexts never alias.
#[derive(Debug, Default, Clone)]
pub struct OutlineFrameCtx {
  /// program bound last in this frame, by any outline program
  pub last_program: Option<OutlineProgramBindKey>,
  pub program_binds: u32,
  pub array_binds: u32,
  pub draw_elements: u32,
  pub draw_arrays: u32,
}

impl OutlineFrameCtx {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn reset(&mut self) {
    *self = Self::default();
  }

  /// Call when something outside the outline pass has bound another program in the middle of
  /// the frame, so the next outline draw binds its program again.
  pub fn invalidate_program(&mut self) {
    self.last_program = None;
  }

  pub fn draw_calls(&self) -> u32 {
    self.draw_elements + self.draw_arrays
  }
}
