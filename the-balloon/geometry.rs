//! Coordinate types shared by the balloon components.
//!
//! Two spaces are in play: *local* coordinates relative to a host component
//! ([`Point`], [`Rect`]) and *screen* coordinates ([`ScreenPoint`]). Keeping
//! them as distinct types makes every conversion go through the host.

/// A point in some component's local coordinate space.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
  pub x: i32,
  pub y: i32,
}

impl Point {
  pub const fn new(x: i32, y: i32) -> Self {
    Self { x, y }
  }
}

/// A point in screen space.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenPoint {
  pub x: i32,
  pub y: i32,
}

impl ScreenPoint {
  pub const fn new(x: i32, y: i32) -> Self {
    Self { x, y }
  }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
  pub width:  i32,
  pub height: i32,
}

impl Size {
  pub const fn new(width: i32, height: i32) -> Self {
    Self { width, height }
  }
}

/// Rectangle in local coordinates.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
  pub x:      i32,
  pub y:      i32,
  pub width:  i32,
  pub height: i32,
}

impl Rect {
  pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
    Self {
      x,
      y,
      width,
      height,
    }
  }

  pub const fn origin(&self) -> Point {
    Point::new(self.x, self.y)
  }

  pub const fn right(&self) -> i32 {
    self.x + self.width
  }

  pub const fn bottom(&self) -> i32 {
    self.y + self.height
  }

  /// Half-open containment: the right and bottom edges are outside.
  pub const fn contains(&self, point: Point) -> bool {
    point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
  }
}

/// Row/column position of a character after soft wrap and folding.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VisualPosition {
  pub row: usize,
  pub col: usize,
}

impl VisualPosition {
  pub const fn new(row: usize, col: usize) -> Self {
    Self { row, col }
  }
}
