//! Axis-aligned rectangles in page pixels.
//!
//! Everything shares one coordinate space: the top-left corner of the game
//! area is (0, 0) and y grows downward.

/// Rectangle given by its top-left corner and size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn left(&self) -> f64 {
        self.x
    }
    pub fn right(&self) -> f64 {
        self.x + self.width
    }
    pub fn top(&self) -> f64 {
        self.y
    }
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Same size, new top-left corner.
    pub fn moved_to(&self, x: f64, y: f64) -> Self {
        Self { x, y, ..*self }
    }

    /// Overlap test with strict separation: two rectangles are apart only when
    /// one lies strictly beyond an edge of the other. Rectangles whose edges
    /// coincide exactly count as overlapping.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.right() < other.left()
            || self.left() > other.right()
            || self.bottom() < other.top()
            || self.top() > other.bottom())
    }
}

/// Visible area the actor is kept inside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Clamp a top-left corner so a `w`x`h` box stays on screen. When the box
    /// is bigger than the viewport the lower bound (0) wins.
    pub fn clamp(&self, x: f64, y: f64, w: f64, h: f64) -> (f64, f64) {
        let max_x = self.width - w;
        let max_y = self.height - h;
        (x.min(max_x).max(0.0), y.min(max_y).max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(10.5, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(0.0, -20.0, 10.0, 10.0)));
    }

    #[test]
    fn test_shared_edge_counts_as_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        // right edge of a == left edge of b
        assert!(a.overlaps(&Rect::new(10.0, 0.0, 5.0, 5.0)));
        // bottom edge of a == top edge of b
        assert!(a.overlaps(&Rect::new(0.0, 10.0, 5.0, 5.0)));
        // corner contact
        assert!(a.overlaps(&Rect::new(10.0, 10.0, 5.0, 5.0)));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = Rect::new(3.0, 4.0, 8.0, 2.0);
        let b = Rect::new(10.0, 5.0, 1.0, 1.0);
        assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    #[test]
    fn test_clamp_keeps_box_inside() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.clamp(-5.0, 700.0, 40.0, 40.0), (0.0, 560.0));
        assert_eq!(vp.clamp(900.0, -1.0, 40.0, 40.0), (760.0, 0.0));
        assert_eq!(vp.clamp(100.0, 100.0, 40.0, 40.0), (100.0, 100.0));
    }

    #[test]
    fn test_clamp_oversized_actor_pins_to_origin() {
        let vp = Viewport::new(20.0, 20.0);
        assert_eq!(vp.clamp(5.0, 5.0, 40.0, 40.0), (0.0, 0.0));
    }
}
