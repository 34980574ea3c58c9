use glam::Vec2;

/// Axis-aligned rectangle in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of size `size` centered on `center`.
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self::new(center.x - size.x * 0.5, center.y - size.y * 0.5, size.x, size.y)
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.w, self.y + self.h)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    pub fn area(&self) -> f32 {
        self.w.max(0.0) * self.h.max(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.y >= self.y && p.x <= self.x + self.w && p.y <= self.y + self.h
    }

    /// Clamp a point into the rectangle (edges inclusive).
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min(), self.max())
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let min = self.min().min(other.min());
        let max = self.max().max(other.max());
        Rect::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    /// Overlap of both, empty if they do not touch.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let min = self.min().max(other.min());
        let max = self.max().min(other.max());
        if max.x <= min.x || max.y <= min.y {
            return Rect::default();
        }
        Rect::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    /// Grow outward by `by` on every side.
    pub fn expand(&self, by: f32) -> Rect {
        Rect::new(self.x - by, self.y - by, self.w + by * 2.0, self.h + by * 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_pulls_points_inside() {
        let r = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(r.clamp(Vec2::new(-5.0, 70.0)), Vec2::new(0.0, 50.0));
        assert_eq!(r.clamp(Vec2::new(30.0, 20.0)), Vec2::new(30.0, 20.0));
    }

    #[test]
    fn union_ignores_empty() {
        let a = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert_eq!(Rect::default().union(&a), a);
        let b = Rect::new(0.0, 20.0, 5.0, 5.0);
        assert_eq!(a.union(&b), Rect::new(0.0, 10.0, 15.0, 15.0));
    }

    #[test]
    fn disjoint_intersection_is_empty() {
        let a = Rect::new(0.0, 0.0, 5.0, 5.0);
        let b = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert!(a.intersect(&b).is_empty());
        assert_eq!(a.intersect(&Rect::new(2.0, 2.0, 10.0, 10.0)), Rect::new(2.0, 2.0, 3.0, 3.0));
    }
}
