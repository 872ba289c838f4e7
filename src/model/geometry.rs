//! Bounding-box geometry shared by the whole model.

use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box in page coordinates (points).
///
/// `x` grows rightward and `y` grows downward, so `y0` is the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BBox {
    /// Create a new bounding box.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// A degenerate empty box at the origin.
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Smallest box containing both `self` and `other`.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Union over an iterator of boxes; `zero()` when empty.
    pub fn union_all<I: IntoIterator<Item = BBox>>(boxes: I) -> BBox {
        let mut iter = boxes.into_iter();
        match iter.next() {
            Some(first) => iter.fold(first, |acc, b| acc.union(&b)),
            None => BBox::zero(),
        }
    }
}

impl Default for BBox {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union() {
        let a = BBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BBox::new(5.0, -2.0, 20.0, 8.0);
        let u = a.union(&b);
        assert_eq!(u, BBox::new(0.0, -2.0, 20.0, 10.0));
    }

    #[test]
    fn test_union_all_empty() {
        let u = BBox::union_all(std::iter::empty());
        assert_eq!(u, BBox::zero());
    }

    #[test]
    fn test_dimensions() {
        let b = BBox::new(72.0, 700.0, 172.0, 712.0);
        assert_eq!(b.width(), 100.0);
        assert_eq!(b.height(), 12.0);
    }
}
