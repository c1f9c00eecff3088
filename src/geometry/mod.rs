//! Axis-aligned bounding boxes and overlap measures.
//!
//! Boxes are stored as `(x1, y1, x2, y2)` corners in absolute pixel
//! coordinates. Construction validates that the corners are finite and ordered;
//! zero-area boxes are allowed and behave as degenerate (IoU 0 against
//! anything, including themselves).

use crate::util::math::overlap_1d;
use crate::util::{BoxMergeError, BoxMergeResult};

/// Axis-aligned box with validated corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

impl BBox {
    /// Creates a box from its top-left `(x1, y1)` and bottom-right `(x2, y2)` corners.
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> BoxMergeResult<Self> {
        let finite = x1.is_finite() && y1.is_finite() && x2.is_finite() && y2.is_finite();
        if !finite || x1 > x2 || y1 > y2 {
            return Err(BoxMergeError::InvalidBox { x1, y1, x2, y2 });
        }
        Ok(Self { x1, y1, x2, y2 })
    }

    /// Creates a box from a `[x1, y1, x2, y2]` array.
    pub fn from_array(coords: [f32; 4]) -> BoxMergeResult<Self> {
        let [x1, y1, x2, y2] = coords;
        Self::new(x1, y1, x2, y2)
    }

    /// Returns the left edge coordinate.
    pub fn x1(&self) -> f32 {
        self.x1
    }

    /// Returns the top edge coordinate.
    pub fn y1(&self) -> f32 {
        self.y1
    }

    /// Returns the right edge coordinate.
    pub fn x2(&self) -> f32 {
        self.x2
    }

    /// Returns the bottom edge coordinate.
    pub fn y2(&self) -> f32 {
        self.y2
    }

    /// Returns the corners as `[x1, y1, x2, y2]`.
    pub fn to_array(&self) -> [f32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    /// Returns the box width in pixels.
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    /// Returns the box height in pixels.
    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    /// Returns the box area in square pixels.
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Area of the overlap with `other`, zero when the boxes are disjoint.
    pub fn intersection_area(&self, other: &BBox) -> f32 {
        intersection_f64(self, other) as f32
    }

    /// Smallest box enclosing both `self` and `other`.
    pub fn union_box(&self, other: &BBox) -> BBox {
        BBox {
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
            x2: self.x2.max(other.x2),
            y2: self.y2.max(other.y2),
        }
    }

    /// Returns true when `other` lies entirely inside `self` (edges inclusive).
    pub fn contains(&self, other: &BBox) -> bool {
        self.x1 <= other.x1 && self.y1 <= other.y1 && self.x2 >= other.x2 && self.y2 >= other.y2
    }
}

/// Intersection-over-union of two boxes in `[0, 1]`.
///
/// Returns 0 when the boxes do not overlap, when either box has zero area, or
/// when the union is zero. The measure is symmetric in its arguments.
///
/// Areas are accumulated in `f64` so coordinates near the top of the `f32`
/// range do not overflow to infinity.
pub fn iou(a: &BBox, b: &BBox) -> f32 {
    let inter = intersection_f64(a, b);
    if inter <= 0.0 {
        return 0.0;
    }
    let union = area_f64(a) + area_f64(b) - inter;
    if !union.is_finite() || union <= 0.0 {
        return 0.0;
    }
    (inter / union).min(1.0) as f32
}

fn intersection_f64(a: &BBox, b: &BBox) -> f64 {
    overlap_1d(a.x1, a.x2, b.x1, b.x2) * overlap_1d(a.y1, a.y2, b.y1, b.y2)
}

fn area_f64(b: &BBox) -> f64 {
    (f64::from(b.x2) - f64::from(b.x1)) * (f64::from(b.y2) - f64::from(b.y1))
}
