//! Axis-aligned 3D bounding box.

use super::Point3;
use crate::Coord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 3D axis-aligned bounding box.
///
/// A freshly created box is undefined until the first point is merged into
/// it. Region seed points are derived from the box through [`center`],
/// which computes the midpoint as `min + (max - min) / 2` per axis.
///
/// [`center`]: BoundingBox3::center
#[derive(Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox3 {
    pub min: Point3,
    pub max: Point3,
    defined: bool,
}

impl BoundingBox3 {
    /// Create a new empty (undefined) bounding box.
    #[inline]
    pub fn new() -> Self {
        Self {
            min: Point3::new(Coord::MAX, Coord::MAX, Coord::MAX),
            max: Point3::new(Coord::MIN, Coord::MIN, Coord::MIN),
            defined: false,
        }
    }

    /// Create a bounding box from min and max points.
    #[inline]
    pub fn from_points_minmax(min: Point3, max: Point3) -> Self {
        Self {
            min,
            max,
            defined: true,
        }
    }

    /// Create a bounding box from a slice of points.
    pub fn from_points(points: &[Point3]) -> Self {
        let mut bb = Self::new();
        for p in points {
            bb.merge_point(*p);
        }
        bb
    }

    /// Check if the bounding box is defined (has been merged with at least one point).
    #[inline]
    pub fn is_defined(&self) -> bool {
        self.defined
    }

    /// Check if the bounding box is empty (not defined).
    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.defined
    }

    /// Merge a point into the bounding box.
    pub fn merge_point(&mut self, p: Point3) {
        if self.defined {
            self.min.x = self.min.x.min(p.x);
            self.min.y = self.min.y.min(p.y);
            self.min.z = self.min.z.min(p.z);
            self.max.x = self.max.x.max(p.x);
            self.max.y = self.max.y.max(p.y);
            self.max.z = self.max.z.max(p.z);
        } else {
            self.min = p;
            self.max = p;
            self.defined = true;
        }
    }

    /// Merge another bounding box into this one.
    pub fn merge(&mut self, other: &BoundingBox3) {
        if other.defined {
            self.merge_point(other.min);
            self.merge_point(other.max);
        }
    }

    /// Get the size in x direction.
    #[inline]
    pub fn size_x(&self) -> Coord {
        if self.defined {
            self.max.x - self.min.x
        } else {
            0.0
        }
    }

    /// Get the size in y direction.
    #[inline]
    pub fn size_y(&self) -> Coord {
        if self.defined {
            self.max.y - self.min.y
        } else {
            0.0
        }
    }

    /// Get the size in z direction.
    #[inline]
    pub fn size_z(&self) -> Coord {
        if self.defined {
            self.max.z - self.min.z
        } else {
            0.0
        }
    }

    /// Get the size as a 3D point.
    #[inline]
    pub fn size(&self) -> Point3 {
        Point3::new(self.size_x(), self.size_y(), self.size_z())
    }

    /// Get the midpoint of the bounding box.
    ///
    /// Computed per axis as `min + (max - min) / 2`. Interior seed points
    /// for tetrahedralization use exactly this value.
    #[inline]
    pub fn center(&self) -> Point3 {
        Point3::new(
            self.min.x + (self.max.x - self.min.x) / 2.0,
            self.min.y + (self.max.y - self.min.y) / 2.0,
            self.min.z + (self.max.z - self.min.z) / 2.0,
        )
    }

    /// Check if a point is inside the bounding box (boundary included).
    #[inline]
    pub fn contains_point(&self, p: &Point3) -> bool {
        self.defined
            && p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }
}

impl fmt::Debug for BoundingBox3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.defined {
            write!(f, "BoundingBox3({:?} - {:?})", self.min, self.max)
        } else {
            write!(f, "BoundingBox3(undefined)")
        }
    }
}

impl fmt::Display for BoundingBox3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.defined {
            write!(f, "[{} - {}]", self.min, self.max)
        } else {
            write!(f, "[undefined]")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_new() {
        let bb = BoundingBox3::new();
        assert!(!bb.is_defined());
        assert!(bb.is_empty());
    }

    #[test]
    fn test_bounding_box_from_points() {
        let points = vec![
            Point3::new(1.0, 5.0, -2.0),
            Point3::new(-3.0, 2.0, 4.0),
            Point3::new(0.0, 8.0, 1.0),
        ];
        let bb = BoundingBox3::from_points(&points);
        assert!(bb.is_defined());
        assert_eq!(bb.min, Point3::new(-3.0, 2.0, -2.0));
        assert_eq!(bb.max, Point3::new(1.0, 8.0, 4.0));
    }

    #[test]
    fn test_bounding_box_merge_point() {
        let mut bb = BoundingBox3::new();
        bb.merge_point(Point3::new(1.0, 1.0, 1.0));
        assert!(bb.is_defined());
        assert_eq!(bb.min, bb.max);

        bb.merge_point(Point3::new(-1.0, 2.0, 0.5));
        assert_eq!(bb.min, Point3::new(-1.0, 1.0, 0.5));
        assert_eq!(bb.max, Point3::new(1.0, 2.0, 1.0));
    }

    #[test]
    fn test_bounding_box_center() {
        let bb = BoundingBox3::from_points_minmax(
            Point3::new(0.0, -2.0, 10.0),
            Point3::new(4.0, 2.0, 11.0),
        );
        let center = bb.center();
        assert_eq!(center, Point3::new(2.0, 0.0, 10.5));
    }

    #[test]
    fn test_bounding_box_center_single_point() {
        let p = Point3::new(3.5, -1.25, 0.75);
        let bb = BoundingBox3::from_points(&[p]);
        assert_eq!(bb.center(), p);
    }

    #[test]
    fn test_bounding_box_size() {
        let bb = BoundingBox3::from_points_minmax(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 3.0, 4.0),
        );
        assert_eq!(bb.size(), Point3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn test_bounding_box_contains_point() {
        let bb = BoundingBox3::from_points_minmax(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
        );
        assert!(bb.contains_point(&Point3::new(0.5, 0.5, 0.5)));
        assert!(bb.contains_point(&Point3::new(0.0, 0.0, 0.0)));
        assert!(bb.contains_point(&Point3::new(1.0, 1.0, 1.0)));
        assert!(!bb.contains_point(&Point3::new(1.5, 0.5, 0.5)));
    }

    #[test]
    fn test_bounding_box_center_inside() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ];
        let bb = BoundingBox3::from_points(&points);
        assert!(bb.contains_point(&bb.center()));
    }

    #[test]
    fn test_bounding_box_merge() {
        let mut bb1 = BoundingBox3::from_points_minmax(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
        );
        let bb2 = BoundingBox3::from_points_minmax(
            Point3::new(0.5, 0.5, 0.5),
            Point3::new(2.0, 2.0, 2.0),
        );
        bb1.merge(&bb2);
        assert_eq!(bb1.min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(bb1.max, Point3::new(2.0, 2.0, 2.0));

        let undefined = BoundingBox3::new();
        bb1.merge(&undefined);
        assert_eq!(bb1.max, Point3::new(2.0, 2.0, 2.0));
    }
}
