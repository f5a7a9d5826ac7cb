use glam::DVec3;

/// Axis-aligned bounding box in world space.
///
/// Invariant: `min <= max` on every axis. The constructor enforces this by
/// swapping components if needed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    /// Create an AABB from two corners. Automatically sorts components so that
    /// min <= max on every axis.
    pub fn new(a: DVec3, b: DVec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Smallest AABB enclosing every point, or `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = DVec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::new(first, first), |aabb, p| aabb.expanded_to(p)))
    }

    /// Returns this AABB grown to include `p`.
    pub fn expanded_to(&self, p: DVec3) -> Self {
        Self {
            min: self.min.min(p),
            max: self.max.max(p),
        }
    }

    /// Midpoint of the box, `(min + max) / 2` per axis.
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }
}
