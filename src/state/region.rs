//! Screen geometry for the hot corner
//!
//! The region is computed once from the desktop bounds and never changes
//! for the lifetime of the process.

/// A point in screen coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in screen coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub top: i32,
    pub left: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    /// Half-open containment: the right and bottom edges are excluded
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x < self.right && point.y >= self.top && point.y < self.bottom
    }
}

/// How far the trigger strip reaches from the bottom-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CornerGeometry {
    /// Horizontal reach on either side of the desktop's left edge
    pub horizontal: i32,
    /// Vertical reach on either side of the desktop's bottom edge
    pub vertical: i32,
}

impl Default for CornerGeometry {
    fn default() -> Self {
        Self {
            horizontal: 20,
            vertical: 20,
        }
    }
}

/// The rectangle that arms the corner when the pointer enters it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotRegion(Rect);

impl HotRegion {
    /// Build the region around the bottom-left corner of `desktop`
    ///
    /// The strip straddles both edges so that a pointer pinned against the
    /// corner (which the host clamps to the last visible pixel) is inside.
    pub fn from_desktop(desktop: Rect, geometry: CornerGeometry) -> Self {
        Self(Rect {
            top: desktop.bottom - geometry.vertical,
            bottom: desktop.bottom + geometry.vertical,
            left: desktop.left - geometry.horizontal,
            right: desktop.left + geometry.horizontal,
        })
    }

    pub fn contains(&self, point: Point) -> bool {
        self.0.contains(point)
    }

    pub fn bounds(&self) -> Rect {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desktop() -> Rect {
        Rect {
            top: 0,
            left: 0,
            right: 1920,
            bottom: 1080,
        }
    }

    #[test]
    fn test_region_from_desktop() {
        let region = HotRegion::from_desktop(desktop(), CornerGeometry::default());
        assert_eq!(
            region.bounds(),
            Rect {
                top: 1060,
                left: -20,
                right: 20,
                bottom: 1100,
            }
        );
    }

    #[test]
    fn test_corner_pixel_is_hot() {
        let region = HotRegion::from_desktop(desktop(), CornerGeometry::default());
        assert!(region.contains(Point::new(0, 1079)));
        assert!(region.contains(Point::new(19, 1060)));
    }

    #[test]
    fn test_edges_are_half_open() {
        let region = HotRegion::from_desktop(desktop(), CornerGeometry::default());
        assert!(region.contains(Point::new(-20, 1060)));
        assert!(!region.contains(Point::new(20, 1070)));
        assert!(!region.contains(Point::new(5, 1100)));
        assert!(!region.contains(Point::new(5, 1059)));
    }

    #[test]
    fn test_far_points_are_cold() {
        let region = HotRegion::from_desktop(desktop(), CornerGeometry::default());
        assert!(!region.contains(Point::new(960, 540)));
        assert!(!region.contains(Point::new(0, 0)));
        assert!(!region.contains(Point::new(1919, 1079)));
    }

    #[test]
    fn test_offset_desktop() {
        let offset = Rect {
            top: 0,
            left: 100,
            right: 1380,
            bottom: 720,
        };
        let region = HotRegion::from_desktop(offset, CornerGeometry::default());
        assert!(region.contains(Point::new(100, 719)));
        assert!(!region.contains(Point::new(0, 719)));
    }
}
