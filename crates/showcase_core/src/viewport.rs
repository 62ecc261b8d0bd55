//! Viewport geometry and visibility tests
//!
//! Rectangles use CSS pixel coordinates relative to the viewport's top-left
//! corner, the same space as `Element.getBoundingClientRect()`.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in viewport coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// The same rectangle moved vertically
    pub fn offset_y(&self, dy: f64) -> Rect {
        Rect {
            y: self.y + dy,
            ..*self
        }
    }
}

/// Visible area of the window
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

/// Observer root margins; positive values grow the root box, negative shrink it
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    /// Only a bottom margin (`0px 0px <bottom>px 0px`)
    pub fn bottom(bottom: f64) -> Self {
        Self {
            bottom,
            ..Default::default()
        }
    }
}

/// True when the whole rectangle lies inside the viewport
pub fn is_in_viewport(rect: &Rect, viewport: &Viewport) -> bool {
    rect.top() >= 0.0
        && rect.left() >= 0.0
        && rect.bottom() <= viewport.height
        && rect.right() <= viewport.width
}

/// True when any part of the rectangle overlaps the viewport
///
/// Boxes without area are not visible wherever they sit.
pub fn is_partially_visible(rect: &Rect, viewport: &Viewport) -> bool {
    rect.area() > 0.0
        && rect.bottom() > 0.0
        && rect.right() > 0.0
        && rect.top() < viewport.height
        && rect.left() < viewport.width
}

/// Fraction of `rect` visible inside the viewport expanded by `margin`
///
/// Zero-area targets (collapsed or `display: none` boxes) never intersect.
pub fn intersection_ratio(rect: &Rect, viewport: &Viewport, margin: &Margins) -> f64 {
    let area = rect.area();
    if area <= 0.0 {
        return 0.0;
    }

    let root_left = -margin.left;
    let root_top = -margin.top;
    let root_right = viewport.width + margin.right;
    let root_bottom = viewport.height + margin.bottom;

    let left = rect.left().max(root_left);
    let top = rect.top().max(root_top);
    let right = rect.right().min(root_right);
    let bottom = rect.bottom().min(root_bottom);

    if right < left || bottom < top {
        return 0.0;
    }

    ((right - left) * (bottom - top) / area).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Viewport = Viewport {
        width: 1000.0,
        height: 800.0,
    };

    #[test]
    fn test_fully_visible() {
        assert!(is_in_viewport(&Rect::new(10.0, 10.0, 100.0, 100.0), &VIEW));
        assert!(!is_in_viewport(&Rect::new(10.0, 750.0, 100.0, 100.0), &VIEW));
    }

    #[test]
    fn test_partially_visible() {
        assert!(is_partially_visible(&Rect::new(10.0, 750.0, 100.0, 100.0), &VIEW));
        assert!(!is_partially_visible(&Rect::new(10.0, 800.0, 100.0, 100.0), &VIEW));
        assert!(!is_partially_visible(&Rect::new(10.0, -100.0, 100.0, 100.0), &VIEW));
    }

    #[test]
    fn test_intersection_ratio() {
        let none = Margins::default();
        let rect = Rect::new(0.0, 750.0, 100.0, 100.0);
        assert!((intersection_ratio(&rect, &VIEW, &none) - 0.5).abs() < 1e-9);

        // A negative bottom margin pulls the trigger line up
        let shrunk = Margins::bottom(-50.0);
        assert_eq!(intersection_ratio(&rect, &VIEW, &shrunk), 0.0);

        let inside = Rect::new(0.0, 100.0, 100.0, 100.0);
        assert_eq!(intersection_ratio(&inside, &VIEW, &shrunk), 1.0);
        assert_eq!(intersection_ratio(&inside.offset_y(2000.0), &VIEW, &none), 0.0);
    }

    #[test]
    fn test_zero_area_never_intersects() {
        let none = Margins::default();
        let hidden = Rect::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(intersection_ratio(&hidden, &VIEW, &none), 0.0);
        assert!(!is_partially_visible(&hidden, &VIEW));
        assert!(!is_partially_visible(&Rect::new(100.0, 100.0, 0.0, 0.0), &VIEW));

        // A zero-height line inside the viewport still has no area
        let collapsed = Rect::new(10.0, 100.0, 200.0, 0.0);
        assert_eq!(intersection_ratio(&collapsed, &VIEW, &Margins::bottom(100.0)), 0.0);
    }
}
