//! Window geometry primitives shared by the registry, the session store
//! and the toolkit seam.
//!
//! Coordinates are in the toolkit's screen space: top-left origin, y grows
//! downward.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Position and size of a window. `position` is `None` when the toolkit
/// should pick a placement (usually centered).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub position: Option<Position>,
    pub size: Size,
}

/// A display rectangle reported by the toolkit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayBounds {
    pub origin_x: f64,
    pub origin_y: f64,
    pub width: f64,
    pub height: f64,
}

const MIN_VISIBLE_AREA: f64 = 64.0 * 64.0;
const MIN_EDGE_MARGIN: f64 = 50.0;

/// Check if a placed window is still visible on one of the displays.
///
/// Geometry without a position is always considered visible since the
/// toolkit chooses where it goes.
pub fn is_visible(geometry: &Geometry, displays: &[DisplayBounds]) -> bool {
    let Some(pos) = geometry.position else {
        return true;
    };
    displays.iter().any(|d| {
        rect_intersection(rect_of(pos, geometry.size), d)
            .is_some_and(|(w, h)| w * h >= MIN_VISIBLE_AREA)
    })
}

/// Clamp geometry so the window is visible and grabbable on the best
/// matching display. Returns `None` when there is no display to clamp to
/// or the display is too small to hold the margins.
pub fn clamp_to_displays(geometry: &Geometry, displays: &[DisplayBounds]) -> Option<Geometry> {
    let pos = geometry.position?;
    let rect = rect_of(pos, geometry.size);
    let target = best_display(rect, displays)?;

    let max_w = target.width - MIN_EDGE_MARGIN * 2.0;
    let max_h = target.height - MIN_EDGE_MARGIN * 2.0;
    if max_w <= 0.0 || max_h <= 0.0 {
        return None;
    }
    let width = rect.2.min(max_w);
    let height = rect.3.min(max_h);

    let min_x = target.origin_x + MIN_EDGE_MARGIN;
    let max_x = target.origin_x + target.width - width - MIN_EDGE_MARGIN;
    let min_y = target.origin_y + MIN_EDGE_MARGIN;
    let max_y = target.origin_y + target.height - height - MIN_EDGE_MARGIN;

    Some(Geometry {
        position: Some(Position::new(
            rect.0.max(min_x).min(max_x).round() as i32,
            rect.1.max(min_y).min(max_y).round() as i32,
        )),
        size: Size::new(width.round() as u32, height.round() as u32),
    })
}

type Rect = (f64, f64, f64, f64);

fn rect_of(pos: Position, size: Size) -> Rect {
    (
        f64::from(pos.x),
        f64::from(pos.y),
        f64::from(size.width),
        f64::from(size.height),
    )
}

fn rect_intersection(r: Rect, d: &DisplayBounds) -> Option<(f64, f64)> {
    let left = r.0.max(d.origin_x);
    let top = r.1.max(d.origin_y);
    let right = (r.0 + r.2).min(d.origin_x + d.width);
    let bottom = (r.1 + r.3).min(d.origin_y + d.height);
    if left < right && top < bottom {
        Some((right - left, bottom - top))
    } else {
        None
    }
}

/// Display containing the window center, else the one with the largest
/// overlap, else the first one.
fn best_display(r: Rect, displays: &[DisplayBounds]) -> Option<&DisplayBounds> {
    let cx = r.0 + r.2 / 2.0;
    let cy = r.1 + r.3 / 2.0;
    if let Some(d) = displays.iter().find(|d| {
        cx >= d.origin_x && cx < d.origin_x + d.width && cy >= d.origin_y && cy < d.origin_y + d.height
    }) {
        return Some(d);
    }

    let mut best: Option<&DisplayBounds> = None;
    let mut best_area = 0.0;
    for d in displays {
        if let Some((w, h)) = rect_intersection(r, d) {
            if w * h > best_area {
                best_area = w * h;
                best = Some(d);
            }
        }
    }
    best.or_else(|| displays.first())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display() -> DisplayBounds {
        DisplayBounds {
            origin_x: 0.0,
            origin_y: 0.0,
            width: 1920.0,
            height: 1080.0,
        }
    }

    fn placed(x: i32, y: i32, w: u32, h: u32) -> Geometry {
        Geometry {
            position: Some(Position::new(x, y)),
            size: Size::new(w, h),
        }
    }

    #[test]
    fn test_on_screen_window_is_visible() {
        assert!(is_visible(&placed(100, 100, 800, 600), &[display()]));
    }

    #[test]
    fn test_off_screen_window_is_not_visible() {
        assert!(!is_visible(&placed(5000, 5000, 800, 600), &[display()]));
        // a 20px corner is not enough to grab
        assert!(!is_visible(&placed(1900, 1060, 800, 600), &[display()]));
    }

    #[test]
    fn test_unplaced_window_is_always_visible() {
        let g = Geometry {
            position: None,
            size: Size::new(800, 600),
        };
        assert!(is_visible(&g, &[]));
    }

    #[test]
    fn test_clamp_pulls_window_back_on_screen() {
        let clamped = clamp_to_displays(&placed(1800, 900, 800, 600), &[display()]).unwrap();
        let pos = clamped.position.unwrap();
        assert_eq!(pos, Position::new(1920 - 800 - 50, 1080 - 600 - 50));
        assert_eq!(clamped.size, Size::new(800, 600));
    }

    #[test]
    fn test_clamp_shrinks_oversized_window() {
        let clamped = clamp_to_displays(&placed(0, 0, 4000, 3000), &[display()]).unwrap();
        assert_eq!(clamped.size, Size::new(1820, 980));
        assert_eq!(clamped.position, Some(Position::new(50, 50)));
    }

    #[test]
    fn test_clamp_without_displays_is_none() {
        assert!(clamp_to_displays(&placed(0, 0, 800, 600), &[]).is_none());
    }

    #[test]
    fn test_clamp_prefers_display_with_center() {
        let second = DisplayBounds {
            origin_x: 1920.0,
            origin_y: 0.0,
            width: 1280.0,
            height: 1024.0,
        };
        let clamped =
            clamp_to_displays(&placed(2000, 900, 600, 400), &[display(), second]).unwrap();
        let pos = clamped.position.unwrap();
        assert!(pos.x >= 1970);
        assert_eq!(pos.y, 1024 - 400 - 50);
    }
}
