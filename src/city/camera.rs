//! Bounds and fit-to-window camera math for map viewers
//!
//! The transform is a uniform scale plus offset, no rotation:
//! `screen = world * zoom + offset`.

use super::city_map::CityMap;
use super::types::{Bounds, Point};

/// Extra room around the map when fitting it to a window
pub const FIT_PADDING_FACTOR: f64 = 1.10;

pub const MIN_ZOOM: f64 = 1e-4;
pub const MAX_ZOOM: f64 = 1e6;

/// Zoom multiplier per wheel notch
pub const WHEEL_ZOOM_STEP: f64 = 1.15;

/// Min/max over every point of every segment, or the unit box for an empty map
pub fn compute_bounds(map: &CityMap) -> Bounds {
    let mut points = map.points();
    let Some(first) = points.next() else {
        return Bounds::UNIT;
    };

    let mut bounds = Bounds {
        min: *first,
        max: *first,
    };
    for point in points {
        bounds.min.x = bounds.min.x.min(point.x);
        bounds.min.y = bounds.min.y.min(point.y);
        bounds.max.x = bounds.max.x.max(point.x);
        bounds.max.y = bounds.max.y.max(point.y);
    }
    bounds
}

/// 2D view transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub offset: Point,
    pub zoom: f64,
}

impl Camera {
    /// Identity zoom with the world origin at the window center
    pub fn centered(screen_width: f64, screen_height: f64) -> Self {
        Self {
            offset: Point::new(screen_width * 0.5, screen_height * 0.5),
            zoom: 1.0,
        }
    }

    /// Largest zoom that shows all of `bounds` with 10% padding, centered
    pub fn fit(bounds: &Bounds, screen_width: f64, screen_height: f64) -> Self {
        let mut width = bounds.width();
        let mut height = bounds.height();
        if width <= 0.0 {
            width = 1.0;
        }
        if height <= 0.0 {
            height = 1.0;
        }
        width *= FIT_PADDING_FACTOR;
        height *= FIT_PADDING_FACTOR;

        let mut zoom = (screen_width / width).min(screen_height / height);
        if zoom <= 0.0 || zoom.is_nan() {
            zoom = 1.0;
        }

        let center = bounds.center();
        Self {
            offset: Point::new(
                screen_width * 0.5 - center.x * zoom,
                screen_height * 0.5 - center.y * zoom,
            ),
            zoom,
        }
    }

    /// Fit the whole map into a window
    pub fn fit_map(map: &CityMap, screen_width: f64, screen_height: f64) -> Self {
        Self::fit(&compute_bounds(map), screen_width, screen_height)
    }

    pub fn world_to_screen(&self, world: Point) -> Point {
        Point::new(
            world.x * self.zoom + self.offset.x,
            world.y * self.zoom + self.offset.y,
        )
    }

    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.offset.x) / self.zoom,
            (screen.y - self.offset.y) / self.zoom,
        )
    }

    /// Drag the view by a screen-space delta
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.offset.x += dx;
        self.offset.y += dy;
    }

    /// Apply `wheel` notches of zoom, keeping the world point under `cursor` fixed
    pub fn zoom_at(&mut self, cursor: Point, wheel: f64) {
        if wheel == 0.0 {
            return;
        }
        let anchor = self.screen_to_world(cursor);
        self.zoom = (self.zoom * WHEEL_ZOOM_STEP.powf(wheel)).clamp(MIN_ZOOM, MAX_ZOOM);
        self.offset = Point::new(
            cursor.x - anchor.x * self.zoom,
            cursor.y - anchor.y * self.zoom,
        );
    }
}
