//! Core geometry types for the road network
//!
//! Plain data, no rendering or simulation dependencies.

/// Edge length of one city block in meters
pub const BLOCK_SIZE_METERS: f64 = 100.0;

/// Distance under which two road endpoints are treated as the same junction
pub const ENDPOINT_EPSILON: f64 = 1.0;

/// A 2D position in world space (meters)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// True when the step from `self` to `next` moves along exactly one axis
    pub fn is_axis_step(&self, next: &Point) -> bool {
        let dx = next.x - self.x;
        let dy = next.y - self.y;
        let horizontal = dy == 0.0 && dx != 0.0;
        let vertical = dx == 0.0 && dy != 0.0;
        horizontal || vertical
    }
}

/// A road polyline made of horizontal and vertical runs
#[derive(Debug, Clone, PartialEq)]
pub struct RoadSegment {
    pub id: i32,
    pub points: Vec<Point>,
}

impl RoadSegment {
    /// Sum of the run lengths
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| pair[0].distance(&pair[1]))
            .sum()
    }

    /// Consecutive point pairs, one per straight run
    pub fn runs(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

/// Axis-aligned rectangle covering a set of points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    /// The box reported for an empty map
    pub const UNIT: Bounds = Bounds {
        min: Point { x: 0.0, y: 0.0 },
        max: Point { x: 1.0, y: 1.0 },
    };

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        )
    }

    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Grow the box by `margin` on every side
    pub fn expanded(&self, margin: f64) -> Bounds {
        Bounds {
            min: Point::new(self.min.x - margin, self.min.y - margin),
            max: Point::new(self.max.x + margin, self.max.y + margin),
        }
    }
}
