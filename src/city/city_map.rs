//! Geometry store for generated or loaded road networks

use log::trace;
use rand::seq::IndexedRandom;
use rand::Rng;

use super::types::{Point, RoadSegment};
use crate::error::{Result, SegmentError};

/// Smallest non-zero segment capacity
const MIN_CAPACITY: usize = 16;

/// Insertion-ordered collection of axis-aligned road segments
///
/// Rebuilt wholesale by the generator or the loader; there is no
/// partial-update API.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CityMap {
    segments: Vec<RoadSegment>,
}

impl CityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure room for `required` segments
    ///
    /// Grows to `max(capacity * 2, 16, required)` when short.
    pub fn reserve(&mut self, required: usize) -> Result<()> {
        let capacity = self.segments.capacity();
        if capacity >= required {
            return Ok(());
        }
        let new_capacity = (capacity * 2).max(MIN_CAPACITY).max(required);
        self.segments
            .try_reserve_exact(new_capacity - self.segments.len())?;
        trace!("city map capacity {} -> {}", capacity, new_capacity);
        Ok(())
    }

    /// Validate and append a copy of `points` as a new segment
    ///
    /// On validation failure the map is left untouched.
    pub fn add_segment(&mut self, id: i32, points: &[Point]) -> Result<()> {
        validate_points(id, points)?;

        let mut owned = Vec::new();
        owned.try_reserve_exact(points.len())?;
        owned.extend_from_slice(points);

        self.reserve(self.segments.len() + 1)?;
        self.segments.push(RoadSegment { id, points: owned });
        Ok(())
    }

    /// Drop every segment and release the backing storage
    pub fn clear(&mut self) {
        self.segments = Vec::new();
    }

    pub fn segments(&self) -> &[RoadSegment] {
        &self.segments
    }

    pub fn get(&self, index: usize) -> Option<&RoadSegment> {
        self.segments.get(index)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.segments.capacity()
    }

    /// Every vertex of every segment, in storage order
    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.segments.iter().flat_map(|segment| segment.points.iter())
    }

    /// Total road length in meters
    pub fn total_length(&self) -> f64 {
        self.segments.iter().map(RoadSegment::length).sum()
    }

    /// Pick a random road vertex, e.g. as a trip origin or destination
    pub fn sample_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Point> {
        let segment = self.segments.choose(rng)?;
        segment.points.choose(rng).copied()
    }
}

/// Check the point-count and axis-alignment rules for one segment
pub fn validate_points(id: i32, points: &[Point]) -> std::result::Result<(), SegmentError> {
    if points.len() < 2 {
        return Err(SegmentError::TooFewPoints {
            id,
            count: points.len(),
        });
    }
    match points
        .windows(2)
        .position(|pair| !pair[0].is_axis_step(&pair[1]))
    {
        Some(index) => Err(SegmentError::NotAxisAligned { id, index }),
        None => Ok(()),
    }
}
