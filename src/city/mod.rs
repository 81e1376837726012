//! City road network: geometry store, generator and viewing helpers
//!
//! Everything here is synchronous and owns its data; a [`CityMap`] is
//! rebuilt wholesale by [`generate_into`] or by the JSON loader.

mod camera;
mod city_map;
mod generator;
mod preview;
mod rng;
mod road_graph;
mod types;

pub use camera::{
    compute_bounds, Camera, FIT_PADDING_FACTOR, MAX_ZOOM, MIN_ZOOM, WHEEL_ZOOM_STEP,
};
pub use city_map::{validate_points, CityMap};
pub use generator::{generate, generate_into, GenerationReport};
pub use preview::render_preview;
pub use rng::CityRng;
pub use road_graph::{RoadGraph, Waypoint};
pub use types::{
    Bounds, Point, RoadSegment, BLOCK_SIZE_METERS, ENDPOINT_EPSILON,
};
