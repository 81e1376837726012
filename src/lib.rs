//! City Road Network Library
//!
//! Deterministic street-layout generation, an in-memory geometry store and a
//! small JSON codec for persisting layouts.

pub mod city;
pub mod error;
pub mod json;

pub use error::{CityError, ParseError, SegmentError};
