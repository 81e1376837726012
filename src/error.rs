//! Error taxonomy for the road-network engine
//!
//! Library code never aborts the process: every failure is returned as a
//! [`CityError`] and the binary decides what to do with it.

use std::collections::TryReserveError;

use thiserror::Error;

/// Top-level error for store, generator and codec operations
#[derive(Error, Debug)]
pub enum CityError {
    #[error("invalid road segment: {0}")]
    Validation(#[from] SegmentError),

    #[error("malformed city map json: {0}")]
    Parse(#[from] ParseError),

    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("out of memory: {0}")]
    Resource(#[from] TryReserveError),
}

/// Why a segment was refused by the store
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SegmentError {
    #[error("segment {id} has {count} point(s), at least 2 are required")]
    TooFewPoints { id: i32, count: usize },

    #[error("segment {id} has a non axis-aligned step after point {index}")]
    NotAxisAligned { id: i32, index: usize },
}

/// Tokenizer and document-shape failures
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    #[error("token pool exhausted ({capacity} tokens)")]
    PoolExhausted { capacity: usize },

    #[error("unterminated string starting at byte {start}")]
    UnterminatedString { start: usize },

    #[error("control character at byte {offset}")]
    ControlCharacter { offset: usize },

    #[error("closing bracket at byte {offset} has no open container")]
    UnmatchedCloser { offset: usize },

    #[error("closing bracket at byte {offset} does not match its container")]
    MismatchedCloser { offset: usize },

    #[error("container opened at byte {start} is never closed")]
    UnclosedContainer { start: usize },

    #[error("document root is not an object")]
    RootNotObject,

    #[error("missing \"segments\" array")]
    MissingSegments,

    #[error("segment #{index} is not an object")]
    SegmentNotObject { index: usize },

    #[error("segment #{index} has no \"pts\" array")]
    MissingPoints { index: usize },

    #[error("point #{point} of segment #{index} is not an [x, y] pair")]
    MalformedPoint { index: usize, point: usize },

    #[error("document ended before all declared children were found")]
    Truncated,
}

pub type Result<T> = std::result::Result<T, CityError>;
