//! JSON text to [`CityMap`]
//!
//! Fields are located by scanning sibling tokens and jumping over each value
//! by its end offset, so nested values never need a recursive walk. For
//! duplicate keys the first occurrence in document order wins.

use std::fs;
use std::path::Path;

use log::{debug, info};

use super::fields::{token_equals_str, token_to_f64, token_to_i32};
use super::tokenizer::{tokenize, Token, TokenKind};
use crate::city::{CityMap, Point};
use crate::error::{ParseError, Result};

/// Read and load the file at `path` into `map`
///
/// An unreadable file leaves `map` untouched; any later failure leaves it empty.
/// The contents are not required to be UTF-8.
pub fn load_from_path(path: impl AsRef<Path>, map: &mut CityMap) -> Result<()> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    load_from_bytes(&bytes, map)?;
    info!("loaded {} segments from {}", map.len(), path.display());
    Ok(())
}

/// Replace the contents of `map` with the segments in `text`
///
/// All or nothing: on any parse or validation failure `map` is left empty,
/// not restored to what it held before.
pub fn load_from_str(text: &str, map: &mut CityMap) -> Result<()> {
    load_from_bytes(text.as_bytes(), map)
}

/// [`load_from_str`] over raw bytes
pub fn load_from_bytes(text: &[u8], map: &mut CityMap) -> Result<()> {
    let result = load_segments(text, map);
    if let Err(e) = &result {
        debug!("city map load failed: {}", e);
        map.clear();
    }
    result
}

fn load_segments(text: &[u8], map: &mut CityMap) -> Result<()> {
    let tokens = tokenize(text)?;
    match tokens.first() {
        Some(root) if root.kind == TokenKind::Object => {}
        _ => return Err(ParseError::RootNotObject.into()),
    }

    let segments_index = (1..tokens.len().saturating_sub(1))
        .find(|&index| {
            tokens[index].parent == Some(0)
                && token_equals_str(text, &tokens[index], "segments")
                && tokens[index + 1].kind == TokenKind::Array
        })
        .map(|index| index + 1)
        .ok_or(ParseError::MissingSegments)?;

    map.clear();

    let reader = TokenReader {
        text,
        tokens: &tokens,
    };
    let segment_count = tokens[segments_index].size;
    let mut cursor = segments_index + 1;
    let mut points = Vec::new();

    for segment in 0..segment_count {
        let object = reader.get(cursor)?;
        if object.kind != TokenKind::Object {
            return Err(ParseError::SegmentNotObject { index: segment }.into());
        }

        let fields = reader.segment_fields(cursor);
        let id = fields.id.unwrap_or(segment as i32 + 1);
        let pts_index = fields
            .pts
            .ok_or(ParseError::MissingPoints { index: segment })?;
        if reader.tokens[pts_index].kind != TokenKind::Array {
            return Err(ParseError::MissingPoints { index: segment }.into());
        }

        reader.read_points(pts_index, segment, &mut points)?;
        map.add_segment(id, &points)?;

        cursor = reader.skip_value(cursor);
    }
    Ok(())
}

/// First occurrence of each known key inside one segment object
#[derive(Debug, Default)]
struct SegmentFields {
    id: Option<i32>,
    /// Token index of the `pts` value
    pts: Option<usize>,
}

struct TokenReader<'a> {
    text: &'a [u8],
    tokens: &'a [Token],
}

impl TokenReader<'_> {
    fn get(&self, index: usize) -> Result<&Token> {
        self.tokens
            .get(index)
            .ok_or_else(|| ParseError::Truncated.into())
    }

    /// Index of the first token after the value starting at `index`
    fn skip_value(&self, index: usize) -> usize {
        let end = self.tokens[index].end_offset();
        let mut next = index + 1;
        while next < self.tokens.len() && self.tokens[next].start < end {
            next += 1;
        }
        next
    }

    fn segment_fields(&self, object_index: usize) -> SegmentFields {
        let object_end = self.tokens[object_index].end_offset();
        let mut fields = SegmentFields::default();

        let mut index = object_index + 1;
        while index + 1 < self.tokens.len() && self.tokens[index].start < object_end {
            let key = &self.tokens[index];
            if key.kind != TokenKind::String || key.parent != Some(object_index) {
                index += 1;
                continue;
            }

            let value_index = index + 1;
            if token_equals_str(self.text, key, "id") {
                if fields.id.is_none() {
                    fields.id = Some(token_to_i32(self.text, &self.tokens[value_index]));
                }
            } else if token_equals_str(self.text, key, "pts") && fields.pts.is_none() {
                fields.pts = Some(value_index);
            }
            index = self.skip_value(value_index);
        }
        fields
    }

    /// Decode the `[[x, y], ...]` array at `pts_index` into `out`
    fn read_points(&self, pts_index: usize, segment: usize, out: &mut Vec<Point>) -> Result<()> {
        let count = self.tokens[pts_index].size;
        out.clear();
        out.try_reserve(count)?;

        let mut cursor = pts_index + 1;
        for point in 0..count {
            let malformed = || ParseError::MalformedPoint {
                index: segment,
                point,
            };
            if cursor + 2 >= self.tokens.len() {
                return Err(malformed().into());
            }

            let pair = &self.tokens[cursor];
            let x = &self.tokens[cursor + 1];
            let y = &self.tokens[cursor + 2];
            let is_coordinate =
                |token: &Token| token.kind == TokenKind::Primitive && token.parent == Some(cursor);
            if pair.kind != TokenKind::Array
                || pair.size != 2
                || !is_coordinate(x)
                || !is_coordinate(y)
            {
                return Err(malformed().into());
            }

            out.push(Point::new(
                token_to_f64(self.text, x),
                token_to_f64(self.text, y),
            ));
            cursor = self.skip_value(cursor);
        }
        Ok(())
    }
}
