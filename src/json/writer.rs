//! [`CityMap`] to JSON text
//!
//! The layout is fixed and is the only one the loader is tested against:
//! two-space indentation, one point per line, six decimals per coordinate.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::info;

use crate::city::CityMap;
use crate::error::Result;

/// Serialize `map` into any writer
pub fn write_city_map<W: Write>(map: &CityMap, out: &mut W) -> io::Result<()> {
    writeln!(out, "{{")?;
    writeln!(out, "  \"segments\": [")?;

    let segments = map.segments();
    for (segment_index, segment) in segments.iter().enumerate() {
        writeln!(out, "    {{")?;
        writeln!(out, "      \"id\": {},", segment.id)?;
        writeln!(out, "      \"pts\": [")?;

        for (point_index, point) in segment.points.iter().enumerate() {
            let separator = if point_index + 1 < segment.points.len() {
                ","
            } else {
                ""
            };
            writeln!(out, "        [{:.6}, {:.6}]{}", point.x, point.y, separator)?;
        }

        writeln!(out, "      ]")?;
        let separator = if segment_index + 1 < segments.len() {
            ","
        } else {
            ""
        };
        writeln!(out, "    }}{}", separator)?;
    }

    writeln!(out, "  ]")?;
    writeln!(out, "}}")?;
    Ok(())
}

/// Serialize `map` into a string
pub fn to_json_string(map: &CityMap) -> String {
    let mut buffer = Vec::new();
    write_city_map(map, &mut buffer).expect("writing to a Vec cannot fail");
    String::from_utf8(buffer).expect("the writer only emits ASCII")
}

/// Create or truncate the file at `path` and write `map` into it
pub fn save_to_path(map: &CityMap, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut out = BufWriter::new(File::create(path)?);
    write_city_map(map, &mut out)?;
    out.flush()?;
    info!("wrote {} segments to {}", map.len(), path.display());
    Ok(())
}
