//! Headless text rendering of a city map
//!
//! Stands in for a graphical viewer when running from a terminal. The map is
//! fitted with the same [`Camera`] a window would use, one character per
//! screen cell, north up.

use super::camera::Camera;
use super::city_map::CityMap;
use super::types::Point;

const EMPTY: char = ' ';
const HORIZONTAL: char = '-';
const VERTICAL: char = '|';
const JUNCTION: char = '+';

/// Draw `map` into a `columns` x `rows` character grid
pub fn render_preview(map: &CityMap, columns: usize, rows: usize) -> String {
    if columns == 0 || rows == 0 {
        return String::new();
    }

    let camera = Camera::fit_map(map, columns as f64, rows as f64);
    let mut grid = vec![vec![EMPTY; columns]; rows];

    // World y grows north, text rows grow downwards.
    let to_cell = |world: Point| -> (usize, usize) {
        let screen = camera.world_to_screen(world);
        let col = screen.x.floor().clamp(0.0, (columns - 1) as f64) as usize;
        let row = (rows as f64 - screen.y).floor().clamp(0.0, (rows - 1) as f64) as usize;
        (row, col)
    };

    for segment in map.segments() {
        for (from, to) in segment.runs() {
            let (row_a, col_a) = to_cell(from);
            let (row_b, col_b) = to_cell(to);

            if row_a == row_b {
                for col in col_a.min(col_b)..=col_a.max(col_b) {
                    stamp(&mut grid[row_a][col], HORIZONTAL);
                }
            } else {
                for row in row_a.min(row_b)..=row_a.max(row_b) {
                    stamp(&mut grid[row][col_a], VERTICAL);
                }
            }
        }
        for point in &segment.points {
            let (row, col) = to_cell(*point);
            grid[row][col] = JUNCTION;
        }
    }

    let mut out = String::with_capacity((columns + 1) * rows);
    for line in grid {
        let text: String = line.into_iter().collect();
        out.push_str(text.trim_end());
        out.push('\n');
    }
    out
}

fn stamp(cell: &mut char, stroke: char) {
    *cell = match *cell {
        EMPTY => stroke,
        existing if existing == stroke => stroke,
        _ => JUNCTION,
    };
}
