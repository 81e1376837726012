//! Procedural city layout generator
//!
//! The draw order below is part of the output contract: every phase consumes
//! the PRNG in a fixed sequence, so reordering anything changes every layout
//! produced from a given seed.

use log::{debug, info};

use super::city_map::CityMap;
use super::rng::CityRng;
use super::types::{Bounds, Point, BLOCK_SIZE_METERS};
use crate::error::{CityError, Result};

/// What a generation run produced, for logging and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationReport {
    pub columns: i32,
    pub rows: i32,
    pub arterial_step: i32,
    pub neighborhoods: i32,
    pub avenues: i32,
    pub spur_budget: i32,
    pub spurs_discarded: i32,
    pub segments: usize,
}

/// Build a fresh map from `seed`
pub fn generate(seed: u64) -> Result<CityMap> {
    let mut map = CityMap::new();
    generate_into(&mut map, seed)?;
    Ok(map)
}

/// Replace the contents of `map` with the layout for `seed`
///
/// On error the map is cleared, never left half-built.
pub fn generate_into(map: &mut CityMap, seed: u64) -> Result<GenerationReport> {
    map.clear();
    let result = CityGenerator::new(map, seed).run();
    match result {
        Ok(report) => {
            info!(
                "generated city for seed {}: {}x{} grid, {} segments ({} spurs discarded)",
                seed, report.columns, report.rows, report.segments, report.spurs_discarded
            );
            Ok(report)
        }
        Err(e) => {
            map.clear();
            Err(e)
        }
    }
}

/// Grid geometry plus the running PRNG and id counter
struct CityGenerator<'a> {
    map: &'a mut CityMap,
    rng: CityRng,
    next_id: i32,
    columns: i32,
    rows: i32,
    spacing: f64,
    origin: Point,
    total_width: f64,
    total_height: f64,
}

impl<'a> CityGenerator<'a> {
    fn new(map: &'a mut CityMap, seed: u64) -> Self {
        let mut rng = CityRng::new(seed);
        let columns = 10 + (rng.next_u32() % 6) as i32;
        let rows = 10 + (rng.next_u32() % 6) as i32;

        let spacing = BLOCK_SIZE_METERS;
        let total_width = f64::from(columns - 1) * spacing;
        let total_height = f64::from(rows - 1) * spacing;

        Self {
            map,
            rng,
            next_id: 1,
            columns,
            rows,
            spacing,
            origin: Point::new(-0.5 * total_width, -0.5 * total_height),
            total_width,
            total_height,
        }
    }

    fn run(mut self) -> Result<GenerationReport> {
        let arterial_step = 4 + (self.rng.next_u32() % 2) as i32;

        self.add_street_rows(arterial_step)?;
        self.add_street_columns(arterial_step)?;
        self.add_rings()?;
        let neighborhoods = self.add_neighborhoods()?;
        let avenues = self.add_avenues()?;
        let spur_budget = (self.columns * self.rows) / 6;
        let spurs_discarded = self.add_spurs(spur_budget)?;

        Ok(GenerationReport {
            columns: self.columns,
            rows: self.rows,
            arterial_step,
            neighborhoods,
            avenues,
            spur_budget,
            spurs_discarded,
            segments: self.map.len(),
        })
    }

    fn x_at(&self, column: i32) -> f64 {
        self.origin.x + f64::from(column) * self.spacing
    }

    fn y_at(&self, row: i32) -> f64 {
        self.origin.y + f64::from(row) * self.spacing
    }

    /// Insert with the next id; invalid geometry is skipped, resource errors abort
    fn emit(&mut self, points: &[Point]) -> Result<()> {
        let id = self.next_id;
        self.next_id += 1;
        match self.map.add_segment(id, points) {
            Ok(()) => Ok(()),
            Err(CityError::Validation(e)) => {
                debug!("skipping generated segment: {}", e);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn emit_rect(&mut self, left: f64, bottom: f64, right: f64, top: f64) -> Result<()> {
        self.emit(&[
            Point::new(left, bottom),
            Point::new(right, bottom),
            Point::new(right, top),
            Point::new(left, top),
            Point::new(left, bottom),
        ])
    }

    /// Horizontal streets: arterials at a fixed stride and the midline, short runs elsewhere
    fn add_street_rows(&mut self, arterial_step: i32) -> Result<()> {
        for row in 0..self.rows {
            let y = self.y_at(row);
            if row % arterial_step == 0 || row == self.rows / 2 {
                let start = Point::new(self.origin.x, y);
                let end = Point::new(self.origin.x + self.total_width, y);
                self.emit(&[start, end])?;
                continue;
            }

            let count = 1 + self.rng.next_u32() % 3;
            for _ in 0..count {
                let left = self.rng.range_int(0, self.columns - 2);
                let right = self.rng.range_int(left + 1, self.columns - 1);
                let start = Point::new(self.x_at(left), y);
                let end = Point::new(self.x_at(right), y);
                self.emit(&[start, end])?;
            }
        }
        Ok(())
    }

    fn add_street_columns(&mut self, arterial_step: i32) -> Result<()> {
        for column in 0..self.columns {
            let x = self.x_at(column);
            if column % arterial_step == 0 || column == self.columns / 2 {
                let start = Point::new(x, self.origin.y);
                let end = Point::new(x, self.origin.y + self.total_height);
                self.emit(&[start, end])?;
                continue;
            }

            let count = 1 + self.rng.next_u32() % 3;
            for _ in 0..count {
                let bottom = self.rng.range_int(0, self.rows - 2);
                let top = self.rng.range_int(bottom + 1, self.rows - 1);
                let start = Point::new(x, self.y_at(bottom));
                let end = Point::new(x, self.y_at(top));
                self.emit(&[start, end])?;
            }
        }
        Ok(())
    }

    /// Outer boundary, the ring one block inside it, and the loop around the center cell
    fn add_rings(&mut self) -> Result<()> {
        let (left, bottom) = (self.origin.x, self.origin.y);
        let right = left + self.total_width;
        let top = bottom + self.total_height;
        self.emit_rect(left, bottom, right, top)?;

        let inset = self.spacing;
        self.emit_rect(left + inset, bottom + inset, right - inset, top - inset)?;

        let center_x = self.x_at(self.columns / 2);
        let center_y = self.y_at(self.rows / 2);
        self.emit_rect(
            center_x - self.spacing,
            center_y - self.spacing,
            center_x + self.spacing,
            center_y + self.spacing,
        )
    }

    fn add_neighborhoods(&mut self) -> Result<i32> {
        let count = 6 + (self.rng.next_u32() % 6) as i32;
        for _ in 0..count {
            let left = self.rng.range_int(1, self.columns - 4);
            let bottom = self.rng.range_int(1, self.rows - 4);
            let width = self.rng.range_int(2, 4);
            let height = self.rng.range_int(2, 4);

            self.emit_rect(
                self.x_at(left),
                self.y_at(bottom),
                self.x_at(left + width),
                self.y_at(bottom + height),
            )?;
        }
        Ok(count)
    }

    /// Long straight roads spanning the middle third of the grid
    fn add_avenues(&mut self) -> Result<i32> {
        let count = (self.columns + self.rows) / 3;
        for _ in 0..count {
            let points = if self.rng.coin() {
                let row = self.rng.range_int(1, self.rows - 2);
                let left = self.rng.range_int(0, self.columns / 3);
                let right = self.rng.range_int((2 * self.columns) / 3, self.columns - 1);
                let y = self.y_at(row);
                [Point::new(self.x_at(left), y), Point::new(self.x_at(right), y)]
            } else {
                let column = self.rng.range_int(1, self.columns - 2);
                let bottom = self.rng.range_int(0, self.rows / 3);
                let top = self.rng.range_int((2 * self.rows) / 3, self.rows - 1);
                let x = self.x_at(column);
                [Point::new(x, self.y_at(bottom)), Point::new(x, self.y_at(top))]
            };
            self.emit(&points)?;
        }
        Ok(count)
    }

    /// Short stubs off random grid points; returns how many were discarded
    fn add_spurs(&mut self, budget: i32) -> Result<i32> {
        let allowed = Bounds {
            min: self.origin,
            max: Point::new(
                self.origin.x + self.total_width,
                self.origin.y + self.total_height,
            ),
        }
        .expanded(self.spacing);
        let half_block = self.spacing * 0.5;

        let mut discarded = 0;
        for _ in 0..budget {
            let column = self.rng.range_int(0, self.columns - 1);
            let row = self.rng.range_int(0, self.rows - 1);
            let direction = self.rng.range_int(0, 3);
            let length = f64::from(self.rng.range_int(2, 5)) * half_block;

            let base = Point::new(self.x_at(column), self.y_at(row));
            let mut tip = base;
            match direction {
                0 => tip.x += length,
                1 => tip.x -= length,
                2 => tip.y += length,
                _ => tip.y -= length,
            }

            let mut points = vec![base, tip];
            if !self.rng.coin() {
                let mut turn = tip;
                if direction < 2 {
                    match self.rng.range_int(2, 3) {
                        2 => turn.y += half_block,
                        _ => turn.y -= half_block,
                    }
                } else {
                    match self.rng.range_int(0, 1) {
                        0 => turn.x += half_block,
                        _ => turn.x -= half_block,
                    }
                }
                points.push(turn);
            }

            if points.iter().any(|point| !allowed.contains(point)) {
                discarded += 1;
                continue;
            }
            self.emit(&points)?;
        }
        Ok(discarded)
    }
}
