//! The playfield and the generation step.

use crate::patterns::Pattern;

/// Columns on the panel.
pub const WIDTH: usize = 32;
/// Rows on the panel; one bit of a column byte each.
pub const HEIGHT: usize = 8;

/// A toroidal 32x8 bit field, stored column-major the way the panel is
/// addressed: bit `y` of `columns[x]` is the cell in column `x`, row `y`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Grid {
    columns: [u8; WIDTH],
}

impl Grid {
    pub const fn new() -> Self {
        Grid {
            columns: [0; WIDTH],
        }
    }

    pub const fn from_columns(columns: [u8; WIDTH]) -> Self {
        Grid { columns }
    }

    pub fn columns(&self) -> &[u8; WIDTH] {
        &self.columns
    }

    pub fn clear(&mut self) {
        self.columns = [0; WIDTH];
    }

    /// Cell state; coordinates wrap in both directions.
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.columns[x % WIDTH] & (1 << (y % HEIGHT)) != 0
    }

    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        let bit = 1 << (y % HEIGHT);
        if alive {
            self.columns[x % WIDTH] |= bit;
        } else {
            self.columns[x % WIDTH] &= !bit;
        }
    }

    /// Live cells among the eight surrounding `(x, y)`, across the edges.
    pub fn neighbours(&self, x: usize, y: usize) -> u8 {
        let mut count = 0;
        for dx in [WIDTH - 1, 0, 1] {
            for dy in [HEIGHT - 1, 0, 1] {
                if (dx, dy) != (0, 0) && self.is_alive(x + dx, y + dy) {
                    count += 1;
                }
            }
        }
        count
    }

    pub fn population(&self) -> u32 {
        self.columns.iter().map(|c| c.count_ones()).sum()
    }

    /// The next generation. A cell with exactly three live neighbours is
    /// alive next; one with exactly four stays alive only if it already was.
    /// Everything else dies or stays empty.
    pub fn step(&self) -> Grid {
        let mut next = Grid::new();
        for x in 0..WIDTH {
            for y in 0..HEIGHT {
                let alive = match self.neighbours(x, y) {
                    3 => true,
                    4 => self.is_alive(x, y),
                    _ => false,
                };
                if alive {
                    next.columns[x] |= 1 << y;
                }
            }
        }
        next
    }
}

/// Owns the current generation.
#[derive(Debug, Default)]
pub struct LifeEngine {
    grid: Grid,
    generation: u32,
}

impl LifeEngine {
    pub const fn new() -> Self {
        LifeEngine {
            grid: Grid::new(),
            generation: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Generations computed since the last seed or restore.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Advance one generation in place.
    pub fn step(&mut self) {
        self.grid = self.grid.step();
        self.generation = self.generation.wrapping_add(1);
    }

    /// Clear the grid and stamp `pattern` with its first column at `column`,
    /// every column byte shifted down by `shift` rows. Bits shifted past the
    /// bottom row are lost.
    pub fn seed(&mut self, pattern: &Pattern, column: usize, shift: u8) {
        self.grid.clear();
        for (n, bits) in pattern.columns.iter().enumerate() {
            self.grid.columns[(column + n) % WIDTH] =
                bits.checked_shl(u32::from(shift)).unwrap_or(0);
        }
        self.generation = 0;
    }

    /// Replace the grid wholesale, e.g. with one read back from storage.
    pub fn restore(&mut self, grid: Grid) {
        self.grid = grid;
        self.generation = 0;
    }
}
