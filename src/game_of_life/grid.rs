//! Grid representation and stepping for Game of Life

use super::error::GridError;
use super::rules::{LifeRules, NEIGHBOUR_OFFSETS};
use itertools::iproduct;
use rayon::prelude::*;
use std::fmt;

/// State of a single cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    Alive,
    #[default]
    Dead,
}

impl Cell {
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }
}

/// A fixed-size Game of Life grid with clipped boundaries.
///
/// Cells are stored row-major. Reads outside the grid see a dead border;
/// writes outside the grid are rejected. `step` evaluates every cell against
/// the current snapshot into a second buffer and swaps the two afterwards.
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    next: Vec<Cell>,
    generation: u64,
}

impl Grid {
    /// Create a new grid with every cell dead at generation 0
    ///
    /// Both dimensions must be positive and the cell count must fit in an
    /// `isize`, so every cell stays addressable by signed coordinates.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        let len = width
            .checked_mul(height)
            .filter(|&len| len > 0 && len <= isize::MAX as usize)
            .ok_or(GridError::InvalidDimension {
                width: i64::try_from(width).unwrap_or(i64::MAX),
                height: i64::try_from(height).unwrap_or(i64::MAX),
            })?;

        Ok(Self {
            width,
            height,
            cells: vec![Cell::Dead; len],
            next: vec![Cell::Dead; len],
            generation: 0,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of steps taken since construction
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Row-major index for a coordinate, or `None` outside the grid
    #[inline]
    fn index(&self, x: isize, y: isize) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Get cell state at coordinates; anything outside the grid is dead
    pub fn get_state(&self, x: isize, y: isize) -> Cell {
        self.index(x, y).map_or(Cell::Dead, |idx| self.cells[idx])
    }

    /// Set cell state at coordinates
    pub fn set(&mut self, x: isize, y: isize, cell: Cell) -> Result<(), GridError> {
        let idx = self.index(x, y).ok_or(GridError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        })?;
        self.cells[idx] = cell;
        Ok(())
    }

    pub fn set_alive(&mut self, x: isize, y: isize) -> Result<(), GridError> {
        self.set(x, y, Cell::Alive)
    }

    pub fn set_dead(&mut self, x: isize, y: isize) -> Result<(), GridError> {
        self.set(x, y, Cell::Dead)
    }

    /// Count living cells in the Moore neighbourhood of `(x, y)`
    pub fn count_alive_neighbours(&self, x: isize, y: isize) -> u8 {
        NEIGHBOUR_OFFSETS
            .iter()
            .filter(|&&(dx, dy)| {
                self.get_state(x.saturating_add(dx), y.saturating_add(dy))
                    .is_alive()
            })
            .count() as u8
    }

    fn next_state(&self, x: usize, y: usize) -> Cell {
        let (x, y) = (x as isize, y as isize);
        LifeRules::next_state(self.get_state(x, y), self.count_alive_neighbours(x, y))
    }

    /// Advance one generation
    pub fn step(&mut self) {
        let mut next = std::mem::take(&mut self.next);
        let width = self.width;

        for (idx, cell) in next.iter_mut().enumerate() {
            *cell = self.next_state(idx % width, idx / width);
        }

        self.commit(next);
    }

    /// Advance one generation, computing rows on the rayon pool.
    ///
    /// Workers only read the current snapshot and each writes its own row of
    /// the next buffer, so the result is identical to [`Grid::step`].
    pub fn step_parallel(&mut self) {
        let mut next = std::mem::take(&mut self.next);
        let current = &*self;

        next.par_chunks_mut(current.width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, cell) in row.iter_mut().enumerate() {
                    *cell = current.next_state(x, y);
                }
            });

        self.commit(next);
    }

    fn commit(&mut self, next: Vec<Cell>) {
        self.next = std::mem::replace(&mut self.cells, next);
        self.generation += 1;
    }

    /// Coordinates `(x, y)` of all living cells in row-major order
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        iproduct!(0..self.height, 0..self.width)
            .filter(|&(y, x)| self.cells[y * self.width + x].is_alive())
            .map(|(y, x)| (x, y))
            .collect()
    }

    /// Count total living cells
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Check if the grid is empty (no living cells)
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_alive())
    }

    /// Same dimensions and cell states, regardless of generation
    pub fn same_cells(&self, other: &Grid) -> bool {
        self.width == other.width && self.height == other.height && self.cells == other.cells
    }

    /// Read-only view of the current cells, row-major
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.same_cells(other) && self.generation == other.generation
    }
}

impl Eq for Grid {}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for cell in row {
                write!(f, "{}", if cell.is_alive() { '#' } else { '.' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(width: usize, height: usize, alive: &[(isize, isize)]) -> Grid {
        let mut grid = Grid::new(width, height).unwrap();
        for &(x, y) in alive {
            grid.set_alive(x, y).unwrap();
        }
        grid
    }

    #[test]
    fn test_grid_creation() {
        for (w, h) in [(1, 1), (3, 3), (7, 2), (2, 9)] {
            let grid = Grid::new(w, h).unwrap();
            assert_eq!(grid.width(), w);
            assert_eq!(grid.height(), h);
            assert_eq!(grid.generation(), 0);
            assert!(grid.is_empty());
            for y in 0..h as isize {
                for x in 0..w as isize {
                    assert_eq!(grid.get_state(x, y), Cell::Dead);
                }
            }
        }
    }

    #[test]
    fn test_invalid_dimensions() {
        assert_eq!(
            Grid::new(0, 5).unwrap_err(),
            GridError::InvalidDimension { width: 0, height: 5 }
        );
        assert!(Grid::new(5, 0).is_err());
        assert!(Grid::new(0, 0).is_err());
    }

    #[test]
    fn test_oversized_dimensions_are_rejected() {
        // width * height overflows usize
        assert_eq!(
            Grid::new(1 << (usize::BITS - 2), 8).unwrap_err(),
            GridError::InvalidDimension {
                width: 1 << (usize::BITS - 2),
                height: 8,
            }
        );
        assert!(Grid::new(usize::MAX, usize::MAX).is_err());
        // Fits in usize but not in isize
        assert!(Grid::new(isize::MAX as usize, 2).is_err());
    }

    #[test]
    fn test_sentinel_border() {
        let mut grid = Grid::new(3, 3).unwrap();
        for y in 0..3 {
            for x in 0..3 {
                grid.set_alive(x, y).unwrap();
            }
        }

        let outside = [(-1, -1), (-1, 0), (3, 0), (0, 3), (3, 3), (isize::MIN, 1), (1, isize::MAX)];
        for (x, y) in outside {
            assert_eq!(grid.get_state(x, y), Cell::Dead, "({x}, {y})");
        }
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut grid = Grid::new(4, 3).unwrap();

        assert_eq!(
            grid.set_alive(-1, -1),
            Err(GridError::OutOfBounds { x: -1, y: -1, width: 4, height: 3 })
        );
        assert!(grid.set_alive(4, 0).is_err());
        assert!(grid.set_alive(0, 3).is_err());
        assert!(grid.set_dead(0, -1).is_err());
        assert!(grid.is_empty());
    }

    #[test]
    fn test_set_changes_exactly_one_cell() {
        let mut grid = Grid::new(4, 4).unwrap();
        grid.set_alive(2, 1).unwrap();
        assert_eq!(grid.living_cells(), vec![(2, 1)]);

        // Idempotent
        grid.set_alive(2, 1).unwrap();
        assert_eq!(grid.living_cells(), vec![(2, 1)]);

        grid.set_alive(0, 3).unwrap();
        grid.set_dead(2, 1).unwrap();
        assert_eq!(grid.living_cells(), vec![(0, 3)]);
        assert_eq!(grid.generation(), 0);
    }

    #[test]
    fn test_neighbour_counting() {
        let mut grid = Grid::new(3, 3).unwrap();
        for y in 0..3 {
            for x in 0..3 {
                if (x, y) != (1, 1) {
                    grid.set_alive(x, y).unwrap();
                }
            }
        }

        assert_eq!(grid.count_alive_neighbours(1, 1), 8);
        // Corner sees only in-grid neighbours, centre is dead
        assert_eq!(grid.count_alive_neighbours(0, 0), 2);
        // Coordinates off the grid still count their in-grid neighbours
        assert_eq!(grid.count_alive_neighbours(-1, -1), 1);

        for y in -2..5 {
            for x in -2..5 {
                assert!(LifeRules::is_valid_neighbour_count(grid.count_alive_neighbours(x, y)));
            }
        }
    }

    #[test]
    fn test_corner_has_no_phantom_neighbours() {
        let grid = grid_with(5, 5, &[(0, 0)]);
        assert_eq!(grid.count_alive_neighbours(0, 0), 0);

        let grid = grid_with(5, 5, &[(0, 0), (1, 0), (0, 1), (1, 1)]);
        assert_eq!(grid.count_alive_neighbours(0, 0), 3);
    }

    #[test]
    fn test_still_life_block() {
        let mut grid = grid_with(6, 6, &[(2, 2), (3, 2), (2, 3), (3, 3)]);
        let before = grid.clone();

        grid.step();

        assert!(grid.same_cells(&before));
        assert_eq!(grid.generation(), 1);
        assert_ne!(grid, before);
    }

    #[test]
    fn test_oscillator_blinker() {
        let mut grid = grid_with(5, 5, &[(1, 2), (2, 2), (3, 2)]);
        let original = grid.clone();

        grid.step();
        assert_eq!(grid.living_cells(), vec![(2, 1), (2, 2), (2, 3)]);

        grid.step();
        assert!(grid.same_cells(&original));
        assert_eq!(grid.generation(), 2);
    }

    #[test]
    fn test_extinction() {
        let mut grid = grid_with(5, 5, &[(2, 2)]);
        grid.step();
        assert!(grid.is_empty());

        let mut empty = Grid::new(4, 7).unwrap();
        for _ in 0..10 {
            empty.step();
        }
        assert!(empty.is_empty());
        assert_eq!(empty.generation(), 10);
    }

    #[test]
    fn test_step_uses_previous_snapshot() {
        // An L-tromino becomes a block; updating in place would also birth
        // cells from already-updated neighbours.
        let mut grid = grid_with(4, 4, &[(1, 1), (2, 1), (1, 2)]);
        grid.step();
        assert_eq!(grid.living_cells(), vec![(1, 1), (2, 1), (1, 2), (2, 2)]);
    }

    #[test]
    fn test_glider_clipped_at_boundary() {
        // A glider heading into the corner degrades into a block instead of wrapping
        let mut grid = grid_with(4, 4, &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]);
        for _ in 0..8 {
            grid.step();
        }
        assert_eq!(grid.living_cells(), vec![(2, 2), (3, 2), (2, 3), (3, 3)]);
    }

    #[test]
    fn test_parallel_step_matches_serial() {
        let mut serial = Grid::new(23, 17).unwrap();
        for y in 0..17 {
            for x in 0..23 {
                if (x * 7 + y * 13) % 5 < 2 {
                    serial.set_alive(x, y).unwrap();
                }
            }
        }
        let mut parallel = serial.clone();

        for _ in 0..12 {
            serial.step();
            parallel.step_parallel();
            assert_eq!(serial, parallel);
        }
    }

    #[test]
    fn test_display() {
        let grid = grid_with(3, 2, &[(0, 0), (2, 1)]);
        assert_eq!(grid.to_string(), "#..\n..#\n");
    }
}
