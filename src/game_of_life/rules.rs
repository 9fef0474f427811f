//! Conway's Game of Life transition rule

use super::Cell;

/// Fewest live neighbours a live cell needs to survive.
pub const SURVIVAL_MIN: u8 = 2;

/// Most live neighbours a live cell tolerates before dying.
pub const SURVIVAL_MAX: u8 = 3;

/// Exact live-neighbour count that brings a dead cell to life.
pub const BIRTH: u8 = 3;

/// Size of the Moore neighbourhood.
pub const MAX_NEIGHBOURS: u8 = 8;

/// `(dx, dy)` offsets of the Moore neighbourhood, excluding the cell itself.
pub const NEIGHBOUR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Game of Life rules engine
pub struct LifeRules;

impl LifeRules {
    /// Next state of a cell given its current state and live-neighbour count
    pub fn next_state(current: Cell, neighbours: u8) -> Cell {
        debug_assert!(Self::is_valid_neighbour_count(neighbours));
        match current {
            Cell::Alive if (SURVIVAL_MIN..=SURVIVAL_MAX).contains(&neighbours) => Cell::Alive,
            // Under- or overpopulation
            Cell::Alive => Cell::Dead,
            Cell::Dead if neighbours == BIRTH => Cell::Alive,
            Cell::Dead => Cell::Dead,
        }
    }

    /// Check if a neighbour count is valid (0-8)
    pub fn is_valid_neighbour_count(count: u8) -> bool {
        count <= MAX_NEIGHBOURS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_logic() {
        assert_eq!(LifeRules::next_state(Cell::Alive, 0), Cell::Dead);
        assert_eq!(LifeRules::next_state(Cell::Alive, 1), Cell::Dead);
        assert_eq!(LifeRules::next_state(Cell::Alive, 2), Cell::Alive);
        assert_eq!(LifeRules::next_state(Cell::Alive, 3), Cell::Alive);
        assert_eq!(LifeRules::next_state(Cell::Alive, 4), Cell::Dead);
        assert_eq!(LifeRules::next_state(Cell::Alive, 8), Cell::Dead);

        assert_eq!(LifeRules::next_state(Cell::Dead, 3), Cell::Alive);
        for n in [0, 1, 2, 4, 5, 6, 7, 8] {
            assert_eq!(LifeRules::next_state(Cell::Dead, n), Cell::Dead, "dead with {n}");
        }
    }

    #[test]
    fn test_neighbour_count_constants() {
        assert!(LifeRules::is_valid_neighbour_count(0));
        assert!(LifeRules::is_valid_neighbour_count(8));
        assert!(!LifeRules::is_valid_neighbour_count(9));
    }

    #[test]
    fn test_offsets_are_the_moore_neighbourhood() {
        assert_eq!(NEIGHBOUR_OFFSETS.len(), MAX_NEIGHBOURS as usize);
        assert!(!NEIGHBOUR_OFFSETS.contains(&(0, 0)));
        for (dx, dy) in NEIGHBOUR_OFFSETS {
            assert!(dx.abs() <= 1 && dy.abs() <= 1);
        }
    }
}
