use std::collections::HashSet;

use crate::grid::Grid;
use crate::log;
use crate::rng::GameRng;
use crate::types::Point;

const MAX_SAMPLE_ATTEMPTS: usize = 100;

/// Picks a uniformly random open cell for the next food.
///
/// Samples with a bounded attempt budget, then falls back to enumerating
/// the open cells, so the call always terminates. `None` means the board
/// is full and the game cannot continue.
pub fn place_food(grid: &Grid, occupied: &HashSet<Point>, rng: &mut GameRng) -> Option<Point> {
    if occupied.len() >= grid.cell_count() {
        return None;
    }

    for _ in 0..MAX_SAMPLE_ATTEMPTS {
        let cell = Point::new(
            rng.random_range(0..grid.width()),
            rng.random_range(0..grid.height()),
        );
        if grid.is_open(cell, occupied) {
            log!("Food placed at ({}, {})", cell.x, cell.y);
            return Some(cell);
        }
    }

    let open: Vec<Point> = grid.cells().filter(|cell| !occupied.contains(cell)).collect();
    if open.is_empty() {
        return None;
    }

    let cell = open[rng.random_range(0..open.len())];
    log!("Food placed at ({}, {}) after scan", cell.x, cell.y);
    Some(cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placed_food_is_on_an_open_cell() {
        let grid = Grid::new(20, 20);
        let occupied: HashSet<Point> =
            [Point::new(10, 10), Point::new(9, 10), Point::new(8, 10)]
                .into_iter()
                .collect();
        let mut rng = GameRng::new(1);

        for _ in 0..200 {
            let food = place_food(&grid, &occupied, &mut rng).unwrap();
            assert!(grid.in_bounds(food));
            assert!(!occupied.contains(&food));
        }
    }

    #[test]
    fn test_single_open_cell_is_always_found() {
        let grid = Grid::new(10, 10);
        let free = Point::new(7, 3);
        let occupied: HashSet<Point> = grid.cells().filter(|c| *c != free).collect();
        let mut rng = GameRng::new(2);

        assert_eq!(place_food(&grid, &occupied, &mut rng), Some(free));
    }

    #[test]
    fn test_full_board_yields_no_food() {
        let grid = Grid::new(4, 4);
        let occupied: HashSet<Point> = grid.cells().collect();
        let mut rng = GameRng::new(3);

        assert_eq!(place_food(&grid, &occupied, &mut rng), None);
    }
}
