//! Map generation

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::error::{MazeError, Result};
use crate::grid::{CellKind, Direction, Grid, Point};
use crate::Maze;

/// Perfect maze generator.
pub struct MazeGenerator {
    random: StdRng,
}

impl MazeGenerator {
    /// Room where carving begins and the player starts
    pub const START: Point = Point::new(1, 1);

    pub fn new(seed: Option<u64>) -> Self {
        Self {
            random: if let Some(state) = seed {
                StdRng::seed_from_u64(state)
            } else {
                StdRng::from_entropy()
            },
        }
    }

    /// Generate a perfect maze (every two open cells joined by exactly one
    /// simple path) and place the goal in a random room.
    ///
    /// Fails with [MazeError::InvalidDimension] unless both dimensions are
    /// odd and the grid holds at least one room besides the start.
    pub fn generate_maze(&mut self, width: usize, height: usize) -> Result<Maze> {
        let mut grid = Grid::new(width, height)?;
        if width < 5 && height < 5 {
            return Err(MazeError::InvalidDimension { width, height });
        }

        grid.set_cell_kind(Self::START, CellKind::Open)?;
        self.carve(&mut grid)?;
        let goal = self.place_goal(&mut grid)?;

        log::debug!(
            "Generated {}x{} maze with {} open cells, goal at {}",
            width,
            height,
            grid.count(CellKind::Open) + 1,
            goal
        );
        Ok(Maze {
            grid,
            start: Self::START,
            goal,
        })
    }

    /// Randomized depth-first carving with an explicit stack
    ///
    /// The top room stays on the stack until it has no walled-in room
    /// neighbours left, so each room is entered exactly once and the doors
    /// form a spanning tree over the rooms.
    fn carve(&mut self, grid: &mut Grid) -> Result<()> {
        let mut stack = vec![Self::START];

        while let Some(&current) = stack.last() {
            let neighbors = Self::unvisited_neighbors(grid, current)?;
            if let Some(&next) = neighbors.choose(&mut self.random) {
                grid.set_cell_kind(current.midpoint(next), CellKind::Open)?;
                grid.set_cell_kind(next, CellKind::Open)?;
                stack.push(next);
            } else {
                stack.pop();
            }
        }
        Ok(())
    }

    /// Rooms two cells away that are still walls
    fn unvisited_neighbors(grid: &Grid, room: Point) -> Result<Vec<Point>> {
        let mut neighbors = Vec::with_capacity(4);
        for direction in Direction::ALL {
            // Odd coordinates never land on the even-indexed border
            if let Some(next) = grid.step(room, direction, 2) {
                if grid.cell_kind(next)? == CellKind::Wall {
                    neighbors.push(next);
                }
            }
        }
        Ok(neighbors)
    }

    /// Sample rooms uniformly until an open one other than the start is hit
    fn place_goal(&mut self, grid: &mut Grid) -> Result<Point> {
        let rooms_per_col = grid.height() / 2;
        let rooms_per_row = grid.width() / 2;
        loop {
            let candidate = Point {
                row: 1 + 2 * self.random.gen_range(0..rooms_per_col),
                col: 1 + 2 * self.random.gen_range(0..rooms_per_row),
            };
            log::trace!("Goal candidate {}", candidate);
            if candidate != Self::START && grid.cell_kind(candidate)? == CellKind::Open {
                grid.set_cell_kind(candidate, CellKind::Goal)?;
                return Ok(candidate);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashSet, VecDeque};

    use crate::error::MazeError;
    use crate::grid::{CellKind, Direction, Grid, Point};
    use crate::maze_generator::MazeGenerator;
    use crate::Maze;

    const SIZES: [(usize, usize); 6] = [(5, 5), (7, 5), (5, 9), (11, 11), (21, 21), (3, 7)];

    /// Open cells reachable from `start`, flooding through passable cells
    fn reachable(grid: &Grid, start: Point) -> HashSet<Point> {
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(point) = queue.pop_front() {
            for direction in Direction::ALL {
                if let Some(next) = grid.step(point, direction, 1) {
                    if grid.cell_kind(next).unwrap().is_passable() && seen.insert(next) {
                        queue.push_back(next);
                    }
                }
            }
        }
        seen
    }

    fn open_doors(grid: &Grid) -> usize {
        grid.points()
            .filter(|p| !p.is_room())
            .filter(|&p| grid.cell_kind(p).unwrap().is_passable())
            .count()
    }

    #[test]
    fn generated_maze_is_spanning_tree() {
        for (width, height) in SIZES {
            for seed in 0..20 {
                let Maze { grid, start, goal } = MazeGenerator::new(Some(seed))
                    .generate_maze(width, height)
                    .unwrap();
                let rooms = (width / 2) * (height / 2);

                assert_eq!(open_doors(&grid), rooms - 1, "{width}x{height} seed {seed}");
                let reached = reachable(&grid, start);
                assert_eq!(reached.len(), 2 * rooms - 1);
                assert!(reached.contains(&goal));
            }
        }
    }

    #[test]
    fn start_is_open_and_single_goal() {
        for seed in 0..50 {
            let maze = MazeGenerator::new(Some(seed)).generate_maze(9, 7).unwrap();
            assert_eq!(maze.start, Point::new(1, 1));
            assert_eq!(maze.grid.cell_kind(maze.start), Ok(CellKind::Open));
            assert_eq!(maze.grid.count(CellKind::Goal), 1);
            assert_eq!(maze.grid.cell_kind(maze.goal), Ok(CellKind::Goal));
            assert!(maze.goal.is_room());
            assert_ne!(maze.goal, maze.start);
        }
    }

    #[test]
    fn smallest_maze_opens_door_from_start() {
        for seed in 0..20 {
            let maze = MazeGenerator::new(Some(seed)).generate_maze(5, 5).unwrap();
            let right = maze.grid.cell_kind(Point::new(1, 2)).unwrap();
            let down = maze.grid.cell_kind(Point::new(2, 1)).unwrap();
            assert!(right == CellKind::Open || down == CellKind::Open);
            // The centre is never carved
            assert_eq!(maze.grid.cell_kind(Point::new(2, 2)), Ok(CellKind::Wall));
        }
    }

    #[test]
    fn first_door_from_start_is_unbiased() {
        // On 5x5 the carving walks start -> first -> (3, 3) -> last, so the
        // door towards the last room is the one left walled
        let (mut right, mut down) = (0, 0);
        for seed in 0..200 {
            let maze = MazeGenerator::new(Some(seed)).generate_maze(5, 5).unwrap();
            let right_open = maze.grid.cell_kind(Point::new(1, 2)) == Ok(CellKind::Open);
            let down_open = maze.grid.cell_kind(Point::new(2, 1)) == Ok(CellKind::Open);
            assert!(right_open != down_open, "seed {seed}");
            if right_open {
                right += 1;
            } else {
                down += 1;
            }
        }
        assert!((70..=130).contains(&right), "right {right}, down {down}");
        assert!((70..=130).contains(&down), "right {right}, down {down}");
    }

    #[test]
    fn goal_room_is_unbiased() {
        let rooms = [Point::new(1, 3), Point::new(3, 1), Point::new(3, 3)];
        let mut tally = [0; 3];
        for seed in 0..300 {
            let maze = MazeGenerator::new(Some(seed)).generate_maze(5, 5).unwrap();
            let index = rooms.iter().position(|&r| r == maze.goal).unwrap();
            tally[index] += 1;
        }
        for count in tally {
            assert!((60..=140).contains(&count), "goal tally {tally:?}");
        }
    }

    #[test]
    fn border_stays_walled() {
        let maze = MazeGenerator::new(Some(7)).generate_maze(15, 11).unwrap();
        for point in maze.grid.points() {
            if point.row == 0 || point.col == 0 || point.row == 10 || point.col == 14 {
                assert_eq!(maze.grid.cell_kind(point), Ok(CellKind::Wall));
            }
        }
    }

    #[test]
    fn same_seed_same_maze() {
        let a = MazeGenerator::new(Some(42)).generate_maze(21, 21).unwrap();
        let b = MazeGenerator::new(Some(42)).generate_maze(21, 21).unwrap();
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.goal, b.goal);
    }

    #[test]
    fn reject_single_room() {
        let mut gen = MazeGenerator::new(Some(0));
        assert_eq!(
            gen.generate_maze(3, 3).unwrap_err(),
            MazeError::InvalidDimension {
                width: 3,
                height: 3
            }
        );
        assert!(gen.generate_maze(6, 5).is_err());
    }
}
