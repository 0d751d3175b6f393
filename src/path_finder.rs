//! Depth-first path discovery over open cells

use crate::error::{MazeError, Result};
use crate::grid::{Direction, Grid, Point};

/// Ordered walk from a start cell to the goal, both inclusive
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Path {
    points: Vec<Point>,
}

impl Path {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of cells on the path
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of moves needed to walk the path
    pub fn steps(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    pub fn first(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.iter().copied()
    }
}

impl IntoIterator for Path {
    type Item = Point;
    type IntoIter = std::vec::IntoIter<Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

/// Cell on the search stack, with the index of the next direction to try
struct Frame {
    point: Point,
    next_direction: usize,
}

/// Find a path from `start` to `goal` by depth-first search
///
/// Neighbours are tried in the order of [Direction::ALL]. A neighbour is
/// entered when it lies inside the grid, has not been visited, and is
/// passable. The start cell itself need not be passable, since the player
/// stands on it.
///
/// Returns `Ok(None)` when the goal cannot be reached, and
/// [MazeError::OutOfBounds] if `start` or `goal` lie outside the grid.
pub fn find_path(grid: &Grid, start: Point, goal: Point) -> Result<Option<Path>> {
    for point in [start, goal] {
        if !grid.contains(point) {
            return Err(MazeError::OutOfBounds {
                row: point.row,
                col: point.col,
            });
        }
    }

    let mut visited = vec![vec![false; grid.width()]; grid.height()];
    visited[start.row][start.col] = true;
    let mut stack = vec![Frame {
        point: start,
        next_direction: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        if frame.point == goal {
            let points = stack.into_iter().map(|f| f.point).collect();
            return Ok(Some(Path { points }));
        }

        let Some(&direction) = Direction::ALL.get(frame.next_direction) else {
            // Exhausted, backtrack
            stack.pop();
            continue;
        };
        frame.next_direction += 1;

        let Some(next) = grid.step(frame.point, direction, 1) else {
            continue;
        };
        if !visited[next.row][next.col] && grid.cell_kind(next)?.is_passable() {
            visited[next.row][next.col] = true;
            stack.push(Frame {
                point: next,
                next_direction: 0,
            });
        }
    }

    log::debug!("No path from {} to {}", start, goal);
    Ok(None)
}
