//! Cell storage and geometry of the maze

use std::fmt;

use itertools::Itertools;

use crate::error::{MazeError, Result};

/// What occupies a single square of the maze
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum CellKind {
    Wall,
    Open,
    /// Overlay only, the grid underneath the player stays Open or Goal
    Player,
    Goal,
    /// Part of a revealed solution path
    PathMarker,
}

impl CellKind {
    const S_WALL: char = '#';
    const S_OPEN: char = ' ';
    const S_PLAYER: char = 'P';
    const S_GOAL: char = 'F';
    const S_PATH: char = '.';

    /// Whether the player may step into a cell of this kind
    pub fn is_passable(self) -> bool {
        matches!(self, CellKind::Open | CellKind::Goal)
    }

    /// Character used to draw this kind on a terminal
    pub fn glyph(self) -> char {
        match self {
            CellKind::Wall => Self::S_WALL,
            CellKind::Open => Self::S_OPEN,
            CellKind::Player => Self::S_PLAYER,
            CellKind::Goal => Self::S_GOAL,
            CellKind::PathMarker => Self::S_PATH,
        }
    }

    /// Inverse of [CellKind::glyph]
    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            Self::S_WALL => Some(CellKind::Wall),
            Self::S_OPEN => Some(CellKind::Open),
            Self::S_PLAYER => Some(CellKind::Player),
            Self::S_GOAL => Some(CellKind::Goal),
            Self::S_PATH => Some(CellKind::PathMarker),
            _ => None,
        }
    }
}

/// Location in the maze, addressed as (row, col)
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Rooms are the cells with both coordinates odd
    pub fn is_room(self) -> bool {
        self.row % 2 == 1 && self.col % 2 == 1
    }

    /// Point halfway between `self` and `other`
    pub fn midpoint(self, other: Point) -> Point {
        Point {
            row: (self.row + other.row) / 2,
            col: (self.col + other.col) / 2,
        }
    }

    /// Whether `other` is exactly one step up, down, left or right
    pub fn is_adjacent(self, other: Point) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Movement direction
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Fixed exploration order used by the path finder
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Row and column delta of a single step
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Rectangular array of cell kinds
///
/// Both dimensions are odd and at least 3, so that odd coordinates are
/// rooms and the cells between them are doors or walls.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Vec<CellKind>>,
}

impl Grid {
    /// Create a grid filled with walls
    ///
    /// Returns [MazeError::InvalidDimension] if either dimension is even or
    /// smaller than 3.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if !Self::is_valid_dimension(width) || !Self::is_valid_dimension(height) {
            return Err(MazeError::InvalidDimension { width, height });
        }
        let cells = (0..height)
            .map(|_| (0..width).map(|_| CellKind::Wall).collect())
            .collect();
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    fn is_valid_dimension(size: usize) -> bool {
        size >= 3 && size % 2 == 1
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, point: Point) -> bool {
        point.row < self.height && point.col < self.width
    }

    pub fn cell_kind(&self, point: Point) -> Result<CellKind> {
        self.cells
            .get(point.row)
            .and_then(|row| row.get(point.col))
            .copied()
            .ok_or(MazeError::OutOfBounds {
                row: point.row,
                col: point.col,
            })
    }

    pub fn set_cell_kind(&mut self, point: Point, kind: CellKind) -> Result<()> {
        let cell = self
            .cells
            .get_mut(point.row)
            .and_then(|row| row.get_mut(point.col))
            .ok_or(MazeError::OutOfBounds {
                row: point.row,
                col: point.col,
            })?;
        *cell = kind;
        Ok(())
    }

    /// Walk `distance` cells from `point` towards `direction`
    ///
    /// Returns `None` if the destination falls outside the grid.
    pub fn step(&self, point: Point, direction: Direction, distance: usize) -> Option<Point> {
        let (dy, dx) = direction.offset();
        let row = point.row.checked_add_signed(dy * distance as isize)?;
        let col = point.col.checked_add_signed(dx * distance as isize)?;
        let target = Point { row, col };
        self.contains(target).then_some(target)
    }

    /// Number of cells of the given kind
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().flatten().filter(|&&k| k == kind).count()
    }

    /// Turn every cell of kind `from` into `to`, returning how many changed
    pub fn replace_all(&mut self, from: CellKind, to: CellKind) -> usize {
        let mut changed = 0;
        for cell in self.cells.iter_mut().flatten().filter(|k| **k == from) {
            *cell = to;
            changed += 1;
        }
        changed
    }

    /// All points of the grid in row-major order
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.height)
            .cartesian_product(0..self.width)
            .map(|(row, col)| Point { row, col })
    }

    /// Render the grid with the player drawn over the cell at `player`
    pub fn render_with_player(&self, player: Point) -> String {
        self.render(Some(player))
    }

    fn render(&self, player: Option<Point>) -> String {
        self.cells
            .iter()
            .enumerate()
            .map(|(row, cells)| {
                cells
                    .iter()
                    .enumerate()
                    .map(|(col, &kind)| {
                        if player == Some(Point { row, col }) {
                            CellKind::Player.glyph()
                        } else {
                            kind.glyph()
                        }
                    })
                    .join("")
            })
            .join("\n")
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(None))
    }
}
