//! Walk out of a randomly generated maze
//!
//! Mazes are carved by randomized depth-first search, so every two open
//! cells are joined by exactly one simple path. A [GameState] moves the
//! player through the maze and can reveal the way to the goal.
//!
//! # Examples
//! ## Generate and solve
//! ```
//! use maze_game::maze_generator::MazeGenerator;
//!
//! let maze = MazeGenerator::new(Some(13)).generate_maze(11, 7).unwrap();
//! let path = maze.solve().unwrap().unwrap();
//! assert_eq!(path.first(), Some(maze.start));
//! assert_eq!(path.last(), Some(maze.goal));
//! println!("{}", maze);
//! ```
//!
//! ## Play
//! ```
//! use maze_game::{Direction, GameState, Maze, MoveResult, Status};
//!
//! let maze = Maze::parse("#####\n#P F#\n#####").unwrap();
//! let mut game = GameState::from_maze(maze);
//! assert_eq!(game.move_player(Direction::Up).unwrap(), MoveResult::Blocked);
//! assert_eq!(game.move_player(Direction::Right).unwrap(), MoveResult::Moved);
//! assert_eq!(game.move_player(Direction::Right).unwrap(), MoveResult::Won);
//! assert_eq!(game.status(), Status::Won);
//! ```

use std::fmt;

pub mod error;
pub mod game;
pub mod grid;
pub mod maze_generator;
pub mod path_finder;

pub use error::{MazeError, Result};
pub use game::{GameState, MoveResult, Status};
pub use grid::{CellKind, Direction, Grid, Point};
pub use path_finder::{find_path, Path};

/// A grid together with the player start and the goal
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Maze {
    /// Cell kinds; the start is stored as Open
    pub grid: Grid,
    /// Where the player begins
    pub start: Point,
    /// The single Goal cell
    pub goal: Point,
}

impl Maze {
    /// Parse maze representation from string
    ///
    /// - `text`: One line per row, using the glyphs of [CellKind::glyph].
    ///   Exactly one `P` (player start) and one `F` (goal) are required.
    ///
    /// Returns error, if maze contains unknown characters, rows differ in
    /// length, or the dimensions are not odd.
    ///
    /// # Examples
    /// ```
    /// use maze_game::{CellKind, Maze, Point};
    /// let text = "
    /// ########
    /// #P    #
    /// #### # #
    /// ##   #F#
    /// ########";
    /// let maze = Maze::parse(text.trim()).unwrap();
    /// assert_eq!(maze.start, Point::new(1, 1));
    /// assert_eq!(maze.grid.cell_kind(maze.start), Ok(CellKind::Open));
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let rows: Vec<Vec<char>> = text.lines().map(|row| row.chars().collect()).collect();
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut grid = Grid::new(width, height)?;

        let mut start = None;
        let mut goal = None;
        for (row, chars) in rows.iter().enumerate() {
            if chars.len() != width {
                return Err(MazeError::RaggedRows {
                    row,
                    found: chars.len(),
                    expected: width,
                });
            }
            for (col, &glyph) in chars.iter().enumerate() {
                let point = Point { row, col };
                let kind = CellKind::from_glyph(glyph)
                    .ok_or(MazeError::UnexpectedGlyph { glyph, row, col })?;

                // Find special squares
                let kind = match kind {
                    CellKind::Player => {
                        if start.replace(point).is_some() {
                            return Err(MazeError::DuplicateMarker(glyph));
                        }
                        CellKind::Open
                    }
                    CellKind::Goal => {
                        if goal.replace(point).is_some() {
                            return Err(MazeError::DuplicateMarker(glyph));
                        }
                        CellKind::Goal
                    }
                    kind => kind,
                };
                grid.set_cell_kind(point, kind)?;
            }
        }

        Ok(Maze {
            grid,
            start: start.ok_or(MazeError::MissingStart)?,
            goal: goal.ok_or(MazeError::MissingGoal)?,
        })
    }

    /// Find the path from the start to the goal
    pub fn solve(&self) -> Result<Option<Path>> {
        find_path(&self.grid, self.start, self.goal)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.grid.render_with_player(self.start))
    }
}
