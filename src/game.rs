//! Player movement and path reveal

use std::fmt;

use crate::error::{MazeError, Result};
use crate::grid::{CellKind, Direction, Grid, Point};
use crate::maze_generator::MazeGenerator;
use crate::path_finder::find_path;
use crate::Maze;

/// Game status
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Status {
    Playing,
    /// Player reached the goal, terminal
    Won,
}

/// Outcome of a single move
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum MoveResult {
    Moved,
    /// Wall or edge of the maze, the player stays put
    Blocked,
    /// Moved onto the goal
    Won,
}

/// One game session
///
/// Owns the maze grid, the player position and the path visibility flag.
/// The player is not written into the grid; the cell underneath keeps its
/// Open or Goal kind and [GameState::visible_kind] overlays the player.
pub struct GameState {
    grid: Grid,
    player: Point,
    goal: Point,
    path_visible: bool,
    status: Status,
}

impl GameState {
    /// Start a game in a freshly generated maze
    pub fn generate(width: usize, height: usize, seed: Option<u64>) -> Result<Self> {
        let maze = MazeGenerator::new(seed).generate_maze(width, height)?;
        Ok(Self::from_maze(maze))
    }

    /// Start a game with the player on the maze start
    pub fn from_maze(maze: Maze) -> Self {
        let status = if maze.start == maze.goal {
            Status::Won
        } else {
            Status::Playing
        };
        Self {
            grid: maze.grid,
            player: maze.start,
            goal: maze.goal,
            path_visible: false,
            status,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player_position(&self) -> Point {
        self.player
    }

    pub fn goal_position(&self) -> Point {
        self.goal
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn path_visible(&self) -> bool {
        self.path_visible
    }

    /// Cell kind to draw at `point`, with the player on top of the grid
    pub fn visible_kind(&self, point: Point) -> Result<CellKind> {
        let kind = self.grid.cell_kind(point)?;
        Ok(if point == self.player {
            CellKind::Player
        } else {
            kind
        })
    }

    /// Move the player one step
    ///
    /// A visible path is cleared first, whether or not the move succeeds.
    /// Moving into a wall or off the grid leaves the player in place.
    pub fn move_player(&mut self, direction: Direction) -> Result<MoveResult> {
        self.ensure_playing()?;
        self.hide_path();

        let target = self
            .grid
            .step(self.player, direction, 1)
            .filter(|&p| self.grid.cell_kind(p).is_ok_and(CellKind::is_passable));
        let Some(target) = target else {
            log::debug!("Move {:?} from {} blocked", direction, self.player);
            return Ok(MoveResult::Blocked);
        };

        self.player = target;
        if target == self.goal {
            log::info!("Player reached the goal at {}", target);
            self.status = Status::Won;
            Ok(MoveResult::Won)
        } else {
            Ok(MoveResult::Moved)
        }
    }

    /// Mark the path from the player to the goal
    ///
    /// Returns whether a path was found. Markers are placed on Open cells
    /// only, so the goal keeps its kind.
    pub fn reveal_path(&mut self) -> Result<bool> {
        self.ensure_playing()?;
        self.hide_path();

        let Some(path) = find_path(&self.grid, self.player, self.goal)? else {
            return Ok(false);
        };
        log::debug!("Revealing {} step path from {}", path.steps(), self.player);
        for point in path {
            if self.grid.cell_kind(point)? == CellKind::Open {
                self.grid.set_cell_kind(point, CellKind::PathMarker)?;
            }
        }
        self.path_visible = true;
        Ok(true)
    }

    /// Turn path markers back into open cells
    pub fn hide_path(&mut self) {
        if self.path_visible {
            self.grid.replace_all(CellKind::PathMarker, CellKind::Open);
            self.path_visible = false;
        }
    }

    fn ensure_playing(&self) -> Result<()> {
        match self.status {
            Status::Playing => Ok(()),
            Status::Won => Err(MazeError::AlreadyEnded),
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.grid.render_with_player(self.player))
    }
}
