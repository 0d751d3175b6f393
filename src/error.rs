use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("Invalid maze dimensions {width}x{height}, both must be odd and large enough to hold two rooms")]
    InvalidDimension { width: usize, height: usize },
    #[error("Cell at row={row}, col={col} is outside the maze")]
    OutOfBounds { row: usize, col: usize },
    #[error("Unexpected character `{glyph}` at row={row}, col={col}")]
    UnexpectedGlyph { glyph: char, row: usize, col: usize },
    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("Player start is not found in maze")]
    MissingStart,
    #[error("Goal is not found in maze")]
    MissingGoal,
    #[error("Maze contains more than one `{0}`")]
    DuplicateMarker(char),
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, MazeError>;
