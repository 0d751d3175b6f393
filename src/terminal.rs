//! Terminal front-end: draws the maze and turns key presses into commands

use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEventKind},
    queue,
    style::Print,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use maze_game::{Direction, GameState, Point, Status};

/// Player input understood by the game
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Command {
    Move(Direction),
    RevealPath,
    Quit,
}

/// How the session ended
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Outcome {
    Won,
    Quit,
}

const HELP: [&str; 7] = [
    "Controls:",
    "W / Up arrow - Up",
    "A / Left arrow - Left",
    "S / Down arrow - Down",
    "D / Right arrow - Right",
    "F - Show path to finish",
    "Esc / Q - Quit",
];

pub fn command_for(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Char('w' | 'W') | KeyCode::Up => Some(Command::Move(Direction::Up)),
        KeyCode::Char('s' | 'S') | KeyCode::Down => Some(Command::Move(Direction::Down)),
        KeyCode::Char('a' | 'A') | KeyCode::Left => Some(Command::Move(Direction::Left)),
        KeyCode::Char('d' | 'D') | KeyCode::Right => Some(Command::Move(Direction::Right)),
        KeyCode::Char('f' | 'F') => Some(Command::RevealPath),
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => Some(Command::Quit),
        _ => None,
    }
}

/// Screen position of a maze cell
///
/// The maze is addressed as (row, col) everywhere else; the terminal wants
/// (column, line), so this is the one place where the axes are swapped.
fn screen_position(point: Point) -> (u16, u16) {
    (
        u16::try_from(point.col).unwrap_or(u16::MAX),
        u16::try_from(point.row).unwrap_or(u16::MAX),
    )
}

/// Raw mode on an alternate screen, restored when dropped
///
/// Dropping also happens while unwinding from a panic, so the terminal is
/// left usable whichever way the game loop exits.
struct Screen<W: Write> {
    out: W,
    active: bool,
}

impl<W: Write> Screen<W> {
    fn enter(out: W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut screen = Screen { out, active: true };
        screen.out.execute(EnterAlternateScreen)?;
        screen.out.execute(Hide)?;
        Ok(screen)
    }

    /// Run every restore step, then report the first failure
    fn restore(&mut self) -> io::Result<()> {
        self.active = false;
        let show = self.out.execute(Show).map(|_| ());
        let leave = self.out.execute(LeaveAlternateScreen).map(|_| ());
        let raw = terminal::disable_raw_mode();
        show.and(leave).and(raw)
    }
}

impl<W: Write> Drop for Screen<W> {
    fn drop(&mut self) {
        if self.active {
            if let Err(err) = self.restore() {
                log::error!("Failed to restore terminal: {}", err);
            }
        }
    }
}

/// Run the game until the player wins or quits
pub fn play(game: &mut GameState) -> anyhow::Result<Outcome> {
    let mut screen = Screen::enter(io::stdout())?;
    let result = run(&mut screen.out, game);
    screen.restore()?;
    result
}

fn run(out: &mut impl Write, game: &mut GameState) -> anyhow::Result<Outcome> {
    draw(out, game)?;
    loop {
        let code = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => key.code,
            Event::Resize(..) => {
                draw(out, game)?;
                continue;
            }
            _ => continue,
        };
        let Some(command) = command_for(code) else {
            continue;
        };

        match command {
            Command::Quit => return Ok(Outcome::Quit),
            Command::Move(direction) => {
                game.move_player(direction)?;
            }
            Command::RevealPath => {
                if !game.reveal_path()? {
                    log::warn!("No path from {} to the goal", game.player_position());
                }
            }
        }
        draw(out, game)?;

        if game.status() == Status::Won {
            return Ok(Outcome::Won);
        }
    }
}

/// Redraw the maze with the help panel to its right
fn draw(out: &mut impl Write, game: &GameState) -> io::Result<()> {
    queue!(out, Clear(ClearType::All))?;
    for (row, line) in game.to_string().lines().enumerate() {
        let (x, y) = screen_position(Point { row, col: 0 });
        queue!(out, MoveTo(x, y), Print(line))?;
    }

    let (help_x, _) = screen_position(Point {
        row: 0,
        col: game.grid().width() + 2,
    });
    for (line, text) in (0u16..).zip(HELP) {
        queue!(out, MoveTo(help_x, line), Print(text))?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use std::io::{self, Write};

    use crossterm::event::KeyCode;
    use maze_game::{Direction, GameState, Maze, Point};

    use crate::terminal::{command_for, draw, screen_position, Command, Screen, HELP};

    #[test]
    fn keys_map_to_commands() {
        assert_eq!(
            command_for(KeyCode::Char('w')),
            Some(Command::Move(Direction::Up))
        );
        assert_eq!(
            command_for(KeyCode::Char('A')),
            Some(Command::Move(Direction::Left))
        );
        assert_eq!(
            command_for(KeyCode::Down),
            Some(Command::Move(Direction::Down))
        );
        assert_eq!(
            command_for(KeyCode::Right),
            Some(Command::Move(Direction::Right))
        );
        assert_eq!(command_for(KeyCode::Char('f')), Some(Command::RevealPath));
        assert_eq!(command_for(KeyCode::Esc), Some(Command::Quit));
        assert_eq!(command_for(KeyCode::Char('x')), None);
        assert_eq!(command_for(KeyCode::Enter), None);
    }

    #[test]
    fn screen_axes_are_swapped() {
        assert_eq!(screen_position(Point::new(3, 7)), (7, 3));
    }

    #[test]
    fn draw_writes_maze_and_help() {
        let maze = Maze::parse("#######\n#P   F#\n#######").unwrap();
        let mut game = GameState::from_maze(maze);
        game.reveal_path().unwrap();

        let mut buf = Vec::new();
        draw(&mut buf, &game).unwrap();
        let screen = String::from_utf8(buf).unwrap();
        assert!(screen.contains("#P...F#"));
        assert!(screen.contains("Controls:"));
        assert!(screen.contains("Esc / Q - Quit"));
    }

    #[test]
    fn help_lists_every_key() {
        for (code, label) in [
            (KeyCode::Char('w'), "W "),
            (KeyCode::Up, "Up arrow"),
            (KeyCode::Char('a'), "A "),
            (KeyCode::Left, "Left arrow"),
            (KeyCode::Char('s'), "S "),
            (KeyCode::Down, "Down arrow"),
            (KeyCode::Char('d'), "D "),
            (KeyCode::Right, "Right arrow"),
            (KeyCode::Char('f'), "F "),
            (KeyCode::Esc, "Esc"),
            (KeyCode::Char('q'), "Q "),
        ] {
            assert!(command_for(code).is_some(), "{code:?}");
            assert!(
                HELP.iter().any(|line| line.contains(label)),
                "`{label}` missing from help"
            );
        }
    }

    #[test]
    fn dropping_screen_restores_terminal() {
        let mut buf = Vec::new();
        {
            let _screen = Screen {
                out: &mut buf,
                active: true,
            };
        }
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("\x1B[?25h"), "cursor not shown: {out:?}");
        assert!(out.contains("\x1B[?1049l"), "alternate screen not left: {out:?}");
    }

    /// Writer that refuses every write
    struct Broken {
        attempts: usize,
    }

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            self.attempts += 1;
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn restore_keeps_going_after_failure() {
        let mut broken = Broken { attempts: 0 };
        let mut screen = Screen {
            out: &mut broken,
            active: true,
        };
        assert!(screen.restore().is_err());
        drop(screen);
        // Both the cursor and the alternate screen step were tried, and the
        // drop did not restore a second time
        assert_eq!(broken.attempts, 2);
    }
}
