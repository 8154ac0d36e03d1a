//! Interactive command loop.
//!
//! The session reads one command per line and writes replies to the
//! output. It is generic over its streams so the same loop drives a
//! terminal and in-memory buffers.

use crate::config::CliConfig;
use crate::render::render;
use chess_core::{PromotionKind, Square};
use chess_rules::{Game, MoveOutcome, MoveStatus};
use std::io::{self, BufRead, Write};
use thiserror::Error;

const HELP: &str = "\
commands:
  board              draw the board
  turn               show the side to move
  moves <square>     list candidate moves of the piece on <square>
  move <from><to>[p] play a move, e.g. e2e4 or e7e8q (p: n, b, r, q)
  snapshot           print the board as JSON
  help               show this text
  quit               leave the session";

/// A parsed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Board,
    Turn,
    Moves(Square),
    Move {
        from: Square,
        to: Square,
        promotion: Option<PromotionKind>,
    },
    Snapshot,
    Help,
    Quit,
}

/// Errors for input lines that do not form a command.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("invalid square '{0}'")]
    InvalidSquare(String),
    #[error("invalid move '{0}', expected e.g. e2e4 or e7e8q")]
    InvalidMove(String),
}

impl Command {
    /// Parses one input line. Blank lines yield `None`.
    ///
    /// A bare move such as `e2e4` is accepted without the `move` keyword.
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            return Ok(None);
        };
        let arg = words.next();
        let command = match word.to_ascii_lowercase().as_str() {
            "board" | "b" => Command::Board,
            "turn" => Command::Turn,
            "moves" | "m" => {
                let text = arg.ok_or(CommandError::MissingArgument("moves"))?;
                let square = Square::from_algebraic(&text.to_ascii_lowercase())
                    .ok_or_else(|| CommandError::InvalidSquare(text.to_string()))?;
                Command::Moves(square)
            }
            "move" | "mv" => parse_move(arg.ok_or(CommandError::MissingArgument("move"))?)?,
            "snapshot" => Command::Snapshot,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => parse_move(other).map_err(|_| CommandError::Unknown(word.to_string()))?,
        };
        Ok(Some(command))
    }
}

/// Splits `e7e8q` into source, destination and optional promotion suffix.
/// Ranks may have more than one digit.
fn parse_move(text: &str) -> Result<Command, CommandError> {
    let invalid = || CommandError::InvalidMove(text.to_string());
    let lower = text.to_ascii_lowercase();
    if !lower.is_ascii() {
        return Err(invalid());
    }

    let (from, rest) = lower.split_at(square_end(&lower).ok_or_else(invalid)?);
    let (to, suffix) = match square_end(rest) {
        Some(end) => rest.split_at(end),
        None => (rest, ""),
    };
    let from = Square::from_algebraic(from).ok_or_else(invalid)?;
    let to = Square::from_algebraic(to).ok_or_else(invalid)?;
    let promotion = match suffix {
        "" => None,
        s => Some(s.parse::<PromotionKind>().map_err(|_| invalid())?),
    };
    Ok(Command::Move {
        from,
        to,
        promotion,
    })
}

/// Returns the byte index where the next letter follows a digit.
fn square_end(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    (1..bytes.len()).find(|&i| bytes[i].is_ascii_alphabetic() && bytes[i - 1].is_ascii_digit())
}

/// A terminal session over one game.
pub struct Session<R, W> {
    game: Game,
    config: CliConfig,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(game: Game, config: CliConfig, input: R, output: W) -> Self {
        Session {
            game,
            config,
            input,
            output,
        }
    }

    /// Returns the game being played.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Runs commands until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "{}", render(self.game.board(), self.config.show_coordinates))?;
        loop {
            write!(self.output, "{} to move> ", self.game.current_turn())?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                writeln!(self.output)?;
                return Ok(());
            };
            match Command::parse(&line) {
                Ok(None) => {}
                Ok(Some(Command::Quit)) => return Ok(()),
                Ok(Some(command)) => self.execute(command)?,
                Err(e) => writeln!(self.output, "error: {}", e)?,
            }
        }
    }

    /// Executes a single command, writing its reply.
    pub fn execute(&mut self, command: Command) -> io::Result<()> {
        match command {
            Command::Board => {
                let text = render(self.game.board(), self.config.show_coordinates);
                write!(self.output, "{}", text)
            }
            Command::Turn => writeln!(self.output, "{} to move", self.game.current_turn()),
            Command::Moves(square) => self.list_moves(square),
            Command::Move {
                from,
                to,
                promotion,
            } => self.play(from, to, promotion),
            Command::Snapshot => match serde_json::to_string_pretty(self.game.board()) {
                Ok(json) => writeln!(self.output, "{}", json),
                Err(e) => writeln!(self.output, "error: {}", e),
            },
            Command::Help => writeln!(self.output, "{}", HELP),
            Command::Quit => Ok(()),
        }
    }

    fn list_moves(&mut self, square: Square) -> io::Result<()> {
        let Some(id) = self.game.board().occupant_id(square) else {
            return writeln!(self.output, "error: no piece on {}", square);
        };
        let moves = self.game.valid_moves(id);
        if moves.is_empty() {
            return writeln!(self.output, "no moves");
        }
        let notation: Vec<String> = moves.iter().map(|m| m.to_notation()).collect();
        writeln!(self.output, "{}", notation.join(" "))
    }

    fn play(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PromotionKind>,
    ) -> io::Result<()> {
        let Some(id) = self.game.board().occupant_id(from) else {
            return writeln!(self.output, "error: no piece on {}", from);
        };
        let Some(m) = self.game.valid_moves(id).find_to(to) else {
            return writeln!(self.output, "error: {}{} is not a valid move", from, to);
        };
        if promotion.is_some() && !m.is_promotion() {
            return writeln!(self.output, "error: {}{} does not promote", from, to);
        }

        let result = match promotion.or(self.config.auto_promote) {
            Some(mut kind) => self.game.apply_move(m, &mut kind),
            None => match self.game.begin_move(m) {
                Ok(MoveStatus::Applied(outcome)) => Ok(outcome),
                Ok(MoveStatus::PendingPromotion(_)) => {
                    let kind = self.ask_promotion()?;
                    self.game.resolve_promotion(kind)
                }
                Err(e) => Err(e),
            },
        };
        match result {
            Ok(outcome) => self.report(&outcome),
            Err(e) => writeln!(self.output, "error: {}", e),
        }
    }

    /// Asks until a valid choice is given. End of input picks a queen.
    fn ask_promotion(&mut self) -> io::Result<PromotionKind> {
        loop {
            write!(self.output, "promote to (q, r, b, n)? ")?;
            self.output.flush()?;
            let Some(line) = self.read_line()? else {
                tracing::warn!("input closed during promotion, choosing a queen");
                return Ok(PromotionKind::Queen);
            };
            match line.parse::<PromotionKind>() {
                Ok(kind) => return Ok(kind),
                Err(e) => writeln!(self.output, "error: {}", e)?,
            }
        }
    }

    fn report(&mut self, outcome: &MoveOutcome) -> io::Result<()> {
        let mut line = outcome.mov.to_notation();
        if let Some(capture) = outcome.captured {
            line.push_str(&format!(", captures {} on {}", capture.kind, capture.square));
        }
        if let Some(rook) = outcome.rook {
            line.push_str(&format!(", rook {}{}", rook.from, rook.to));
        }
        if let Some(kind) = outcome.promoted_to {
            line.push_str(&format!(", promotes to {}", kind));
        }
        writeln!(self.output, "{}", line)?;
        writeln!(self.output, "{} to move", outcome.turn)
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
