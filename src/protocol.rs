//! Line-oriented text protocol for scripted or interactive play.
//!
//! Modelled on GTP: one command per line, an optional numeric id in front,
//! and a response of `=[id] message` on success or `?[id] message` on failure,
//! followed by a blank line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `quit`
//! - `boardsize <n>` - New board of the given size with the current layout
//! - `clear_board` - Reset to the starting position
//! - `layout <default|corners|columns>` - Change the starting layout and reset
//! - `play <player> <x,y> <x,y> <x,y>` - Play a move (piece, destination, arrow)
//! - `genmove <player>` - Let the engine move for `player`
//! - `undo` - Take back the last move
//! - `showboard` - Render the board
//! - `winner` - `1`, `2`, or `none`
//! - `strategy <name> [rounds] [mode]` - Change the engine strategy
//!
//! ## Example
//!
//! ```ignore
//! use amazons_rust::protocol::TextEngine;
//! let mut engine = TextEngine::new(10)?;
//! engine.run()?;
//! ```

use std::io::{self, BufRead, Write};

use crate::board::{Board, BoardError};
use crate::constants::DEFAULT_ROUNDS;
use crate::game::Layout;
use crate::moves::{Coord, Move, Player};
use crate::playout::PlayoutMode;
use crate::strategy::Strategy;

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "genmove",
    "known_command",
    "layout",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "strategy",
    "undo",
    "version",
    "winner",
];

/// Text engine state.
pub struct TextEngine {
    board: Board,
    layout: Layout,
    strategy: Strategy,
    rng: fastrand::Rng,
}

impl TextEngine {
    /// Create an engine on an `n`x`n` default board playing random moves.
    pub fn new(n: usize) -> Result<Self, BoardError> {
        Ok(Self {
            board: Board::new(n)?,
            layout: Layout::Default,
            strategy: Strategy::Random,
            rng: fastrand::Rng::new(),
        })
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = fastrand::Rng::with_seed(seed);
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Run the command loop on stdin and stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), stdout.lock())
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run_with<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let (success, message) = self.execute(&command, &parts[1..]);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Split an optional numeric command id from the start of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    fn parse_player(arg: Option<&&str>) -> Result<Player, String> {
        let arg = arg.ok_or("missing player")?;
        arg.parse::<i8>()
            .ok()
            .and_then(Player::from_id)
            .ok_or_else(|| format!("invalid player {arg:?}"))
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match self.dispatch(command, args) {
            Ok(message) => (true, message),
            Err(message) => (false, message),
        }
    }

    fn dispatch(&mut self, command: &str, args: &[&str]) -> Result<String, String> {
        match command {
            "name" => Ok("amazons-rust".to_string()),

            "version" => Ok(env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => Ok("1".to_string()),

            "list_commands" => Ok(KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let cmd = args.first().ok_or("missing argument")?;
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                Ok(known.to_string())
            }

            "quit" => Ok(String::new()),

            "boardsize" => {
                let size = args
                    .first()
                    .ok_or("missing argument")?
                    .parse::<usize>()
                    .map_err(|_| "invalid size".to_string())?;
                self.board = self.layout.board(size).map_err(|e| e.to_string())?;
                Ok(String::new())
            }

            "clear_board" => {
                self.board = self.layout.board(self.board.n()).map_err(|e| e.to_string())?;
                Ok(String::new())
            }

            "layout" => {
                let layout = args
                    .first()
                    .ok_or("missing argument")?
                    .parse::<Layout>()
                    .map_err(|e| e.to_string())?;
                self.board = layout.board(self.board.n()).map_err(|e| e.to_string())?;
                self.layout = layout;
                Ok(String::new())
            }

            "play" => {
                if args.len() < 4 {
                    return Err("expected: play <player> <x,y> <x,y> <x,y>".to_string());
                }
                // Raw id so the board can report sentinel ids itself
                let id = args[0]
                    .parse::<i8>()
                    .map_err(|_| format!("invalid player {:?}", args[0]))?;
                let coord = |s: &str| s.parse::<Coord>().map_err(|e| e.to_string());
                let m = Move::with_id(coord(args[1])?, coord(args[2])?, coord(args[3])?, id);
                self.board.make_move(m).map_err(|e| e.to_string())?;
                Ok(String::new())
            }

            "genmove" => {
                let player = Self::parse_player(args.first())?;
                if self.board.done() {
                    return Err("game is over".to_string());
                }
                let m = self
                    .strategy
                    .play(&mut self.board, player, &mut self.rng)
                    .map_err(|e| e.to_string())?;
                Ok(format_move(&m))
            }

            "undo" => {
                if self.board.moves().is_empty() {
                    return Err("cannot undo".to_string());
                }
                self.board.pop_last_move();
                Ok(String::new())
            }

            "showboard" => Ok(format!("\n{}", self.board)),

            "winner" => Ok(self
                .board
                .winner()
                .map_or_else(|| "none".to_string(), |p| p.to_string())),

            "strategy" => {
                let strategy = args
                    .first()
                    .ok_or("missing argument")?
                    .parse::<Strategy>()
                    .map_err(|e| e.to_string())?;
                let rounds = match args.get(1) {
                    Some(r) => r.parse::<usize>().map_err(|_| format!("invalid rounds {r:?}"))?,
                    None => DEFAULT_ROUNDS,
                };
                let mode = match args.get(2) {
                    Some(m) => m.parse::<PlayoutMode>().map_err(|e| e.to_string())?,
                    None => PlayoutMode::Random,
                };
                self.strategy = strategy.with_playouts(rounds, mode, false);
                Ok(String::new())
            }

            _ => Err(format!("unknown command: {command}")),
        }
    }
}

/// Render a move the way `play` accepts it.
fn format_move(m: &Move) -> String {
    format!(
        "{},{} {},{} {},{}",
        m.start.x, m.start.y, m.end.x, m.end.y, m.attack.x, m.attack.y
    )
}
