//! Amazons-Rust command line.
//!
//! ## Usage
//!
//! - `amazons` - Play one game, random against min-opponent, on a 10x10 board
//! - `amazons play --player1 mcts --player2 min --rounds 20` - Pick strategies
//! - `amazons protocol` - Start the text protocol on stdin/stdout
//! - `amazons human --strategy minmax` - Play against the engine

use std::io;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use amazons_rust::constants::{DEFAULT_GAMES, DEFAULT_N, DEFAULT_ROUNDS};
use amazons_rust::game::{GameResult, Layout, play_game, prompt_human_move};
use amazons_rust::moves::Player;
use amazons_rust::playout::PlayoutMode;
use amazons_rust::protocol::TextEngine;
use amazons_rust::strategy::Strategy;

/// Amazons-Rust: move generation and simple search for the game of the Amazons
#[derive(Parser)]
#[command(name = "amazons")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play engine against engine and report the winner
    Play(PlayArgs),
    /// Start the text protocol server on stdin/stdout
    Protocol(EngineArgs),
    /// Play against the engine from the terminal
    Human {
        #[command(flatten)]
        engine: EngineArgs,
        /// Which side the human plays (1 or 2)
        #[arg(long, default_value_t = 1)]
        side: i8,
        /// Starting layout
        #[arg(long, default_value_t = Layout::Default)]
        layout: Layout,
    },
}

/// Playout options shared by every strategy flag.
#[derive(Args)]
struct SearchArgs {
    /// Playouts per candidate move for the mcts strategy
    #[arg(long, default_value_t = DEFAULT_ROUNDS)]
    rounds: usize,
    /// Opponent policy inside playouts (random or min)
    #[arg(long, default_value_t = PlayoutMode::Random)]
    mode: PlayoutMode,
    /// Print search statistics to stderr
    #[arg(short, long)]
    verbose: bool,
    /// Seed for reproducible games
    #[arg(long)]
    seed: Option<u64>,
}

impl SearchArgs {
    fn rng(&self) -> fastrand::Rng {
        self.seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed)
    }

    fn configure(&self, strategy: Strategy) -> Strategy {
        strategy.with_playouts(self.rounds, self.mode, self.verbose)
    }
}

#[derive(Args)]
struct EngineArgs {
    /// Board size
    #[arg(short = 'n', long, default_value_t = DEFAULT_N)]
    size: usize,
    /// Engine strategy (random, min, max, minmax, mcts)
    #[arg(long, default_value = "minmax")]
    strategy: Strategy,
    #[command(flatten)]
    search: SearchArgs,
}

#[derive(Args)]
struct PlayArgs {
    /// Board size
    #[arg(short = 'n', long, default_value_t = DEFAULT_N)]
    size: usize,
    /// Strategy for player 1 (random, min, max, minmax, mcts)
    #[arg(long, default_value = "random")]
    player1: Strategy,
    /// Strategy for player 2
    #[arg(long, default_value = "min")]
    player2: Strategy,
    /// Starting layout (default, corners, columns)
    #[arg(long, default_value_t = Layout::Default)]
    layout: Layout,
    /// Number of games to play
    #[arg(long, default_value_t = DEFAULT_GAMES)]
    games: usize,
    /// Only print the final results
    #[arg(short, long)]
    quiet: bool,
    #[command(flatten)]
    search: SearchArgs,
}

impl Default for PlayArgs {
    fn default() -> Self {
        Self {
            size: DEFAULT_N,
            player1: Strategy::Random,
            player2: Strategy::MinOpponent,
            layout: Layout::Default,
            games: DEFAULT_GAMES,
            quiet: false,
            search: SearchArgs {
                rounds: DEFAULT_ROUNDS,
                mode: PlayoutMode::Random,
                verbose: false,
                seed: None,
            },
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play(args)) => run_games(&args),
        None => run_games(&PlayArgs::default()),
        Some(Commands::Protocol(args)) => {
            let mut engine = TextEngine::new(args.size)?
                .with_strategy(args.search.configure(args.strategy.clone()));
            if let Some(seed) = args.search.seed {
                engine = engine.with_seed(seed);
            }
            engine.run().context("protocol I/O failed")
        }
        Some(Commands::Human { engine, side, layout }) => run_human(&engine, side, layout),
    }
}

fn run_games(args: &PlayArgs) -> Result<()> {
    let first = args.search.configure(args.player1.clone());
    let second = args.search.configure(args.player2.clone());
    let mut rng = args.search.rng();

    let mut wins = [0usize; 2];
    let mut total_moves = 0;
    for game in 1..=args.games {
        let mut board = args.layout.board(args.size)?;
        if !args.quiet {
            println!("Game {game}: {first} vs {second}\n{board}");
        }

        let GameResult { winner, moves } = play_game(&mut board, &first, &second, &mut rng, |b, m| {
            if !args.quiet {
                println!("{m}\n{b}");
            }
        })?;

        if !args.quiet {
            println!("Player {winner} won! Game took {moves} turns.");
        }
        wins[winner.id() as usize - 1] += 1;
        total_moves += moves;
    }

    if args.games > 1 || args.quiet {
        println!(
            "{} games: player 1 ({first}) won {}, player 2 ({second}) won {}, average length {:.1}",
            args.games,
            wins[0],
            wins[1],
            total_moves as f64 / args.games.max(1) as f64
        );
    }
    Ok(())
}

fn run_human(args: &EngineArgs, side: i8, layout: Layout) -> Result<()> {
    let human = Player::from_id(side).context("side must be 1 or 2")?;
    let engine = args.search.configure(args.strategy.clone());
    let mut rng = args.search.rng();
    let mut board = layout.board(args.size)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    println!("{board}");
    while !board.done() {
        let player = board.next_player();
        let m = if player == human {
            prompt_human_move(&mut board, player, &mut input, &mut output)?
        } else {
            engine.play(&mut board, player, &mut rng)?
        };
        println!("{m}\n{board}");
    }

    let winner = board.winner().context("finished game has no winner")?;
    println!("Player {winner} won! Game took {} turns.", board.move_count());
    Ok(())
}
