use std::{
    error::Error,
    io::{self, Read, Write},
    os::fd::AsRawFd,
};

use clap::{Parser, Subcommand};
use engine_2048::{
    ai::{Ai, ExpectimaxAi, RandomAi, SearchConfig},
    direction::Direction,
    game::Game,
    tracker::{TileTracker, TrackError},
    PackedBoard,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

mod render;

/// Keys read in play mode, in the order of [`KEY_COMMANDS`].
const KEY_PATTERNS: [&[u8]; 10] = [
    b"\x1b[A", b"\x1b[B", b"\x1b[C", b"\x1b[D", b"n", b"N", b"h", b"H", b"q", b"Q",
];
const KEY_COMMANDS: [Command; 10] = [
    Command::Move(Direction::Up),
    Command::Move(Direction::Down),
    Command::Move(Direction::Right),
    Command::Move(Direction::Left),
    Command::NewGame,
    Command::NewGame,
    Command::Hint,
    Command::Hint,
    Command::Quit,
    Command::Quit,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    Move(Direction),
    /// Clear the board and spawn the opening tile.
    NewGame,
    /// Let the planner play one move on the live board.
    Hint,
    Quit,
}

#[derive(Parser, Debug)]
#[command(name = "merge-2048", version, about = "Play 2048, or watch the expectimax planner play it")]
struct Cli {
    /// Seed for tile spawns; entropy when omitted
    #[arg(long, global = true)]
    seed: Option<u64>,
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Play with the arrow keys (default); n starts a new game, h asks the planner for one
    /// move, q quits
    Play {
        /// Move plies the planner searches for a hint
        #[arg(short, long, default_value_t = 3)]
        depth: u32,
    },
    /// Let the expectimax planner play
    Ai {
        /// Move plies to search
        #[arg(short, long, default_value_t = 3)]
        depth: u32,
        /// Prune branches less likely than this
        #[arg(long, default_value_t = 1e-6)]
        min_probability: f64,
        /// Stop after this many moves
        #[arg(long)]
        max_moves: Option<u64>,
    },
    /// Play uniformly random moves
    Random {
        /// Stop after this many moves
        #[arg(long)]
        max_moves: Option<u64>,
    },
}

fn status(game: &Game<impl Rng>) -> String {
    format!("Moves: {}  Highest: {}", game.moves(), game.highest_tile())
}

fn search_status(game: &Game<impl Rng>, ai: &impl Ai) -> String {
    let mut line = status(game);

    if let Some(stats) = ai.last_stats() {
        line += &format!(
            "  Nodes: {}  Depth cutoffs: {}  Probability cutoffs: {}",
            stats.nodes_searched, stats.depth_cutoffs, stats.probability_cutoffs
        );
    }

    line
}

/// Runs one key command on the live game. Returns the status line to redraw with, or `None`
/// if the board did not change.
fn run_command(
    game: &mut Game<impl Rng>,
    tracker: &mut TileTracker,
    planner: &mut impl Ai,
    command: Command,
) -> Result<Option<String>, TrackError> {
    let line = match command {
        Command::Move(direction) => {
            let resolution = game.play(direction);

            if !resolution.changed {
                return Ok(None);
            }

            tracker.apply_all(&resolution.events)?;
            status(game)
        }
        Command::NewGame => {
            tracker.apply_all(&game.reset())?;
            status(game)
        }
        Command::Hint => {
            let Some(resolution) = game.auto_step(planner) else {
                return Ok(None);
            };

            tracker.apply_all(&resolution.events)?;
            search_status(game, planner)
        }
        Command::Quit => return Ok(None),
    };

    if game.is_over() {
        return Ok(Some(line + "  Game over (n: new game, q: quit)"));
    }

    Ok(Some(line))
}

/// Runs `commands` in order. Returns whether the player asked to quit.
fn run_keys(
    out: &mut impl Write,
    game: &mut Game<impl Rng>,
    tracker: &mut TileTracker,
    planner: &mut impl Ai,
    commands: impl IntoIterator<Item = Command>,
) -> Result<bool, Box<dyn Error>> {
    for command in commands {
        if command == Command::Quit {
            return Ok(true);
        }

        if let Some(line) = run_command(game, tracker, planner, command)? {
            render::redraw_board(out, game.board(), &line)?;
        }
    }

    Ok(false)
}

fn play_interactive(
    out: &mut (impl AsRawFd + Write),
    input: &mut impl Read,
    game: &mut Game<impl Rng>,
    planner: &mut impl Ai,
) -> Result<(), Box<dyn Error>> {
    let input_searcher = aho_corasick::packed::Searcher::new(KEY_PATTERNS)
        .ok_or("key searcher unavailable on this target")?;

    let mut tracker = TileTracker::new();
    tracker.apply_all(&game.reset())?;

    let saved = render::setup_terminal(out)?;
    render::draw_board(out, game.board(), &status(game))?;

    let mut buf = [0u8; 128];
    let mut buf_len = 0;

    let result = loop {
        let read = match input.read(&mut buf[buf_len..]) {
            Ok(0) => break Ok(()),
            Ok(read) => read,
            Err(err) => break Err(err.into()),
        };
        buf_len += read;

        let commands: Vec<_> = input_searcher
            .find_iter(&buf[..buf_len])
            .map(|m| KEY_COMMANDS[m.pattern().as_usize()])
            .collect();

        match run_keys(out, game, &mut tracker, planner, commands) {
            Ok(true) => break Ok(()),
            Ok(false) => {}
            Err(err) => break Err(err),
        }

        // Keep a partial escape sequence for the next read.
        buf_len = match &buf[..buf_len] {
            [.., 0x1b, b'['] => {
                buf[..2].copy_from_slice(b"\x1b[");
                2
            }
            [.., 0x1b] => {
                buf[0] = 0x1b;
                1
            }
            _ => 0,
        }
    };

    render::restore_terminal(out, &saved)?;
    result?;

    if game.is_over() {
        out.write_all(b"Game over\n")?;
    }

    Ok(())
}

fn play_auto(
    out: &mut impl Write,
    game: &mut Game<impl Rng>,
    ai: &mut impl Ai,
    max_moves: Option<u64>,
) -> Result<(), Box<dyn Error>> {
    let mut tracker = TileTracker::new();
    tracker.apply_all(&game.reset())?;

    render::draw_board(out, game.board(), &status(game))?;

    while max_moves.map_or(true, |max_moves| game.moves() < max_moves) {
        let Some(resolution) = game.auto_step(ai) else {
            break;
        };

        tracker.apply_all(&resolution.events)?;
        render::redraw_board(out, game.board(), &search_status(game, ai))?;
    }

    if game.is_over() {
        out.write_all(b"Game over\n")?;
    } else {
        writeln!(out, "Stopped after {} moves", game.moves())?;
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let cli = Cli::parse();

    let mut rng = match cli.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let ai_rng = ChaCha8Rng::from_rng(&mut rng)?;

    log::debug!("starting {:?} with seed {:?}", cli.mode, cli.seed);

    let mut game = Game::new(PackedBoard::standard(), rng);
    let mut stdout = io::stdout().lock();

    match cli.mode.unwrap_or(Mode::Play { depth: 3 }) {
        Mode::Play { depth } => {
            let mut planner = ExpectimaxAi::new(SearchConfig {
                max_depth: depth,
                ..SearchConfig::default()
            });

            play_interactive(&mut stdout, &mut io::stdin().lock(), &mut game, &mut planner)
        }
        Mode::Ai {
            depth,
            min_probability,
            max_moves,
        } => {
            let mut ai = ExpectimaxAi::new(SearchConfig {
                max_depth: depth,
                min_probability,
            });

            play_auto(&mut stdout, &mut game, &mut ai, max_moves)
        }
        Mode::Random { max_moves } => {
            play_auto(&mut stdout, &mut game, &mut RandomAi::new(ai_rng), max_moves)
        }
    }
}
