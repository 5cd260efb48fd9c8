use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use masker::board::{legal_moves, GenMode, ZobristKeys, KEYS};
use masker::search::{order_moves, SearchLimits};
use masker::types::{BestMove, Depth};
use masker::{Engine, EngineConfig, Position, STARTPOS};

#[derive(Parser)]
#[command(name = "masker", version, about = "Mask-based chess move generator and search engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Count leaf nodes of the legal move tree
    Perft {
        depth: u32,
        #[arg(long, default_value = STARTPOS)]
        fen: String,
        /// Break the count down by root move
        #[arg(long)]
        divide: bool,
    },
    /// Search a position and print the best move or the game result
    Bestmove {
        #[arg(long, default_value = STARTPOS)]
        fen: String,
        /// Moves to play first, in coordinate notation
        #[arg(long, num_args = 1..)]
        moves: Vec<String>,
        /// Search budget in milliseconds
        #[arg(long, default_value_t = 1000)]
        movetime: u64,
        /// Deepest iteration to run
        #[arg(long, value_parser = clap::value_parser!(i32).range(1..))]
        depth: Option<i32>,
    },
    /// List legal moves with their ordering scores
    Moves {
        #[arg(long, default_value = STARTPOS)]
        fen: String,
    },
    /// Let the engine play both sides
    Selfplay {
        #[arg(long, default_value = STARTPOS)]
        fen: String,
        #[arg(long, default_value_t = 200)]
        movetime: u64,
        #[arg(long, default_value_t = 200)]
        max_plies: u32,
    },
    /// Write or verify the Zobrist constant table
    Keys {
        #[arg(long, conflicts_with = "check")]
        output: Option<PathBuf>,
        #[arg(long)]
        check: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Perft { depth, fen, divide } => perft(&fen, depth, divide),
        Command::Bestmove { fen, moves, movetime, depth } => bestmove(&fen, &moves, movetime, depth),
        Command::Moves { fen } => list_moves(&fen),
        Command::Selfplay { fen, movetime, max_plies } => selfplay(&fen, movetime, max_plies),
        Command::Keys { output, check } => keys(output, check),
    }
}

fn limits(movetime: u64, depth: Option<i32>) -> SearchLimits {
    SearchLimits {
        move_time: Duration::from_millis(movetime),
        max_depth: depth.map(Depth),
    }
}

fn perft(fen: &str, depth: u32, divide: bool) -> Result<()> {
    let mut engine = Engine::from_fen(fen, EngineConfig::default())?;
    if divide {
        let mut total = 0;
        for (m, nodes) in engine.divide(depth) {
            println!("{m}: {nodes}");
            total += nodes;
        }
        println!("\nNodes searched: {total}");
    } else {
        println!("{}", engine.perft(depth));
    }
    Ok(())
}

fn bestmove(fen: &str, moves: &[String], movetime: u64, depth: Option<i32>) -> Result<()> {
    let config = EngineConfig {
        limits: limits(movetime, depth),
        ..Default::default()
    };
    let mut engine = Engine::from_fen(fen, config)?;
    for text in moves {
        engine.play_uci(text)?;
    }

    let best = engine.get_best_move();
    if let Some(result) = engine.last_search() {
        eprintln!(
            "depth {} score {} nodes {} nps {} time {}",
            result.depth.raw(),
            result.score,
            result.stats.total_nodes(),
            result.stats.nps(),
            result.stats.time_ms
        );
    }
    println!("{best}");
    Ok(())
}

fn list_moves(fen: &str) -> Result<()> {
    let pos = Position::from_fen(fen)?;
    let mut moves = legal_moves(&pos, GenMode::All);
    order_moves(&mut moves, None);
    for m in &moves {
        println!("{m} {}", m.score);
    }
    eprintln!("{} legal moves", moves.len());
    Ok(())
}

fn selfplay(fen: &str, movetime: u64, max_plies: u32) -> Result<()> {
    let config = EngineConfig {
        limits: limits(movetime, None),
        ..Default::default()
    };
    let mut engine = Engine::from_fen(fen, config)?;
    for ply in 0..max_plies {
        if let Some(outcome) = engine.result().outcome() {
            println!("{outcome} ({:?})", engine.result());
            return Ok(());
        }
        match engine.get_best_move() {
            BestMove::Play(m) => {
                println!("{:>3}. {m}", ply + 1);
                engine.play_move(m);
            }
            outcome => {
                println!("{outcome}");
                return Ok(());
            }
        }
    }
    println!("stopped after {max_plies} plies\n{}", engine.position());
    Ok(())
}

fn keys(output: Option<PathBuf>, check: Option<PathBuf>) -> Result<()> {
    if let Some(path) = check {
        let text = fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
        let loaded = ZobristKeys::from_text(&text)?;
        if loaded != *KEYS {
            bail!("{} does not match the built-in table", path.display());
        }
        println!("{} matches the built-in table", path.display());
        return Ok(());
    }

    let text = KEYS.to_text();
    match output {
        Some(path) => fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?,
        None => println!("{text}"),
    }
    Ok(())
}
