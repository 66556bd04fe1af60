use std::str::FromStr;

use anyhow::{Context, bail};
use clap::Parser;
use minefield_core::{CellCount, Coord, Coord2, GameConfig, Session, SessionState};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(version, about = "Lay out a minefield and play scripted moves on it", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Number of columns
    #[arg(long, default_value_t = GameConfig::default().width)]
    width: Coord,

    /// Number of rows
    #[arg(long, default_value_t = GameConfig::default().height)]
    height: Coord,

    /// Number of mines to plant
    #[arg(short, long, default_value_t = GameConfig::default().mines)]
    mines: CellCount,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Moves to play in order, as `reveal:X,Y` or `flag:X,Y`
    #[arg(long = "move", value_name = "MOVE")]
    moves: Vec<Move>,

    /// Print the whole session as JSON instead of the debug grid
    #[arg(long)]
    json: bool,
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Move {
    Reveal(Coord2),
    Flag(Coord2),
}

impl FromStr for Move {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (action, coords) = s
            .split_once(':')
            .with_context(|| format!("missing `:` in move {:?}", s))?;
        let (x, y) = coords
            .split_once(',')
            .with_context(|| format!("missing `,` in coordinates {:?}", coords))?;
        let coords = (x.trim().parse()?, y.trim().parse()?);

        Ok(match action {
            "reveal" | "r" => Move::Reveal(coords),
            "flag" | "f" => Move::Flag(coords),
            other => bail!("unknown action {:?}, expected `reveal` or `flag`", other),
        })
    }
}

#[derive(Serialize)]
struct Report<'a> {
    mines_left: isize,
    session: &'a Session,
}

fn play(session: &mut Session, moves: &[Move]) -> anyhow::Result<()> {
    for &next in moves {
        if session.is_finished() {
            log::warn!("Game already ended, skipping {:?}", next);
            continue;
        }

        match next {
            Move::Reveal((x, y)) => {
                let outcome = session.reveal(x, y)?;
                log::info!(
                    "Revealed {} cell(s) from ({}, {})",
                    outcome.revealed.len(),
                    x,
                    y
                );
            }
            Move::Flag((x, y)) => {
                let outcome = session.toggle_flag(x, y)?;
                log::info!("Flag at ({}, {}): {:?}", x, y, outcome);
            }
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(std::io::stderr)
        .init();

    let config = GameConfig::new(args.width, args.height, args.mines)?;
    let mut session = Session::new(config, args.seed)?;
    log::debug!("seed: {:?}", session.seed());

    play(&mut session, &args.moves)?;

    if args.json {
        let report = Report {
            mines_left: session.mines_left(),
            session: &session,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", session.field());
        let state = match session.state() {
            SessionState::Playing => "playing",
            SessionState::Won => "won",
            SessionState::Lost => "lost",
        };
        println!(
            "seed: {}, state: {}, mines left: {}",
            session.seed().unwrap_or_default(),
            state,
            session.mines_left()
        );
    }
    Ok(())
}
