#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays the Wandering Game in a terminal.

mod args;
mod text;

use std::{io, thread, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use wandering_core::{Command, DirectionSelector, Event, StatsSummary, WELCOME_BANNER};
use wandering_rendering::{dispatch, BoardState, Presenter};
use wandering_system_bootstrap::RULES;
use wandering_system_movement::{Config, RandomWalk};
use wandering_system_rounds::RoundController;
use wandering_world::query;

use crate::{
    args::Cli,
    text::{JsonPresenter, TextPresenter},
};

/// How a single game came to an end.
enum Outcome {
    Finished(StatsSummary),
    Capped { ticks: u64, summary: StatsSummary },
}

/// Entry point for the Wandering Game command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.rules {
        println!("{RULES}");
        return Ok(());
    }

    let seed = cli.seed.unwrap_or_else(rand::random);
    info!("using seed {seed}");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let setup = cli.setup(&mut rng).context("invalid game setup")?;
    if !setup.converges() {
        warn!("players start on cells of both checkerboard colours and can never all meet");
    }
    let cap = cli.tick_cap(&setup);

    let walk = RandomWalk::new(Config::new(rng.gen()));
    let mut controller =
        RoundController::new(setup, walk).context("failed to place the players")?;

    let stdout = io::stdout();
    if cli.json {
        run(&cli, &mut controller, JsonPresenter::new(stdout.lock()), cap)
    } else {
        println!("{WELCOME_BANNER}");
        run(&cli, &mut controller, TextPresenter::new(stdout.lock()), cap)
    }
}

fn run<S, P>(
    cli: &Cli,
    controller: &mut RoundController<S>,
    mut presenter: P,
    cap: Option<u64>,
) -> Result<()>
where
    S: DirectionSelector,
    P: Presenter,
{
    let delay = cli.tick_delay();
    let mut board = BoardState::new();
    let mut events = Vec::new();

    for game in 0..=cli.replays {
        events.clear();
        let _ = if game == 0 {
            controller.start(&mut events)
        } else {
            controller.apply(Command::ReplaySameCoordinates, &mut events)
        };
        dispatch(&events, &mut board);

        match play(controller, &mut board, &mut presenter, delay, cap)? {
            Outcome::Finished(summary) => presenter.present_summary(&summary)?,
            Outcome::Capped { ticks, summary } => {
                warn!("game {} stopped after {ticks} ticks", game + 1);
                presenter.present_stopped(ticks, &summary)?;
            }
        }
    }

    Ok(())
}

fn play<S, P>(
    controller: &mut RoundController<S>,
    board: &mut BoardState,
    presenter: &mut P,
    delay: Option<Duration>,
    cap: Option<u64>,
) -> Result<Outcome>
where
    S: DirectionSelector,
    P: Presenter,
{
    let grid = controller.setup().grid();
    let mut events = Vec::new();
    presenter.present(&grid, board)?;

    loop {
        if let Some(summary) = controller.final_summary() {
            return Ok(Outcome::Finished(summary));
        }

        let ticks = query::tick_index(controller.world());
        if cap.is_some_and(|cap| ticks >= cap) {
            let _ = controller.apply(Command::Cancel, &mut events);
            return Ok(Outcome::Capped {
                ticks,
                summary: controller.summary(),
            });
        }

        if let Some(delay) = delay {
            thread::sleep(delay);
        }

        events.clear();
        let _ = controller.apply(Command::Tick, &mut events);
        dispatch(&events, board);
        presenter.present(&grid, board)?;

        for event in &events {
            if let Event::RoundEnded { moves, survivors } = event {
                presenter.present_round(board.completed_rounds().len(), *moves, *survivors)?;
            }
        }
    }
}
