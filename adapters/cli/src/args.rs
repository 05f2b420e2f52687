//! Command-line arguments accepted by the `wandering-game` binary.

use std::time::Duration;

use clap::{Parser, ValueEnum};
use rand::Rng;
use wandering_core::{CellCoord, ConfigurationError};
use wandering_system_bootstrap::{Setup, SetupForm};

/// Tick cap applied to setups that can never finish.
pub(crate) const DIVERGENT_TICK_CAP: u64 = 10_000;

/// Watch avatars wander a grid until they all meet.
#[derive(Clone, Debug, Parser)]
#[command(name = "wandering-game", version)]
pub(crate) struct Cli {
    /// Level to play.
    #[arg(long, value_enum, default_value_t = LevelArg::K2)]
    pub(crate) level: LevelArg,

    /// Number of grid rows for the 3-5 level.
    #[arg(long, default_value_t = 5)]
    pub(crate) rows: u32,

    /// Number of grid columns for the 3-5 level.
    #[arg(long, default_value_t = 5)]
    pub(crate) cols: u32,

    /// Starting cell as `x,y` (0-based column and row). Repeat once per player.
    #[arg(long = "player", value_name = "X,Y", value_parser = parse_cell)]
    pub(crate) players: Vec<CellCoord>,

    /// Seed for the grid size and every random step. Random when omitted.
    #[arg(long)]
    pub(crate) seed: Option<u64>,

    /// Delay between ticks in milliseconds.
    #[arg(long, default_value_t = 500)]
    pub(crate) tick_ms: u64,

    /// Replay the finished game from the same coordinates this many more times.
    #[arg(long, default_value_t = 0)]
    pub(crate) replays: u32,

    /// Print one JSON summary per game instead of drawing the board.
    #[arg(long)]
    pub(crate) json: bool,

    /// Print the rules of both levels and exit.
    #[arg(long)]
    pub(crate) rules: bool,

    /// Stop a game after this many ticks.
    #[arg(long)]
    pub(crate) max_ticks: Option<u64>,
}

/// Level names accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum LevelArg {
    /// Two players in opposite corners of a random square grid.
    #[value(name = "k2", alias = "K-2")]
    K2,
    /// Custom grid with two to four players.
    #[value(name = "3-5")]
    Elementary,
}

impl Cli {
    /// Builds the validated setup described by the arguments.
    pub(crate) fn setup<R>(&self, rng: &mut R) -> Result<Setup, ConfigurationError>
    where
        R: Rng + ?Sized,
    {
        match self.level {
            LevelArg::K2 => Setup::kindergarten(rng),
            LevelArg::Elementary => SetupForm {
                rows: self.rows,
                columns: self.cols,
                players: self.players.clone(),
            }
            .validate(),
        }
    }

    /// Tick limit for each game, if any.
    pub(crate) fn tick_cap(&self, setup: &Setup) -> Option<u64> {
        match self.max_ticks {
            Some(cap) => Some(cap),
            None if !setup.converges() => Some(DIVERGENT_TICK_CAP),
            None => None,
        }
    }

    /// Pause between ticks. Machine-readable runs never sleep.
    pub(crate) fn tick_delay(&self) -> Option<Duration> {
        if self.json || self.tick_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.tick_ms))
        }
    }
}

fn parse_cell(value: &str) -> Result<CellCoord, String> {
    let (column, row) = value
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{value}`"))?;
    let column = column
        .trim()
        .parse::<u32>()
        .map_err(|error| format!("invalid x in `{value}`: {error}"))?;
    let row = row
        .trim()
        .parse::<u32>()
        .map_err(|error| format!("invalid y in `{value}`: {error}"))?;
    Ok(CellCoord::new(column, row))
}

#[cfg(test)]
mod tests {
    use super::{parse_cell, Cli, LevelArg, DIVERGENT_TICK_CAP};
    use clap::{CommandFactory, Parser};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::time::Duration;
    use wandering_core::{CellCoord, ConfigurationError};

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cells_parse_with_optional_spaces() {
        assert_eq!(parse_cell("3,4"), Ok(CellCoord::new(3, 4)));
        assert_eq!(parse_cell(" 0 , 12 "), Ok(CellCoord::new(0, 12)));
    }

    #[test]
    fn malformed_cells_are_rejected() {
        assert!(parse_cell("3").is_err());
        assert!(parse_cell("-1,2").is_err());
        assert!(parse_cell("a,b").is_err());
    }

    #[test]
    fn defaults_play_kindergarten_at_half_second_ticks() {
        let cli = Cli::try_parse_from(["wandering-game"]).expect("defaults parse");
        assert_eq!(cli.level, LevelArg::K2);
        assert_eq!(cli.tick_delay(), Some(Duration::from_millis(500)));
        assert_eq!(cli.replays, 0);
        assert!(cli.players.is_empty());
    }

    #[test]
    fn repeated_players_build_an_elementary_setup() {
        let cli = Cli::try_parse_from([
            "wandering-game",
            "--level",
            "3-5",
            "--rows",
            "4",
            "--cols",
            "6",
            "--player",
            "0,0",
            "--player",
            "5,3",
        ])
        .expect("arguments parse");

        let setup = cli
            .setup(&mut ChaCha8Rng::seed_from_u64(1))
            .expect("valid setup");
        assert_eq!(setup.grid().columns(), 6);
        assert_eq!(setup.grid().rows(), 4);
        assert_eq!(setup.placements().len(), 2);
        assert_eq!(cli.tick_cap(&setup), None);
    }

    #[test]
    fn invalid_elementary_setup_surfaces_configuration_error() {
        let cli = Cli::try_parse_from(["wandering-game", "--level", "3-5", "--player", "1,1"])
            .expect("arguments parse");

        assert_eq!(
            cli.setup(&mut ChaCha8Rng::seed_from_u64(1)).map(|_| ()),
            Err(ConfigurationError::PlayerCountOutOfRange { count: 1 })
        );
    }

    #[test]
    fn divergent_setups_receive_a_tick_cap() {
        let cli = Cli::try_parse_from([
            "wandering-game",
            "--level",
            "3-5",
            "--player",
            "0,0",
            "--player",
            "1,0",
        ])
        .expect("arguments parse");
        let setup = cli
            .setup(&mut ChaCha8Rng::seed_from_u64(1))
            .expect("valid setup");

        assert_eq!(cli.tick_cap(&setup), Some(DIVERGENT_TICK_CAP));
    }

    #[test]
    fn json_runs_do_not_sleep() {
        let cli = Cli::try_parse_from(["wandering-game", "--json"]).expect("arguments parse");
        assert_eq!(cli.tick_delay(), None);
    }
}
