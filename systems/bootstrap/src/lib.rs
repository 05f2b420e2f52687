#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that validates game setups and builds level presets.

use log::info;
use rand::Rng;
use wandering_core::{
    validate, ActorColor, CellCoord, ConfigurationError, GridSpec, Placement, MAX_GRID_SIDE,
    MAX_PLAYERS, MIN_GRID_SIDE, MIN_PLAYERS, PLAYER_PALETTE,
};

/// Smallest side of the square kindergarten grid.
pub const KINDERGARTEN_MIN_SIDE: u32 = 3;

/// Largest side of the square kindergarten grid.
pub const KINDERGARTEN_MAX_SIDE: u32 = 7;

/// Rules shown to players before they pick a level.
pub const RULES: &str = "Rules for Kindergarten Level (K-2):
- The grid is always square.
- Two players start in diagonally opposite corners.
- Players wander randomly until they meet.

Rules for 3-5 Level:
- The grid can be rectangular.
- Players can start anywhere on the grid.
- The number of players can be between 2 and 4.
- Players wander randomly until they all meet.";

/// Difficulty levels offered by the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Level {
    /// Square grid with two players starting in opposite corners.
    Kindergarten,
    /// Player-configured grid with two to four players.
    Elementary,
}

impl Level {
    /// Short label shown when selecting the level.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Kindergarten => "K-2",
            Self::Elementary => "3-5",
        }
    }
}

/// Raw values collected by a setup form before validation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SetupForm {
    /// Requested number of rows.
    pub rows: u32,
    /// Requested number of columns.
    pub columns: u32,
    /// Requested starting cells, one per player.
    pub players: Vec<CellCoord>,
}

impl SetupForm {
    /// Validates the form and assigns player colours in configuration order.
    ///
    /// Checks run in the order the player sees them: player count, rows,
    /// columns, capacity, then each coordinate.
    pub fn validate(&self) -> Result<Setup, ConfigurationError> {
        let count = self.players.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(ConfigurationError::PlayerCountOutOfRange { count });
        }
        check_side("rows", self.rows)?;
        check_side("columns", self.columns)?;

        let grid = GridSpec::new(self.columns, self.rows)?;
        let cells = grid.cell_count();
        if count as u64 >= cells {
            return Err(ConfigurationError::TooManyPlayers {
                players: count,
                cells,
            });
        }

        let mut placements: Vec<Placement> = Vec::with_capacity(count);
        for (index, (&cell, color)) in self.players.iter().zip(PLAYER_PALETTE).enumerate() {
            let player = index + 1;
            if !validate(cell, &grid) {
                return Err(ConfigurationError::OutOfBounds { player });
            }
            if placements.iter().any(|placement| placement.cell == cell) {
                return Err(ConfigurationError::Overlap { player });
            }
            placements.push(Placement::new(cell, color));
        }

        Ok(Setup {
            level: Level::Elementary,
            grid,
            placements,
        })
    }
}

/// Validated game configuration ready to start a round controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Setup {
    level: Level,
    grid: GridSpec,
    placements: Vec<Placement>,
}

impl Setup {
    /// Builds a kindergarten game on a square grid with a random side.
    pub fn kindergarten<R>(rng: &mut R) -> Result<Self, ConfigurationError>
    where
        R: Rng + ?Sized,
    {
        let side = rng.gen_range(KINDERGARTEN_MIN_SIDE..=KINDERGARTEN_MAX_SIDE);
        Self::kindergarten_with_side(side)
    }

    /// Builds a kindergarten game on a square grid with the provided side.
    pub fn kindergarten_with_side(side: u32) -> Result<Self, ConfigurationError> {
        let grid = GridSpec::square(side)?;
        let far = side - 1;
        info!("kindergarten grid of {side}x{side}");

        Ok(Self {
            level: Level::Kindergarten,
            grid,
            placements: vec![
                Placement::new(CellCoord::new(0, 0), ActorColor::Red),
                Placement::new(CellCoord::new(far, far), ActorColor::Blue),
            ],
        })
    }

    /// Level the setup was created for.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// Grid the game is played on.
    #[must_use]
    pub const fn grid(&self) -> GridSpec {
        self.grid
    }

    /// Starting cell and colour of every player, in configuration order.
    #[must_use]
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Reports whether every player can eventually share a cell.
    ///
    /// Each tick flips the checkerboard colour of every actor, so actors that
    /// start on differently coloured cells never meet.
    #[must_use]
    pub fn converges(&self) -> bool {
        let mut parities = self
            .placements
            .iter()
            .map(|placement| (placement.cell.column() + placement.cell.row()) % 2);
        match parities.next() {
            Some(first) => parities.all(|parity| parity == first),
            None => true,
        }
    }
}

fn check_side(axis: &'static str, value: u32) -> Result<(), ConfigurationError> {
    if (MIN_GRID_SIDE..=MAX_GRID_SIDE).contains(&value) {
        Ok(())
    } else {
        Err(ConfigurationError::GridOutOfRange { axis, value })
    }
}
