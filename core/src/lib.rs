#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Wandering Game engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! to the round controller, the world advances one tick at a time, and then
//! broadcasts [`Event`] values for systems and surfaces to react to
//! deterministically. Grid geometry lives here as pure functions so every
//! crate agrees on which moves are legal.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to the Wandering Game.";

/// Smallest accepted grid side, measured in cells.
pub const MIN_GRID_SIDE: u32 = 2;

/// Largest accepted grid side for the variable grid mode, measured in cells.
pub const MAX_GRID_SIDE: u32 = 15;

/// Fewest players a configurable game may start with.
pub const MIN_PLAYERS: usize = 2;

/// Most players a configurable game may start with.
pub const MAX_PLAYERS: usize = 4;

/// Colours assigned to players in the order they are configured.
pub const PLAYER_PALETTE: [ActorColor; MAX_PLAYERS] = [
    ActorColor::Red,
    ActorColor::Blue,
    ActorColor::Green,
    ActorColor::Yellow,
];

/// Colours assigned to merge successors, indexed by the merge counter.
pub const MERGE_PALETTE: [ActorColor; 3] =
    [ActorColor::Purple, ActorColor::Orange, ActorColor::Cyan];

/// Colour assigned to merge successors once [`MERGE_PALETTE`] is exhausted.
pub const MERGE_FALLBACK: ActorColor = ActorColor::Black;

/// Selects the colour of the successor created by the merge with the provided index.
#[must_use]
pub fn merge_color(merge_index: u32) -> ActorColor {
    usize::try_from(merge_index)
        .ok()
        .and_then(|index| MERGE_PALETTE.get(index).copied())
        .unwrap_or(MERGE_FALLBACK)
}

/// Commands that express every request a surface may send to a running game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Advances the simulation by exactly one tick.
    Tick,
    /// Stops the game; later ticks are ignored.
    Cancel,
    /// Rebuilds the game from the original starting cells with empty statistics.
    ReplaySameCoordinates,
    /// Abandons the game so the surface can collect a fresh setup.
    StartNewGame,
}

/// Events broadcast by the engine after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Confirms that an actor entered the board.
    ActorCreated {
        /// Identifier allocated to the actor.
        actor: ActorId,
        /// Cell the actor occupies.
        cell: CellCoord,
        /// Appearance assigned to the actor.
        color: ActorColor,
    },
    /// Confirms that an actor moved a single step.
    ActorMoved {
        /// Identifier of the actor that moved.
        actor: ActorId,
        /// Cell the actor occupied before the tick.
        from: CellCoord,
        /// Cell the actor occupies after the tick.
        to: CellCoord,
    },
    /// Confirms that an actor left the board.
    ActorRemoved {
        /// Identifier of the actor that was removed.
        actor: ActorId,
        /// Cell the actor occupied when it was removed.
        cell: CellCoord,
    },
    /// Reports that at least one coincidence was merged, closing the round.
    RoundEnded {
        /// Number of ticks the round lasted.
        moves: u32,
        /// Number of actors still on the board after the merge.
        survivors: usize,
    },
    /// Reports that a single actor remains and the game is over.
    GameFinished {
        /// Statistics accumulated over every round of the game.
        summary: StatsSummary,
    },
    /// Reports that the game restarts from its original coordinates.
    ///
    /// Precedes the removal of the previous game's actors; every round
    /// reported before it belongs to the previous game.
    ReplayStarted,
    /// Reports that the player asked to abandon the game and configure a new one.
    NewGameRequested,
}

/// Outcome of advancing the world by a single tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepResult {
    /// No coincidence occurred; the round continues.
    Continuing,
    /// One or more coincidences were merged and more than one actor remains.
    RoundEnded {
        /// Number of live actors after the merge.
        survivors: usize,
    },
    /// Exactly one actor remains.
    GameOver,
}

/// Capability that picks one direction from the legal moves of an actor.
///
/// Implementations must return a member of `legal`. Returning `None` leaves the
/// actor where it stands for the current tick.
pub trait DirectionSelector {
    /// Chooses one of the provided legal directions.
    fn select(&mut self, legal: DirectionSet) -> Option<Direction>;
}

impl<S> DirectionSelector for &mut S
where
    S: DirectionSelector + ?Sized,
{
    fn select(&mut self, legal: DirectionSet) -> Option<Direction> {
        (**self).select(legal)
    }
}

/// Visual appearance applied to an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorColor {
    /// First player colour.
    Red,
    /// Second player colour.
    Blue,
    /// Third player colour.
    Green,
    /// Fourth player colour.
    Yellow,
    /// Colour of the first merge successor.
    Purple,
    /// Colour of the second merge successor.
    Orange,
    /// Colour of the third merge successor.
    Cyan,
    /// Colour of every later merge successor.
    Black,
}

impl ActorColor {
    /// Lower-case human readable name of the colour.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Purple => "purple",
            Self::Orange => "orange",
            Self::Cyan => "cyan",
            Self::Black => "black",
        }
    }
}

/// Axis-aligned single-step movement directions. Rows grow downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction in canonical order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Cell reached by stepping once from `cell`, or `None` when the step underflows.
    #[must_use]
    pub fn apply(self, cell: CellCoord) -> Option<CellCoord> {
        match self {
            Self::Up => cell
                .row()
                .checked_sub(1)
                .map(|row| CellCoord::new(cell.column(), row)),
            Self::Down => cell
                .row()
                .checked_add(1)
                .map(|row| CellCoord::new(cell.column(), row)),
            Self::Left => cell
                .column()
                .checked_sub(1)
                .map(|column| CellCoord::new(column, cell.row())),
            Self::Right => cell
                .column()
                .checked_add(1)
                .map(|column| CellCoord::new(column, cell.row())),
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Self::Up => 0b0001,
            Self::Down => 0b0010,
            Self::Left => 0b0100,
            Self::Right => 0b1000,
        }
    }
}

/// Compact set of [`Direction`] values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DirectionSet {
    bits: u8,
}

impl DirectionSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Creates a set holding every direction.
    #[must_use]
    pub const fn all() -> Self {
        Self { bits: 0b1111 }
    }

    /// Returns a copy of the set that also contains `direction`.
    #[must_use]
    pub const fn with(self, direction: Direction) -> Self {
        Self {
            bits: self.bits | direction.bit(),
        }
    }

    /// Reports whether `direction` belongs to the set.
    #[must_use]
    pub const fn contains(self, direction: Direction) -> bool {
        self.bits & direction.bit() != 0
    }

    /// Number of directions in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Reports whether the set holds no direction.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Iterator over the members in canonical order.
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL
            .into_iter()
            .filter(move |direction| self.contains(*direction))
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, direction| set.with(direction))
    }
}

/// Unique identifier assigned to an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(u32);

impl ActorId {
    /// Creates a new actor identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as column (x) and row (y) coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index (x) of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index (y) of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Dimensions of the board measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSpec {
    columns: u32,
    rows: u32,
}

impl GridSpec {
    /// Creates a grid description, rejecting sides shorter than [`MIN_GRID_SIDE`].
    pub fn new(columns: u32, rows: u32) -> Result<Self, ConfigurationError> {
        if columns < MIN_GRID_SIDE || rows < MIN_GRID_SIDE {
            return Err(ConfigurationError::GridTooSmall { columns, rows });
        }
        Ok(Self { columns, rows })
    }

    /// Creates a square grid with the provided side length.
    pub fn square(side: u32) -> Result<Self, ConfigurationError> {
        Self::new(side, side)
    }

    /// Number of columns (width) contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows (height) contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Total number of cells in the grid.
    #[must_use]
    pub fn cell_count(&self) -> u64 {
        u64::from(self.columns) * u64::from(self.rows)
    }

    /// Reports whether the cell lies within the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }
}

/// Reports whether `cell` lies within `grid`.
#[must_use]
pub const fn validate(cell: CellCoord, grid: &GridSpec) -> bool {
    grid.contains(cell)
}

/// Directions that keep an actor standing on `cell` inside `grid` after one step.
///
/// Out-of-bounds cells have no legal moves.
#[must_use]
pub fn in_bounds_moves(cell: CellCoord, grid: &GridSpec) -> DirectionSet {
    if !grid.contains(cell) {
        return DirectionSet::empty();
    }

    Direction::ALL
        .into_iter()
        .filter(|direction| {
            direction
                .apply(cell)
                .map_or(false, |destination| grid.contains(destination))
        })
        .collect()
}

/// Starting cell and appearance for one actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// Cell the actor starts on.
    pub cell: CellCoord,
    /// Appearance assigned to the actor.
    pub color: ActorColor,
}

impl Placement {
    /// Creates a placement for an actor with the provided colour.
    #[must_use]
    pub const fn new(cell: CellCoord, color: ActorColor) -> Self {
        Self { cell, color }
    }
}

/// Aggregate statistics derived from the per-round move counts of a game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    /// Sum of every recorded round.
    pub total: u64,
    /// Shortest recorded round, zero when nothing was recorded.
    pub min: u32,
    /// Longest recorded round, zero when nothing was recorded.
    pub max: u32,
    /// Mean round length, zero when nothing was recorded.
    pub average: f64,
    /// Number of recorded rounds.
    pub rounds: usize,
}

/// Reasons a game configuration may be rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A grid side was shorter than two cells.
    #[error(
        "grid of {columns}x{rows} is too small; both sides must be at least {}",
        MIN_GRID_SIDE
    )]
    GridTooSmall {
        /// Requested number of columns.
        columns: u32,
        /// Requested number of rows.
        rows: u32,
    },
    /// A grid side fell outside the configurable range.
    #[error(
        "number of {axis} must be between {} and {}, got {value}",
        MIN_GRID_SIDE,
        MAX_GRID_SIDE
    )]
    GridOutOfRange {
        /// Name of the offending axis ("rows" or "columns").
        axis: &'static str,
        /// Requested side length.
        value: u32,
    },
    /// The number of players fell outside the configurable range.
    #[error(
        "number of players must be between {} and {}, got {count}",
        MIN_PLAYERS,
        MAX_PLAYERS
    )]
    PlayerCountOutOfRange {
        /// Requested number of players.
        count: usize,
    },
    /// The grid cannot host the requested number of players.
    #[error("more players ({players}) than available grid spaces ({cells})")]
    TooManyPlayers {
        /// Requested number of players.
        players: usize,
        /// Number of cells in the grid.
        cells: u64,
    },
    /// A starting cell lies outside the grid.
    #[error("coordinates for player {player} are out of bounds")]
    OutOfBounds {
        /// One-based index of the offending player.
        player: usize,
    },
    /// A starting cell is shared with an earlier player.
    #[error("coordinates for player {player} overlap with another player")]
    Overlap {
        /// One-based index of the offending player.
        player: usize,
    },
    /// No actor was provided.
    #[error("a game needs at least one actor")]
    NoActors,
}
