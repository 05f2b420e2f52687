#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Rendering contracts shared by Wandering Game presentation adapters.
//!
//! Adapters never inspect the world directly. They receive the event stream
//! produced by the round controller, fold it into a [`BoardState`] through the
//! [`Surface`] callbacks, and hand the board to a [`Presenter`] backend.

use std::{collections::BTreeMap, fmt};

use anyhow::Result as AnyResult;
use wandering_core::{ActorColor, ActorId, CellCoord, Event, GridSpec, StatsSummary};

/// Receiver of the game's observable events.
///
/// Each callback mirrors one [`Event`] variant. Surfaces only ever learn about
/// the game through these calls.
pub trait Surface {
    /// A new actor appeared in `cell`.
    fn on_actor_created(&mut self, actor: ActorId, cell: CellCoord, color: ActorColor);

    /// A live actor moved to `cell`.
    fn on_actor_moved(&mut self, actor: ActorId, cell: CellCoord);

    /// An actor left the board.
    fn on_actor_removed(&mut self, actor: ActorId);

    /// A round closed after `moves` ticks.
    fn on_round_ended(&mut self, moves: u32);

    /// The game reached a single survivor.
    fn on_game_over(&mut self, summary: &StatsSummary);

    /// The game restarts from its original coordinates.
    fn on_replay_started(&mut self) {}

    /// The player asked to configure a fresh game.
    fn on_new_game_requested(&mut self) {}
}

/// Routes each event to the matching [`Surface`] callback in order.
pub fn dispatch<S>(events: &[Event], surface: &mut S)
where
    S: Surface + ?Sized,
{
    for event in events {
        match event {
            Event::ActorCreated { actor, cell, color } => {
                surface.on_actor_created(*actor, *cell, *color);
            }
            Event::ActorMoved { actor, to, .. } => surface.on_actor_moved(*actor, *to),
            Event::ActorRemoved { actor, .. } => surface.on_actor_removed(*actor),
            Event::RoundEnded { moves, .. } => surface.on_round_ended(*moves),
            Event::GameFinished { summary } => surface.on_game_over(summary),
            Event::ReplayStarted => surface.on_replay_started(),
            Event::NewGameRequested => surface.on_new_game_requested(),
        }
    }
}

/// Actor token drawn on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardToken {
    /// Cell the token occupies.
    pub cell: CellCoord,
    /// Color the token is painted with.
    pub color: ActorColor,
}

/// Surface-side mirror of the board assembled purely from events.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoardState {
    tokens: BTreeMap<ActorId, BoardToken>,
    completed_rounds: Vec<u32>,
    summary: Option<StatsSummary>,
}

impl BoardState {
    /// Creates an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokens currently on the board ordered by actor identifier.
    pub fn tokens(&self) -> impl Iterator<Item = (ActorId, BoardToken)> + '_ {
        self.tokens.iter().map(|(id, token)| (*id, *token))
    }

    /// Number of tokens on the board.
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Color of the token drawn in `cell`, if any.
    ///
    /// Between a move and the merge that follows it two tokens can share a
    /// cell; the most recently created one wins.
    #[must_use]
    pub fn occupant_at(&self, cell: CellCoord) -> Option<ActorColor> {
        self.tokens
            .values()
            .rev()
            .find(|token| token.cell == cell)
            .map(|token| token.color)
    }

    /// Move counts of the rounds reported so far.
    #[must_use]
    pub fn completed_rounds(&self) -> &[u32] {
        &self.completed_rounds
    }

    /// Final statistics once the game is over.
    #[must_use]
    pub fn summary(&self) -> Option<&StatsSummary> {
        self.summary.as_ref()
    }
}

impl Surface for BoardState {
    fn on_actor_created(&mut self, actor: ActorId, cell: CellCoord, color: ActorColor) {
        let _ = self.tokens.insert(actor, BoardToken { cell, color });
    }

    fn on_actor_moved(&mut self, actor: ActorId, cell: CellCoord) {
        if let Some(token) = self.tokens.get_mut(&actor) {
            token.cell = cell;
        }
    }

    fn on_actor_removed(&mut self, actor: ActorId) {
        let _ = self.tokens.remove(&actor);
    }

    fn on_round_ended(&mut self, moves: u32) {
        self.completed_rounds.push(moves);
    }

    fn on_game_over(&mut self, summary: &StatsSummary) {
        self.summary = Some(*summary);
    }

    fn on_replay_started(&mut self) {
        self.completed_rounds.clear();
        self.summary = None;
    }
}

/// Presentation backend capable of drawing the board of a Wandering Game.
pub trait Presenter {
    /// Draws the current board for the provided grid.
    fn present(&mut self, grid: &GridSpec, board: &BoardState) -> AnyResult<()>;

    /// Announces a closed round. Backends without a message area ignore it.
    fn present_round(&mut self, round: usize, moves: u32, survivors: usize) -> AnyResult<()> {
        let _ = (round, moves, survivors);
        Ok(())
    }

    /// Shows the statistics block once the game is over.
    fn present_summary(&mut self, summary: &StatsSummary) -> AnyResult<()>;

    /// Shows the statistics of a game stopped after `ticks` before it ended.
    fn present_stopped(&mut self, ticks: u64, summary: &StatsSummary) -> AnyResult<()> {
        let _ = ticks;
        self.present_summary(summary)
    }
}

/// Formats statistics the way every presenter reports them.
#[derive(Clone, Copy, Debug)]
pub struct SummaryReport<'a>(pub &'a StatsSummary);

impl fmt::Display for SummaryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.0;
        writeln!(f, "Total Moves: {}", summary.total)?;
        writeln!(f, "Longest Run Without Meeting: {}", summary.max)?;
        writeln!(f, "Shortest Run: {}", summary.min)?;
        write!(f, "Average Run: {:.2}", summary.average)
    }
}
