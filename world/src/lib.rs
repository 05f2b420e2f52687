#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for the Wandering Game.
//!
//! The [`World`] owns the live actors of one game session and advances them a
//! single tick at a time. Every tick moves each actor one step in a direction
//! picked by the injected [`DirectionSelector`], merges actors that landed on
//! the same cell, and reports the outcome as a [`StepResult`] plus a batch of
//! [`Event`] values.

use std::collections::{hash_map::Entry, HashMap};

use log::{debug, warn};
use thiserror::Error;
use wandering_core::{
    in_bounds_moves, merge_color, validate, ActorColor, ActorId, CellCoord, ConfigurationError,
    Direction, DirectionSelector, DirectionSet, Event, GridSpec, Placement, StepResult,
};

/// Errors raised when an actor is asked to perform an impossible move.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WalkError {
    /// The requested direction would leave the grid.
    #[error("actor {} cannot move {direction:?} from {cell:?}", .actor.get())]
    IllegalMove {
        /// Identifier of the actor asked to move.
        actor: ActorId,
        /// Cell the actor occupies.
        cell: CellCoord,
        /// Direction that was requested.
        direction: Direction,
    },
}

/// Avatar wandering across the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    id: ActorId,
    color: ActorColor,
    cell: CellCoord,
}

impl Actor {
    /// Creates an actor standing on `cell`.
    #[must_use]
    pub const fn new(id: ActorId, color: ActorColor, cell: CellCoord) -> Self {
        Self { id, color, cell }
    }

    /// Identifier of the actor.
    #[must_use]
    pub const fn id(&self) -> ActorId {
        self.id
    }

    /// Appearance of the actor.
    #[must_use]
    pub const fn color(&self) -> ActorColor {
        self.color
    }

    /// Cell the actor currently occupies.
    #[must_use]
    pub const fn position(&self) -> CellCoord {
        self.cell
    }

    /// Directions the actor may take without leaving `grid`.
    #[must_use]
    pub fn legal_moves(&self, grid: &GridSpec) -> DirectionSet {
        in_bounds_moves(self.cell, grid)
    }

    /// Moves the actor one step and returns its new cell.
    ///
    /// The actor is left untouched when `direction` is not currently legal.
    pub fn apply_move(
        &mut self,
        direction: Direction,
        grid: &GridSpec,
    ) -> Result<CellCoord, WalkError> {
        let illegal = WalkError::IllegalMove {
            actor: self.id,
            cell: self.cell,
            direction,
        };

        if !self.legal_moves(grid).contains(direction) {
            return Err(illegal);
        }

        let destination = direction.apply(self.cell).ok_or(illegal)?;
        self.cell = destination;
        Ok(destination)
    }
}

/// Represents the authoritative state of one Wandering Game session.
#[derive(Clone, Debug)]
pub struct World {
    grid: GridSpec,
    placements: Vec<Placement>,
    actors: Vec<Actor>,
    next_actor: u32,
    merge_count: u32,
    round_moves: u32,
    tick_index: u64,
}

impl World {
    /// Creates a world with one actor per placement, in placement order.
    ///
    /// Placements must lie within `grid` and occupy pairwise distinct cells.
    pub fn new(grid: GridSpec, placements: &[Placement]) -> Result<Self, ConfigurationError> {
        validate_placements(&grid, placements)?;

        let mut world = Self {
            grid,
            placements: placements.to_vec(),
            actors: Vec::with_capacity(placements.len()),
            next_actor: 0,
            merge_count: 0,
            round_moves: 0,
            tick_index: 0,
        };
        for placement in placements {
            let actor = world.allocate_actor(placement.cell, placement.color);
            world.actors.push(actor);
        }
        Ok(world)
    }

    /// Emits a creation event for every live actor, in merge-priority order.
    pub fn announce(&self, out_events: &mut Vec<Event>) {
        for actor in &self.actors {
            out_events.push(Event::ActorCreated {
                actor: actor.id(),
                cell: actor.position(),
                color: actor.color(),
            });
        }
    }

    /// Advances the world by one tick.
    ///
    /// Every coincidence group produced by the tick is merged, in the order of
    /// its earliest member. Stepping a world with a single live actor is a
    /// no-op that reports [`StepResult::GameOver`].
    pub fn step<S>(&mut self, selector: &mut S, out_events: &mut Vec<Event>) -> StepResult
    where
        S: DirectionSelector + ?Sized,
    {
        if self.actors.len() <= 1 {
            return StepResult::GameOver;
        }

        self.move_actors(selector, out_events);
        self.round_moves = self.round_moves.saturating_add(1);
        self.tick_index = self.tick_index.saturating_add(1);

        let groups = coincidence_groups(&self.actors);
        if groups.is_empty() {
            return StepResult::Continuing;
        }

        self.merge(groups, out_events);

        let moves = std::mem::take(&mut self.round_moves);
        let survivors = self.actors.len();
        debug!("round closed after {moves} moves with {survivors} actors left");
        out_events.push(Event::RoundEnded { moves, survivors });

        if survivors == 1 {
            StepResult::GameOver
        } else {
            StepResult::RoundEnded { survivors }
        }
    }

    fn move_actors<S>(&mut self, selector: &mut S, out_events: &mut Vec<Event>)
    where
        S: DirectionSelector + ?Sized,
    {
        let grid = self.grid;
        for actor in &mut self.actors {
            let Some(direction) = selector.select(actor.legal_moves(&grid)) else {
                continue;
            };

            let from = actor.position();
            match actor.apply_move(direction, &grid) {
                Ok(to) => out_events.push(Event::ActorMoved {
                    actor: actor.id(),
                    from,
                    to,
                }),
                Err(error) => warn!("{error}; selector ignored the legal moves"),
            }
        }
    }

    fn merge(&mut self, groups: Vec<Coincidence>, out_events: &mut Vec<Event>) {
        let mut merged = vec![false; self.actors.len()];
        let mut successors = Vec::with_capacity(groups.len());

        for group in groups {
            for &index in &group.members {
                merged[index] = true;
                let actor = &self.actors[index];
                out_events.push(Event::ActorRemoved {
                    actor: actor.id(),
                    cell: actor.position(),
                });
            }

            let color = merge_color(self.merge_count);
            self.merge_count = self.merge_count.saturating_add(1);
            let successor = self.allocate_actor(group.cell, color);
            debug!(
                "merged {} actors at {:?} into actor {} ({})",
                group.members.len(),
                group.cell,
                successor.id().get(),
                color.name()
            );
            out_events.push(Event::ActorCreated {
                actor: successor.id(),
                cell: successor.position(),
                color: successor.color(),
            });
            successors.push(successor);
        }

        let mut index = 0;
        self.actors.retain(|_| {
            let keep = !merged[index];
            index += 1;
            keep
        });
        self.actors.extend(successors);
    }

    fn allocate_actor(&mut self, cell: CellCoord, color: ActorColor) -> Actor {
        let id = ActorId::new(self.next_actor);
        self.next_actor = self.next_actor.saturating_add(1);
        Actor::new(id, color, cell)
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{Actor, World};
    use wandering_core::{ActorColor, ActorId, CellCoord, GridSpec, Placement};

    /// Grid the world was configured with.
    #[must_use]
    pub fn grid(world: &World) -> GridSpec {
        world.grid
    }

    /// Live actors in merge-priority order.
    #[must_use]
    pub fn actors(world: &World) -> &[Actor] {
        &world.actors
    }

    /// Captures a read-only view describing every live actor.
    #[must_use]
    pub fn actor_view(world: &World) -> ActorView {
        ActorView {
            snapshots: world
                .actors
                .iter()
                .map(|actor| ActorSnapshot {
                    id: actor.id(),
                    cell: actor.position(),
                    color: actor.color(),
                })
                .collect(),
        }
    }

    /// Number of actors still on the board.
    #[must_use]
    pub fn live_count(world: &World) -> usize {
        world.actors.len()
    }

    /// Actors standing on the provided cell.
    #[must_use]
    pub fn occupants(world: &World, cell: CellCoord) -> Vec<ActorId> {
        world
            .actors
            .iter()
            .filter(|actor| actor.position() == cell)
            .map(Actor::id)
            .collect()
    }

    /// Ticks elapsed in the round currently in progress.
    #[must_use]
    pub fn round_moves(world: &World) -> u32 {
        world.round_moves
    }

    /// Number of merge successors created so far.
    #[must_use]
    pub fn merge_count(world: &World) -> u32 {
        world.merge_count
    }

    /// Ticks elapsed since the world was created.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Placements the world was created from.
    #[must_use]
    pub fn placements(world: &World) -> &[Placement] {
        &world.placements
    }

    /// Read-only snapshot describing all live actors.
    #[derive(Clone, Debug, Default, PartialEq, Eq)]
    pub struct ActorView {
        snapshots: Vec<ActorSnapshot>,
    }

    impl ActorView {
        /// Iterator over the captured snapshots in merge-priority order.
        pub fn iter(&self) -> impl Iterator<Item = &ActorSnapshot> {
            self.snapshots.iter()
        }

        /// Number of captured snapshots.
        #[must_use]
        pub fn len(&self) -> usize {
            self.snapshots.len()
        }

        /// Reports whether the view holds no actor.
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.snapshots.is_empty()
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<ActorSnapshot> {
            self.snapshots
        }
    }

    /// Immutable representation of a single actor used for queries.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ActorSnapshot {
        /// Identifier assigned to the actor.
        pub id: ActorId,
        /// Cell currently occupied by the actor.
        pub cell: CellCoord,
        /// Appearance assigned to the actor.
        pub color: ActorColor,
    }
}

#[derive(Debug)]
struct Coincidence {
    cell: CellCoord,
    members: Vec<usize>,
}

fn coincidence_groups(actors: &[Actor]) -> Vec<Coincidence> {
    let mut groups: Vec<Coincidence> = Vec::new();
    let mut group_by_cell: HashMap<CellCoord, usize> = HashMap::with_capacity(actors.len());

    for (index, actor) in actors.iter().enumerate() {
        match group_by_cell.entry(actor.position()) {
            Entry::Occupied(slot) => groups[*slot.get()].members.push(index),
            Entry::Vacant(slot) => {
                let _ = slot.insert(groups.len());
                groups.push(Coincidence {
                    cell: actor.position(),
                    members: vec![index],
                });
            }
        }
    }

    groups.retain(|group| group.members.len() > 1);
    groups
}

fn validate_placements(
    grid: &GridSpec,
    placements: &[Placement],
) -> Result<(), ConfigurationError> {
    if placements.is_empty() {
        return Err(ConfigurationError::NoActors);
    }

    for (index, placement) in placements.iter().enumerate() {
        let player = index + 1;
        if !validate(placement.cell, grid) {
            return Err(ConfigurationError::OutOfBounds { player });
        }
        if placements[..index]
            .iter()
            .any(|earlier| earlier.cell == placement.cell)
        {
            return Err(ConfigurationError::Overlap { player });
        }
    }

    Ok(())
}
