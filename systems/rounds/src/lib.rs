#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Round controller that drives one game from its first tick to the final statistics.
//!
//! The controller never schedules itself. Surfaces own the fixed-delay timer
//! and submit [`Command::Tick`] once per interval; the controller advances the
//! world, records closed rounds, and tracks the lifecycle [`Phase`].

use log::{debug, info};
use wandering_core::{
    Command, ConfigurationError, DirectionSelector, Event, StatsSummary, StepResult,
};
use wandering_system_analytics::StatsRecorder;
use wandering_system_bootstrap::Setup;
use wandering_world::{query, World};

/// Lifecycle stage of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Actors are placed but not yet announced to the surface.
    Initializing,
    /// Ticks advance the current round.
    Running,
    /// The previous tick merged actors and closed a round.
    RoundBoundary,
    /// A single actor remains, or the player abandoned the game.
    Finished,
}

/// Orchestrates the tick schedule, statistics and restarts of a game.
#[derive(Debug)]
pub struct RoundController<S> {
    setup: Setup,
    selector: S,
    pristine: World,
    world: World,
    stats: StatsRecorder,
    phase: Phase,
    running: bool,
    abandoned: bool,
    final_summary: Option<StatsSummary>,
}

impl<S> RoundController<S>
where
    S: DirectionSelector,
{
    /// Creates a controller for the validated setup.
    pub fn new(setup: Setup, selector: S) -> Result<Self, ConfigurationError> {
        let pristine = World::new(setup.grid(), setup.placements())?;

        Ok(Self {
            setup,
            selector,
            world: pristine.clone(),
            pristine,
            stats: StatsRecorder::new(),
            phase: Phase::Initializing,
            running: false,
            abandoned: false,
            final_summary: None,
        })
    }

    /// Announces the starting actors and begins accepting ticks.
    pub fn start(&mut self, out_events: &mut Vec<Event>) -> Phase {
        if self.phase != Phase::Initializing {
            return self.phase;
        }

        self.world.announce(out_events);
        self.phase = Phase::Running;
        self.running = true;
        info!(
            "{} game started on a {}x{} grid with {} players",
            self.setup.level().label(),
            self.setup.grid().columns(),
            self.setup.grid().rows(),
            self.setup.placements().len()
        );
        self.phase
    }

    /// Applies the provided command, routing it to the matching transition.
    pub fn apply(&mut self, command: Command, out_events: &mut Vec<Event>) -> Phase {
        match command {
            Command::Tick => self.tick(out_events),
            Command::Cancel => self.cancel(),
            Command::ReplaySameCoordinates => self.replay_same_coordinates(out_events),
            Command::StartNewGame => self.request_new_game(out_events),
        }
    }

    /// Advances the game by one tick.
    ///
    /// Ticks delivered while the controller is stopped are ignored.
    pub fn tick(&mut self, out_events: &mut Vec<Event>) -> Phase {
        if !self.running {
            debug!("ignoring tick while {:?}", self.phase);
            return self.phase;
        }

        let mut events = Vec::new();
        let result = self.world.step(&mut self.selector, &mut events);
        self.stats.handle(&events);
        out_events.extend(events);

        self.phase = match result {
            StepResult::Continuing => Phase::Running,
            StepResult::RoundEnded { .. } => Phase::RoundBoundary,
            StepResult::GameOver => self.finish(out_events),
        };
        self.phase
    }

    /// Stops accepting ticks without discarding any state.
    pub fn cancel(&mut self) -> Phase {
        if self.running {
            info!("game cancelled during {:?}", self.phase);
        }
        self.running = false;
        self.phase
    }

    /// Rebuilds the game from the original starting cells with empty statistics.
    ///
    /// Only a stopped game may be replayed, and never one abandoned for a new
    /// setup; the request is ignored otherwise.
    pub fn replay_same_coordinates(&mut self, out_events: &mut Vec<Event>) -> Phase {
        if self.running || self.abandoned || self.phase == Phase::Initializing {
            debug!("replay ignored while {:?}", self.phase);
            return self.phase;
        }

        out_events.push(Event::ReplayStarted);
        for actor in query::actors(&self.world) {
            out_events.push(Event::ActorRemoved {
                actor: actor.id(),
                cell: actor.position(),
            });
        }

        self.world = self.pristine.clone();
        self.stats = StatsRecorder::new();
        self.final_summary = None;
        self.phase = Phase::Initializing;
        self.start(out_events)
    }

    /// Abandons the game so the surface can collect a fresh setup.
    pub fn request_new_game(&mut self, out_events: &mut Vec<Event>) -> Phase {
        self.running = false;
        self.abandoned = true;
        self.phase = Phase::Finished;
        out_events.push(Event::NewGameRequested);
        self.phase
    }

    fn finish(&mut self, out_events: &mut Vec<Event>) -> Phase {
        self.running = false;
        let summary = self.stats.summary();
        info!(
            "game finished after {} moves over {} rounds",
            summary.total, summary.rounds
        );
        self.final_summary = Some(summary);
        out_events.push(Event::GameFinished { summary });
        Phase::Finished
    }
}

impl<S> RoundController<S> {
    /// Current lifecycle stage.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Reports whether ticks are currently accepted.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Setup the game was created from.
    #[must_use]
    pub const fn setup(&self) -> &Setup {
        &self.setup
    }

    /// Authoritative world of the current game.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Round records collected so far.
    #[must_use]
    pub const fn stats(&self) -> &StatsRecorder {
        &self.stats
    }

    /// Statistics over the rounds completed so far.
    #[must_use]
    pub fn summary(&self) -> StatsSummary {
        self.stats.summary()
    }

    /// Statistics frozen when the game finished.
    #[must_use]
    pub const fn final_summary(&self) -> Option<StatsSummary> {
        self.final_summary
    }
}
