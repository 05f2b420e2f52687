use wandering_core::{
    ActorColor, ActorId, CellCoord, Direction, DirectionSelector, DirectionSet, Event, GridSpec,
    Placement, StepResult,
};
use wandering_system_movement::{Config, RandomWalk, ScriptedWalk};
use wandering_world::{query, World};

const STEP_LIMIT: u32 = 1_000_000;

fn world(columns: u32, rows: u32, cells: &[(u32, u32)]) -> World {
    let grid = GridSpec::new(columns, rows).expect("valid grid");
    let placements: Vec<_> = cells
        .iter()
        .zip([
            ActorColor::Red,
            ActorColor::Blue,
            ActorColor::Green,
            ActorColor::Yellow,
        ])
        .map(|(&(column, row), color)| Placement::new(CellCoord::new(column, row), color))
        .collect();
    World::new(grid, &placements).expect("valid placements")
}

fn cells(world: &World) -> Vec<(u32, u32)> {
    query::actor_view(world)
        .iter()
        .map(|snapshot| (snapshot.cell.column(), snapshot.cell.row()))
        .collect()
}

fn round_endings(events: &[Event]) -> Vec<u32> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::RoundEnded { moves, .. } => Some(*moves),
            _ => None,
        })
        .collect()
}

#[test]
fn two_by_two_diagonal_game_ends_after_one_round() {
    for seed in 0..32 {
        let mut world = world(2, 2, &[(0, 0), (1, 1)]);
        let mut walk = RandomWalk::new(Config::new(seed));
        let mut log = Vec::new();
        let mut steps = 0;

        while world.step(&mut walk, &mut log) != StepResult::GameOver {
            steps += 1;
            assert!(steps < STEP_LIMIT, "seed {seed}: walk never converged");
        }

        let rounds = round_endings(&log);
        assert_eq!(rounds.len(), 1, "seed {seed}: expected a single round");
        assert!(rounds[0] >= 1);
        assert_eq!(query::live_count(&world), 1);
    }
}

#[test]
fn random_corner_game_finishes_with_single_survivor() {
    for seed in 0..32 {
        let mut world = world(5, 5, &[(0, 0), (4, 0), (0, 4), (4, 4)]);
        let mut walk = RandomWalk::new(Config::new(seed));
        let mut steps = 0;
        let mut rounds = Vec::new();

        loop {
            let before = query::live_count(&world);
            let mut events = Vec::new();
            let result = world.step(&mut walk, &mut events);
            steps += 1;

            let removed = events
                .iter()
                .filter(|event| matches!(event, Event::ActorRemoved { .. }))
                .count();
            let created = events
                .iter()
                .filter(|event| matches!(event, Event::ActorCreated { .. }))
                .count();
            assert_eq!(query::live_count(&world), before - removed + created);
            rounds.extend(round_endings(&events));

            if result == StepResult::GameOver {
                break;
            }
            assert!(steps < STEP_LIMIT, "seed {seed}: walk never converged");
        }

        assert_eq!(query::live_count(&world), 1);
        assert!((1..=3).contains(&rounds.len()), "seed {seed}: {rounds:?}");
        assert_eq!(rounds.iter().map(|&moves| u64::from(moves)).sum::<u64>(), u64::from(steps));
    }
}

#[test]
fn scripted_corner_game_merges_one_pair_per_round() {
    use Direction::{Down, Left, Right, Up};

    let mut world = world(5, 5, &[(0, 0), (4, 0), (0, 4), (4, 4)]);
    let mut walk = ScriptedWalk::new([
        Right, Left, Right, Left, // nobody meets
        Right, Left, Up, Up, // red and blue meet at (2, 0)
        Right, Left, Down, // green and yellow meet at (2, 3)
        Down, Up, // both successors meet at (2, 2)
    ]);
    let mut log = Vec::new();

    assert_eq!(world.step(&mut walk, &mut log), StepResult::Continuing);
    assert_eq!(
        world.step(&mut walk, &mut log),
        StepResult::RoundEnded { survivors: 3 }
    );
    assert_eq!(cells(&world), vec![(1, 3), (3, 3), (2, 0)]);

    assert_eq!(
        world.step(&mut walk, &mut log),
        StepResult::RoundEnded { survivors: 2 }
    );
    assert_eq!(cells(&world), vec![(2, 1), (2, 3)]);

    assert_eq!(world.step(&mut walk, &mut log), StepResult::GameOver);
    assert_eq!(round_endings(&log), vec![2, 1, 1]);

    let survivor = query::actor_view(&world).into_vec();
    assert_eq!(survivor.len(), 1);
    assert_eq!(survivor[0].id, ActorId::new(6));
    assert_eq!(survivor[0].cell, CellCoord::new(2, 2));
    assert_eq!(survivor[0].color, ActorColor::Cyan);
    assert_eq!(query::merge_count(&world), 3);
    assert_eq!(query::tick_index(&world), 4);
}

#[test]
fn disjoint_coincidences_merge_in_the_same_tick() {
    use Direction::{Left, Right};

    let mut world = world(4, 2, &[(0, 0), (2, 0), (0, 1), (2, 1)]);
    let mut walk = ScriptedWalk::new([Right, Left, Right, Left]);
    let mut events = Vec::new();

    let result = world.step(&mut walk, &mut events);

    assert_eq!(result, StepResult::RoundEnded { survivors: 2 });
    let survivors = query::actor_view(&world).into_vec();
    assert_eq!(survivors.len(), 2);
    assert_eq!(survivors[0].cell, CellCoord::new(1, 0));
    assert_eq!(survivors[0].color, ActorColor::Purple);
    assert_eq!(survivors[1].cell, CellCoord::new(1, 1));
    assert_eq!(survivors[1].color, ActorColor::Orange);
    assert_eq!(round_endings(&events), vec![1], "one round closes per tick");
}

#[test]
fn three_way_coincidence_collapses_to_one_actor() {
    use Direction::{Down, Left, Right};

    let mut world = world(3, 3, &[(0, 1), (1, 0), (2, 1)]);
    let mut walk = ScriptedWalk::new([Right, Down, Left]);
    let mut events = Vec::new();

    assert_eq!(world.step(&mut walk, &mut events), StepResult::GameOver);
    assert_eq!(cells(&world), vec![(1, 1)]);
    assert_eq!(
        events
            .iter()
            .filter(|event| matches!(event, Event::ActorRemoved { .. }))
            .count(),
        3
    );
    assert_eq!(round_endings(&events), vec![1]);
}

#[test]
fn merge_events_follow_moves_in_order() {
    use Direction::{Left, Right};

    let mut world = world(3, 2, &[(0, 0), (2, 0)]);
    let mut walk = ScriptedWalk::new([Right, Left]);
    let mut events = Vec::new();

    assert_eq!(world.step(&mut walk, &mut events), StepResult::GameOver);
    assert_eq!(
        events,
        vec![
            Event::ActorMoved {
                actor: ActorId::new(0),
                from: CellCoord::new(0, 0),
                to: CellCoord::new(1, 0),
            },
            Event::ActorMoved {
                actor: ActorId::new(1),
                from: CellCoord::new(2, 0),
                to: CellCoord::new(1, 0),
            },
            Event::ActorRemoved {
                actor: ActorId::new(0),
                cell: CellCoord::new(1, 0),
            },
            Event::ActorRemoved {
                actor: ActorId::new(1),
                cell: CellCoord::new(1, 0),
            },
            Event::ActorCreated {
                actor: ActorId::new(2),
                cell: CellCoord::new(1, 0),
                color: ActorColor::Purple,
            },
            Event::RoundEnded {
                moves: 1,
                survivors: 1,
            },
        ]
    );
}

struct Always(Option<Direction>);

impl DirectionSelector for Always {
    fn select(&mut self, _legal: DirectionSet) -> Option<Direction> {
        self.0
    }
}

#[test]
fn selector_abstaining_leaves_actors_in_place() {
    let mut world = world(3, 3, &[(0, 0), (2, 2)]);
    let mut events = Vec::new();

    for tick in 1..=3 {
        assert_eq!(
            world.step(&mut Always(None), &mut events),
            StepResult::Continuing
        );
        assert_eq!(query::round_moves(&world), tick);
    }

    assert!(events.is_empty());
    assert_eq!(cells(&world), vec![(0, 0), (2, 2)]);
    assert_eq!(query::tick_index(&world), 3);
}

#[test]
fn illegal_selection_is_ignored_without_failing_the_step() {
    let mut world = world(3, 3, &[(0, 0), (2, 0), (1, 2)]);
    let mut events = Vec::new();

    assert_eq!(
        world.step(&mut Always(Some(Direction::Up)), &mut events),
        StepResult::Continuing
    );

    assert_eq!(cells(&world), vec![(0, 0), (2, 0), (1, 1)]);
    assert_eq!(
        events,
        vec![Event::ActorMoved {
            actor: ActorId::new(2),
            from: CellCoord::new(1, 2),
            to: CellCoord::new(1, 1),
        }]
    );
    assert_eq!(query::round_moves(&world), 1);
}

#[test]
fn stepping_a_finished_world_is_a_no_op() {
    let mut world = world(3, 3, &[(1, 1)]);
    let mut walk = RandomWalk::new(Config::new(3));
    let mut events = Vec::new();

    assert_eq!(world.step(&mut walk, &mut events), StepResult::GameOver);
    assert!(events.is_empty());
    assert_eq!(query::tick_index(&world), 0);
    assert_eq!(cells(&world), vec![(1, 1)]);
}

#[test]
fn announce_reports_initial_actors_in_order() {
    let world = world(4, 4, &[(3, 0), (0, 3)]);
    let mut events = Vec::new();
    world.announce(&mut events);

    assert_eq!(
        events,
        vec![
            Event::ActorCreated {
                actor: ActorId::new(0),
                cell: CellCoord::new(3, 0),
                color: ActorColor::Red,
            },
            Event::ActorCreated {
                actor: ActorId::new(1),
                cell: CellCoord::new(0, 3),
                color: ActorColor::Blue,
            },
        ]
    );
    assert_eq!(query::placements(&world).len(), 2);
    assert_eq!(
        query::occupants(&world, CellCoord::new(3, 0)),
        vec![ActorId::new(0)]
    );
}

#[test]
fn actors_stay_in_bounds_throughout_random_walks() {
    let mut world = world(2, 3, &[(0, 0), (1, 2), (1, 0)]);
    let grid = query::grid(&world);
    let mut walk = RandomWalk::new(Config::new(11));

    for _ in 0..200 {
        let mut events = Vec::new();
        let result = world.step(&mut walk, &mut events);
        for snapshot in query::actor_view(&world).iter() {
            assert!(grid.contains(snapshot.cell));
        }
        if result == StepResult::GameOver {
            break;
        }
    }
}
