use wandering_core::{in_bounds_moves, CellCoord, Direction, DirectionSelector, DirectionSet, GridSpec};
use wandering_system_movement::{Config, RandomWalk};

#[test]
fn selections_are_always_legal() {
    let grid = GridSpec::new(3, 2).expect("valid grid");
    let mut walk = RandomWalk::new(Config::new(0x5eed));

    for column in 0..grid.columns() {
        for row in 0..grid.rows() {
            let legal = in_bounds_moves(CellCoord::new(column, row), &grid);
            for _ in 0..64 {
                let direction = walk.select(legal).expect("legal moves available");
                assert!(
                    legal.contains(direction),
                    "{direction:?} is not legal at ({column}, {row})"
                );
            }
        }
    }
}

#[test]
fn same_seed_replays_identical_choices() {
    let mut first = RandomWalk::new(Config::new(42));
    let mut second = RandomWalk::new(Config::new(42));
    let all = DirectionSet::all();

    let first_run: Vec<_> = (0..128).map(|_| first.select(all)).collect();
    let second_run: Vec<_> = (0..128).map(|_| second.select(all)).collect();

    assert_eq!(first_run, second_run, "seeded walks diverged");
}

#[test]
fn choices_cover_every_legal_direction() {
    let mut walk = RandomWalk::new(Config::new(7));
    let mut counts = [0_u32; 4];

    for _ in 0..4_000 {
        let direction = walk.select(DirectionSet::all()).expect("non-empty set");
        let slot = Direction::ALL
            .iter()
            .position(|candidate| *candidate == direction)
            .expect("canonical direction");
        counts[slot] += 1;
    }

    for (direction, count) in Direction::ALL.iter().zip(counts) {
        assert!(
            (700..=1_300).contains(&count),
            "{direction:?} chosen {count} times out of 4000"
        );
    }
}

#[test]
fn empty_set_yields_no_direction() {
    let mut walk = RandomWalk::from_entropy();
    assert_eq!(walk.select(DirectionSet::empty()), None);
}
