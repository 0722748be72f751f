use tots_core::{
    CellCoord, Command, Direction, Event, LevelData, LevelError, MotionState, TileKind, Velocity,
};
use tots_world::{self as world, query, World, WorldConfig};

const E: i64 = 0;
const W: i64 = 2;
const H: i64 = 3;
const S: i64 = 4;
const G: i64 = 5;

fn walled_room() -> Vec<Vec<i64>> {
    vec![
        vec![W, W, W, W, W],
        vec![W, E, E, E, W],
        vec![W, E, E, E, W],
        vec![W, E, E, E, W],
        vec![W, W, W, W, W],
    ]
}

fn load(spawn: (i64, i64), map: Vec<Vec<i64>>) -> World {
    World::from_level(&LevelData::new(spawn, map), WorldConfig::default()).expect("level loads")
}

fn queue(world: &mut World, direction: Direction) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::QueueMovement { direction }, &mut events);
    events
}

fn tick(world: &mut World) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::Tick, &mut events);
    events
}

#[test]
fn idle_tick_without_input_changes_nothing() {
    let mut world = load((1, 1), walled_room());
    let before = query::player(&world);

    let events = tick(&mut world);

    assert_eq!(events, vec![Event::TimeAdvanced { tick: 1 }]);
    assert_eq!(query::player(&world), before);
    assert_eq!(before.motion, MotionState::Idle);
    assert_eq!(before.velocity, Velocity::ZERO);
}

#[test]
fn single_input_steps_right_and_keeps_moving() {
    let mut world = load((1, 1), walled_room());
    assert_eq!(
        queue(&mut world, Direction::Right),
        vec![Event::MovementQueued {
            direction: Direction::Right,
        }]
    );

    let _ = tick(&mut world);

    let player = query::player(&world);
    assert_eq!(player.cell, CellCoord::new(2, 1));
    assert!(player.is_moving());
    assert_eq!(player.velocity, Velocity::new(1, 0));
}

#[test]
fn player_slides_until_a_wall_stops_it() {
    let mut world = load((1, 1), walled_room());
    let _ = queue(&mut world, Direction::Right);

    let _ = tick(&mut world);
    let _ = tick(&mut world);
    assert_eq!(query::player(&world).cell, CellCoord::new(3, 1));

    let events = tick(&mut world);

    let player = query::player(&world);
    assert_eq!(player.cell, CellCoord::new(3, 1));
    assert_eq!(player.velocity, Velocity::ZERO);
    assert_eq!(player.motion, MotionState::Idle);
    assert!(events.contains(&Event::MovementHalted {
        at: CellCoord::new(3, 1),
        blocked: Some(CellCoord::new(4, 1)),
    }));
}

#[test]
fn hazard_kills_player_one_cell_short() {
    let map = vec![vec![W, W, W, W], vec![W, E, H, W], vec![W, W, W, W]];
    let mut world = load((1, 1), map);
    let _ = queue(&mut world, Direction::Right);

    let events = tick(&mut world);

    let player = query::player(&world);
    assert!(!player.alive);
    assert_eq!(player.cell, CellCoord::new(1, 1));
    assert!(events.contains(&Event::PlayerPerished {
        hazard: CellCoord::new(2, 1),
    }));
}

#[test]
fn collectible_is_taken_and_cleared() {
    let map = vec![
        vec![W, W, W, W, W],
        vec![W, E, S, E, W],
        vec![W, W, W, W, W],
    ];
    let mut world = load((1, 1), map);
    assert_eq!(query::stars_remaining(&world), 1);
    let _ = queue(&mut world, Direction::Right);

    let events = tick(&mut world);

    let player = query::player(&world);
    assert_eq!(player.stars_collected, 1);
    assert_eq!(player.cell, CellCoord::new(2, 1));
    assert!(player.is_moving());
    assert_eq!(
        query::tile(&world, CellCoord::new(2, 1)),
        Some(TileKind::Empty)
    );
    assert_eq!(query::stars_remaining(&world), 0);
    assert!(events.contains(&Event::StarCollected {
        cell: CellCoord::new(2, 1),
        total: 1,
    }));
}

#[test]
fn goal_wins_and_moves_player_onto_it() {
    let map = vec![vec![W, W, W, W], vec![W, E, G, W], vec![W, W, W, W]];
    let mut world = load((1, 1), map);
    let _ = queue(&mut world, Direction::Right);

    let events = tick(&mut world);

    let player = query::player(&world);
    assert!(player.won);
    assert_eq!(player.cell, CellCoord::new(2, 1));
    assert!(events.contains(&Event::GoalReached {
        cell: CellCoord::new(2, 1),
    }));
}

#[test]
fn finished_level_never_moves_the_player_again() {
    let map = vec![vec![E, G, E, E]];
    let mut world = load((0, 0), map);
    let _ = queue(&mut world, Direction::Right);
    let _ = tick(&mut world);
    assert!(query::player(&world).won);

    for _ in 0..3 {
        let events = tick(&mut world);
        assert_eq!(events.len(), 1, "only the clock may advance: {events:?}");
    }

    assert_eq!(query::player(&world).cell, CellCoord::new(1, 0));
    assert_eq!(query::tick_index(&world), 4);
}

#[test]
fn queued_direction_waits_until_the_slide_ends() {
    let mut world = load((1, 1), walled_room());
    let _ = queue(&mut world, Direction::Right);
    let _ = tick(&mut world);

    let _ = queue(&mut world, Direction::Down);
    assert_eq!(query::player(&world).queued, 1);
    let _ = tick(&mut world);
    assert_eq!(query::player(&world).cell, CellCoord::new(3, 1));

    // Blocked by the wall: halts with the down input still pending.
    let _ = tick(&mut world);
    let player = query::player(&world);
    assert_eq!(player.cell, CellCoord::new(3, 1));
    assert_eq!(player.queued, 1);

    let _ = tick(&mut world);
    let player = query::player(&world);
    assert_eq!(player.cell, CellCoord::new(3, 2));
    assert_eq!(player.velocity, Velocity::new(0, 1));
    assert_eq!(player.queued, 0);
}

#[test]
fn repeated_input_after_a_halt_is_debounced() {
    let mut world = load((1, 1), walled_room());
    let _ = queue(&mut world, Direction::Right);
    for _ in 0..3 {
        let _ = tick(&mut world);
    }
    assert_eq!(query::player(&world).motion, MotionState::Idle);

    assert!(queue(&mut world, Direction::Right).is_empty());
    assert_eq!(query::player(&world).last_movement, Some(Direction::Right));

    let _ = tick(&mut world);
    assert_eq!(query::player(&world).cell, CellCoord::new(3, 1));
}

#[test]
fn larger_queue_buffers_several_turns() {
    let config = WorldConfig::new(3);
    let level = LevelData::new((1, 1), walled_room());
    let mut world = World::from_level(&level, config).expect("level loads");

    for direction in [Direction::Down, Direction::Right, Direction::Up] {
        assert_eq!(queue(&mut world, direction).len(), 1);
    }
    assert!(queue(&mut world, Direction::Left).is_empty());

    for _ in 0..12 {
        let _ = tick(&mut world);
    }

    assert_eq!(query::player(&world).cell, CellCoord::new(3, 1));
}

#[test]
fn unrecognized_codes_block_movement_and_are_listed_once() {
    let map = vec![vec![E, 8, 8], vec![E, 1, E]];
    let mut world = load((0, 0), map);
    assert_eq!(query::unrecognized_codes(&world), &[1, 8]);

    let _ = queue(&mut world, Direction::Right);
    let _ = tick(&mut world);

    let player = query::player(&world);
    assert_eq!(player.cell, CellCoord::new(0, 0));
    assert_eq!(player.motion, MotionState::Idle);
}

#[test]
fn spawn_outside_the_map_is_rejected() {
    let error = World::from_level(
        &LevelData::new((5, 0), walled_room()),
        WorldConfig::default(),
    )
    .expect_err("spawn outside the map");
    assert_eq!(
        error,
        LevelError::SpawnOutOfBounds {
            x: 5,
            y: 0,
            columns: 5,
            rows: 5,
        }
    );

    assert!(World::from_level(
        &LevelData::new((-1, 2), walled_room()),
        WorldConfig::default()
    )
    .is_err());
}
