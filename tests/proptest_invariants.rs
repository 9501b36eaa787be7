//! Property-based invariant tests for the game core.
//!
//! Random key and timer sequences are replayed against a small board and the
//! following must hold after every event:
//!
//! 1. While running, no two body segments share a cell.
//! 2. While running, food never sits on the body.
//! 3. The heading never flips to the exact opposite in one event (restart aside).
//! 4. Score and length grow together by at most one per event.
//! 5. The head always stays inside the interior.

use std::collections::HashSet;

use frame_snake::config::GridSize;
use frame_snake::game::{GameState, GameStatus};
use frame_snake::input::Key;
use frame_snake::snake::Position;
use proptest::prelude::*;

const BOARD: GridSize = GridSize {
    width: 10,
    height: 8,
};

#[derive(Debug, Clone, Copy)]
enum Event {
    Key(Key),
    Pulse,
}

fn event_strategy() -> impl Strategy<Value = Event> {
    prop_oneof![
        4 => Just(Event::Pulse),
        2 => Just(Event::Key(Key::Up)),
        2 => Just(Event::Key(Key::Down)),
        2 => Just(Event::Key(Key::Left)),
        2 => Just(Event::Key(Key::Right)),
        1 => Just(Event::Key(Key::Char('p'))),
        1 => Just(Event::Key(Key::Char('h'))),
        1 => Just(Event::Key(Key::Char('r'))),
        1 => Just(Event::Key(Key::Char('x'))),
    ]
}

fn apply(state: &mut GameState, event: Event) {
    match event {
        Event::Key(key) => {
            let _ = state.handle_key(key);
        }
        Event::Pulse => state.tick(),
    }
}

fn body_is_disjoint(state: &GameState) -> bool {
    let cells: HashSet<Position> = state
        .snake
        .segments()
        .map(|segment| segment.position)
        .collect();
    cells.len() == state.snake.len()
}

proptest! {
    #[test]
    fn invariants_hold_for_any_event_sequence(
        seed in any::<u64>(),
        events in prop::collection::vec(event_strategy(), 1..300),
    ) {
        let mut state = GameState::new_with_seed(BOARD, seed);
        state.restart();

        for event in events {
            let before_direction = state.direction();
            let before_score = state.score;
            let before_len = state.snake.len();
            let restarting = matches!(event, Event::Key(Key::Char('r')));

            apply(&mut state, event);

            prop_assert!(state.snake.head().is_inside_interior(BOARD));

            if state.status == GameStatus::Running {
                prop_assert!(body_is_disjoint(&state), "overlap in {:?}", state.snake);
                prop_assert!(!state.snake.occupies(state.food.position));
            }

            if !restarting {
                prop_assert_ne!(state.direction(), before_direction.opposite());

                let gained = state.score - before_score;
                prop_assert!(gained <= 1);
                if state.status != GameStatus::Won {
                    prop_assert_eq!(state.snake.len() - before_len, gained as usize);
                }
            }
        }
    }

    #[test]
    fn speed_only_decreases_between_restarts(
        seed in any::<u64>(),
        events in prop::collection::vec(event_strategy(), 1..300),
    ) {
        let mut state = GameState::new_with_seed(BOARD, seed);
        state.restart();

        for event in events {
            let before = state.speed;
            apply(&mut state, event);

            if !matches!(event, Event::Key(Key::Char('r'))) {
                prop_assert!(state.speed <= before);
            }
            prop_assert!(state.speed >= 5);
        }
    }

    #[test]
    fn wrapped_positions_land_in_interior(
        x in -1i32..=10,
        y in -1i32..=8,
    ) {
        let wrapped = Position { x, y }.wrapped(BOARD);
        prop_assert!(wrapped.is_inside_interior(BOARD));
    }
}
