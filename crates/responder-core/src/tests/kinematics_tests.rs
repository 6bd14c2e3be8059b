use super::*;
use crate::event::TargetId;

const TARGET: TargetId = TargetId(7);

fn start(x: f32, y: f32) -> InputEvent {
    InputEvent::start(TARGET, x, y)
}

fn sample(x: f32, y: f32) -> InputEvent {
    InputEvent::moved(TARGET, x, y)
}

fn assert_close(actual: Point, expected: Point) {
    assert!(
        (actual.x - expected.x).abs() < 1e-5 && (actual.y - expected.y).abs() < 1e-5,
        "expected {expected:?}, got {actual:?}"
    );
}

#[test]
fn grant_seeds_positions_and_flags() {
    let state = granted(&GestureState::default(), &start(12.0, 30.0), 100);

    assert_eq!(state.xy, Point::new(12.0, 30.0));
    assert_eq!(state.initial, state.xy);
    assert_eq!(state.previous, state.xy);
    assert_eq!(state.delta, Point::ZERO);
    assert_eq!(state.local, Point::ZERO);
    assert_eq!(state.target, Some(TARGET));
    assert_eq!(state.time, 100);
    assert!(state.down);
    assert!(state.first);
    assert!(state.event.is_some());
}

#[test]
fn move_computes_delta_distance_and_previous() {
    let grant = granted(&GestureState::default(), &start(0.0, 0.0), 0);
    let state = moved(&grant, &sample(3.0, 4.0), 10);

    assert_eq!(state.delta, Point::new(3.0, 4.0));
    assert_eq!(state.distance, 5.0);
    assert_eq!(state.previous, Point::ZERO);
    assert_eq!(state.xy, Point::new(3.0, 4.0));
    assert_eq!(state.local, Point::new(3.0, 4.0));
    assert!(!state.first);
    assert!(state.down);
}

#[test]
fn velocity_is_step_length_over_elapsed_time() {
    let grant = granted(&GestureState::default(), &start(0.0, 0.0), 0);
    let first = moved(&grant, &sample(6.0, 8.0), 20);
    assert!((first.velocity - 0.5).abs() < 1e-6);

    let second = moved(&first, &sample(6.0, 18.0), 30);
    assert!((second.velocity - 1.0).abs() < 1e-6);
    assert!(second.velocity.is_finite() && second.velocity >= 0.0);
}

#[test]
fn equal_timestamps_carry_velocity_over() {
    let grant = granted(&GestureState::default(), &start(0.0, 0.0), 0);
    let first = moved(&grant, &sample(10.0, 0.0), 10);
    let second = moved(&first, &sample(50.0, 0.0), 10);

    assert_eq!(second.velocity, first.velocity);
    assert!(second.velocity.is_finite());
}

#[test]
fn zero_step_gives_zero_direction() {
    let grant = granted(&GestureState::default(), &start(5.0, 5.0), 0);
    let state = moved(&grant, &sample(5.0, 5.0), 16);

    assert_eq!(state.direction, Point::ZERO);
    assert_eq!(state.velocity, 0.0);
    assert!(!state.direction.x.is_nan() && !state.direction.y.is_nan());
}

#[test]
fn non_zero_step_gives_unit_direction() {
    let grant = granted(&GestureState::default(), &start(0.0, 0.0), 0);
    let state = moved(&grant, &sample(-3.0, 4.0), 16);

    assert!((state.direction.length() - 1.0).abs() < 1e-6);
    assert_close(state.direction, Point::new(-0.6, 0.8));
}

#[test]
fn local_offset_carries_across_cycles() {
    let cycle_one = granted(&GestureState::default(), &start(0.0, 0.0), 0);
    let cycle_one = moved(&cycle_one, &sample(10.0, 4.0), 16);
    let after_release = released(&cycle_one, &InputEvent::end(TARGET, 10.0, 4.0), 20);

    assert_eq!(after_release.local, Point::new(10.0, 4.0));
    assert_eq!(after_release.last_local, Point::new(10.0, 4.0));
    assert!(!after_release.down);
    assert!(!after_release.first);

    let cycle_two = granted(&after_release, &start(50.0, 50.0), 100);
    assert!(cycle_two.first);
    assert_eq!(cycle_two.local, Point::new(10.0, 4.0));

    let cycle_two = moved(&cycle_two, &sample(55.0, 52.0), 116);
    assert_eq!(cycle_two.delta, Point::new(5.0, 2.0));
    assert_eq!(cycle_two.local, Point::new(15.0, 6.0));
}

#[test]
fn terminate_commits_local_and_drops_event() {
    let state = granted(&GestureState::default(), &start(0.0, 0.0), 0);
    let state = moved(&state, &sample(-4.0, 2.0), 16);
    let state = terminated(&state, 20);

    assert!(state.event.is_none());
    assert_eq!(state.last_local, Point::new(-4.0, 2.0));
    assert!(!state.down);
    assert!(!state.first);

    let regrant = granted(&state, &start(1.0, 1.0), 40);
    assert_eq!(regrant.local, Point::new(-4.0, 2.0));
}

#[test]
fn release_retains_end_event() {
    let state = granted(&GestureState::default(), &start(0.0, 0.0), 0);
    let state = released(&state, &InputEvent::end(TARGET, 0.0, 0.0), 5);
    assert!(state.event.is_some());
}
