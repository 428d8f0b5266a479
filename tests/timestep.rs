use platformer::constants::physics::{MAX_FRAME_TIME, TIME_STEP};
use platformer::physics::{FixedTimestep, PhysicsWorld};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

fn timestep() -> FixedTimestep {
    FixedTimestep::new(TIME_STEP, MAX_FRAME_TIME)
}

#[test]
fn test_steady_frames_take_one_step_each() {
    let mut timestep = timestep();
    let steps: u32 = (0..600).map(|_| timestep.advance(TIME_STEP + 1e-6)).sum();
    assert_eq!(steps, 600);
}

#[test]
fn test_steps_match_elapsed_time() {
    let deltas = [0.001, 0.016, 0.033, 0.1, 0.0, 0.25, 0.007, 0.05, 0.2, 0.013];

    let mut timestep = timestep();
    let mut total = 0.0;
    let mut steps = 0;
    for _ in 0..20 {
        for dt in deltas {
            total += dt;
            steps += timestep.advance(dt);

            let simulated = steps as f32 * TIME_STEP;
            assert_that(&(simulated + timestep.accumulator())).is_close_to(total, 1e-3);
            assert_that(&timestep.accumulator()).is_less_than(TIME_STEP);
            assert_that(&timestep.accumulator()).is_greater_than_or_equal_to(0.0);
        }
    }
}

#[test]
fn test_spiral_of_death_is_bounded() {
    let mut timestep = timestep();
    let max_steps = (MAX_FRAME_TIME / TIME_STEP).ceil() as u32;

    for dt in [1.0, 5.0, 60.0, f32::MAX] {
        assert_that(&timestep.advance(dt)).is_less_than_or_equal_to(max_steps);
    }
}

#[test]
fn test_physics_world_counts_steps() {
    let mut world = PhysicsWorld::new(glam::Vec2::new(0.0, -40.0), timestep(), 6, 2);

    assert_eq!(world.step_fixed(0.11), 6);
    assert_eq!(world.step_fixed(0.0), 0);
    assert_eq!(world.steps_taken(), 6);
    assert_eq!(world.timestep().step(), TIME_STEP);
}

#[test]
fn test_level_steps_once_per_frame() {
    let mut level = common::level(vec![common::ground(0.0, 640.0)], common::settings_at(100.0));
    let mut camera = common::camera();

    // A long frame is clamped to a quarter second.
    level.tick(0.5, &mut camera, &[]);
    assert_that(&level.physics().steps_taken()).is_greater_than_or_equal_to(14);
    assert_that(&level.physics().steps_taken()).is_less_than_or_equal_to(15);

    common::run_frames(&mut level, &mut camera, 60);
    assert_that(&level.physics().steps_taken()).is_greater_than_or_equal_to(74);
    assert_that(&level.physics().steps_taken()).is_less_than_or_equal_to(76);
}
