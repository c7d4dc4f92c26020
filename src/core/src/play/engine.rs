use crate::play::{PlayActor, Stage};
use crate::render::{Camera, Renderer};
use crate::{PlaybookResult, StepMode};
use log::trace;

/// Runs one display frame over every actor on a stage.
pub struct PlayEngine;

impl PlayEngine {
    /// Walks the actors in draw order. Each one gets the colliders it currently
    /// overlaps, updates, lets physics advance (in `StepMode::PerActor`) and
    /// draws itself. An update error aborts the frame.
    pub fn frame(
        stage: &mut Stage,
        renderer: &mut dyn Renderer,
        camera: &Camera,
    ) -> PlaybookResult<()> {
        let order = stage.registry.draw_order();
        let step_mode = stage.tuning.step_mode;

        trace!(
            "frame at {:.1}ms over {} actors",
            stage.clock.elapsed(),
            order.len()
        );

        for id in order {
            // removed earlier in this frame
            let Some(mut actor) = stage.registry.checkout(id) else {
                continue;
            };

            let collisions = actor
                .handles()
                .collider
                .map(|collider| stage.world.intersections_with(collider))
                .unwrap_or_default();

            if let Err(err) = actor.update(stage, camera, &collisions) {
                stage.registry.checkin(id, actor);
                return Err(err);
            }

            if step_mode == StepMode::PerActor {
                stage.world.step();
            }

            actor.draw(stage, renderer, camera);
            stage.registry.checkin(id, actor);
        }

        if step_mode == StepMode::PerFrame {
            stage.world.step();
        }

        if stage.clock.is_recording() {
            if let Some(history) = &mut stage.history {
                history.add_at(stage.clock.elapsed(), stage.world.snapshot()?);
            }
        }

        stage.input.clear_keys();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::play::{ActorKind, TimedPath};
    use crate::render::{DrawCommand, DrawList, NullRenderer};
    use crate::{Coordinate, PlaybookError, Tuning};

    #[test]
    fn test_per_actor_steps_once_per_actor() {
        let mut stage = Stage::headless(Tuning::default()).unwrap();
        stage.spawn_player(Coordinate::new(5.0, 5.0)).unwrap();
        let actors = stage.registry.len() as u64;

        PlayEngine::frame(&mut stage, &mut NullRenderer, &Camera::default()).unwrap();

        assert_eq!(stage.world.steps(), actors);
    }

    #[test]
    fn test_per_frame_steps_once() {
        let tuning = Tuning {
            step_mode: StepMode::PerFrame,
            ..Tuning::default()
        };
        let mut stage = Stage::headless(tuning).unwrap();
        stage.spawn_player(Coordinate::new(5.0, 5.0)).unwrap();

        PlayEngine::frame(&mut stage, &mut NullRenderer, &Camera::default()).unwrap();
        PlayEngine::frame(&mut stage, &mut NullRenderer, &Camera::default()).unwrap();

        assert_eq!(stage.world.steps(), 2);
    }

    #[test]
    fn test_draws_in_depth_order() {
        let mut stage = Stage::headless(Tuning::default()).unwrap();
        let player = stage.spawn_player(Coordinate::new(5.0, 5.0)).unwrap();
        stage.set_ball_carrier(Some(player)).unwrap();
        let mut list = DrawList::new();

        PlayEngine::frame(&mut stage, &mut list, &Camera::default()).unwrap();

        let position = |predicate: fn(&DrawCommand) -> bool| {
            list.commands.iter().position(predicate).unwrap()
        };
        let grass = position(|c| matches!(c, DrawCommand::Rect { .. }));
        let clock = position(|c| matches!(c, DrawCommand::Text { .. }));
        let player_circle = position(|c| matches!(c, DrawCommand::Circle { .. }));
        let football = position(|c| matches!(c, DrawCommand::Ellipse { .. }));

        assert!(grass < clock);
        assert!(clock < player_circle);
        assert!(player_circle < football);
    }

    #[test]
    fn test_pressed_keys_cleared_after_frame() {
        let mut stage = Stage::headless(Tuning::default()).unwrap();
        stage.input.press_key("1");

        PlayEngine::frame(&mut stage, &mut NullRenderer, &Camera::default()).unwrap();

        assert_eq!(stage.input.pressed_keys().count(), 0);
    }

    #[test]
    fn test_update_error_aborts_and_keeps_actor() {
        let mut stage = Stage::headless(Tuning::default()).unwrap();
        let player = stage.spawn_player(Coordinate::new(0.0, 0.0)).unwrap();
        stage.record().unwrap();
        stage
            .registry
            .player_mut(player)
            .unwrap()
            .set_target_path(TimedPath::with_points(
                Coordinate::new(0.0, 0.0),
                [(0.0, Coordinate::new(10.0, 0.0))],
            ));
        let body = stage.registry.handles(player).unwrap().body;
        stage.world.remove_body(body);

        let result = PlayEngine::frame(&mut stage, &mut NullRenderer, &Camera::default());

        assert!(matches!(result, Err(PlaybookError::MissingRigidBody(_))));
        assert!(stage.registry.player(player).is_some());
        assert_eq!(stage.registry.actors_by_kind(ActorKind::Player), &[player]);
    }
}
