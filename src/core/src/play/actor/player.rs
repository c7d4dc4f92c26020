use crate::play::{
    Actor, ActorHandles, ActorId, ActorKind, BodyKind, PhysicsWorld, PlayActor, Stage, TimedPath,
};
use crate::render::{Camera, Color, Renderer, TextAlign};
use crate::shared::kinematics::{get_final_velocity, get_initial_velocity};
use crate::{Coordinate, PlaybookResult, Tuning};
use nalgebra::Vector2;
use rapier2d::prelude::ColliderHandle;

#[derive(Debug, Clone)]
pub struct Player {
    handles: ActorHandles,
    number: String,
    radius: f32,
    initial_position: Coordinate,
    position: Coordinate,
    target_path: Option<TimedPath>,
    traveled_path: TimedPath,
    selected: bool,
}

impl Player {
    pub fn new(
        world: &mut PhysicsWorld,
        tuning: &Tuning,
        number: impl Into<String>,
        at: Coordinate,
    ) -> Self {
        let body = world.add_body(BodyKind::Dynamic, at);
        let collider = world.add_ball_collider(body, tuning.player_radius, false);

        Player::with_handles(ActorHandles::new(body, Some(collider)), tuning, number, at)
    }

    pub fn with_handles(
        handles: ActorHandles,
        tuning: &Tuning,
        number: impl Into<String>,
        at: Coordinate,
    ) -> Self {
        Player {
            handles,
            number: number.into(),
            radius: tuning.player_radius,
            initial_position: at,
            position: at,
            target_path: None,
            traveled_path: TimedPath::new(at),
            selected: false,
        }
    }

    #[inline]
    pub fn number(&self) -> &str {
        &self.number
    }

    #[inline]
    pub fn position(&self) -> Coordinate {
        self.position
    }

    #[inline]
    pub fn initial_position(&self) -> Coordinate {
        self.initial_position
    }

    #[inline]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn target_path(&self) -> Option<&TimedPath> {
        self.target_path.as_ref()
    }

    pub fn traveled_path(&self) -> &TimedPath {
        &self.traveled_path
    }

    pub fn set_target_path(&mut self, path: TimedPath) {
        self.target_path = Some(path);
    }

    /// Replaces the route with one that holds the current position.
    pub fn reset_target_path(&mut self) {
        self.target_path = Some(TimedPath::new(self.position));
    }

    pub fn start_recording(&mut self) {
        self.traveled_path.start_recording();
    }

    fn record(&mut self, stage: &mut Stage) -> PlaybookResult<()> {
        let body = self.handles.body;
        let elapsed = stage.clock.elapsed();

        self.position = stage.world.translation(body)?;

        if !self.traveled_path.is_recording() {
            self.traveled_path.start_recording();
        }
        self.traveled_path.record_point(&stage.clock, self.position)?;

        if elapsed <= 0.0 {
            return Ok(());
        }

        if let Some(target_path) = &self.target_path {
            let target = target_path.coord_at_time(elapsed);
            let velocity = steering_velocity(
                self.position,
                target,
                stage.world.linvel(body)?,
                &stage.tuning,
            )?;

            stage.world.set_linvel(body, velocity)?;
        }

        Ok(())
    }

    fn replay(&mut self, stage: &mut Stage) -> PlaybookResult<()> {
        self.position = self.traveled_path.coord_at_time(stage.clock.elapsed());
        stage.world.set_translation(self.handles.body, self.position)
    }
}

/// Velocity that chases `target` without overshooting it.
///
/// Per axis the player either sprints (`v + a·d`) or brakes so it stops right
/// on the target (`sqrt(2·decel·d)`), whichever is slower. The result is capped
/// at max speed and is zero inside the deadzone.
pub fn steering_velocity(
    current: Coordinate,
    target: Coordinate,
    velocity: Vector2<f32>,
    tuning: &Tuning,
) -> PlaybookResult<Vector2<f32>> {
    if current.distance_to(&target) < tuning.player_deadzone {
        return Ok(Vector2::zeros());
    }

    let desired = Vector2::new(
        axis_velocity(target.x - current.x, velocity.x, tuning)?,
        axis_velocity(target.y - current.y, velocity.y, tuning)?,
    );

    Ok(desired.cap_magnitude(tuning.max_speed()))
}

fn axis_velocity(delta: f32, current: f32, tuning: &Tuning) -> PlaybookResult<f32> {
    let distance = delta.abs();
    let direction = if delta > 0.0 { 1.0 } else { -1.0 };

    let sprint = get_final_velocity(current, tuning.acceleration(), distance).abs();
    let settle = get_initial_velocity(0.0, -tuning.deceleration(), distance)?;

    Ok(direction * sprint.min(settle))
}

impl PlayActor for Player {
    fn kind(&self) -> ActorKind {
        ActorKind::Player
    }

    fn handles(&self) -> ActorHandles {
        self.handles
    }

    fn depth(&self) -> i32 {
        1
    }

    fn update(
        &mut self,
        stage: &mut Stage,
        _camera: &Camera,
        collisions: &[ColliderHandle],
    ) -> PlaybookResult<()> {
        self.selected = collisions
            .iter()
            .any(|collider| stage.registry.kind_of_collider(*collider) == Some(ActorKind::Pointer));

        if stage.clock.is_recording() {
            self.record(stage)
        } else {
            self.replay(stage)
        }
    }

    fn draw(&self, stage: &Stage, renderer: &mut dyn Renderer, camera: &Camera) {
        let elapsed = Some(stage.clock.elapsed());
        let to_screen = |coord: Coordinate| camera.to_screen(coord);

        if let Some(target_path) = &self.target_path {
            target_path.draw_path(renderer, to_screen, Color::WHITE, elapsed);
        }
        self.traveled_path.draw_path(renderer, to_screen, Color::YELLOW, elapsed);

        let center = camera.to_screen(self.position);
        let radius = self.radius * camera.scale_factor();
        let color = if self.selected { Color::RED } else { Color::BLUE };

        renderer.fill_circle(center, radius, color);
        renderer.fill_text(&self.number, center, radius, TextAlign::Left, Color::WHITE);
    }

    fn on_reset(&mut self, stage: &mut Stage, hard: bool) -> PlaybookResult<()> {
        self.position = self.initial_position;

        stage.world.set_translation(self.handles.body, self.initial_position)?;
        stage.world.set_linvel(self.handles.body, Vector2::zeros())?;

        if hard {
            self.traveled_path = TimedPath::new(self.initial_position);
        }

        Ok(())
    }

    fn delete_descendants(&mut self, id: ActorId, stage: &mut Stage) {
        stage.carrier.forget_player(id);
    }

    fn duplicate(&self) -> PlaybookResult<Actor> {
        Ok(Actor::Player(self.clone()))
    }

    fn finish_recording(&mut self) {
        self.traveled_path.stop_recording();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NullRenderer;

    fn assert_close(actual: f32, expected: f32) {
        assert!((actual - expected).abs() < 1e-4, "{actual} != {expected}");
    }

    #[test]
    fn test_far_target_caps_at_max_speed() {
        let tuning = Tuning::default();

        let velocity = steering_velocity(
            Coordinate::new(0.0, 0.0),
            Coordinate::new(100.0, 0.0),
            Vector2::zeros(),
            &tuning,
        )
        .unwrap();

        assert_close(velocity.norm(), tuning.max_speed());
        assert!(velocity.x > 0.0);
        assert_eq!(velocity.y, 0.0);
    }

    #[test]
    fn test_close_target_takes_slower_velocity() {
        let tuning = Tuning::default();

        let velocity = steering_velocity(
            Coordinate::new(0.0, 0.0),
            Coordinate::new(-1.0, 0.5),
            Vector2::zeros(),
            &tuning,
        )
        .unwrap();

        let sprint_x = tuning.acceleration();
        let sprint_y = tuning.acceleration() * 0.5;
        assert_close(velocity.x, -sprint_x);
        assert_close(velocity.y, sprint_y);
    }

    #[test]
    fn test_braking_wins_when_already_fast() {
        let tuning = Tuning::default();

        let velocity = steering_velocity(
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.5, 0.0),
            Vector2::new(2.0, 0.0),
            &tuning,
        )
        .unwrap();

        let settle = (2.0 * tuning.deceleration() * 0.5).sqrt();
        assert_close(velocity.x, settle);
    }

    #[test]
    fn test_deadzone_stops_player() {
        let tuning = Tuning::default();

        let velocity = steering_velocity(
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.05, 0.0),
            Vector2::new(3.0, 3.0),
            &tuning,
        )
        .unwrap();

        assert_eq!(velocity, Vector2::zeros());
    }

    #[test]
    fn test_recording_follows_route_and_replay_follows_recording() {
        let tuning = Tuning::default();
        let mut stage = Stage::headless(tuning.clone()).unwrap();
        let id = stage.spawn_player(Coordinate::new(0.0, 0.0)).unwrap();
        stage
            .registry
            .player_mut(id)
            .unwrap()
            .set_target_path(TimedPath::with_points(
                Coordinate::new(0.0, 0.0),
                [(100.0, Coordinate::new(0.0, 20.0))],
            ));

        stage.record().unwrap();
        for _ in 0..60 {
            stage.step(&mut NullRenderer, &Camera::default()).unwrap();
        }
        stage.stop();

        let player = stage.player(id).unwrap();
        let end = player.position();
        assert!(end.y > 1.0, "{end:?}");
        assert!(player.traveled_path().len() > 50);
        assert!(!player.traveled_path().is_recording());

        stage.scrub(0.0);
        stage.step(&mut NullRenderer, &Camera::default()).unwrap();
        assert_eq!(stage.player(id).unwrap().position(), Coordinate::new(0.0, 0.0));

        stage.scrub(stage.clock.max_time());
        stage.step(&mut NullRenderer, &Camera::default()).unwrap();
        assert_eq!(stage.player(id).unwrap().position(), player_end(&stage, id));
    }

    fn player_end(stage: &Stage, id: ActorId) -> Coordinate {
        stage.player(id).unwrap().traveled_path().last()
    }

    #[test]
    fn test_hard_reset_discards_traveled_path() {
        let mut stage = Stage::headless(Tuning::default()).unwrap();
        let id = stage.spawn_player(Coordinate::new(3.0, 3.0)).unwrap();

        stage.record().unwrap();
        for _ in 0..5 {
            stage.step(&mut NullRenderer, &Camera::default()).unwrap();
        }
        assert!(stage.player(id).unwrap().traveled_path().len() > 1);

        stage.reset(false).unwrap();
        assert!(stage.player(id).unwrap().traveled_path().len() > 1);

        stage.reset(true).unwrap();
        let player = stage.player(id).unwrap();
        assert_eq!(player.traveled_path().len(), 1);
        assert_eq!(player.position(), Coordinate::new(3.0, 3.0));
    }
}
