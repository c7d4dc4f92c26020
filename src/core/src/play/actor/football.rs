use crate::play::{
    Actor, ActorHandles, ActorId, ActorKind, BodyKind, CarrierChange, Millis, PhysicsWorld,
    PlayActor, Player, Stage, TimedPath,
};
use crate::render::{Camera, Color, Renderer};
use crate::shared::kinematics::{calc_height, calc_min_launch_angle};
use crate::{Coordinate, PlaybookResult, Tuning};
use log::{debug, info};
use nalgebra::Vector2;
use rapier2d::prelude::ColliderHandle;

const OUTLINE_WIDTH: f32 = 2.0;
const LACE_COUNT: u32 = 5;
// feet of height that doubles the drawn size
const HEIGHT_ZOOM: f32 = 5.0;

#[derive(Debug, Clone)]
pub struct Football {
    handles: ActorHandles,
    spawn: Coordinate,
    position: Coordinate,
    height: f32,
    width: f32,
    length: f32,
    throw_started: Millis,
    vertical_velocity: f32,
    traveled_path: TimedPath,
    height_path: TimedPath<f32>,
}

impl Football {
    pub fn new(world: &mut PhysicsWorld, tuning: &Tuning, at: Coordinate) -> Self {
        let body = world.add_body(BodyKind::Dynamic, at);
        let collider = world.add_ball_collider(body, tuning.football_width, true);

        Football {
            handles: ActorHandles::new(body, Some(collider)),
            spawn: at,
            position: at,
            height: 0.0,
            width: tuning.football_width,
            length: tuning.football_height,
            throw_started: 0.0,
            vertical_velocity: 0.0,
            traveled_path: TimedPath::new(at),
            height_path: TimedPath::new(0.0),
        }
    }

    #[inline]
    pub fn position(&self) -> Coordinate {
        self.position
    }

    /// Height above the ground in feet.
    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn traveled_path(&self) -> &TimedPath {
        &self.traveled_path
    }

    pub fn height_path(&self) -> &TimedPath<f32> {
        &self.height_path
    }

    /// Catches the ball for the first player touching it. The last carrier
    /// cannot catch its own throw.
    fn acquire_possession(
        &mut self,
        stage: &mut Stage,
        collisions: &[ColliderHandle],
    ) -> PlaybookResult<()> {
        if stage.carrier.carrier().is_some() {
            return Ok(());
        }

        let catcher = collisions
            .iter()
            .filter_map(|collider| stage.registry.actor_by_collider(*collider))
            .filter(|id| stage.registry.kind_of(*id) == Some(ActorKind::Player))
            .find(|id| Some(*id) != stage.carrier.most_recent());

        let Some(catcher) = catcher else {
            return Ok(());
        };

        debug!("player {catcher} has the ball at {:.1}ms", stage.clock.elapsed());

        stage.world.set_linvel(self.handles.body, Vector2::zeros())?;

        if let CarrierChange::FirstPossession(_) = stage.carrier.set_carrier(Some(catcher)) {
            self.on_reset(stage, true)?;
        }

        Ok(())
    }

    /// Throws to every player whose number was pressed this frame.
    fn throw_to_pressed(&mut self, stage: &mut Stage) -> PlaybookResult<()> {
        let targets: Vec<(ActorId, String, Coordinate)> = stage
            .input
            .pressed_keys()
            .filter_map(|key| {
                stage
                    .registry
                    .players()
                    .find(|(_, player)| player.number() == key)
                    .map(|(id, player)| (id, player.number().to_string(), player.position()))
            })
            .collect();

        for (id, number, target) in targets {
            self.throw_to(stage, target)?;
            info!("football thrown to player {number} ({id})");
        }

        Ok(())
    }

    fn throw_to(&mut self, stage: &mut Stage, target: Coordinate) -> PlaybookResult<()> {
        let speed = stage.tuning.throw_speed();
        let gravity = stage.tuning.scaled_gravity();

        let distance = self.position.distance_to(&target);
        let launch_angle = calc_min_launch_angle(distance, speed, gravity);

        let horizontal = launch_angle.cos() * speed;
        self.vertical_velocity = launch_angle.sin() * speed;

        let heading = (target.y - self.position.y).atan2(target.x - self.position.x);
        let velocity = Vector2::new(heading.cos(), heading.sin()) * horizontal
            / stage.tuning.velocity_scale;

        debug!(
            "launch angle {:.1} deg, velocity (v: {:.2}, h: {horizontal:.2})",
            launch_angle.to_degrees(),
            self.vertical_velocity
        );

        stage.world.set_linvel(self.handles.body, velocity)?;
        stage.carrier.set_carrier(None);
        self.throw_started = stage.clock.elapsed();

        Ok(())
    }

    fn record(&mut self, stage: &mut Stage, collisions: &[ColliderHandle]) -> PlaybookResult<()> {
        let body = self.handles.body;

        self.acquire_possession(stage, collisions)?;
        self.throw_to_pressed(stage)?;

        let carrier_position = stage
            .carrier
            .carrier()
            .and_then(|id| stage.registry.player(id))
            .map(Player::position);

        match carrier_position {
            Some(position) => {
                self.position = position;
                self.height = 0.0;
                stage.world.set_translation(body, position)?;
            }
            None => {
                self.position = stage.world.translation(body)?;
                let flight_time = (stage.clock.elapsed() - self.throw_started) / 1000.0;
                self.height = calc_height(
                    0.0,
                    self.vertical_velocity,
                    flight_time as f32,
                    stage.tuning.scaled_gravity(),
                )
                .max(0.0);
            }
        }

        if !self.traveled_path.is_recording() {
            self.traveled_path.start_recording();
        }
        if !self.height_path.is_recording() {
            self.height_path.start_recording();
        }
        self.traveled_path.record_point(&stage.clock, self.position)?;
        self.height_path.record_point(&stage.clock, self.height)?;

        Ok(())
    }

    fn replay(&mut self, stage: &mut Stage) -> PlaybookResult<()> {
        let elapsed = stage.clock.elapsed();

        self.position = self.traveled_path.coord_at_time(elapsed);
        self.height = self.height_path.value_at(elapsed);

        stage.world.set_translation(self.handles.body, self.position)
    }
}

impl PlayActor for Football {
    fn kind(&self) -> ActorKind {
        ActorKind::Football
    }

    fn handles(&self) -> ActorHandles {
        self.handles
    }

    fn depth(&self) -> i32 {
        2
    }

    fn update(
        &mut self,
        stage: &mut Stage,
        _camera: &Camera,
        collisions: &[ColliderHandle],
    ) -> PlaybookResult<()> {
        if stage.clock.is_recording() {
            self.record(stage, collisions)
        } else {
            self.replay(stage)
        }
    }

    fn draw(&self, stage: &Stage, renderer: &mut dyn Renderer, camera: &Camera) {
        if stage.carrier.initial().is_none() {
            return;
        }

        let center = camera.to_screen(self.position);
        let scale = camera.scale_factor() * (1.0 + self.height / HEIGHT_ZOOM);
        let radius_x = self.width * scale;
        let radius_y = self.length * scale;

        renderer.fill_ellipse(center, radius_x, radius_y, Color::BROWN);
        renderer.stroke_ellipse(center, radius_x, radius_y, OUTLINE_WIDTH, Color::WHITE);

        for lace in 0..LACE_COUNT {
            let y = center.y - radius_y / 4.0 + lace as f32 * radius_y / 8.0;
            renderer.stroke_line(
                Coordinate::new(center.x - radius_x / 3.0, y),
                Coordinate::new(center.x + radius_x / 3.0, y),
                0.1 * scale,
                Color::WHITE,
            );
        }

        self.traveled_path.draw_path(
            renderer,
            |coord| camera.to_screen(coord),
            Color::ORANGE,
            Some(stage.clock.elapsed()),
        );
    }

    /// Back onto the initial carrier's starting spot, or the spawn point when
    /// the play has no carrier yet.
    fn on_reset(&mut self, stage: &mut Stage, hard: bool) -> PlaybookResult<()> {
        let anchor = stage
            .carrier
            .initial()
            .and_then(|id| stage.registry.player(id))
            .map(Player::initial_position)
            .unwrap_or(self.spawn);

        self.position = anchor;
        self.height = 0.0;
        self.vertical_velocity = 0.0;
        stage.carrier.reset();

        stage.world.set_translation(self.handles.body, anchor)?;
        stage.world.set_linvel(self.handles.body, Vector2::zeros())?;

        if hard {
            self.traveled_path = TimedPath::new(anchor);
            self.height_path = TimedPath::new(0.0);
        }

        Ok(())
    }

    fn duplicate(&self) -> PlaybookResult<Actor> {
        Ok(Actor::Football(self.clone()))
    }

    fn finish_recording(&mut self) {
        self.traveled_path.stop_recording();
        self.height_path.stop_recording();
    }
}
