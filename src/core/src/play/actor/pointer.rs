use crate::play::{
    ActorHandles, ActorId, ActorKind, BodyKind, PhysicsWorld, PlayActor, PointerButton, Stage,
    TimedPath,
};
use crate::render::{Camera, Color, Renderer};
use crate::{Coordinate, PlaybookResult, Tuning};
use log::debug;
use rapier2d::prelude::ColliderHandle;

pub const DELETE_KEY: &str = "Delete";

const PARKED: Coordinate = Coordinate::new(-1.0e6, -1.0e6);

#[derive(Debug)]
struct RouteDraft {
    player: ActorId,
    route: TimedPath,
}

/// The mouse on the field. Turns buffered pointer events into edits.
#[derive(Debug)]
pub struct Pointer {
    handles: ActorHandles,
    radius: f32,
    position: Coordinate,
    hovered: Option<ActorId>,
    draft: Option<RouteDraft>,
}

impl Pointer {
    pub fn new(world: &mut PhysicsWorld, tuning: &Tuning) -> Self {
        let body = world.add_body(BodyKind::Kinematic, PARKED);
        let collider = world.add_ball_collider(body, tuning.pointer_radius, true);

        Pointer {
            handles: ActorHandles::new(body, Some(collider)),
            radius: tuning.pointer_radius,
            position: PARKED,
            hovered: None,
            draft: None,
        }
    }

    #[inline]
    pub fn position(&self) -> Coordinate {
        self.position
    }

    #[inline]
    pub fn hovered(&self) -> Option<ActorId> {
        self.hovered
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.draft.is_some()
    }

    fn on_move(&mut self, stage: &mut Stage, camera: &Camera) -> PlaybookResult<()> {
        let Some(event) = stage.input.take_move() else {
            return Ok(());
        };

        self.position = camera.to_world(event.position);
        stage.world.set_translation(self.handles.body, self.position)?;

        if let Some(draft) = &mut self.draft {
            draft.route.record_point(&stage.clock, self.position)?;
        }

        Ok(())
    }

    fn on_down(&mut self, stage: &mut Stage, camera: &Camera) -> PlaybookResult<()> {
        let Some(event) = stage.input.take_down() else {
            return Ok(());
        };

        match (event.button, self.hovered) {
            (Some(PointerButton::Left), None) => {
                stage.spawn_player(camera.to_world(event.position))?;
            }
            (Some(PointerButton::Left), Some(player)) => {
                let start = stage
                    .player(player)
                    .map(|player| player.initial_position())
                    .unwrap_or(self.position);

                stage.reset(false)?;
                stage.clock.play();

                let mut route = TimedPath::new(start);
                route.start_recording();
                self.draft = Some(RouteDraft { player, route });

                debug!("drawing route for player {player}");
            }
            (Some(PointerButton::Right), Some(player)) => {
                stage.new_play(player)?;
            }
            _ => {}
        }

        Ok(())
    }

    fn on_up(&mut self, stage: &mut Stage) -> PlaybookResult<()> {
        if stage.input.take_up().is_none() {
            return Ok(());
        }

        if let Some(RouteDraft { player, mut route }) = self.draft.take() {
            route.stop_recording();
            if let Some(player) = stage.registry.player_mut(player) {
                player.set_target_path(route);
            }
        }

        stage.clock.stop();
        stage.reset(false)
    }

    fn on_delete(&mut self, stage: &mut Stage) -> PlaybookResult<()> {
        if !stage.input.is_pressed(DELETE_KEY) {
            return Ok(());
        }

        let Some(target) = self.hovered.take() else {
            return Ok(());
        };

        if self.draft.as_ref().is_some_and(|draft| draft.player == target) {
            self.draft = None;
        }

        stage.remove_actor(target)?;

        Ok(())
    }
}

impl PlayActor for Pointer {
    fn kind(&self) -> ActorKind {
        ActorKind::Pointer
    }

    fn handles(&self) -> ActorHandles {
        self.handles
    }

    fn depth(&self) -> i32 {
        3
    }

    fn update(
        &mut self,
        stage: &mut Stage,
        camera: &Camera,
        collisions: &[ColliderHandle],
    ) -> PlaybookResult<()> {
        self.hovered = collisions
            .iter()
            .filter_map(|collider| stage.registry.actor_by_collider(*collider))
            .find(|id| stage.registry.kind_of(*id) == Some(ActorKind::Player));

        self.on_move(stage, camera)?;
        self.on_down(stage, camera)?;
        self.on_up(stage)?;
        self.on_delete(stage)
    }

    fn draw(&self, _stage: &Stage, renderer: &mut dyn Renderer, camera: &Camera) {
        renderer.fill_circle(
            camera.to_screen(self.position),
            self.radius * camera.scale_factor(),
            Color::BLUE,
        );

        if let Some(draft) = &self.draft {
            draft
                .route
                .draw_path(renderer, |coord| camera.to_screen(coord), Color::WHITE, None);
        }
    }
}
