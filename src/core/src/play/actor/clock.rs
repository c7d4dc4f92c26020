use crate::play::{Actor, ActorHandles, ActorKind, BodyKind, PhysicsWorld, PlayActor, Stage};
use crate::render::{Camera, Color, Renderer, TextAlign};
use crate::{Coordinate, PlaybookResult};
use rapier2d::prelude::ColliderHandle;

const PADDING: f32 = 10.0;
const BOX_WIDTH: f32 = 70.0;
const BOX_HEIGHT: f32 = 25.0;
const FONT_SIZE: f32 = 20.0;

/// Ticks the stage clock once per frame and shows the elapsed time.
#[derive(Debug, Clone)]
pub struct ClockActor {
    handles: ActorHandles,
}

impl ClockActor {
    pub fn new(world: &mut PhysicsWorld) -> Self {
        let body = world.add_body(BodyKind::Fixed, Coordinate::default());

        ClockActor {
            handles: ActorHandles::new(body, None),
        }
    }
}

impl PlayActor for ClockActor {
    fn kind(&self) -> ActorKind {
        ActorKind::Clock
    }

    fn handles(&self) -> ActorHandles {
        self.handles
    }

    fn update(&mut self, stage: &mut Stage, _: &Camera, _: &[ColliderHandle]) -> PlaybookResult<()> {
        stage.clock.update();
        Ok(())
    }

    fn draw(&self, stage: &Stage, renderer: &mut dyn Renderer, camera: &Camera) {
        let (width, height) = camera.canvas_size();
        let corner = Coordinate::new(width - PADDING, height - PADDING);

        renderer.fill_rect(
            Coordinate::new(corner.x - BOX_WIDTH + 5.0, corner.y - BOX_HEIGHT),
            BOX_WIDTH,
            BOX_HEIGHT,
            Color::BLACK,
        );
        renderer.fill_text(
            &stage.clock.format_elapsed(),
            corner,
            FONT_SIZE,
            TextAlign::Right,
            Color::WHITE,
        );
    }

    fn duplicate(&self) -> PlaybookResult<Actor> {
        Ok(Actor::Clock(self.clone()))
    }
}
