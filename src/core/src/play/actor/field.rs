use crate::play::{Actor, ActorHandles, ActorKind, BodyKind, PhysicsWorld, PlayActor, Stage};
use crate::render::{Camera, Color, Renderer};
use crate::{Coordinate, PlaybookResult, Tuning};
use rapier2d::prelude::ColliderHandle;

const YARD_LINE_WIDTH: f32 = 2.0;
const TICK_LINE_WIDTH: f32 = 1.0;

/// The grass, yard lines and hash ticks. Centered on the world origin.
#[derive(Debug, Clone)]
pub struct FieldActor {
    handles: ActorHandles,
    center: Coordinate,
    width: f32,
    length: f32,
    tick_width: f32,
    major_spacing: f32,
    minor_spacing: f32,
}

impl FieldActor {
    pub fn new(world: &mut PhysicsWorld, tuning: &Tuning) -> Self {
        let center = Coordinate::default();
        let body = world.add_body(BodyKind::Fixed, center);

        FieldActor {
            handles: ActorHandles::new(body, None),
            center,
            width: tuning.field_width,
            length: tuning.field_length,
            tick_width: tuning.field_tick_width,
            major_spacing: tuning.major_line_spacing,
            minor_spacing: tuning.minor_line_spacing,
        }
    }

    /// Offsets along the field length, from one end line to the other.
    fn lines(&self, spacing: f32) -> impl Iterator<Item = f32> {
        let half = self.length / 2.0;
        let count = if spacing > 0.0 {
            (self.length / spacing).floor() as u32
        } else {
            0
        };

        (0..=count).map(move |i| -half + i as f32 * spacing)
    }

    fn draw_line(
        &self,
        renderer: &mut dyn Renderer,
        camera: &Camera,
        from_x: f32,
        to_x: f32,
        offset: f32,
        width: f32,
    ) {
        let y = self.center.y + offset;
        renderer.stroke_line(
            camera.to_screen(Coordinate::new(from_x, y)),
            camera.to_screen(Coordinate::new(to_x, y)),
            width,
            Color::WHITE,
        );
    }
}

impl PlayActor for FieldActor {
    fn kind(&self) -> ActorKind {
        ActorKind::Field
    }

    fn handles(&self) -> ActorHandles {
        self.handles
    }

    fn update(&mut self, _: &mut Stage, _: &Camera, _: &[ColliderHandle]) -> PlaybookResult<()> {
        Ok(())
    }

    fn draw(&self, _stage: &Stage, renderer: &mut dyn Renderer, camera: &Camera) {
        let scale = camera.scale_factor();
        let top_left = camera.to_screen(Coordinate::new(
            self.center.x - self.width / 2.0,
            self.center.y + self.length / 2.0,
        ));

        renderer.fill_rect(top_left, self.width * scale, self.length * scale, Color::GREEN);

        let left = self.center.x - self.width / 2.0;
        let right = self.center.x + self.width / 2.0;

        for offset in self.lines(self.major_spacing) {
            self.draw_line(renderer, camera, left, right, offset, YARD_LINE_WIDTH);
        }

        for offset in self.lines(self.minor_spacing) {
            self.draw_line(renderer, camera, left, left + self.tick_width, offset, TICK_LINE_WIDTH);
            self.draw_line(renderer, camera, right, right - self.tick_width, offset, TICK_LINE_WIDTH);
        }
    }

    fn duplicate(&self) -> PlaybookResult<Actor> {
        Ok(Actor::Field(self.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCommand, DrawList};

    #[test]
    fn test_line_offsets_cover_whole_length() {
        let tuning = Tuning::default();
        let mut world = PhysicsWorld::new(&tuning);
        let field = FieldActor::new(&mut world, &tuning);

        let majors: Vec<f32> = field.lines(tuning.major_line_spacing).collect();

        assert_eq!(majors.first(), Some(&(-tuning.field_length / 2.0)));
        assert_eq!(majors.last(), Some(&(tuning.field_length / 2.0)));
        assert_eq!(majors.len(), 13);
        assert_eq!(field.lines(tuning.minor_line_spacing).count(), 121);
    }

    #[test]
    fn test_draws_grass_then_lines() {
        let tuning = Tuning::default();
        let stage = Stage::headless(tuning.clone()).unwrap();
        let field = stage
            .registry
            .actors_by_kind(ActorKind::Field)
            .first()
            .and_then(|id| stage.registry.get(*id))
            .unwrap();
        let mut list = DrawList::new();

        field.draw(&stage, &mut list, &Camera::default());

        assert!(matches!(list.commands[0], DrawCommand::Rect { color: Color::GREEN, .. }));
        let lines = list
            .commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Line { .. }))
            .count();
        assert_eq!(lines, 13 + 121 * 2);
    }
}
