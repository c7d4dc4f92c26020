pub mod clock;
pub mod field;
pub mod football;
pub mod player;
pub mod pointer;
pub mod registry;

pub use clock::*;
pub use field::*;
pub use football::*;
pub use player::*;
pub use pointer::*;
pub use registry::*;

use crate::play::Stage;
use crate::render::{Camera, Renderer};
use crate::{PlaybookError, PlaybookResult};
use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActorId(pub u32);

impl Display for ActorId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorKind {
    Field,
    Player,
    Football,
    Clock,
    Pointer,
}

/// Physics handles owned by one actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorHandles {
    pub body: RigidBodyHandle,
    pub collider: Option<ColliderHandle>,
}

impl ActorHandles {
    pub fn new(body: RigidBodyHandle, collider: Option<ColliderHandle>) -> Self {
        ActorHandles { body, collider }
    }
}

/// Per-frame behaviour shared by every actor on the stage.
///
/// While `update`, `on_reset` or `delete_descendants` run, the actor is checked
/// out of the registry, so it can freely mutate the `Stage` it lives in.
pub trait PlayActor {
    fn kind(&self) -> ActorKind;

    fn handles(&self) -> ActorHandles;

    /// Draw order; lower is drawn (and updated) first.
    fn depth(&self) -> i32 {
        0
    }

    fn update(
        &mut self,
        stage: &mut Stage,
        camera: &Camera,
        collisions: &[ColliderHandle],
    ) -> PlaybookResult<()>;

    fn draw(&self, stage: &Stage, renderer: &mut dyn Renderer, camera: &Camera);

    /// Clock reset listener.
    fn on_reset(&mut self, _stage: &mut Stage, _hard: bool) -> PlaybookResult<()> {
        Ok(())
    }

    /// Cleans up state elsewhere on the stage before this actor is removed.
    fn delete_descendants(&mut self, _id: ActorId, _stage: &mut Stage) {}

    fn duplicate(&self) -> PlaybookResult<Actor> {
        Err(PlaybookError::CloneUnsupported(self.kind()))
    }

    /// Called when the clock stops recording.
    fn finish_recording(&mut self) {}
}

pub enum Actor {
    Field(FieldActor),
    Player(Player),
    Football(Football),
    Clock(ClockActor),
    Pointer(Pointer),
}

macro_rules! dispatch {
    ($actor:expr, $inner:ident => $body:expr) => {
        match $actor {
            Actor::Field($inner) => $body,
            Actor::Player($inner) => $body,
            Actor::Football($inner) => $body,
            Actor::Clock($inner) => $body,
            Actor::Pointer($inner) => $body,
        }
    };
}

impl Actor {
    pub fn as_player(&self) -> Option<&Player> {
        match self {
            Actor::Player(player) => Some(player),
            _ => None,
        }
    }

    pub fn as_player_mut(&mut self) -> Option<&mut Player> {
        match self {
            Actor::Player(player) => Some(player),
            _ => None,
        }
    }

    pub fn as_football(&self) -> Option<&Football> {
        match self {
            Actor::Football(football) => Some(football),
            _ => None,
        }
    }
}

impl PlayActor for Actor {
    fn kind(&self) -> ActorKind {
        dispatch!(self, actor => actor.kind())
    }

    fn handles(&self) -> ActorHandles {
        dispatch!(self, actor => actor.handles())
    }

    fn depth(&self) -> i32 {
        dispatch!(self, actor => actor.depth())
    }

    fn update(
        &mut self,
        stage: &mut Stage,
        camera: &Camera,
        collisions: &[ColliderHandle],
    ) -> PlaybookResult<()> {
        dispatch!(self, actor => actor.update(stage, camera, collisions))
    }

    fn draw(&self, stage: &Stage, renderer: &mut dyn Renderer, camera: &Camera) {
        dispatch!(self, actor => actor.draw(stage, renderer, camera))
    }

    fn on_reset(&mut self, stage: &mut Stage, hard: bool) -> PlaybookResult<()> {
        dispatch!(self, actor => actor.on_reset(stage, hard))
    }

    fn delete_descendants(&mut self, id: ActorId, stage: &mut Stage) {
        dispatch!(self, actor => actor.delete_descendants(id, stage))
    }

    fn duplicate(&self) -> PlaybookResult<Actor> {
        dispatch!(self, actor => actor.duplicate())
    }

    fn finish_recording(&mut self) {
        dispatch!(self, actor => actor.finish_recording())
    }
}

impl From<FieldActor> for Actor {
    fn from(value: FieldActor) -> Self {
        Actor::Field(value)
    }
}

impl From<Player> for Actor {
    fn from(value: Player) -> Self {
        Actor::Player(value)
    }
}

impl From<Football> for Actor {
    fn from(value: Football) -> Self {
        Actor::Football(value)
    }
}

impl From<ClockActor> for Actor {
    fn from(value: ClockActor) -> Self {
        Actor::Clock(value)
    }
}

impl From<Pointer> for Actor {
    fn from(value: Pointer) -> Self {
        Actor::Pointer(value)
    }
}
