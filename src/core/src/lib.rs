pub mod config;
pub mod error;
pub mod play;
pub mod render;
pub mod shared;

pub use config::{StepMode, Tuning};
pub use error::{PlaybookError, PlaybookResult};
pub use shared::*;

pub use play::{
    Actor, ActorHandles, ActorId, ActorKind, ActorRegistry, BallCarrier, CarrierChange, Clock,
    ClockState, InputBuffer, Millis, PhysicsWorld, PhysicsWorldHistory, PlayActor, PlayEngine,
    PointerButton, PointerEvent, Stage, TimedPath, WorldSnapshot,
};
pub use render::{Camera, Color, DrawCommand, DrawList, NullRenderer, Renderer, TextAlign};
