use crate::play::ActorKind;
use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};
use thiserror::Error;

pub type PlaybookResult<T> = Result<T, PlaybookError>;

#[derive(Debug, Error)]
pub enum PlaybookError {
    #[error("rigid body handle {0:?} is already registered")]
    DuplicateRigidBodyHandle(RigidBodyHandle),

    #[error("collider handle {0:?} is already registered")]
    DuplicateColliderHandle(ColliderHandle),

    #[error("recording has not started, call start_recording first")]
    UnstartedRecorder,

    #[error(
        "negative discriminant {discriminant} (final velocity {final_velocity}, acceleration {acceleration}, distance {distance})"
    )]
    NegativeDiscriminant {
        discriminant: f32,
        final_velocity: f32,
        acceleration: f32,
        distance: f32,
    },

    #[error("{0:?} actors cannot be cloned")]
    CloneUnsupported(ActorKind),

    #[error("rigid body {0:?} does not exist in the physics world")]
    MissingRigidBody(RigidBodyHandle),

    #[error("zoom must be positive, got {0}")]
    InvalidZoom(f32),

    #[error("failed to encode world snapshot: {0}")]
    SnapshotEncode(#[from] bincode::error::EncodeError),

    #[error("failed to decode world snapshot: {0}")]
    SnapshotDecode(#[from] bincode::error::DecodeError),

    #[error("invalid tuning: {0}")]
    Tuning(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
