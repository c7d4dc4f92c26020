use crate::{Coordinate, PlaybookError, PlaybookResult, Tuning};
use itertools::Itertools;
use log::trace;
use rapier2d::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Fixed,
    Kinematic,
    Dynamic,
}

/// Everything rapier needs to resume a simulation. The pipeline itself is
/// scratch space and is rebuilt on restore.
#[derive(Clone, Serialize, Deserialize)]
struct WorldState {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
}

/// Opaque, encoded copy of a [`PhysicsWorld`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldSnapshot {
    bytes: Vec<u8>,
}

impl WorldSnapshot {
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Top-down world: no gravity, ball colliders only, stepped by one frame at a time.
pub struct PhysicsWorld {
    pipeline: PhysicsPipeline,
    state: WorldState,
    steps: u64,
}

impl PhysicsWorld {
    pub fn new(tuning: &Tuning) -> Self {
        let integration_parameters = IntegrationParameters {
            dt: (tuning.frame_ms / 1000.0) as Real,
            ..IntegrationParameters::default()
        };

        PhysicsWorld {
            pipeline: PhysicsPipeline::new(),
            state: WorldState {
                gravity: vector![0.0, 0.0],
                integration_parameters,
                islands: IslandManager::new(),
                broad_phase: DefaultBroadPhase::new(),
                narrow_phase: NarrowPhase::new(),
                bodies: RigidBodySet::new(),
                colliders: ColliderSet::new(),
                impulse_joints: ImpulseJointSet::new(),
                multibody_joints: MultibodyJointSet::new(),
                ccd_solver: CCDSolver::new(),
            },
            steps: 0,
        }
    }

    pub fn add_body(&mut self, kind: BodyKind, at: Coordinate) -> RigidBodyHandle {
        let builder = match kind {
            BodyKind::Fixed => RigidBodyBuilder::fixed(),
            BodyKind::Kinematic => RigidBodyBuilder::kinematic_position_based(),
            BodyKind::Dynamic => RigidBodyBuilder::dynamic().lock_rotations(),
        };

        self.state
            .bodies
            .insert(builder.translation(vector![at.x, at.y]).build())
    }

    pub fn add_ball_collider(
        &mut self,
        body: RigidBodyHandle,
        radius: f32,
        sensor: bool,
    ) -> ColliderHandle {
        let collider = ColliderBuilder::ball(radius)
            .sensor(sensor)
            .active_collision_types(ActiveCollisionTypes::all())
            .build();

        self.state
            .colliders
            .insert_with_parent(collider, body, &mut self.state.bodies)
    }

    /// Removes the body together with its colliders.
    pub fn remove_body(&mut self, handle: RigidBodyHandle) -> bool {
        self.state
            .bodies
            .remove(
                handle,
                &mut self.state.islands,
                &mut self.state.colliders,
                &mut self.state.impulse_joints,
                &mut self.state.multibody_joints,
                true,
            )
            .is_some()
    }

    #[inline]
    pub fn contains_body(&self, handle: RigidBodyHandle) -> bool {
        self.state.bodies.contains(handle)
    }

    #[inline]
    pub fn body_count(&self) -> usize {
        self.state.bodies.len()
    }

    fn body(&self, handle: RigidBodyHandle) -> PlaybookResult<&RigidBody> {
        self.state
            .bodies
            .get(handle)
            .ok_or(PlaybookError::MissingRigidBody(handle))
    }

    fn body_mut(&mut self, handle: RigidBodyHandle) -> PlaybookResult<&mut RigidBody> {
        self.state
            .bodies
            .get_mut(handle)
            .ok_or(PlaybookError::MissingRigidBody(handle))
    }

    pub fn translation(&self, handle: RigidBodyHandle) -> PlaybookResult<Coordinate> {
        Ok(Coordinate::from(*self.body(handle)?.translation()))
    }

    pub fn set_translation(&mut self, handle: RigidBodyHandle, at: Coordinate) -> PlaybookResult<()> {
        self.body_mut(handle)?.set_translation(at.to_vector(), true);
        Ok(())
    }

    pub fn linvel(&self, handle: RigidBodyHandle) -> PlaybookResult<Vector<Real>> {
        Ok(*self.body(handle)?.linvel())
    }

    pub fn set_linvel(&mut self, handle: RigidBodyHandle, velocity: Vector<Real>) -> PlaybookResult<()> {
        self.body_mut(handle)?.set_linvel(velocity, true);
        Ok(())
    }

    /// Advances the simulation by one fixed frame.
    pub fn step(&mut self) {
        let state = &mut self.state;

        self.pipeline.step(
            &state.gravity,
            &state.integration_parameters,
            &mut state.islands,
            &mut state.broad_phase,
            &mut state.narrow_phase,
            &mut state.bodies,
            &mut state.colliders,
            &mut state.impulse_joints,
            &mut state.multibody_joints,
            &mut state.ccd_solver,
            None,
            &(),
            &(),
        );

        self.steps += 1;
    }

    /// Number of `step` calls made on this instance.
    #[inline]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Colliders currently overlapping `collider`, sensor intersections and
    /// touching solid contacts alike. Never contains `collider` itself.
    pub fn intersections_with(&self, collider: ColliderHandle) -> Vec<ColliderHandle> {
        let narrow_phase = &self.state.narrow_phase;

        let sensors = narrow_phase
            .intersection_pairs_with(collider)
            .filter(|(_, _, intersecting)| *intersecting)
            .map(|(first, second, _)| other_of(collider, first, second));

        let contacts = narrow_phase
            .contact_pairs_with(collider)
            .filter(|pair| pair.has_any_active_contact)
            .map(|pair| other_of(collider, pair.collider1, pair.collider2));

        sensors
            .chain(contacts)
            .filter(|other| *other != collider)
            .unique()
            .collect()
    }

    pub fn snapshot(&self) -> PlaybookResult<WorldSnapshot> {
        let bytes = bincode::serde::encode_to_vec(&self.state, bincode::config::standard())?;

        trace!("world snapshot: {} bytes, {} bodies", bytes.len(), self.body_count());

        Ok(WorldSnapshot { bytes })
    }

    pub fn restore(&mut self, snapshot: &WorldSnapshot) -> PlaybookResult<()> {
        let (state, _) =
            bincode::serde::decode_from_slice(snapshot.as_bytes(), bincode::config::standard())?;

        self.state = state;
        self.pipeline = PhysicsPipeline::new();

        Ok(())
    }

    pub fn from_snapshot(snapshot: &WorldSnapshot) -> PlaybookResult<Self> {
        let (state, _) =
            bincode::serde::decode_from_slice(snapshot.as_bytes(), bincode::config::standard())?;

        Ok(PhysicsWorld {
            pipeline: PhysicsPipeline::new(),
            state,
            steps: 0,
        })
    }
}

#[inline]
fn other_of(me: ColliderHandle, first: ColliderHandle, second: ColliderHandle) -> ColliderHandle {
    if first == me { second } else { first }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> PhysicsWorld {
        PhysicsWorld::new(&Tuning::default())
    }

    #[test]
    fn test_translation_round_trip() {
        let mut world = world();
        let body = world.add_body(BodyKind::Dynamic, Coordinate::new(1.0, 2.0));

        assert_eq!(world.translation(body).unwrap(), Coordinate::new(1.0, 2.0));

        world.set_translation(body, Coordinate::new(-4.0, 8.0)).unwrap();
        assert_eq!(world.translation(body).unwrap(), Coordinate::new(-4.0, 8.0));
    }

    #[test]
    fn test_dynamic_body_moves_with_velocity() {
        let mut world = world();
        let body = world.add_body(BodyKind::Dynamic, Coordinate::new(0.0, 0.0));
        world.add_ball_collider(body, 1.0, false);

        world.set_linvel(body, vector![6.0, 0.0]).unwrap();
        for _ in 0..10 {
            world.step();
        }

        let position = world.translation(body).unwrap();
        assert!(position.x > 0.5, "{position:?}");
        assert!(position.y.abs() < 1e-4);
        assert_eq!(world.steps(), 10);
    }

    #[test]
    fn test_fixed_body_ignores_velocity() {
        let mut world = world();
        let body = world.add_body(BodyKind::Fixed, Coordinate::new(3.0, 3.0));

        world.set_linvel(body, vector![10.0, 10.0]).unwrap();
        world.step();

        assert_eq!(world.translation(body).unwrap(), Coordinate::new(3.0, 3.0));
    }

    #[test]
    fn test_missing_body_is_reported() {
        let mut world = world();
        let body = world.add_body(BodyKind::Dynamic, Coordinate::default());
        assert!(world.remove_body(body));

        assert!(matches!(
            world.translation(body),
            Err(PlaybookError::MissingRigidBody(_))
        ));
        assert!(!world.remove_body(body));
    }

    #[test]
    fn test_sensor_intersections() {
        let mut world = world();
        let sensor_body = world.add_body(BodyKind::Kinematic, Coordinate::new(0.0, 0.0));
        let sensor = world.add_ball_collider(sensor_body, 0.5, true);
        let near_body = world.add_body(BodyKind::Dynamic, Coordinate::new(0.2, 0.0));
        let near = world.add_ball_collider(near_body, 1.0, false);
        let far_body = world.add_body(BodyKind::Dynamic, Coordinate::new(50.0, 0.0));
        let far = world.add_ball_collider(far_body, 1.0, false);

        world.step();

        let hits = world.intersections_with(sensor);
        assert!(hits.contains(&near));
        assert!(!hits.contains(&far));
        assert!(!hits.contains(&sensor));

        assert!(world.intersections_with(near).contains(&sensor));
        assert!(world.intersections_with(far).is_empty());
    }

    #[test]
    fn test_snapshot_restore_rewinds() {
        let mut world = world();
        let body = world.add_body(BodyKind::Dynamic, Coordinate::new(0.0, 0.0));
        world.add_ball_collider(body, 1.0, false);
        world.set_linvel(body, vector![0.0, 3.0]).unwrap();

        let snapshot = world.snapshot().unwrap();
        assert!(!snapshot.is_empty());

        for _ in 0..5 {
            world.step();
        }
        assert!(world.translation(body).unwrap().y > 0.0);

        world.restore(&snapshot).unwrap();
        assert_eq!(world.translation(body).unwrap(), Coordinate::new(0.0, 0.0));

        let copy = PhysicsWorld::from_snapshot(&snapshot).unwrap();
        assert_eq!(copy.body_count(), 1);
        assert_eq!(copy.linvel(body).unwrap(), vector![0.0, 3.0]);
    }

    #[test]
    fn test_garbage_snapshot_fails_to_decode() {
        let garbage = WorldSnapshot {
            bytes: vec![0xff; 3],
        };

        assert!(matches!(
            PhysicsWorld::from_snapshot(&garbage),
            Err(PlaybookError::SnapshotDecode(_))
        ));
    }
}
