use crate::play::{Actor, ActorHandles, ActorId, ActorKind, Football, PlayActor, Player};
use crate::{PlaybookError, PlaybookResult};
use itertools::Itertools;
use log::{debug, warn};
use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};
use std::collections::{BTreeMap, HashMap};

struct ActorSlot {
    kind: ActorKind,
    depth: i32,
    handles: ActorHandles,
    // None while checked out
    actor: Option<Actor>,
}

/// Owns every actor on the stage and indexes them by physics handle and kind.
#[derive(Default)]
pub struct ActorRegistry {
    slots: BTreeMap<ActorId, ActorSlot>,
    by_body: HashMap<RigidBodyHandle, ActorId>,
    by_collider: HashMap<ColliderHandle, ActorId>,
    by_kind: HashMap<ActorKind, Vec<ActorId>>,
    next_id: u32,
}

impl ActorRegistry {
    pub fn new() -> Self {
        ActorRegistry::default()
    }

    pub fn add_actor(&mut self, actor: impl Into<Actor>) -> PlaybookResult<ActorId> {
        let id = ActorId(self.next_id);
        self.insert(id, actor.into())?;
        self.next_id += 1;

        Ok(id)
    }

    fn insert(&mut self, id: ActorId, actor: Actor) -> PlaybookResult<()> {
        let handles = actor.handles();

        if self.by_body.contains_key(&handles.body) {
            return Err(PlaybookError::DuplicateRigidBodyHandle(handles.body));
        }
        if let Some(collider) = handles.collider {
            if self.by_collider.contains_key(&collider) {
                return Err(PlaybookError::DuplicateColliderHandle(collider));
            }
        }

        let kind = actor.kind();

        self.by_body.insert(handles.body, id);
        if let Some(collider) = handles.collider {
            self.by_collider.insert(collider, id);
        }
        self.by_kind.entry(kind).or_default().push(id);
        self.slots.insert(
            id,
            ActorSlot {
                kind,
                depth: actor.depth(),
                handles,
                actor: Some(actor),
            },
        );

        debug!("registered {kind:?} actor {id}");

        Ok(())
    }

    /// Unregisters the actor. Returns `None` for unknown or checked-out ids.
    pub fn remove_actor(&mut self, id: ActorId) -> Option<Actor> {
        let slot = self.slots.remove(&id)?;

        self.by_body.remove(&slot.handles.body);
        if let Some(collider) = slot.handles.collider {
            self.by_collider.remove(&collider);
        }

        if let Some(group) = self.by_kind.get_mut(&slot.kind) {
            group.retain(|other| *other != id);
            if group.is_empty() {
                self.by_kind.remove(&slot.kind);
            }
        }

        debug!("removed {:?} actor {id}", slot.kind);

        slot.actor
    }

    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.slots.get(&id).and_then(|slot| slot.actor.as_ref())
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.slots.get_mut(&id).and_then(|slot| slot.actor.as_mut())
    }

    pub fn player(&self, id: ActorId) -> Option<&Player> {
        self.get(id).and_then(Actor::as_player)
    }

    pub fn player_mut(&mut self, id: ActorId) -> Option<&mut Player> {
        self.get_mut(id).and_then(Actor::as_player_mut)
    }

    pub fn football(&self, id: ActorId) -> Option<&Football> {
        self.get(id).and_then(Actor::as_football)
    }

    /// Players in registration order.
    pub fn players(&self) -> impl Iterator<Item = (ActorId, &Player)> {
        self.actors_by_kind(ActorKind::Player)
            .iter()
            .filter_map(|id| self.player(*id).map(|player| (*id, player)))
    }

    /// Moves the actor out of its slot. Handles and kind stay indexed.
    pub fn checkout(&mut self, id: ActorId) -> Option<Actor> {
        self.slots.get_mut(&id).and_then(|slot| slot.actor.take())
    }

    /// Puts a checked-out actor back. Returns `false` and drops the actor if
    /// it was removed in the meantime.
    pub fn checkin(&mut self, id: ActorId, actor: Actor) -> bool {
        match self.slots.get_mut(&id) {
            Some(slot) => {
                slot.actor = Some(actor);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn actor_by_rigid_body(&self, handle: RigidBodyHandle) -> Option<ActorId> {
        self.by_body.get(&handle).copied()
    }

    #[inline]
    pub fn actor_by_collider(&self, handle: ColliderHandle) -> Option<ActorId> {
        self.by_collider.get(&handle).copied()
    }

    pub fn kind_of(&self, id: ActorId) -> Option<ActorKind> {
        self.slots.get(&id).map(|slot| slot.kind)
    }

    pub fn kind_of_collider(&self, handle: ColliderHandle) -> Option<ActorKind> {
        self.actor_by_collider(handle).and_then(|id| self.kind_of(id))
    }

    pub fn handles(&self, id: ActorId) -> Option<ActorHandles> {
        self.slots.get(&id).map(|slot| slot.handles)
    }

    pub fn actors_by_kind(&self, kind: ActorKind) -> &[ActorId] {
        self.by_kind.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    /// Ascending depth, registration order among equal depths.
    pub fn draw_order(&self) -> Vec<ActorId> {
        self.slots
            .iter()
            .sorted_by_key(|(_, slot)| slot.depth)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn ids(&self) -> impl Iterator<Item = ActorId> + '_ {
        self.slots.keys().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Independent copy under the same ids. Actors that cannot be cloned are
    /// left out and their handles returned so the caller can drop them from a
    /// copied physics world.
    pub fn duplicate(&self) -> PlaybookResult<(ActorRegistry, Vec<ActorHandles>)> {
        let mut copy = ActorRegistry {
            next_id: self.next_id,
            ..ActorRegistry::default()
        };
        let mut skipped = Vec::new();

        for (id, slot) in &self.slots {
            let Some(actor) = &slot.actor else {
                warn!("actor {id} is checked out and cannot be duplicated");
                skipped.push(slot.handles);
                continue;
            };

            match actor.duplicate() {
                Ok(clone) => copy.insert(*id, clone)?,
                Err(PlaybookError::CloneUnsupported(kind)) => {
                    debug!("skipping {kind:?} actor {id} while duplicating");
                    skipped.push(slot.handles);
                }
                Err(err) => return Err(err),
            }
        }

        Ok((copy, skipped))
    }
}
