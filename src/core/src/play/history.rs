use crate::play::{Millis, PhysicsWorld, WorldSnapshot};
use crate::PlaybookResult;
use ordered_float::OrderedFloat;
use std::collections::BTreeMap;

/// Physics snapshots keyed by play time, for rewinding the world itself.
#[derive(Debug, Clone)]
pub struct PhysicsWorldHistory {
    snapshots: BTreeMap<OrderedFloat<Millis>, WorldSnapshot>,
}

impl PhysicsWorldHistory {
    pub fn new(initial: WorldSnapshot) -> Self {
        let mut snapshots = BTreeMap::new();
        snapshots.insert(OrderedFloat(0.0), initial);

        PhysicsWorldHistory { snapshots }
    }

    /// Stores `snapshot` at `time` and forgets everything recorded after it.
    pub fn add_at(&mut self, time: Millis, snapshot: WorldSnapshot) {
        let key = OrderedFloat(time);

        self.snapshots.split_off(&key);
        self.snapshots.insert(key, snapshot);
    }

    /// Greatest key `<= time`, else the earliest snapshot.
    pub fn snapshot_at(&self, time: Millis) -> Option<&WorldSnapshot> {
        self.snapshots
            .range(..=OrderedFloat(time))
            .next_back()
            .or_else(|| self.snapshots.first_key_value())
            .map(|(_, snapshot)| snapshot)
    }

    pub fn world_at(&self, time: Millis) -> PlaybookResult<Option<PhysicsWorld>> {
        self.snapshot_at(time)
            .map(PhysicsWorld::from_snapshot)
            .transpose()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn times(&self) -> impl Iterator<Item = Millis> + '_ {
        self.snapshots.keys().map(|time| time.0)
    }
}
