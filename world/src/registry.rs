//! Object and ride registries backing the placement queries.

use parkline_core::{
    LargeSceneryTile, MapCoords, RideRecord, RideTypeDescriptor, RideTypeId, RideId,
    SceneryEntryId, SmallSceneryFlags, TrackEdgeDescriptor, TrackTypeId, WallTypeDefinition,
    WallTypeId,
};

/// Loaded object definitions, indexed by their registration order.
#[derive(Debug, Default)]
pub(crate) struct ObjectRegistry {
    wall_types: Vec<WallTypeDefinition>,
    small_scenery: Vec<SmallSceneryFlags>,
    large_scenery: Vec<Vec<LargeSceneryTile>>,
}

impl ObjectRegistry {
    pub(crate) fn register_wall_type(&mut self, definition: WallTypeDefinition) -> WallTypeId {
        let id = WallTypeId::new(self.wall_types.len() as u16);
        self.wall_types.push(definition);
        id
    }

    pub(crate) fn register_small_scenery(&mut self, flags: SmallSceneryFlags) -> SceneryEntryId {
        let id = SceneryEntryId::new(self.small_scenery.len() as u16);
        self.small_scenery.push(flags);
        id
    }

    pub(crate) fn register_large_scenery(
        &mut self,
        tiles: Vec<LargeSceneryTile>,
    ) -> SceneryEntryId {
        let id = SceneryEntryId::new(self.large_scenery.len() as u16);
        self.large_scenery.push(tiles);
        id
    }

    pub(crate) fn wall_type(&self, id: WallTypeId) -> Option<&WallTypeDefinition> {
        self.wall_types.get(usize::from(id.get()))
    }

    pub(crate) fn small_scenery_flags(&self, id: SceneryEntryId) -> Option<SmallSceneryFlags> {
        self.small_scenery.get(usize::from(id.get())).copied()
    }

    pub(crate) fn large_scenery_tile(
        &self,
        id: SceneryEntryId,
        sequence: u8,
    ) -> Option<&LargeSceneryTile> {
        self.large_scenery
            .get(usize::from(id.get()))?
            .get(usize::from(sequence))
    }
}

/// A ride together with the tile its records are anchored to.
#[derive(Debug)]
pub(crate) struct RideSlot {
    pub(crate) record: RideRecord,
    pub(crate) location: MapCoords,
}

/// Rides, ride type descriptors, and track piece geometry.
#[derive(Debug, Default)]
pub(crate) struct RideRegistry {
    ride_types: Vec<RideTypeDescriptor>,
    rides: Vec<RideSlot>,
    tracks: Vec<TrackEdgeDescriptor>,
}

impl RideRegistry {
    pub(crate) fn register_ride_type(&mut self, descriptor: RideTypeDescriptor) -> RideTypeId {
        let id = RideTypeId::new(self.ride_types.len() as u16);
        self.ride_types.push(descriptor);
        id
    }

    pub(crate) fn register_track_type(&mut self, descriptor: TrackEdgeDescriptor) -> TrackTypeId {
        let id = TrackTypeId::new(self.tracks.len() as u16);
        self.tracks.push(descriptor);
        id
    }

    pub(crate) fn add_ride(&mut self, ride_type: RideTypeId, location: MapCoords) -> RideId {
        let id = RideId::new(self.rides.len() as u16);
        self.rides.push(RideSlot {
            record: RideRecord { ride_type },
            location,
        });
        id
    }

    pub(crate) fn ride(&self, id: RideId) -> Option<&RideRecord> {
        self.rides.get(usize::from(id.get())).map(|slot| &slot.record)
    }

    pub(crate) fn ride_type(&self, id: RideTypeId) -> Option<&RideTypeDescriptor> {
        self.ride_types.get(usize::from(id.get()))
    }

    pub(crate) fn track_descriptor(&self, id: TrackTypeId) -> Option<&TrackEdgeDescriptor> {
        self.tracks.get(usize::from(id.get()))
    }

    /// The ride closest to the coordinates, measured in whole tiles.
    ///
    /// Ties resolve to the lowest ride identifier so replays agree.
    pub(crate) fn nearest_within(&self, coords: MapCoords, range: i32) -> Option<RideId> {
        let mut best: Option<(i32, RideId)> = None;
        for (index, slot) in self.rides.iter().enumerate() {
            let distance = slot.location.manhattan_distance(coords);
            if distance > range {
                continue;
            }
            let id = RideId::new(index as u16);
            if best.map_or(true, |(best_distance, _)| distance < best_distance) {
                best = Some((distance, id));
            }
        }
        best.map(|(_, id)| id)
    }
}
