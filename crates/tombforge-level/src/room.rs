use tombforge_geom::{CLICK_UNITS, SECTOR_UNITS, Vec3};
use tombforge_sector::{Block, PortalId, SectorGrid};

use crate::RoomId;
use crate::light::Light;
use crate::portal::Portal;

/// Default clear height of a fresh room, in clicks.
pub const DEFAULT_CEILING: i16 = 12;

/// Grid origin of a room: `x`/`z` in sectors, `y` in clicks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RoomOrigin {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl RoomOrigin {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

#[derive(Clone, Debug)]
pub struct Room {
    pub name: String,
    pub position: RoomOrigin,
    pub grid: SectorGrid,
    /// Ambient light, 1.0 per channel is neutral.
    pub ambient: Vec3,
    pub lights: Vec<Light>,
    pub portals: Vec<Portal>,
    /// Flip-room variant of this room, if this is the base.
    pub alternate: Option<RoomId>,
    /// Base room, if this is the flipped variant.
    pub alternate_base: Option<RoomId>,
}

impl Room {
    pub fn new(name: impl Into<String>, position: RoomOrigin, num_x: i32, num_z: i32) -> Self {
        Self {
            name: name.into(),
            position,
            grid: SectorGrid::new(num_x, num_z, 0, DEFAULT_CEILING),
            ambient: Vec3::new(0.25, 0.25, 0.25),
            lights: Vec::new(),
            portals: Vec::new(),
            alternate: None,
            alternate_base: None,
        }
    }

    #[inline]
    pub fn num_x(&self) -> i32 {
        self.grid.num_x
    }

    #[inline]
    pub fn num_z(&self) -> i32 {
        self.grid.num_z
    }

    #[inline]
    pub fn block(&self, x: i32, z: i32) -> Option<&Block> {
        self.grid.get(x, z)
    }

    #[inline]
    pub fn portal(&self, id: PortalId) -> Option<&Portal> {
        self.portals.get(id.0 as usize)
    }

    /// World-space position of the room's local origin.
    #[inline]
    pub fn world_offset(&self) -> Vec3 {
        Vec3::new(
            (self.position.x * SECTOR_UNITS) as f32,
            (self.position.y * CLICK_UNITS) as f32,
            (self.position.z * SECTOR_UNITS) as f32,
        )
    }

    #[inline]
    pub fn is_alternate(&self) -> bool {
        self.alternate_base.is_some()
    }
}
