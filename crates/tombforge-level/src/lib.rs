//! Rooms, portals, lights and the level that owns them.
#![forbid(unsafe_code)]

pub mod desc;
pub mod height;
pub mod level;
pub mod light;
pub mod portal;
pub mod room;

pub use desc::LevelDesc;
pub use height::{HeightCombine, VerticalSpan, average, highest, lowest};
pub use level::{Level, LevelError};
pub use light::{Light, LightKind};
pub use portal::{Portal, PortalDirection, PortalOpacity};
pub use room::{Room, RoomOrigin};

/// Hard cap on rooms per level.
pub const MAX_ROOMS: usize = 1024;

/// Index of a room inside its [`Level`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(pub u16);

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "room#{}", self.0)
    }
}
