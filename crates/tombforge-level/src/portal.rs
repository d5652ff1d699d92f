use tombforge_sector::{Direction, SectorRect};

use crate::RoomId;

/// Side of the room a portal sits on. Wall portals lie on the border ring,
/// floor and ceiling portals cover interior sectors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PortalDirection {
    North,
    South,
    East,
    West,
    Floor,
    Ceiling,
}

impl PortalDirection {
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            PortalDirection::North => PortalDirection::South,
            PortalDirection::South => PortalDirection::North,
            PortalDirection::East => PortalDirection::West,
            PortalDirection::West => PortalDirection::East,
            PortalDirection::Floor => PortalDirection::Ceiling,
            PortalDirection::Ceiling => PortalDirection::Floor,
        }
    }

    #[inline]
    pub fn is_wall(self) -> bool {
        self.wall_direction().is_some()
    }

    #[inline]
    pub fn wall_direction(self) -> Option<Direction> {
        match self {
            PortalDirection::North => Some(Direction::North),
            PortalDirection::South => Some(Direction::South),
            PortalDirection::East => Some(Direction::East),
            PortalDirection::West => Some(Direction::West),
            PortalDirection::Floor | PortalDirection::Ceiling => None,
        }
    }

    /// Shift applied after the origin delta so a wall portal lands on the
    /// adjoining room's border row. Adjoining rooms overlap by two rows: each
    /// border row lies over the other room's outermost interior row.
    #[inline]
    pub fn mirror_shift(self) -> (i32, i32) {
        match self {
            PortalDirection::North => (0, -1),
            PortalDirection::South => (0, 1),
            PortalDirection::East => (-1, 0),
            PortalDirection::West => (1, 0),
            PortalDirection::Floor | PortalDirection::Ceiling => (0, 0),
        }
    }
}

/// Whether faces across the portal are still drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PortalOpacity {
    #[default]
    None,
    SolidFaces,
    TraversableFaces,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Portal {
    pub direction: PortalDirection,
    pub area: SectorRect,
    pub adjoining_room: RoomId,
    pub opacity: PortalOpacity,
}

impl Portal {
    #[inline]
    pub fn draws_faces(&self) -> bool {
        !matches!(self.opacity, PortalOpacity::None)
    }
}
