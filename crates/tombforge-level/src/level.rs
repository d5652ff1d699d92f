use std::collections::VecDeque;

use hashbrown::HashSet;
use thiserror::Error;
use tombforge_sector::{PortalId, SectorRect};

use crate::portal::{Portal, PortalDirection, PortalOpacity};
use crate::room::Room;
use crate::{MAX_ROOMS, RoomId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LevelError {
    #[error("level already holds the maximum of {max} rooms")]
    TooManyRooms { max: usize },

    #[error("{0} does not exist")]
    UnknownRoom(RoomId),

    #[error("no room named `{0}`")]
    UnknownRoomName(String),

    #[error("portal area {area:?} is not on the {direction:?} side of {room}")]
    PortalOutsideBorder {
        room: RoomId,
        direction: PortalDirection,
        area: SectorRect,
    },

    #[error("cannot connect {a} to {b}: {reason}")]
    PortalMismatch {
        a: RoomId,
        b: RoomId,
        reason: &'static str,
    },

    #[error("portal area {area:?} overlaps an existing portal in {room}")]
    PortalOverlap { room: RoomId, area: SectorRect },

    #[error("alternate {alternate} does not match the grid size of {base}")]
    AlternateSizeMismatch { base: RoomId, alternate: RoomId },

    #[error("{0} is already part of an alternate pair")]
    AlternateAlreadyPaired(RoomId),

    #[error("{0} still has portals")]
    RoomHasPortals(RoomId),
}

/// Owns every room. Removed rooms leave a hole so ids stay stable.
#[derive(Clone, Debug, Default)]
pub struct Level {
    rooms: Vec<Option<Room>>,
}

impl Level {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_room(&mut self, room: Room) -> Result<RoomId, LevelError> {
        let slot = match self.rooms.iter().position(Option::is_none) {
            Some(i) => i,
            None if self.rooms.len() < MAX_ROOMS => {
                self.rooms.push(None);
                self.rooms.len() - 1
            }
            None => return Err(LevelError::TooManyRooms { max: MAX_ROOMS }),
        };
        log::debug!(target: "level", "add room `{}` as #{}", room.name, slot);
        self.rooms[slot] = Some(room);
        Ok(RoomId(slot as u16))
    }

    /// Removes a room that has no portals left, dissolving its alternate pairing.
    pub fn remove_room(&mut self, id: RoomId) -> Result<Room, LevelError> {
        let room = self.room(id).ok_or(LevelError::UnknownRoom(id))?;
        if !room.portals.is_empty() {
            return Err(LevelError::RoomHasPortals(id));
        }
        let (alt, base) = (room.alternate, room.alternate_base);
        if let Some(other) = alt.and_then(|a| self.room_mut(a)) {
            other.alternate_base = None;
        }
        if let Some(other) = base.and_then(|b| self.room_mut(b)) {
            other.alternate = None;
        }
        let mut room = self.rooms[id.0 as usize]
            .take()
            .ok_or(LevelError::UnknownRoom(id))?;
        room.alternate = None;
        room.alternate_base = None;
        Ok(room)
    }

    #[inline]
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.0 as usize).and_then(Option::as_ref)
    }

    #[inline]
    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(id.0 as usize).and_then(Option::as_mut)
    }

    pub fn rooms(&self) -> impl Iterator<Item = (RoomId, &Room)> {
        self.rooms
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.as_ref().map(|r| (RoomId(i as u16), r)))
    }

    pub fn room_count(&self) -> usize {
        self.rooms.iter().flatten().count()
    }

    pub fn find_room(&self, name: &str) -> Result<RoomId, LevelError> {
        self.rooms()
            .find(|(_, r)| r.name == name)
            .map(|(id, _)| id)
            .ok_or_else(|| LevelError::UnknownRoomName(name.to_string()))
    }

    /// Links `a` to `b` through `area` (in `a`'s grid) and installs the
    /// reciprocal portal in `b`. Returns the new portal ids in `a` and `b`.
    pub fn connect_rooms(
        &mut self,
        a: RoomId,
        direction: PortalDirection,
        area: SectorRect,
        b: RoomId,
        opacity: PortalOpacity,
    ) -> Result<(PortalId, PortalId), LevelError> {
        if a == b {
            return Err(LevelError::PortalMismatch {
                a,
                b,
                reason: "a room cannot connect to itself",
            });
        }
        let room_a = self.room(a).ok_or(LevelError::UnknownRoom(a))?;
        let room_b = self.room(b).ok_or(LevelError::UnknownRoom(b))?;
        if room_a.is_alternate() || room_b.is_alternate() {
            return Err(LevelError::PortalMismatch {
                a,
                b,
                reason: "portals are authored on base rooms",
            });
        }
        let reverse = reverse_area(room_a, room_b, direction, area);
        validate_portal_area(room_a, a, direction, area)?;
        validate_portal_area(room_b, b, direction.opposite(), reverse)?;

        let pa = PortalId(room_a.portals.len() as u16);
        let pb = PortalId(room_b.portals.len() as u16);
        install_portal(
            self.room_mut(a).ok_or(LevelError::UnknownRoom(a))?,
            pa,
            Portal {
                direction,
                area,
                adjoining_room: b,
                opacity,
            },
        );
        install_portal(
            self.room_mut(b).ok_or(LevelError::UnknownRoom(b))?,
            pb,
            Portal {
                direction: direction.opposite(),
                area: reverse,
                adjoining_room: a,
                opacity,
            },
        );
        log::info!(
            target: "level",
            "portal {a} {direction:?} {area:?} <-> {b} {:?} {reverse:?}",
            direction.opposite()
        );
        Ok((pa, pb))
    }

    /// Portal in the adjoining room that points back at `room`.
    pub fn reciprocal(&self, room: RoomId, portal: PortalId) -> Option<(RoomId, PortalId)> {
        let src = self.room(room)?;
        let p = src.portal(portal)?;
        let other = self.room(p.adjoining_room)?;
        let expected = reverse_area(src, other, p.direction, p.area);
        other
            .portals
            .iter()
            .position(|q| {
                q.adjoining_room == room
                    && q.direction == p.direction.opposite()
                    && q.area == expected
            })
            .map(|i| (p.adjoining_room, PortalId(i as u16)))
    }

    /// Every room reachable from `start` through portals and alternate links,
    /// `start` first, in breadth-first order.
    pub fn connected_rooms(&self, start: RoomId) -> Vec<RoomId> {
        let mut order = Vec::new();
        if self.room(start).is_none() {
            return order;
        }
        let mut visited: HashSet<RoomId> = HashSet::new();
        let mut queue = VecDeque::new();
        visited.insert(start);
        queue.push_back(start);
        while let Some(id) = queue.pop_front() {
            order.push(id);
            let Some(room) = self.room(id) else {
                continue;
            };
            let links = room
                .portals
                .iter()
                .map(|p| p.adjoining_room)
                .chain(room.alternate)
                .chain(room.alternate_base);
            for next in links {
                if self.room(next).is_some() && visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        order
    }

    /// Room whose portal table `room` uses. Alternates share their base's
    /// portals; every other room owns its own.
    pub fn portal_owner<'a>(&'a self, room: &'a Room) -> &'a Room {
        room.alternate_base
            .and_then(|base| self.room(base))
            .unwrap_or(room)
    }

    /// Pairs `alternate` as the flip-room variant of `base`. The alternate is
    /// moved onto the base's origin.
    pub fn set_alternate(&mut self, base: RoomId, alternate: RoomId) -> Result<(), LevelError> {
        if base == alternate {
            return Err(LevelError::AlternateAlreadyPaired(base));
        }
        let b = self.room(base).ok_or(LevelError::UnknownRoom(base))?;
        let a = self.room(alternate).ok_or(LevelError::UnknownRoom(alternate))?;
        if b.alternate.is_some() || b.alternate_base.is_some() {
            return Err(LevelError::AlternateAlreadyPaired(base));
        }
        if a.alternate.is_some() || a.alternate_base.is_some() {
            return Err(LevelError::AlternateAlreadyPaired(alternate));
        }
        if b.num_x() != a.num_x() || b.num_z() != a.num_z() {
            return Err(LevelError::AlternateSizeMismatch { base, alternate });
        }
        if !a.portals.is_empty() {
            return Err(LevelError::RoomHasPortals(alternate));
        }
        let position = b.position;
        if let Some(b) = self.room_mut(base) {
            b.alternate = Some(alternate);
        }
        if let Some(a) = self.room_mut(alternate) {
            a.alternate_base = Some(base);
            a.position = position;
        }
        log::debug!(target: "level", "{alternate} is the alternate of {base}");
        Ok(())
    }
}

/// Maps a portal area in `from`'s grid onto `to`'s grid.
pub fn reverse_area(from: &Room, to: &Room, direction: PortalDirection, area: SectorRect) -> SectorRect {
    let (sx, sz) = direction.mirror_shift();
    area.offset(
        from.position.x - to.position.x + sx,
        from.position.z - to.position.z + sz,
    )
}

fn validate_portal_area(
    room: &Room,
    id: RoomId,
    direction: PortalDirection,
    area: SectorRect,
) -> Result<(), LevelError> {
    let (nx, nz) = (room.num_x(), room.num_z());
    let outside = || LevelError::PortalOutsideBorder {
        room: id,
        direction,
        area,
    };
    let along_x = area.x0 >= 1 && area.x1 <= nx - 2;
    let along_z = area.z0 >= 1 && area.z1 <= nz - 2;
    let ok = match direction {
        PortalDirection::North => along_x && area.z0 == nz - 1 && area.z1 == nz - 1,
        PortalDirection::South => along_x && area.z0 == 0 && area.z1 == 0,
        PortalDirection::East => along_z && area.x0 == nx - 1 && area.x1 == nx - 1,
        PortalDirection::West => along_z && area.x0 == 0 && area.x1 == 0,
        PortalDirection::Floor | PortalDirection::Ceiling => along_x && along_z,
    };
    if !ok {
        return Err(outside());
    }
    let taken = area.iter().any(|(x, z)| {
        room.block(x, z).is_some_and(|b| match direction {
            PortalDirection::Floor => b.floor_portal.is_some(),
            PortalDirection::Ceiling => b.ceiling_portal.is_some(),
            _ => b.wall_portal.is_some(),
        })
    });
    if taken {
        return Err(LevelError::PortalOverlap { room: id, area });
    }
    Ok(())
}

fn install_portal(room: &mut Room, id: PortalId, portal: Portal) {
    let direction = portal.direction;
    room.grid.edit_area(portal.area, |_, _, b| match direction {
        PortalDirection::Floor => b.floor_portal = Some(id),
        PortalDirection::Ceiling => b.ceiling_portal = Some(id),
        _ => b.wall_portal = Some(id),
    });
    room.portals.push(portal);
}
