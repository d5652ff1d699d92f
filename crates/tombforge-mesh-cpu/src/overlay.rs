//! Read-only resolved heights. Portal border cells take their heights from the
//! adjoining room here, before any face is emitted; the grid is never touched.

use tombforge_level::{Level, Room};
use tombforge_sector::{Block, BlockType, DiagonalSplit};

/// How a cell on the grid border behaves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Border {
    Interior,
    /// One of the four extreme corners; never faceted.
    Corner,
    /// Plain border wall.
    Opaque,
    /// Wall portal. `middle` closes the opening with a Middle face.
    Portal { middle: bool },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedSector {
    pub kind: BlockType,
    pub qa: [i32; 4],
    pub ed: [i32; 4],
    pub ws: [i32; 4],
    pub rf: [i32; 4],
    pub floor_split: DiagonalSplit,
    pub ceiling_split: DiagonalSplit,
    pub floor_split_toggled: bool,
    pub ceiling_split_toggled: bool,
    pub border: Border,
    pub draw_floor: bool,
    pub draw_ceiling: bool,
}

#[inline]
fn widen(h: [i16; 4], dy: i32) -> [i32; 4] {
    h.map(|v| v as i32 + dy)
}

/// Height of `corner` as seen from `edge`: edges of the flattened half of a
/// split read the height of its far corner.
#[inline]
pub fn edge_height(h: &[i32; 4], split: DiagonalSplit, edge: usize, corner: usize) -> i32 {
    match split.corner() {
        Some(c) if edge == (c + 2) & 3 || edge == (c + 3) & 3 => h[(c + 3) & 3],
        _ => h[corner & 3],
    }
}

impl ResolvedSector {
    fn from_block(b: &Block, dy: i32, border: Border) -> Self {
        Self {
            kind: b.kind,
            qa: widen(b.qa, dy),
            ed: widen(b.ed, dy),
            ws: widen(b.ws, dy),
            rf: widen(b.rf, dy),
            floor_split: b.floor_split,
            ceiling_split: b.ceiling_split,
            floor_split_toggled: b.floor_split_toggled,
            ceiling_split_toggled: b.ceiling_split_toggled,
            border,
            draw_floor: true,
            draw_ceiling: true,
        }
    }

    #[inline]
    pub fn is_wall(&self) -> bool {
        matches!(self.kind, BlockType::Wall | BlockType::BorderWall)
    }

    #[inline]
    pub fn is_border(&self) -> bool {
        !matches!(self.border, Border::Interior)
    }

    /// Whether the edge (0 = north, clockwise) is closed by the block itself.
    /// A split wall is only open along the two edges of its open half.
    pub fn solid_on_edge(&self, edge: usize) -> bool {
        match self.border {
            Border::Corner | Border::Opaque | Border::Portal { middle: true } => return true,
            Border::Interior | Border::Portal { middle: false } => {}
        }
        if !self.is_wall() {
            return false;
        }
        match self.floor_split.corner() {
            None => true,
            Some(c) => edge == (c + 2) & 3 || edge == (c + 3) & 3,
        }
    }

    #[inline]
    pub fn floor_at(&self, edge: usize, corner: usize) -> i32 {
        edge_height(&self.qa, self.floor_split, edge, corner)
    }

    #[inline]
    pub fn floor_step_at(&self, edge: usize, corner: usize) -> i32 {
        edge_height(&self.ed, self.floor_split, edge, corner)
    }

    #[inline]
    pub fn ceiling_at(&self, edge: usize, corner: usize) -> i32 {
        edge_height(&self.ws, self.ceiling_split, edge, corner)
    }

    #[inline]
    pub fn ceiling_step_at(&self, edge: usize, corner: usize) -> i32 {
        edge_height(&self.rf, self.ceiling_split, edge, corner)
    }
}

#[derive(Clone, Debug)]
pub struct ResolvedHeights {
    pub num_x: i32,
    pub num_z: i32,
    sectors: Vec<ResolvedSector>,
}

impl ResolvedHeights {
    pub fn resolve(level: &Level, room: &Room) -> Self {
        let grid = &room.grid;
        let owner = level.portal_owner(room);
        let mut sectors = Vec::with_capacity((grid.num_x * grid.num_z) as usize);
        for (x, z, block) in grid.iter() {
            let border = if grid.is_corner(x, z) {
                Border::Corner
            } else if grid.is_border(x, z) {
                Border::Opaque
            } else {
                Border::Interior
            };
            let mut sector = ResolvedSector::from_block(block, 0, border);
            let refs = owner.block(x, z).unwrap_or(block);
            if border == Border::Opaque {
                if let Some(through) = resolve_wall_portal(level, room, owner, x, z, refs) {
                    sector = through;
                }
            }
            if border == Border::Interior {
                sector.draw_floor = !hidden_by_portal(owner, refs.floor_portal);
                sector.draw_ceiling = !hidden_by_portal(owner, refs.ceiling_portal);
            }
            sectors.push(sector);
        }
        Self {
            num_x: grid.num_x,
            num_z: grid.num_z,
            sectors,
        }
    }

    #[inline]
    pub fn get(&self, x: i32, z: i32) -> Option<&ResolvedSector> {
        if x >= 0 && z >= 0 && x < self.num_x && z < self.num_z {
            self.sectors.get((z * self.num_x + x) as usize)
        } else {
            None
        }
    }
}

fn hidden_by_portal(room: &Room, portal: Option<tombforge_sector::PortalId>) -> bool {
    portal
        .and_then(|id| room.portal(id))
        .is_some_and(|p| !p.draws_faces())
}

/// Heights of the adjoining room's sector at the same world position, in this
/// room's click frame. `owner` holds the portal table (the base room for an
/// alternate) and `refs` its block at `(x, z)`.
fn resolve_wall_portal(
    level: &Level,
    room: &Room,
    owner: &Room,
    x: i32,
    z: i32,
    refs: &Block,
) -> Option<ResolvedSector> {
    let portal = owner.portal(refs.wall_portal?)?;
    if !portal.direction.is_wall() {
        return None;
    }
    let other = level.room(portal.adjoining_room)?;
    let ox = x + room.position.x - other.position.x;
    let oz = z + room.position.z - other.position.z;
    let Some(adjoining) = other.block(ox, oz) else {
        log::warn!(
            target: "mesh",
            "portal cell ({x},{z}) of `{}` maps outside `{}`",
            room.name,
            other.name
        );
        return None;
    };
    let dy = other.position.y - room.position.y;
    let middle = adjoining.is_wall() || portal.draws_faces();
    Some(ResolvedSector::from_block(adjoining, dy, Border::Portal { middle }))
}
