use crate::face::BlockFace;
use crate::texture::TextureArea;

/// Corner indices into the `[i16; 4]` height arrays, clockwise from above.
pub const NW: usize = 0;
pub const NE: usize = 1;
pub const SE: usize = 2;
pub const SW: usize = 3;

/// Sector-unit offsets of each corner relative to the sector's (x, z) origin.
pub const CORNER_OFFSETS: [(i32, i32); 4] = [(0, 1), (1, 1), (1, 0), (0, 0)];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlockType {
    #[default]
    Floor,
    Wall,
    BorderWall,
}

/// Which diagonal a floor or ceiling is split on. The named corner and its
/// opposite are the endpoints of the shared edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DiagonalSplit {
    #[default]
    None,
    NW,
    NE,
    SE,
    SW,
}

impl DiagonalSplit {
    #[inline]
    pub fn corner(self) -> Option<usize> {
        match self {
            DiagonalSplit::None => None,
            DiagonalSplit::NW => Some(NW),
            DiagonalSplit::NE => Some(NE),
            DiagonalSplit::SE => Some(SE),
            DiagonalSplit::SW => Some(SW),
        }
    }

    #[inline]
    pub fn from_corner(corner: usize) -> Self {
        match corner & 3 {
            NW => DiagonalSplit::NW,
            NE => DiagonalSplit::NE,
            SE => DiagonalSplit::SE,
            _ => DiagonalSplit::SW,
        }
    }

    #[inline]
    pub fn is_none(self) -> bool {
        matches!(self, DiagonalSplit::None)
    }

    /// Corners of the half that keeps the stored heights: (C, L, O).
    #[inline]
    pub fn open_half(self) -> Option<[usize; 3]> {
        self.corner().map(|c| [c, (c + 1) & 3, (c + 2) & 3])
    }

    /// Corners of the flattened half: (C, O, R).
    #[inline]
    pub fn flat_half(self) -> Option<[usize; 3]> {
        self.corner().map(|c| [c, (c + 2) & 3, (c + 3) & 3])
    }
}

/// Portal index inside the owning room's portal list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortalId(pub u16);

/// One sector of a room grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub kind: BlockType,
    /// Floor corner heights in clicks, `[NW, NE, SE, SW]`.
    pub qa: [i16; 4],
    /// Intermediate floor step heights.
    pub ed: [i16; 4],
    /// Ceiling corner heights.
    pub ws: [i16; 4],
    /// Intermediate ceiling step heights.
    pub rf: [i16; 4],
    pub floor_split: DiagonalSplit,
    pub ceiling_split: DiagonalSplit,
    /// Flips the triangulation diagonal of a non-planar floor from NW-SE to NE-SW.
    pub floor_split_toggled: bool,
    pub ceiling_split_toggled: bool,
    pub floor_portal: Option<PortalId>,
    pub ceiling_portal: Option<PortalId>,
    pub wall_portal: Option<PortalId>,
    pub textures: [TextureArea; BlockFace::COUNT],
}

impl Default for Block {
    fn default() -> Self {
        Self::new(BlockType::Floor, 0, 12)
    }
}

impl Block {
    pub fn new(kind: BlockType, floor: i16, ceiling: i16) -> Self {
        Self {
            kind,
            qa: [floor; 4],
            ed: [floor; 4],
            ws: [ceiling; 4],
            rf: [ceiling; 4],
            floor_split: DiagonalSplit::None,
            ceiling_split: DiagonalSplit::None,
            floor_split_toggled: false,
            ceiling_split_toggled: false,
            floor_portal: None,
            ceiling_portal: None,
            wall_portal: None,
            textures: [TextureArea::default(); BlockFace::COUNT],
        }
    }

    #[inline]
    pub fn is_wall(&self) -> bool {
        matches!(self.kind, BlockType::Wall | BlockType::BorderWall)
    }

    /// A wall without a diagonal split is closed on all four edges.
    #[inline]
    pub fn is_full_wall(&self) -> bool {
        self.is_wall() && self.floor_split.is_none()
    }

    #[inline]
    pub fn floor_min(&self) -> i16 {
        self.qa.iter().copied().min().unwrap_or(0)
    }

    #[inline]
    pub fn floor_max(&self) -> i16 {
        self.qa.iter().copied().max().unwrap_or(0)
    }

    #[inline]
    pub fn ceiling_min(&self) -> i16 {
        self.ws.iter().copied().min().unwrap_or(0)
    }

    #[inline]
    pub fn ceiling_max(&self) -> i16 {
        self.ws.iter().copied().max().unwrap_or(0)
    }

    /// Moves the whole floor (and its step) to a flat height.
    pub fn set_floor(&mut self, height: i16) {
        self.qa = [height; 4];
        self.ed = [height; 4];
    }

    /// Moves the whole ceiling (and its step) to a flat height.
    pub fn set_ceiling(&mut self, height: i16) {
        self.ws = [height; 4];
        self.rf = [height; 4];
    }

    /// Shifts a single floor corner, dragging the step height along when it was flush.
    pub fn raise_floor_corner(&mut self, corner: usize, delta: i16) {
        let i = corner & 3;
        let flush = self.ed[i] == self.qa[i];
        self.qa[i] = self.qa[i].saturating_add(delta);
        if flush || self.ed[i] > self.qa[i] {
            self.ed[i] = self.qa[i];
        }
    }

    /// Shifts a single ceiling corner, dragging the step height along when it was flush.
    pub fn raise_ceiling_corner(&mut self, corner: usize, delta: i16) {
        let i = corner & 3;
        let flush = self.rf[i] == self.ws[i];
        self.ws[i] = self.ws[i].saturating_add(delta);
        if flush || self.rf[i] < self.ws[i] {
            self.rf[i] = self.ws[i];
        }
    }

    #[inline]
    pub fn texture(&self, face: BlockFace) -> &TextureArea {
        &self.textures[face.index()]
    }

    #[inline]
    pub fn set_texture(&mut self, face: BlockFace, area: TextureArea) {
        self.textures[face.index()] = area;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_halves_share_the_split_diagonal() {
        let split = DiagonalSplit::NW;
        let open = split.open_half().unwrap();
        let flat = split.flat_half().unwrap();
        assert_eq!(open, [NW, NE, SE]);
        assert_eq!(flat, [NW, SE, SW]);
        for s in [DiagonalSplit::NE, DiagonalSplit::SE, DiagonalSplit::SW] {
            let c = s.corner().unwrap();
            assert_eq!(DiagonalSplit::from_corner(c), s);
            let o = s.open_half().unwrap();
            let f = s.flat_half().unwrap();
            assert_eq!(o[0], f[0]);
            assert_eq!(o[2], f[1]);
        }
    }

    #[test]
    fn corner_raise_drags_flush_step() {
        let mut b = Block::new(BlockType::Floor, 0, 12);
        b.raise_floor_corner(NE, 3);
        assert_eq!(b.qa, [0, 3, 0, 0]);
        assert_eq!(b.ed, [0, 3, 0, 0]);
        b.ed[SE] = -2;
        b.raise_floor_corner(SE, 1);
        assert_eq!(b.qa[SE], 1);
        assert_eq!(b.ed[SE], -2);
        assert_eq!(b.floor_min(), 0);
        assert_eq!(b.floor_max(), 3);
    }

    #[test]
    fn walls_report_fullness() {
        let mut b = Block::new(BlockType::Wall, 0, 12);
        assert!(b.is_wall());
        assert!(b.is_full_wall());
        b.floor_split = DiagonalSplit::SE;
        assert!(!b.is_full_wall());
        assert!(!Block::default().is_wall());
    }
}
