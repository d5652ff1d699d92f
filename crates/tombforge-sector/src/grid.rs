use crate::block::{Block, BlockType};
use crate::rect::SectorRect;

/// Rectangular block grid of a room. The outer ring is always `BorderWall`.
#[derive(Clone, Debug, PartialEq)]
pub struct SectorGrid {
    pub num_x: i32,
    pub num_z: i32,
    blocks: Vec<Block>,
}

impl SectorGrid {
    /// Creates a grid with a flat floor and ceiling; sizes below 3 are clamped
    /// so a room always has room for its border.
    pub fn new(num_x: i32, num_z: i32, floor: i16, ceiling: i16) -> Self {
        let num_x = num_x.max(3);
        let num_z = num_z.max(3);
        let mut blocks = Vec::with_capacity((num_x * num_z) as usize);
        for z in 0..num_z {
            for x in 0..num_x {
                let kind = if x == 0 || z == 0 || x == num_x - 1 || z == num_z - 1 {
                    BlockType::BorderWall
                } else {
                    BlockType::Floor
                };
                blocks.push(Block::new(kind, floor, ceiling));
            }
        }
        Self {
            num_x,
            num_z,
            blocks,
        }
    }

    #[inline]
    fn idx(&self, x: i32, z: i32) -> usize {
        (z * self.num_x + x) as usize
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, z: i32) -> bool {
        x >= 0 && z >= 0 && x < self.num_x && z < self.num_z
    }

    /// Out-of-range lookups return `None` instead of panicking.
    #[inline]
    pub fn get(&self, x: i32, z: i32) -> Option<&Block> {
        if self.in_bounds(x, z) {
            Some(&self.blocks[self.idx(x, z)])
        } else {
            None
        }
    }

    /// Mutable access for editing. Callers changing `kind` should go through
    /// [`SectorGrid::set_type`] so the border ring stays intact.
    #[inline]
    pub fn get_mut(&mut self, x: i32, z: i32) -> Option<&mut Block> {
        if self.in_bounds(x, z) {
            let i = self.idx(x, z);
            Some(&mut self.blocks[i])
        } else {
            None
        }
    }

    #[inline]
    pub fn is_border(&self, x: i32, z: i32) -> bool {
        x == 0 || z == 0 || x == self.num_x - 1 || z == self.num_z - 1
    }

    #[inline]
    pub fn is_corner(&self, x: i32, z: i32) -> bool {
        (x == 0 || x == self.num_x - 1) && (z == 0 || z == self.num_z - 1)
    }

    /// Sets a block type; border cells stay `BorderWall`. Returns whether the cell changed.
    pub fn set_type(&mut self, x: i32, z: i32, kind: BlockType) -> bool {
        if !self.in_bounds(x, z) || self.is_border(x, z) {
            return false;
        }
        let i = self.idx(x, z);
        let changed = self.blocks[i].kind != kind;
        self.blocks[i].kind = kind;
        changed
    }

    /// Restores the border ring after bulk edits through `get_mut`.
    pub fn enforce_border(&mut self) {
        for z in 0..self.num_z {
            for x in 0..self.num_x {
                if self.is_border(x, z) {
                    let i = self.idx(x, z);
                    self.blocks[i].kind = BlockType::BorderWall;
                }
            }
        }
    }

    #[inline]
    pub fn bounds(&self) -> SectorRect {
        SectorRect::new(0, 0, self.num_x - 1, self.num_z - 1)
    }

    /// Iterates `(x, z, block)` row by row.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, &Block)> {
        let nx = self.num_x;
        self.blocks
            .iter()
            .enumerate()
            .map(move |(i, b)| (i as i32 % nx, i as i32 / nx, b))
    }

    /// Applies `f` to every block inside `area` (clipped to the grid).
    pub fn edit_area(&mut self, area: SectorRect, mut f: impl FnMut(i32, i32, &mut Block)) {
        let Some(area) = area.intersect(&self.bounds()) else {
            return;
        };
        for (x, z) in area.iter() {
            let i = self.idx(x, z);
            f(x, z, &mut self.blocks[i]);
        }
        self.enforce_border();
    }
}
