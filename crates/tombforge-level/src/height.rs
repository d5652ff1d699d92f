//! Floor/ceiling height queries used by placement and collision tooling.

use tombforge_sector::{Block, NE, NW, SE, SW, SectorRect};

use crate::room::Room;

/// Reduces a set of corner heights (clicks) to one value.
pub type Combiner = fn(&[i16]) -> i32;

pub fn average(values: &[i16]) -> i32 {
    if values.is_empty() {
        return 0;
    }
    values.iter().map(|&v| v as i32).sum::<i32>() / values.len() as i32
}

pub fn lowest(values: &[i16]) -> i32 {
    values.iter().map(|&v| v as i32).min().unwrap_or(0)
}

pub fn highest(values: &[i16]) -> i32 {
    values.iter().map(|&v| v as i32).max().unwrap_or(0)
}

/// Standard combiner pairs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeightCombine {
    Average,
    /// Smallest clear space: highest floor, lowest ceiling.
    MinSpace,
    /// Largest clear space: lowest floor, highest ceiling.
    MaxSpace,
}

impl HeightCombine {
    pub fn floor(self) -> Combiner {
        match self {
            HeightCombine::Average => average,
            HeightCombine::MinSpace => highest,
            HeightCombine::MaxSpace => lowest,
        }
    }

    pub fn ceiling(self) -> Combiner {
        match self {
            HeightCombine::Average => average,
            HeightCombine::MinSpace => lowest,
            HeightCombine::MaxSpace => highest,
        }
    }
}

/// Combined floor and ceiling, in clicks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VerticalSpan {
    pub floor: i32,
    pub ceiling: i32,
}

impl VerticalSpan {
    #[inline]
    pub fn clearance(&self) -> i32 {
        self.ceiling - self.floor
    }
}

impl Room {
    /// Heights at grid vertex `(x, z)` sampled from the up to four non-wall
    /// sectors meeting there. `None` when no such sector exists.
    pub fn height_at_point(
        &self,
        x: i32,
        z: i32,
        floor: impl Fn(&[i16]) -> i32,
        ceiling: impl Fn(&[i16]) -> i32,
    ) -> Option<VerticalSpan> {
        // (sector dx, sector dz, corner of that sector sitting on the vertex)
        const AROUND: [(i32, i32, usize); 4] = [(0, 0, SW), (-1, 0, SE), (-1, -1, NE), (0, -1, NW)];
        let mut floors = Vec::with_capacity(4);
        let mut ceilings = Vec::with_capacity(4);
        for (dx, dz, corner) in AROUND {
            if let Some(b) = self.open_block(x + dx, z + dz) {
                floors.push(b.qa[corner]);
                ceilings.push(b.ws[corner]);
            }
        }
        combine(&floors, &ceilings, floor, ceiling)
    }

    /// Heights over every corner of every non-wall sector inside `area`.
    pub fn height_in_area(
        &self,
        area: SectorRect,
        floor: impl Fn(&[i16]) -> i32,
        ceiling: impl Fn(&[i16]) -> i32,
    ) -> Option<VerticalSpan> {
        let area = area.intersect(&self.grid.bounds())?;
        let mut floors = Vec::new();
        let mut ceilings = Vec::new();
        for (x, z) in area.iter() {
            if let Some(b) = self.open_block(x, z) {
                floors.extend_from_slice(&b.qa);
                ceilings.extend_from_slice(&b.ws);
            }
        }
        combine(&floors, &ceilings, floor, ceiling)
    }

    /// Convenience wrapper over [`Room::height_at_point`] with a standard combiner.
    pub fn height_at_point_with(&self, x: i32, z: i32, mode: HeightCombine) -> Option<VerticalSpan> {
        self.height_at_point(x, z, mode.floor(), mode.ceiling())
    }

    fn open_block(&self, x: i32, z: i32) -> Option<&Block> {
        self.grid.get(x, z).filter(|b| !b.is_wall())
    }
}

fn combine(
    floors: &[i16],
    ceilings: &[i16],
    floor: impl Fn(&[i16]) -> i32,
    ceiling: impl Fn(&[i16]) -> i32,
) -> Option<VerticalSpan> {
    if floors.is_empty() {
        return None;
    }
    Some(VerticalSpan {
        floor: floor(floors),
        ceiling: ceiling(ceilings),
    })
}
