//! Integer shadow tests against the sector grid.
//!
//! Points are room-local world units. A ray is blocked where it crosses a
//! sector edge outside the open span between that edge's floor and ceiling.
//! Sectors outside the grid never block.

use tombforge_geom::{CLICK_UNITS, SECTOR_UNITS};
use tombforge_sector::{Block, NE, NW, SE, SW, SectorGrid};

const SHIFT: i32 = 10;

/// Integer world position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl GridPoint {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// The lit point must sit inside the vertical span of its own sector.
pub fn check_floor_ceiling(grid: &SectorGrid, p: GridPoint) -> bool {
    let Some(block) = grid.get(p.x >> SHIFT, p.z >> SHIFT) else {
        return true;
    };
    let floor = block.floor_min() as i32 * CLICK_UNITS;
    let ceiling = block.ceiling_max() as i32 * CLICK_UNITS;
    p.y >= floor && p.y <= ceiling
}

/// Whether the edge through corners `c0`/`c1` of `block` lets height `y` pass.
fn edge_open(block: Option<&Block>, c0: usize, c1: usize, y: i64) -> bool {
    let Some(block) = block else {
        return true;
    };
    if block.is_wall() {
        return false;
    }
    let click = CLICK_UNITS as i64;
    let floor = (block.qa[c0] as i64 + block.qa[c1] as i64) * click / 2;
    let ceiling = (block.ws[c0] as i64 + block.ws[c1] as i64) * click / 2;
    y >= floor && y <= ceiling
}

/// Axis-generic march. `along` picks the marching coordinate out of a point,
/// `across` the other horizontal one; `sector` maps (along, across) sector
/// indices back to grid coordinates.
///
/// Each crossing tests the edges on both sides of the boundary, so swapping
/// `from` and `to` or mirroring the grid gives the same answer.
fn march(
    grid: &SectorGrid,
    from: GridPoint,
    to: GridPoint,
    along: impl Fn(GridPoint) -> i32,
    across: impl Fn(GridPoint) -> i32,
    sector: impl Fn(i32, i32) -> (i32, i32),
    // Corners of the sector edge facing the negative / positive marching side.
    low_edge: (usize, usize),
    high_edge: (usize, usize),
) -> bool {
    let (p0, p1) = if along(from) <= along(to) {
        (from, to)
    } else {
        (to, from)
    };
    let (a0, a1) = (along(p0) as i64, along(p1) as i64);
    let first = a0 >> SHIFT;
    let last = a1 >> SHIFT;
    if first == last {
        return true;
    }
    let da = a1 - a0 + 1;
    let dy = p1.y as i64 - p0.y as i64;
    let c0 = across(p0) as i64;
    let dc = across(p1) as i64 - c0;
    let unit = SECTOR_UNITS as i64;

    let mut cur = (first + 1) << SHIFT;
    let max = last << SHIFT;
    while cur <= max {
        let frac = cur - a0;
        let y = p0.y as i64 + dy * frac / da;
        let c = ((c0 + dc * frac / da) >> SHIFT) as i32;
        let s = (cur >> SHIFT) as i32;
        let (px, pz) = sector(s - 1, c);
        if !edge_open(grid.get(px, pz), high_edge.0, high_edge.1, y) {
            return false;
        }
        let (nx, nz) = sector(s, c);
        if !edge_open(grid.get(nx, nz), low_edge.0, low_edge.1, y) {
            return false;
        }
        cur += unit;
    }
    true
}

/// Tests every crossing of a sector boundary perpendicular to X.
pub fn ray_trace_x(grid: &SectorGrid, from: GridPoint, to: GridPoint) -> bool {
    march(
        grid,
        from,
        to,
        |p| p.x,
        |p| p.z,
        |s, c| (s, c),
        (NW, SW),
        (NE, SE),
    )
}

/// Tests every crossing of a sector boundary perpendicular to Z.
pub fn ray_trace_z(grid: &SectorGrid, from: GridPoint, to: GridPoint) -> bool {
    march(
        grid,
        from,
        to,
        |p| p.z,
        |p| p.x,
        |s, c| (c, s),
        (SW, SE),
        (NW, NE),
    )
}

/// Full visibility test between a lit point and a light position.
pub fn light_reaches(grid: &SectorGrid, lit: GridPoint, light: GridPoint) -> bool {
    check_floor_ceiling(grid, lit) && ray_trace_x(grid, lit, light) && ray_trace_z(grid, lit, light)
}
