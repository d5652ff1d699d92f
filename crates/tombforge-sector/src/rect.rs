/// Inclusive rectangle of sectors: `x0..=x1`, `z0..=z1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SectorRect {
    pub x0: i32,
    pub z0: i32,
    pub x1: i32,
    pub z1: i32,
}

impl SectorRect {
    /// Builds a rectangle from any two opposite corners.
    pub fn new(xa: i32, za: i32, xb: i32, zb: i32) -> Self {
        Self {
            x0: xa.min(xb),
            z0: za.min(zb),
            x1: xa.max(xb),
            z1: za.max(zb),
        }
    }

    #[inline]
    pub fn single(x: i32, z: i32) -> Self {
        Self::new(x, z, x, z)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.x1 - self.x0 + 1
    }

    #[inline]
    pub fn depth(&self) -> i32 {
        self.z1 - self.z0 + 1
    }

    #[inline]
    pub fn contains(&self, x: i32, z: i32) -> bool {
        x >= self.x0 && x <= self.x1 && z >= self.z0 && z <= self.z1
    }

    #[inline]
    pub fn inflate(&self, n: i32) -> Self {
        Self {
            x0: self.x0 - n,
            z0: self.z0 - n,
            x1: self.x1 + n,
            z1: self.z1 + n,
        }
    }

    #[inline]
    pub fn offset(&self, dx: i32, dz: i32) -> Self {
        Self {
            x0: self.x0 + dx,
            z0: self.z0 + dz,
            x1: self.x1 + dx,
            z1: self.z1 + dz,
        }
    }

    #[inline]
    pub fn intersects(&self, other: &SectorRect) -> bool {
        self.x0 <= other.x1 && other.x0 <= self.x1 && self.z0 <= other.z1 && other.z0 <= self.z1
    }

    pub fn intersect(&self, other: &SectorRect) -> Option<SectorRect> {
        if !self.intersects(other) {
            return None;
        }
        Some(SectorRect {
            x0: self.x0.max(other.x0),
            z0: self.z0.max(other.z0),
            x1: self.x1.min(other.x1),
            z1: self.z1.min(other.z1),
        })
    }

    /// Iterates `(x, z)` row by row (z outer).
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
        let (x0, x1) = (self.x0, self.x1);
        (self.z0..=self.z1).flat_map(move |z| (x0..=x1).map(move |x| (x, z)))
    }
}
