//! TOML level description: rooms, sector edits, lights, portals and
//! alternate pairs.
//!
//! ```toml
//! [[rooms]]
//! name = "hall"
//! position = [0, 0, 0]
//! size = [8, 6]
//!
//! [[rooms.edits]]
//! area = [3, 2, 4, 3]
//! kind = "wall"
//!
//! [[rooms.lights]]
//! kind = "point"
//! position = [2048.0, 2048.0, 2048.0]
//!
//! [[portals]]
//! from = "hall"
//! to = "corridor"
//! direction = "north"
//! area = [2, 5, 3, 5]
//! ```

use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

use tombforge_geom::Vec3;
use tombforge_sector::{BlockType, DiagonalSplit, SectorRect, TextureArea};

use crate::level::{Level, LevelError};
use crate::light::{Light, LightKind};
use crate::portal::{PortalDirection, PortalOpacity};
use crate::room::{DEFAULT_CEILING, Room, RoomOrigin};

#[derive(Clone, Debug, Default, Deserialize)]
pub struct LevelDesc {
    #[serde(default)]
    pub rooms: Vec<RoomDesc>,
    #[serde(default)]
    pub portals: Vec<PortalDesc>,
    #[serde(default)]
    pub alternates: Vec<AlternateDesc>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RoomDesc {
    pub name: String,
    /// Origin: x/z in sectors, y in clicks.
    #[serde(default)]
    pub position: [i32; 3],
    /// Grid size in sectors including the border ring.
    pub size: [i32; 2],
    #[serde(default)]
    pub floor: i16,
    #[serde(default = "default_ceiling")]
    pub ceiling: i16,
    #[serde(default = "default_ambient")]
    pub ambient: [f32; 3],
    #[serde(default)]
    pub edits: Vec<EditDesc>,
    #[serde(default)]
    pub lights: Vec<LightDesc>,
}

fn default_ceiling() -> i16 {
    DEFAULT_CEILING
}
fn default_ambient() -> [f32; 3] {
    [0.25, 0.25, 0.25]
}

/// Applied in file order over an inclusive `[x0, z0, x1, z1]` rectangle.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct EditDesc {
    pub area: [i32; 4],
    #[serde(default)]
    pub kind: Option<KindDesc>,
    #[serde(default)]
    pub floor: Option<i16>,
    #[serde(default)]
    pub ceiling: Option<i16>,
    /// Absolute floor corners `[NW, NE, SE, SW]`; steps follow.
    #[serde(default)]
    pub floor_corners: Option<[i16; 4]>,
    #[serde(default)]
    pub ceiling_corners: Option<[i16; 4]>,
    #[serde(default)]
    pub floor_steps: Option<[i16; 4]>,
    #[serde(default)]
    pub ceiling_steps: Option<[i16; 4]>,
    #[serde(default)]
    pub floor_split: Option<SplitDesc>,
    #[serde(default)]
    pub ceiling_split: Option<SplitDesc>,
    #[serde(default)]
    pub floor_split_toggled: Option<bool>,
    #[serde(default)]
    pub ceiling_split_toggled: Option<bool>,
    /// Texture id assigned to every face kind of the area.
    #[serde(default)]
    pub texture: Option<u16>,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum KindDesc {
    Floor,
    Wall,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SplitDesc {
    None,
    Nw,
    Ne,
    Se,
    Sw,
}

impl From<SplitDesc> for DiagonalSplit {
    fn from(s: SplitDesc) -> Self {
        match s {
            SplitDesc::None => DiagonalSplit::None,
            SplitDesc::Nw => DiagonalSplit::NW,
            SplitDesc::Ne => DiagonalSplit::NE,
            SplitDesc::Se => DiagonalSplit::SE,
            SplitDesc::Sw => DiagonalSplit::SW,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct LightDesc {
    #[serde(default)]
    pub kind: LightKindDesc,
    /// Room-local world units.
    #[serde(default)]
    pub position: [f32; 3],
    /// Pitch and yaw in degrees.
    #[serde(default)]
    pub rotation: [f32; 2],
    #[serde(default = "default_intensity")]
    pub intensity: f32,
    #[serde(default = "default_color")]
    pub color: [f32; 3],
    #[serde(default = "default_inner")]
    pub inner: f32,
    #[serde(default = "default_outer")]
    pub outer: f32,
    #[serde(default = "default_length")]
    pub length: f32,
    #[serde(default = "default_cutoff")]
    pub cutoff: f32,
    #[serde(default = "default_true")]
    pub casts_shadows: bool,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub statically_used: bool,
}

fn default_intensity() -> f32 {
    0.5
}
fn default_color() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}
fn default_inner() -> f32 {
    1.0
}
fn default_outer() -> f32 {
    5.0
}
fn default_length() -> f32 {
    1.0
}
fn default_cutoff() -> f32 {
    5.0
}
fn default_true() -> bool {
    true
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LightKindDesc {
    #[default]
    Point,
    Shadow,
    Effect,
    Sun,
    Spot,
}

impl From<LightKindDesc> for LightKind {
    fn from(k: LightKindDesc) -> Self {
        match k {
            LightKindDesc::Point => LightKind::Point,
            LightKindDesc::Shadow => LightKind::Shadow,
            LightKindDesc::Effect => LightKind::Effect,
            LightKindDesc::Sun => LightKind::Sun,
            LightKindDesc::Spot => LightKind::Spot,
        }
    }
}

impl LightDesc {
    pub fn to_light(&self) -> Light {
        let [x, y, z] = self.position;
        let [r, g, b] = self.color;
        Light {
            kind: self.kind.into(),
            position: Vec3::new(x, y, z),
            rotation_x: self.rotation[0],
            rotation_y: self.rotation[1],
            intensity: self.intensity,
            color: Vec3::new(r, g, b),
            inner: self.inner,
            outer: self.outer,
            length: self.length,
            cutoff: self.cutoff,
            casts_shadows: self.casts_shadows,
            enabled: self.enabled,
            statically_used: self.statically_used,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct PortalDesc {
    pub from: String,
    pub to: String,
    pub direction: DirectionDesc,
    /// Inclusive `[x0, z0, x1, z1]` in the `from` room's grid.
    pub area: [i32; 4],
    #[serde(default)]
    pub opacity: OpacityDesc,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DirectionDesc {
    North,
    South,
    East,
    West,
    Floor,
    Ceiling,
}

impl From<DirectionDesc> for PortalDirection {
    fn from(d: DirectionDesc) -> Self {
        match d {
            DirectionDesc::North => PortalDirection::North,
            DirectionDesc::South => PortalDirection::South,
            DirectionDesc::East => PortalDirection::East,
            DirectionDesc::West => PortalDirection::West,
            DirectionDesc::Floor => PortalDirection::Floor,
            DirectionDesc::Ceiling => PortalDirection::Ceiling,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OpacityDesc {
    #[default]
    None,
    Solid,
    Traversable,
}

impl From<OpacityDesc> for PortalOpacity {
    fn from(o: OpacityDesc) -> Self {
        match o {
            OpacityDesc::None => PortalOpacity::None,
            OpacityDesc::Solid => PortalOpacity::SolidFaces,
            OpacityDesc::Traversable => PortalOpacity::TraversableFaces,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct AlternateDesc {
    pub base: String,
    pub alternate: String,
}

fn rect(a: [i32; 4]) -> SectorRect {
    SectorRect::new(a[0], a[1], a[2], a[3])
}

impl LevelDesc {
    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// Builds the level: rooms first, then portals, then alternate pairs.
    pub fn build(&self) -> Result<Level, LevelError> {
        let mut level = Level::new();
        for rd in &self.rooms {
            level.add_room(rd.to_room())?;
        }
        for pd in &self.portals {
            let a = level.find_room(&pd.from)?;
            let b = level.find_room(&pd.to)?;
            level.connect_rooms(a, pd.direction.into(), rect(pd.area), b, pd.opacity.into())?;
        }
        for ad in &self.alternates {
            let base = level.find_room(&ad.base)?;
            let alt = level.find_room(&ad.alternate)?;
            level.set_alternate(base, alt)?;
        }
        log::info!(
            target: "level",
            "built level: {} rooms, {} portal pairs, {} alternates",
            level.room_count(),
            self.portals.len(),
            self.alternates.len()
        );
        Ok(level)
    }
}

impl RoomDesc {
    pub fn to_room(&self) -> Room {
        let [x, y, z] = self.position;
        let mut room = Room::new(self.name.clone(), RoomOrigin::new(x, y, z), self.size[0], self.size[1]);
        let bounds = room.grid.bounds();
        room.grid.edit_area(bounds, |_, _, b| {
            b.set_floor(self.floor);
            b.set_ceiling(self.ceiling);
        });
        let [r, g, b] = self.ambient;
        room.ambient = Vec3::new(r, g, b);
        for edit in &self.edits {
            edit.apply(&mut room);
        }
        room.lights = self.lights.iter().map(LightDesc::to_light).collect();
        room
    }
}

impl EditDesc {
    pub fn apply(&self, room: &mut Room) {
        room.grid.edit_area(rect(self.area), |_, _, b| {
            match self.kind {
                Some(KindDesc::Wall) => b.kind = BlockType::Wall,
                Some(KindDesc::Floor) => b.kind = BlockType::Floor,
                None => {}
            }
            if let Some(h) = self.floor {
                b.set_floor(h);
            }
            if let Some(h) = self.ceiling {
                b.set_ceiling(h);
            }
            if let Some(c) = self.floor_corners {
                b.qa = c;
                b.ed = c;
            }
            if let Some(c) = self.ceiling_corners {
                b.ws = c;
                b.rf = c;
            }
            if let Some(s) = self.floor_steps {
                b.ed = s;
            }
            if let Some(s) = self.ceiling_steps {
                b.rf = s;
            }
            if let Some(s) = self.floor_split {
                b.floor_split = s.into();
            }
            if let Some(s) = self.ceiling_split {
                b.ceiling_split = s.into();
            }
            if let Some(t) = self.floor_split_toggled {
                b.floor_split_toggled = t;
            }
            if let Some(t) = self.ceiling_split_toggled {
                b.ceiling_split_toggled = t;
            }
            if let Some(id) = self.texture {
                b.textures = [TextureArea::new(id); tombforge_sector::BlockFace::COUNT];
            }
        });
    }
}
