use tombforge_geom::Vec2;

/// Canonical corner UVs for a quad, in emission order p0..p3.
pub const CANONICAL_UV: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
];

/// Texture assignment for one block face. `texture == None` renders untextured.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextureArea {
    pub texture: Option<u16>,
    pub tex_coords: [Vec2; 4],
    pub double_sided: bool,
}

impl Default for TextureArea {
    fn default() -> Self {
        Self {
            texture: None,
            tex_coords: CANONICAL_UV,
            double_sided: false,
        }
    }
}

impl TextureArea {
    pub fn new(texture: u16) -> Self {
        Self {
            texture: Some(texture),
            ..Self::default()
        }
    }
}
