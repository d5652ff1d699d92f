use tombforge_geom::Vec3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LightKind {
    #[default]
    Point,
    /// Same falloff as `Point` but removes light.
    Shadow,
    Effect,
    Sun,
    Spot,
}

/// A light in room-local world units. Radii are in sectors, angles in degrees.
#[derive(Clone, Debug, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub position: Vec3,
    pub rotation_x: f32,
    pub rotation_y: f32,
    pub intensity: f32,
    pub color: Vec3,
    /// Point/Shadow: full-intensity radius. Spot: inner cone angle.
    pub inner: f32,
    /// Point/Shadow: zero-intensity radius. Spot: outer cone angle.
    pub outer: f32,
    /// Spot: distance up to which there is no distance falloff.
    pub length: f32,
    /// Spot: maximum reach.
    pub cutoff: f32,
    pub casts_shadows: bool,
    pub enabled: bool,
    pub statically_used: bool,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            kind: LightKind::Point,
            position: Vec3::ZERO,
            rotation_x: 0.0,
            rotation_y: 0.0,
            intensity: 0.5,
            color: Vec3::ONE,
            inner: 1.0,
            outer: 5.0,
            length: 1.0,
            cutoff: 5.0,
            casts_shadows: true,
            enabled: true,
            statically_used: true,
        }
    }
}

impl Light {
    pub fn point(position: Vec3, intensity: f32, inner: f32, outer: f32) -> Self {
        Self {
            kind: LightKind::Point,
            position,
            intensity,
            inner,
            outer,
            ..Self::default()
        }
    }

    pub fn shadow(position: Vec3, intensity: f32, inner: f32, outer: f32) -> Self {
        Self {
            kind: LightKind::Shadow,
            ..Self::point(position, intensity, inner, outer)
        }
    }

    pub fn effect(position: Vec3, intensity: f32) -> Self {
        Self {
            kind: LightKind::Effect,
            position,
            intensity,
            casts_shadows: false,
            ..Self::default()
        }
    }

    pub fn sun(rotation_x: f32, rotation_y: f32, intensity: f32) -> Self {
        Self {
            kind: LightKind::Sun,
            rotation_x,
            rotation_y,
            intensity,
            ..Self::default()
        }
    }

    pub fn spot(
        position: Vec3,
        rotation_x: f32,
        rotation_y: f32,
        intensity: f32,
        inner: f32,
        outer: f32,
    ) -> Self {
        Self {
            kind: LightKind::Spot,
            position,
            rotation_x,
            rotation_y,
            intensity,
            inner,
            outer,
            ..Self::default()
        }
    }

    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    pub fn with_shadows(mut self, casts_shadows: bool) -> Self {
        self.casts_shadows = casts_shadows;
        self
    }

    /// Direction the light travels. Positive `rotation_x` tilts it downward,
    /// `rotation_y` turns it around the vertical axis starting from +Z.
    pub fn direction(&self) -> Vec3 {
        let rx = self.rotation_x.to_radians();
        let ry = self.rotation_y.to_radians();
        Vec3::new(rx.cos() * ry.sin(), -rx.sin(), rx.cos() * ry.cos())
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.enabled && self.statically_used
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_down_sun() {
        let l = Light::sun(90.0, 0.0, 1.0);
        let d = l.direction();
        assert!(d.x.abs() < 1e-6);
        assert!((d.y + 1.0).abs() < 1e-6);
        assert!(d.z.abs() < 1e-6);
    }

    #[test]
    fn yaw_turns_around_vertical_axis() {
        let north = Light::sun(0.0, 0.0, 1.0).direction();
        assert!((north.z - 1.0).abs() < 1e-6);
        let east = Light::sun(0.0, 90.0, 1.0).direction();
        assert!((east.x - 1.0).abs() < 1e-6);
        assert!(east.z.abs() < 1e-6);
    }

    #[test]
    fn inactive_when_disabled_or_dynamic() {
        let mut l = Light::point(Vec3::ZERO, 1.0, 1.0, 4.0);
        assert!(l.is_active());
        l.statically_used = false;
        assert!(!l.is_active());
        l.statically_used = true;
        l.enabled = false;
        assert!(!l.is_active());
    }
}
