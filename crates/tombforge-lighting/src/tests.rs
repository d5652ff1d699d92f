use super::*;
use tombforge_sector::{SectorGrid, SectorRect};

#[test]
fn effect_reaches_only_its_sector_corners_below_it() {
    let light = Light::effect(Vec3::new(2500.0, 1024.0, 1500.0), 1.0);
    assert_eq!(effect_factor(&light, Vec3::new(2048.0, 0.0, 1024.0)), 0.25);
    assert_eq!(effect_factor(&light, Vec3::new(3072.0, 1024.0, 2048.0)), 0.25);
    assert_eq!(effect_factor(&light, Vec3::new(3072.0, 1280.0, 2048.0)), 0.0);
    assert_eq!(effect_factor(&light, Vec3::new(4096.0, 0.0, 1024.0)), 0.0);
    assert_eq!(effect_factor(&light, Vec3::new(2500.0, 0.0, 1024.0)), 0.0);
}

#[test]
fn shared_positions_get_identical_means() {
    let p = Vec3::new(1024.0, 0.0, 2048.0);
    let q = Vec3::new(2048.0, 0.0, 2048.0);
    let colors = [[0.2, 0.4, 0.6], [0.4, 0.4, 0.2], [1.0, 1.0, 1.0], [0.3, 0.3, 0.3]];
    let out = average_shared([p, q, p, p].into_iter(), &colors);
    assert_eq!(out[0], out[2]);
    assert_eq!(out[0], out[3]);
    assert_eq!(out[1], [0.4, 0.4, 0.2]);
    assert!((out[0][0] - 0.5).abs() < 1e-6);
}

#[test]
fn grid_points_truncate() {
    assert_eq!(to_grid(Vec3::new(1023.9, -0.5, 16.2)), GridPoint::new(1023, 0, 16));
}

#[test]
fn lit_point_stays_in_the_owning_sector() {
    let mut grid = SectorGrid::new(6, 6, 0, 12);
    grid.edit_area(SectorRect::single(3, 2), |_, _, b| b.set_floor(4));
    // NE corner of the floor of (2, 1), next to the raised (3, 2).
    let corner = Vec3::new(3072.0, 0.0, 2048.0);
    let surface = Surface {
        normal: Vec3::UP,
        inward: (Vec3::new(2560.0, 0.0, 1536.0) - corner).normalized(),
    };
    let lit = to_grid(surface.lit_point(corner));
    assert_eq!((lit.x / SECTOR_UNITS, lit.z / SECTOR_UNITS), (2, 1));
    assert!(check_floor_ceiling(&grid, lit));
    // Straight up from the corner lands in the raised sector.
    assert!(!check_floor_ceiling(&grid, to_grid(corner + Vec3::UP * LIT_POINT_NUDGE)));
}
