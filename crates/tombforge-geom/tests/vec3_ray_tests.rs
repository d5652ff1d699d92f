use tombforge_geom::{Aabb, Ray, Vec3, ray_triangle, triangle_normal};

fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn vec3_approx_eq(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx_eq(a.x, b.x, eps) && approx_eq(a.y, b.y, eps) && approx_eq(a.z, b.z, eps)
}

#[test]
fn vec3_constants() {
    assert!(vec3_approx_eq(Vec3::ZERO, Vec3::new(0.0, 0.0, 0.0), 1e-6));
    assert!(vec3_approx_eq(Vec3::UP, Vec3::new(0.0, 1.0, 0.0), 1e-6));
    assert!(vec3_approx_eq(Vec3::ONE, Vec3::new(1.0, 1.0, 1.0), 1e-6));
}

#[test]
fn vec3_add_sub_neg() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(-4.0, 5.0, -6.0);
    let c = a + b;
    assert!(vec3_approx_eq(c, Vec3::new(-3.0, 7.0, -3.0), 1e-6));
    assert!(vec3_approx_eq(c - a, b, 1e-6));
    assert!(vec3_approx_eq(-a, Vec3::new(-1.0, -2.0, -3.0), 1e-6));
}

#[test]
fn vec3_dot_length_normalized() {
    let v = Vec3::new(3.0, 4.0, 0.0);
    assert!(approx_eq(v.dot(v), 25.0, 1e-6));
    assert!(approx_eq(v.length_squared(), 25.0, 1e-6));
    assert!(approx_eq(v.length(), 5.0, 1e-6));
    assert!(vec3_approx_eq(v.normalized(), Vec3::new(0.6, 0.8, 0.0), 1e-6));

    // Zero vector normalization should be a no-op (not NaN, unchanged)
    assert!(vec3_approx_eq(Vec3::ZERO.normalized(), Vec3::ZERO, 1e-6));
}

#[test]
fn bits_distinguish_positions() {
    let a = Vec3::new(1024.0, 0.0, 2048.0);
    let b = Vec3::new(1024.0, 0.0, 2048.0);
    let c = Vec3::new(1024.0, 256.0, 2048.0);
    assert_eq!(a.bits(), b.bits());
    assert_ne!(a.bits(), c.bits());
}

#[test]
fn aabb_expand_and_contains() {
    let mut bb = Aabb::EMPTY;
    assert!(bb.is_empty());
    bb.expand(Vec3::new(0.0, 0.0, 0.0));
    bb.expand(Vec3::new(1024.0, 512.0, 2048.0));
    assert!(!bb.is_empty());
    assert!(bb.contains(Vec3::new(512.0, 256.0, 1024.0)));
    assert!(!bb.contains(Vec3::new(-1.0, 0.0, 0.0)));
}

#[test]
fn ray_hits_floor_triangle_from_above() {
    let a = Vec3::new(0.0, 0.0, 1024.0);
    let b = Vec3::new(1024.0, 0.0, 1024.0);
    let c = Vec3::new(1024.0, 0.0, 0.0);
    let n = triangle_normal(a, b, c).normalized();
    assert!(vec3_approx_eq(n, Vec3::UP, 1e-6));

    let ray = Ray::new(Vec3::new(800.0, 300.0, 600.0), Vec3::new(0.0, -1.0, 0.0));
    let t = ray_triangle(&ray, a, b, c).expect("hit");
    assert!(approx_eq(t, 300.0, 1e-3));
    assert!(vec3_approx_eq(ray.at(t), Vec3::new(800.0, 0.0, 600.0), 1e-3));
}

#[test]
fn ray_misses_outside_and_behind() {
    let a = Vec3::new(0.0, 0.0, 1024.0);
    let b = Vec3::new(1024.0, 0.0, 1024.0);
    let c = Vec3::new(1024.0, 0.0, 0.0);
    // Outside the triangle (below the NW-SE diagonal)
    let outside = Ray::new(Vec3::new(100.0, 300.0, 50.0), Vec3::new(0.0, -1.0, 0.0));
    assert!(ray_triangle(&outside, a, b, c).is_none());
    // Pointing away
    let away = Ray::new(Vec3::new(800.0, 300.0, 600.0), Vec3::new(0.0, 1.0, 0.0));
    assert!(ray_triangle(&away, a, b, c).is_none());
    // Parallel
    let parallel = Ray::new(Vec3::new(800.0, 300.0, 600.0), Vec3::new(1.0, 0.0, 0.0));
    assert!(ray_triangle(&parallel, a, b, c).is_none());
}
