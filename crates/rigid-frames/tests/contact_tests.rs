// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
#![allow(clippy::expect_used, clippy::unwrap_used)]
use rigid_frames::{disc_terrain_contact, FlatTerrain, PlaneTerrain, Quat, Terrain, Vec3};

const TOL: f64 = 1e-12;

#[test]
fn upright_wheel_on_flat_ground() {
    let ground = FlatTerrain::new(0.0);
    let contact = disc_terrain_contact(&ground, &Vec3::new(0.0, 0.0, 0.45), &Vec3::UNIT_Y, 0.5)
        .expect("wheel penetrates the ground");

    assert!(contact.pose.position().equals(&Vec3::new(0.0, 0.0, -0.05), TOL));
    assert!(contact.pose.orientation().equals(&Quat::IDENTITY, TOL), "{}", contact.pose);
    assert!((contact.depth - 0.05).abs() < TOL);
}

#[test]
fn centre_out_of_range_has_no_contact() {
    let ground = FlatTerrain::new(1.0);
    let above = Vec3::new(0.0, 0.0, 1.6);
    let below = Vec3::new(0.0, 0.0, 0.9);
    let at_radius = Vec3::new(0.0, 0.0, 1.5);
    assert!(disc_terrain_contact(&ground, &above, &Vec3::UNIT_Y, 0.5).is_none());
    assert!(disc_terrain_contact(&ground, &below, &Vec3::UNIT_Y, 0.5).is_none());
    assert!(disc_terrain_contact(&ground, &at_radius, &Vec3::UNIT_Y, 0.5).is_none());
}

#[test]
fn horizontal_disc_has_no_contact() {
    let ground = FlatTerrain::new(0.0);
    let center = Vec3::new(0.0, 0.0, 0.2);
    assert!(disc_terrain_contact(&ground, &center, &Vec3::UNIT_Z, 0.5).is_none());
    let nearly_flat = Vec3::new(0.0, 0.01, 1.0).normalize();
    assert!(disc_terrain_contact(&ground, &center, &nearly_flat, 0.5).is_none());
}

#[test]
fn shallow_tilt_keeps_lowest_point_above_ground() {
    let ground = FlatTerrain::new(0.0);
    let normal = Vec3::new(0.0, 0.1, 1.0).normalize();
    assert!(disc_terrain_contact(&ground, &Vec3::new(0.0, 0.0, 0.3), &normal, 0.5).is_none());
}

#[test]
fn contact_frame_follows_sloped_terrain() {
    let slope = 0.1_f64;
    let (sin, cos) = slope.sin_cos();
    let plane = PlaneTerrain::through_point(Vec3::ZERO, Vec3::new(-sin, 0.0, cos));
    let h = plane.height(1.0, 0.0);
    assert!((h - slope.tan()).abs() < TOL);

    let center = Vec3::new(1.0, 0.0, h + 0.45);
    let contact = disc_terrain_contact(&plane, &center, &Vec3::UNIT_Y, 0.5)
        .expect("wheel penetrates the slope");

    let q = contact.pose.orientation();
    let n = plane.plane_normal();
    assert!(contact.pose.position().equals(&Vec3::new(1.0, 0.0, h - 0.05), TOL));
    assert!(q.is_normalized(1e-12));
    assert!(q.rotate(&Vec3::UNIT_Z).equals(&n, 1e-12), "{q}");
    assert!(q.rotate(&Vec3::UNIT_X).dot(&n).abs() < 1e-12);
    assert!(q.rotate(&Vec3::UNIT_Y).equals(&Vec3::UNIT_Y, 1e-12));
    assert!((contact.depth - 0.05 * cos).abs() < TOL);
}

#[test]
fn terrain_can_be_queried_through_a_trait_object() {
    struct Step;
    impl Terrain for Step {
        fn height(&self, x: f64, _y: f64) -> f64 {
            if x < 0.0 { 0.0 } else { 0.2 }
        }
        fn normal(&self, _x: f64, _y: f64) -> Vec3 {
            Vec3::UNIT_Z
        }
    }

    let terrain: &dyn Terrain = &Step;
    let on_step = disc_terrain_contact(terrain, &Vec3::new(1.0, 0.0, 0.6), &Vec3::UNIT_Y, 0.5);
    let off_step = disc_terrain_contact(terrain, &Vec3::new(-1.0, 0.0, 0.6), &Vec3::UNIT_Y, 0.5);
    assert!((on_step.unwrap().depth - 0.1).abs() < 1e-12);
    assert!(off_step.is_none());
}
