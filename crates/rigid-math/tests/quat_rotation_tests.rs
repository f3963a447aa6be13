// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
use core::f64::consts::{FRAC_PI_2, PI};

use proptest::prelude::*;
use rigid_math::{deg_to_rad, rad_to_deg, Mat3, Quat, Vec3, DEFAULT_TOLERANCE};

fn approx_eq3(a: Vec3, b: Vec3) {
    const ABS_TOL: f64 = 1e-12;
    const REL_TOL: f64 = 1e-10;
    for i in 0..3 {
        let ai = a.component(i);
        let bi = b.component(i);
        let diff = (ai - bi).abs();
        let scale = ai.abs().max(bi.abs());
        let tol = ABS_TOL.max(REL_TOL * scale);
        assert!(
            diff <= tol,
            "index {i}: {a} vs {b}, diff={diff}, tol={tol} (scale={scale})"
        );
    }
}

/// `q` and `-q` encode the same rotation.
fn same_rotation(a: &Quat, b: &Quat, tol: f64) -> bool {
    let neg = Quat::new(-b.e0(), -b.e1(), -b.e2(), -b.e3());
    a.equals(b, tol) || a.equals(&neg, tol)
}

#[test]
fn rot_y_maps_z_to_x() {
    let x = Quat::from_rotation_y(FRAC_PI_2).rotate(&Vec3::UNIT_Z);
    approx_eq3(x, Vec3::UNIT_X);
}

#[test]
fn rot_x_maps_y_to_z() {
    let z = Quat::from_rotation_x(FRAC_PI_2).rotate(&Vec3::UNIT_Y);
    approx_eq3(z, Vec3::UNIT_Z);
}

#[test]
fn matrix_conversion_handles_half_turns() {
    for axis in [Vec3::UNIT_X, Vec3::UNIT_Y, Vec3::UNIT_Z, Vec3::new(1.0, 1.0, 0.0)] {
        let q = Quat::from_axis_angle(axis, PI);
        let back = q.to_mat3().to_quat();
        assert!(same_rotation(&q, &back, 1e-12), "{q} vs {back}");
    }
}

#[test]
fn matrix_columns_are_rotated_basis() {
    let q = Quat::new(4.0, 1.0, 3.0, 1.0).normalize();
    let m = Mat3::from_quat(&q);
    approx_eq3(m.column(0), q.rotate(&Vec3::UNIT_X));
    approx_eq3(m.column(1), q.rotate(&Vec3::UNIT_Y));
    approx_eq3(m.column(2), q.rotate(&Vec3::UNIT_Z));
}

#[test]
fn degree_helpers_round_trip() {
    assert!((deg_to_rad(180.0_f64) - PI).abs() < 1e-15);
    assert!((rad_to_deg(FRAC_PI_2) - 90.0).abs() < 1e-12);
    assert_eq!(rigid_math::clamp(5.0, 0.0, 1.0), 1.0);
}

fn unit_quat() -> impl Strategy<Value = Quat> {
    prop::array::uniform4(-1.0_f64..1.0)
        .prop_filter("non-degenerate", |c| c.iter().map(|v| v * v).sum::<f64>() > 1e-3)
        .prop_map(|c| Quat::from(c).normalize())
}

proptest! {
    #[test]
    fn rotate_back_inverts_rotate(q in unit_quat(), v in prop::array::uniform3(-100.0_f64..100.0)) {
        let v = Vec3::from(v);
        let round = q.rotate_back(&q.rotate(&v));
        prop_assert!(round.equals(&v, 1e-9), "{} vs {}", round, v);
    }

    #[test]
    fn angle_to_ignores_quaternion_sign(q in unit_quat(), angle in 0.1_f64..3.0) {
        let turned = q.multiply(&Quat::from_rotation_y(angle));
        let flipped = Quat::new(-turned.e0(), -turned.e1(), -turned.e2(), -turned.e3());
        prop_assert!((q.angle_to(&turned) - angle).abs() < 1e-6);
        prop_assert!((q.angle_to(&flipped) - angle).abs() < 1e-6);
    }

    #[test]
    fn matrix_round_trip_preserves_rotation(q in unit_quat()) {
        let back = q.to_mat3().to_quat();
        prop_assert!(same_rotation(&q, &back, DEFAULT_TOLERANCE), "{} vs {}", q, back);
    }

    #[test]
    fn rotation_preserves_length(q in unit_quat(), v in prop::array::uniform3(-10.0_f64..10.0)) {
        let v = Vec3::from(v);
        prop_assert!((q.rotate(&v).length() - v.length()).abs() < 1e-9);
    }
}
