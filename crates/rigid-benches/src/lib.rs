// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Deterministic inputs shared by the rigid-frames benchmarks.
//!
//! Every builder is a pure function of its length so runs stay comparable.

use rigid_frames::{MovingPose, Pose, Quat, Vec3};

/// Link `i` of a helical chain: a short offset plus a small twist about a
/// slowly precessing axis.
#[must_use]
pub fn chain_link(i: u32) -> Pose {
    let t = f64::from(i);
    let axis = Vec3::new((0.7 * t).cos(), (0.7 * t).sin(), 1.0);
    Pose::new(
        Vec3::new(0.25, 0.05 * (0.3 * t).sin(), 0.1),
        Quat::from_axis_angle(axis, 0.2 + 0.01 * t),
    )
}

/// Helical chain of `n` links, outermost first.
#[must_use]
pub fn pose_chain(n: u32) -> Vec<Pose> {
    (0..n).map(chain_link).collect()
}

/// Moving chain of `n` links, outermost first; each joint spins and slides.
#[must_use]
pub fn moving_chain(n: u32) -> Vec<MovingPose> {
    (0..n)
        .map(|i| {
            let t = f64::from(i);
            MovingPose::with_kinematics(
                chain_link(i),
                Vec3::new(0.0, 0.1, 0.0),
                Vec3::new(0.0, 0.0, -0.05 * t),
                Vec3::new(0.0, 0.0, 0.5 + 0.1 * t),
                Vec3::new(0.02, 0.0, 0.0),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_are_deterministic() {
        assert_eq!(pose_chain(8), pose_chain(8));
        assert_eq!(moving_chain(4).len(), 4);
        assert!(pose_chain(16).iter().all(|p| p.orientation().is_normalized(1e-12)));
    }
}
