use glam::{Mat3, Mat4, Vec2, Vec3};

use crate::math::normal_matrix;

/// Primitive shape of a rigid collider, in its local frame.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColliderShape {
    /// Sphere centered at the local origin.
    Sphere { radius: f32 },
    /// Flat-capped cylinder centered at the local origin, axis along local Y,
    /// spanning `-half_height..=half_height`.
    Cylinder { radius: f32, half_height: f32 },
}

/// A rigid body the cloth collides with, supplied fresh every tick.
///
/// Colliders are owned by whatever drives them (a skeleton, an animation); the
/// simulation only reads them.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RigidCollider {
    pub shape: ColliderShape,
    pub world_transform: Mat4,
    /// Local-space point that pins the cloth: a particle pushed out of this collider
    /// within `anchor_tolerance` of it becomes anchored.
    pub landmark: Option<Vec3>,
}

impl RigidCollider {
    pub fn sphere(world_transform: Mat4, radius: f32) -> Self {
        Self {
            shape: ColliderShape::Sphere { radius },
            world_transform,
            landmark: None,
        }
    }

    pub fn cylinder(world_transform: Mat4, radius: f32, half_height: f32) -> Self {
        Self {
            shape: ColliderShape::Cylinder { radius, half_height },
            world_transform,
            landmark: None,
        }
    }

    pub fn with_landmark(mut self, landmark: Vec3) -> Self {
        self.landmark = Some(landmark);
        self
    }
}

/// Outcome of pushing a local-space point out of a shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalContact {
    /// Corrected point, local space.
    pub position: Vec3,
    /// Unit outward normal, local space.
    pub normal: Vec3,
}

impl ColliderShape {
    /// Push `p` (local space) out to `margin` beyond the surface, if it lies inside
    /// the shape grown by `margin`.
    pub fn push_out(&self, p: Vec3, margin: f32) -> Option<LocalContact> {
        match *self {
            ColliderShape::Sphere { radius } => push_out_sphere(p, radius, margin),
            ColliderShape::Cylinder { radius, half_height } => {
                push_out_cylinder(p, radius, half_height, margin)
            }
        }
    }
}

fn push_out_sphere(p: Vec3, radius: f32, margin: f32) -> Option<LocalContact> {
    let reach = radius + margin;
    if p.length_squared() >= reach * reach {
        return None;
    }
    // A particle exactly at the center has no outward direction; use +Y.
    let normal = p.try_normalize().unwrap_or(Vec3::Y);
    Some(LocalContact {
        position: normal * reach,
        normal,
    })
}

fn push_out_cylinder(p: Vec3, radius: f32, half_height: f32, margin: f32) -> Option<LocalContact> {
    let radial = Vec2::new(p.x, p.z);
    let axis_distance = radial.length();
    let inside = axis_distance < radius + margin
        && p.y > -half_height - margin
        && p.y < half_height + margin;
    if !inside {
        return None;
    }

    let to_side = radius - axis_distance;
    let to_top = half_height - p.y;
    let to_bottom = p.y + half_height;

    let contact = if to_side <= to_top && to_side <= to_bottom {
        let dir = radial.try_normalize().unwrap_or(Vec2::X);
        let reach = radius + margin;
        LocalContact {
            position: Vec3::new(dir.x * reach, p.y, dir.y * reach),
            normal: Vec3::new(dir.x, 0.0, dir.y),
        }
    } else if to_top <= to_bottom {
        LocalContact {
            position: Vec3::new(p.x, half_height + margin, p.z),
            normal: Vec3::Y,
        }
    } else {
        LocalContact {
            position: Vec3::new(p.x, -half_height - margin, p.z),
            normal: Vec3::NEG_Y,
        }
    };
    Some(contact)
}

/// Per-tick cached transforms of one collider.
#[derive(Clone, Copy, Debug)]
pub struct ColliderFrame {
    pub shape: ColliderShape,
    pub world_from_local: Mat4,
    pub local_from_world: Mat4,
    pub normal_to_world: Mat3,
    /// Landmark in world space.
    pub landmark: Option<Vec3>,
}

/// Transforms with a smaller determinant are treated as collapsed.
const MIN_DETERMINANT: f32 = 1e-12;

impl ColliderFrame {
    /// Cache the transforms of `collider`.
    ///
    /// Returns `None` when the world transform cannot be inverted (a shape scaled
    /// flat, or non-finite entries); such a collider has no inside to push out of.
    pub fn new(collider: &RigidCollider) -> Option<Self> {
        let world_from_local = collider.world_transform;
        let det = world_from_local.determinant();
        if !det.is_finite() || det.abs() < MIN_DETERMINANT {
            return None;
        }

        let local_from_world = world_from_local.inverse();
        let normal_to_world = normal_matrix(&world_from_local);
        if !local_from_world.is_finite() || !normal_to_world.is_finite() {
            return None;
        }

        Some(Self {
            shape: collider.shape,
            world_from_local,
            local_from_world,
            normal_to_world,
            landmark: collider
                .landmark
                .map(|l| world_from_local.transform_point3(l)),
        })
    }
}
