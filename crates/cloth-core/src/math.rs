use glam::{Mat3, Mat4, Vec3};

/// Separations below this are treated as coincident points (direction undefined).
pub const EPSILON: f32 = 1e-6;

/// Split `v` into a unit direction and its length.
///
/// Returns `None` when the length is below [`EPSILON`].
#[inline]
pub fn direction_and_length(v: Vec3) -> Option<(Vec3, f32)> {
    let len = v.length();
    if len < EPSILON || !len.is_finite() {
        return None;
    }
    Some((v / len, len))
}

/// Matrix mapping local-space normals to world space (inverse-transpose of the linear part).
#[inline]
pub fn normal_matrix(world_from_local: &Mat4) -> Mat3 {
    Mat3::from_mat4(*world_from_local).inverse().transpose()
}

/// Unit face normal of triangle `(p0, p1, p2)`, or zero for a degenerate face.
#[inline]
pub fn face_normal(p0: Vec3, p1: Vec3, p2: Vec3) -> Vec3 {
    (p2 - p1).cross(p1 - p0).normalize_or_zero()
}
