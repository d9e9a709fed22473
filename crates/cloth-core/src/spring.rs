/// Which grid relation a spring encodes. Only affects the stiffness it was built with.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpringKind {
    Structural = 0, // right / up neighbors
    Shear = 1,      // diagonal neighbors
    Bend = 2,       // two steps along an axis
}

impl SpringKind {
    /// Debug line color: structural red, shear green, bend blue.
    pub fn color(self) -> [f32; 3] {
        match self {
            SpringKind::Structural => [1.0, 0.0, 0.0],
            SpringKind::Shear => [0.0, 1.0, 0.0],
            SpringKind::Bend => [0.0, 0.0, 1.0],
        }
    }
}

/// Damped Hookean spring between particles `a` and `b`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    pub a: u32,
    pub b: u32,
    /// Distance between the endpoints when the topology was built. Never recomputed.
    pub rest_length: f32,
    pub stiffness: f32,
    pub damping: f32,
    pub kind: SpringKind,
}

impl Spring {
    pub fn new(
        a: u32,
        b: u32,
        rest_length: f32,
        stiffness: f32,
        damping: f32,
        kind: SpringKind,
    ) -> Self {
        Self {
            a,
            b,
            rest_length,
            stiffness,
            damping,
            kind,
        }
    }
}
