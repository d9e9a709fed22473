use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::spring::SpringKind;
use crate::topology::ClothTopology;

/// Interleaved cloth vertex: 32 bytes, position / normal / uv.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ClothVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Debug line vertex: 24 bytes, position / color.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// One spring as a colored line segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringLine {
    pub start: Vec3,
    pub end: Vec3,
    pub kind: SpringKind,
}

/// Read-only copy of the cloth state taken between ticks.
///
/// Owning its data, a snapshot can be handed to a renderer while the solver keeps
/// stepping.
#[derive(Clone, Debug, Default)]
pub struct RenderSnapshot {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub spring_lines: Vec<SpringLine>,
    pub triangles: Vec<u32>,
    pub width_points: usize,
    pub depth_points: usize,
}

impl RenderSnapshot {
    pub fn capture(topology: &ClothTopology) -> Self {
        let particles = &topology.particles;
        let spring_lines = topology
            .springs
            .iter()
            .map(|s| SpringLine {
                start: particles.position[s.a as usize],
                end: particles.position[s.b as usize],
                kind: s.kind,
            })
            .collect();

        Self {
            positions: particles.position.clone(),
            normals: particles.normal.clone(),
            spring_lines,
            triangles: topology.triangles.clone(),
            width_points: topology.width_points,
            depth_points: topology.depth_points,
        }
    }

    /// Grid coordinates of particle `index`, normalized to `[0, 1]`.
    pub fn uv(&self, index: usize) -> [f32; 2] {
        let dp = self.depth_points.max(1);
        let (i, j) = (index / dp, index % dp);
        let u = if self.width_points > 1 { i as f32 / (self.width_points - 1) as f32 } else { 0.0 };
        let v = if self.depth_points > 1 { j as f32 / (self.depth_points - 1) as f32 } else { 0.0 };
        [u, v]
    }

    /// Write the interleaved vertex buffer into `out`, resizing it to one vertex per particle.
    pub fn write_vertices(&self, out: &mut Vec<ClothVertex>) {
        out.clear();
        out.extend(
            self.positions
                .iter()
                .zip(&self.normals)
                .enumerate()
                .map(|(i, (p, n))| ClothVertex {
                    position: p.to_array(),
                    normal: n.to_array(),
                    uv: self.uv(i),
                }),
        );
    }

    /// Write two line vertices per spring into `out`, colored by spring kind.
    pub fn write_lines(&self, out: &mut Vec<LineVertex>) {
        out.clear();
        for line in &self.spring_lines {
            let color = line.kind.color();
            out.push(LineVertex {
                position: line.start.to_array(),
                color,
            });
            out.push(LineVertex {
                position: line.end.to_array(),
                color,
            });
        }
    }

    pub fn vertices(&self) -> Vec<ClothVertex> {
        let mut out = Vec::with_capacity(self.positions.len());
        self.write_vertices(&mut out);
        out
    }

    pub fn lines(&self) -> Vec<LineVertex> {
        let mut out = Vec::with_capacity(self.spring_lines.len() * 2);
        self.write_lines(&mut out);
        out
    }
}
