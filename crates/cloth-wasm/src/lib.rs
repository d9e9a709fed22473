use cloth_core::{
    ClothConfig, ClothGeometry, ClothMaterial, ClothSolver, ClothVertex, LineVertex, RigidCollider,
};
use glam::{Mat4, Vec3};
use wasm_bindgen::prelude::*;

const SHAPE_SPHERE: u8 = 0;
const SHAPE_CYLINDER: u8 = 1;

const MATERIAL_COTTON: u8 = 0;
const MATERIAL_SILK: u8 = 1;
const MATERIAL_DENIM: u8 = 2;
const MATERIAL_RUBBER: u8 = 3;

fn material_preset(id: u8) -> Option<ClothMaterial> {
    match id {
        MATERIAL_COTTON => Some(ClothMaterial::COTTON),
        MATERIAL_SILK => Some(ClothMaterial::SILK),
        MATERIAL_DENIM => Some(ClothMaterial::DENIM),
        MATERIAL_RUBBER => Some(ClothMaterial::RUBBER),
        _ => None,
    }
}

fn to_js(err: cloth_core::ClothError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct ClothWorld {
    solver: ClothSolver,
    colliders: Vec<RigidCollider>,
    vertex_buffer: Vec<ClothVertex>,
    line_buffer: Vec<LineVertex>,
    index_buffer: Vec<u32>,
}

#[wasm_bindgen]
impl ClothWorld {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<ClothWorld, JsValue> {
        let solver = ClothSolver::new(ClothConfig::default()).map_err(to_js)?;
        web_sys::console::log_1(
            &format!("WASM ClothWorld created: {} particles", solver.particles().count).into(),
        );

        let mut world = ClothWorld {
            solver,
            colliders: Vec::new(),
            vertex_buffer: Vec::new(),
            line_buffer: Vec::new(),
            index_buffer: Vec::new(),
        };
        world.write_gpu_output();
        Ok(world)
    }

    /// Regenerate the sheet with new geometry. Positions and anchors are reset.
    #[wasm_bindgen]
    pub fn rebuild(
        &mut self,
        width: f32,
        depth: f32,
        width_step: f32,
        depth_step: f32,
        height: f32,
        origin_x: f32,
        origin_y: f32,
        origin_z: f32,
    ) -> Result<(), JsValue> {
        let config = self.solver.config().clone().with_geometry(ClothGeometry {
            width,
            depth,
            width_step,
            depth_step,
            height,
            origin: Vec3::new(origin_x, origin_y, origin_z),
        });
        self.apply(config)
    }

    #[wasm_bindgen]
    pub fn set_springs(
        &mut self,
        structural_k: f32,
        shear_k: f32,
        bend_k: f32,
        damping: f32,
    ) -> Result<(), JsValue> {
        let config = self
            .solver
            .config()
            .clone()
            .with_stiffness(structural_k, shear_k, bend_k)
            .with_damping(damping);
        self.apply(config)
    }

    #[wasm_bindgen]
    pub fn set_contact(
        &mut self,
        mu_static: f32,
        mu_kinetic: f32,
        particle_radius: f32,
        shape_correction: f32,
        cloth_correction: f32,
    ) -> Result<(), JsValue> {
        let mut config = self
            .solver
            .config()
            .clone()
            .with_friction(mu_static, mu_kinetic)
            .with_particle_radius(particle_radius);
        config.shape_collision_correction = shape_correction;
        config.cloth_collision_correction = cloth_correction;
        self.apply(config)
    }

    /// 0 = cotton, 1 = silk, 2 = denim, 3 = rubber.
    #[wasm_bindgen]
    pub fn set_material(&mut self, material: u8) -> Result<(), JsValue> {
        let preset =
            material_preset(material).ok_or_else(|| JsValue::from_str("unknown material"))?;
        let mut config = self.solver.config().clone();
        preset.apply_to(&mut config);
        self.apply(config)
    }

    /// Replace this tick's colliders.
    ///
    /// `transforms` holds 16 column-major floats per collider. `kinds` is 0 for a
    /// sphere, 1 for a cylinder; `half_heights` is ignored for spheres.
    #[wasm_bindgen]
    pub fn set_colliders(
        &mut self,
        kinds: &[u8],
        transforms: &[f32],
        radii: &[f32],
        half_heights: &[f32],
    ) -> Result<(), JsValue> {
        let count = kinds.len();
        if transforms.len() != count * 16 || radii.len() != count || half_heights.len() != count {
            return Err(JsValue::from_str("collider arrays have mismatched lengths"));
        }

        self.colliders.clear();
        for (i, &kind) in kinds.iter().enumerate() {
            let transform = Mat4::from_cols_slice(&transforms[i * 16..(i + 1) * 16]);
            let collider = match kind {
                SHAPE_SPHERE => RigidCollider::sphere(transform, radii[i]),
                SHAPE_CYLINDER => RigidCollider::cylinder(transform, radii[i], half_heights[i]),
                _ => return Err(JsValue::from_str("unknown collider kind")),
            };
            self.colliders.push(collider);
        }
        Ok(())
    }

    /// Mark collider `index` as a landmark at local point `(x, y, z)`.
    #[wasm_bindgen]
    pub fn set_landmark(&mut self, index: usize, x: f32, y: f32, z: f32) -> bool {
        match self.colliders.get_mut(index) {
            Some(collider) => {
                collider.landmark = Some(Vec3::new(x, y, z));
                true
            }
            None => false,
        }
    }

    #[wasm_bindgen]
    pub fn anchor(&mut self, index: usize) -> Result<(), JsValue> {
        self.solver.anchor(index).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn unanchor(&mut self, index: usize) -> Result<(), JsValue> {
        self.solver.unanchor(index).map_err(to_js)
    }

    /// Pin the first row of the sheet (the edge at the origin's X).
    #[wasm_bindgen]
    pub fn anchor_first_row(&mut self) -> usize {
        self.solver.anchor_where(|i, _| i == 0)
    }

    /// Step the cloth and refresh the GPU buffers. Returns elapsed milliseconds.
    #[wasm_bindgen]
    pub fn step(&mut self, dt: f32) -> Result<f32, JsValue> {
        let start = js_sys::Date::now();
        self.solver.step(dt, &self.colliders).map_err(to_js)?;
        self.write_gpu_output();
        let elapsed = js_sys::Date::now() - start;
        Ok(elapsed as f32)
    }

    #[wasm_bindgen]
    pub fn particle_count(&self) -> usize {
        self.solver.particles().count
    }

    #[wasm_bindgen]
    pub fn get_vertex_buffer_ptr(&self) -> *const f32 {
        self.vertex_buffer.as_ptr() as *const f32
    }

    #[wasm_bindgen]
    pub fn get_vertex_buffer_byte_length(&self) -> usize {
        bytemuck::cast_slice::<ClothVertex, u8>(&self.vertex_buffer).len()
    }

    #[wasm_bindgen]
    pub fn get_line_buffer_ptr(&self) -> *const f32 {
        self.line_buffer.as_ptr() as *const f32
    }

    #[wasm_bindgen]
    pub fn get_line_buffer_byte_length(&self) -> usize {
        bytemuck::cast_slice::<LineVertex, u8>(&self.line_buffer).len()
    }

    #[wasm_bindgen]
    pub fn get_index_buffer_ptr(&self) -> *const u32 {
        self.index_buffer.as_ptr()
    }

    #[wasm_bindgen]
    pub fn get_index_count(&self) -> usize {
        self.index_buffer.len()
    }
}

impl ClothWorld {
    fn apply(&mut self, config: ClothConfig) -> Result<(), JsValue> {
        self.solver.rebuild(config).map_err(to_js)?;
        web_sys::console::log_1(
            &format!("WASM ClothWorld rebuilt: {} particles", self.solver.particles().count).into(),
        );
        self.write_gpu_output();
        Ok(())
    }

    fn write_gpu_output(&mut self) {
        let snapshot = self.solver.snapshot();
        snapshot.write_vertices(&mut self.vertex_buffer);
        snapshot.write_lines(&mut self.line_buffer);
        self.index_buffer.clear();
        self.index_buffer.extend_from_slice(&snapshot.triangles);
    }
}
