//! Mass-spring cloth simulation.
//!
//! A rectangular particle grid joined by structural, shear and bend springs, advanced
//! with position Verlet. Each tick the springs are stretch-limited, overlapping cloth
//! particles are pushed apart, and particles are pushed out of rigid sphere and
//! cylinder colliders with static/kinetic friction.
//!
//! ```
//! use cloth_core::{ClothConfig, ClothSolver};
//!
//! let mut solver = ClothSolver::new(ClothConfig::default()).unwrap();
//! solver.anchor_where(|i, _| i == 0);
//! for _ in 0..10 {
//!     solver.step(1.0 / 60.0, &[]).unwrap();
//! }
//! let frame = solver.snapshot();
//! assert_eq!(frame.positions.len(), solver.particles().count);
//! ```

pub mod collider;
pub mod collision;
pub mod config;
pub mod constraints;
pub mod error;
pub mod forces;
pub mod friction;
pub mod grid;
pub mod integrator;
pub mod materials;
pub mod math;
pub mod particle;
pub mod snapshot;
pub mod solver;
pub mod spring;
pub mod topology;

pub use collider::{ColliderShape, RigidCollider};
pub use config::{ClothConfig, ClothGeometry, FrictionPolicy, SelfCollision};
pub use error::ClothError;
pub use materials::ClothMaterial;
pub use particle::ParticleSet;
pub use snapshot::{ClothVertex, LineVertex, RenderSnapshot};
pub use solver::{ClothSolver, StepStats};
pub use spring::{Spring, SpringKind};
pub use topology::ClothTopology;
