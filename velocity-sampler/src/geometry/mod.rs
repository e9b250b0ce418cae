//! Geometry primitives
//!
//! Small value types for positions and velocities. Only the operations the
//! sampler needs are provided: component-wise add/subtract, scaling, and
//! projection between 3D and the x/y plane.

pub mod vector;

pub use vector::{Vector2, Vector3};
