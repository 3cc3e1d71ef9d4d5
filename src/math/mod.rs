//! Spatial math kernel
//!
//! Value types (vectors, quaternions, matrices) generic over [`Real`], with
//! right-handed axis rotations measured in degrees. Nothing here holds hidden
//! state; fallible operations return [`MathError`].

mod angle;
mod error;
mod interop;
mod matrix;
mod quaternion;
mod scalar;
mod vector;

pub use angle::{deg_to_rad, rad_to_deg};
pub use error::MathError;
pub use matrix::{Matrix3x3, Matrix4x4};
pub use quaternion::Quaternion;
pub use scalar::Real;
pub use vector::{
    Axis, Vector2, Vector3, Vector4, parse_rotation_order, scalar_triple_product,
    vector_triple_product,
};
