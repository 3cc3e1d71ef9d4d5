//! Conversions to and from glam, for renderers and visualizers
//!
//! glam matrices are column-major; ours are row-major, so matrix conversions
//! go through the transpose.

use super::{Matrix3x3, Matrix4x4, Quaternion, Vector2, Vector3, Vector4};

macro_rules! impl_glam_interop {
    ($t:ty, $vec2:ty, $vec3:ty, $vec4:ty, $quat:ty, $mat3:ty, $mat4:ty) => {
        impl From<Vector2<$t>> for $vec2 {
            fn from(v: Vector2<$t>) -> Self {
                <$vec2>::new(v.x, v.y)
            }
        }

        impl From<$vec2> for Vector2<$t> {
            fn from(v: $vec2) -> Self {
                Vector2::new(v.x, v.y)
            }
        }

        impl From<Vector3<$t>> for $vec3 {
            fn from(v: Vector3<$t>) -> Self {
                <$vec3>::new(v.x, v.y, v.z)
            }
        }

        impl From<$vec3> for Vector3<$t> {
            fn from(v: $vec3) -> Self {
                Vector3::new(v.x, v.y, v.z)
            }
        }

        impl From<Vector4<$t>> for $vec4 {
            fn from(v: Vector4<$t>) -> Self {
                <$vec4>::new(v.x, v.y, v.z, v.w)
            }
        }

        impl From<$vec4> for Vector4<$t> {
            fn from(v: $vec4) -> Self {
                Vector4::new(v.x, v.y, v.z, v.w)
            }
        }

        impl From<Quaternion<$t>> for $quat {
            fn from(q: Quaternion<$t>) -> Self {
                <$quat>::from_xyzw(q.v.x, q.v.y, q.v.z, q.n)
            }
        }

        impl From<$quat> for Quaternion<$t> {
            fn from(q: $quat) -> Self {
                Quaternion::new(q.w, q.x, q.y, q.z)
            }
        }

        impl From<Matrix3x3<$t>> for $mat3 {
            fn from(m: Matrix3x3<$t>) -> Self {
                <$mat3>::from_cols_array_2d(&m.transpose().m)
            }
        }

        impl From<$mat3> for Matrix3x3<$t> {
            fn from(m: $mat3) -> Self {
                Matrix3x3::new(m.to_cols_array_2d()).transpose()
            }
        }

        impl From<Matrix4x4<$t>> for $mat4 {
            fn from(m: Matrix4x4<$t>) -> Self {
                <$mat4>::from_cols_array_2d(&m.transpose().m)
            }
        }

        impl From<$mat4> for Matrix4x4<$t> {
            fn from(m: $mat4) -> Self {
                Matrix4x4::new(m.to_cols_array_2d()).transpose()
            }
        }
    };
}

impl_glam_interop!(
    f32,
    glam::Vec2,
    glam::Vec3,
    glam::Vec4,
    glam::Quat,
    glam::Mat3,
    glam::Mat4
);
impl_glam_interop!(
    f64,
    glam::DVec2,
    glam::DVec3,
    glam::DVec4,
    glam::DQuat,
    glam::DMat3,
    glam::DMat4
);
