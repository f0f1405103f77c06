//! 数学库模块
//!
//! 基于 `nalgebra` 的类型别名，以及加载器用到的颜色类型和几何函数。
//!
//! - **基础类型**：Vector3/4, Matrix4
//! - **颜色**：每个模型一个常量 RGB 颜色
//! - **几何处理**：平面法线计算（见 geometry 子模块）

pub use nalgebra::{Matrix4 as Mat4, Vector3 as Vec3, Vector4 as Vec4};

// 类型别名，使用更简洁的名称
pub type Vector3 = Vec3<f32>;
pub type Vector4 = Vec4<f32>;
pub type Matrix4 = Mat4<f32>;

/// 颜色类型（RGB，范围不做限制）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// 创建 RGB 颜色
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn from_array(rgb: [f32; 3]) -> Self {
        Self::rgb(rgb[0], rgb[1], rgb[2])
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// 转换为 Vector3
    pub fn to_vec3(&self) -> Vector3 {
        Vector3::new(self.r, self.g, self.b)
    }

    // 预定义颜色
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

// 几何处理模块（平面法线）
pub mod geometry;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_creation() {
        let color = Color::rgb(1.0, 0.5, 0.31);
        assert_eq!(color.to_array(), [1.0, 0.5, 0.31]);
        assert_eq!(Color::from_array([1.0, 0.5, 0.31]), color);
    }

    #[test]
    fn test_color_default_is_white() {
        assert_eq!(Color::default(), Color::WHITE);
        assert_eq!(Color::WHITE.to_vec3(), Vector3::new(1.0, 1.0, 1.0));
    }
}
