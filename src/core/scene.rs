//! 场景配置模块
//!
//! 定义场景中要加载的模型：文件路径、语法、颜色和变换。
//!
//! 同一个模型文件可以出现多次，每个实例有自己的颜色和变换（例如物体和光源共用一个立方体）。
//!
//! ```toml
//! [[models]]
//! path = "models/cube.obj"
//! grammar = "obj_position_normal"
//! color = [1.0, 0.5, 0.31]
//!
//! [[models]]
//! path = "models/cube.obj"
//! grammar = "obj_position_normal"
//! vertex_color = true
//! color = [1.0, 1.0, 1.0]
//!
//! [models.transform]
//! position = [1.2, 1.0, 2.0]
//! scale = [0.2, 0.2, 0.2]
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::fs;
use crate::core::error::{Result, ConfigError};
use crate::geometry::vertex::{Grammar, VertexFormat};
use crate::geometry::model::LoadOptions;
use crate::math::{Color, Matrix4, Vector3};

/// 3D 变换数据
///
/// 包含位置、旋转和缩放信息。加载器只保存它，不会作用到顶点数据上。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// 位置 (x, y, z)
    #[serde(default = "default_position")]
    pub position: [f32; 3],

    /// 旋转（欧拉角，度数）(pitch, yaw, roll)
    #[serde(default = "default_rotation")]
    pub rotation: [f32; 3],

    /// 缩放 (x, y, z)
    #[serde(default = "default_scale")]
    pub scale: [f32; 3],
}

fn default_position() -> [f32; 3] {
    [0.0, 0.0, 0.0]
}

fn default_rotation() -> [f32; 3] {
    [0.0, 0.0, 0.0]
}

fn default_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

fn default_color() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: default_position(),
            rotation: default_rotation(),
            scale: default_scale(),
        }
    }
}

impl Transform {
    /// 创建模型矩阵
    ///
    /// 变换顺序：缩放 -> 旋转 -> 平移
    pub fn to_matrix(&self) -> Matrix4 {
        use std::f32::consts::PI;

        let pitch = self.rotation[0] * PI / 180.0;
        let yaw = self.rotation[1] * PI / 180.0;
        let roll = self.rotation[2] * PI / 180.0;

        let translation = Matrix4::new_translation(&Vector3::new(
            self.position[0],
            self.position[1],
            self.position[2],
        ));

        let rotation_x = Matrix4::from_axis_angle(&Vector3::x_axis(), pitch);
        let rotation_y = Matrix4::from_axis_angle(&Vector3::y_axis(), yaw);
        let rotation_z = Matrix4::from_axis_angle(&Vector3::z_axis(), roll);
        let rotation = rotation_z * rotation_y * rotation_x;

        let scale = Matrix4::new_nonuniform_scaling(&Vector3::new(
            self.scale[0],
            self.scale[1],
            self.scale[2],
        ));

        // T * R * S
        translation * rotation * scale
    }
}

/// 模型配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// 模型文件路径
    pub path: String,

    /// 源文件语法，由调用方指定（不根据内容猜测）
    pub grammar: Grammar,

    /// 是否在每个顶点中写入常量颜色
    #[serde(default)]
    pub vertex_color: bool,

    /// 模型颜色 (r, g, b)
    #[serde(default = "default_color")]
    pub color: [f32; 3],

    /// 模型变换
    #[serde(default)]
    pub transform: Transform,
}

impl ModelConfig {
    /// 创建一个使用默认颜色和变换的模型配置
    pub fn new(path: impl Into<String>, grammar: Grammar) -> Self {
        Self {
            path: path.into(),
            grammar,
            vertex_color: false,
            color: default_color(),
            transform: Transform::default(),
        }
    }

    /// 转换为加载选项
    pub fn load_options(&self) -> LoadOptions {
        let mut format = VertexFormat::new(self.grammar);
        if self.vertex_color {
            format = format.with_vertex_color();
        }

        LoadOptions::new(format)
            .with_color(Color::from_array(self.color))
            .with_transform(self.transform)
    }
}

/// 场景配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneConfig {
    /// 要加载的模型列表
    #[serde(default)]
    pub models: Vec<ModelConfig>,
}

impl SceneConfig {
    /// 从 TOML 文件加载场景配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path_str))?;

        let scene: SceneConfig = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        scene.validate()?;
        Ok(scene)
    }

    /// 只包含一个模型的场景
    pub fn single(model: ModelConfig) -> Self {
        Self { models: vec![model] }
    }

    /// 验证场景配置
    pub fn validate(&self) -> Result<()> {
        for (i, model) in self.models.iter().enumerate() {
            if model.path.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: format!("models[{}].path", i),
                    reason: "Model path must not be empty".to_string(),
                }
                .into());
            }

            if model.transform.scale.iter().any(|s| !s.is_finite() || *s <= 0.0) {
                return Err(ConfigError::InvalidValue {
                    field: format!("models[{}].transform.scale", i),
                    reason: "Scale components must be positive".to_string(),
                }
                .into());
            }

            if model.color.iter().any(|c| !c.is_finite()) {
                return Err(ConfigError::InvalidValue {
                    field: format!("models[{}].color", i),
                    reason: "Color components must be finite".to_string(),
                }
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::vertex::AttributeKind;

    #[test]
    fn test_transform_identity() {
        let matrix = Transform::default().to_matrix();
        assert_eq!(matrix, Matrix4::identity());
    }

    #[test]
    fn test_transform_translation_and_scale() {
        let transform = Transform {
            position: [1.0, 2.0, 3.0],
            rotation: [0.0, 0.0, 0.0],
            scale: [2.0, 2.0, 2.0],
        };
        let point = transform.to_matrix() * crate::math::Vector4::new(1.0, 1.0, 1.0, 1.0);

        assert!((point.x - 3.0).abs() < 1e-6);
        assert!((point.y - 4.0).abs() < 1e-6);
        assert!((point.z - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_scene_from_toml() {
        let scene: SceneConfig = toml::from_str(
            r#"
            [[models]]
            path = "models/cube.obj"
            grammar = "obj_position_normal"
            color = [1.0, 0.5, 0.31]

            [[models]]
            path = "models/cube.obj"
            grammar = "obj_position_normal"
            vertex_color = true

            [models.transform]
            scale = [0.2, 0.2, 0.2]
            "#,
        )
        .unwrap();

        assert_eq!(scene.models.len(), 2);
        assert_eq!(scene.models[0].color, [1.0, 0.5, 0.31]);
        assert_eq!(scene.models[1].color, [1.0, 1.0, 1.0]);
        assert_eq!(scene.models[1].transform.scale, [0.2, 0.2, 0.2]);
        assert_eq!(scene.models[1].transform.position, [0.0, 0.0, 0.0]);
        assert!(scene.validate().is_ok());
    }

    #[test]
    fn test_scene_validation_rejects_bad_scale() {
        let mut model = ModelConfig::new("models/cube.obj", Grammar::ObjPositionNormal);
        model.transform.scale = [1.0, 0.0, 1.0];

        assert!(SceneConfig::single(model).validate().is_err());
    }

    #[test]
    fn test_load_options_from_model_config() {
        let mut model = ModelConfig::new("models/triangle.txt", Grammar::TriangleList);
        model.vertex_color = true;
        model.color = [0.2, 0.4, 0.6];

        let options = model.load_options();
        assert!(options.format.layout().has(AttributeKind::Color));
        assert_eq!(options.color, Color::rgb(0.2, 0.4, 0.6));
    }
}
