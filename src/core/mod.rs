//! 核心功能模块
//!
//! 本模块提供了加载器的基础功能，包括日志系统、配置管理、场景描述和错误处理。
//! 这些模块独立于具体的图形 API。
//!
//! # 模块组织
//!
//! - `log`：日志系统，提供结构化的日志记录功能
//! - `config`：配置管理，支持从配置文件和命令行加载设置
//! - `scene`：场景配置，描述要加载的模型及其颜色、变换
//! - `error`：错误处理，定义统一的错误类型

pub mod log;
pub mod config;
pub mod scene;
pub mod error;

// 重新导出常用类型，方便使用
pub use error::{Result, DistModelError, MeshLoadError, ParseError, ParseErrorKind};
pub use config::Config;
pub use scene::{SceneConfig, ModelConfig, Transform};
