//! 配置管理模块
//!
//! 提供加载器配置的加载、解析和管理功能。
//! 支持从 TOML 配置文件加载，也支持命令行参数覆盖。
//!
//! # 配置文件格式 (config.toml)
//!
//! ```toml
//! [loader]
//! scene = "scene.toml"   # 场景文件（列出要加载的模型）
//! dump = false           # 是否打印顶点缓冲的文本转储
//!
//! [logging]
//! level = "info"      # trace, debug, info, warn, error
//! file_output = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, Result};
use crate::geometry::vertex::Grammar;

/// 加载器配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// 加载行为配置
    #[serde(default)]
    pub loader: LoaderConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 加载行为配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// 场景文件路径
    #[serde(default = "default_scene")]
    pub scene: String,

    /// 加载后打印文本转储
    #[serde(default)]
    pub dump: bool,

    /// 直接指定单个模型文件（覆盖场景文件）
    #[serde(default)]
    pub model: Option<String>,

    /// 单个模型的语法（与 `model` 配合使用）
    #[serde(default)]
    pub grammar: Option<Grammar>,

    /// 命令行中无法识别的语法名称，由 `validate` 报告
    #[serde(skip)]
    pub unknown_grammar: Option<String>,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default = "default_file_output")]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

// 默认值函数
fn default_scene() -> String { "scene.toml".to_string() }
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_file_output() -> bool { false }
fn default_log_file() -> String { "dist_model.log".to_string() }

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            scene: default_scene(),
            dump: false,
            model: None,
            grammar: None,
            unknown_grammar: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: default_file_output(),
            log_file: default_log_file(),
        }
    }
}

impl LogLevel {
    /// 从命令行字符串解析
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

impl Config {
    /// 从配置文件加载
    ///
    /// # 示例
    ///
    /// ```no_run
    /// use dist_model::core::Config;
    ///
    /// let config = Config::from_file("config.toml")?;
    /// # Ok::<(), dist_model::core::DistModelError>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path_str.clone()))?;

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，如果文件不存在则使用默认配置
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::from_file(path).unwrap_or_default()
    }

    /// 从命令行参数覆盖配置
    ///
    /// 支持的参数：
    /// - `--scene <path>`: 场景文件
    /// - `--model <path>`: 单个模型文件（忽略场景文件）
    /// - `--grammar <name>`: 单个模型的语法，例如 `obj_position_normal`
    /// - `--dump`: 打印顶点缓冲转储
    /// - `--log-level <level>`: 日志级别
    ///
    /// 无法识别的日志级别会被忽略，保留配置文件中的设置；
    /// 无法识别的语法名称会被记录下来，由 `validate` 报错。
    pub fn apply_args<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        let value_of = |flag: &str| {
            args.iter()
                .position(|a| a == flag)
                .and_then(|idx| args.get(idx + 1))
                .cloned()
        };

        if args.iter().any(|a| a == "--dump") {
            self.loader.dump = true;
        }

        if let Some(scene) = value_of("--scene") {
            self.loader.scene = scene;
        }

        if let Some(model) = value_of("--model") {
            self.loader.model = Some(model);
        }

        if let Some(name) = value_of("--grammar") {
            match Grammar::parse(&name) {
                Some(grammar) => {
                    self.loader.grammar = Some(grammar);
                    self.loader.unknown_grammar = None;
                }
                None => self.loader.unknown_grammar = Some(name),
            }
        }

        if let Some(level) = value_of("--log-level").and_then(|l| LogLevel::parse(&l)) {
            self.logging.level = level;
        }
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.loader.unknown_grammar {
            let known: Vec<&str> = Grammar::ALL.iter().map(|g| g.name()).collect();
            return Err(ConfigError::InvalidValue {
                field: "loader.grammar".to_string(),
                reason: format!("unknown grammar '{}' (expected one of: {})", name, known.join(", ")),
            }
            .into());
        }

        if self.loader.model.is_none() && self.loader.scene.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "loader.scene".to_string(),
                reason: "Scene path must not be empty when no model is given".to_string(),
            }
            .into());
        }

        if self.loader.grammar.is_some() && self.loader.model.is_none() {
            return Err(ConfigError::InvalidValue {
                field: "loader.grammar".to_string(),
                reason: "A grammar override requires a model path".to_string(),
            }
            .into());
        }

        if self.logging.file_output && self.logging.log_file.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "logging.log_file".to_string(),
                reason: "Log file path must not be empty when file output is enabled".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
