//! DistModel - 模型加载工具
//!
//! 读取场景文件中列出的模型（或命令行指定的单个模型），
//! 组装顶点缓冲并输出统计信息，可选打印文本转储。
//!
//! # 使用方法
//!
//! ```bash
//! # 使用配置文件和 scene.toml
//! cargo run
//!
//! # 加载单个模型并打印转储
//! cargo run -- --model models/cube.obj --grammar obj_position_normal --dump
//! ```

use dist_model::core::{log, Config, ModelConfig, SceneConfig};
use dist_model::geometry::{Grammar, Model};

/// 应用程序入口点
///
/// # 流程
///
/// 1. 加载配置文件（config.toml）并应用命令行参数
/// 2. 初始化日志系统
/// 3. 确定要加载的模型（`--model` 或场景文件）
/// 4. 逐个加载，任何一个失败都以非零状态退出
fn main() {
    // 1. 加载配置（在初始化日志之前）
    let mut config = Config::from_file_or_default("config.toml");
    config.apply_args(std::env::args());

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    // 2. 初始化日志系统
    let log_file = if config.logging.file_output {
        Some(config.logging.log_file.as_str())
    } else {
        None
    };
    log::init_logger(config.logging.level, config.logging.file_output, log_file);
    dist_model::app_info!(version = env!("CARGO_PKG_VERSION"), "DistModel starting...");

    // 3. 确定场景
    let scene = match &config.loader.model {
        Some(path) => match config.loader.grammar {
            Some(grammar) => SceneConfig::single(ModelConfig::new(path.clone(), grammar)),
            None => {
                let names: Vec<&str> = Grammar::ALL.iter().map(|g| g.name()).collect();
                eprintln!("--model requires --grammar <{}>", names.join("|"));
                std::process::exit(1);
            }
        },
        None => match SceneConfig::from_file(&config.loader.scene) {
            Ok(scene) => scene,
            Err(e) => {
                dist_model::app_error!(scene = %config.loader.scene, "Failed to load scene: {}", e);
                eprintln!("Failed to load scene: {}", e);
                std::process::exit(1);
            }
        },
    };

    if scene.models.is_empty() {
        dist_model::app_info!("Scene contains no models");
        return;
    }

    // 4. 加载模型
    for entry in &scene.models {
        let model = match Model::load(&entry.path, &entry.load_options()) {
            Ok(model) => model,
            Err(e) => {
                dist_model::app_error!(path = %entry.path, "Failed to load model: {}", e);
                eprintln!("Failed to load model: {}", e);
                std::process::exit(1);
            }
        };

        dist_model::app_info!(
            name = model.name(),
            triangles = model.triangle_count(),
            vertices = model.vertex_count(),
            stride = model.layout().stride_bytes(),
            bytes = model.byte_size(),
            "Model ready"
        );

        if config.loader.dump {
            println!("{}", model);
        }
    }
}
