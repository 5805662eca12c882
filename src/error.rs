//! 错误处理模块 (修复原则：明确抛出异常)
//!
//! 插件目录未找到不是错误（`Option::None`），子进程非零退出也不是错误
//! （`LaunchOutcome`），这里只收录启动前就必须中止的情况。

use std::error::Error;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("配置错误: 缺少必需的环境变量 {}", .0.join(", "))]
    Configuration(Vec<String>),

    #[error("配置文件解析失败 {path}: {message}")]
    ConfigFile { path: PathBuf, message: String },

    #[error("文件不存在: {0}")]
    FileNotFound(PathBuf),

    #[error("文件IO错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("解析错误: {0}")]
    Parse(String),
}

impl LaunchError {
    /// 报告错误，支持详细/安静模式
    /// verbose = true: 详细错误链
    /// verbose = false: 关键信息，安静模式
    pub fn report(&self, verbose: bool) {
        if verbose {
            eprintln!("❌ 错误: {}", self);

            if let Some(source) = self.source() {
                eprintln!("  └─ 原因: {}", source);
                let mut current = source.source();
                while let Some(next) = current {
                    eprintln!("     └─ {}", next);
                    current = next.source();
                }
            }
        } else {
            match self {
                LaunchError::Configuration(names) => {
                    for name in names {
                        eprintln!("ConfigurationError: {} 未设置或为空", name);
                    }
                }
                LaunchError::FileNotFound(path) => eprintln!("文件不存在: {}", path.display()),
                LaunchError::Io(err) => eprintln!("文件错误: {}", err),
                _ => eprintln!("错误: {}", self),
            }
        }
    }

    /// 启动前失败统一返回 1
    pub fn exit_code(&self) -> i32 {
        1
    }
}

/// 简化 Result 类型别名
pub type Result<T> = std::result::Result<T, LaunchError>;
