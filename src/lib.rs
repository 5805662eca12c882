//! BoothCam 启动器
//!
//! 准备子进程环境（后端凭据、Qt 插件路径）并启动桌面应用，失败时带调试开关重试一次。

pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod launcher;
pub mod types;
pub mod utils;

// 重新导出常用类型
pub use config::{ConfigSources, Credentials, LauncherConfig};
pub use discovery::{PluginLocator, PluginPaths, PythonLocator};
pub use error::{LaunchError, Result};
pub use launcher::Launcher;
pub use types::{EnvTable, LaunchOutcome};
pub use utils::executor::{CommandExecutor, ProcessRunner};
