//! 跨平台路径处理工具 (传统原则：常识性接口设计)

use crate::error::{LaunchError, Result};
use std::path::{Path, PathBuf};

/// 配置目录名
const APP_DIR: &str = "boothcam";
/// 默认配置文件名
const CONFIG_FILE: &str = "launcher.toml";
/// 工作目录下自动加载的 dotenv 文件
pub const DEFAULT_ENV_FILE: &str = ".env";

/// 获取用户配置目录：<config_dir>/boothcam
///
/// Linux 上为 `~/.config/boothcam`，macOS 为 `~/Library/Application Support/boothcam`。
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR))
}

/// 默认配置文件路径
pub fn default_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join(CONFIG_FILE))
}

/// 检查文件是否存在
pub fn file_exists(path: &Path) -> bool {
    path.exists() && path.is_file()
}

/// 读取文件内容，返回错误时提供详细信息
pub fn read_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(LaunchError::FileNotFound(path.to_path_buf()));
    }
    std::fs::read_to_string(path).map_err(|e| {
        LaunchError::Io(std::io::Error::new(
            e.kind(),
            format!("读取文件 {} 失败: {}", path.display(), e),
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(!file_exists(&missing));
        assert!(matches!(
            read_file(&missing),
            Err(LaunchError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_read_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.env");
        std::fs::write(&path, "A=1").unwrap();
        assert!(file_exists(&path));
        assert_eq!(read_file(&path).unwrap(), "A=1");
        assert!(!file_exists(dir.path()));
    }

    #[test]
    fn test_default_config_path_shape() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("boothcam/launcher.toml"));
        }
    }
}
