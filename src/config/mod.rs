//! 启动配置加载
//!
//! 优先级（从低到高）：
//! 1. TOML 配置文件
//! 2. .env 文件
//! 3. 进程环境变量
//!
//! 凭据只从这些注入源读取，代码里不存在任何默认值。

pub mod credentials;
pub mod format;

use crate::error::{LaunchError, Result};
use crate::types::{EnvTable, SUPABASE_BUCKET, SUPABASE_KEY, SUPABASE_SERVICE_KEY, SUPABASE_URL};
use crate::utils::paths::{self, file_exists};
use format::dotenv::DotenvParser;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub use credentials::Credentials;

/// 目标程序路径
pub const BOOTHCAM_APP: &str = "BOOTHCAM_APP";
/// 用于查询插件目录的 Python 解释器
pub const BOOTHCAM_PYTHON: &str = "BOOTHCAM_PYTHON";
/// Qt 绑定包名
pub const BOOTHCAM_QT_PACKAGE: &str = "BOOTHCAM_QT_PACKAGE";
/// 配置文件路径
pub const BOOTHCAM_CONFIG: &str = "BOOTHCAM_CONFIG";

pub const DEFAULT_TARGET: &str = "./BoothCam";
pub const DEFAULT_PYTHON: &str = "python3";
pub const DEFAULT_QT_PACKAGE: &str = "PySide6";

/// 参与合并的键
const KNOWN_KEYS: [&str; 7] = [
    SUPABASE_URL,
    SUPABASE_KEY,
    SUPABASE_SERVICE_KEY,
    SUPABASE_BUCKET,
    BOOTHCAM_APP,
    BOOTHCAM_PYTHON,
    BOOTHCAM_QT_PACKAGE,
];

/// 合并后的配置键值
pub type Settings = BTreeMap<String, String>;

/// launcher.toml 的结构
///
/// ```toml
/// target = "/opt/boothcam/BoothCam"
/// python = "python3"
/// qt_package = "PySide6"
///
/// [supabase]
/// url = "example.supabase.co"
/// key = "..."
/// service_key = "..."
/// bucket = "sessions"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub target: Option<String>,
    pub python: Option<String>,
    pub qt_package: Option<String>,
    pub supabase: SupabaseSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SupabaseSection {
    pub url: Option<String>,
    pub key: Option<String>,
    pub service_key: Option<String>,
    pub bucket: Option<String>,
}

impl FileConfig {
    /// 解析 TOML 内容，`path` 仅用于错误信息
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| LaunchError::ConfigFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// 从文件加载
    pub fn load(path: &Path) -> Result<Self> {
        let content = paths::read_file(path)?;
        Self::parse(&content, path)
    }

    /// 转成与环境变量同名的键值
    fn into_settings(self) -> Settings {
        [
            (SUPABASE_URL, self.supabase.url),
            (SUPABASE_KEY, self.supabase.key),
            (SUPABASE_SERVICE_KEY, self.supabase.service_key),
            (SUPABASE_BUCKET, self.supabase.bucket),
            (BOOTHCAM_APP, self.target),
            (BOOTHCAM_PYTHON, self.python),
            (BOOTHCAM_QT_PACKAGE, self.qt_package),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key.to_string(), v)))
        .collect()
    }
}

/// 配置来源
///
/// 显式指定的文件必须存在；回退路径不存在时静默跳过。
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    pub config_file: Option<PathBuf>,
    pub fallback_config_file: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
    pub fallback_env_file: Option<PathBuf>,
}

impl ConfigSources {
    /// 根据命令行参数和进程环境确定配置来源
    pub fn discover(
        config_file: Option<PathBuf>,
        env_file: Option<PathBuf>,
        process_env: &EnvTable,
    ) -> Self {
        let config_file = config_file.or_else(|| {
            process_env
                .get(BOOTHCAM_CONFIG)
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(PathBuf::from)
        });

        Self {
            config_file,
            fallback_config_file: paths::default_config_path(),
            env_file,
            fallback_env_file: Some(PathBuf::from(paths::DEFAULT_ENV_FILE)),
        }
    }

    fn pick(explicit: &Option<PathBuf>, fallback: &Option<PathBuf>) -> Result<Option<PathBuf>> {
        match (explicit, fallback) {
            (Some(path), _) if !file_exists(path) => Err(LaunchError::FileNotFound(path.clone())),
            (Some(path), _) => Ok(Some(path.clone())),
            (None, Some(path)) if file_exists(path) => Ok(Some(path.clone())),
            _ => Ok(None),
        }
    }
}

/// 合并后的启动配置
#[derive(Debug, Clone)]
pub struct LauncherConfig {
    /// 要启动的可执行文件
    pub target: PathBuf,
    /// 查询插件目录用的解释器
    pub python: String,
    /// Qt 绑定包名
    pub qt_package: String,
    /// 合并后的已知键
    pub settings: Settings,
    /// .env 中的其他变量，进程环境未设置时导出给子进程
    pub passthrough: Vec<(String, String)>,
}

impl LauncherConfig {
    /// 按优先级加载并合并全部配置层
    pub fn load(sources: &ConfigSources, process_env: &EnvTable) -> Result<Self> {
        let config_file = ConfigSources::pick(&sources.config_file, &sources.fallback_config_file)?;
        let file_layer = match config_file {
            Some(path) => {
                log::info!("加载配置文件: {}", path.display());
                FileConfig::load(&path)?.into_settings()
            }
            None => Settings::new(),
        };

        let env_file = ConfigSources::pick(&sources.env_file, &sources.fallback_env_file)?;
        let dotenv_vars = match env_file {
            Some(path) => {
                log::info!("加载 .env 文件: {}", path.display());
                DotenvParser::parse(&paths::read_file(&path)?)?
            }
            None => Vec::new(),
        };

        Ok(Self::from_layers(file_layer, dotenv_vars, process_env))
    }

    /// 合并三层配置（低 → 高）
    pub fn from_layers(
        file_layer: Settings,
        dotenv_vars: Vec<(String, String)>,
        process_env: &EnvTable,
    ) -> Self {
        let mut settings = file_layer;
        let mut passthrough = Vec::new();

        for (key, value) in dotenv_vars {
            if KNOWN_KEYS.contains(&key.as_str()) {
                settings.insert(key, value);
            } else if !process_env.contains(&key) {
                passthrough.push((key, value));
            }
        }

        for key in KNOWN_KEYS {
            if let Some(value) = process_env.get(key) {
                settings.insert(key.to_string(), value.to_string());
            }
        }

        let setting = |key: &str, default: &str| {
            settings
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
                .to_string()
        };

        let target = PathBuf::from(setting(BOOTHCAM_APP, DEFAULT_TARGET));
        let python = setting(BOOTHCAM_PYTHON, DEFAULT_PYTHON);
        let qt_package = setting(BOOTHCAM_QT_PACKAGE, DEFAULT_QT_PACKAGE);

        Self {
            target,
            python,
            qt_package,
            settings,
            passthrough,
        }
    }
}
