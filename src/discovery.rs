//! Qt 插件目录发现
//!
//! 通过解释器的模块解析机制定位 Qt 绑定包的安装目录，再拼出插件路径。
//! 找不到包不是错误：返回 None，由 Qt 自行按默认规则查找插件。

use crate::types::{EnvTable, PLUGIN_PATH_VARS, QT_PLUGIN_PATH, QT_QPA_PLATFORM_PLUGIN_PATH};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// 打印包目录的探测脚本；包不存在时以非零码退出
const PROBE: &str = "\
import importlib.util, os, sys
spec = importlib.util.find_spec(sys.argv[1])
if spec is None:
    sys.exit(1)
if spec.submodule_search_locations:
    print(list(spec.submodule_search_locations)[0])
elif spec.origin:
    print(os.path.dirname(spec.origin))
else:
    sys.exit(1)
";

/// 包目录定位器
pub trait PluginLocator {
    /// 返回包的安装目录，找不到时返回 None
    ///
    /// `env` 是子进程将拿到的环境，解释器的模块搜索路径必须与之一致。
    fn locate(&self, package: &str, env: &EnvTable) -> Option<PathBuf>;
}

/// 调用 Python 解释器定位包目录
#[derive(Debug, Clone)]
pub struct PythonLocator {
    python: String,
}

impl PythonLocator {
    pub fn new(python: impl Into<String>) -> Self {
        Self {
            python: python.into(),
        }
    }
}

impl PluginLocator for PythonLocator {
    fn locate(&self, package: &str, env: &EnvTable) -> Option<PathBuf> {
        let output = Command::new(&self.python)
            .env_clear()
            .envs(env.iter())
            .arg("-c")
            .arg(PROBE)
            .arg(package)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output();

        let output = match output {
            Ok(output) => output,
            Err(e) => {
                log::warn!("无法运行解释器 {}: {}", self.python, e);
                return None;
            }
        };

        if !output.status.success() {
            log::debug!("{} 未找到包 {} ({})", self.python, package, output.status);
            return None;
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let base = stdout.lines().next().map(str::trim).unwrap_or_default();
        if base.is_empty() {
            return None;
        }

        Some(PathBuf::from(base))
    }
}

/// 由包目录派生的两个插件路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginPaths {
    /// `<base>/Qt/plugins/platforms`
    pub platforms: PathBuf,
    /// `<base>/Qt/plugins`
    pub plugins: PathBuf,
}

impl PluginPaths {
    pub fn from_base(base: &Path) -> Self {
        let plugins = base.join("Qt").join("plugins");
        Self {
            platforms: plugins.join("platforms"),
            plugins,
        }
    }

    /// 写入子进程环境
    pub fn export(&self, env: &mut EnvTable) {
        env.set(QT_QPA_PLATFORM_PLUGIN_PATH, self.platforms.as_os_str());
        env.set(QT_PLUGIN_PATH, self.plugins.as_os_str());
    }
}

/// 清除继承的插件路径变量（幂等）
pub fn reset_plugin_env(env: &mut EnvTable) {
    for key in PLUGIN_PATH_VARS {
        if env.unset(key) {
            log::debug!("已清除继承的 {}", key);
        }
    }
}

/// 定位包并派生插件路径
///
/// 定位结果不是已存在的目录时同样视为未找到。
pub fn discover(
    locator: &dyn PluginLocator,
    package: &str,
    env: &EnvTable,
) -> Option<PluginPaths> {
    let base = locator.locate(package, env)?;
    if !base.is_dir() {
        log::debug!("包目录不存在: {}", base.display());
        return None;
    }
    log::info!("{} 安装目录: {}", package, base.display());
    Some(PluginPaths::from_base(&base))
}
