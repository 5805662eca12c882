//! 核心数据结构定义 (表达原则：用数据结构表达逻辑)

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::fmt;

/// 后端服务地址
pub const SUPABASE_URL: &str = "SUPABASE_URL";
/// 匿名访问密钥
pub const SUPABASE_KEY: &str = "SUPABASE_KEY";
/// 服务角色密钥
pub const SUPABASE_SERVICE_KEY: &str = "SUPABASE_SERVICE_KEY";
/// 存储桶名称（可选）
pub const SUPABASE_BUCKET: &str = "SUPABASE_BUCKET";

/// 启动前必须非空的凭据变量
pub const REQUIRED_CREDENTIALS: [&str; 3] = [SUPABASE_URL, SUPABASE_KEY, SUPABASE_SERVICE_KEY];

/// Qt 平台插件目录
pub const QT_QPA_PLATFORM_PLUGIN_PATH: &str = "QT_QPA_PLATFORM_PLUGIN_PATH";
/// Qt 插件根目录
pub const QT_PLUGIN_PATH: &str = "QT_PLUGIN_PATH";
/// Qt 插件加载调试开关
pub const QT_DEBUG_PLUGINS: &str = "QT_DEBUG_PLUGINS";

/// 每次启动前都要清掉的继承变量
pub const PLUGIN_PATH_VARS: [&str; 2] = [QT_QPA_PLATFORM_PLUGIN_PATH, QT_PLUGIN_PATH];

/// 子进程的环境变量表
///
/// 启动器不修改自身进程的环境，只在这张表上增删，最后整体交给子进程。
/// 内部以 `OsString` 保存，非 UTF-8 的继承变量也会原样传递。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvTable {
    vars: BTreeMap<OsString, OsString>,
}

impl EnvTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 捕获当前进程的环境变量
    pub fn capture() -> Self {
        Self {
            vars: std::env::vars_os().collect(),
        }
    }

    /// 获取变量值；不存在或非 UTF-8 时返回 None
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(OsStr::new(key)).and_then(|v| v.to_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(OsStr::new(key))
    }

    pub fn set(&mut self, key: &str, value: impl Into<OsString>) {
        self.vars.insert(OsString::from(key), value.into());
    }

    /// 删除变量，返回之前是否存在
    pub fn unset(&mut self, key: &str) -> bool {
        self.vars.remove(OsStr::new(key)).is_some()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OsString, &OsString)> {
        self.vars.iter()
    }
}

impl<K: Into<OsString>, V: Into<OsString>> FromIterator<(K, V)> for EnvTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// 一次启动尝试的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// 子进程正常退出（退出码 0）
    Success,
    /// 子进程以非零码退出或被信号终止
    Exited(i32),
    /// 子进程未能启动
    SpawnFailed { code: i32, reason: String },
}

impl LaunchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, LaunchOutcome::Success)
    }

    /// 透传给操作系统的退出码
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchOutcome::Success => 0,
            LaunchOutcome::Exited(code) => *code,
            LaunchOutcome::SpawnFailed { code, .. } => *code,
        }
    }
}

impl fmt::Display for LaunchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchOutcome::Success => write!(f, "成功"),
            LaunchOutcome::Exited(code) => write!(f, "退出码 {}", code),
            LaunchOutcome::SpawnFailed { code, reason } => {
                write!(f, "无法启动 ({}, 退出码 {})", reason, code)
            }
        }
    }
}
