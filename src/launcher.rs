//! 启动流程
//!
//! 校验凭据 → 清除继承的插件变量 → 定位插件目录 → 导出变量 → 启动；
//! 首次失败时打开 `QT_DEBUG_PLUGINS` 再启动一次，最多两次。

use crate::config::{Credentials, LauncherConfig};
use crate::discovery::{self, PluginLocator};
use crate::error::Result;
use crate::types::{EnvTable, LaunchOutcome, QT_DEBUG_PLUGINS};
use crate::utils::executor::ProcessRunner;
use std::path::Path;

/// 最大启动次数
pub const MAX_ATTEMPTS: u32 = 2;

/// 启动器
pub struct Launcher<L, R> {
    locator: L,
    runner: R,
}

impl<L: PluginLocator, R: ProcessRunner> Launcher<L, R> {
    pub fn new(locator: L, runner: R) -> Self {
        Self { locator, runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// 校验并准备子进程环境
    ///
    /// # Errors
    ///
    /// 凭据缺失时返回 `LaunchError::Configuration`，此时 `env` 未被修改。
    pub fn prepare(&self, config: &LauncherConfig, env: &mut EnvTable) -> Result<()> {
        let credentials = Credentials::from_settings(&config.settings)?;

        for (key, value) in &config.passthrough {
            env.set(key, value);
        }
        credentials.export(env);

        discovery::reset_plugin_env(env);
        match discovery::discover(&self.locator, &config.qt_package, env) {
            Some(paths) => paths.export(env),
            None => log::info!("未找到 {}，使用 Qt 默认插件查找", config.qt_package),
        }

        Ok(())
    }

    /// 启动目标程序，失败时带调试开关重试一次
    pub fn launch(&mut self, target: &Path, env: &mut EnvTable) -> LaunchOutcome {
        let mut attempt = 1;
        loop {
            log::info!("启动 {} (第 {} 次)", target.display(), attempt);
            let outcome = self.runner.run(target, env);

            if outcome.is_success() || attempt >= MAX_ATTEMPTS {
                return outcome;
            }

            eprintln!(
                "⚠️  {} 启动失败 ({})，开启 {} 后重试",
                target.display(),
                outcome,
                QT_DEBUG_PLUGINS
            );
            env.set(QT_DEBUG_PLUGINS, "1");
            attempt += 1;
        }
    }

    /// 完整流程，返回应透传给操作系统的退出码
    ///
    /// # Errors
    ///
    /// 启动前的配置错误；此时不会启动任何进程。
    pub fn run(&mut self, config: &LauncherConfig, env: &mut EnvTable) -> Result<i32> {
        self.prepare(config, env)?;
        let outcome = self.launch(&config.target, env);
        if !outcome.is_success() {
            log::error!("{} 最终失败: {}", config.target.display(), outcome);
        }
        Ok(outcome.exit_code())
    }
}
