//! 跨平台命令执行器
//!
//! 子进程只拿到准备好的环境表（先 env_clear 再整体注入），
//! 并继承父进程的 stdin/stdout/stderr。

use crate::types::{EnvTable, LaunchOutcome};
use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

/// 启动目标程序的抽象，便于测试替换
pub trait ProcessRunner {
    /// 以零参数运行 `program`，阻塞直到其退出
    fn run(&mut self, program: &Path, env: &EnvTable) -> LaunchOutcome;
}

/// 真实的子进程执行器
#[derive(Debug, Default)]
pub struct CommandExecutor;

impl CommandExecutor {
    pub fn new() -> Self {
        Self
    }

    /// 将退出状态换算为退出码；Unix 上被信号终止时为 128 + 信号值
    fn status_code(status: ExitStatus) -> i32 {
        if let Some(code) = status.code() {
            return code;
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return 128 + signal;
            }
        }

        1
    }

    /// 启动失败时沿用 shell 的约定：找不到 127，无执行权限 126
    fn spawn_failure_code(kind: ErrorKind) -> i32 {
        match kind {
            ErrorKind::NotFound => 127,
            ErrorKind::PermissionDenied => 126,
            _ => 1,
        }
    }
}

impl ProcessRunner for CommandExecutor {
    fn run(&mut self, program: &Path, env: &EnvTable) -> LaunchOutcome {
        let mut cmd = Command::new(program);
        cmd.env_clear()
            .envs(env.iter())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        match cmd.status() {
            Ok(status) if status.success() => LaunchOutcome::Success,
            Ok(status) => LaunchOutcome::Exited(Self::status_code(status)),
            Err(e) => LaunchOutcome::SpawnFailed {
                code: Self::spawn_failure_code(e.kind()),
                reason: format!("{}: {}", program.display(), e),
            },
        }
    }
}
