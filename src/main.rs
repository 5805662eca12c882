//! BoothCam 启动器主程序入口
//!
//! 设计原则：
//! - 入口代码简洁，逻辑委托给 launcher
//! - 退出码透传：配置错误为 1，否则为最后一次启动的退出码

use boothcam_launcher::cli::Cli;
use boothcam_launcher::{
    CommandExecutor, ConfigSources, EnvTable, Launcher, LauncherConfig, PythonLocator, Result,
};
use clap::Parser;

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let verbose = cli.verbose;
    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            e.report(verbose);
            e.exit_code()
        }
    };

    std::process::exit(code);
}

fn run(cli: Cli) -> Result<i32> {
    let mut env = EnvTable::capture();

    let sources = ConfigSources::discover(cli.config, cli.env_file, &env);
    let config = LauncherConfig::load(&sources, &env)?;
    log::debug!(
        "启动配置: target={} python={} package={}",
        config.target.display(),
        config.python,
        config.qt_package
    );

    let locator = PythonLocator::new(config.python.clone());
    let mut launcher = Launcher::new(locator, CommandExecutor::new());
    launcher.run(&config, &mut env)
}
