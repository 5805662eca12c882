//! CLI 参数定义

use clap::Parser;
use std::path::PathBuf;

/// BoothCam 启动器：准备运行环境并启动桌面应用
#[derive(Parser, Debug)]
#[command(
    name = "boothcam-launch",
    version,
    about = "准备运行环境并启动 BoothCam",
    long_about = "校验后端凭据，定位 Qt 插件目录并导出相关环境变量，然后启动 BoothCam；\
                  首次启动失败时开启 QT_DEBUG_PLUGINS 重试一次"
)]
pub struct Cli {
    /// 配置文件路径 (默认 <config_dir>/boothcam/launcher.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// 从 .env 文件加载变量 (默认 ./.env，存在时加载)
    #[arg(short, long, value_name = "FILE")]
    pub env_file: Option<PathBuf>,

    /// 详细输出模式
    #[arg(short, long)]
    pub verbose: bool,
}
