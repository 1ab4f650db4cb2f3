pub mod detect;
pub mod interactive;
pub mod remove;

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 检测相关进程与安装路径 (只读)
    Detect(detect::DetectCommand),

    /// 按模式执行完整卸载流程
    Remove(remove::RemoveCommand),

    /// 交互式引导卸载
    Interactive(interactive::InteractiveCommand),
}
