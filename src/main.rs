use anyhow::Result;
use clap::Parser;
use std::process;

mod commands;
mod modules;

#[derive(Parser, Debug)]
#[command(name = "xiezai")]
#[command(about = "跨平台软件卸载助手命令行工具", long_about = None)]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: commands::Command,

    /// 详细输出模式
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // 解析命令行参数
    let cli = Cli::parse();

    // 初始化日志
    modules::common::logging::init_logging(cli.verbose);

    // 执行命令
    let result = match cli.command {
        commands::Command::Detect(cmd) => commands::detect::execute(cmd).await,
        commands::Command::Remove(cmd) => commands::remove::execute(cmd).await,
        commands::Command::Interactive(cmd) => commands::interactive::execute(cmd).await,
    };

    match result {
        Ok(_) => {}
        Err(e) => {
            if cli.verbose {
                tracing::error!("错误: {}", e);
            } else {
                eprintln!("错误: {}", e);
            }
            process::exit(1);
        }
    }

    Ok(())
}
