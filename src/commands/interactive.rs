//! interactive 命令实现
//!
//! 交互式引导: 询问软件名称与运行模式, 再执行检测或完整卸载。

use crate::modules::common::utils;
use crate::modules::platform;
use crate::modules::remover::{self, Mode};
use crate::modules::system::NativeHost;
use anyhow::Result;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct InteractiveCommand {
    /// 配置文件路径 (默认 uninstall_config.json)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub async fn execute(cmd: InteractiveCommand) -> Result<()> {
    println!("=== 卸载助手 交互模式 ===\n");

    let software = read_line("请输入要卸载的软件名称: ")?;
    if software.is_empty() {
        println!("未输入软件名称, 退出。");
        return Ok(());
    }

    println!("\n请选择运行模式:");
    println!("  1. 安全模式 (仅检测, 不做任何更改)");
    println!("  2. 标准模式 (每步询问确认)");
    println!("  3. 激进模式 (不询问, 执行全部步骤)");

    let choice = read_line("请选择 (1-3): ")?;
    // 无法解析的输入按安全模式处理
    let mode = match choice.parse::<u32>().unwrap_or(1) {
        1 => Mode::Safe,
        2 => Mode::Standard,
        3 => {
            println!("\n警告: 激进模式将直接终止进程、删除文件并执行系统卸载!");
            let answer = read_line("确认使用激进模式请输入 yes: ")?;
            if !answer.eq_ignore_ascii_case("yes") {
                println!("操作已取消。");
                return Ok(());
            }
            Mode::Aggressive
        }
        _ => {
            println!("无效的模式选择。");
            return Ok(());
        }
    };

    if mode != Mode::Safe && !utils::is_elevated() {
        println!("\n警告: 当前没有管理员权限, 终止进程与删除文件可能失败");
    }

    let config = platform::resolve(cmd.config.as_deref());

    if mode == Mode::Safe {
        let report = remover::detect_only(&software, &config, &NativeHost);
        println!("\n相关进程: {} 个", report.process_matches.len());
        for proc in &report.process_matches {
            println!("  - PID {}: {}", proc.pid, proc.name);
        }
        println!("相关路径: {} 个", report.path_matches.len());
        for m in &report.path_matches {
            println!("  - {}", m.path);
        }
        return Ok(());
    }

    let result = remover::run_removal(&software, mode, &config, &NativeHost);

    println!("\n--- 运行结束 ---");
    println!(
        "进程: 发现 {} 个, 终止 {} 个",
        result.processes_found, result.processes_terminated
    );
    println!(
        "路径: 发现 {} 个, 清理 {} 个",
        result.paths_found, result.paths_cleaned
    );
    println!(
        "系统卸载: {}",
        if result.uninstall_succeeded {
            "成功"
        } else {
            "未完成"
        }
    );

    Ok(())
}

fn read_line(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
