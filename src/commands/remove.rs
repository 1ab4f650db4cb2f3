//! remove 命令实现
//!
//! 按模式执行完整卸载流程: 终止进程, 清理文件, 调用系统卸载命令。

use crate::modules::common::utils;
use crate::modules::platform;
use crate::modules::remover::{self, Mode, RemovalResult};
use crate::modules::system::NativeHost;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct RemoveCommand {
    /// 软件名称
    pub software: String,

    /// 安全模式: 仅检测, 不做任何更改
    #[arg(short, long)]
    pub safe: bool,

    /// 激进模式: 不询问, 执行全部步骤
    #[arg(short, long)]
    pub aggressive: bool,

    /// 输出格式 (table/json)
    #[arg(long, default_value = "table")]
    pub format: String,

    /// 配置文件路径 (默认 uninstall_config.json)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub async fn execute(cmd: RemoveCommand) -> Result<()> {
    // 空名称的子串会匹配主机上所有进程与路径，必须在引擎之前拦下
    if cmd.software.trim().is_empty() {
        anyhow::bail!("软件名称不能为空");
    }

    // --safe 与 --aggressive 同时给出时以安全模式为准
    let mode = if cmd.safe {
        Mode::Safe
    } else if cmd.aggressive {
        Mode::Aggressive
    } else {
        Mode::Standard
    };

    println!("=== 卸载软件: {} (模式: {}) ===", cmd.software, mode.label());

    if mode != Mode::Safe && !utils::is_elevated() {
        println!("警告: 当前没有管理员权限, 终止进程与删除文件可能失败");
    }
    println!();

    let config = platform::resolve(cmd.config.as_deref());
    let result = remover::run_removal(&cmd.software, mode, &config, &NativeHost);

    match cmd.format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => {
            print_summary(&result);
        }
    }

    Ok(())
}

fn print_summary(result: &RemovalResult) {
    println!("\n{}", "=".repeat(80));
    println!("卸载摘要: {}", result.software_name);
    println!("{}", "=".repeat(80));
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
    println!("{}", "=".repeat(80));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn blank_software_name_is_rejected_before_any_scan() {
        let cmd = RemoveCommand {
            software: "   ".to_string(),
            safe: true,
            aggressive: false,
            format: "table".to_string(),
            config: None,
        };

        assert!(execute(cmd).await.is_err());
    }
}
