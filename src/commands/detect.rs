//! detect 命令实现
//!
//! 只读检测: 列出与目标软件相关的进程与安装路径, 不做任何更改。

use crate::modules::platform;
use crate::modules::remover::{self, DetectionReport};
use crate::modules::system::NativeHost;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct DetectCommand {
    /// 软件名称
    pub software: String,

    /// 输出格式 (table/json)
    #[arg(long, default_value = "table")]
    pub format: String,

    /// 配置文件路径 (默认 uninstall_config.json)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub async fn execute(cmd: DetectCommand) -> Result<()> {
    // 空名称的子串会匹配所有进程与路径，直接拒绝
    if cmd.software.trim().is_empty() {
        anyhow::bail!("软件名称不能为空");
    }

    tracing::info!("检测目标: {}", cmd.software);

    let config = platform::resolve(cmd.config.as_deref());
    let report = remover::detect_only(&cmd.software, &config, &NativeHost);

    match cmd.format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            print_report(&report, config.family.label());
        }
    }

    Ok(())
}

fn print_report(report: &DetectionReport, platform_label: &str) {
    println!("\n{}", "=".repeat(80));
    println!("检测结果: {} (平台: {})", report.software_name, platform_label);
    println!("{}", "=".repeat(80));

    println!("\n相关进程: {} 个", report.process_matches.len());
    for proc in &report.process_matches {
        match &proc.exe {
            Some(exe) if !exe.is_empty() => {
                println!(
                    "  - PID {}: {} ({})",
                    proc.pid,
                    proc.name,
                    truncate_string(exe, 60)
                );
            }
            _ => {
                println!("  - PID {}: {}", proc.pid, proc.name);
            }
        }
    }

    println!("\n相关路径: {} 个", report.path_matches.len());
    for m in &report.path_matches {
        let kind = if m.is_directory { "目录" } else { "文件" };
        println!("  - [{}] {}", kind, m.path);
    }

    println!("\n{}", "=".repeat(80));
}

/// 截断字符串以适应显示宽度
fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}
