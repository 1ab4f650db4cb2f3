//! 卸载编排 - 按模式驱动扫描、终止、清理与系统卸载的状态机
//!
//! 步骤固定：扫描进程 -> 终止 -> 扫描路径 -> 清理 -> 构建并执行
//! 系统卸载命令。安全模式在路径扫描后无条件结束；标准模式任一
//! 确认被拒绝即放弃全部后续步骤；激进模式不询问。确认点只在真
//! 有对象可操作时出现，单步失败只记账，不中断流程。

pub mod models;

pub use models::{DetectionReport, Mode, RemovalResult};

use crate::modules::cleaner;
use crate::modules::common::utils;
use crate::modules::platform::PlatformConfig;
use crate::modules::scanner::{self, PathMatch, ProcessInfo, SoftwareQuery};
use crate::modules::system::SystemHost;
use crate::modules::uninstaller::{self, UninstallCommand};
use std::time::Duration;

/// 系统卸载命令的执行时限
pub const UNINSTALL_TIMEOUT: Duration = Duration::from_secs(30);

/// 执行完整卸载流程
pub fn run_removal(
    name: &str,
    mode: Mode,
    config: &PlatformConfig,
    host: &dyn SystemHost,
) -> RemovalResult {
    let task_id = utils::generate_id();
    let query = SoftwareQuery::new(name.to_string());
    let mut result = RemovalResult::new(name.to_string());

    tracing::info!(
        "开始卸载流程: {} (模式: {}, 平台: {}, 任务: {})",
        name,
        mode.label(),
        config.family.label(),
        task_id
    );

    // 1. 扫描进程
    let snapshot = host.list_processes();
    let matches = scanner::find_matches(&query, &snapshot);
    result.processes_found = matches.len();
    tracing::info!("发现相关进程: {} 个", matches.len());
    for m in &matches {
        tracing::info!("  - PID {}: {}", m.pid, m.name);
    }

    // 2. 终止进程（安全模式跳过，无匹配不询问）
    if mode != Mode::Safe && !matches.is_empty() {
        if !confirm(mode, host, &terminate_prompt(&matches)) {
            tracing::info!("用户拒绝终止进程，放弃后续步骤 (任务: {})", task_id);
            return result;
        }

        for m in &matches {
            match host.terminate_process(m.pid) {
                Ok(()) => {
                    tracing::info!("已终止进程 {} ({})", m.pid, m.name);
                    result.processes_terminated += 1;
                }
                Err(e) => {
                    tracing::warn!("终止进程 {} 失败: {}", m.pid, e);
                }
            }
        }
    }

    // 3. 扫描安装路径
    let paths = scanner::find_paths(&query, config, host);
    result.paths_found = paths.len();
    tracing::info!("发现相关路径: {} 个", paths.len());
    for p in &paths {
        tracing::info!("  - {}", p.path);
    }

    if mode == Mode::Safe {
        tracing::info!("安全模式: 仅检测，不做任何更改 (任务: {})", task_id);
        return result;
    }

    // 4. 清理文件
    if !paths.is_empty() {
        if !confirm(mode, host, &clean_prompt(&paths)) {
            tracing::info!("用户拒绝清理文件，放弃后续步骤 (任务: {})", task_id);
            return result;
        }

        result.paths_cleaned = cleaner::clean_paths(&paths, host);
        tracing::info!("清理完成: {}/{}", result.paths_cleaned, result.paths_found);
    }

    // 5. 系统级卸载
    match uninstaller::build_uninstall_command(&query.name, config, host) {
        Some(command) => {
            tracing::info!("卸载命令: {}", command);

            if !confirm(mode, host, &execute_prompt(&command)) {
                tracing::info!("用户拒绝执行系统卸载 (任务: {})", task_id);
                return result;
            }

            match host.run_command(&command, UNINSTALL_TIMEOUT) {
                Ok(output) if output.exit_code == 0 => {
                    if !output.stdout.trim().is_empty() {
                        tracing::debug!("卸载命令输出: {}", output.stdout.trim());
                    }
                    tracing::info!("系统卸载完成");
                    result.uninstall_succeeded = true;
                }
                Ok(output) => {
                    tracing::warn!(
                        "系统卸载失败，退出码 {}: {}",
                        output.exit_code,
                        output.stderr.trim()
                    );
                }
                Err(e) => {
                    tracing::warn!("系统卸载执行出错: {}", e);
                }
            }
        }
        None => {
            tracing::info!("当前平台没有可用的系统卸载命令");
        }
    }

    tracing::info!(
        "卸载流程结束: 进程 {}/{}, 路径 {}/{}, 系统卸载{} (任务: {})",
        result.processes_terminated,
        result.processes_found,
        result.paths_cleaned,
        result.paths_found,
        if result.uninstall_succeeded {
            "成功"
        } else {
            "未完成"
        },
        task_id
    );

    result
}

/// 只读检测，等价于安全模式的两次扫描
pub fn detect_only(name: &str, config: &PlatformConfig, host: &dyn SystemHost) -> DetectionReport {
    let query = SoftwareQuery::new(name.to_string());

    let snapshot = host.list_processes();
    let process_matches = scanner::find_matches(&query, &snapshot);
    let path_matches = scanner::find_paths(&query, config, host);

    DetectionReport {
        software_name: query.name,
        process_matches,
        path_matches,
    }
}

/// 按模式决定是否继续：激进直接放行，标准询问宿主
fn confirm(mode: Mode, host: &dyn SystemHost, message: &str) -> bool {
    match mode {
        Mode::Aggressive => true,
        Mode::Standard => host.prompt_yes_no(message),
        // 安全模式在确认点之前已经返回
        Mode::Safe => false,
    }
}

fn terminate_prompt(matches: &[ProcessInfo]) -> String {
    let mut lines = vec![format!("发现 {} 个相关进程:", matches.len())];
    for m in matches {
        lines.push(format!("  - PID {}: {}", m.pid, m.name));
    }
    lines.push("是否全部终止?".to_string());
    lines.join("\n")
}

fn clean_prompt(paths: &[PathMatch]) -> String {
    let mut lines = vec![format!("发现 {} 个相关路径:", paths.len())];
    for p in paths {
        let kind = if p.is_directory { "目录" } else { "文件" };
        lines.push(format!("  - [{}] {}", kind, p.path));
    }
    lines.push("是否全部删除?".to_string());
    lines.join("\n")
}

fn execute_prompt(command: &UninstallCommand) -> String {
    format!(
        "即将执行系统卸载命令:\n  {}\n是否继续?",
        command.display_line()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::platform::{PlatformConfig, PlatformFamily};
    use crate::modules::system::fake::FakeHost;
    use crate::modules::system::DirEntryInfo;

    fn linux_config() -> PlatformConfig {
        PlatformConfig::defaults_for(PlatformFamily::Linux)
    }

    fn demoapp_host() -> FakeHost {
        FakeHost::new()
            .with_process(ProcessInfo::new(123, "demoapp".to_string()))
            .with_manager("apt")
            .with_walk_entry(
                "/opt",
                DirEntryInfo::new("demoapp".to_string(), "/opt/demoapp".to_string(), true),
            )
    }

    #[test]
    fn safe_mode_scans_but_never_mutates() {
        let host = demoapp_host();
        let result = run_removal("demoapp", Mode::Safe, &linux_config(), &host);

        assert_eq!(result.processes_found, 1);
        assert_eq!(result.paths_found, 1);
        assert_eq!(result.processes_terminated, 0);
        assert_eq!(result.paths_cleaned, 0);
        assert!(!result.uninstall_succeeded);

        // 任何更改系统的能力都未被触碰
        assert!(host.terminate_calls.borrow().is_empty());
        assert!(host.deleted.borrow().is_empty());
        assert!(host.executed.borrow().is_empty());
        assert!(host.prompts_seen.borrow().is_empty());
    }

    #[test]
    fn standard_decline_on_terminate_abandons_all_later_steps() {
        let host = FakeHost::new()
            .with_process(ProcessInfo::new(11, "chrome".to_string()))
            .with_process(ProcessInfo::new(12, "chrome-helper".to_string()))
            .answering(&[false]);

        let result = run_removal("chrome", Mode::Standard, &linux_config(), &host);

        assert_eq!(result.processes_found, 2);
        assert_eq!(result.processes_terminated, 0);
        assert_eq!(result.paths_found, 0);
        assert_eq!(result.paths_cleaned, 0);
        assert!(!result.uninstall_succeeded);

        // 路径扫描能力一次都未被调用
        assert_eq!(*host.path_scan_calls.borrow(), 0);
        assert!(host.terminate_calls.borrow().is_empty());
        assert_eq!(host.prompts_seen.borrow().len(), 1);
    }

    #[test]
    fn aggressive_linux_run_executes_every_step_without_prompting() {
        let host = demoapp_host();
        let result = run_removal("demoapp", Mode::Aggressive, &linux_config(), &host);

        assert_eq!(result.processes_found, 1);
        assert_eq!(result.processes_terminated, 1);
        assert_eq!(result.paths_found, 1);
        assert_eq!(result.paths_cleaned, 1);
        assert!(result.uninstall_succeeded);

        assert!(host.prompts_seen.borrow().is_empty());
        assert_eq!(*host.terminate_calls.borrow(), vec![123]);
        assert_eq!(*host.deleted.borrow(), vec!["/opt/demoapp".to_string()]);

        let executed = host.executed.borrow();
        assert_eq!(executed.len(), 1);
        assert_eq!(executed[0].display_line(), "sudo apt remove demoapp -y");
    }

    #[test]
    fn standard_decline_on_clean_still_skips_uninstall() {
        let host = FakeHost::new()
            .with_walk_entry(
                "/opt",
                DirEntryInfo::new("demoapp".to_string(), "/opt/demoapp".to_string(), true),
            )
            .answering(&[false]);

        let result = run_removal("demoapp", Mode::Standard, &linux_config(), &host);

        // 没有进程匹配时不询问终止，第一个确认点就是清理
        assert_eq!(host.prompts_seen.borrow().len(), 1);
        assert_eq!(result.paths_found, 1);
        assert_eq!(result.paths_cleaned, 0);
        assert!(!result.uninstall_succeeded);
        assert!(host.executed.borrow().is_empty());
    }

    #[test]
    fn standard_with_affirmative_answers_runs_to_completion() {
        let host = demoapp_host().answering(&[true, true, true]);
        let result = run_removal("demoapp", Mode::Standard, &linux_config(), &host);

        assert_eq!(host.prompts_seen.borrow().len(), 3);
        assert!(result.uninstall_succeeded);
        assert_eq!(result.processes_terminated, 1);
        assert_eq!(result.paths_cleaned, 1);
    }

    #[test]
    fn terminate_failure_is_isolated_and_run_continues() {
        let host = FakeHost::new()
            .with_process(ProcessInfo::new(21, "demoapp".to_string()))
            .with_process(ProcessInfo::new(22, "demoapp-agent".to_string()))
            .denying_terminate(22)
            .with_manager("apt");

        let result = run_removal("demoapp", Mode::Aggressive, &linux_config(), &host);

        assert_eq!(result.processes_found, 2);
        assert_eq!(result.processes_terminated, 1);
        // 后续步骤照常执行
        assert!(*host.path_scan_calls.borrow() > 0);
        assert_eq!(host.executed.borrow().len(), 1);
    }

    #[test]
    fn nonzero_exit_marks_uninstall_failed_without_aborting() {
        let host = demoapp_host().with_exit_code(1);
        let result = run_removal("demoapp", Mode::Aggressive, &linux_config(), &host);

        assert!(!result.uninstall_succeeded);
        assert_eq!(result.processes_terminated, 1);
        assert_eq!(result.paths_cleaned, 1);
    }

    #[test]
    fn standard_without_matches_only_confirms_the_uninstall_command() {
        let host = FakeHost::new().with_manager("apt").answering(&[true]);
        let result = run_removal("ghostware", Mode::Standard, &linux_config(), &host);

        assert_eq!(result.processes_found, 0);
        assert_eq!(result.paths_found, 0);
        // 唯一的确认点是系统卸载命令
        assert_eq!(host.prompts_seen.borrow().len(), 1);
        assert!(host.prompts_seen.borrow()[0].contains("sudo apt remove ghostware -y"));
        assert!(result.uninstall_succeeded);
    }

    #[test]
    fn detect_only_reports_matches_without_any_mutation() {
        let host = demoapp_host();
        let report = detect_only("demoapp", &linux_config(), &host);

        assert_eq!(report.process_matches.len(), 1);
        assert_eq!(report.process_matches[0].pid, 123);
        assert_eq!(report.path_matches.len(), 1);
        assert_eq!(report.path_matches[0].path, "/opt/demoapp");

        assert!(host.terminate_calls.borrow().is_empty());
        assert!(host.deleted.borrow().is_empty());
        assert!(host.executed.borrow().is_empty());
    }

    #[test]
    fn prompt_messages_list_the_matches() {
        let host = FakeHost::new()
            .with_process(ProcessInfo::new(31, "demoapp".to_string()))
            .answering(&[true, true]);

        run_removal("demoapp", Mode::Standard, &linux_config(), &host);

        let prompts = host.prompts_seen.borrow();
        assert!(prompts[0].contains("PID 31"));
        assert!(prompts[0].contains("demoapp"));
    }
}
