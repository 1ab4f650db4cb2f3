//! 宿主能力层 - 核心经由 SystemHost 访问进程、文件系统与 shell
//!
//! 生产实现为 NativeHost；测试以脚本化宿主注入快照与应答，
//! 隔离全部系统副作用。

#[cfg(test)]
pub mod fake;

use crate::modules::common::error::UninstallerError;
use crate::modules::scanner::ProcessInfo;
use crate::modules::uninstaller::UninstallCommand;
use std::io::{Read, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, Signal, System, UpdateKind};
use walkdir::WalkDir;

/// 优雅终止后等待进程退出的上限
pub const TERMINATE_WAIT: Duration = Duration::from_secs(5);

const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// 目录条目：名称、完整路径、是否为目录
#[derive(Debug, Clone, PartialEq)]
pub struct DirEntryInfo {
    pub name: String,
    pub path: String,
    pub is_directory: bool,
}

impl DirEntryInfo {
    pub fn new(name: String, path: String, is_directory: bool) -> Self {
        Self {
            name,
            path,
            is_directory,
        }
    }
}

/// 命令执行结果
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// 核心所消费的宿主系统能力
pub trait SystemHost {
    /// 当前进程快照
    fn list_processes(&self) -> Vec<ProcessInfo>;

    /// 发送优雅终止信号并等待退出（上限 TERMINATE_WAIT）
    fn terminate_process(&self, pid: u32) -> Result<(), UninstallerError>;

    /// 列举目录的直接子项；目录缺失或不可读返回 None
    fn list_directory(&self, path: &str) -> Option<Vec<DirEntryInfo>>;

    /// 递归列举根目录下全部条目；权限不足的子树被跳过
    fn walk_directory(&self, root: &str) -> Vec<DirEntryInfo>;

    /// 删除单个文件
    fn delete_file(&self, path: &str) -> Result<(), UninstallerError>;

    /// 递归删除目录
    fn delete_dir_recursive(&self, path: &str) -> Result<(), UninstallerError>;

    /// 检查命令是否可在 PATH 中找到（包管理器探测）
    fn command_exists(&self, name: &str) -> bool;

    /// 执行卸载命令并捕获输出，超时后强制结束
    fn run_command(
        &self,
        command: &UninstallCommand,
        timeout: Duration,
    ) -> Result<CommandOutput, UninstallerError>;

    /// 阻塞式确认提示；仅 y（不分大小写）视为同意
    fn prompt_yes_no(&self, message: &str) -> bool;
}

/// 生产环境宿主适配
pub struct NativeHost;

impl SystemHost for NativeHost {
    fn list_processes(&self) -> Vec<ProcessInfo> {
        let mut sys = System::new();
        sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing()
                .with_exe(UpdateKind::Always)
                .with_cmd(UpdateKind::Always),
        );

        sys.processes()
            .iter()
            .map(|(pid, process)| {
                let mut info = ProcessInfo::new(
                    pid.as_u32(),
                    process.name().to_string_lossy().to_string(),
                )
                .with_cmdline(
                    process
                        .cmd()
                        .iter()
                        .map(|arg| arg.to_string_lossy().to_string())
                        .collect(),
                );
                if let Some(exe) = process.exe() {
                    info = info.with_exe(exe.to_string_lossy().to_string());
                }
                info
            })
            .collect()
    }

    fn terminate_process(&self, pid: u32) -> Result<(), UninstallerError> {
        let target = Pid::from_u32(pid);
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[target]), true);

        let process = match sys.process(target) {
            Some(p) => p,
            None => {
                return Err(UninstallerError::NotFound(format!("进程 {} 不存在", pid)));
            }
        };

        // 优先发送 SIGTERM，平台不支持时退回默认终止方式
        let sent = process
            .kill_with(Signal::Term)
            .unwrap_or_else(|| process.kill());
        if !sent {
            return Err(UninstallerError::PermissionDenied(format!(
                "无法向进程 {} 发送终止信号",
                pid
            )));
        }

        // 轮询等待退出，不重试也不升级为强制杀死
        let deadline = Instant::now() + TERMINATE_WAIT;
        loop {
            std::thread::sleep(POLL_INTERVAL);
            sys.refresh_processes(ProcessesToUpdate::Some(&[target]), true);
            if sys.process(target).is_none() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(UninstallerError::Timeout(format!(
                    "进程 {} 在 {} 秒内未退出",
                    pid,
                    TERMINATE_WAIT.as_secs()
                )));
            }
        }
    }

    fn list_directory(&self, path: &str) -> Option<Vec<DirEntryInfo>> {
        let entries = std::fs::read_dir(path).ok()?;

        Some(
            entries
                .filter_map(|e| e.ok())
                .map(|entry| {
                    DirEntryInfo::new(
                        entry.file_name().to_string_lossy().to_string(),
                        entry.path().to_string_lossy().to_string(),
                        entry.file_type().map(|t| t.is_dir()).unwrap_or(false),
                    )
                })
                .collect(),
        )
    }

    fn walk_directory(&self, root: &str) -> Vec<DirEntryInfo> {
        WalkDir::new(root)
            .min_depth(1)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|entry| {
                DirEntryInfo::new(
                    entry.file_name().to_string_lossy().to_string(),
                    entry.path().to_string_lossy().to_string(),
                    entry.file_type().is_dir(),
                )
            })
            .collect()
    }

    fn delete_file(&self, path: &str) -> Result<(), UninstallerError> {
        std::fs::remove_file(path).map_err(|e| map_delete_error(path, e))
    }

    fn delete_dir_recursive(&self, path: &str) -> Result<(), UninstallerError> {
        std::fs::remove_dir_all(path).map_err(|e| map_delete_error(path, e))
    }

    fn command_exists(&self, name: &str) -> bool {
        let path_var = match std::env::var_os("PATH") {
            Some(v) => v,
            None => return false,
        };

        for dir in std::env::split_paths(&path_var) {
            if cfg!(windows) {
                for ext in ["exe", "cmd", "bat"] {
                    if dir.join(format!("{}.{}", name, ext)).is_file() {
                        return true;
                    }
                }
            }
            if is_executable(&dir.join(name)) {
                return true;
            }
        }

        false
    }

    fn run_command(
        &self,
        command: &UninstallCommand,
        timeout: Duration,
    ) -> Result<CommandOutput, UninstallerError> {
        let mut cmd = match command {
            UninstallCommand::Exec { program, args } => {
                let mut c = Command::new(program);
                c.args(args);
                c
            }
            UninstallCommand::Shell(line) => shell_command(line),
        };

        let mut child = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| UninstallerError::Execution(format!("无法启动命令: {}", e)))?;

        // 后台线程读取输出，防止管道写满阻塞子进程
        let stdout_reader = spawn_pipe_reader(child.stdout.take());
        let stderr_reader = spawn_pipe_reader(child.stderr.take());

        let deadline = Instant::now() + timeout;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => {
                    let stdout = stdout_reader.join().unwrap_or_default();
                    let stderr = stderr_reader.join().unwrap_or_default();
                    return Ok(CommandOutput {
                        exit_code: status.code().unwrap_or(-1),
                        stdout,
                        stderr,
                    });
                }
                Ok(None) => {
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(UninstallerError::Timeout(format!(
                            "命令超过 {} 秒未结束",
                            timeout.as_secs()
                        )));
                    }
                    std::thread::sleep(POLL_INTERVAL);
                }
                Err(e) => {
                    return Err(UninstallerError::Execution(format!("等待命令失败: {}", e)));
                }
            }
        }
    }

    fn prompt_yes_no(&self, message: &str) -> bool {
        print!("{} (y/n): ", message);
        let _ = std::io::stdout().flush();

        let mut input = String::new();
        if std::io::stdin().read_line(&mut input).is_err() {
            return false;
        }
        input.trim().eq_ignore_ascii_case("y")
    }
}

fn map_delete_error(path: &str, e: std::io::Error) -> UninstallerError {
    match e.kind() {
        std::io::ErrorKind::PermissionDenied => {
            UninstallerError::PermissionDenied(format!("删除 {} 被拒绝", path))
        }
        std::io::ErrorKind::NotFound => {
            UninstallerError::NotFound(format!("路径 {} 已不存在", path))
        }
        _ => UninstallerError::FileSystem(e),
    }
}

fn shell_command(line: &str) -> Command {
    if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.args(["/C", line]);
        c
    } else {
        let mut c = Command::new("sh");
        c.args(["-c", line]);
        c
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

fn spawn_pipe_reader<R: Read + Send + 'static>(pipe: Option<R>) -> std::thread::JoinHandle<String> {
    std::thread::spawn(move || {
        let mut buf = String::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_string(&mut buf);
        }
        buf
    })
}
