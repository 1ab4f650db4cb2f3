//! 测试用脚本化宿主：预置快照与应答，记录全部系统调用

use super::{CommandOutput, DirEntryInfo, SystemHost};
use crate::modules::common::error::UninstallerError;
use crate::modules::scanner::ProcessInfo;
use crate::modules::uninstaller::UninstallCommand;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::time::Duration;

#[derive(Default)]
pub struct FakeHost {
    pub processes: Vec<ProcessInfo>,
    pub listings: HashMap<String, Vec<DirEntryInfo>>,
    pub walks: HashMap<String, Vec<DirEntryInfo>>,
    pub installed_managers: HashSet<String>,
    pub terminate_denied: HashSet<u32>,
    pub command_exit_code: i32,
    pub prompt_answers: RefCell<VecDeque<bool>>,

    // 调用记录
    pub terminate_calls: RefCell<Vec<u32>>,
    pub path_scan_calls: RefCell<usize>,
    pub deleted: RefCell<Vec<String>>,
    pub executed: RefCell<Vec<UninstallCommand>>,
    pub prompts_seen: RefCell<Vec<String>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_process(mut self, process: ProcessInfo) -> Self {
        self.processes.push(process);
        self
    }

    pub fn with_manager(mut self, name: &str) -> Self {
        self.installed_managers.insert(name.to_string());
        self
    }

    pub fn with_listing(mut self, root: &str, entries: Vec<DirEntryInfo>) -> Self {
        self.listings.insert(root.to_string(), entries);
        self
    }

    pub fn with_walk_entry(mut self, root: &str, entry: DirEntryInfo) -> Self {
        self.walks.entry(root.to_string()).or_default().push(entry);
        self
    }

    pub fn with_exit_code(mut self, code: i32) -> Self {
        self.command_exit_code = code;
        self
    }

    pub fn denying_terminate(mut self, pid: u32) -> Self {
        self.terminate_denied.insert(pid);
        self
    }

    /// 预置确认应答，按顺序消费；耗尽后默认同意
    pub fn answering(self, answers: &[bool]) -> Self {
        self.prompt_answers.borrow_mut().extend(answers.iter().copied());
        self
    }
}

impl SystemHost for FakeHost {
    fn list_processes(&self) -> Vec<ProcessInfo> {
        self.processes.clone()
    }

    fn terminate_process(&self, pid: u32) -> Result<(), UninstallerError> {
        self.terminate_calls.borrow_mut().push(pid);
        if self.terminate_denied.contains(&pid) {
            return Err(UninstallerError::PermissionDenied(format!(
                "进程 {} 拒绝终止",
                pid
            )));
        }
        Ok(())
    }

    fn list_directory(&self, path: &str) -> Option<Vec<DirEntryInfo>> {
        *self.path_scan_calls.borrow_mut() += 1;
        self.listings.get(path).cloned()
    }

    fn walk_directory(&self, root: &str) -> Vec<DirEntryInfo> {
        *self.path_scan_calls.borrow_mut() += 1;
        self.walks.get(root).cloned().unwrap_or_default()
    }

    fn delete_file(&self, path: &str) -> Result<(), UninstallerError> {
        self.deleted.borrow_mut().push(path.to_string());
        Ok(())
    }

    fn delete_dir_recursive(&self, path: &str) -> Result<(), UninstallerError> {
        self.deleted.borrow_mut().push(path.to_string());
        Ok(())
    }

    fn command_exists(&self, name: &str) -> bool {
        self.installed_managers.contains(name)
    }

    fn run_command(
        &self,
        command: &UninstallCommand,
        _timeout: Duration,
    ) -> Result<CommandOutput, UninstallerError> {
        self.executed.borrow_mut().push(command.clone());
        Ok(CommandOutput {
            exit_code: self.command_exit_code,
            stdout: String::new(),
            stderr: String::new(),
        })
    }

    fn prompt_yes_no(&self, message: &str) -> bool {
        self.prompts_seen.borrow_mut().push(message.to_string());
        self.prompt_answers.borrow_mut().pop_front().unwrap_or(true)
    }
}
