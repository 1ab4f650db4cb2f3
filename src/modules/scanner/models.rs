use serde::{Deserialize, Serialize};

/// 卸载目标查询：全程使用大小写不敏感的子串匹配
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoftwareQuery {
    pub name: String,
}

impl SoftwareQuery {
    pub fn new(name: String) -> Self {
        Self { name }
    }

    /// 匹配用小写模式；除小写化外不做任何归一化
    pub fn pattern(&self) -> String {
        self.name.to_lowercase()
    }
}

/// 进程快照条目；匹配结果与快照条目同构，每次扫描即时产生，不持久化
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessInfo {
    pub pid: u32,
    pub name: String,
    pub exe: Option<String>,
    pub cmdline: Vec<String>,
}

impl ProcessInfo {
    pub fn new(pid: u32, name: String) -> Self {
        Self {
            pid,
            name,
            exe: None,
            cmdline: Vec::new(),
        }
    }

    pub fn with_exe(mut self, exe: String) -> Self {
        self.exe = Some(exe);
        self
    }

    pub fn with_cmdline(mut self, cmdline: Vec<String>) -> Self {
        self.cmdline = cmdline;
        self
    }
}

/// 文件系统匹配条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathMatch {
    pub path: String,
    pub is_directory: bool,
}

impl PathMatch {
    pub fn new(path: String, is_directory: bool) -> Self {
        Self { path, is_directory }
    }
}
