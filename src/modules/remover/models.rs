use crate::modules::scanner::{PathMatch, ProcessInfo};
use serde::{Deserialize, Serialize};

/// 运行模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// 仅检测，绝不更改系统状态
    Safe,
    /// 每个更改步骤前询问确认
    Standard,
    /// 不询问，执行全部步骤
    Aggressive,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Safe => "安全",
            Mode::Standard => "标准",
            Mode::Aggressive => "激进",
        }
    }
}

/// 一次卸载运行的汇总结果；运行中逐步累积，返回后不再变化
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemovalResult {
    pub software_name: String,
    pub processes_found: usize,
    pub processes_terminated: usize,
    pub paths_found: usize,
    pub paths_cleaned: usize,
    pub uninstall_succeeded: bool,
}

impl RemovalResult {
    pub fn new(software_name: String) -> Self {
        Self {
            software_name,
            processes_found: 0,
            processes_terminated: 0,
            paths_found: 0,
            paths_cleaned: 0,
            uninstall_succeeded: false,
        }
    }
}

/// 只读检测报告
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionReport {
    pub software_name: String,
    pub process_matches: Vec<ProcessInfo>,
    pub path_matches: Vec<PathMatch>,
}
