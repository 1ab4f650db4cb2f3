use super::models::{ProcessInfo, SoftwareQuery};
use crate::modules::common::utils;

/// 在进程快照中查找与目标相关的进程
///
/// 匹配规则：小写化的目标名是进程名的子串，或是空格拼接后的
/// 命令行的子串。快照由调用方传入，本函数不访问系统；元数据
/// 不可读的进程在快照阶段就已缺失，不算扫描失败。
pub fn find_matches(query: &SoftwareQuery, snapshot: &[ProcessInfo]) -> Vec<ProcessInfo> {
    let pattern = query.pattern();
    let mut matches = Vec::new();

    for process in snapshot {
        if process.name.to_lowercase().contains(&pattern) {
            matches.push(process.clone());
            continue;
        }

        if !process.cmdline.is_empty() {
            let joined = utils::join_cmdline(&process.cmdline).to_lowercase();
            if joined.contains(&pattern) {
                matches.push(process.clone());
            }
        }
    }

    matches
}
