use super::models::{PathMatch, SoftwareQuery};
use crate::modules::platform::{PlatformConfig, PlatformFamily};
use crate::modules::system::SystemHost;

/// 在平台搜索目录中查找名称匹配的安装路径
///
/// Windows/macOS 只列举每个根目录的直接子项且仅保留目录；
/// Linux 递归遍历全部根目录，文件与目录都计入。这一差异来自
/// 各平台安装布局的实际形态，必须保持。结果按根目录分组，
/// 组内顺序不作保证。
pub fn find_paths(
    query: &SoftwareQuery,
    config: &PlatformConfig,
    host: &dyn SystemHost,
) -> Vec<PathMatch> {
    let pattern = query.pattern();
    let mut matches = Vec::new();

    for root in &config.search_roots {
        match config.family {
            PlatformFamily::Windows | PlatformFamily::MacOS => {
                scan_shallow(root, &pattern, host, &mut matches);
            }
            PlatformFamily::Linux => {
                scan_recursive(root, &pattern, host, &mut matches);
            }
        }
    }

    matches
}

/// 单层扫描：只看根目录的直接子目录
fn scan_shallow(root: &str, pattern: &str, host: &dyn SystemHost, matches: &mut Vec<PathMatch>) {
    let entries = match host.list_directory(root) {
        Some(entries) => entries,
        // 根目录不存在或不可读，静默跳过
        None => return,
    };

    tracing::debug!("扫描目录: {}", root);

    for entry in entries {
        if entry.is_directory && entry.name.to_lowercase().contains(pattern) {
            matches.push(PathMatch::new(entry.path, true));
        }
    }
}

/// 递归扫描：遍历根目录下全部层级，权限不足的子树由宿主跳过
fn scan_recursive(root: &str, pattern: &str, host: &dyn SystemHost, matches: &mut Vec<PathMatch>) {
    tracing::debug!("递归扫描目录: {}", root);

    for entry in host.walk_directory(root) {
        if entry.name.to_lowercase().contains(pattern) {
            matches.push(PathMatch::new(entry.path, entry.is_directory));
        }
    }
}
