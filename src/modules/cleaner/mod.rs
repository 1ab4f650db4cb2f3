//! 清理器 - 删除匹配到的文件与目录，逐项独立容错

use crate::modules::scanner::PathMatch;
use crate::modules::system::SystemHost;

/// 清理一组路径，返回成功删除的数量
///
/// 每一项独立尝试：权限不足、占用中、已消失都只记为该项失败，
/// 不影响其余路径。输入长度与返回值之差即失败数。按扫描时记录
/// 的目录标志分派删除方式，清理时已消失的路径走 NotFound 失败。
pub fn clean_paths(paths: &[PathMatch], host: &dyn SystemHost) -> usize {
    let mut cleaned = 0;

    for item in paths {
        let outcome = if item.is_directory {
            host.delete_dir_recursive(&item.path)
        } else {
            host.delete_file(&item.path)
        };

        match outcome {
            Ok(()) => {
                tracing::info!("已删除: {}", item.path);
                cleaned += 1;
            }
            Err(e) => {
                tracing::warn!("删除失败 {}: {}", item.path, e);
            }
        }
    }

    cleaned
}
