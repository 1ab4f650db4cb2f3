//! 平台配置 - 解析操作系统家族，提供搜索目录与包管理器候选

pub mod models;

pub use models::{ConfigOverride, PlatformConfig, PlatformFamily, PlatformSection};

use crate::modules::common::error::UninstallerError;
use std::path::{Path, PathBuf};

/// 默认覆盖配置文件名（工作目录下，可选）
pub const DEFAULT_CONFIG_FILE: &str = "uninstall_config.json";

/// 解析当前平台的配置，应用可选的覆盖文件
pub fn resolve(config_path: Option<&Path>) -> PlatformConfig {
    resolve_for(PlatformFamily::current(), config_path)
}

/// 解析指定家族的配置
///
/// 覆盖文件缺失时静默使用默认值；文件损坏时告警并退回默认值，
/// 绝不让坏配置中断一次运行。
pub fn resolve_for(family: PlatformFamily, config_path: Option<&Path>) -> PlatformConfig {
    let mut config = PlatformConfig::defaults_for(family);

    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    match load_override(&path) {
        Ok(Some(doc)) => {
            if let Some(section) = doc.section_for(family) {
                apply_section(&mut config, section);
                tracing::debug!("已加载覆盖配置: {}", path.display());
            }
        }
        Ok(None) => {}
        Err(e) => {
            tracing::warn!("覆盖配置不可用，使用默认值: {}", e);
        }
    }

    config
}

/// 读取覆盖配置；文件不存在返回 None，内容损坏返回 Config 错误
pub fn load_override(path: &Path) -> Result<Option<ConfigOverride>, UninstallerError> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| UninstallerError::Config(format!("读取 {} 失败: {}", path.display(), e)))?;

    let doc: ConfigOverride = serde_json::from_str(&content)
        .map_err(|e| UninstallerError::Config(format!("解析 {} 失败: {}", path.display(), e)))?;

    Ok(Some(doc))
}

fn apply_section(config: &mut PlatformConfig, section: &PlatformSection) {
    if let Some(roots) = &section.search_roots {
        config.search_roots = roots.clone();
    }
    if let Some(managers) = &section.package_managers {
        config.package_managers = managers.clone();
    }
}
