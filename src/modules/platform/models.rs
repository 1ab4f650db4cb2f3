use serde::{Deserialize, Serialize};

/// 操作系统家族
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformFamily {
    Windows,
    MacOS,
    Linux,
}

impl PlatformFamily {
    /// 当前编译目标对应的家族
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            PlatformFamily::Windows
        } else if cfg!(target_os = "macos") {
            PlatformFamily::MacOS
        } else {
            PlatformFamily::Linux
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlatformFamily::Windows => "Windows",
            PlatformFamily::MacOS => "macOS",
            PlatformFamily::Linux => "Linux",
        }
    }
}

/// 平台配置：搜索根目录与包管理器候选（按优先级排列）
///
/// 每次运行解析一次，之后只读传递，不存在全局可变状态。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    pub family: PlatformFamily,
    pub search_roots: Vec<String>,
    pub package_managers: Vec<String>,
}

impl PlatformConfig {
    /// 各平台的内置默认值
    pub fn defaults_for(family: PlatformFamily) -> Self {
        match family {
            PlatformFamily::Windows => Self {
                family,
                search_roots: vec![
                    r"C:\Program Files".to_string(),
                    r"C:\Program Files (x86)".to_string(),
                ],
                package_managers: Vec::new(),
            },
            PlatformFamily::MacOS => Self {
                family,
                search_roots: vec!["/Applications".to_string()],
                package_managers: Vec::new(),
            },
            PlatformFamily::Linux => Self {
                family,
                search_roots: vec![
                    "/usr/bin".to_string(),
                    "/usr/local/bin".to_string(),
                    "/opt".to_string(),
                    "/snap".to_string(),
                    "/var/lib/flatpak/app".to_string(),
                ],
                package_managers: vec![
                    "apt".to_string(),
                    "yum".to_string(),
                    "dnf".to_string(),
                    "pacman".to_string(),
                    "snap".to_string(),
                    "flatpak".to_string(),
                ],
            },
        }
    }
}

/// 覆盖配置文件的顶层结构 (uninstall_config.json)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigOverride {
    pub windows: Option<PlatformSection>,
    pub macos: Option<PlatformSection>,
    pub linux: Option<PlatformSection>,
}

/// 单个平台小节，未出现的字段保持内置默认
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlatformSection {
    pub search_roots: Option<Vec<String>>,
    pub package_managers: Option<Vec<String>>,
}

impl ConfigOverride {
    pub fn section_for(&self, family: PlatformFamily) -> Option<&PlatformSection> {
        match family {
            PlatformFamily::Windows => self.windows.as_ref(),
            PlatformFamily::MacOS => self.macos.as_ref(),
            PlatformFamily::Linux => self.linux.as_ref(),
        }
    }
}
