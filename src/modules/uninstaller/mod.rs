//! 卸载命令构建 - 按平台与可用包管理器生成系统级卸载命令

pub mod models;

pub use models::UninstallCommand;

use crate::modules::platform::{PlatformConfig, PlatformFamily};
use crate::modules::system::SystemHost;

/// 构建系统卸载命令；只探测不执行
///
/// Linux 按配置顺序探测包管理器，第一个已安装者胜出；已安装但
/// 不认识的名字跳过继续探测，全部缺席时退回 /opt 目录删除。
/// 对同一组 (名称, 配置, 已安装管理器) 输入结果恒定。
pub fn build_uninstall_command(
    name: &str,
    config: &PlatformConfig,
    host: &dyn SystemHost,
) -> Option<UninstallCommand> {
    match config.family {
        PlatformFamily::Windows => Some(UninstallCommand::Shell(format!(
            r#"wmic product where name="{}" call uninstall"#,
            name
        ))),
        PlatformFamily::MacOS => Some(UninstallCommand::exec(
            "sudo",
            &["rm", "-rf", &format!("/Applications/{}.app", name)],
        )),
        PlatformFamily::Linux => {
            for pm in &config.package_managers {
                if host.command_exists(pm) {
                    if let Some(cmd) = manager_command(pm, name) {
                        tracing::debug!("选用包管理器: {}", pm);
                        return Some(cmd);
                    }
                }
            }
            Some(UninstallCommand::exec(
                "sudo",
                &["rm", "-rf", &format!("/opt/{}", name)],
            ))
        }
    }
}

/// 已知包管理器的卸载语法；不认识的返回 None
fn manager_command(pm: &str, name: &str) -> Option<UninstallCommand> {
    match pm {
        "apt" | "apt-get" | "yum" | "dnf" => {
            Some(UninstallCommand::exec("sudo", &[pm, "remove", name, "-y"]))
        }
        "pacman" => Some(UninstallCommand::exec(
            "sudo",
            &["pacman", "-R", name, "--noconfirm"],
        )),
        "snap" => Some(UninstallCommand::exec("sudo", &["snap", "remove", name])),
        // flatpak 以用户态运行，不加 sudo
        "flatpak" => Some(UninstallCommand::exec(
            "flatpak",
            &["uninstall", name, "-y"],
        )),
        _ => None,
    }
}
