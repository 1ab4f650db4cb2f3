//! 扫描器 - 进程快照匹配与安装路径定位
//!
//! 两类信号共用同一套子串匹配规则：进程扫描是对调用方传入快照的
//! 纯过滤，路径扫描经由宿主能力访问文件系统。

pub mod models;
pub mod paths;
pub mod process;

pub use models::{PathMatch, ProcessInfo, SoftwareQuery};
pub use paths::find_paths;
pub use process::find_matches;
