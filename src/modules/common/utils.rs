/// 生成唯一任务 ID
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// 将命令行参数拼接为单个字符串
pub fn join_cmdline(args: &[String]) -> String {
    args.join(" ")
}

/// 检查当前进程是否具有 root 权限
#[cfg(unix)]
pub fn is_elevated() -> bool {
    unsafe { libc::geteuid() == 0 }
}

/// Windows 下不做 euid 检测，权限问题由执行时的系统错误暴露
#[cfg(not(unix))]
pub fn is_elevated() -> bool {
    true
}
